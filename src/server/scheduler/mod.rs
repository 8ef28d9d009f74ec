//! Scheduler for periodic visitor maintenance.
//!
//! Visitor access is judged dynamically against the expiry on every request, so these jobs
//! never gate authorization. They keep the `is_active` flag in line with expiry for listings
//! and send expiry notices ahead of time.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::Error, model::app::AppState};

pub mod config;
pub mod visitor;

use self::config::visitor as visitor_config;

/// Job scheduler for the periodic visitor tasks.
pub struct Scheduler {
    state: AppState,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(state: AppState) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { state, sched })
    }

    /// Registers the visitor cleanup and expiry notice jobs, then starts the scheduler.
    ///
    /// # Returns
    /// - `Ok(())` - All jobs registered and scheduler started
    /// - `Err(Error)` - Failed to register a job or start the scheduler
    pub async fn start(mut self) -> Result<(), Error> {
        self.schedule_job(
            visitor_config::CLEANUP_CRON_EXPRESSION,
            "expired visitor cleanup",
            visitor::cleanup_expired_visitors,
        )
        .await?;

        self.schedule_job(
            visitor_config::EXPIRY_NOTICE_CRON_EXPRESSION,
            "visitor expiry notice",
            visitor::notify_expiring_visitors,
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The job receives a clone of the application state and returns the number of items it
    /// processed, which is logged along with any error.
    ///
    /// # Arguments
    /// - `cron` - Cron expression with seconds (e.g., "0 0 2 * * *" for daily at 02:00)
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async job body
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(AppState) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
    {
        let state = self.state.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let state = state.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(state).await {
                        Ok(count) => tracing::info!("Ran {}: {} processed", name, count),
                        Err(e) => tracing::error!("Error running {}: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
