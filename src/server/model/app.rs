use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::PolicyConfig,
    notify::{LogNotifier, Notifier},
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub policy: PolicyConfig,
    pub notifier: Arc<dyn Notifier>,
}

/// Default policy and a logging notifier, used by integration tests.
impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        Self {
            db,
            policy: PolicyConfig::default(),
            notifier: Arc::new(LogNotifier),
        }
    }
}

impl AppState {
    /// Replaces the default policy with a configured one
    pub fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }
}
