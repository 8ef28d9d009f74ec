use crate::server::{error::Error, model::app::AppState, service::visitor::VisitorService};

/// Deactivates visitors whose access has expired
///
/// # Returns
/// - `Ok(usize)` - Number of visitors deactivated
pub async fn cleanup_expired_visitors(state: AppState) -> Result<usize, Error> {
    let deactivated = VisitorService::new(&state.db, &state.policy, state.notifier.as_ref())
        .cleanup_expired_visitors()
        .await?;

    Ok(deactivated as usize)
}

/// Notifies visitors whose access ends within the configured notice window
///
/// # Returns
/// - `Ok(usize)` - Number of notices sent
pub async fn notify_expiring_visitors(state: AppState) -> Result<usize, Error> {
    VisitorService::new(&state.db, &state.policy, state.notifier.as_ref())
        .notify_expiring_visitors(state.policy.visitor_expiry_notice_days)
        .await
}
