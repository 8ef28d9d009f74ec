use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::AppState, principal::Principal, session::user::SessionUserId},
    service::identity::IdentityService,
};

/// Resolves the [`Principal`] of the user stored in session
///
/// # Returns
/// - `Ok(Principal)` - Principal of the logged in user
/// - `Err(Error::AuthError(UserNotInSession))` - No user ID present in session
/// - `Err(Error::AuthError(UserNotInDatabase))` - User ID in session no longer resolves to a
///   live user (session is cleared)
/// - `Err(Error::AuthError(AccountInactive))` - Account was deactivated (session is cleared)
pub async fn get_principal_from_session(
    state: &AppState,
    session: &Session,
) -> Result<Principal, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    match IdentityService::new(&state.db).resolve_principal(user_id).await {
        Ok(principal) => Ok(principal),
        Err(Error::AuthError(e @ (AuthError::UserNotInDatabase(_) | AuthError::AccountInactive(_)))) => {
            session.clear().await;

            tracing::debug!(
                "Session cleared for user ID {} which no longer resolves: {}",
                user_id,
                e
            );

            Err(Error::AuthError(e))
        }
        Err(e) => Err(e),
    }
}
