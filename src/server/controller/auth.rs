use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::ActiveEnum;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        auth::{LoginDto, SessionUserDto},
    },
    server::{
        controller::util::principal::get_principal_from_session,
        error::Error,
        model::{app::AppState, principal::Principal, session::user::SessionUserId},
        service::{auth::AuthService, identity::IdentityService},
    },
};

pub static AUTH_TAG: &str = "auth";

/// Log in with an email address or phone number and a password
///
/// On success the user ID is stored in the session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = SessionUserDto),
        (status = 401, description = "Invalid credentials or inactive account", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state.db)
        .login(&payload.identifier, &payload.password)
        .await?;

    let principal = IdentityService::new(&state.db)
        .resolve_principal(user.id)
        .await?;

    session.cycle_id().await?;
    SessionUserId::insert(&session, user.id).await?;

    Ok((StatusCode::OK, Json(session_user_dto(&principal))))
}

/// Log out by clearing the session
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    // Clearing an empty session fails, so only clear when a user is present
    if let Some(user_id) = SessionUserId::get(&session).await? {
        AuthService::new(&state.db).logout(user_id).await;
        session.clear().await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Get the logged in user's role and hostel scope
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged in user", body = SessionUserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    Ok((StatusCode::OK, Json(session_user_dto(&principal))))
}

fn session_user_dto(principal: &Principal) -> SessionUserDto {
    SessionUserDto {
        id: principal.user_id(),
        role: principal.role().to_value(),
        hostel_ids: principal.hostel_ids().unwrap_or_default(),
    }
}
