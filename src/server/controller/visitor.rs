use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        visitor::{CreateVisitorDto, ExtendVisitorDto, VisitorDto},
    },
    server::{
        controller::util::principal::get_principal_from_session, error::Error,
        model::app::AppState, service::visitor::VisitorService,
    },
};

pub static VISITOR_TAG: &str = "visitor";

/// Create a time-limited visitor account
///
/// The response carries the temporary password when one was generated.
#[utoipa::path(
    post,
    path = "/api/visitors",
    tag = VISITOR_TAG,
    request_body = CreateVisitorDto,
    responses(
        (status = 201, description = "Visitor created", body = VisitorDto),
        (status = 403, description = "No access to the hostel", body = ErrorDto),
        (status = 409, description = "Email or phone already registered", body = ErrorDto),
        (status = 422, description = "No contact method or invalid duration", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_visitor(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateVisitorDto>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let visitor = VisitorService::new(&state.db, &state.policy, state.notifier.as_ref())
        .create_visitor(&principal, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(visitor)))
}

/// Extend a visitor's access
#[utoipa::path(
    post,
    path = "/api/visitors/{user_id}/extend",
    tag = VISITOR_TAG,
    params(("user_id" = i32, Path, description = "User ID of the visitor")),
    request_body = ExtendVisitorDto,
    responses(
        (status = 200, description = "Access extended", body = VisitorDto),
        (status = 404, description = "Visitor not found", body = ErrorDto),
        (status = 422, description = "Invalid duration", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn extend_visitor_access(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<ExtendVisitorDto>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let visitor = VisitorService::new(&state.db, &state.policy, state.notifier.as_ref())
        .extend_visitor_access(&principal, user_id, payload.additional_days)
        .await?;

    Ok((StatusCode::OK, Json(visitor)))
}

/// Revoke a visitor's access immediately
#[utoipa::path(
    post,
    path = "/api/visitors/{user_id}/revoke",
    tag = VISITOR_TAG,
    params(("user_id" = i32, Path, description = "User ID of the visitor")),
    responses(
        (status = 200, description = "Access revoked", body = VisitorDto),
        (status = 404, description = "Visitor not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn revoke_visitor_access(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let visitor = VisitorService::new(&state.db, &state.policy, state.notifier.as_ref())
        .revoke_visitor_access(&principal, user_id)
        .await?;

    Ok((StatusCode::OK, Json(visitor)))
}

/// List the active, unexpired visitors of a hostel
#[utoipa::path(
    get,
    path = "/api/hostels/{hostel_id}/visitors",
    tag = VISITOR_TAG,
    params(("hostel_id" = i32, Path, description = "Hostel ID")),
    responses(
        (status = 200, description = "Active visitors", body = Vec<VisitorDto>),
        (status = 403, description = "No access to the hostel", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_active_visitors(
    State(state): State<AppState>,
    session: Session,
    Path(hostel_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let visitors = VisitorService::new(&state.db, &state.policy, state.notifier.as_ref())
        .get_active_visitors(&principal, hostel_id)
        .await?;

    Ok((StatusCode::OK, Json(visitors)))
}
