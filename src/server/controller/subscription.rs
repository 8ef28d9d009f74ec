use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, subscription::FeatureUsageDto},
    server::{
        controller::util::principal::get_principal_from_session, error::Error,
        model::app::AppState, service::subscription::SubscriptionService,
    },
};

pub static SUBSCRIPTION_TAG: &str = "subscription";

/// Room and tenant usage of a hostel against its plan limits
#[utoipa::path(
    get,
    path = "/api/hostels/{hostel_id}/usage",
    tag = SUBSCRIPTION_TAG,
    params(("hostel_id" = i32, Path, description = "Hostel ID")),
    responses(
        (status = 200, description = "Feature usage", body = FeatureUsageDto),
        (status = 403, description = "No access to the hostel", body = ErrorDto),
        (status = 404, description = "No subscription could be provisioned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_feature_usage(
    State(state): State<AppState>,
    session: Session,
    Path(hostel_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let usage = SubscriptionService::new(&state.db, &state.policy)
        .get_feature_usage(&principal, hostel_id)
        .await?;

    Ok((StatusCode::OK, Json(usage)))
}
