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
        occupancy::{AssignBedDto, BedDto, CreateBedDto},
    },
    server::{
        controller::util::principal::get_principal_from_session, error::Error,
        model::app::AppState, service::occupancy::OccupancyService,
    },
};

pub static BED_TAG: &str = "bed";

/// Add a bed to a room
#[utoipa::path(
    post,
    path = "/api/beds",
    tag = BED_TAG,
    request_body = CreateBedDto,
    responses(
        (status = 201, description = "Bed created", body = BedDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 409, description = "Bed number already in use", body = ErrorDto),
        (status = 422, description = "Room is at capacity", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_bed(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateBedDto>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let bed = OccupancyService::new(&state.db, &state.policy)
        .create_bed(&principal, payload.room_id, payload.number)
        .await?;

    Ok((StatusCode::CREATED, Json(BedDto::from(bed))))
}

/// List the vacant beds of a hostel
#[utoipa::path(
    get,
    path = "/api/hostels/{hostel_id}/beds/available",
    tag = BED_TAG,
    params(("hostel_id" = i32, Path, description = "Hostel ID")),
    responses(
        (status = 200, description = "Vacant beds", body = Vec<BedDto>),
        (status = 403, description = "No access to the hostel", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_available_beds(
    State(state): State<AppState>,
    session: Session,
    Path(hostel_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let beds: Vec<BedDto> = OccupancyService::new(&state.db, &state.policy)
        .list_available_beds(&principal, hostel_id)
        .await?
        .into_iter()
        .map(BedDto::from)
        .collect();

    Ok((StatusCode::OK, Json(beds)))
}

/// Assign a vacant bed to a tenant
#[utoipa::path(
    post,
    path = "/api/beds/{bed_id}/assign",
    tag = BED_TAG,
    params(("bed_id" = i32, Path, description = "Bed ID")),
    request_body = AssignBedDto,
    responses(
        (status = 200, description = "Bed assigned", body = BedDto),
        (status = 404, description = "Bed or tenant not found", body = ErrorDto),
        (status = 409, description = "Bed already occupied", body = ErrorDto),
        (status = 422, description = "Tenant already holds a bed or belongs to another hostel", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_bed(
    State(state): State<AppState>,
    session: Session,
    Path(bed_id): Path<i32>,
    Json(payload): Json<AssignBedDto>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let (bed, _) = OccupancyService::new(&state.db, &state.policy)
        .assign_bed(&principal, bed_id, payload.tenant_id)
        .await?;

    Ok((StatusCode::OK, Json(BedDto::from(bed))))
}

/// Vacate an occupied bed
#[utoipa::path(
    post,
    path = "/api/beds/{bed_id}/vacate",
    tag = BED_TAG,
    params(("bed_id" = i32, Path, description = "Bed ID")),
    responses(
        (status = 200, description = "Bed vacated", body = BedDto),
        (status = 404, description = "Bed not found", body = ErrorDto),
        (status = 422, description = "Bed is not occupied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn vacate_bed(
    State(state): State<AppState>,
    session: Session,
    Path(bed_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let bed = OccupancyService::new(&state.db, &state.policy)
        .vacate_bed(&principal, bed_id)
        .await?;

    Ok((StatusCode::OK, Json(BedDto::from(bed))))
}

/// Soft delete a vacant bed
#[utoipa::path(
    delete,
    path = "/api/beds/{bed_id}",
    tag = BED_TAG,
    params(("bed_id" = i32, Path, description = "Bed ID")),
    responses(
        (status = 204, description = "Bed deleted"),
        (status = 404, description = "Bed not found", body = ErrorDto),
        (status = 422, description = "Bed is occupied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_bed(
    State(state): State<AppState>,
    session: Session,
    Path(bed_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    OccupancyService::new(&state.db, &state.policy)
        .delete_bed(&principal, bed_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
