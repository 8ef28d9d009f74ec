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
        occupancy::{CheckInDto, CheckOutDto, CreateTenantDto, StayDto, TenantDto},
    },
    server::{
        controller::util::principal::get_principal_from_session, data::tenant::NewTenant,
        error::Error, model::app::AppState, service::occupancy::OccupancyService,
    },
};

pub static TENANT_TAG: &str = "tenant";

/// Create the tenant profile of a TENANT user
#[utoipa::path(
    post,
    path = "/api/tenants",
    tag = TENANT_TAG,
    request_body = CreateTenantDto,
    responses(
        (status = 201, description = "Tenant created", body = TenantDto),
        (status = 402, description = "Plan tenant limit reached", body = ErrorDto),
        (status = 404, description = "User or hostel not found", body = ErrorDto),
        (status = 409, description = "User already has a tenant profile", body = ErrorDto),
        (status = 422, description = "User is not a tenant or belongs to another hostel", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_tenant(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateTenantDto>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let tenant = OccupancyService::new(&state.db, &state.policy)
        .create_tenant(
            &principal,
            NewTenant {
                user_id: payload.user_id,
                hostel_id: payload.hostel_id,
                full_name: payload.full_name,
                guardian_name: payload.guardian_name,
                guardian_phone: payload.guardian_phone,
                emergency_contact: payload.emergency_contact,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(TenantDto::from(tenant))))
}

/// Get a tenant; tenants may only read their own profile
#[utoipa::path(
    get,
    path = "/api/tenants/{tenant_id}",
    tag = TENANT_TAG,
    params(("tenant_id" = i32, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "Tenant", body = TenantDto),
        (status = 403, description = "No access to the tenant", body = ErrorDto),
        (status = 404, description = "Tenant not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tenant(
    State(state): State<AppState>,
    session: Session,
    Path(tenant_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let tenant = OccupancyService::new(&state.db, &state.policy)
        .get_tenant(&principal, tenant_id)
        .await?;

    Ok((StatusCode::OK, Json(TenantDto::from(tenant))))
}

/// Check a tenant in to a bed
#[utoipa::path(
    post,
    path = "/api/tenants/{tenant_id}/check-in",
    tag = TENANT_TAG,
    params(("tenant_id" = i32, Path, description = "Tenant ID")),
    request_body = CheckInDto,
    responses(
        (status = 200, description = "Tenant checked in", body = TenantDto),
        (status = 404, description = "Tenant or bed not found", body = ErrorDto),
        (status = 409, description = "Bed already occupied", body = ErrorDto),
        (status = 422, description = "Tenant already checked in elsewhere", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_in(
    State(state): State<AppState>,
    session: Session,
    Path(tenant_id): Path<i32>,
    Json(payload): Json<CheckInDto>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let tenant = OccupancyService::new(&state.db, &state.policy)
        .check_in(&principal, tenant_id, payload.bed_id, payload.check_in_date)
        .await?;

    Ok((StatusCode::OK, Json(TenantDto::from(tenant))))
}

/// Check a tenant out and free their bed
#[utoipa::path(
    post,
    path = "/api/tenants/{tenant_id}/check-out",
    tag = TENANT_TAG,
    params(("tenant_id" = i32, Path, description = "Tenant ID")),
    request_body = CheckOutDto,
    responses(
        (status = 200, description = "Tenant checked out", body = TenantDto),
        (status = 404, description = "Tenant not found", body = ErrorDto),
        (status = 422, description = "Tenant is not checked in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_out(
    State(state): State<AppState>,
    session: Session,
    Path(tenant_id): Path<i32>,
    Json(payload): Json<CheckOutDto>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let tenant = OccupancyService::new(&state.db, &state.policy)
        .check_out(
            &principal,
            tenant_id,
            payload.check_out_date,
            payload.notes,
        )
        .await?;

    Ok((StatusCode::OK, Json(TenantDto::from(tenant))))
}

/// Stay history of a tenant, newest first
#[utoipa::path(
    get,
    path = "/api/tenants/{tenant_id}/stays",
    tag = TENANT_TAG,
    params(("tenant_id" = i32, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "Stay records", body = Vec<StayDto>),
        (status = 403, description = "No access to the tenant", body = ErrorDto),
        (status = 404, description = "Tenant not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn stay_history(
    State(state): State<AppState>,
    session: Session,
    Path(tenant_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let stays: Vec<StayDto> = OccupancyService::new(&state.db, &state.policy)
        .stay_history(&principal, tenant_id)
        .await?
        .into_iter()
        .map(StayDto::from)
        .collect();

    Ok((StatusCode::OK, Json(stays)))
}
