use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::room::RoomType;
use sea_orm::ActiveEnum;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        occupancy::{CreateRoomDto, RoomDto},
    },
    server::{
        controller::util::principal::get_principal_from_session,
        data::room::NewRoom,
        error::{resource::ValidationError, Error},
        model::app::AppState,
        service::occupancy::OccupancyService,
    },
};

pub static ROOM_TAG: &str = "room";

/// Create a room in a hostel
#[utoipa::path(
    post,
    path = "/api/rooms",
    tag = ROOM_TAG,
    request_body = CreateRoomDto,
    responses(
        (status = 201, description = "Room created", body = RoomDto),
        (status = 402, description = "Plan room limit reached", body = ErrorDto),
        (status = 403, description = "No access to the hostel", body = ErrorDto),
        (status = 409, description = "Room number already in use", body = ErrorDto),
        (status = 422, description = "Invalid capacity or room type", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_room(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateRoomDto>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let room_type = RoomType::try_from_value(&payload.room_type).map_err(|_| {
        ValidationError::InvalidValue {
            field: "room_type",
            value: payload.room_type.clone(),
        }
    })?;

    let room = OccupancyService::new(&state.db, &state.policy)
        .create_room(
            &principal,
            NewRoom {
                hostel_id: payload.hostel_id,
                number: payload.number,
                floor: payload.floor,
                room_type,
                capacity: payload.capacity,
                description: payload.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RoomDto::from(room))))
}

/// List the live rooms of a hostel
#[utoipa::path(
    get,
    path = "/api/hostels/{hostel_id}/rooms",
    tag = ROOM_TAG,
    params(("hostel_id" = i32, Path, description = "Hostel ID")),
    responses(
        (status = 200, description = "Rooms of the hostel", body = Vec<RoomDto>),
        (status = 403, description = "No access to the hostel", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    session: Session,
    Path(hostel_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let rooms: Vec<RoomDto> = OccupancyService::new(&state.db, &state.policy)
        .list_rooms(&principal, hostel_id)
        .await?
        .into_iter()
        .map(RoomDto::from)
        .collect();

    Ok((StatusCode::OK, Json(rooms)))
}

/// Soft delete a room together with its vacant beds
#[utoipa::path(
    delete,
    path = "/api/rooms/{room_id}",
    tag = ROOM_TAG,
    params(("room_id" = i32, Path, description = "Room ID")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 403, description = "No access to the room's hostel", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 422, description = "Room still has occupied beds", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_room(
    State(state): State<AppState>,
    session: Session,
    Path(room_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    OccupancyService::new(&state.db, &state.policy)
        .delete_room(&principal, room_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Restore a deleted room and the beds deleted with it
#[utoipa::path(
    post,
    path = "/api/rooms/{room_id}/restore",
    tag = ROOM_TAG,
    params(("room_id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room restored", body = RoomDto),
        (status = 402, description = "Plan room limit reached", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 422, description = "Room is not deleted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn restore_room(
    State(state): State<AppState>,
    session: Session,
    Path(room_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal_from_session(&state, &session).await?;

    let room = OccupancyService::new(&state.db, &state.policy)
        .restore_room(&principal, room_id)
        .await?;

    Ok((StatusCode::OK, Json(RoomDto::from(room))))
}
