use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use hostel::{
    model::occupancy::CreateRoomDto,
    server::{
        controller::room::{create_room, delete_room, list_rooms, restore_room},
        model::app::AppState,
    },
};
use hostel_test_utils::prelude::*;

use crate::util::login_as;

fn room_dto(hostel_id: i32, number: &str, room_type: &str) -> Json<CreateRoomDto> {
    Json(CreateRoomDto {
        hostel_id,
        number: number.to_string(),
        floor: 1,
        room_type: room_type.to_string(),
        capacity: 2,
        description: None,
    })
}

/// Expect 201 when an admin creates a room in their hostel
#[tokio::test]
async fn creates_room() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    login_as(&test, admin.id).await?;

    let response = create_room(
        State(test.to_app_state::<AppState>()),
        test.session.clone(),
        room_dto(1, "101", "DOUBLE"),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::CREATED);

    Ok(())
}

/// Expect 422 for an unknown room type
#[tokio::test]
async fn rejects_unknown_room_type() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    login_as(&test, admin.id).await?;

    let response = create_room(
        State(test.to_app_state::<AppState>()),
        test.session.clone(),
        room_dto(1, "101", "PENTHOUSE"),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

/// Expect 403 when creating a room in a hostel outside the admin's scope
#[tokio::test]
async fn forbids_foreign_hostel() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .with_hostel("H2")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    login_as(&test, admin.id).await?;

    let response = create_room(
        State(test.to_app_state::<AppState>()),
        test.session.clone(),
        room_dto(2, "201", "SINGLE"),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 402 once the free plan's room cap is reached
#[tokio::test]
async fn room_limit_returns_payment_required() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    for number in ["101", "102", "103", "104", "105"] {
        test.occupancy().insert_room(1, number, 1).await?;
    }
    login_as(&test, admin.id).await?;

    let response = create_room(
        State(test.to_app_state::<AppState>()),
        test.session.clone(),
        room_dto(1, "106", "SINGLE"),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    Ok(())
}

/// Expect delete then restore to answer 204 and 200, and the list to follow along
#[tokio::test]
async fn deletes_and_restores_room() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let room = test.occupancy().insert_room(1, "101", 2).await?;
    login_as(&test, admin.id).await?;
    let state = test.to_app_state::<AppState>();

    let deleted = delete_room(State(state.clone()), test.session.clone(), Path(room.id))
        .await
        .into_response();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let rooms = hostel::server::data::room::RoomRepository::new(&test.db)
        .list(1)
        .await?;
    assert!(rooms.is_empty());

    let restored = restore_room(State(state.clone()), test.session.clone(), Path(room.id))
        .await
        .into_response();
    assert_eq!(restored.status(), StatusCode::OK);

    let listed = list_rooms(State(state), test.session.clone(), Path(1))
        .await
        .into_response();
    assert_eq!(listed.status(), StatusCode::OK);

    Ok(())
}
