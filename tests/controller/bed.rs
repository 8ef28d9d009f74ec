use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use hostel::{
    model::occupancy::{AssignBedDto, CreateBedDto},
    server::{
        controller::bed::{assign_bed, create_bed, delete_bed, list_available_beds, vacate_bed},
        model::app::AppState,
    },
};
use hostel_test_utils::prelude::*;

use crate::util::login_as;

/// Expect 201 for a new bed and 422 once the room is at capacity
#[tokio::test]
async fn creates_beds_up_to_capacity() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let room = test.occupancy().insert_room(1, "101", 1).await?;
    login_as(&test, admin.id).await?;
    let state = test.to_app_state::<AppState>();
    let bed = |number: &str| {
        Json(CreateBedDto {
            room_id: room.id,
            number: number.to_string(),
        })
    };

    let first = create_bed(State(state.clone()), test.session.clone(), bed("A"))
        .await
        .into_response();
    let second = create_bed(State(state), test.session.clone(), bed("B"))
        .await
        .into_response();

    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

/// Expect 200 on assignment, 409 on a second assignment and 200 after vacating
#[tokio::test]
async fn assign_conflict_and_vacate() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let room = test.occupancy().insert_room(1, "101", 2).await?;
    let bed = test.occupancy().insert_bed(&room, "A").await?;
    let tenant1 = test.occupancy().insert_tenant(1).await?;
    let tenant2 = test.occupancy().insert_tenant(1).await?;
    login_as(&test, admin.id).await?;
    let state = test.to_app_state::<AppState>();

    let assigned = assign_bed(
        State(state.clone()),
        test.session.clone(),
        Path(bed.id),
        Json(AssignBedDto {
            tenant_id: tenant1.id,
        }),
    )
    .await
    .into_response();
    assert_eq!(assigned.status(), StatusCode::OK);

    let conflict = assign_bed(
        State(state.clone()),
        test.session.clone(),
        Path(bed.id),
        Json(AssignBedDto {
            tenant_id: tenant2.id,
        }),
    )
    .await
    .into_response();
    assert_eq!(conflict.status(), StatusCode::CONFLICT);

    let occupied_delete = delete_bed(State(state.clone()), test.session.clone(), Path(bed.id))
        .await
        .into_response();
    assert_eq!(occupied_delete.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let vacated = vacate_bed(State(state.clone()), test.session.clone(), Path(bed.id))
        .await
        .into_response();
    assert_eq!(vacated.status(), StatusCode::OK);

    let available = list_available_beds(State(state.clone()), test.session.clone(), Path(1))
        .await
        .into_response();
    assert_eq!(available.status(), StatusCode::OK);

    let deleted = delete_bed(State(state), test.session.clone(), Path(bed.id))
        .await
        .into_response();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    Ok(())
}

/// Expect 404 when assigning a bed that does not exist
#[tokio::test]
async fn assign_missing_bed_not_found() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let tenant = test.occupancy().insert_tenant(1).await?;
    login_as(&test, admin.id).await?;

    let response = assign_bed(
        State(test.to_app_state::<AppState>()),
        test.session.clone(),
        Path(99),
        Json(AssignBedDto {
            tenant_id: tenant.id,
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}
