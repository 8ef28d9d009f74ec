use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use hostel::{
    model::visitor::{CreateVisitorDto, ExtendVisitorDto},
    server::{
        controller::visitor::{
            create_visitor, extend_visitor_access, get_active_visitors, revoke_visitor_access,
        },
        model::app::AppState,
    },
};
use hostel_test_utils::prelude::*;

use crate::util::login_as;

fn visitor_dto(email: Option<&str>) -> Json<CreateVisitorDto> {
    Json(CreateVisitorDto {
        email: email.map(str::to_string),
        phone: None,
        full_name: None,
        hostel_id: 1,
        duration_days: None,
        password: None,
    })
}

/// Expect 201 for a visitor with an email and 422 for one with no contact at all
#[tokio::test]
async fn creates_visitor_with_contact() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    login_as(&test, admin.id).await?;
    let state = test.to_app_state::<AppState>();

    let created = create_visitor(
        State(state.clone()),
        test.session.clone(),
        visitor_dto(Some("guest@hostel.test")),
    )
    .await
    .into_response();
    let missing = create_visitor(State(state), test.session.clone(), visitor_dto(None))
        .await
        .into_response();

    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(missing.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

/// Expect extend, revoke and the active list to answer 200 for an admin
#[tokio::test]
async fn manages_visitor_access() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let (visitor, _) = test
        .user()
        .insert_visitor(1, Utc::now().naive_utc() + Duration::days(3))
        .await?;
    login_as(&test, admin.id).await?;
    let state = test.to_app_state::<AppState>();

    let extended = extend_visitor_access(
        State(state.clone()),
        test.session.clone(),
        Path(visitor.id),
        Json(ExtendVisitorDto { additional_days: 7 }),
    )
    .await
    .into_response();
    assert_eq!(extended.status(), StatusCode::OK);

    let revoked = revoke_visitor_access(State(state.clone()), test.session.clone(), Path(visitor.id))
        .await
        .into_response();
    assert_eq!(revoked.status(), StatusCode::OK);

    let listed = get_active_visitors(State(state), test.session.clone(), Path(1))
        .await
        .into_response();
    assert_eq!(listed.status(), StatusCode::OK);

    Ok(())
}

/// Expect an expired visitor's session to be refused their hostel's visitor list
#[tokio::test]
async fn expired_visitor_is_forbidden() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let (visitor, _) = test
        .user()
        .insert_visitor(1, Utc::now().naive_utc() - Duration::days(1))
        .await?;
    login_as(&test, visitor.id).await?;

    let response = get_active_visitors(
        State(test.to_app_state::<AppState>()),
        test.session.clone(),
        Path(1),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}
