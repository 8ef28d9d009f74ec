use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::user::UserRole;
use hostel::{
    model::occupancy::{CheckInDto, CheckOutDto, CreateTenantDto},
    server::{
        controller::tenant::{check_in, check_out, create_tenant, get_tenant, stay_history},
        model::app::AppState,
    },
};
use hostel_test_utils::prelude::*;

use crate::util::{date, login_as};

/// Expect 201 for a new tenant profile and 409 for a second one on the same user
#[tokio::test]
async fn creates_tenant_once() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let user = test.user().insert_user(UserRole::Tenant, None).await?;
    login_as(&test, admin.id).await?;
    let state = test.to_app_state::<AppState>();
    let dto = || {
        Json(CreateTenantDto {
            user_id: user.id,
            hostel_id: 1,
            full_name: "Ada Tenant".to_string(),
            guardian_name: None,
            guardian_phone: None,
            emergency_contact: None,
        })
    };

    let created = create_tenant(State(state.clone()), test.session.clone(), dto())
        .await
        .into_response();
    let duplicate = create_tenant(State(state), test.session.clone(), dto())
        .await
        .into_response();

    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    Ok(())
}

/// Expect a tenant to read their own profile and history but not another tenant's
#[tokio::test]
async fn tenant_reads_only_own_records() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let own = test.occupancy().insert_tenant(1).await?;
    let other = test.occupancy().insert_tenant(1).await?;
    login_as(&test, own.user_id).await?;
    let state = test.to_app_state::<AppState>();

    let own_profile = get_tenant(State(state.clone()), test.session.clone(), Path(own.id))
        .await
        .into_response();
    let own_history = stay_history(State(state.clone()), test.session.clone(), Path(own.id))
        .await
        .into_response();
    let other_profile = get_tenant(State(state), test.session.clone(), Path(other.id))
        .await
        .into_response();

    assert_eq!(own_profile.status(), StatusCode::OK);
    assert_eq!(own_history.status(), StatusCode::OK);
    assert_eq!(other_profile.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect check-in and check-out to succeed and a second check-out to be refused
#[tokio::test]
async fn checks_in_and_out() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let room = test.occupancy().insert_room(1, "101", 1).await?;
    let bed = test.occupancy().insert_bed(&room, "A").await?;
    let tenant = test.occupancy().insert_tenant(1).await?;
    login_as(&test, admin.id).await?;
    let state = test.to_app_state::<AppState>();
    let out = || {
        Json(CheckOutDto {
            check_out_date: date(2025, 7, 1),
            notes: None,
        })
    };

    let checked_in = check_in(
        State(state.clone()),
        test.session.clone(),
        Path(tenant.id),
        Json(CheckInDto {
            bed_id: bed.id,
            check_in_date: date(2025, 6, 1),
        }),
    )
    .await
    .into_response();
    assert_eq!(checked_in.status(), StatusCode::OK);

    let checked_out = check_out(State(state.clone()), test.session.clone(), Path(tenant.id), out())
        .await
        .into_response();
    assert_eq!(checked_out.status(), StatusCode::OK);

    let again = check_out(State(state), test.session.clone(), Path(tenant.id), out())
        .await
        .into_response();
    assert_eq!(again.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}
