use axum::{
    body::to_bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use hostel::{
    model::subscription::FeatureUsageDto,
    server::{controller::subscription::get_feature_usage, model::app::AppState},
};
use hostel_test_utils::prelude::*;

use crate::util::login_as;

/// Expect the usage of a fresh hostel to report the provisioned free plan
#[tokio::test]
async fn reports_free_plan_usage() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    test.occupancy().insert_room(1, "101", 2).await?;
    login_as(&test, admin.id).await?;

    let response = get_feature_usage(
        State(test.to_app_state::<AppState>()),
        test.session.clone(),
        Path(1),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let usage: FeatureUsageDto = serde_json::from_slice(&body).unwrap();
    assert_eq!(usage.plan, "Free Plan");
    assert_eq!(usage.rooms.current, 1);
    assert_eq!(usage.rooms.max, Some(5));
    assert_eq!(usage.tenants.max, Some(10));

    Ok(())
}

/// Expect tenants to be refused the usage report
#[tokio::test]
async fn tenant_cannot_read_usage() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .build()
        .await?;
    let tenant = test.occupancy().insert_tenant(1).await?;
    login_as(&test, tenant.user_id).await?;

    let response = get_feature_usage(
        State(test.to_app_state::<AppState>()),
        test.session.clone(),
        Path(1),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}
