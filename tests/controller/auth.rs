use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use entity::user::UserRole;
use hostel::{
    model::auth::LoginDto,
    server::{
        controller::auth::{get_user, login, logout},
        model::{app::AppState, session::user::SessionUserId},
        util::password::hash_password,
    },
};
use hostel_test_utils::prelude::*;

use crate::util::login_as;

fn credentials(identifier: &str, password: &str) -> Json<LoginDto> {
    Json(LoginDto {
        identifier: identifier.to_string(),
        password: password.to_string(),
    })
}

/// Expect 200 and the user ID stored in session for correct credentials
#[tokio::test]
async fn login_stores_user_in_session() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let user = test
        .user()
        .insert_user_with_credentials(
            UserRole::HostelAdmin,
            Some(1),
            "admin@hostel.test",
            Some(hash_password("s3cret-pass").unwrap()),
        )
        .await?;

    let response = login(
        State(test.to_app_state::<AppState>()),
        test.session.clone(),
        credentials("admin@hostel.test", "s3cret-pass"),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), Some(user.id));

    Ok(())
}

/// Expect 401 and an empty session for a wrong password
#[tokio::test]
async fn login_rejects_wrong_password() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    test.user()
        .insert_user_with_credentials(
            UserRole::HostelAdmin,
            Some(1),
            "admin@hostel.test",
            Some(hash_password("s3cret-pass").unwrap()),
        )
        .await?;

    let response = login(
        State(test.to_app_state::<AppState>()),
        test.session.clone(),
        credentials("admin@hostel.test", "wrong"),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect 401 when requesting the current user without logging in
#[tokio::test]
async fn get_user_requires_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;

    let response = get_user(State(test.to_app_state::<AppState>()), test.session.clone())
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect logout to return 204 and clear the logged in user
#[tokio::test]
async fn logout_clears_session() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    login_as(&test, admin.id).await?;

    let response = logout(State(test.to_app_state::<AppState>()), test.session.clone())
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}
