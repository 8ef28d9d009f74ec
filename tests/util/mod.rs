//! Helpers shared by the integration tests.

use chrono::{NaiveDate, NaiveDateTime};
use hostel::server::model::{
    principal::Principal,
    session::user::{SessionUserId, SESSION_USER_ID_KEY},
};
use hostel_test_utils::prelude::*;

/// Store `user_id` in the test session as the logged in user
pub async fn login_as(test: &TestContext, user_id: i32) -> Result<(), TestError> {
    test.session
        .insert(SESSION_USER_ID_KEY, SessionUserId(user_id.to_string()))
        .await?;

    Ok(())
}

pub fn admin_of(user_id: i32, hostel_ids: Vec<i32>) -> Principal {
    Principal::HostelAdmin {
        user_id,
        hostel_ids,
    }
}

/// 2025-06-01 09:00
pub fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
