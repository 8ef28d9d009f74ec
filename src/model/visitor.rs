use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateVisitorDto {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub full_name: Option<String>,
    pub hostel_id: i32,
    /// Defaults to the configured visitor duration
    pub duration_days: Option<i64>,
    /// A temporary password is generated when omitted
    pub password: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ExtendVisitorDto {
    pub additional_days: i64,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VisitorDto {
    pub user_id: i32,
    pub hostel_id: i32,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub expires_at: NaiveDateTime,
    /// Only present in the response to visitor creation when the password was generated
    pub temporary_password: Option<String>,
}
