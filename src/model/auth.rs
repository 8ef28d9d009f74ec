use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginDto {
    /// Email address or phone number
    pub identifier: String,
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SessionUserDto {
    pub id: i32,
    pub role: String,
    pub hostel_ids: Vec<i32>,
}
