use serde::{Deserialize, Serialize};

/// Current and maximum count of a plan-limited resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UsageDto {
    pub current: u64,
    /// `None` when the plan does not limit this resource
    pub max: Option<i32>,
    /// Percentage of the limit in use, 0 when unlimited
    pub percentage: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FeatureUsageDto {
    pub hostel_id: i32,
    pub plan: String,
    pub status: String,
    pub rooms: UsageDto,
    pub tenants: UsageDto,
}
