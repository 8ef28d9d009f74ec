use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, ErrorKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionLimitError {
    #[error("Room limit reached. Maximum {max} rooms allowed on {plan} plan.")]
    Rooms { max: i32, plan: String },
    #[error("Tenant limit reached. Maximum {max} tenants allowed on {plan} plan.")]
    Tenants { max: i32, plan: String },
}

impl IntoResponse for SubscriptionLimitError {
    fn into_response(self) -> Response {
        error_response(
            StatusCode::PAYMENT_REQUIRED,
            ErrorKind::SubscriptionLimit,
            self.to_string(),
        )
    }
}
