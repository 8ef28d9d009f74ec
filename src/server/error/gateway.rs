use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, ErrorKind};

/// Errors reported by external adapters, passed through unchanged.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Payment failed: {0}")]
    Payment(String),
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Payment(_) => ErrorKind::Payment,
            Self::RateLimited(_) => ErrorKind::RateLimit,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Payment(_) => StatusCode::PAYMENT_REQUIRED,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        };

        error_response(status, self.kind(), self.to_string())
    }
}
