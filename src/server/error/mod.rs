//! Error types for the hostel server.
//!
//! Each domain owns a `thiserror` enum in its own module. They are aggregated into [`Error`],
//! which services return and axum handlers convert into responses. Every error carries a
//! stable [`ErrorKind`] so clients can branch on the category instead of the message text.

pub mod access;
pub mod auth;
pub mod config;
pub mod gateway;
pub mod resource;
pub mod subscription;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        access::AuthorizationError,
        auth::AuthError,
        config::ConfigError,
        gateway::GatewayError,
        resource::{ConflictError, NotFoundError, ValidationError},
        subscription::SubscriptionLimitError,
    },
};

/// Stable failure category reported alongside every error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Authorization,
    Authentication,
    SubscriptionLimit,
    Payment,
    RateLimit,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::Authentication => "authentication",
            Self::SubscriptionLimit => "subscription_limit",
            Self::Payment => "payment",
            Self::RateLimit => "rate_limit",
            Self::Internal => "internal",
        }
    }
}

/// Main error type for the hostel server.
///
/// Domain errors convert into this type through `#[from]`, so services can use `?` on
/// repository results and on domain checks alike.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session, credentials, account state).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Referenced entity does not exist or is soft-deleted.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    /// Duplicate unique value or an already occupied bed.
    #[error(transparent)]
    Conflict(#[from] ConflictError),
    /// Structurally invalid request.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Principal lacks role, hostel or ownership permission.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// Plan quota reached.
    #[error(transparent)]
    SubscriptionLimit(#[from] SubscriptionLimitError),
    /// Payment or rate limit error surfaced from an external adapter.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug or inconsistent data.
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthError(err) => err.kind(),
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::SubscriptionLimit(_) => ErrorKind::SubscriptionLimit,
            Self::Gateway(err) => err.kind(),
            _ => ErrorKind::Internal,
        }
    }
}

/// Maps domain errors to their status codes; everything else is a logged 500.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::NotFound(err) => err.into_response(),
            Self::Conflict(err) => err.into_response(),
            Self::Validation(err) => err.into_response(),
            Self::Authorization(err) => err.into_response(),
            Self::SubscriptionLimit(err) => err.into_response(),
            Self::Gateway(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds the JSON body shared by every error response.
pub(crate) fn error_response(status: StatusCode, kind: ErrorKind, message: String) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message,
            code: kind.as_str().to_string(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The full error is logged; the client only receives a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Internal,
            "Internal server error".to_string(),
        )
    }
}
