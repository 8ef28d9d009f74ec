use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, ErrorKind, InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account of user {0} is inactive")]
    AccountInactive(i32),
    #[error("User {0} has a role that requires a hostel but none is recorded")]
    MissingAffiliation(i32),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingAffiliation(_) => ErrorKind::Internal,
            _ => ErrorKind::Authentication,
        }
    }

    fn not_authenticated() -> Response {
        error_response(
            StatusCode::UNAUTHORIZED,
            ErrorKind::Authentication,
            "Not authenticated".to_string(),
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession => {
                tracing::debug!("{}", self);

                Self::not_authenticated()
            }
            Self::UserNotInDatabase(user_id) => {
                tracing::debug!(user_id = %user_id, "{}", self);

                Self::not_authenticated()
            }
            Self::InvalidCredentials => error_response(
                StatusCode::UNAUTHORIZED,
                ErrorKind::Authentication,
                "Incorrect email/phone or password".to_string(),
            ),
            Self::AccountInactive(_) => error_response(
                StatusCode::FORBIDDEN,
                ErrorKind::Authentication,
                "Account is inactive".to_string(),
            ),
            Self::MissingAffiliation(_) => InternalServerError(self).into_response(),
        }
    }
}
