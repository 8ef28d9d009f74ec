use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::user::UserRole;
use thiserror::Error;

use crate::server::error::{error_response, ErrorKind};

/// Denial raised by access control. The message is the human readable reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Visitor access has expired, please contact the hostel administrator")]
    VisitorExpired { user_id: i32 },
    #[error("Access denied to hostel {hostel_id}")]
    HostelAccessDenied { user_id: i32, hostel_id: i32 },
    #[error("Access denied, required roles: {}", format_roles(.allowed))]
    RoleNotAllowed {
        user_id: i32,
        role: UserRole,
        allowed: Vec<UserRole>,
    },
    #[error("Role {role:?} may not {action} {resource}")]
    PermissionDenied {
        role: UserRole,
        action: String,
        resource: String,
    },
    #[error("Access denied to a resource owned by another user")]
    NotResourceOwner { user_id: i32, owner_id: i32 },
    #[error("Only super admins can modify super admin accounts")]
    SuperAdminProtected { user_id: i32 },
}

fn format_roles(roles: &[UserRole]) -> String {
    roles
        .iter()
        .map(|role| format!("{:?}", role))
        .collect::<Vec<_>>()
        .join(", ")
}

impl IntoResponse for AuthorizationError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        error_response(StatusCode::FORBIDDEN, ErrorKind::Authorization, self.to_string())
    }
}
