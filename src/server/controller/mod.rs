//! HTTP controller endpoints of the hostel API.
//!
//! Handlers are thin: they resolve the session user into a
//! [`Principal`](crate::server::model::principal::Principal), call one service operation
//! and convert its result into a DTO. Every handler is documented with utoipa for the
//! OpenAPI document served at `/api/docs`.

pub mod auth;
pub mod bed;
pub mod room;
pub mod subscription;
pub mod tenant;
pub mod util;
pub mod visitor;
