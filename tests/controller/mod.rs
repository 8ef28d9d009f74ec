//! Handlers called directly with extracted arguments, asserting on the response status.

mod auth;
mod bed;
mod room;
mod subscription;
mod tenant;
mod visitor;
