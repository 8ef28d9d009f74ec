//! Server application models.
//!
//! Application state, database model aliases, the resolved [`principal::Principal`] and
//! session data wrappers.

pub mod app;
pub mod db;
pub mod principal;
pub mod session;
