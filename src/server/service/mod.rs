//! Service layer for business rules.
//!
//! Services validate access through [`access::AccessControl`], coordinate repositories
//! inside transactions and record audit entries once a change has committed. Each
//! service borrows the database connection and the [`PolicyConfig`] for the duration of
//! a request.
//!
//! [`PolicyConfig`]: crate::server::config::PolicyConfig

pub mod access;
pub mod audit;
pub mod auth;
pub mod hostel;
pub mod identity;
pub mod occupancy;
pub mod subscription;
pub mod visitor;
