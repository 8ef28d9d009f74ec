//! Server application core modules.
//!
//! HTTP routing, session authentication, access control, occupancy and subscription
//! services, persistence, and the scheduler for visitor maintenance.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod notify;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
