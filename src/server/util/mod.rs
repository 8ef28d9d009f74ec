//! Utility functions shared by services.
//!
//! Password hashing and temporary password generation, plus the date arithmetic behind
//! visitor expiry.

pub mod password;
pub mod time;
