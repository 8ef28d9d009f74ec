//! Fixture helpers for inserting rows during test execution.
//!
//! - `hostel` - hostels
//! - `user` - users of each role, admin associations and visitor profiles
//! - `occupancy` - rooms, beds and tenant profiles
//! - `subscription` - plans and subscriptions

pub mod hostel;
pub mod occupancy;
pub mod subscription;
pub mod user;
