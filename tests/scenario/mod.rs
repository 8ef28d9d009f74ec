//! Flows through the service layer against an in-memory database.

mod access;
mod occupancy;
mod subscription;
mod visitor;
