//! Typed wrappers around values stored in the tower-sessions session.

pub mod user;
