//! Test harness for the hostel workspace.
//!
//! Tests are set up in two phases: a [`TestBuilder`] declares the tables and seed data,
//! and the resulting [`TestContext`] exposes the database, a session and fixture helpers
//! for inserting rows during the test itself.

pub mod builder;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{TestBuilder, TestContext, TestError};
}
