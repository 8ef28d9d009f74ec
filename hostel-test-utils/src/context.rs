//! Test context returned by [`TestBuilder`](crate::TestBuilder).

use std::sync::Arc;

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// In-memory test environment.
///
/// Holds a SQLite database limited to a single connection, so code under test must run
/// statements of an open transaction on that transaction only.
///
/// ```ignore
/// let mut test = TestBuilder::new().with_core_tables().with_plans().build().await?;
///
/// let hostel = test.hostel().insert_hostel("H1").await?;
/// let room = test.occupancy().insert_room(hostel.id, "101", 2).await?;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session backed by an in-memory store
    pub session: Session,

    /// Counter used by fixtures to keep generated unique values distinct
    pub(crate) sequence: u32,
}

impl TestContext {
    /// Convert the database connection into any type constructible from it.
    ///
    /// Lets integration tests build the application state without the test utils
    /// depending on the main crate.
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<DatabaseConnection>,
    {
        T::from(self.db.clone())
    }

    pub(crate) async fn new() -> Result<Self, TestError> {
        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            session,
            sequence: 0,
        })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    pub(crate) fn next_sequence(&mut self) -> u32 {
        self.sequence += 1;
        self.sequence
    }
}
