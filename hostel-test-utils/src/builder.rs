//! Declarative test setup.
//!
//! Configuration methods only queue work; tables are created and seed rows inserted
//! when [`TestBuilder::build`] runs.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for an in-memory test environment.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_core_tables: bool,
    seed_plans: bool,
    hostels: Vec<String>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_core_tables: false,
            seed_plans: false,
            hostels: Vec::new(),
        }
    }

    /// Create every table of the schema, in foreign key order.
    pub fn with_core_tables(mut self) -> Self {
        self.include_core_tables = true;
        self
    }

    /// Add a single entity table.
    ///
    /// ```no_run
    /// use hostel_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), hostel_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Hostel)
    ///     .with_table(AuditLog)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Seed the FREE, STANDARD and PREMIUM plans with their default limits.
    pub fn with_plans(mut self) -> Self {
        self.seed_plans = true;
        self
    }

    /// Insert a hostel with the provided code.
    pub fn with_hostel(mut self, code: impl Into<String>) -> Self {
        self.hostels.push(code.into());
        self
    }

    /// Create the queued tables, then insert plans and hostels.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Configured test environment
    /// - `Err(TestError::DbErr)` - Table creation or seeding failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_core_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Hostel),
                schema.create_table_from_entity(entity::prelude::User),
                schema.create_table_from_entity(entity::prelude::UserHostel),
                schema.create_table_from_entity(entity::prelude::VisitorProfile),
                schema.create_table_from_entity(entity::prelude::Plan),
                schema.create_table_from_entity(entity::prelude::Subscription),
                schema.create_table_from_entity(entity::prelude::Room),
                schema.create_table_from_entity(entity::prelude::TenantProfile),
                schema.create_table_from_entity(entity::prelude::Bed),
                schema.create_table_from_entity(entity::prelude::CheckInOut),
                schema.create_table_from_entity(entity::prelude::AuditLog),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        if self.seed_plans {
            setup.subscription().insert_default_plans().await?;
        }

        for code in self.hostels {
            setup.hostel().insert_hostel(&code).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
