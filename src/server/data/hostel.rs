use chrono::Utc;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::server::data::soft_delete::{self, SoftDelete};

pub struct NewHostel {
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

pub struct HostelRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> HostelRepository<'a, C> {
    /// Creates a new instance of [`HostelRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, hostel: NewHostel) -> Result<entity::hostel::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::Hostel::insert(entity::hostel::ActiveModel {
            name: ActiveValue::Set(hostel.name),
            code: ActiveValue::Set(hostel.code),
            address: ActiveValue::Set(hostel.address),
            city: ActiveValue::Set(hostel.city),
            phone: ActiveValue::Set(hostel.phone),
            email: ActiveValue::Set(hostel.email),
            is_active: ActiveValue::Set(true),
            is_deleted: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Finds a hostel that is not soft-deleted
    pub async fn find_by_id(&self, hostel_id: i32) -> Result<Option<entity::hostel::Model>, DbErr> {
        entity::prelude::Hostel::find_active()
            .filter(entity::hostel::Column::Id.eq(hostel_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_id_with_deleted(
        &self,
        hostel_id: i32,
    ) -> Result<Option<entity::hostel::Model>, DbErr> {
        entity::prelude::Hostel::find_by_id(hostel_id)
            .one(self.db)
            .await
    }

    /// Finds a hostel by code, including deleted hostels since codes stay reserved
    pub async fn find_by_code(&self, code: &str) -> Result<Option<entity::hostel::Model>, DbErr> {
        entity::prelude::Hostel::find()
            .filter(entity::hostel::Column::Code.eq(code))
            .one(self.db)
            .await
    }

    pub async fn soft_delete(&self, hostel_id: i32) -> Result<bool, DbErr> {
        soft_delete::soft_delete::<entity::prelude::Hostel, _>(
            self.db,
            hostel_id,
            Utc::now().naive_utc(),
            None,
        )
        .await
    }

    pub async fn restore(&self, hostel_id: i32) -> Result<bool, DbErr> {
        soft_delete::restore::<entity::prelude::Hostel, _>(
            self.db,
            hostel_id,
            Utc::now().naive_utc(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use entity::prelude::Hostel;
    use hostel_test_utils::prelude::*;

    use super::*;

    fn new_hostel(code: &str) -> NewHostel {
        NewHostel {
            name: "Riverside".to_string(),
            code: code.to_string(),
            address: None,
            city: Some("Pune".to_string()),
            phone: None,
            email: None,
        }
    }

    mod create {
        use super::*;

        /// Expect an active, live hostel to be created
        #[tokio::test]
        async fn creates_hostel() -> Result<(), TestError> {
            let test = TestBuilder::new().with_table(Hostel).build().await?;

            let repo = HostelRepository::new(&test.db);
            let hostel = repo.create(new_hostel("RS1")).await?;

            assert!(hostel.is_active);
            assert!(!hostel.is_deleted);
            assert_eq!(hostel.code, "RS1");

            Ok(())
        }

        /// Expect Error when the code is already taken
        #[tokio::test]
        async fn fails_for_duplicate_code() -> Result<(), TestError> {
            let test = TestBuilder::new().with_table(Hostel).build().await?;

            let repo = HostelRepository::new(&test.db);
            repo.create(new_hostel("RS1")).await?;
            let result = repo.create(new_hostel("RS1")).await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod find_by_id {
        use super::*;

        /// Expect Ok(None) for a deleted hostel while the deleted lookup still finds it
        #[tokio::test]
        async fn hides_deleted_hostel() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_table(Hostel)
                .with_hostel("H1")
                .build()
                .await?;
            let repo = HostelRepository::new(&test.db);
            let hostel = repo.find_by_code("H1").await?.unwrap();

            repo.soft_delete(hostel.id).await?;

            assert!(repo.find_by_id(hostel.id).await?.is_none());
            assert!(repo.find_by_id_with_deleted(hostel.id).await?.is_some());

            Ok(())
        }

        /// Expect Error when required database tables are not present
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            let repo = HostelRepository::new(&test.db);
            let result = repo.find_by_id(1).await;

            assert!(result.is_err());

            Ok(())
        }
    }
}
