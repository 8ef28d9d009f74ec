use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn hostel<'a>(&'a mut self) -> HostelFixtures<'a> {
        HostelFixtures { setup: self }
    }
}

pub struct HostelFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> HostelFixtures<'a> {
    pub async fn insert_hostel(&self, code: &str) -> Result<entity::hostel::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Hostel::insert(entity::hostel::ActiveModel {
                name: ActiveValue::Set(format!("Hostel {}", code)),
                code: ActiveValue::Set(code.to_string()),
                address: ActiveValue::Set(None),
                city: ActiveValue::Set(None),
                phone: ActiveValue::Set(None),
                email: ActiveValue::Set(None),
                is_active: ActiveValue::Set(true),
                is_deleted: ActiveValue::Set(false),
                deleted_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
