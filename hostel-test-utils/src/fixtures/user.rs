use chrono::{NaiveDateTime, Utc};
use entity::user::UserRole;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert an active user with a generated unique email and no password.
    pub async fn insert_user(
        &mut self,
        role: UserRole,
        primary_hostel_id: Option<i32>,
    ) -> Result<entity::user::Model, TestError> {
        let email = format!("user{}@hostel.test", self.setup.next_sequence());

        self.insert_user_with_credentials(role, primary_hostel_id, &email, None)
            .await
    }

    pub async fn insert_user_with_credentials(
        &self,
        role: UserRole,
        primary_hostel_id: Option<i32>,
        email: &str,
        password_hash: Option<String>,
    ) -> Result<entity::user::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::User::insert(entity::user::ActiveModel {
                email: ActiveValue::Set(Some(email.to_string())),
                phone: ActiveValue::Set(None),
                password_hash: ActiveValue::Set(password_hash),
                full_name: ActiveValue::Set(None),
                role: ActiveValue::Set(role),
                primary_hostel_id: ActiveValue::Set(primary_hostel_id),
                is_active: ActiveValue::Set(true),
                is_verified: ActiveValue::Set(true),
                last_login: ActiveValue::Set(None),
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

    pub async fn insert_super_admin(&mut self) -> Result<entity::user::Model, TestError> {
        self.insert_user(UserRole::SuperAdmin, None).await
    }

    /// Insert a hostel admin associated with every hostel in `hostel_ids`.
    pub async fn insert_hostel_admin(
        &mut self,
        hostel_ids: &[i32],
    ) -> Result<entity::user::Model, TestError> {
        let admin = self.insert_user(UserRole::HostelAdmin, None).await?;

        for hostel_id in hostel_ids {
            self.insert_hostel_association(admin.id, *hostel_id).await?;
        }

        Ok(admin)
    }

    pub async fn insert_hostel_association(
        &self,
        user_id: i32,
        hostel_id: i32,
    ) -> Result<entity::user_hostel::Model, TestError> {
        Ok(
            entity::prelude::UserHostel::insert(entity::user_hostel::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                hostel_id: ActiveValue::Set(hostel_id),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a visitor user and profile expiring at `expires_at`.
    pub async fn insert_visitor(
        &mut self,
        hostel_id: i32,
        expires_at: NaiveDateTime,
    ) -> Result<(entity::user::Model, entity::visitor_profile::Model), TestError> {
        let user = self.insert_user(UserRole::Visitor, Some(hostel_id)).await?;
        let now = Utc::now().naive_utc();

        let profile = entity::prelude::VisitorProfile::insert(entity::visitor_profile::ActiveModel {
            user_id: ActiveValue::Set(user.id),
            hostel_id: ActiveValue::Set(hostel_id),
            expires_at: ActiveValue::Set(expires_at),
            created_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?;

        Ok((user, profile))
    }
}
