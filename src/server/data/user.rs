use chrono::{NaiveDateTime, Utc};
use entity::user::UserRole;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::data::soft_delete::{self, SoftDelete};

pub struct NewUser {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub primary_hostel_id: Option<i32>,
    pub is_verified: bool,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new active user
    pub async fn create(&self, user: NewUser) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::User::insert(entity::user::ActiveModel {
            email: ActiveValue::Set(user.email),
            phone: ActiveValue::Set(user.phone),
            password_hash: ActiveValue::Set(user.password_hash),
            full_name: ActiveValue::Set(user.full_name),
            role: ActiveValue::Set(user.role),
            primary_hostel_id: ActiveValue::Set(user.primary_hostel_id),
            is_active: ActiveValue::Set(true),
            is_verified: ActiveValue::Set(user.is_verified),
            last_login: ActiveValue::Set(None),
            is_deleted: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Finds a user that is not soft-deleted
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_active()
            .filter(entity::user::Column::Id.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_id_with_deleted(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    /// Email lookup spans deleted users, whose addresses remain reserved
    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Phone.eq(phone))
            .one(self.db)
            .await
    }

    /// Finds a live user whose email or phone equals `identifier`
    pub async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_active()
            .filter(
                Condition::any()
                    .add(entity::user::Column::Email.eq(identifier))
                    .add(entity::user::Column::Phone.eq(identifier)),
            )
            .one(self.db)
            .await
    }

    pub async fn update_last_login(&self, user_id: i32, at: NaiveDateTime) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .col_expr(entity::user::Column::LastLogin, Expr::value(Some(at)))
            .filter(entity::user::Column::Id.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Sets `is_active`, returning `false` if the user does not exist
    pub async fn set_active(&self, user_id: i32, is_active: bool) -> Result<bool, DbErr> {
        let result = entity::prelude::User::update_many()
            .col_expr(entity::user::Column::IsActive, Expr::value(is_active))
            .col_expr(
                entity::user::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::user::Column::Id.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Deactivates many users at once, returning the number of rows changed
    pub async fn deactivate_many(&self, user_ids: Vec<i32>) -> Result<u64, DbErr> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::User::update_many()
            .col_expr(entity::user::Column::IsActive, Expr::value(false))
            .col_expr(
                entity::user::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::user::Column::Id.is_in(user_ids))
            .filter(entity::user::Column::IsActive.eq(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Records the primary hostel of a user that has none yet
    pub async fn set_primary_hostel_if_unset(
        &self,
        user_id: i32,
        hostel_id: i32,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::PrimaryHostelId,
                Expr::value(Some(hostel_id)),
            )
            .filter(entity::user::Column::Id.eq(user_id))
            .filter(entity::user::Column::PrimaryHostelId.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Active, non-deleted visitors together with their profiles
    pub async fn find_active_visitors(
        &self,
    ) -> Result<Vec<(entity::user::Model, Option<entity::visitor_profile::Model>)>, DbErr> {
        entity::prelude::User::find_active()
            .filter(entity::user::Column::Role.eq(UserRole::Visitor))
            .filter(entity::user::Column::IsActive.eq(true))
            .find_also_related(entity::visitor_profile::Entity)
            .all(self.db)
            .await
    }

    pub async fn soft_delete(&self, user_id: i32) -> Result<bool, DbErr> {
        soft_delete::soft_delete::<entity::prelude::User, _>(
            self.db,
            user_id,
            Utc::now().naive_utc(),
            None,
        )
        .await
    }

    pub async fn restore(&self, user_id: i32) -> Result<bool, DbErr> {
        soft_delete::restore::<entity::prelude::User, _>(self.db, user_id, Utc::now().naive_utc())
            .await
    }
}
