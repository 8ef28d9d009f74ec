use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct VisitorRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VisitorRepository<'a, C> {
    /// Creates a new instance of [`VisitorRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        hostel_id: i32,
        expires_at: NaiveDateTime,
        created_by: Option<i32>,
    ) -> Result<entity::visitor_profile::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::VisitorProfile::insert(entity::visitor_profile::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            hostel_id: ActiveValue::Set(hostel_id),
            expires_at: ActiveValue::Set(expires_at),
            created_by: ActiveValue::Set(created_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn find_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::visitor_profile::Model>, DbErr> {
        entity::prelude::VisitorProfile::find()
            .filter(entity::visitor_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Overwrites the expiry, returning `false` if the visitor has no profile
    pub async fn set_expiry(&self, user_id: i32, expires_at: NaiveDateTime) -> Result<bool, DbErr> {
        let result = entity::prelude::VisitorProfile::update_many()
            .col_expr(
                entity::visitor_profile::Column::ExpiresAt,
                Expr::value(expires_at),
            )
            .col_expr(
                entity::visitor_profile::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::visitor_profile::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Visitor profiles of a hostel that expire after `now`
    pub async fn find_unexpired_in_hostel(
        &self,
        hostel_id: i32,
        now: NaiveDateTime,
    ) -> Result<Vec<(entity::visitor_profile::Model, Option<entity::user::Model>)>, DbErr> {
        entity::prelude::VisitorProfile::find()
            .filter(entity::visitor_profile::Column::HostelId.eq(hostel_id))
            .filter(entity::visitor_profile::Column::ExpiresAt.gt(now))
            .find_also_related(entity::user::Entity)
            .all(self.db)
            .await
    }
}
