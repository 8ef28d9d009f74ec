use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

pub struct UserHostelRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserHostelRepository<'a, C> {
    /// Creates a new instance of [`UserHostelRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        hostel_id: i32,
    ) -> Result<entity::user_hostel::Model, DbErr> {
        entity::prelude::UserHostel::insert(entity::user_hostel::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            hostel_id: ActiveValue::Set(hostel_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn exists(&self, user_id: i32, hostel_id: i32) -> Result<bool, DbErr> {
        let association = entity::prelude::UserHostel::find_by_id((user_id, hostel_id))
            .one(self.db)
            .await?;

        Ok(association.is_some())
    }

    /// Hostel ids associated with `user_id`, in ascending order
    pub async fn get_hostel_ids(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::UserHostel::find()
            .select_only()
            .column(entity::user_hostel::Column::HostelId)
            .filter(entity::user_hostel::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_hostel::Column::HostelId)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Removes an association, returning `false` if none existed
    pub async fn delete(&self, user_id: i32, hostel_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::UserHostel::delete_by_id((user_id, hostel_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
