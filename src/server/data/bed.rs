//! Bed persistence.
//!
//! The occupancy writes here are conditional updates: each one filters on the state the
//! caller expects and reports through the affected row count whether that state still
//! held. Two callers racing for the same vacant bed therefore cannot both occupy it.

use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::data::soft_delete::{self, SoftDelete};

pub struct BedRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BedRepository<'a, C> {
    /// Creates a new instance of [`BedRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a vacant bed in `room`, copying the room's hostel id for scope checks
    pub async fn create(
        &self,
        room: &entity::room::Model,
        number: String,
    ) -> Result<entity::bed::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::Bed::insert(entity::bed::ActiveModel {
            room_id: ActiveValue::Set(room.id),
            hostel_id: ActiveValue::Set(room.hostel_id),
            number: ActiveValue::Set(number),
            is_occupied: ActiveValue::Set(false),
            tenant_id: ActiveValue::Set(None),
            is_deleted: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Finds a bed that is not soft-deleted
    pub async fn find_by_id(&self, bed_id: i32) -> Result<Option<entity::bed::Model>, DbErr> {
        entity::prelude::Bed::find_active()
            .filter(entity::bed::Column::Id.eq(bed_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_id_with_deleted(
        &self,
        bed_id: i32,
    ) -> Result<Option<entity::bed::Model>, DbErr> {
        entity::prelude::Bed::find_by_id(bed_id).one(self.db).await
    }

    /// Finds a bed by number within a room, deleted beds included
    pub async fn find_by_number(
        &self,
        room_id: i32,
        number: &str,
    ) -> Result<Option<entity::bed::Model>, DbErr> {
        entity::prelude::Bed::find()
            .filter(entity::bed::Column::RoomId.eq(room_id))
            .filter(entity::bed::Column::Number.eq(number))
            .one(self.db)
            .await
    }

    pub async fn list_available(&self, hostel_id: i32) -> Result<Vec<entity::bed::Model>, DbErr> {
        entity::prelude::Bed::find_active()
            .filter(entity::bed::Column::HostelId.eq(hostel_id))
            .filter(entity::bed::Column::IsOccupied.eq(false))
            .order_by_asc(entity::bed::Column::RoomId)
            .order_by_asc(entity::bed::Column::Number)
            .all(self.db)
            .await
    }

    /// Counts the live beds of a room
    pub async fn count_in_room(&self, room_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Bed::find_active()
            .filter(entity::bed::Column::RoomId.eq(room_id))
            .count(self.db)
            .await
    }

    pub async fn count_occupied_in_room(&self, room_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Bed::find_active()
            .filter(entity::bed::Column::RoomId.eq(room_id))
            .filter(entity::bed::Column::IsOccupied.eq(true))
            .count(self.db)
            .await
    }

    pub async fn count_occupied_in_hostel(&self, hostel_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Bed::find_active()
            .filter(entity::bed::Column::HostelId.eq(hostel_id))
            .filter(entity::bed::Column::IsOccupied.eq(true))
            .count(self.db)
            .await
    }

    /// Links `tenant_id` to the bed if the bed is still live and vacant
    ///
    /// Returns `false` when another writer occupied or deleted the bed first.
    pub async fn occupy(&self, bed_id: i32, tenant_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Bed::update_many()
            .col_expr(entity::bed::Column::IsOccupied, Expr::value(true))
            .col_expr(entity::bed::Column::TenantId, Expr::value(Some(tenant_id)))
            .col_expr(
                entity::bed::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::bed::Column::Id.eq(bed_id))
            .filter(entity::bed::Column::IsOccupied.eq(false))
            .filter(entity::bed::Column::IsDeleted.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Clears the bed if it is still held by `tenant_id`
    pub async fn release(&self, bed_id: i32, tenant_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Bed::update_many()
            .col_expr(entity::bed::Column::IsOccupied, Expr::value(false))
            .col_expr(
                entity::bed::Column::TenantId,
                Expr::value(Option::<i32>::None),
            )
            .col_expr(
                entity::bed::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::bed::Column::Id.eq(bed_id))
            .filter(entity::bed::Column::TenantId.eq(tenant_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn rename(&self, bed_id: i32, number: String) -> Result<bool, DbErr> {
        let result = entity::prelude::Bed::update_many()
            .col_expr(entity::bed::Column::Number, Expr::value(number))
            .col_expr(
                entity::bed::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::bed::Column::Id.eq(bed_id))
            .filter(entity::bed::Column::IsDeleted.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Soft deletes the bed only while it is vacant
    pub async fn soft_delete_vacant(&self, bed_id: i32) -> Result<bool, DbErr> {
        soft_delete::soft_delete::<entity::prelude::Bed, _>(
            self.db,
            bed_id,
            Utc::now().naive_utc(),
            Some(Condition::all().add(entity::bed::Column::IsOccupied.eq(false))),
        )
        .await
    }

    /// Soft deletes every live vacant bed of a room with a shared timestamp
    pub async fn soft_delete_vacant_in_room(
        &self,
        room_id: i32,
        deleted_at: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Bed::update_many()
            .col_expr(entity::bed::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::bed::Column::DeletedAt, Expr::value(Some(deleted_at)))
            .col_expr(entity::bed::Column::UpdatedAt, Expr::value(deleted_at))
            .filter(entity::bed::Column::RoomId.eq(room_id))
            .filter(entity::bed::Column::IsDeleted.eq(false))
            .filter(entity::bed::Column::IsOccupied.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Restores the beds of a room that were deleted together with it
    pub async fn restore_in_room(
        &self,
        room_id: i32,
        deleted_at: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Bed::update_many()
            .col_expr(entity::bed::Column::IsDeleted, Expr::value(false))
            .col_expr(
                entity::bed::Column::DeletedAt,
                Expr::value(Option::<NaiveDateTime>::None),
            )
            .col_expr(
                entity::bed::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::bed::Column::RoomId.eq(room_id))
            .filter(entity::bed::Column::IsDeleted.eq(true))
            .filter(entity::bed::Column::DeletedAt.eq(deleted_at))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn restore(&self, bed_id: i32) -> Result<bool, DbErr> {
        soft_delete::restore::<entity::prelude::Bed, _>(self.db, bed_id, Utc::now().naive_utc())
            .await
    }
}
