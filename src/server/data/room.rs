use chrono::{NaiveDateTime, Utc};
use entity::room::RoomType;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::data::soft_delete::{self, SoftDelete};

pub struct NewRoom {
    pub hostel_id: i32,
    pub number: String,
    pub floor: i32,
    pub room_type: RoomType,
    pub capacity: i32,
    pub description: Option<String>,
}

/// Fields of a room that may change after creation; `None` leaves a field untouched.
#[derive(Default)]
pub struct RoomChanges {
    pub number: Option<String>,
    pub floor: Option<i32>,
    pub room_type: Option<RoomType>,
    pub capacity: Option<i32>,
    pub description: Option<Option<String>>,
}

pub struct RoomRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RoomRepository<'a, C> {
    /// Creates a new instance of [`RoomRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, room: NewRoom) -> Result<entity::room::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::Room::insert(entity::room::ActiveModel {
            hostel_id: ActiveValue::Set(room.hostel_id),
            number: ActiveValue::Set(room.number),
            floor: ActiveValue::Set(room.floor),
            room_type: ActiveValue::Set(room.room_type),
            capacity: ActiveValue::Set(room.capacity),
            description: ActiveValue::Set(room.description),
            is_deleted: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Finds a room that is not soft-deleted
    pub async fn find_by_id(&self, room_id: i32) -> Result<Option<entity::room::Model>, DbErr> {
        entity::prelude::Room::find_active()
            .filter(entity::room::Column::Id.eq(room_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_id_with_deleted(
        &self,
        room_id: i32,
    ) -> Result<Option<entity::room::Model>, DbErr> {
        entity::prelude::Room::find_by_id(room_id).one(self.db).await
    }

    /// Finds a live room and holds a row lock on it until the surrounding transaction ends
    ///
    /// Bed count checks against the room's capacity run under this lock so that
    /// concurrent bed inserts into one room are serialized.
    pub async fn lock_live(&self, room_id: i32) -> Result<Option<entity::room::Model>, DbErr> {
        entity::prelude::Room::find_active()
            .filter(entity::room::Column::Id.eq(room_id))
            .lock_exclusive()
            .one(self.db)
            .await
    }

    /// Finds a room by number within a hostel, deleted rooms included
    pub async fn find_by_number(
        &self,
        hostel_id: i32,
        number: &str,
    ) -> Result<Option<entity::room::Model>, DbErr> {
        entity::prelude::Room::find()
            .filter(entity::room::Column::HostelId.eq(hostel_id))
            .filter(entity::room::Column::Number.eq(number))
            .one(self.db)
            .await
    }

    pub async fn list(&self, hostel_id: i32) -> Result<Vec<entity::room::Model>, DbErr> {
        entity::prelude::Room::find_active()
            .filter(entity::room::Column::HostelId.eq(hostel_id))
            .order_by_asc(entity::room::Column::Number)
            .all(self.db)
            .await
    }

    /// Counts the live rooms of a hostel
    pub async fn count(&self, hostel_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Room::find_active()
            .filter(entity::room::Column::HostelId.eq(hostel_id))
            .count(self.db)
            .await
    }

    /// Applies `changes` to a live room
    ///
    /// Returns `Ok(None)` if the room does not exist or is deleted.
    pub async fn update(
        &self,
        room_id: i32,
        changes: RoomChanges,
    ) -> Result<Option<entity::room::Model>, DbErr> {
        let room = match self.find_by_id(room_id).await? {
            Some(room) => room,
            None => return Ok(None),
        };

        let mut room_am = room.into_active_model();
        if let Some(number) = changes.number {
            room_am.number = ActiveValue::Set(number);
        }
        if let Some(floor) = changes.floor {
            room_am.floor = ActiveValue::Set(floor);
        }
        if let Some(room_type) = changes.room_type {
            room_am.room_type = ActiveValue::Set(room_type);
        }
        if let Some(capacity) = changes.capacity {
            room_am.capacity = ActiveValue::Set(capacity);
        }
        if let Some(description) = changes.description {
            room_am.description = ActiveValue::Set(description);
        }
        room_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let room = room_am.update(self.db).await?;

        Ok(Some(room))
    }

    pub async fn soft_delete(
        &self,
        room_id: i32,
        deleted_at: NaiveDateTime,
    ) -> Result<bool, DbErr> {
        soft_delete::soft_delete::<entity::prelude::Room, _>(self.db, room_id, deleted_at, None)
            .await
    }

    pub async fn restore(&self, room_id: i32) -> Result<bool, DbErr> {
        soft_delete::restore::<entity::prelude::Room, _>(self.db, room_id, Utc::now().naive_utc())
            .await
    }
}
