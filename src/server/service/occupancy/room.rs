use chrono::Utc;
use entity::audit_log::AuditAction;
use sea_orm::{ActiveEnum, TransactionTrait};
use serde_json::json;

use super::OccupancyService;
use crate::server::{
    data::{
        audit::NewAuditEntry,
        bed::BedRepository,
        hostel::HostelRepository,
        room::{NewRoom, RoomChanges, RoomRepository},
    },
    error::{
        resource::{ConflictError, NotFoundError, ValidationError},
        Error,
    },
    model::{db::RoomModel, principal::Principal},
    service::access::permission::{Action, Resource},
};

impl<'a> OccupancyService<'a> {
    /// Creates a room after the access, quota and number checks pass
    ///
    /// # Returns
    /// - `Ok(RoomModel)` - Created room
    /// - `Err(Error::Validation(InvalidCapacity))` - Capacity below 1
    /// - `Err(Error::SubscriptionLimit(Rooms))` - Plan room cap reached
    /// - `Err(Error::Conflict(RoomNumber))` - Number already used in the hostel
    pub async fn create_room(&self, actor: &Principal, room: NewRoom) -> Result<RoomModel, Error> {
        self.access
            .authorize(actor, Action::Write, Resource::Rooms, room.hostel_id)?;

        if room.capacity < 1 {
            return Err(ValidationError::InvalidCapacity(room.capacity).into());
        }

        HostelRepository::new(self.db)
            .find_by_id(room.hostel_id)
            .await?
            .ok_or(NotFoundError::Hostel(room.hostel_id))?;

        self.subscriptions().check_room_limit(room.hostel_id).await?;

        let room_repo = RoomRepository::new(self.db);
        if room_repo
            .find_by_number(room.hostel_id, &room.number)
            .await?
            .is_some()
        {
            return Err(ConflictError::RoomNumber {
                hostel_id: room.hostel_id,
                number: room.number,
            }
            .into());
        }

        let room = room_repo.create(room).await?;

        self.audit(
            NewAuditEntry::new(AuditAction::Create, "room", room.id)
                .by(actor.user_id())
                .in_hostel(room.hostel_id)
                .new_values(json!({
                    "number": room.number,
                    "room_type": room.room_type.to_value(),
                    "capacity": room.capacity,
                })),
        )
        .await;

        Ok(room)
    }

    /// Applies changes to a live room
    ///
    /// A new number must be unused in the hostel and a new capacity may not drop below the
    /// number of live beds in the room. The bed count is taken under the room's row lock,
    /// the same lock bed creation holds.
    pub async fn update_room(
        &self,
        actor: &Principal,
        room_id: i32,
        changes: RoomChanges,
    ) -> Result<RoomModel, Error> {
        let room = self.live_room(room_id).await?;
        self.access
            .authorize(actor, Action::Write, Resource::Rooms, room.hostel_id)?;

        if let Some(capacity) = changes.capacity.filter(|c| *c < 1) {
            return Err(ValidationError::InvalidCapacity(capacity).into());
        }

        let txn = self.db.begin().await?;
        let room_repo = RoomRepository::new(&txn);

        room_repo
            .lock_live(room_id)
            .await?
            .ok_or(NotFoundError::Room(room_id))?;

        if let Some(number) = changes.number.as_deref().filter(|n| *n != room.number) {
            if room_repo
                .find_by_number(room.hostel_id, number)
                .await?
                .is_some()
            {
                return Err(ConflictError::RoomNumber {
                    hostel_id: room.hostel_id,
                    number: number.to_string(),
                }
                .into());
            }
        }

        if let Some(capacity) = changes.capacity {
            let beds = BedRepository::new(&txn).count_in_room(room_id).await?;
            if (capacity as u64) < beds {
                return Err(ValidationError::CapacityBelowBedCount {
                    room_id,
                    capacity,
                    beds,
                }
                .into());
            }
        }

        let updated = room_repo
            .update(room_id, changes)
            .await?
            .ok_or(NotFoundError::Room(room_id))?;

        txn.commit().await?;

        self.audit(
            NewAuditEntry::new(AuditAction::Update, "room", room_id)
                .by(actor.user_id())
                .in_hostel(room.hostel_id)
                .old_values(json!({ "number": room.number, "capacity": room.capacity }))
                .new_values(json!({ "number": updated.number, "capacity": updated.capacity })),
        )
        .await;

        Ok(updated)
    }

    /// Soft deletes a room whose beds are all vacant
    ///
    /// Vacant beds are deleted with the room under the same timestamp so that
    /// [`Self::restore_room`] can bring them back together. Occupancy is verified after the
    /// cascade inside the same transaction: any bed still live at that point is occupied,
    /// and its presence rolls the whole delete back.
    ///
    /// # Returns
    /// - `Ok(())` - Room and its vacant beds soft deleted
    /// - `Err(Error::Validation(RoomHasOccupiedBeds))` - Count of beds still occupied
    pub async fn delete_room(&self, actor: &Principal, room_id: i32) -> Result<(), Error> {
        let room = self.live_room(room_id).await?;
        self.access
            .authorize(actor, Action::Delete, Resource::Rooms, room.hostel_id)?;

        let deleted_at = Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        let beds_deleted = BedRepository::new(&txn)
            .soft_delete_vacant_in_room(room_id, deleted_at)
            .await?;

        let occupied = BedRepository::new(&txn)
            .count_occupied_in_room(room_id)
            .await?;
        if occupied > 0 {
            return Err(ValidationError::RoomHasOccupiedBeds {
                room_id,
                count: occupied,
            }
            .into());
        }

        if !RoomRepository::new(&txn)
            .soft_delete(room_id, deleted_at)
            .await?
        {
            return Err(NotFoundError::Room(room_id).into());
        }

        txn.commit().await?;

        tracing::debug!(room_id, beds_deleted, "Room soft deleted");

        self.audit(
            NewAuditEntry::new(AuditAction::Delete, "room", room_id)
                .by(actor.user_id())
                .in_hostel(room.hostel_id)
                .new_values(json!({ "is_deleted": true, "beds_deleted": beds_deleted })),
        )
        .await;

        Ok(())
    }

    /// Restores a deleted room and the beds deleted with it
    ///
    /// The restored room counts toward the plan's room cap again, so the quota is checked
    /// first.
    pub async fn restore_room(&self, actor: &Principal, room_id: i32) -> Result<RoomModel, Error> {
        let room = RoomRepository::new(self.db)
            .find_by_id_with_deleted(room_id)
            .await?
            .ok_or(NotFoundError::Room(room_id))?;
        self.access
            .authorize(actor, Action::Write, Resource::Rooms, room.hostel_id)?;

        let Some(deleted_at) = room.deleted_at.filter(|_| room.is_deleted) else {
            return Err(ValidationError::NotDeleted {
                entity: "room",
                id: room_id,
            }
            .into());
        };

        self.subscriptions().check_room_limit(room.hostel_id).await?;

        let txn = self.db.begin().await?;

        if !RoomRepository::new(&txn).restore(room_id).await? {
            return Err(ValidationError::NotDeleted {
                entity: "room",
                id: room_id,
            }
            .into());
        }

        let beds_restored = BedRepository::new(&txn)
            .restore_in_room(room_id, deleted_at)
            .await?;

        txn.commit().await?;

        self.audit(
            NewAuditEntry::new(AuditAction::Update, "room", room_id)
                .by(actor.user_id())
                .in_hostel(room.hostel_id)
                .new_values(json!({ "is_deleted": false, "beds_restored": beds_restored })),
        )
        .await;

        self.live_room(room_id).await
    }

    pub async fn list_rooms(
        &self,
        actor: &Principal,
        hostel_id: i32,
    ) -> Result<Vec<RoomModel>, Error> {
        self.access
            .authorize(actor, Action::Read, Resource::Rooms, hostel_id)?;

        Ok(RoomRepository::new(self.db).list(hostel_id).await?)
    }
}
