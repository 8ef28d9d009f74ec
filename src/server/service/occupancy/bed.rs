use chrono::Utc;
use entity::audit_log::AuditAction;
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde_json::json;

use super::OccupancyService;
use crate::server::{
    data::{
        audit::NewAuditEntry, bed::BedRepository, check_in_out::CheckInOutRepository,
        room::RoomRepository, tenant::TenantRepository,
    },
    error::{
        resource::{ConflictError, NotFoundError, ValidationError},
        Error,
    },
    model::{
        db::{BedModel, RoomModel, TenantModel},
        principal::Principal,
    },
    service::access::permission::{Action, Resource},
};

impl<'a> OccupancyService<'a> {
    /// Adds a vacant bed to a live room with spare capacity
    ///
    /// The capacity check and the insert run in one transaction holding the room's row
    /// lock, so concurrent creations cannot overfill the room.
    ///
    /// # Returns
    /// - `Ok(BedModel)` - Created bed
    /// - `Err(Error::Validation(RoomAtCapacity))` - The room already has `capacity` live beds
    /// - `Err(Error::Conflict(BedNumber))` - Number already used in the room
    pub async fn create_bed(
        &self,
        actor: &Principal,
        room_id: i32,
        number: String,
    ) -> Result<BedModel, Error> {
        let room = self.live_room(room_id).await?;
        self.access
            .authorize(actor, Action::Write, Resource::Beds, room.hostel_id)?;

        let txn = self.db.begin().await?;

        let room = RoomRepository::new(&txn)
            .lock_live(room_id)
            .await?
            .ok_or(NotFoundError::Room(room_id))?;

        let bed_repo = BedRepository::new(&txn);
        ensure_spare_capacity(&bed_repo, &room).await?;

        if bed_repo.find_by_number(room_id, &number).await?.is_some() {
            return Err(ConflictError::BedNumber { room_id, number }.into());
        }

        let bed = bed_repo.create(&room, number).await?;

        txn.commit().await?;

        self.audit(
            NewAuditEntry::new(AuditAction::Create, "bed", bed.id)
                .by(actor.user_id())
                .in_hostel(bed.hostel_id)
                .new_values(json!({ "room_id": room_id, "number": bed.number })),
        )
        .await;

        Ok(bed)
    }

    pub async fn rename_bed(
        &self,
        actor: &Principal,
        bed_id: i32,
        number: String,
    ) -> Result<BedModel, Error> {
        let bed = self.live_bed(bed_id).await?;
        self.access
            .authorize(actor, Action::Write, Resource::Beds, bed.hostel_id)?;

        if number == bed.number {
            return Ok(bed);
        }

        let bed_repo = BedRepository::new(self.db);
        if bed_repo.find_by_number(bed.room_id, &number).await?.is_some() {
            return Err(ConflictError::BedNumber {
                room_id: bed.room_id,
                number,
            }
            .into());
        }

        bed_repo.rename(bed_id, number.clone()).await?;

        self.audit(
            NewAuditEntry::new(AuditAction::Update, "bed", bed_id)
                .by(actor.user_id())
                .in_hostel(bed.hostel_id)
                .old_values(json!({ "number": bed.number }))
                .new_values(json!({ "number": number })),
        )
        .await;

        self.live_bed(bed_id).await
    }

    /// Soft deletes a vacant bed
    ///
    /// The vacancy check is part of the delete statement itself, so a bed occupied after
    /// the first read is still refused.
    pub async fn delete_bed(&self, actor: &Principal, bed_id: i32) -> Result<(), Error> {
        let bed = self.live_bed(bed_id).await?;
        self.access
            .authorize(actor, Action::Delete, Resource::Beds, bed.hostel_id)?;

        if bed.is_occupied || bed.tenant_id.is_some() {
            return Err(ValidationError::BedOccupied(bed_id).into());
        }

        if !BedRepository::new(self.db).soft_delete_vacant(bed_id).await? {
            return Err(ValidationError::BedOccupied(bed_id).into());
        }

        self.audit(
            NewAuditEntry::new(AuditAction::Delete, "bed", bed_id)
                .by(actor.user_id())
                .in_hostel(bed.hostel_id)
                .new_values(json!({ "is_deleted": true })),
        )
        .await;

        Ok(())
    }

    /// Restores a deleted bed into its room, provided the room is live and has capacity
    pub async fn restore_bed(&self, actor: &Principal, bed_id: i32) -> Result<BedModel, Error> {
        let bed_repo = BedRepository::new(self.db);
        let bed = bed_repo
            .find_by_id_with_deleted(bed_id)
            .await?
            .ok_or(NotFoundError::Bed(bed_id))?;
        self.access
            .authorize(actor, Action::Write, Resource::Beds, bed.hostel_id)?;

        if !bed.is_deleted {
            return Err(ValidationError::NotDeleted {
                entity: "bed",
                id: bed_id,
            }
            .into());
        }

        let txn = self.db.begin().await?;

        let room = RoomRepository::new(&txn)
            .lock_live(bed.room_id)
            .await?
            .ok_or(ValidationError::RoomDeleted(bed.room_id))?;

        let bed_repo = BedRepository::new(&txn);
        ensure_spare_capacity(&bed_repo, &room).await?;

        if !bed_repo.restore(bed_id).await? {
            return Err(ValidationError::NotDeleted {
                entity: "bed",
                id: bed_id,
            }
            .into());
        }

        txn.commit().await?;

        self.audit(
            NewAuditEntry::new(AuditAction::Update, "bed", bed_id)
                .by(actor.user_id())
                .in_hostel(bed.hostel_id)
                .new_values(json!({ "is_deleted": false })),
        )
        .await;

        self.live_bed(bed_id).await
    }

    /// Links a vacant bed and a bedless tenant of the same hostel
    ///
    /// Both sides are written in one transaction with conditional updates. If either
    /// side no longer holds its expected prior state the transaction is dropped and
    /// nothing is written.
    ///
    /// # Returns
    /// - `Ok((BedModel, TenantModel))` - Both sides after the link
    /// - `Err(Error::Conflict(BedOccupied))` - The bed is held by someone else
    /// - `Err(Error::Validation(CrossHostel))` - Bed and tenant belong to different hostels
    /// - `Err(Error::Validation(TenantAlreadyHasBed))` - The tenant already holds a bed
    pub async fn assign_bed(
        &self,
        actor: &Principal,
        bed_id: i32,
        tenant_id: i32,
    ) -> Result<(BedModel, TenantModel), Error> {
        let bed = self.live_bed(bed_id).await?;
        self.access
            .authorize(actor, Action::Write, Resource::Beds, bed.hostel_id)?;

        if bed.is_occupied || bed.tenant_id.is_some() {
            return Err(ConflictError::BedOccupied(bed_id).into());
        }

        let tenant = self.live_tenant(tenant_id).await?;
        ensure_same_hostel(&bed, &tenant)?;

        if let Some(current_bed_id) = tenant.current_bed_id {
            return Err(ValidationError::TenantAlreadyHasBed {
                tenant_id,
                bed_id: current_bed_id,
            }
            .into());
        }

        let txn = self.db.begin().await?;

        if !BedRepository::new(&txn).occupy(bed_id, tenant_id).await? {
            return Err(ConflictError::BedOccupied(bed_id).into());
        }

        if !TenantRepository::new(&txn)
            .attach_bed(tenant_id, bed_id)
            .await?
        {
            return Err(ValidationError::TenantAlreadyHasBed { tenant_id, bed_id }.into());
        }

        txn.commit().await?;

        self.audit(
            NewAuditEntry::new(AuditAction::Update, "bed", bed_id)
                .by(actor.user_id())
                .in_hostel(bed.hostel_id)
                .old_values(json!({ "is_occupied": false, "tenant_id": null }))
                .new_values(json!({ "is_occupied": true, "tenant_id": tenant_id })),
        )
        .await;

        Ok((self.live_bed(bed_id).await?, self.live_tenant(tenant_id).await?))
    }

    /// Clears an occupied bed and its tenant's bed pointer
    ///
    /// An open stay on the bed is closed with today's date.
    pub async fn vacate_bed(&self, actor: &Principal, bed_id: i32) -> Result<BedModel, Error> {
        let bed = self.live_bed(bed_id).await?;
        self.access
            .authorize(actor, Action::Write, Resource::Beds, bed.hostel_id)?;

        let Some(tenant_id) = bed.tenant_id else {
            return Err(ValidationError::BedNotOccupied(bed_id).into());
        };

        let today = Utc::now().date_naive();
        let txn = self.db.begin().await?;

        if !BedRepository::new(&txn).release(bed_id, tenant_id).await? {
            return Err(ValidationError::BedNotOccupied(bed_id).into());
        }

        let stay_repo = CheckInOutRepository::new(&txn);
        let open_stay = stay_repo.find_active(tenant_id, Some(bed_id)).await?;

        let check_out_date = open_stay.as_ref().map(|_| today);
        if !TenantRepository::new(&txn)
            .detach_bed(tenant_id, bed_id, check_out_date)
            .await?
        {
            tracing::warn!(
                bed_id,
                tenant_id,
                "Tenant did not point at the bed being vacated"
            );
        }

        if let Some(stay) = open_stay {
            stay_repo.close(stay.id, today, None).await?;
        }

        txn.commit().await?;

        self.audit(
            NewAuditEntry::new(AuditAction::Update, "bed", bed_id)
                .by(actor.user_id())
                .in_hostel(bed.hostel_id)
                .old_values(json!({ "is_occupied": true, "tenant_id": tenant_id }))
                .new_values(json!({ "is_occupied": false, "tenant_id": null })),
        )
        .await;

        self.live_bed(bed_id).await
    }

    pub async fn list_available_beds(
        &self,
        actor: &Principal,
        hostel_id: i32,
    ) -> Result<Vec<BedModel>, Error> {
        self.access
            .authorize(actor, Action::Read, Resource::Beds, hostel_id)?;

        Ok(BedRepository::new(self.db).list_available(hostel_id).await?)
    }
}

/// Fails with [`ValidationError::RoomAtCapacity`] when the room has no room for another bed
///
/// Callers hold the room's row lock through `bed_repo`'s transaction.
async fn ensure_spare_capacity<C: ConnectionTrait>(
    bed_repo: &BedRepository<'_, C>,
    room: &RoomModel,
) -> Result<(), Error> {
    if bed_repo.count_in_room(room.id).await? >= room.capacity as u64 {
        return Err(ValidationError::RoomAtCapacity {
            room_id: room.id,
            capacity: room.capacity,
        }
        .into());
    }

    Ok(())
}

pub(super) fn ensure_same_hostel(bed: &BedModel, tenant: &TenantModel) -> Result<(), Error> {
    if bed.hostel_id != tenant.hostel_id {
        return Err(ValidationError::CrossHostel {
            bed_hostel_id: bed.hostel_id,
            tenant_hostel_id: tenant.hostel_id,
        }
        .into());
    }

    Ok(())
}
