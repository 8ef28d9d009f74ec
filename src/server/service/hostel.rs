//! Hostels and hostel admin affiliations.

use entity::{audit_log::AuditAction, user::UserRole};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::server::{
    data::{
        audit::NewAuditEntry,
        bed::BedRepository,
        hostel::{HostelRepository, NewHostel},
        user::UserRepository,
        user_hostel::UserHostelRepository,
    },
    error::{
        resource::{ConflictError, NotFoundError, ValidationError},
        Error,
    },
    model::{db::HostelModel, principal::Principal},
    service::{access::AccessControl, audit::AuditService},
};

pub struct HostelService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HostelService<'a> {
    /// Creates a new instance of [`HostelService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_hostel(
        &self,
        actor: &Principal,
        hostel: NewHostel,
    ) -> Result<HostelModel, Error> {
        AccessControl::new().require_role(actor, &[UserRole::SuperAdmin])?;

        let hostel_repo = HostelRepository::new(self.db);
        if hostel_repo.find_by_code(&hostel.code).await?.is_some() {
            return Err(ConflictError::HostelCode(hostel.code).into());
        }

        let hostel = hostel_repo.create(hostel).await?;

        AuditService::new(self.db)
            .record(
                NewAuditEntry::new(AuditAction::Create, "hostel", hostel.id)
                    .by(actor.user_id())
                    .in_hostel(hostel.id)
                    .new_values(json!({ "name": hostel.name, "code": hostel.code })),
            )
            .await;

        Ok(hostel)
    }

    pub async fn get_hostel(&self, hostel_id: i32) -> Result<HostelModel, Error> {
        HostelRepository::new(self.db)
            .find_by_id(hostel_id)
            .await?
            .ok_or_else(|| NotFoundError::Hostel(hostel_id).into())
    }

    /// Soft deletes a hostel with no occupied beds
    ///
    /// The occupancy count and the delete run in one transaction.
    pub async fn delete_hostel(&self, actor: &Principal, hostel_id: i32) -> Result<(), Error> {
        AccessControl::new().require_role(actor, &[UserRole::SuperAdmin])?;

        let txn = self.db.begin().await?;

        if HostelRepository::new(&txn).find_by_id(hostel_id).await?.is_none() {
            return Err(NotFoundError::Hostel(hostel_id).into());
        }

        let occupied = BedRepository::new(&txn)
            .count_occupied_in_hostel(hostel_id)
            .await?;
        if occupied > 0 {
            return Err(ValidationError::HostelHasOccupiedBeds {
                hostel_id,
                count: occupied,
            }
            .into());
        }

        if !HostelRepository::new(&txn).soft_delete(hostel_id).await? {
            return Err(NotFoundError::Hostel(hostel_id).into());
        }

        txn.commit().await?;

        AuditService::new(self.db)
            .record(
                NewAuditEntry::new(AuditAction::Delete, "hostel", hostel_id)
                    .by(actor.user_id())
                    .in_hostel(hostel_id),
            )
            .await;

        Ok(())
    }

    pub async fn restore_hostel(
        &self,
        actor: &Principal,
        hostel_id: i32,
    ) -> Result<HostelModel, Error> {
        AccessControl::new().require_role(actor, &[UserRole::SuperAdmin])?;

        let hostel_repo = HostelRepository::new(self.db);
        let hostel = hostel_repo
            .find_by_id_with_deleted(hostel_id)
            .await?
            .ok_or(NotFoundError::Hostel(hostel_id))?;

        if !hostel.is_deleted || !hostel_repo.restore(hostel_id).await? {
            return Err(ValidationError::NotDeleted {
                entity: "hostel",
                id: hostel_id,
            }
            .into());
        }

        AuditService::new(self.db)
            .record(
                NewAuditEntry::new(AuditAction::Update, "hostel", hostel_id)
                    .by(actor.user_id())
                    .in_hostel(hostel_id)
                    .new_values(json!({ "is_deleted": false })),
            )
            .await;

        self.get_hostel(hostel_id).await
    }

    /// Grants a hostel admin access to another hostel
    pub async fn add_hostel_to_admin(
        &self,
        actor: &Principal,
        admin_id: i32,
        hostel_id: i32,
    ) -> Result<(), Error> {
        AccessControl::new().require_role(actor, &[UserRole::SuperAdmin])?;

        let admin = UserRepository::new(self.db)
            .find_by_id(admin_id)
            .await?
            .ok_or(NotFoundError::User(admin_id))?;
        if admin.role != UserRole::HostelAdmin {
            return Err(ValidationError::RoleMismatch {
                user_id: admin_id,
                expected: UserRole::HostelAdmin,
            }
            .into());
        }

        self.get_hostel(hostel_id).await?;

        let association_repo = UserHostelRepository::new(self.db);
        if association_repo.exists(admin_id, hostel_id).await? {
            return Err(ConflictError::HostelAssociation {
                user_id: admin_id,
                hostel_id,
            }
            .into());
        }

        association_repo.create(admin_id, hostel_id).await?;

        AuditService::new(self.db)
            .record(
                NewAuditEntry::new(AuditAction::Update, "user", admin_id)
                    .by(actor.user_id())
                    .in_hostel(hostel_id)
                    .new_values(json!({ "added_hostel_id": hostel_id })),
            )
            .await;

        Ok(())
    }

    pub async fn remove_hostel_from_admin(
        &self,
        actor: &Principal,
        admin_id: i32,
        hostel_id: i32,
    ) -> Result<(), Error> {
        AccessControl::new().require_role(actor, &[UserRole::SuperAdmin])?;

        if !UserHostelRepository::new(self.db)
            .delete(admin_id, hostel_id)
            .await?
        {
            return Err(NotFoundError::Hostel(hostel_id).into());
        }

        AuditService::new(self.db)
            .record(
                NewAuditEntry::new(AuditAction::Update, "user", admin_id)
                    .by(actor.user_id())
                    .in_hostel(hostel_id)
                    .new_values(json!({ "removed_hostel_id": hostel_id })),
            )
            .await;

        Ok(())
    }

    /// Live hostels an admin manages, resolved the same way as their principal
    pub async fn get_admin_hostels(&self, admin_id: i32) -> Result<Vec<HostelModel>, Error> {
        let admin = UserRepository::new(self.db)
            .find_by_id(admin_id)
            .await?
            .ok_or(NotFoundError::User(admin_id))?;

        let mut hostel_ids = UserHostelRepository::new(self.db)
            .get_hostel_ids(admin_id)
            .await?;
        if hostel_ids.is_empty() {
            hostel_ids.extend(admin.primary_hostel_id);
        }

        let hostel_repo = HostelRepository::new(self.db);
        let mut hostels = Vec::with_capacity(hostel_ids.len());
        for hostel_id in hostel_ids {
            if let Some(hostel) = hostel_repo.find_by_id(hostel_id).await? {
                hostels.push(hostel);
            }
        }

        Ok(hostels)
    }
}
