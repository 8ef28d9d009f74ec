//! Room, bed and tenant occupancy.
//!
//! A bed is either vacant or occupied by exactly one tenant. The link is stored on both
//! sides, `beds.tenant_id` and `tenant_profiles.current_bed_id`, and both sides are only
//! ever written together inside one transaction by the operations of this service:
//! [`OccupancyService::assign_bed`], [`OccupancyService::vacate_bed`],
//! [`OccupancyService::check_in`] and [`OccupancyService::check_out`].
//!
//! Each side is written with a conditional update that verifies the expected prior state
//! through the affected row count, so two requests racing for the same vacant bed cannot
//! both succeed. Structural deletes re-verify occupancy inside the deleting transaction.
//!
//! Audit entries are written after commit and never fail the operation.

mod bed;
mod room;
mod stay;
mod tenant;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::PolicyConfig,
    data::{
        audit::NewAuditEntry, bed::BedRepository, room::RoomRepository,
        tenant::TenantRepository,
    },
    error::{resource::NotFoundError, Error},
    model::db::{BedModel, RoomModel, TenantModel},
    service::{access::AccessControl, audit::AuditService, subscription::SubscriptionService},
};

pub struct OccupancyService<'a> {
    db: &'a DatabaseConnection,
    policy: &'a PolicyConfig,
    access: AccessControl,
}

impl<'a> OccupancyService<'a> {
    /// Creates a new instance of [`OccupancyService`] evaluating access at the current time
    pub fn new(db: &'a DatabaseConnection, policy: &'a PolicyConfig) -> Self {
        Self {
            db,
            policy,
            access: AccessControl::new(),
        }
    }

    /// Replaces the access control, used to pin the evaluation time
    pub fn with_access(mut self, access: AccessControl) -> Self {
        self.access = access;
        self
    }

    fn subscriptions(&self) -> SubscriptionService<'a> {
        SubscriptionService::new(self.db, self.policy).with_access(self.access)
    }

    async fn audit(&self, entry: NewAuditEntry) {
        AuditService::new(self.db).record(entry).await;
    }

    async fn live_room(&self, room_id: i32) -> Result<RoomModel, Error> {
        RoomRepository::new(self.db)
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| NotFoundError::Room(room_id).into())
    }

    async fn live_bed(&self, bed_id: i32) -> Result<BedModel, Error> {
        BedRepository::new(self.db)
            .find_by_id(bed_id)
            .await?
            .ok_or_else(|| NotFoundError::Bed(bed_id).into())
    }

    async fn live_tenant(&self, tenant_id: i32) -> Result<TenantModel, Error> {
        TenantRepository::new(self.db)
            .find_by_id(tenant_id)
            .await?
            .ok_or_else(|| NotFoundError::Tenant(tenant_id).into())
    }
}
