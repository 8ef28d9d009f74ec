use chrono::NaiveDate;
use entity::audit_log::AuditAction;
use sea_orm::TransactionTrait;
use serde_json::json;

use super::{bed::ensure_same_hostel, OccupancyService};
use crate::server::{
    data::{
        audit::NewAuditEntry, bed::BedRepository, check_in_out::CheckInOutRepository,
        tenant::TenantRepository,
    },
    error::{
        resource::{ConflictError, ValidationError},
        Error,
    },
    model::{
        db::{CheckInOutModel, TenantModel},
        principal::Principal,
    },
    service::access::permission::{Action, Resource},
};

impl<'a> OccupancyService<'a> {
    /// Starts a stay for a tenant on a bed
    ///
    /// If the tenant holds no bed yet, the bed is linked first exactly as
    /// [`Self::assign_bed`] would. A tenant already on a stay at the same bed is returned
    /// unchanged, so repeating a check-in has no effect.
    ///
    /// # Returns
    /// - `Ok(TenantModel)` - Tenant with the check-in date recorded
    /// - `Err(Error::Validation(TenantAlreadyCheckedIn))` - The tenant is on a stay elsewhere
    /// - `Err(Error::Validation(TenantAlreadyHasBed))` - The tenant holds a different bed
    /// - `Err(Error::Conflict(BedOccupied))` - The bed is held by someone else
    pub async fn check_in(
        &self,
        actor: &Principal,
        tenant_id: i32,
        bed_id: i32,
        check_in_date: NaiveDate,
    ) -> Result<TenantModel, Error> {
        let tenant = self.live_tenant(tenant_id).await?;
        self.access
            .authorize(actor, Action::Write, Resource::Tenants, tenant.hostel_id)?;

        let bed = self.live_bed(bed_id).await?;
        ensure_same_hostel(&bed, &tenant)?;

        let on_stay = has_active_stay(&tenant);
        let linked = match tenant.current_bed_id {
            Some(current) if current == bed_id && on_stay => return Ok(tenant),
            Some(current) if on_stay => {
                return Err(ValidationError::TenantAlreadyCheckedIn {
                    tenant_id,
                    bed_id: current,
                }
                .into())
            }
            Some(current) if current != bed_id => {
                return Err(ValidationError::TenantAlreadyHasBed {
                    tenant_id,
                    bed_id: current,
                }
                .into())
            }
            Some(_) => true,
            None => false,
        };

        if !linked && (bed.is_occupied || bed.tenant_id.is_some()) {
            return Err(ConflictError::BedOccupied(bed_id).into());
        }

        let txn = self.db.begin().await?;
        let tenant_repo = TenantRepository::new(&txn);

        if !linked {
            if !BedRepository::new(&txn).occupy(bed_id, tenant_id).await? {
                return Err(ConflictError::BedOccupied(bed_id).into());
            }

            if !tenant_repo.attach_bed(tenant_id, bed_id).await? {
                return Err(ValidationError::TenantAlreadyHasBed { tenant_id, bed_id }.into());
            }
        }

        if !tenant_repo
            .record_check_in(tenant_id, bed_id, check_in_date)
            .await?
        {
            // Another check-in won the race; answer from what it left behind
            drop(txn);

            let current = self.live_tenant(tenant_id).await?;
            return match current.current_bed_id {
                Some(held) if held == bed_id && has_active_stay(&current) => Ok(current),
                Some(held) if has_active_stay(&current) => {
                    Err(ValidationError::TenantAlreadyCheckedIn {
                        tenant_id,
                        bed_id: held,
                    }
                    .into())
                }
                Some(held) => Err(ValidationError::TenantAlreadyHasBed {
                    tenant_id,
                    bed_id: held,
                }
                .into()),
                None => Err(ConflictError::BedOccupied(bed_id).into()),
            };
        }

        let stay = CheckInOutRepository::new(&txn)
            .create(&tenant, bed_id, check_in_date)
            .await?;

        txn.commit().await?;

        self.audit(
            NewAuditEntry::new(AuditAction::Create, "check_in_out", stay.id)
                .by(actor.user_id())
                .in_hostel(tenant.hostel_id)
                .new_values(json!({
                    "tenant_id": tenant_id,
                    "bed_id": bed_id,
                    "check_in_date": check_in_date,
                })),
        )
        .await;

        self.live_tenant(tenant_id).await
    }

    /// Ends the tenant's stay and frees their bed
    ///
    /// The tenant's open stay record is closed whichever bed it names. A tenant assigned a
    /// bed but never checked in has no record to close and is simply released.
    pub async fn check_out(
        &self,
        actor: &Principal,
        tenant_id: i32,
        check_out_date: NaiveDate,
        notes: Option<String>,
    ) -> Result<TenantModel, Error> {
        let tenant = self.live_tenant(tenant_id).await?;
        self.access
            .authorize(actor, Action::Write, Resource::Tenants, tenant.hostel_id)?;

        let Some(bed_id) = tenant.current_bed_id else {
            return Err(ValidationError::TenantNotCheckedIn(tenant_id).into());
        };

        let txn = self.db.begin().await?;

        if !BedRepository::new(&txn).release(bed_id, tenant_id).await? {
            tracing::warn!(bed_id, tenant_id, "Bed was not held by the tenant at check-out");
        }

        let stay_repo = CheckInOutRepository::new(&txn);
        match stay_repo.find_active(tenant_id, None).await? {
            Some(stay) => {
                stay_repo.close(stay.id, check_out_date, notes).await?;
            }
            None => tracing::warn!(bed_id, tenant_id, "No open stay found at check-out"),
        }

        if !TenantRepository::new(&txn)
            .detach_bed(tenant_id, bed_id, Some(check_out_date))
            .await?
        {
            return Err(ValidationError::TenantNotCheckedIn(tenant_id).into());
        }

        txn.commit().await?;

        self.audit(
            NewAuditEntry::new(AuditAction::Update, "tenant_profile", tenant_id)
                .by(actor.user_id())
                .in_hostel(tenant.hostel_id)
                .old_values(json!({ "current_bed_id": bed_id }))
                .new_values(json!({
                    "current_bed_id": null,
                    "check_out_date": check_out_date,
                })),
        )
        .await;

        self.live_tenant(tenant_id).await
    }

    /// Stay records of a tenant, newest first
    ///
    /// Tenants may read their own history; everyone else needs read access to tenants of
    /// the hostel.
    pub async fn stay_history(
        &self,
        actor: &Principal,
        tenant_id: i32,
    ) -> Result<Vec<CheckInOutModel>, Error> {
        let tenant = self.live_tenant(tenant_id).await?;

        match actor {
            Principal::Tenant { .. } => {
                self.access.check_resource_ownership(actor, tenant.user_id)?
            }
            _ => self
                .access
                .authorize(actor, Action::Read, Resource::Tenants, tenant.hostel_id)?,
        }

        Ok(CheckInOutRepository::new(self.db)
            .list_for_tenant(tenant_id)
            .await?)
    }
}

/// A stay is active once checked in and until checked out
fn has_active_stay(tenant: &TenantModel) -> bool {
    tenant.check_in_date.is_some() && tenant.check_out_date.is_none()
}
