use entity::{audit_log::AuditAction, user::UserRole};
use sea_orm::TransactionTrait;
use serde_json::json;

use super::OccupancyService;
use crate::server::{
    data::{
        audit::NewAuditEntry,
        hostel::HostelRepository,
        tenant::{NewTenant, TenantRepository},
        user::UserRepository,
    },
    error::{
        resource::{ConflictError, NotFoundError, ValidationError},
        Error,
    },
    model::{db::TenantModel, principal::Principal},
    service::access::permission::{Action, Resource},
};

impl<'a> OccupancyService<'a> {
    /// Creates the tenant profile of a TENANT user
    ///
    /// A user has at most one tenant profile over its lifetime, deleted profiles included.
    /// The user's primary hostel is set to the profile's hostel when unset and must match
    /// it otherwise.
    ///
    /// # Returns
    /// - `Ok(TenantModel)` - Created profile
    /// - `Err(Error::Validation(RoleMismatch))` - The user is not a tenant
    /// - `Err(Error::Conflict(TenantProfileExists))` - The user already has a profile
    /// - `Err(Error::SubscriptionLimit(Tenants))` - Plan tenant cap reached
    pub async fn create_tenant(
        &self,
        actor: &Principal,
        tenant: NewTenant,
    ) -> Result<TenantModel, Error> {
        self.access
            .authorize(actor, Action::Write, Resource::Tenants, tenant.hostel_id)?;

        HostelRepository::new(self.db)
            .find_by_id(tenant.hostel_id)
            .await?
            .ok_or(NotFoundError::Hostel(tenant.hostel_id))?;

        let user = UserRepository::new(self.db)
            .find_by_id(tenant.user_id)
            .await?
            .ok_or(NotFoundError::User(tenant.user_id))?;

        if user.role != UserRole::Tenant {
            return Err(ValidationError::RoleMismatch {
                user_id: user.id,
                expected: UserRole::Tenant,
            }
            .into());
        }

        if let Some(primary_hostel_id) = user.primary_hostel_id {
            if primary_hostel_id != tenant.hostel_id {
                return Err(ValidationError::PrimaryHostelMismatch {
                    user_id: user.id,
                    primary_hostel_id,
                    hostel_id: tenant.hostel_id,
                }
                .into());
            }
        }

        if TenantRepository::new(self.db)
            .find_by_user_id(user.id)
            .await?
            .is_some()
        {
            return Err(ConflictError::TenantProfileExists(user.id).into());
        }

        self.subscriptions()
            .check_tenant_limit(tenant.hostel_id)
            .await?;

        let txn = self.db.begin().await?;

        let hostel_id = tenant.hostel_id;
        let profile = TenantRepository::new(&txn).create(tenant).await?;
        UserRepository::new(&txn)
            .set_primary_hostel_if_unset(user.id, hostel_id)
            .await?;

        txn.commit().await?;

        self.audit(
            NewAuditEntry::new(AuditAction::Create, "tenant_profile", profile.id)
                .by(actor.user_id())
                .in_hostel(hostel_id)
                .new_values(json!({ "user_id": user.id, "full_name": profile.full_name })),
        )
        .await;

        Ok(profile)
    }

    /// Reads one tenant; tenants may only read their own profile
    pub async fn get_tenant(
        &self,
        actor: &Principal,
        tenant_id: i32,
    ) -> Result<TenantModel, Error> {
        let tenant = self.live_tenant(tenant_id).await?;

        match actor {
            Principal::Tenant { .. } => {
                self.access.check_resource_ownership(actor, tenant.user_id)?
            }
            _ => self
                .access
                .authorize(actor, Action::Read, Resource::Tenants, tenant.hostel_id)?,
        }

        Ok(tenant)
    }

    pub async fn list_tenants(
        &self,
        actor: &Principal,
        hostel_id: i32,
    ) -> Result<Vec<TenantModel>, Error> {
        self.access
            .authorize(actor, Action::Read, Resource::Tenants, hostel_id)?;

        Ok(TenantRepository::new(self.db).list(hostel_id).await?)
    }

    /// Soft deletes a tenant that holds no bed
    pub async fn delete_tenant(&self, actor: &Principal, tenant_id: i32) -> Result<(), Error> {
        let tenant = self.live_tenant(tenant_id).await?;
        self.access
            .authorize(actor, Action::Delete, Resource::Tenants, tenant.hostel_id)?;

        if tenant.current_bed_id.is_some() {
            return Err(ValidationError::TenantHoldsBed(tenant_id).into());
        }

        if !TenantRepository::new(self.db)
            .soft_delete_without_bed(tenant_id)
            .await?
        {
            return Err(ValidationError::TenantHoldsBed(tenant_id).into());
        }

        self.audit(
            NewAuditEntry::new(AuditAction::Delete, "tenant_profile", tenant_id)
                .by(actor.user_id())
                .in_hostel(tenant.hostel_id)
                .new_values(json!({ "is_deleted": true })),
        )
        .await;

        Ok(())
    }

    pub async fn restore_tenant(
        &self,
        actor: &Principal,
        tenant_id: i32,
    ) -> Result<TenantModel, Error> {
        let repo = TenantRepository::new(self.db);
        let tenant = repo
            .find_by_id_with_deleted(tenant_id)
            .await?
            .ok_or(NotFoundError::Tenant(tenant_id))?;
        self.access
            .authorize(actor, Action::Write, Resource::Tenants, tenant.hostel_id)?;

        if !tenant.is_deleted {
            return Err(ValidationError::NotDeleted {
                entity: "tenant",
                id: tenant_id,
            }
            .into());
        }

        self.subscriptions()
            .check_tenant_limit(tenant.hostel_id)
            .await?;

        repo.restore(tenant_id).await?;

        self.audit(
            NewAuditEntry::new(AuditAction::Update, "tenant_profile", tenant_id)
                .by(actor.user_id())
                .in_hostel(tenant.hostel_id)
                .new_values(json!({ "is_deleted": false })),
        )
        .await;

        self.live_tenant(tenant_id).await
    }
}
