//! User identity and principal resolution.

use entity::{audit_log::AuditAction, user::UserRole};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::{
        audit::NewAuditEntry, tenant::TenantRepository, user::UserRepository,
        user_hostel::UserHostelRepository, visitor::VisitorRepository,
    },
    error::{
        access::AuthorizationError,
        auth::AuthError,
        resource::{NotFoundError, ValidationError},
        Error,
    },
    model::{db::UserModel, principal::Principal},
    service::{
        access::{
            permission::{Action, Resource},
            AccessControl,
        },
        audit::AuditService,
    },
};

pub struct IdentityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> IdentityService<'a> {
    /// Creates a new instance of [`IdentityService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the [`Principal`] of a live user
    ///
    /// Hostel admins resolve to their association set, falling back to the primary hostel
    /// when they have no associations. Visitors resolve even when expired or inactive;
    /// access control judges their expiry on every check.
    ///
    /// # Returns
    /// - `Ok(Principal)` - Resolved principal
    /// - `Err(Error::AuthError(UserNotInDatabase))` - User missing or soft-deleted
    /// - `Err(Error::AuthError(AccountInactive))` - Non-visitor account deactivated
    /// - `Err(Error::AuthError(MissingAffiliation))` - Tenant or visitor without a hostel
    pub async fn resolve_principal(&self, user_id: i32) -> Result<Principal, Error> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user_id))?;

        if !user.is_active && user.role != UserRole::Visitor {
            return Err(AuthError::AccountInactive(user_id).into());
        }

        let principal = match user.role {
            UserRole::SuperAdmin => Principal::SuperAdmin { user_id },
            UserRole::HostelAdmin => {
                let mut hostel_ids = UserHostelRepository::new(self.db)
                    .get_hostel_ids(user_id)
                    .await?;

                if hostel_ids.is_empty() {
                    hostel_ids.extend(user.primary_hostel_id);
                }

                Principal::HostelAdmin {
                    user_id,
                    hostel_ids,
                }
            }
            UserRole::Tenant => {
                let hostel_id = match user.primary_hostel_id {
                    Some(hostel_id) => hostel_id,
                    None => TenantRepository::new(self.db)
                        .find_by_user_id(user_id)
                        .await?
                        .map(|tenant| tenant.hostel_id)
                        .ok_or(AuthError::MissingAffiliation(user_id))?,
                };

                Principal::Tenant { user_id, hostel_id }
            }
            UserRole::Visitor => {
                let profile = VisitorRepository::new(self.db)
                    .find_by_user_id(user_id)
                    .await?
                    .ok_or(AuthError::MissingAffiliation(user_id))?;

                Principal::Visitor {
                    user_id,
                    hostel_id: profile.hostel_id,
                    expires_at: profile.expires_at,
                }
            }
        };

        Ok(principal)
    }

    pub async fn get_user(&self, user_id: i32) -> Result<UserModel, Error> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| NotFoundError::User(user_id).into())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, Error> {
        Ok(UserRepository::new(self.db).find_by_email(email).await?)
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<UserModel>, Error> {
        Ok(UserRepository::new(self.db).find_by_phone(phone).await?)
    }

    /// Soft deletes a user on behalf of `actor`
    ///
    /// Tenants still holding a bed must be checked out first.
    pub async fn delete_user(&self, actor: &Principal, user_id: i32) -> Result<(), Error> {
        if actor.user_id() == user_id {
            return Err(ValidationError::SelfDeletion.into());
        }

        let target = self.get_user(user_id).await?;
        self.authorize_user_change(actor, &target, Action::Delete)?;

        if target.role == UserRole::Tenant {
            let tenant = TenantRepository::new(self.db)
                .find_by_user_id(user_id)
                .await?;
            if let Some(tenant) = tenant.filter(|t| !t.is_deleted && t.current_bed_id.is_some()) {
                return Err(ValidationError::TenantHoldsBed(tenant.id).into());
            }
        }

        if !UserRepository::new(self.db).soft_delete(user_id).await? {
            return Err(NotFoundError::User(user_id).into());
        }

        let mut entry = NewAuditEntry::new(AuditAction::Delete, "user", user_id)
            .by(actor.user_id())
            .old_values(json!({ "is_deleted": false }))
            .new_values(json!({ "is_deleted": true }));
        if let Some(hostel_id) = target.primary_hostel_id {
            entry = entry.in_hostel(hostel_id);
        }
        AuditService::new(self.db).record(entry).await;

        Ok(())
    }

    /// Reverses [`Self::delete_user`]
    pub async fn restore_user(&self, actor: &Principal, user_id: i32) -> Result<UserModel, Error> {
        let user_repo = UserRepository::new(self.db);

        let target = user_repo
            .find_by_id_with_deleted(user_id)
            .await?
            .ok_or(NotFoundError::User(user_id))?;
        self.authorize_user_change(actor, &target, Action::Write)?;

        if !target.is_deleted {
            return Err(ValidationError::NotDeleted {
                entity: "user",
                id: user_id,
            }
            .into());
        }

        if !user_repo.restore(user_id).await? {
            return Err(ValidationError::NotDeleted {
                entity: "user",
                id: user_id,
            }
            .into());
        }

        let mut entry = NewAuditEntry::new(AuditAction::Update, "user", user_id)
            .by(actor.user_id())
            .old_values(json!({ "is_deleted": true }))
            .new_values(json!({ "is_deleted": false }));
        if let Some(hostel_id) = target.primary_hostel_id {
            entry = entry.in_hostel(hostel_id);
        }
        AuditService::new(self.db).record(entry).await;

        self.get_user(user_id).await
    }

    fn authorize_user_change(
        &self,
        actor: &Principal,
        target: &UserModel,
        action: Action,
    ) -> Result<(), Error> {
        let access = AccessControl::new();

        if target.role == UserRole::SuperAdmin && actor.role() != UserRole::SuperAdmin {
            return Err(AuthorizationError::SuperAdminProtected {
                user_id: actor.user_id(),
            }
            .into());
        }

        let resource = match target.role {
            UserRole::Tenant => Resource::Tenants,
            UserRole::Visitor => Resource::Visitors,
            UserRole::SuperAdmin | UserRole::HostelAdmin => Resource::Users,
        };
        access.check_permission(actor, action, resource)?;

        match target.primary_hostel_id {
            Some(hostel_id) => access.check_hostel_access(actor, hostel_id)?,
            None if actor.role() == UserRole::SuperAdmin => {}
            None => {
                return Err(AuthorizationError::PermissionDenied {
                    role: actor.role(),
                    action: action.to_string(),
                    resource: resource.to_string(),
                }
                .into())
            }
        }

        Ok(())
    }
}
