//! Time-bound visitor accounts.
//!
//! A visitor is a VISITOR user plus a visitor profile holding the hostel and the expiry.
//! Access is judged against the expiry on every request by [`AccessControl`]; the
//! `is_active` flag only mirrors that state for listings and is refreshed by
//! [`VisitorService::cleanup_expired_visitors`] on a schedule.

use entity::{audit_log::AuditAction, user::UserRole};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::{
    model::visitor::{CreateVisitorDto, VisitorDto},
    server::{
        config::PolicyConfig,
        data::{
            audit::NewAuditEntry,
            hostel::HostelRepository,
            user::{NewUser, UserRepository},
            visitor::VisitorRepository,
        },
        error::{
            resource::{ConflictError, NotFoundError, ValidationError},
            Error,
        },
        model::{
            db::{UserModel, VisitorProfileModel},
            principal::Principal,
        },
        notify::{notify_best_effort, Notification, Notifier},
        service::{
            access::{
                permission::{Action, Resource},
                AccessControl,
            },
            audit::AuditService,
        },
        util::{
            password::{generate_temporary_password, hash_password},
            time::{add_days, extended_expiry},
        },
    },
};

pub struct VisitorService<'a> {
    db: &'a DatabaseConnection,
    policy: &'a PolicyConfig,
    notifier: &'a dyn Notifier,
    access: AccessControl,
}

impl<'a> VisitorService<'a> {
    /// Creates a new instance of [`VisitorService`] evaluating expiry at the current time
    pub fn new(
        db: &'a DatabaseConnection,
        policy: &'a PolicyConfig,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            db,
            policy,
            notifier,
            access: AccessControl::new(),
        }
    }

    /// Replaces the access control, used to pin the evaluation time
    pub fn with_access(mut self, access: AccessControl) -> Self {
        self.access = access;
        self
    }

    /// Creates a visitor account expiring `duration_days` from now
    ///
    /// When no password is supplied a numeric temporary password is generated, returned in
    /// the response and handed to the notifier.
    ///
    /// # Returns
    /// - `Ok(VisitorDto)` - Created visitor
    /// - `Err(Error::Validation(MissingContact))` - Neither email nor phone given
    /// - `Err(Error::Validation(InvalidDuration))` - Duration is not a positive day count
    /// - `Err(Error::Conflict(Email | Phone))` - Contact already used by any user
    pub async fn create_visitor(
        &self,
        actor: &Principal,
        visitor: CreateVisitorDto,
    ) -> Result<VisitorDto, Error> {
        self.access
            .authorize(actor, Action::Write, Resource::Visitors, visitor.hostel_id)?;

        let email = visitor.email.filter(|e| !e.trim().is_empty());
        let phone = visitor.phone.filter(|p| !p.trim().is_empty());
        if email.is_none() && phone.is_none() {
            return Err(ValidationError::MissingContact.into());
        }

        HostelRepository::new(self.db)
            .find_by_id(visitor.hostel_id)
            .await?
            .ok_or(NotFoundError::Hostel(visitor.hostel_id))?;

        let user_repo = UserRepository::new(self.db);
        if let Some(email) = &email {
            if user_repo.find_by_email(email).await?.is_some() {
                return Err(ConflictError::Email(email.clone()).into());
            }
        }
        if let Some(phone) = &phone {
            if user_repo.find_by_phone(phone).await?.is_some() {
                return Err(ConflictError::Phone(phone.clone()).into());
            }
        }

        let duration_days = visitor
            .duration_days
            .unwrap_or(self.policy.visitor_default_duration_days);
        let expires_at = add_days(self.access.now(), duration_days)?;

        let (password, temporary_password) = match visitor.password {
            Some(password) => (password, None),
            None => {
                let generated = generate_temporary_password(self.policy.temporary_password_length);
                (generated.clone(), Some(generated))
            }
        };
        let password_hash = hash_password(&password)?;

        let txn = self.db.begin().await?;

        let user = UserRepository::new(&txn)
            .create(NewUser {
                email,
                phone,
                password_hash: Some(password_hash),
                full_name: visitor.full_name,
                role: UserRole::Visitor,
                primary_hostel_id: Some(visitor.hostel_id),
                is_verified: false,
            })
            .await?;
        let profile = VisitorRepository::new(&txn)
            .create(user.id, visitor.hostel_id, expires_at, Some(actor.user_id()))
            .await?;

        txn.commit().await?;

        AuditService::new(self.db)
            .record(
                NewAuditEntry::new(AuditAction::Create, "visitor", user.id)
                    .by(actor.user_id())
                    .in_hostel(profile.hostel_id)
                    .new_values(json!({
                        "email": user.email,
                        "phone": user.phone,
                        "expires_at": expires_at,
                    })),
            )
            .await;

        notify_best_effort(
            self.notifier,
            Notification::VisitorCreated {
                user_id: user.id,
                hostel_id: profile.hostel_id,
                expires_at,
                temporary_password: temporary_password.clone(),
            },
        )
        .await;

        let mut dto = visitor_dto(&user, &profile);
        dto.temporary_password = temporary_password;

        Ok(dto)
    }

    /// Extends a visitor's access by `additional_days` and reactivates the account
    ///
    /// An expiry already in the past restarts from now, see [`extended_expiry`].
    pub async fn extend_visitor_access(
        &self,
        actor: &Principal,
        user_id: i32,
        additional_days: i64,
    ) -> Result<VisitorDto, Error> {
        let (user, profile) = self.find_visitor(user_id).await?;
        self.access
            .authorize(actor, Action::Write, Resource::Visitors, profile.hostel_id)?;

        let expires_at = extended_expiry(profile.expires_at, self.access.now(), additional_days)?;

        let txn = self.db.begin().await?;
        VisitorRepository::new(&txn)
            .set_expiry(user_id, expires_at)
            .await?;
        UserRepository::new(&txn).set_active(user_id, true).await?;
        txn.commit().await?;

        AuditService::new(self.db)
            .record(
                NewAuditEntry::new(AuditAction::Update, "visitor", user_id)
                    .by(actor.user_id())
                    .in_hostel(profile.hostel_id)
                    .old_values(json!({
                        "expires_at": profile.expires_at,
                        "is_active": user.is_active,
                    }))
                    .new_values(json!({ "expires_at": expires_at, "is_active": true })),
            )
            .await;

        self.get_visitor(user_id).await
    }

    /// Ends a visitor's access immediately by expiring it now and deactivating the account
    pub async fn revoke_visitor_access(
        &self,
        actor: &Principal,
        user_id: i32,
    ) -> Result<VisitorDto, Error> {
        let (user, profile) = self.find_visitor(user_id).await?;
        self.access
            .authorize(actor, Action::Write, Resource::Visitors, profile.hostel_id)?;

        let now = self.access.now();

        let txn = self.db.begin().await?;
        VisitorRepository::new(&txn).set_expiry(user_id, now).await?;
        UserRepository::new(&txn).set_active(user_id, false).await?;
        txn.commit().await?;

        AuditService::new(self.db)
            .record(
                NewAuditEntry::new(AuditAction::Update, "visitor", user_id)
                    .by(actor.user_id())
                    .in_hostel(profile.hostel_id)
                    .old_values(json!({
                        "expires_at": profile.expires_at,
                        "is_active": user.is_active,
                    }))
                    .new_values(json!({ "expires_at": now, "is_active": false })),
            )
            .await;

        notify_best_effort(
            self.notifier,
            Notification::VisitorRevoked {
                user_id,
                hostel_id: profile.hostel_id,
            },
        )
        .await;

        self.get_visitor(user_id).await
    }

    /// Deactivates every active visitor whose expiry has passed
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of accounts deactivated
    pub async fn cleanup_expired_visitors(&self) -> Result<u64, Error> {
        let user_repo = UserRepository::new(self.db);

        let expired: Vec<i32> = user_repo
            .find_active_visitors()
            .await?
            .into_iter()
            .filter_map(|(user, profile)| match profile {
                Some(profile) if self.access.now() > profile.expires_at => Some(user.id),
                Some(_) => None,
                None => {
                    tracing::warn!(user_id = user.id, "Visitor has no visitor profile");
                    None
                }
            })
            .collect();

        if expired.is_empty() {
            return Ok(0);
        }

        let deactivated = user_repo.deactivate_many(expired).await?;

        tracing::info!(deactivated, "Deactivated expired visitors");

        Ok(deactivated)
    }

    /// Notifies every active visitor whose access ends within `within_days`
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of notifications attempted
    pub async fn notify_expiring_visitors(&self, within_days: i64) -> Result<usize, Error> {
        let now = self.access.now();
        let horizon = add_days(now, within_days)?;

        let expiring: Vec<VisitorProfileModel> = UserRepository::new(self.db)
            .find_active_visitors()
            .await?
            .into_iter()
            .filter_map(|(_, profile)| profile)
            .filter(|profile| profile.expires_at >= now && profile.expires_at <= horizon)
            .collect();

        for profile in &expiring {
            notify_best_effort(
                self.notifier,
                Notification::VisitorExpiringSoon {
                    user_id: profile.user_id,
                    hostel_id: profile.hostel_id,
                    expires_at: profile.expires_at,
                },
            )
            .await;
        }

        Ok(expiring.len())
    }

    /// Active, unexpired visitors of a hostel
    pub async fn get_active_visitors(
        &self,
        actor: &Principal,
        hostel_id: i32,
    ) -> Result<Vec<VisitorDto>, Error> {
        self.access
            .authorize(actor, Action::Read, Resource::Visitors, hostel_id)?;

        let visitors = VisitorRepository::new(self.db)
            .find_unexpired_in_hostel(hostel_id, self.access.now())
            .await?
            .into_iter()
            .filter_map(|(profile, user)| {
                user.filter(|u| u.is_active && !u.is_deleted)
                    .map(|u| visitor_dto(&u, &profile))
            })
            .collect();

        Ok(visitors)
    }

    async fn get_visitor(&self, user_id: i32) -> Result<VisitorDto, Error> {
        let (user, profile) = self.find_visitor(user_id).await?;

        Ok(visitor_dto(&user, &profile))
    }

    async fn find_visitor(&self, user_id: i32) -> Result<(UserModel, VisitorProfileModel), Error> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .filter(|u| u.role == UserRole::Visitor)
            .ok_or(NotFoundError::Visitor(user_id))?;

        let profile = VisitorRepository::new(self.db)
            .find_by_user_id(user_id)
            .await?
            .ok_or(NotFoundError::Visitor(user_id))?;

        Ok((user, profile))
    }
}

fn visitor_dto(user: &UserModel, profile: &VisitorProfileModel) -> VisitorDto {
    VisitorDto {
        user_id: user.id,
        hostel_id: profile.hostel_id,
        email: user.email.clone(),
        phone: user.phone.clone(),
        is_active: user.is_active,
        expires_at: profile.expires_at,
        temporary_password: None,
    }
}
