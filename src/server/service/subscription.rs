//! Plan quota enforcement.
//!
//! Every hostel has at most one subscription. A hostel without one is provisioned a TRIAL
//! subscription on the FREE plan the first time any quota is consulted, so quota checks
//! never fail merely because provisioning has not happened yet.
//!
//! Quota checks are advisory admission control: they count rows before the caller
//! inserts, outside the caller's transaction. Concurrent creations at the boundary can
//! overshoot a quota slightly.

use chrono::NaiveDate;
use entity::{
    audit_log::AuditAction, plan::PlanTier, subscription::SubscriptionStatus, user::UserRole,
};
use sea_orm::{ActiveEnum, DatabaseConnection};
use serde_json::json;

use crate::{
    model::subscription::{FeatureUsageDto, UsageDto},
    server::{
        config::PolicyConfig,
        data::{
            audit::NewAuditEntry,
            hostel::HostelRepository,
            plan::PlanRepository,
            room::RoomRepository,
            subscription::{NewSubscription, SubscriptionRepository},
            tenant::TenantRepository,
        },
        error::{resource::NotFoundError, subscription::SubscriptionLimitError, Error},
        model::{
            db::{PlanModel, SubscriptionModel},
            principal::Principal,
        },
        service::{access::AccessControl, audit::AuditService},
        util::time::add_days,
    },
};

pub struct SubscriptionService<'a> {
    db: &'a DatabaseConnection,
    policy: &'a PolicyConfig,
    access: AccessControl,
}

impl<'a> SubscriptionService<'a> {
    /// Creates a new instance of [`SubscriptionService`] evaluating access at the current
    /// time
    pub fn new(db: &'a DatabaseConnection, policy: &'a PolicyConfig) -> Self {
        Self {
            db,
            policy,
            access: AccessControl::new(),
        }
    }

    /// Replaces the access control, used to pin the evaluation time
    ///
    /// Subscriptions started by this service are dated from the same instant.
    pub fn with_access(mut self, access: AccessControl) -> Self {
        self.access = access;
        self
    }

    /// Fails with [`SubscriptionLimitError::Rooms`] when the hostel's live room count has
    /// reached its plan's room cap
    pub async fn check_room_limit(&self, hostel_id: i32) -> Result<(), Error> {
        let Some((_, plan)) = self.ensure_subscription(hostel_id).await? else {
            return Ok(());
        };

        let Some(max) = plan.max_rooms_per_hostel else {
            return Ok(());
        };

        let current = RoomRepository::new(self.db).count(hostel_id).await?;
        if current >= max as u64 {
            return Err(SubscriptionLimitError::Rooms {
                max,
                plan: plan.name,
            }
            .into());
        }

        Ok(())
    }

    /// Fails with [`SubscriptionLimitError::Tenants`] when the hostel's live tenant count
    /// has reached its plan's tenant cap
    pub async fn check_tenant_limit(&self, hostel_id: i32) -> Result<(), Error> {
        let Some((_, plan)) = self.ensure_subscription(hostel_id).await? else {
            return Ok(());
        };

        let Some(max) = plan.max_tenants_per_hostel else {
            return Ok(());
        };

        let current = TenantRepository::new(self.db).count(hostel_id).await?;
        if current >= max as u64 {
            return Err(SubscriptionLimitError::Tenants {
                max,
                plan: plan.name,
            }
            .into());
        }

        Ok(())
    }

    /// Current and maximum room and tenant counts of a hostel
    pub async fn get_feature_usage(
        &self,
        actor: &Principal,
        hostel_id: i32,
    ) -> Result<FeatureUsageDto, Error> {
        self.access
            .require_role(actor, &[UserRole::SuperAdmin, UserRole::HostelAdmin])?;
        self.access.check_hostel_access(actor, hostel_id)?;

        let (subscription, plan) = self
            .ensure_subscription(hostel_id)
            .await?
            .ok_or(NotFoundError::Subscription(hostel_id))?;

        let rooms = RoomRepository::new(self.db).count(hostel_id).await?;
        let tenants = TenantRepository::new(self.db).count(hostel_id).await?;

        Ok(FeatureUsageDto {
            hostel_id,
            plan: plan.name,
            status: subscription.status.to_value(),
            rooms: usage(rooms, plan.max_rooms_per_hostel),
            tenants: usage(tenants, plan.max_tenants_per_hostel),
        })
    }

    pub async fn get_subscription(
        &self,
        hostel_id: i32,
    ) -> Result<(SubscriptionModel, PlanModel), Error> {
        match SubscriptionRepository::new(self.db)
            .find_by_hostel(hostel_id)
            .await?
        {
            Some((subscription, Some(plan))) => Ok((subscription, plan)),
            Some((subscription, None)) => {
                Err(NotFoundError::Plan(subscription.plan_id.to_string()).into())
            }
            None => Err(NotFoundError::Subscription(hostel_id).into()),
        }
    }

    /// Moves a hostel to the active plan of `tier`, creating an ACTIVE subscription if the
    /// hostel has none
    pub async fn assign_plan(
        &self,
        actor: &Principal,
        hostel_id: i32,
        tier: PlanTier,
        end_date: Option<NaiveDate>,
        auto_renew: bool,
    ) -> Result<(SubscriptionModel, PlanModel), Error> {
        self.access.require_role(actor, &[UserRole::SuperAdmin])?;

        self.require_hostel(hostel_id).await?;

        let plan = PlanRepository::new(self.db)
            .find_by_tier(tier)
            .await?
            .ok_or_else(|| NotFoundError::Plan(tier.to_value()))?;

        let subscription_repo = SubscriptionRepository::new(self.db);
        let subscription = || NewSubscription {
            hostel_id,
            plan_id: plan.id,
            status: SubscriptionStatus::Active,
            start_date: self.access.now().date(),
            end_date,
            auto_renew,
        };

        if !subscription_repo.update_plan(subscription()).await? {
            subscription_repo.create_if_absent(subscription()).await?;
        }

        AuditService::new(self.db)
            .record(
                NewAuditEntry::new(AuditAction::Update, "subscription", hostel_id)
                    .by(actor.user_id())
                    .in_hostel(hostel_id)
                    .new_values(json!({ "plan": plan.name, "status": "ACTIVE" })),
            )
            .await;

        self.get_subscription(hostel_id).await
    }

    /// Returns the hostel's subscription and plan, provisioning TRIAL/FREE when absent
    ///
    /// Returns `Ok(None)` only when the FREE plan itself is missing, in which case the
    /// quota cannot be determined and the caller lets the check pass.
    async fn ensure_subscription(
        &self,
        hostel_id: i32,
    ) -> Result<Option<(SubscriptionModel, PlanModel)>, Error> {
        let subscription_repo = SubscriptionRepository::new(self.db);

        if let Some((subscription, plan)) = subscription_repo.find_by_hostel(hostel_id).await? {
            let plan = plan.ok_or_else(|| NotFoundError::Plan(subscription.plan_id.to_string()))?;

            return Ok(Some((subscription, plan)));
        }

        self.require_hostel(hostel_id).await?;

        let Some(free_plan) = PlanRepository::new(self.db)
            .find_by_tier(PlanTier::Free)
            .await?
        else {
            tracing::warn!(hostel_id, "FREE plan missing, skipping quota check");

            return Ok(None);
        };

        let now = self.access.now();
        let end = add_days(now, self.policy.trial_duration_days)?;

        let inserted = subscription_repo
            .create_if_absent(NewSubscription {
                hostel_id,
                plan_id: free_plan.id,
                status: SubscriptionStatus::Trial,
                start_date: now.date(),
                end_date: Some(end.date()),
                auto_renew: false,
            })
            .await?;

        if inserted {
            tracing::info!(hostel_id, "Provisioned TRIAL subscription on FREE plan");
        }

        // Re-read so a concurrent provisioner's row is returned when this insert lost
        match subscription_repo.find_by_hostel(hostel_id).await? {
            Some((subscription, Some(plan))) => Ok(Some((subscription, plan))),
            _ => Err(NotFoundError::Subscription(hostel_id).into()),
        }
    }

    async fn require_hostel(&self, hostel_id: i32) -> Result<(), Error> {
        HostelRepository::new(self.db)
            .find_by_id(hostel_id)
            .await?
            .ok_or(NotFoundError::Hostel(hostel_id))?;

        Ok(())
    }
}

fn usage(current: u64, max: Option<i32>) -> UsageDto {
    let percentage = match max {
        Some(max) if max > 0 => current as f64 * 100.0 / max as f64,
        _ => 0.0,
    };

    UsageDto {
        current,
        max,
        percentage,
    }
}
