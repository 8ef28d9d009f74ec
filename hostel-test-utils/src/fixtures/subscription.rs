use chrono::Utc;
use entity::{plan::PlanTier, subscription::SubscriptionStatus};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn subscription<'a>(&'a mut self) -> SubscriptionFixtures<'a> {
        SubscriptionFixtures { setup: self }
    }
}

pub struct SubscriptionFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> SubscriptionFixtures<'a> {
    /// Insert the three plans with the same limits the seed migration uses.
    pub async fn insert_default_plans(&self) -> Result<Vec<entity::plan::Model>, TestError> {
        Ok(vec![
            self.insert_plan(PlanTier::Free, "Free Plan", Some(5), Some(10))
                .await?,
            self.insert_plan(PlanTier::Standard, "Standard Plan", Some(20), Some(50))
                .await?,
            self.insert_plan(PlanTier::Premium, "Premium Plan", None, None)
                .await?,
        ])
    }

    pub async fn insert_plan(
        &self,
        tier: PlanTier,
        name: &str,
        max_rooms_per_hostel: Option<i32>,
        max_tenants_per_hostel: Option<i32>,
    ) -> Result<entity::plan::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Plan::insert(entity::plan::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                tier: ActiveValue::Set(tier),
                description: ActiveValue::Set(None),
                max_rooms_per_hostel: ActiveValue::Set(max_rooms_per_hostel),
                max_tenants_per_hostel: ActiveValue::Set(max_tenants_per_hostel),
                max_admins_per_hostel: ActiveValue::Set(None),
                max_storage_mb: ActiveValue::Set(None),
                is_active: ActiveValue::Set(true),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_subscription(
        &self,
        hostel_id: i32,
        plan_id: i32,
        status: SubscriptionStatus,
    ) -> Result<entity::subscription::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Subscription::insert(entity::subscription::ActiveModel {
                hostel_id: ActiveValue::Set(hostel_id),
                plan_id: ActiveValue::Set(plan_id),
                status: ActiveValue::Set(status),
                start_date: ActiveValue::Set(now.date()),
                end_date: ActiveValue::Set(None),
                auto_renew: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
