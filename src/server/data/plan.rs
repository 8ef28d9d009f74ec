use entity::plan::PlanTier;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub struct PlanRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PlanRepository<'a, C> {
    /// Creates a new instance of [`PlanRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, plan_id: i32) -> Result<Option<entity::plan::Model>, DbErr> {
        entity::prelude::Plan::find_by_id(plan_id).one(self.db).await
    }

    /// Finds the active plan of a tier
    pub async fn find_by_tier(&self, tier: PlanTier) -> Result<Option<entity::plan::Model>, DbErr> {
        entity::prelude::Plan::find()
            .filter(entity::plan::Column::Tier.eq(tier))
            .filter(entity::plan::Column::IsActive.eq(true))
            .one(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use entity::prelude::Plan;
    use hostel_test_utils::prelude::*;

    use super::*;

    /// Expect the seeded FREE plan to carry its limits
    #[tokio::test]
    async fn finds_seeded_free_plan() -> Result<(), TestError> {
        let test = TestBuilder::new().with_table(Plan).with_plans().build().await?;

        let repo = PlanRepository::new(&test.db);
        let plan = repo.find_by_tier(PlanTier::Free).await?.unwrap();

        assert_eq!(plan.max_rooms_per_hostel, Some(5));
        assert_eq!(plan.max_tenants_per_hostel, Some(10));

        Ok(())
    }

    /// Expect Ok(None) when no plans are seeded
    #[tokio::test]
    async fn returns_none_without_plans() -> Result<(), TestError> {
        let test = TestBuilder::new().with_table(Plan).build().await?;

        let repo = PlanRepository::new(&test.db);
        let plan = repo.find_by_tier(PlanTier::Premium).await?;

        assert!(plan.is_none());

        Ok(())
    }
}
