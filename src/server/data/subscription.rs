use chrono::{NaiveDate, Utc};
use entity::subscription::SubscriptionStatus;
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct NewSubscription {
    pub hostel_id: i32,
    pub plan_id: i32,
    pub status: SubscriptionStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub auto_renew: bool,
}

pub struct SubscriptionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubscriptionRepository<'a, C> {
    /// Creates a new instance of [`SubscriptionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Subscription of a hostel together with its plan
    pub async fn find_by_hostel(
        &self,
        hostel_id: i32,
    ) -> Result<Option<(entity::subscription::Model, Option<entity::plan::Model>)>, DbErr> {
        entity::prelude::Subscription::find()
            .filter(entity::subscription::Column::HostelId.eq(hostel_id))
            .find_also_related(entity::plan::Entity)
            .one(self.db)
            .await
    }

    /// Inserts a subscription unless the hostel already has one
    ///
    /// Concurrent callers are serialized by the unique `hostel_id` constraint, so at most
    /// one row is ever written. Returns `true` if this call inserted it.
    pub async fn create_if_absent(&self, subscription: NewSubscription) -> Result<bool, DbErr> {
        let now = Utc::now().naive_utc();

        let rows = entity::prelude::Subscription::insert(entity::subscription::ActiveModel {
            hostel_id: ActiveValue::Set(subscription.hostel_id),
            plan_id: ActiveValue::Set(subscription.plan_id),
            status: ActiveValue::Set(subscription.status),
            start_date: ActiveValue::Set(subscription.start_date),
            end_date: ActiveValue::Set(subscription.end_date),
            auto_renew: ActiveValue::Set(subscription.auto_renew),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::subscription::Column::HostelId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(rows == 1)
    }

    /// Moves an existing subscription to another plan, returning `false` if none exists
    pub async fn update_plan(&self, subscription: NewSubscription) -> Result<bool, DbErr> {
        let result = entity::prelude::Subscription::update_many()
            .col_expr(
                entity::subscription::Column::PlanId,
                Expr::value(subscription.plan_id),
            )
            .col_expr(
                entity::subscription::Column::Status,
                Expr::value(subscription.status),
            )
            .col_expr(
                entity::subscription::Column::StartDate,
                Expr::value(subscription.start_date),
            )
            .col_expr(
                entity::subscription::Column::EndDate,
                Expr::value(subscription.end_date),
            )
            .col_expr(
                entity::subscription::Column::AutoRenew,
                Expr::value(subscription.auto_renew),
            )
            .col_expr(
                entity::subscription::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::subscription::Column::HostelId.eq(subscription.hostel_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
