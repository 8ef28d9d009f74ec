use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_hostel::Hostel, m20251101_000009_plan::Plan};

static FK_SUBSCRIPTION_HOSTEL_ID: &str = "fk-subscriptions-hostel_id";
static FK_SUBSCRIPTION_PLAN_ID: &str = "fk-subscriptions-plan_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscription::Table)
                    .if_not_exists()
                    .col(pk_auto(Subscription::Id))
                    // One subscription per hostel; provisioning relies on this constraint
                    .col(integer_uniq(Subscription::HostelId))
                    .col(integer(Subscription::PlanId))
                    .col(string_len(Subscription::Status, 20))
                    .col(date(Subscription::StartDate))
                    .col(date_null(Subscription::EndDate))
                    .col(boolean(Subscription::AutoRenew).default(false))
                    .col(timestamp(Subscription::CreatedAt))
                    .col(timestamp(Subscription::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SUBSCRIPTION_HOSTEL_ID)
                            .from(Subscription::Table, Subscription::HostelId)
                            .to(Hostel::Table, Hostel::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SUBSCRIPTION_PLAN_ID)
                            .from(Subscription::Table, Subscription::PlanId)
                            .to(Plan::Table, Plan::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscription::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Subscription {
    #[sea_orm(iden = "subscriptions")]
    Table,
    Id,
    HostelId,
    PlanId,
    Status,
    StartDate,
    EndDate,
    AutoRenew,
    CreatedAt,
    UpdatedAt,
}
