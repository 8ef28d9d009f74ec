use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (name, tier, description, max rooms, max tenants, max admins, storage MB)
type PlanSeed = (
    &'static str,
    &'static str,
    &'static str,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    i32,
);

const PLANS: [PlanSeed; 3] = [
    (
        "Free Plan",
        "FREE",
        "Basic plan for small hostels",
        Some(5),
        Some(10),
        Some(1),
        100,
    ),
    (
        "Standard Plan",
        "STANDARD",
        "Professional plan for medium hostels",
        Some(20),
        Some(50),
        Some(3),
        1000,
    ),
    (
        "Premium Plan",
        "PREMIUM",
        "Enterprise plan for large hostels",
        None,
        None,
        None,
        10000,
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Plan::Table)
                    .if_not_exists()
                    .col(pk_auto(Plan::Id))
                    .col(string(Plan::Name))
                    .col(string_len_uniq(Plan::Tier, 20))
                    .col(text_null(Plan::Description))
                    .col(integer_null(Plan::MaxRoomsPerHostel))
                    .col(integer_null(Plan::MaxTenantsPerHostel))
                    .col(integer_null(Plan::MaxAdminsPerHostel))
                    .col(integer_null(Plan::MaxStorageMb))
                    .col(boolean(Plan::IsActive).default(true))
                    .col(timestamp(Plan::CreatedAt))
                    .col(timestamp(Plan::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(Plan::Table).columns([
            Plan::Name,
            Plan::Tier,
            Plan::Description,
            Plan::MaxRoomsPerHostel,
            Plan::MaxTenantsPerHostel,
            Plan::MaxAdminsPerHostel,
            Plan::MaxStorageMb,
            Plan::IsActive,
            Plan::CreatedAt,
            Plan::UpdatedAt,
        ]);

        for (name, tier, description, max_rooms, max_tenants, max_admins, storage) in PLANS {
            insert
                .values([
                    name.into(),
                    tier.into(),
                    description.into(),
                    max_rooms.into(),
                    max_tenants.into(),
                    max_admins.into(),
                    storage.into(),
                    true.into(),
                    Expr::current_timestamp().into(),
                    Expr::current_timestamp().into(),
                ])
                .map_err(|e| DbErr::Migration(format!("Invalid plan seed row: {}", e)))?;
        }

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Plan::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Plan {
    #[sea_orm(iden = "plans")]
    Table,
    Id,
    Name,
    Tier,
    Description,
    MaxRoomsPerHostel,
    MaxTenantsPerHostel,
    MaxAdminsPerHostel,
    MaxStorageMb,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
