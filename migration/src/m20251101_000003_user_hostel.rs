use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_hostel::Hostel, m20251101_000002_user::User};

static PK_USER_HOSTEL: &str = "pk-user_hostels";
static FK_USER_HOSTEL_USER_ID: &str = "fk-user_hostels-user_id";
static FK_USER_HOSTEL_HOSTEL_ID: &str = "fk-user_hostels-hostel_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserHostel::Table)
                    .if_not_exists()
                    .col(integer(UserHostel::UserId))
                    .col(integer(UserHostel::HostelId))
                    .col(timestamp(UserHostel::CreatedAt))
                    .primary_key(
                        Index::create()
                            .name(PK_USER_HOSTEL)
                            .col(UserHostel::UserId)
                            .col(UserHostel::HostelId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_HOSTEL_USER_ID)
                            .from(UserHostel::Table, UserHostel::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_HOSTEL_HOSTEL_ID)
                            .from(UserHostel::Table, UserHostel::HostelId)
                            .to(Hostel::Table, Hostel::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserHostel::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum UserHostel {
    #[sea_orm(iden = "user_hostels")]
    Table,
    UserId,
    HostelId,
    CreatedAt,
}
