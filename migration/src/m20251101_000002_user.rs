use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_hostel::Hostel;

static IDX_USER_PRIMARY_HOSTEL_ID: &str = "idx-users-primary_hostel_id";
static FK_USER_PRIMARY_HOSTEL_ID: &str = "fk-users-primary_hostel_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_null(User::Email).unique_key())
                    .col(string_null(User::Phone).unique_key())
                    .col(string_null(User::PasswordHash))
                    .col(string_null(User::FullName))
                    .col(string_len(User::Role, 20))
                    .col(integer_null(User::PrimaryHostelId))
                    .col(boolean(User::IsActive).default(true))
                    .col(boolean(User::IsVerified).default(false))
                    .col(timestamp_null(User::LastLogin))
                    .col(boolean(User::IsDeleted).default(false))
                    .col(timestamp_null(User::DeletedAt))
                    .col(timestamp(User::CreatedAt))
                    .col(timestamp(User::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_PRIMARY_HOSTEL_ID)
                    .table(User::Table)
                    .col(User::PrimaryHostelId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_USER_PRIMARY_HOSTEL_ID)
                    .from_tbl(User::Table)
                    .from_col(User::PrimaryHostelId)
                    .to_tbl(Hostel::Table)
                    .to_col(Hostel::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_USER_PRIMARY_HOSTEL_ID)
                    .table(User::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_USER_PRIMARY_HOSTEL_ID)
                    .table(User::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    Phone,
    PasswordHash,
    FullName,
    Role,
    PrimaryHostelId,
    IsActive,
    IsVerified,
    LastLogin,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
