use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_hostel::Hostel, m20251101_000002_user::User};

static IDX_VISITOR_PROFILE_EXPIRES_AT: &str = "idx-visitor_profiles-expires_at";
static FK_VISITOR_PROFILE_USER_ID: &str = "fk-visitor_profiles-user_id";
static FK_VISITOR_PROFILE_HOSTEL_ID: &str = "fk-visitor_profiles-hostel_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VisitorProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(VisitorProfile::Id))
                    .col(integer_uniq(VisitorProfile::UserId))
                    .col(integer(VisitorProfile::HostelId))
                    .col(timestamp(VisitorProfile::ExpiresAt))
                    .col(integer_null(VisitorProfile::CreatedBy))
                    .col(timestamp(VisitorProfile::CreatedAt))
                    .col(timestamp(VisitorProfile::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_VISITOR_PROFILE_USER_ID)
                            .from(VisitorProfile::Table, VisitorProfile::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_VISITOR_PROFILE_HOSTEL_ID)
                            .from(VisitorProfile::Table, VisitorProfile::HostelId)
                            .to(Hostel::Table, Hostel::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_VISITOR_PROFILE_EXPIRES_AT)
                    .table(VisitorProfile::Table)
                    .col(VisitorProfile::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_VISITOR_PROFILE_EXPIRES_AT)
                    .table(VisitorProfile::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(VisitorProfile::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum VisitorProfile {
    #[sea_orm(iden = "visitor_profiles")]
    Table,
    Id,
    UserId,
    HostelId,
    ExpiresAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
