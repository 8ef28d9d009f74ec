use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_hostel::Hostel, m20251101_000002_user::User, m20251101_000006_bed::Bed,
};

static IDX_TENANT_PROFILE_HOSTEL_ID: &str = "idx-tenant_profiles-hostel_id";
static FK_TENANT_PROFILE_USER_ID: &str = "fk-tenant_profiles-user_id";
static FK_TENANT_PROFILE_HOSTEL_ID: &str = "fk-tenant_profiles-hostel_id";
static FK_TENANT_PROFILE_CURRENT_BED_ID: &str = "fk-tenant_profiles-current_bed_id";
static FK_BED_TENANT_ID: &str = "fk-beds-tenant_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TenantProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(TenantProfile::Id))
                    .col(integer_uniq(TenantProfile::UserId))
                    .col(integer(TenantProfile::HostelId))
                    .col(string(TenantProfile::FullName))
                    .col(string_null(TenantProfile::GuardianName))
                    .col(string_null(TenantProfile::GuardianPhone))
                    .col(string_null(TenantProfile::EmergencyContact))
                    .col(integer_null(TenantProfile::CurrentBedId))
                    .col(date_null(TenantProfile::CheckInDate))
                    .col(date_null(TenantProfile::CheckOutDate))
                    .col(boolean(TenantProfile::IsDeleted).default(false))
                    .col(timestamp_null(TenantProfile::DeletedAt))
                    .col(timestamp(TenantProfile::CreatedAt))
                    .col(timestamp(TenantProfile::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TENANT_PROFILE_USER_ID)
                            .from(TenantProfile::Table, TenantProfile::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TENANT_PROFILE_HOSTEL_ID)
                            .from(TenantProfile::Table, TenantProfile::HostelId)
                            .to(Hostel::Table, Hostel::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TENANT_PROFILE_CURRENT_BED_ID)
                            .from(TenantProfile::Table, TenantProfile::CurrentBedId)
                            .to(Bed::Table, Bed::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TENANT_PROFILE_HOSTEL_ID)
                    .table(TenantProfile::Table)
                    .col(TenantProfile::HostelId)
                    .to_owned(),
            )
            .await?;

        // Closes the bed <-> tenant cycle now that both tables exist
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_BED_TENANT_ID)
                    .from_tbl(Bed::Table)
                    .from_col(Bed::TenantId)
                    .to_tbl(TenantProfile::Table)
                    .to_col(TenantProfile::Id)
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
                    .name(FK_BED_TENANT_ID)
                    .table(Bed::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TENANT_PROFILE_HOSTEL_ID)
                    .table(TenantProfile::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TenantProfile::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TenantProfile {
    #[sea_orm(iden = "tenant_profiles")]
    Table,
    Id,
    UserId,
    HostelId,
    FullName,
    GuardianName,
    GuardianPhone,
    EmergencyContact,
    CurrentBedId,
    CheckInDate,
    CheckOutDate,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
