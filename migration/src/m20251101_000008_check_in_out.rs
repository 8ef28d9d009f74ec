use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_hostel::Hostel, m20251101_000006_bed::Bed,
    m20251101_000007_tenant_profile::TenantProfile,
};

static IDX_CHECK_IN_OUT_TENANT_STATUS: &str = "idx-check_in_outs-tenant_id-status";
static FK_CHECK_IN_OUT_TENANT_ID: &str = "fk-check_in_outs-tenant_id";
static FK_CHECK_IN_OUT_BED_ID: &str = "fk-check_in_outs-bed_id";
static FK_CHECK_IN_OUT_HOSTEL_ID: &str = "fk-check_in_outs-hostel_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CheckInOut::Table)
                    .if_not_exists()
                    .col(pk_auto(CheckInOut::Id))
                    .col(integer(CheckInOut::TenantId))
                    .col(integer(CheckInOut::HostelId))
                    .col(integer(CheckInOut::BedId))
                    .col(date(CheckInOut::CheckInDate))
                    .col(date_null(CheckInOut::CheckOutDate))
                    .col(string_len(CheckInOut::Status, 20))
                    .col(text_null(CheckInOut::Notes))
                    .col(timestamp(CheckInOut::CreatedAt))
                    .col(timestamp(CheckInOut::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CHECK_IN_OUT_TENANT_ID)
                            .from(CheckInOut::Table, CheckInOut::TenantId)
                            .to(TenantProfile::Table, TenantProfile::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CHECK_IN_OUT_BED_ID)
                            .from(CheckInOut::Table, CheckInOut::BedId)
                            .to(Bed::Table, Bed::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CHECK_IN_OUT_HOSTEL_ID)
                            .from(CheckInOut::Table, CheckInOut::HostelId)
                            .to(Hostel::Table, Hostel::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHECK_IN_OUT_TENANT_STATUS)
                    .table(CheckInOut::Table)
                    .col(CheckInOut::TenantId)
                    .col(CheckInOut::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CHECK_IN_OUT_TENANT_STATUS)
                    .table(CheckInOut::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CheckInOut::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CheckInOut {
    #[sea_orm(iden = "check_in_outs")]
    Table,
    Id,
    TenantId,
    HostelId,
    BedId,
    CheckInDate,
    CheckOutDate,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}
