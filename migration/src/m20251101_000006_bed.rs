use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_hostel::Hostel, m20251101_000005_room::Room};

static IDX_BED_ROOM_NUMBER: &str = "idx-beds-room_id-number";
static IDX_BED_HOSTEL_ID: &str = "idx-beds-hostel_id";
static FK_BED_ROOM_ID: &str = "fk-beds-room_id";
static FK_BED_HOSTEL_ID: &str = "fk-beds-hostel_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bed::Table)
                    .if_not_exists()
                    .col(pk_auto(Bed::Id))
                    .col(integer(Bed::RoomId))
                    .col(integer(Bed::HostelId))
                    .col(string_len(Bed::Number, 20))
                    .col(boolean(Bed::IsOccupied).default(false))
                    // FK to tenant_profiles is added once that table exists
                    .col(integer_null(Bed::TenantId))
                    .col(boolean(Bed::IsDeleted).default(false))
                    .col(timestamp_null(Bed::DeletedAt))
                    .col(timestamp(Bed::CreatedAt))
                    .col(timestamp(Bed::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_BED_ROOM_ID)
                            .from(Bed::Table, Bed::RoomId)
                            .to(Room::Table, Room::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_BED_HOSTEL_ID)
                            .from(Bed::Table, Bed::HostelId)
                            .to(Hostel::Table, Hostel::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_BED_ROOM_NUMBER)
                    .table(Bed::Table)
                    .col(Bed::RoomId)
                    .col(Bed::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_BED_HOSTEL_ID)
                    .table(Bed::Table)
                    .col(Bed::HostelId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(IDX_BED_HOSTEL_ID).table(Bed::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name(IDX_BED_ROOM_NUMBER).table(Bed::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Bed::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Bed {
    #[sea_orm(iden = "beds")]
    Table,
    Id,
    RoomId,
    HostelId,
    Number,
    IsOccupied,
    TenantId,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
