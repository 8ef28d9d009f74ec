use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_hostel::Hostel;

static IDX_ROOM_HOSTEL_NUMBER: &str = "idx-rooms-hostel_id-number";
static FK_ROOM_HOSTEL_ID: &str = "fk-rooms-hostel_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Room::Table)
                    .if_not_exists()
                    .col(pk_auto(Room::Id))
                    .col(integer(Room::HostelId))
                    .col(string_len(Room::Number, 20))
                    .col(integer(Room::Floor).default(0))
                    .col(string_len(Room::RoomType, 20))
                    .col(integer(Room::Capacity))
                    .col(text_null(Room::Description))
                    .col(boolean(Room::IsDeleted).default(false))
                    .col(timestamp_null(Room::DeletedAt))
                    .col(timestamp(Room::CreatedAt))
                    .col(timestamp(Room::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ROOM_HOSTEL_ID)
                            .from(Room::Table, Room::HostelId)
                            .to(Hostel::Table, Hostel::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Deleted rooms keep their number so that restore never collides.
        manager
            .create_index(
                Index::create()
                    .name(IDX_ROOM_HOSTEL_NUMBER)
                    .table(Room::Table)
                    .col(Room::HostelId)
                    .col(Room::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ROOM_HOSTEL_NUMBER)
                    .table(Room::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Room::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Room {
    #[sea_orm(iden = "rooms")]
    Table,
    Id,
    HostelId,
    Number,
    Floor,
    RoomType,
    Capacity,
    Description,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
