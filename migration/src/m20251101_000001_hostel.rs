use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hostel::Table)
                    .if_not_exists()
                    .col(pk_auto(Hostel::Id))
                    .col(string(Hostel::Name))
                    .col(string_uniq(Hostel::Code))
                    .col(string_null(Hostel::Address))
                    .col(string_null(Hostel::City))
                    .col(string_null(Hostel::Phone))
                    .col(string_null(Hostel::Email))
                    .col(boolean(Hostel::IsActive).default(true))
                    .col(boolean(Hostel::IsDeleted).default(false))
                    .col(timestamp_null(Hostel::DeletedAt))
                    .col(timestamp(Hostel::CreatedAt))
                    .col(timestamp(Hostel::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Hostel::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Hostel {
    #[sea_orm(iden = "hostels")]
    Table,
    Id,
    Name,
    Code,
    Address,
    City,
    Phone,
    Email,
    IsActive,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
