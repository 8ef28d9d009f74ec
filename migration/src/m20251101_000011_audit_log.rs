use sea_orm_migration::{prelude::*, schema::*};

static IDX_AUDIT_LOG_HOSTEL_ID: &str = "idx-audit_logs-hostel_id";
static IDX_AUDIT_LOG_ENTITY: &str = "idx-audit_logs-entity_type-entity_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign keys: entries outlive the rows they describe.
        manager
            .create_table(
                Table::create()
                    .table(AuditLog::Table)
                    .if_not_exists()
                    .col(pk_auto(AuditLog::Id))
                    .col(integer_null(AuditLog::UserId))
                    .col(integer_null(AuditLog::HostelId))
                    .col(string_len(AuditLog::EntityType, 50))
                    .col(integer_null(AuditLog::EntityId))
                    .col(string_len(AuditLog::Action, 20))
                    .col(json_null(AuditLog::OldValues))
                    .col(json_null(AuditLog::NewValues))
                    .col(timestamp(AuditLog::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AUDIT_LOG_HOSTEL_ID)
                    .table(AuditLog::Table)
                    .col(AuditLog::HostelId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AUDIT_LOG_ENTITY)
                    .table(AuditLog::Table)
                    .col(AuditLog::EntityType)
                    .col(AuditLog::EntityId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_AUDIT_LOG_ENTITY)
                    .table(AuditLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_AUDIT_LOG_HOSTEL_ID)
                    .table(AuditLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AuditLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AuditLog {
    #[sea_orm(iden = "audit_logs")]
    Table,
    Id,
    UserId,
    HostelId,
    EntityType,
    EntityId,
    Action,
    OldValues,
    NewValues,
    CreatedAt,
}
