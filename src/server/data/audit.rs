use chrono::Utc;
use entity::audit_log::AuditAction;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JsonValue, QueryFilter,
    QueryOrder,
};

/// An audit entry before it is written.
pub struct NewAuditEntry {
    pub user_id: Option<i32>,
    pub hostel_id: Option<i32>,
    pub entity_type: &'static str,
    pub entity_id: Option<i32>,
    pub action: AuditAction,
    pub old_values: Option<JsonValue>,
    pub new_values: Option<JsonValue>,
}

impl NewAuditEntry {
    pub fn new(action: AuditAction, entity_type: &'static str, entity_id: i32) -> Self {
        Self {
            user_id: None,
            hostel_id: None,
            entity_type,
            entity_id: Some(entity_id),
            action,
            old_values: None,
            new_values: None,
        }
    }

    /// Acting user; `None` marks a system action
    pub fn by(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn in_hostel(mut self, hostel_id: i32) -> Self {
        self.hostel_id = Some(hostel_id);
        self
    }

    pub fn old_values(mut self, values: JsonValue) -> Self {
        self.old_values = Some(values);
        self
    }

    pub fn new_values(mut self, values: JsonValue) -> Self {
        self.new_values = Some(values);
        self
    }
}

/// Append-only access to the audit log. There is deliberately no update or delete.
pub struct AuditRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuditRepository<'a, C> {
    /// Creates a new instance of [`AuditRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, entry: NewAuditEntry) -> Result<entity::audit_log::Model, DbErr> {
        entity::prelude::AuditLog::insert(entity::audit_log::ActiveModel {
            user_id: ActiveValue::Set(entry.user_id),
            hostel_id: ActiveValue::Set(entry.hostel_id),
            entity_type: ActiveValue::Set(entry.entity_type.to_string()),
            entity_id: ActiveValue::Set(entry.entity_id),
            action: ActiveValue::Set(entry.action),
            old_values: ActiveValue::Set(entry.old_values),
            new_values: ActiveValue::Set(entry.new_values),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Entries for one entity, oldest first
    pub async fn list_for_entity(
        &self,
        entity_type: &str,
        entity_id: i32,
    ) -> Result<Vec<entity::audit_log::Model>, DbErr> {
        entity::prelude::AuditLog::find()
            .filter(entity::audit_log::Column::EntityType.eq(entity_type))
            .filter(entity::audit_log::Column::EntityId.eq(entity_id))
            .order_by_asc(entity::audit_log::Column::Id)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use entity::prelude::AuditLog;
    use hostel_test_utils::prelude::*;
    use serde_json::json;

    use super::*;

    /// Expect entries to be returned for their entity only
    #[tokio::test]
    async fn lists_entries_for_entity() -> Result<(), TestError> {
        let test = TestBuilder::new().with_table(AuditLog).build().await?;

        let repo = AuditRepository::new(&test.db);
        for entity_id in [1, 1, 2] {
            repo.create(NewAuditEntry {
                user_id: None,
                hostel_id: Some(1),
                entity_type: "room",
                entity_id: Some(entity_id),
                action: AuditAction::Create,
                old_values: None,
                new_values: Some(json!({ "number": "101" })),
            })
            .await?;
        }

        let entries = repo.list_for_entity("room", 1).await?;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].new_values, Some(json!({ "number": "101" })));

        Ok(())
    }
}
