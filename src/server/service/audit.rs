use sea_orm::DatabaseConnection;

use crate::server::data::audit::{AuditRepository, NewAuditEntry};

/// Best-effort audit sink.
///
/// Entries are written after the audited change has committed. A failed write is logged
/// and dropped; it never fails the operation being audited.
pub struct AuditService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuditService<'a> {
    /// Creates a new instance of [`AuditService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record(&self, entry: NewAuditEntry) {
        let entity_type = entry.entity_type;
        let entity_id = entry.entity_id;
        let action = entry.action;

        if let Err(e) = AuditRepository::new(self.db).create(entry).await {
            tracing::warn!(
                entity_type,
                ?entity_id,
                ?action,
                "Failed to write audit entry: {}",
                e
            );
        }
    }
}
