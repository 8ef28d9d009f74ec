pub use sea_orm_migration::prelude::*;

mod m20251101_000001_hostel;
mod m20251101_000002_user;
mod m20251101_000003_user_hostel;
mod m20251101_000004_visitor_profile;
mod m20251101_000005_room;
mod m20251101_000006_bed;
mod m20251101_000007_tenant_profile;
mod m20251101_000008_check_in_out;
mod m20251101_000009_plan;
mod m20251101_000010_subscription;
mod m20251101_000011_audit_log;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_hostel::Migration),
            Box::new(m20251101_000002_user::Migration),
            Box::new(m20251101_000003_user_hostel::Migration),
            Box::new(m20251101_000004_visitor_profile::Migration),
            Box::new(m20251101_000005_room::Migration),
            Box::new(m20251101_000006_bed::Migration),
            Box::new(m20251101_000007_tenant_profile::Migration),
            Box::new(m20251101_000008_check_in_out::Migration),
            Box::new(m20251101_000009_plan::Migration),
            Box::new(m20251101_000010_subscription::Migration),
            Box::new(m20251101_000011_audit_log::Migration),
        ]
    }
}
