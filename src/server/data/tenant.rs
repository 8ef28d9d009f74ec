use chrono::{NaiveDate, Utc};
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::data::soft_delete::{self, SoftDelete};

pub struct NewTenant {
    pub user_id: i32,
    pub hostel_id: i32,
    pub full_name: String,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub emergency_contact: Option<String>,
}

pub struct TenantRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TenantRepository<'a, C> {
    /// Creates a new instance of [`TenantRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, tenant: NewTenant) -> Result<entity::tenant_profile::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::TenantProfile::insert(entity::tenant_profile::ActiveModel {
            user_id: ActiveValue::Set(tenant.user_id),
            hostel_id: ActiveValue::Set(tenant.hostel_id),
            full_name: ActiveValue::Set(tenant.full_name),
            guardian_name: ActiveValue::Set(tenant.guardian_name),
            guardian_phone: ActiveValue::Set(tenant.guardian_phone),
            emergency_contact: ActiveValue::Set(tenant.emergency_contact),
            current_bed_id: ActiveValue::Set(None),
            check_in_date: ActiveValue::Set(None),
            check_out_date: ActiveValue::Set(None),
            is_deleted: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Finds a tenant profile that is not soft-deleted
    pub async fn find_by_id(
        &self,
        tenant_id: i32,
    ) -> Result<Option<entity::tenant_profile::Model>, DbErr> {
        entity::prelude::TenantProfile::find_active()
            .filter(entity::tenant_profile::Column::Id.eq(tenant_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_id_with_deleted(
        &self,
        tenant_id: i32,
    ) -> Result<Option<entity::tenant_profile::Model>, DbErr> {
        entity::prelude::TenantProfile::find_by_id(tenant_id)
            .one(self.db)
            .await
    }

    /// Profile of a user, deleted profiles included since the link is one-to-one
    pub async fn find_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::tenant_profile::Model>, DbErr> {
        entity::prelude::TenantProfile::find()
            .filter(entity::tenant_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn list(&self, hostel_id: i32) -> Result<Vec<entity::tenant_profile::Model>, DbErr> {
        entity::prelude::TenantProfile::find_active()
            .filter(entity::tenant_profile::Column::HostelId.eq(hostel_id))
            .order_by_asc(entity::tenant_profile::Column::FullName)
            .all(self.db)
            .await
    }

    /// Counts the live tenants of a hostel
    pub async fn count(&self, hostel_id: i32) -> Result<u64, DbErr> {
        entity::prelude::TenantProfile::find_active()
            .filter(entity::tenant_profile::Column::HostelId.eq(hostel_id))
            .count(self.db)
            .await
    }

    /// Points the tenant at `bed_id` if the tenant is live and holds no bed
    pub async fn attach_bed(&self, tenant_id: i32, bed_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::TenantProfile::update_many()
            .col_expr(
                entity::tenant_profile::Column::CurrentBedId,
                Expr::value(Some(bed_id)),
            )
            .col_expr(
                entity::tenant_profile::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::tenant_profile::Column::Id.eq(tenant_id))
            .filter(entity::tenant_profile::Column::CurrentBedId.is_null())
            .filter(entity::tenant_profile::Column::IsDeleted.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Clears the tenant's bed if it still points at `bed_id`
    ///
    /// A `check_out_date` is recorded alongside when given.
    pub async fn detach_bed(
        &self,
        tenant_id: i32,
        bed_id: i32,
        check_out_date: Option<NaiveDate>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::TenantProfile::update_many()
            .col_expr(
                entity::tenant_profile::Column::CurrentBedId,
                Expr::value(Option::<i32>::None),
            )
            .col_expr(
                entity::tenant_profile::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            );

        if let Some(check_out_date) = check_out_date {
            query = query.col_expr(
                entity::tenant_profile::Column::CheckOutDate,
                Expr::value(Some(check_out_date)),
            );
        }

        let result = query
            .filter(entity::tenant_profile::Column::Id.eq(tenant_id))
            .filter(entity::tenant_profile::Column::CurrentBedId.eq(bed_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Starts a stay on the tenant's current bed: sets the check-in date and clears the
    /// previous check-out date
    ///
    /// Returns `false` without writing when the tenant no longer holds `bed_id` or a stay is
    /// already open, so two concurrent check-ins record only one stay.
    pub async fn record_check_in(
        &self,
        tenant_id: i32,
        bed_id: i32,
        check_in_date: NaiveDate,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::TenantProfile::update_many()
            .col_expr(
                entity::tenant_profile::Column::CheckInDate,
                Expr::value(Some(check_in_date)),
            )
            .col_expr(
                entity::tenant_profile::Column::CheckOutDate,
                Expr::value(Option::<NaiveDate>::None),
            )
            .col_expr(
                entity::tenant_profile::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::tenant_profile::Column::Id.eq(tenant_id))
            .filter(entity::tenant_profile::Column::CurrentBedId.eq(bed_id))
            .filter(
                Condition::any()
                    .add(entity::tenant_profile::Column::CheckInDate.is_null())
                    .add(entity::tenant_profile::Column::CheckOutDate.is_not_null()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Soft deletes the tenant only while no bed is held
    pub async fn soft_delete_without_bed(&self, tenant_id: i32) -> Result<bool, DbErr> {
        soft_delete::soft_delete::<entity::prelude::TenantProfile, _>(
            self.db,
            tenant_id,
            Utc::now().naive_utc(),
            Some(Condition::all().add(entity::tenant_profile::Column::CurrentBedId.is_null())),
        )
        .await
    }

    pub async fn restore(&self, tenant_id: i32) -> Result<bool, DbErr> {
        soft_delete::restore::<entity::prelude::TenantProfile, _>(
            self.db,
            tenant_id,
            Utc::now().naive_utc(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use hostel_test_utils::prelude::*;

    use super::*;

    mod attach_bed {
        use super::*;

        /// Expect false when the tenant already holds a bed
        #[tokio::test]
        async fn refuses_tenant_with_bed() -> Result<(), TestError> {
            let mut test = TestBuilder::new()
                .with_core_tables()
                .with_hostel("H1")
                .build()
                .await?;
            let room = test.occupancy().insert_room(1, "101", 2).await?;
            let first = test.occupancy().insert_bed(&room, "A").await?;
            let second = test.occupancy().insert_bed(&room, "B").await?;
            let tenant = test.occupancy().insert_tenant(1).await?;

            let repo = TenantRepository::new(&test.db);

            assert!(repo.attach_bed(tenant.id, first.id).await?);
            assert!(!repo.attach_bed(tenant.id, second.id).await?);
            let stored = repo.find_by_id(tenant.id).await?.unwrap();
            assert_eq!(stored.current_bed_id, Some(first.id));

            Ok(())
        }
    }

    mod detach_bed {
        use super::*;

        /// Expect the bed to be cleared and the check-out date recorded
        #[tokio::test]
        async fn clears_bed_and_records_check_out() -> Result<(), TestError> {
            let mut test = TestBuilder::new()
                .with_core_tables()
                .with_hostel("H1")
                .build()
                .await?;
            let room = test.occupancy().insert_room(1, "101", 2).await?;
            let bed = test.occupancy().insert_bed(&room, "A").await?;
            let tenant = test.occupancy().insert_tenant(1).await?;
            test.occupancy().occupy_bed(&bed, &tenant).await?;
            let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

            let repo = TenantRepository::new(&test.db);
            let detached = repo.detach_bed(tenant.id, bed.id, Some(date)).await?;

            assert!(detached);
            let stored = repo.find_by_id(tenant.id).await?.unwrap();
            assert_eq!(stored.current_bed_id, None);
            assert_eq!(stored.check_out_date, Some(date));

            Ok(())
        }

        /// Expect false when the tenant points at a different bed
        #[tokio::test]
        async fn refuses_mismatched_bed() -> Result<(), TestError> {
            let mut test = TestBuilder::new()
                .with_core_tables()
                .with_hostel("H1")
                .build()
                .await?;
            let room = test.occupancy().insert_room(1, "101", 2).await?;
            let held = test.occupancy().insert_bed(&room, "A").await?;
            let other = test.occupancy().insert_bed(&room, "B").await?;
            let tenant = test.occupancy().insert_tenant(1).await?;
            test.occupancy().occupy_bed(&held, &tenant).await?;

            let repo = TenantRepository::new(&test.db);
            let detached = repo.detach_bed(tenant.id, other.id, None).await?;

            assert!(!detached);

            Ok(())
        }
    }

    mod record_check_in {
        use super::*;

        /// Expect one stay start per bed link and a fresh start after check-out
        #[tokio::test]
        async fn starts_stay_once() -> Result<(), TestError> {
            let mut test = TestBuilder::new()
                .with_core_tables()
                .with_hostel("H1")
                .build()
                .await?;
            let room = test.occupancy().insert_room(1, "101", 2).await?;
            let bed = test.occupancy().insert_bed(&room, "A").await?;
            let tenant = test.occupancy().insert_tenant(1).await?;
            test.occupancy().occupy_bed(&bed, &tenant).await?;
            let first = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
            let second = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();

            let repo = TenantRepository::new(&test.db);

            assert!(repo.record_check_in(tenant.id, bed.id, first).await?);
            assert!(!repo.record_check_in(tenant.id, bed.id, second).await?);
            let stored = repo.find_by_id(tenant.id).await?.unwrap();
            assert_eq!(stored.check_in_date, Some(first));

            Ok(())
        }

        /// Expect false when the tenant does not hold the bed
        #[tokio::test]
        async fn refuses_unheld_bed() -> Result<(), TestError> {
            let mut test = TestBuilder::new()
                .with_core_tables()
                .with_hostel("H1")
                .build()
                .await?;
            let room = test.occupancy().insert_room(1, "101", 2).await?;
            let bed = test.occupancy().insert_bed(&room, "A").await?;
            let tenant = test.occupancy().insert_tenant(1).await?;
            let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

            let repo = TenantRepository::new(&test.db);

            assert!(!repo.record_check_in(tenant.id, bed.id, date).await?);

            Ok(())
        }
    }

    mod soft_delete_without_bed {
        use super::*;

        /// Expect a tenant holding a bed to survive deletion
        #[tokio::test]
        async fn refuses_tenant_with_bed() -> Result<(), TestError> {
            let mut test = TestBuilder::new()
                .with_core_tables()
                .with_hostel("H1")
                .build()
                .await?;
            let room = test.occupancy().insert_room(1, "101", 2).await?;
            let bed = test.occupancy().insert_bed(&room, "A").await?;
            let tenant = test.occupancy().insert_tenant(1).await?;
            test.occupancy().occupy_bed(&bed, &tenant).await?;

            let repo = TenantRepository::new(&test.db);

            assert!(!repo.soft_delete_without_bed(tenant.id).await?);
            assert_eq!(repo.count(1).await?, 1);

            Ok(())
        }
    }
}
