use chrono::{NaiveDate, Utc};
use entity::check_in_out::StayStatus;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct CheckInOutRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CheckInOutRepository<'a, C> {
    /// Creates a new instance of [`CheckInOutRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Opens a CHECKED_IN stay record
    pub async fn create(
        &self,
        tenant: &entity::tenant_profile::Model,
        bed_id: i32,
        check_in_date: NaiveDate,
    ) -> Result<entity::check_in_out::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::CheckInOut::insert(entity::check_in_out::ActiveModel {
            tenant_id: ActiveValue::Set(tenant.id),
            hostel_id: ActiveValue::Set(tenant.hostel_id),
            bed_id: ActiveValue::Set(bed_id),
            check_in_date: ActiveValue::Set(check_in_date),
            check_out_date: ActiveValue::Set(None),
            status: ActiveValue::Set(StayStatus::CheckedIn),
            notes: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Latest open stay of a tenant, optionally restricted to one bed
    pub async fn find_active(
        &self,
        tenant_id: i32,
        bed_id: Option<i32>,
    ) -> Result<Option<entity::check_in_out::Model>, DbErr> {
        let mut query = entity::prelude::CheckInOut::find()
            .filter(entity::check_in_out::Column::TenantId.eq(tenant_id))
            .filter(entity::check_in_out::Column::Status.eq(StayStatus::CheckedIn));

        if let Some(bed_id) = bed_id {
            query = query.filter(entity::check_in_out::Column::BedId.eq(bed_id));
        }

        query
            .order_by_desc(entity::check_in_out::Column::Id)
            .one(self.db)
            .await
    }

    /// Closes an open stay, returning `false` if it was already closed
    pub async fn close(
        &self,
        record_id: i32,
        check_out_date: NaiveDate,
        notes: Option<String>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::CheckInOut::update_many()
            .col_expr(
                entity::check_in_out::Column::Status,
                Expr::value(StayStatus::CheckedOut),
            )
            .col_expr(
                entity::check_in_out::Column::CheckOutDate,
                Expr::value(Some(check_out_date)),
            )
            .col_expr(
                entity::check_in_out::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            );

        if notes.is_some() {
            query = query.col_expr(entity::check_in_out::Column::Notes, Expr::value(notes));
        }

        let result = query
            .filter(entity::check_in_out::Column::Id.eq(record_id))
            .filter(entity::check_in_out::Column::Status.eq(StayStatus::CheckedIn))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Stay history of a tenant, newest first
    pub async fn list_for_tenant(
        &self,
        tenant_id: i32,
    ) -> Result<Vec<entity::check_in_out::Model>, DbErr> {
        entity::prelude::CheckInOut::find()
            .filter(entity::check_in_out::Column::TenantId.eq(tenant_id))
            .order_by_desc(entity::check_in_out::Column::Id)
            .all(self.db)
            .await
    }
}
