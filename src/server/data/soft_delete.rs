//! Soft delete capability shared by hostels, users, rooms, beds and tenant profiles.
//!
//! Rows are never removed. Deleting sets `is_deleted` and `deleted_at`; restoring clears
//! both. Both writes are conditional updates so a concurrent delete and restore of the
//! same row cannot both succeed.

use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    Select,
};

/// Entity with `is_deleted` / `deleted_at` columns.
pub trait SoftDelete: EntityTrait {
    fn id_column() -> Self::Column;

    fn is_deleted_column() -> Self::Column;

    fn deleted_at_column() -> Self::Column;

    fn updated_at_column() -> Self::Column;

    /// Select excluding soft-deleted rows
    fn find_active() -> Select<Self> {
        Self::find().filter(Self::is_deleted_column().eq(false))
    }
}

/// Model-level view of the soft delete columns.
pub trait Deletable {
    fn is_deleted(&self) -> bool;

    fn deleted_at(&self) -> Option<NaiveDateTime>;
}

macro_rules! impl_soft_delete {
    ($($module:ident),* $(,)?) => {
        $(
            impl SoftDelete for entity::$module::Entity {
                fn id_column() -> Self::Column {
                    entity::$module::Column::Id
                }

                fn is_deleted_column() -> Self::Column {
                    entity::$module::Column::IsDeleted
                }

                fn deleted_at_column() -> Self::Column {
                    entity::$module::Column::DeletedAt
                }

                fn updated_at_column() -> Self::Column {
                    entity::$module::Column::UpdatedAt
                }
            }

            impl Deletable for entity::$module::Model {
                fn is_deleted(&self) -> bool {
                    self.is_deleted
                }

                fn deleted_at(&self) -> Option<NaiveDateTime> {
                    self.deleted_at
                }
            }
        )*
    };
}

impl_soft_delete!(hostel, user, room, bed, tenant_profile);

/// Marks a live row as deleted at `deleted_at`.
///
/// `guard` adds conditions the row must still satisfy at write time, such as a bed being
/// vacant. Returns `false` when the row is missing, already deleted or fails the guard.
pub async fn soft_delete<E, C>(
    db: &C,
    id: i32,
    deleted_at: NaiveDateTime,
    guard: Option<Condition>,
) -> Result<bool, DbErr>
where
    E: SoftDelete,
    C: ConnectionTrait,
{
    let mut query = E::update_many()
        .col_expr(E::is_deleted_column(), Expr::value(true))
        .col_expr(E::deleted_at_column(), Expr::value(Some(deleted_at)))
        .col_expr(E::updated_at_column(), Expr::value(deleted_at))
        .filter(E::id_column().eq(id))
        .filter(E::is_deleted_column().eq(false));

    if let Some(guard) = guard {
        query = query.filter(guard);
    }

    let result = query.exec(db).await?;

    Ok(result.rows_affected == 1)
}

/// Clears the deletion markers of a deleted row.
///
/// Returns `false` when the row is missing or not deleted.
pub async fn restore<E, C>(db: &C, id: i32, restored_at: NaiveDateTime) -> Result<bool, DbErr>
where
    E: SoftDelete,
    C: ConnectionTrait,
{
    let result = E::update_many()
        .col_expr(E::is_deleted_column(), Expr::value(false))
        .col_expr(
            E::deleted_at_column(),
            Expr::value(Option::<NaiveDateTime>::None),
        )
        .col_expr(E::updated_at_column(), Expr::value(restored_at))
        .filter(E::id_column().eq(id))
        .filter(E::is_deleted_column().eq(true))
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}
