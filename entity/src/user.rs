use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[sea_orm(string_value = "SUPER_ADMIN")]
    SuperAdmin,
    #[sea_orm(string_value = "HOSTEL_ADMIN")]
    HostelAdmin,
    #[sea_orm(string_value = "TENANT")]
    Tenant,
    #[sea_orm(string_value = "VISITOR")]
    Visitor,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: Option<String>,
    #[sea_orm(unique)]
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub primary_hostel_id: Option<i32>,
    pub is_active: bool,
    pub is_verified: bool,
    pub last_login: Option<DateTime>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hostel::Entity",
        from = "Column::PrimaryHostelId",
        to = "super::hostel::Column::Id"
    )]
    PrimaryHostel,
    #[sea_orm(has_one = "super::visitor_profile::Entity")]
    VisitorProfile,
    #[sea_orm(has_one = "super::tenant_profile::Entity")]
    TenantProfile,
}

impl Related<super::visitor_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VisitorProfile.def()
    }
}

impl Related<super::tenant_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TenantProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
