use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRoomDto {
    pub hostel_id: i32,
    pub number: String,
    #[serde(default)]
    pub floor: i32,
    /// One of `SINGLE`, `DOUBLE`, `TRIPLE`, `DORMITORY`
    pub room_type: String,
    pub capacity: i32,
    pub description: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub hostel_id: i32,
    pub number: String,
    pub floor: i32,
    pub room_type: String,
    pub capacity: i32,
    pub description: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<NaiveDateTime>,
}

impl From<entity::room::Model> for RoomDto {
    fn from(room: entity::room::Model) -> Self {
        Self {
            id: room.id,
            hostel_id: room.hostel_id,
            number: room.number,
            floor: room.floor,
            room_type: room.room_type.to_value(),
            capacity: room.capacity,
            description: room.description,
            is_deleted: room.is_deleted,
            deleted_at: room.deleted_at,
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateBedDto {
    pub room_id: i32,
    pub number: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AssignBedDto {
    pub tenant_id: i32,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BedDto {
    pub id: i32,
    pub room_id: i32,
    pub hostel_id: i32,
    pub number: String,
    pub is_occupied: bool,
    pub tenant_id: Option<i32>,
    pub is_deleted: bool,
}

impl From<entity::bed::Model> for BedDto {
    fn from(bed: entity::bed::Model) -> Self {
        Self {
            id: bed.id,
            room_id: bed.room_id,
            hostel_id: bed.hostel_id,
            number: bed.number,
            is_occupied: bed.is_occupied,
            tenant_id: bed.tenant_id,
            is_deleted: bed.is_deleted,
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CheckInDto {
    pub bed_id: i32,
    pub check_in_date: NaiveDate,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CheckOutDto {
    pub check_out_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TenantDto {
    pub id: i32,
    pub user_id: i32,
    pub hostel_id: i32,
    pub full_name: String,
    pub current_bed_id: Option<i32>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
}

impl From<entity::tenant_profile::Model> for TenantDto {
    fn from(tenant: entity::tenant_profile::Model) -> Self {
        Self {
            id: tenant.id,
            user_id: tenant.user_id,
            hostel_id: tenant.hostel_id,
            full_name: tenant.full_name,
            current_bed_id: tenant.current_bed_id,
            check_in_date: tenant.check_in_date,
            check_out_date: tenant.check_out_date,
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTenantDto {
    pub user_id: i32,
    pub hostel_id: i32,
    pub full_name: String,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub emergency_contact: Option<String>,
}

/// One check-in/check-out record of a tenant.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StayDto {
    pub id: i32,
    pub tenant_id: i32,
    pub bed_id: i32,
    pub check_in_date: NaiveDate,
    pub check_out_date: Option<NaiveDate>,
    /// `CHECKED_IN` or `CHECKED_OUT`
    pub status: String,
    pub notes: Option<String>,
}

impl From<entity::check_in_out::Model> for StayDto {
    fn from(stay: entity::check_in_out::Model) -> Self {
        Self {
            id: stay.id,
            tenant_id: stay.tenant_id,
            bed_id: stay.bed_id,
            check_in_date: stay.check_in_date,
            check_out_date: stay.check_out_date,
            status: stay.status.to_value(),
            notes: stay.notes,
        }
    }
}
