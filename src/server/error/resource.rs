//! Lookup, uniqueness and validation failures of hostel resources.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::user::UserRole;
use thiserror::Error;

use crate::server::error::{error_response, ErrorKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Hostel {0} not found")]
    Hostel(i32),
    #[error("User {0} not found")]
    User(i32),
    #[error("Room {0} not found")]
    Room(i32),
    #[error("Bed {0} not found")]
    Bed(i32),
    #[error("Tenant {0} not found")]
    Tenant(i32),
    #[error("Visitor {0} not found")]
    Visitor(i32),
    #[error("No subscription found for hostel {0}")]
    Subscription(i32),
    #[error("Plan {0} not found")]
    Plan(String),
}

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        error_response(StatusCode::NOT_FOUND, ErrorKind::NotFound, self.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    #[error("Room number {number} already exists in hostel {hostel_id}")]
    RoomNumber { hostel_id: i32, number: String },
    #[error("Bed number {number} already exists in room {room_id}")]
    BedNumber { room_id: i32, number: String },
    #[error("Hostel code {0} is already in use")]
    HostelCode(String),
    #[error("Email {0} is already registered")]
    Email(String),
    #[error("Phone {0} is already registered")]
    Phone(String),
    #[error("Bed {0} is already occupied")]
    BedOccupied(i32),
    #[error("User {0} already has a tenant profile")]
    TenantProfileExists(i32),
    #[error("User {user_id} is already an admin of hostel {hostel_id}")]
    HostelAssociation { user_id: i32, hostel_id: i32 },
}

impl IntoResponse for ConflictError {
    fn into_response(self) -> Response {
        error_response(StatusCode::CONFLICT, ErrorKind::Conflict, self.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Bed belongs to hostel {bed_hostel_id} but tenant belongs to hostel {tenant_hostel_id}")]
    CrossHostel {
        bed_hostel_id: i32,
        tenant_hostel_id: i32,
    },
    #[error("Tenant {tenant_id} already holds bed {bed_id}")]
    TenantAlreadyHasBed { tenant_id: i32, bed_id: i32 },
    #[error("Tenant {tenant_id} is already checked in to bed {bed_id}")]
    TenantAlreadyCheckedIn { tenant_id: i32, bed_id: i32 },
    #[error("Tenant {0} is not checked in")]
    TenantNotCheckedIn(i32),
    #[error("Bed {0} is not occupied")]
    BedNotOccupied(i32),
    #[error("Cannot delete bed {0} while it is occupied, vacate it first")]
    BedOccupied(i32),
    #[error("Cannot delete room {room_id}: {count} occupied bed(s), vacate them first")]
    RoomHasOccupiedBeds { room_id: i32, count: u64 },
    #[error("Cannot delete hostel {hostel_id}: {count} occupied bed(s), vacate them first")]
    HostelHasOccupiedBeds { hostel_id: i32, count: u64 },
    #[error("Room {room_id} is at its capacity of {capacity} bed(s)")]
    RoomAtCapacity { room_id: i32, capacity: i32 },
    #[error("Room {room_id} has {beds} bed(s), capacity cannot be set to {capacity}")]
    CapacityBelowBedCount {
        room_id: i32,
        capacity: i32,
        beds: u64,
    },
    #[error("Capacity must be at least 1, got {0}")]
    InvalidCapacity(i32),
    #[error("Room {0} is deleted")]
    RoomDeleted(i32),
    #[error("Cannot delete tenant {0} while they hold a bed, check them out first")]
    TenantHoldsBed(i32),
    #[error("{entity} {id} is not deleted")]
    NotDeleted { entity: &'static str, id: i32 },
    #[error("Either email or phone must be provided")]
    MissingContact,
    #[error("Duration must be a positive number of days, got {0}")]
    InvalidDuration(i64),
    #[error("Cannot delete yourself")]
    SelfDeletion,
    #[error("User {user_id} must have role {expected:?}")]
    RoleMismatch { user_id: i32, expected: UserRole },
    #[error("User {user_id} belongs to hostel {primary_hostel_id}, not hostel {hostel_id}")]
    PrimaryHostelMismatch {
        user_id: i32,
        primary_hostel_id: i32,
        hostel_id: i32,
    },
    #[error("Unknown {field} value: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Validation,
            self.to_string(),
        )
    }
}
