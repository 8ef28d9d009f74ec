//! The authenticated actor evaluated by access control.

use chrono::NaiveDateTime;
use entity::user::UserRole;

/// A resolved principal: the user's role together with the hostel scope it grants.
///
/// Built from the user row and its profile or association records by the identity
/// service, so access checks never have to look up which table holds the hostel id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    SuperAdmin {
        user_id: i32,
    },
    /// `hostel_ids` is the admin's association set, or the primary hostel when the set is empty
    HostelAdmin {
        user_id: i32,
        hostel_ids: Vec<i32>,
    },
    Tenant {
        user_id: i32,
        hostel_id: i32,
    },
    Visitor {
        user_id: i32,
        hostel_id: i32,
        expires_at: NaiveDateTime,
    },
}

impl Principal {
    pub fn user_id(&self) -> i32 {
        match self {
            Self::SuperAdmin { user_id }
            | Self::HostelAdmin { user_id, .. }
            | Self::Tenant { user_id, .. }
            | Self::Visitor { user_id, .. } => *user_id,
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Self::SuperAdmin { .. } => UserRole::SuperAdmin,
            Self::HostelAdmin { .. } => UserRole::HostelAdmin,
            Self::Tenant { .. } => UserRole::Tenant,
            Self::Visitor { .. } => UserRole::Visitor,
        }
    }

    /// Hostels this principal is scoped to; `None` means every hostel.
    pub fn hostel_ids(&self) -> Option<Vec<i32>> {
        match self {
            Self::SuperAdmin { .. } => None,
            Self::HostelAdmin { hostel_ids, .. } => Some(hostel_ids.clone()),
            Self::Tenant { hostel_id, .. } | Self::Visitor { hostel_id, .. } => {
                Some(vec![*hostel_id])
            }
        }
    }
}
