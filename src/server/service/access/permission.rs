//! Static role permission matrix.

use std::fmt;

use entity::user::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
    Delete,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Hostels,
    Rooms,
    Beds,
    Tenants,
    Visitors,
    Subscriptions,
    Users,
    AuditLogs,
    OwnProfile,
    OwnRoom,
    HostelInfo,
    HostelManagement,
}

/// Resources a role may act on for one action.
enum Grant {
    All,
    Only(&'static [Resource]),
}

impl Grant {
    fn allows(&self, resource: Resource) -> bool {
        match self {
            Self::All => true,
            Self::Only(resources) => resources.contains(&resource),
        }
    }
}

fn grant(role: UserRole, action: Action) -> Grant {
    use Resource::*;

    match (role, action) {
        (UserRole::SuperAdmin, _) => Grant::All,

        (UserRole::HostelAdmin, Action::Read) => Grant::Only(&[
            Hostels,
            Rooms,
            Beds,
            Tenants,
            Visitors,
            Subscriptions,
            AuditLogs,
        ]),
        (UserRole::HostelAdmin, Action::Write) => Grant::Only(&[Rooms, Beds, Tenants, Visitors]),
        (UserRole::HostelAdmin, Action::Delete) => Grant::Only(&[Rooms, Beds, Tenants, Visitors]),
        (UserRole::HostelAdmin, Action::Admin) => Grant::Only(&[HostelManagement]),

        (UserRole::Tenant, Action::Read) => Grant::Only(&[OwnProfile, OwnRoom, HostelInfo]),
        (UserRole::Tenant, Action::Write) => Grant::Only(&[OwnProfile]),
        (UserRole::Tenant, _) => Grant::Only(&[]),

        (UserRole::Visitor, Action::Read) => Grant::Only(&[HostelInfo]),
        (UserRole::Visitor, _) => Grant::Only(&[]),
    }
}

/// Whether `role` may perform `action` on `resource`
pub fn has_permission(role: UserRole, action: Action, resource: Resource) -> bool {
    grant(role, action).allows(resource)
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::Admin => "admin",
        };

        f.write_str(name)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hostels => "hostels",
            Self::Rooms => "rooms",
            Self::Beds => "beds",
            Self::Tenants => "tenants",
            Self::Visitors => "visitors",
            Self::Subscriptions => "subscriptions",
            Self::Users => "users",
            Self::AuditLogs => "audit_logs",
            Self::OwnProfile => "own_profile",
            Self::OwnRoom => "own_room",
            Self::HostelInfo => "hostel_info",
            Self::HostelManagement => "hostel_management",
        };

        f.write_str(name)
    }
}
