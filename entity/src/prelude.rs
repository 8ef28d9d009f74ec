pub use super::audit_log::Entity as AuditLog;
pub use super::bed::Entity as Bed;
pub use super::check_in_out::Entity as CheckInOut;
pub use super::hostel::Entity as Hostel;
pub use super::plan::Entity as Plan;
pub use super::room::Entity as Room;
pub use super::subscription::Entity as Subscription;
pub use super::tenant_profile::Entity as TenantProfile;
pub use super::user::Entity as User;
pub use super::user_hostel::Entity as UserHostel;
pub use super::visitor_profile::Entity as VisitorProfile;
