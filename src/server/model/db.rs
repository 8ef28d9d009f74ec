//! Database model type aliases.

pub type HostelModel = entity::hostel::Model;
pub type UserModel = entity::user::Model;
pub type VisitorProfileModel = entity::visitor_profile::Model;
pub type RoomModel = entity::room::Model;
pub type BedModel = entity::bed::Model;
/// A tenant's profile; `current_bed_id` mirrors the bed side of the occupancy link.
pub type TenantModel = entity::tenant_profile::Model;
pub type CheckInOutModel = entity::check_in_out::Model;
pub type PlanModel = entity::plan::Model;
pub type SubscriptionModel = entity::subscription::Model;
pub type AuditLogModel = entity::audit_log::Model;
