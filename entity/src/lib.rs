//! sea-orm entities for the hostel management schema.

pub mod prelude;

pub mod audit_log;
pub mod bed;
pub mod check_in_out;
pub mod hostel;
pub mod plan;
pub mod room;
pub mod subscription;
pub mod tenant_profile;
pub mod user;
pub mod user_hostel;
pub mod visitor_profile;
