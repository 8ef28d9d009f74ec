pub mod audit;
pub mod bed;
pub mod check_in_out;
pub mod hostel;
pub mod plan;
pub mod room;
pub mod soft_delete;
pub mod subscription;
pub mod tenant;
pub mod user;
pub mod user_hostel;
pub mod visitor;
