//! Routed Pages

pub mod admin;
mod entity_list;
mod home;
mod staff;
mod superadmin;
pub mod tables;
mod team_leader;

pub use admin::{AdminDashboard, AdminLeadsPage, ProductivityReport, StaffLeadsPage};
pub use entity_list::EntityListPage;
pub use home::{NotFound, RoleRedirect};
pub use staff::{AttendancePage, MyLeadsPage, ProfilePage, StaffOverview};
pub use superadmin::SuperadminDashboard;
pub use team_leader::{TeamLeadsPage, TeamLeaderDashboard, TeamStaffPage};
