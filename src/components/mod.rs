//! UI Components
//!
//! Reusable Leptos components.

mod data_table;
mod entity_form;
mod filter_bar;
mod kpi_cards;
mod role_shell;
mod staff_layout;
mod status_toggle;
mod toast_host;

pub use data_table::{CellFn, DataTable};
pub use entity_form::EntityFormDialog;
pub use filter_bar::FilterBar;
pub use kpi_cards::KpiCardRow;
pub use role_shell::RoleShell;
pub use staff_layout::StaffLayout;
pub use status_toggle::StatusToggle;
pub use toast_host::ToastHost;
