//! Navigation Tabs
//!
//! Static tab lists per role area. The active tab is always derived from
//! the current path, never stored.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTab {
    pub label: &'static str,
    pub route: &'static str,
    pub icon: &'static str,
}

const fn tab(label: &'static str, route: &'static str, icon: &'static str) -> NavTab {
    NavTab { label, route, icon }
}

pub const STAFF_TABS: &[NavTab] = &[
    tab("Overview", "/staff", "🏠"),
    tab("Leads", "/staff/leads", "📋"),
    tab("Attendance", "/staff/attendance", "🕘"),
    tab("Profile", "/staff/profile", "👤"),
];

pub const ADMIN_TABS: &[NavTab] = &[
    tab("Dashboard", "/admin", "📊"),
    tab("Staff", "/admin/staff", "👥"),
    tab("Team Leaders", "/admin/team-leaders", "🧭"),
    tab("Productivity", "/admin/productivity", "📈"),
    tab("Leads", "/admin/leads/all", "📋"),
];

pub const SUPERADMIN_TABS: &[NavTab] = &[
    tab("Dashboard", "/superadmin", "📊"),
    tab("Admins", "/superadmin/admins", "🛡"),
];

pub const TEAM_LEADER_TABS: &[NavTab] = &[
    tab("Dashboard", "/team-leader", "📊"),
    tab("Team", "/team-leader/staff", "👥"),
    tab("Leads", "/team-leader/leads/all", "📋"),
];

/// Path `path` is inside `route`: equal, or a sub-path of it
fn within(path: &str, route: &str) -> bool {
    match path.strip_prefix(route) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || route.ends_with('/'),
        None => false,
    }
}

/// Tab owning `path`; the longest matching route wins so `/staff/leads`
/// does not light up `/staff`.
pub fn active_tab(tabs: &'static [NavTab], path: &str) -> Option<&'static NavTab> {
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
    tabs.iter()
        .filter(|t| within(path, t.route))
        .max_by_key(|t| t.route.len())
}

/// Tabs whose route is a lead list keyed by tag also own sibling tags:
/// `/admin/leads/visit` belongs to the tab routed at `/admin/leads/all`.
/// A direct route match beats a section match of the same length.
pub fn active_tab_by_section(tabs: &'static [NavTab], path: &str) -> Option<&'static NavTab> {
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
    tabs.iter()
        .filter_map(|t| {
            if within(path, t.route) {
                return Some(((t.route.len(), true), t));
            }
            match t.route.rsplit_once('/') {
                Some((section, _)) if !section.is_empty() && within(path, section) => {
                    Some(((section.len(), false), t))
                }
                _ => None,
            }
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, t)| t)
}
