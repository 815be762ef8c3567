//! Role Shell Component
//!
//! Sidebar layout shared by the admin, superadmin and team leader areas.

use leptos::prelude::*;
use leptos_router::components::{Outlet, A};
use leptos_router::hooks::use_location;

use lead_desk_core::nav::{active_tab_by_section, NavTab};

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn RoleShell(title: &'static str, tabs: &'static [NavTab]) -> impl IntoView {
    let store = use_app_store();
    let location = use_location();
    let active = Memo::new(move |_| {
        location.pathname.with(|path| active_tab_by_section(tabs, path).map(|t| t.route))
    });

    view! {
        <div class="role-shell">
            <aside class="sidebar">
                <div class="sidebar-brand">
                    <span class="brand-name">"Lead Desk"</span>
                    <span class="brand-role">{title}</span>
                </div>
                <nav class="sidebar-nav">
                    {tabs
                        .iter()
                        .map(|tab| {
                            let route = tab.route;
                            let class = move || {
                                if active.get() == Some(route) { "sidebar-link active" } else { "sidebar-link" }
                            };
                            view! {
                                <A href=route attr:class=class>
                                    <span class="nav-icon">{tab.icon}</span>
                                    <span>{tab.label}</span>
                                </A>
                            }
                        })
                        .collect_view()}
                </nav>
                <div class="sidebar-footer">
                    {move || store.profile().get().map(|p| p.name)}
                </div>
            </aside>
            <main class="role-content">
                <Outlet />
            </main>
        </div>
    }
}
