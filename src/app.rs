//! Lead Desk Frontend App
//!
//! Provides the shared client, store and viewport context, loads the
//! signed-in profile and routes each role to its area.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use lead_desk_core::endpoints::profile;
use lead_desk_core::nav::{ADMIN_TABS, SUPERADMIN_TABS, TEAM_LEADER_TABS};
use lead_desk_core::resource::{AdminResource, StaffResource, TeamLeaderResource};

use crate::api::create_api_client;
use crate::components::{RoleShell, StaffLayout, ToastHost};
use crate::context::AppContext;
use crate::pages::tables::ADMIN_COLUMNS;
use crate::pages::*;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    let api = create_api_client();

    // Provide context to all children
    provide_context(store);
    provide_context(api.clone());
    provide_context(AppContext::new(leptos_viewport::create_viewport_width()));

    // Who is signed in decides where "/" goes
    spawn_local(async move {
        match profile::me(&api).await {
            Ok(me) => {
                log::info!("[app] signed in as {} ({:?})", me.name, me.role);
                store.profile().set(Some(me));
            }
            Err(err) => {
                log::warn!("[app] profile unavailable: {}", err);
                store.profile_error().set(Some(err.user_message()));
            }
        }
    });

    view! {
        <Router>
            <ToastHost />
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/") view=RoleRedirect />

                <ParentRoute path=path!("/staff") view=StaffLayout>
                    <Route path=path!("") view=StaffOverview />
                    <Route path=path!("leads") view=MyLeadsPage />
                    <Route path=path!("attendance") view=AttendancePage />
                    <Route path=path!("profile") view=ProfilePage />
                </ParentRoute>

                <ParentRoute path=path!("/admin") view=|| view! { <RoleShell title="Admin" tabs=ADMIN_TABS /> }>
                    <Route path=path!("") view=AdminDashboard />
                    <Route path=path!("staff") view=|| view! { <EntityListPage resource=StaffResource /> } />
                    <Route path=path!("staff/:id/leads") view=StaffLeadsPage />
                    <Route
                        path=path!("team-leaders")
                        view=|| view! { <EntityListPage resource=TeamLeaderResource /> }
                    />
                    <Route path=path!("productivity") view=ProductivityReport />
                    <Route path=path!("leads/:tag") view=AdminLeadsPage />
                </ParentRoute>

                <ParentRoute
                    path=path!("/superadmin")
                    view=|| view! { <RoleShell title="Superadmin" tabs=SUPERADMIN_TABS /> }
                >
                    <Route path=path!("") view=SuperadminDashboard />
                    <Route
                        path=path!("admins")
                        view=|| view! { <EntityListPage resource=AdminResource columns=ADMIN_COLUMNS /> }
                    />
                </ParentRoute>

                <ParentRoute
                    path=path!("/team-leader")
                    view=|| view! { <RoleShell title="Team Leader" tabs=TEAM_LEADER_TABS /> }
                >
                    <Route path=path!("") view=TeamLeaderDashboard />
                    <Route path=path!("staff") view=TeamStaffPage />
                    <Route path=path!("leads/:tag") view=TeamLeadsPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
