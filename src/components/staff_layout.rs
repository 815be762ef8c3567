//! Staff Layout Component
//!
//! Identity and check-in header above a tab bar; the routed page renders
//! below. The active tab is derived from the path on every render.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Outlet, A};
use leptos_router::hooks::use_location;

use lead_desk_core::endpoints::attendance;
use lead_desk_core::nav::{active_tab, STAFF_TABS};
use lead_desk_core::ApiResult;
use lead_desk_core::models::AttendanceToday;

use crate::api::use_api;
use crate::context::use_app_context;
use crate::fetch::Generation;
use crate::store::{notify_error, notify_success, use_app_store, AppStateStoreFields};

#[component]
pub fn StaffLayout() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let store = use_app_store();
    let location = use_location();
    let generation = Generation::new();
    let (busy, set_busy) = signal(false);

    let active = Memo::new(move |_| location.pathname.with(|path| active_tab(STAFF_TABS, path).map(|t| t.route)));

    // Load today's summary on mount and after check-in/out elsewhere
    Effect::new({
        let api = api.clone();
        move |_| {
            let _ = ctx.attendance_version.get();
            let ticket = generation.next();
            let api = api.clone();
            spawn_local(async move {
                let result = attendance::today(&api).await;
                if !generation.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(today) => store.today().set(Some(today)),
                    Err(err) => notify_error(store, &err),
                }
            });
        }
    });

    let run_action = Callback::new(move |check_in: bool| {
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        let api = api.clone();
        spawn_local(async move {
            let result: ApiResult<AttendanceToday> = if check_in {
                attendance::check_in(&api).await
            } else {
                attendance::check_out(&api).await
            };
            match result {
                Ok(today) => {
                    notify_success(store, if check_in { "Checked in" } else { "Checked out" });
                    store.today().set(Some(today));
                    ctx.refresh_attendance();
                }
                Err(err) => notify_error(store, &err),
            }
            set_busy.try_set(false);
        });
    });

    let identity = move || {
        store
            .profile()
            .get()
            .map(|p| p.name)
            .or_else(|| store.today().get().map(|t| t.name))
            .unwrap_or_default()
    };
    let summary = move || {
        store
            .today()
            .get()
            .map(|t| t.summary())
            .unwrap_or_else(|| "Loading attendance...".to_string())
    };
    let checked_in = move || store.today().with(|t| t.as_ref().is_some_and(|t| t.checked_in));
    let checked_out = move || store.today().with(|t| t.as_ref().is_some_and(|t| t.is_checked_out()));

    view! {
        <div class="staff-layout">
            <header class="staff-header">
                <div class="staff-identity">
                    <span class="staff-name">{identity}</span>
                    <span class="staff-attendance">{summary}</span>
                </div>
                <div class="staff-actions">
                    <button
                        class="btn btn-primary"
                        disabled=move || busy.get() || checked_in()
                        on:click=move |_| run_action.run(true)
                    >
                        "Check In"
                    </button>
                    <button
                        class="btn"
                        disabled=move || busy.get() || !checked_in() || checked_out()
                        on:click=move |_| run_action.run(false)
                    >
                        "Check Out"
                    </button>
                </div>
            </header>
            <nav class="staff-tabs">
                {STAFF_TABS
                    .iter()
                    .map(|tab| {
                        let route = tab.route;
                        let class = move || if active.get() == Some(route) { "staff-tab active" } else { "staff-tab" };
                        view! {
                            <A href=route attr:class=class>
                                <span class="nav-icon">{tab.icon}</span>
                                <span>{tab.label}</span>
                            </A>
                        }
                    })
                    .collect_view()}
            </nav>
            <main class="staff-content">
                <Outlet />
            </main>
        </div>
    }
}
