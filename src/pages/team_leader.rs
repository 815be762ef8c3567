//! Team Leader Pages
//!
//! Team dashboard, team roster and lead lists with spreadsheet export.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use lead_desk_core::endpoints::team_leader;
use lead_desk_core::export::ExportRequest;
use lead_desk_core::filters::{FilterState, ListFilters};
use lead_desk_core::kpi::TEAM_LEADER_CARDS;
use lead_desk_core::models::{Lead, UserAccount};
use lead_desk_core::{ApiError, ListView};

use crate::api::use_api;
use crate::components::{DataTable, FilterBar, KpiCardRow};
use crate::fetch::{cancel_on_cleanup, loaded_counts, searched_rows, spawn_list_fetch};
use crate::pages::tables::{json_cell, lead_cell, tag_label, LEAD_COLUMNS, LEAD_TAGS, USER_COLUMNS};
use crate::store::{notify_error, notify_success, use_app_store};

// ========================
// Dashboard
// ========================

#[component]
pub fn TeamLeaderDashboard() -> impl IntoView {
    let api = use_api();
    let all = RwSignal::new(ListView::<Lead>::new());
    let follow_ups = RwSignal::new(ListView::<Lead>::new());
    cancel_on_cleanup(all);
    cancel_on_cleanup(follow_ups);

    {
        let api = api.clone();
        spawn_list_fetch(all, async move {
            team_leader::customers_by_tag(&api, "all", &ListFilters::default()).await
        });
    }
    spawn_list_fetch(follow_ups, async move {
        team_leader::customers_by_tag(&api, "today_follow", &ListFilters::default()).await
    });

    let rows = Signal::derive(move || follow_ups.with(|v| v.rows().to_vec()));

    view! {
        <section class="page team-dashboard">
            <header class="page-header">
                <h1>"Team Dashboard"</h1>
            </header>
            <KpiCardRow cards=TEAM_LEADER_CARDS counts=loaded_counts(all) />
            <h2 class="section-title">"Today's follow-ups"</h2>
            <DataTable
                list=follow_ups
                rows=rows
                columns=LEAD_COLUMNS
                cell=lead_cell
                empty_text="Nothing to follow up today"
            />
        </section>
    }
}

// ========================
// Team roster
// ========================

#[component]
pub fn TeamStaffPage() -> impl IntoView {
    let api = use_api();
    let list = RwSignal::new(ListView::<UserAccount>::new());
    let filters = RwSignal::new(FilterState::default());
    let reload = RwSignal::new(0u32);
    cancel_on_cleanup(list);

    Effect::new(move |_| {
        let _ = reload.get();
        let api = api.clone();
        spawn_list_fetch(list, async move { team_leader::list_staff(&api).await });
    });

    let cell = json_cell::<UserAccount>;

    view! {
        <section class="page team-staff">
            <header class="page-header">
                <h1>"My Team"</h1>
            </header>
            <FilterBar
                filters=filters
                on_reload=Callback::new(move |_| reload.update(|n| *n += 1))
                show_dates=false
                search_placeholder="Search team..."
            />
            <DataTable list=list rows=searched_rows(list, filters) columns=USER_COLUMNS cell=cell />
        </section>
    }
}

// ========================
// Leads by tag
// ========================

#[component]
pub fn TeamLeadsPage() -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let params = use_params_map();
    let tag = Memo::new(move |_| params.with(|p| p.get("tag")).unwrap_or_else(|| "all".to_string()));

    let list = RwSignal::new(ListView::<Lead>::new());
    let filters = RwSignal::new(FilterState::default());
    let reload = RwSignal::new(0u32);
    let applied = Memo::new(move |_| filters.with(|f| f.applied().clone()));
    let (exporting, set_exporting) = signal(false);
    cancel_on_cleanup(list);

    Effect::new({
        let api = api.clone();
        move |_| {
            let _ = reload.get();
            let tag = tag.get();
            let filters = applied.get();
            let api = api.clone();
            spawn_list_fetch(list, async move { team_leader::customers_by_tag(&api, &tag, &filters).await });
        }
    });

    // Export what the applied filters select; nothing downloads on an empty result
    let export = move |_| {
        if exporting.get_untracked() {
            return;
        }
        let applied = applied.get_untracked();
        let request = ExportRequest {
            status: tag.get_untracked(),
            start_date: (!applied.start_date.is_empty()).then_some(applied.start_date),
            end_date: (!applied.end_date.is_empty()).then_some(applied.end_date),
        };
        set_exporting.set(true);
        let api = api.clone();
        spawn_local(async move {
            match team_leader::export_leads(&api, &request).await {
                Ok(file) => match leptos_viewport::trigger_download(&file.bytes, &file.filename, &file.content_type) {
                    Ok(()) => notify_success(store, format!("Downloaded {}", file.filename)),
                    Err(err) => {
                        log::error!("[export] download failed: {:?}", err);
                        notify_error(store, &ApiError::Download(file.filename));
                    }
                },
                Err(err) => notify_error(store, &err),
            }
            set_exporting.try_set(false);
        });
    };

    view! {
        <section class="page leads">
            <header class="page-header">
                <h1>{move || format!("Leads: {}", tag_label(&tag.get()))}</h1>
                <button class="btn" disabled=move || exporting.get() on:click=export>
                    {move || if exporting.get() { "Exporting..." } else { "Export" }}
                </button>
            </header>
            <nav class="tag-chips">
                {LEAD_TAGS
                    .iter()
                    .map(|(key, label)| {
                        let key = *key;
                        view! {
                            <A
                                href=format!("/team-leader/leads/{}", key)
                                attr:class=move || if tag.get() == key { "chip active" } else { "chip" }
                            >
                                {*label}
                            </A>
                        }
                    })
                    .collect_view()}
            </nav>
            <FilterBar filters=filters on_reload=Callback::new(move |_| reload.update(|n| *n += 1)) />
            <KpiCardRow cards=TEAM_LEADER_CARDS counts=loaded_counts(list) />
            <DataTable list=list rows=searched_rows(list, filters) columns=LEAD_COLUMNS cell=lead_cell />
        </section>
    }
}
