//! Admin Pages
//!
//! Dashboard, productivity report and lead lists for the admin area.
//! Staff and team leader CRUD use the generic entity list.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use lead_desk_core::endpoints::admin;
use lead_desk_core::filters::{FilterState, ListFilters};
use lead_desk_core::kpi::{ADMIN_LEAD_CARDS, PRODUCTIVITY_CARDS};
use lead_desk_core::models::{Lead, LeadStatus, ProductivityRow, UserAccount};
use lead_desk_core::ListView;

use crate::api::use_api;
use crate::components::{DataTable, FilterBar, KpiCardRow};
use crate::fetch::{cancel_on_cleanup, loaded_counts, searched_rows, spawn_list_fetch};
use crate::pages::tables::{
    lead_cell, productivity_cell, tag_label, LEAD_COLUMNS, LEAD_TAGS, PRODUCTIVITY_COLUMNS,
};

/// Team leaders for filter selects, loaded once per page
pub fn use_team_leaders() -> Signal<Vec<UserAccount>> {
    let api = use_api();
    let leaders = RwSignal::new(Vec::<UserAccount>::new());
    spawn_local(async move {
        match admin::list_team_leaders(&api).await {
            Ok(page) => {
                leaders.try_set(page.rows);
            }
            Err(err) => log::warn!("[admin] team leaders unavailable: {}", err),
        }
    });
    leaders.into()
}

// ========================
// Dashboard
// ========================

#[component]
pub fn AdminDashboard() -> impl IntoView {
    let api = use_api();
    let leads = RwSignal::new(ListView::<Lead>::new());
    let report = RwSignal::new(ListView::<ProductivityRow>::new());
    cancel_on_cleanup(leads);
    cancel_on_cleanup(report);

    {
        let api = api.clone();
        spawn_list_fetch(leads, async move {
            admin::leads_by_tag(&api, "all", &ListFilters::default()).await
        });
    }
    spawn_list_fetch(report, async move {
        admin::productivity_report(&api, &ListFilters::default()).await
    });

    let rows = Signal::derive(move || report.with(|v| v.rows().to_vec()));

    view! {
        <section class="page admin-dashboard">
            <header class="page-header">
                <h1>"Dashboard"</h1>
            </header>
            <KpiCardRow cards=ADMIN_LEAD_CARDS counts=loaded_counts(leads) />
            <h2 class="section-title">"Staff productivity"</h2>
            <DataTable list=report rows=rows columns=PRODUCTIVITY_COLUMNS cell=productivity_cell />
        </section>
    }
}

// ========================
// Productivity report
// ========================

#[component]
pub fn ProductivityReport() -> impl IntoView {
    let api = use_api();
    let list = RwSignal::new(ListView::<ProductivityRow>::new());
    let filters = RwSignal::new(FilterState::default());
    let reload = RwSignal::new(0u32);
    let applied = Memo::new(move |_| filters.with(|f| f.applied().clone()));
    cancel_on_cleanup(list);

    Effect::new(move |_| {
        let _ = reload.get();
        let filters = applied.get();
        let api = api.clone();
        spawn_list_fetch(list, async move { admin::productivity_report(&api, &filters).await });
    });

    let actions = Callback::new(|row: ProductivityRow| {
        view! {
            <A href=format!("/admin/staff/{}/leads", row.id) attr:class="btn btn-small">
                "Leads"
            </A>
        }
        .into_any()
    });

    view! {
        <section class="page productivity">
            <header class="page-header">
                <h1>"Productivity Report"</h1>
            </header>
            <FilterBar
                filters=filters
                on_reload=Callback::new(move |_| reload.update(|n| *n += 1))
                team_leaders=Some(use_team_leaders())
                search_placeholder="Search staff..."
            />
            <KpiCardRow cards=PRODUCTIVITY_CARDS counts=loaded_counts(list) />
            <DataTable
                list=list
                rows=searched_rows(list, filters)
                columns=PRODUCTIVITY_COLUMNS
                cell=productivity_cell
                actions=actions
                empty_text="No staff in this range"
            />
        </section>
    }
}

// ========================
// Leads by tag
// ========================

#[component]
pub fn AdminLeadsPage() -> impl IntoView {
    let api = use_api();
    let params = use_params_map();
    let tag = Memo::new(move |_| params.with(|p| p.get("tag")).unwrap_or_else(|| "all".to_string()));

    let list = RwSignal::new(ListView::<Lead>::new());
    let filters = RwSignal::new(FilterState::default());
    let reload = RwSignal::new(0u32);
    let applied = Memo::new(move |_| filters.with(|f| f.applied().clone()));
    cancel_on_cleanup(list);

    Effect::new(move |_| {
        let _ = reload.get();
        let tag = tag.get();
        let filters = applied.get();
        let api = api.clone();
        spawn_list_fetch(list, async move { admin::leads_by_tag(&api, &tag, &filters).await });
    });

    view! {
        <section class="page leads">
            <header class="page-header">
                <h1>{move || format!("Leads: {}", tag_label(&tag.get()))}</h1>
            </header>
            <nav class="tag-chips">
                {LEAD_TAGS
                    .iter()
                    .map(|(key, label)| {
                        let key = *key;
                        view! {
                            <A
                                href=format!("/admin/leads/{}", key)
                                attr:class=move || if tag.get() == key { "chip active" } else { "chip" }
                            >
                                {*label}
                            </A>
                        }
                    })
                    .collect_view()}
            </nav>
            <FilterBar
                filters=filters
                on_reload=Callback::new(move |_| reload.update(|n| *n += 1))
                team_leaders=Some(use_team_leaders())
            />
            <KpiCardRow cards=ADMIN_LEAD_CARDS counts=loaded_counts(list) />
            <DataTable list=list rows=searched_rows(list, filters) columns=LEAD_COLUMNS cell=lead_cell />
        </section>
    }
}

// ========================
// One staff member's leads
// ========================

#[component]
pub fn StaffLeadsPage() -> impl IntoView {
    let api = use_api();
    let params = use_params_map();
    let staff_id = Memo::new(move |_| params.with(|p| p.get("id")).and_then(|id| id.parse::<u32>().ok()));

    let list = RwSignal::new(ListView::<Lead>::new());
    let filters = RwSignal::new(FilterState::default());
    let status = RwSignal::new(None::<String>);
    let reload = RwSignal::new(0u32);
    let applied = Memo::new(move |_| filters.with(|f| f.applied().clone()));
    cancel_on_cleanup(list);

    Effect::new(move |_| {
        let _ = reload.get();
        let filters = applied.get();
        let status = status.get();
        let Some(id) = staff_id.get() else {
            return;
        };
        let api = api.clone();
        spawn_list_fetch(list, async move {
            admin::staff_leads(&api, id, status.as_deref(), &filters).await
        });
    });

    view! {
        <section class="page staff-leads">
            <header class="page-header">
                <A href="/admin/productivity" attr:class="back-link">"← Productivity"</A>
                <h1>"Staff Leads"</h1>
                <select
                    class="status-filter"
                    prop:value=move || status.get().unwrap_or_default()
                    on:change=move |ev| {
                        let picked = event_target_value(&ev);
                        status.set((!picked.is_empty()).then_some(picked));
                    }
                >
                    <option value="">"All statuses"</option>
                    {LeadStatus::SELECTABLE
                        .iter()
                        .map(|s| view! { <option value=s.as_str().to_string()>{s.label().to_string()}</option> })
                        .collect_view()}
                </select>
            </header>
            <FilterBar
                filters=filters
                on_reload=Callback::new(move |_| reload.update(|n| *n += 1))
                on_clear=Callback::new(move |_| {
                    if status.with_untracked(|s| s.is_some()) {
                        status.set(None);
                    }
                })
            />
            <KpiCardRow cards=PRODUCTIVITY_CARDS counts=loaded_counts(list) />
            <DataTable list=list rows=searched_rows(list, filters) columns=LEAD_COLUMNS cell=lead_cell />
        </section>
    }
}
