//! Staff Pages
//!
//! Overview, own leads with status updates, attendance history and the
//! profile card. Rendered inside the staff layout.

use leptos::prelude::*;
use leptos::task::spawn_local;

use lead_desk_core::endpoints::{attendance, profile, staff};
use lead_desk_core::filters::{FilterState, ListFilters};
use lead_desk_core::kpi::STAFF_CARDS;
use lead_desk_core::models::{AttendanceRecord, Lead, LeadStatus, LeadStatusUpdate};
use lead_desk_core::ListView;

use crate::api::use_api;
use crate::components::{CellFn, DataTable, FilterBar, KpiCardRow};
use crate::context::use_app_context;
use crate::fetch::{cancel_on_cleanup, loaded_counts, searched_rows, spawn_list_fetch, Generation};
use crate::pages::tables::{json_cell, lead_cell, ATTENDANCE_COLUMNS, LEAD_COLUMNS, LEAD_TAGS};
use crate::store::{notify_error, notify_success, use_app_store, AppStateStoreFields};

// ========================
// Overview
// ========================

#[component]
pub fn StaffOverview() -> impl IntoView {
    let api = use_api();
    let all = RwSignal::new(ListView::<Lead>::new());
    let follow_ups = RwSignal::new(ListView::<Lead>::new());
    cancel_on_cleanup(all);
    cancel_on_cleanup(follow_ups);

    {
        let api = api.clone();
        spawn_list_fetch(all, async move { staff::my_leads(&api, "all", "").await });
    }
    spawn_list_fetch(follow_ups, async move { staff::my_leads(&api, "today_follow", "").await });

    let rows = Signal::derive(move || follow_ups.with(|v| v.rows().to_vec()));

    view! {
        <section class="page staff-overview">
            <KpiCardRow cards=STAFF_CARDS counts=loaded_counts(all) />
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
// My leads
// ========================

#[component]
pub fn MyLeadsPage() -> impl IntoView {
    let api = use_api();
    let list = RwSignal::new(ListView::<Lead>::new());
    let filters = RwSignal::new(FilterState::default());
    let (tag, set_tag) = signal("all");
    let reload = RwSignal::new(0u32);
    let editing = RwSignal::new(None::<Lead>);
    cancel_on_cleanup(list);

    Effect::new(move |_| {
        let _ = reload.get();
        let tag = tag.get();
        let api = api.clone();
        // Search runs in memory over the fetched rows
        spawn_list_fetch(list, async move { staff::my_leads(&api, tag, "").await });
    });

    let actions = Callback::new(move |lead: Lead| {
        view! {
            <button class="btn btn-small" on:click=move |_| editing.set(Some(lead.clone()))>
                "Update"
            </button>
        }
        .into_any()
    });

    view! {
        <section class="page my-leads">
            <nav class="tag-chips">
                {LEAD_TAGS
                    .iter()
                    .map(|(key, label)| {
                        let key = *key;
                        view! {
                            <button
                                class=move || if tag.get() == key { "chip active" } else { "chip" }
                                on:click=move |_| set_tag.set(key)
                            >
                                {*label}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <FilterBar
                filters=filters
                on_reload=Callback::new(move |_| reload.update(|n| *n += 1))
                show_dates=false
                search_placeholder="Search leads..."
            />
            <DataTable
                list=list
                rows=searched_rows(list, filters)
                columns=LEAD_COLUMNS
                cell=lead_cell
                actions=actions
            />
            <LeadStatusDialog editing=editing on_saved=Callback::new(move |_| reload.update(|n| *n += 1)) />
        </section>
    }
}

/// Move one lead along the pipeline; the server decides what it accepts
#[component]
fn LeadStatusDialog(editing: RwSignal<Option<Lead>>, on_saved: Callback<()>) -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let status = RwSignal::new(LeadStatus::default());
    let message = RwSignal::new(String::new());
    let follow_up_date = RwSignal::new(String::new());
    let follow_up_time = RwSignal::new(String::new());
    let (saving, set_saving) = signal(false);
    let error = RwSignal::new(None::<String>);

    // Prefill from the lead being edited
    Effect::new(move |_| {
        editing.with(|lead| {
            if let Some(lead) = lead {
                status.set(lead.status.clone());
                message.set(lead.message.clone().unwrap_or_default());
                follow_up_date.set(lead.follow_up_date.clone().unwrap_or_default());
                follow_up_time.set(lead.follow_up_time.clone().unwrap_or_default());
                error.set(None);
            }
        });
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let Some(lead_id) = editing.with_untracked(|l| l.as_ref().map(|l| l.id)) else {
            return;
        };
        let update = LeadStatusUpdate::from_inputs(
            status.get_untracked(),
            &message.get_untracked(),
            &follow_up_date.get_untracked(),
            &follow_up_time.get_untracked(),
        );
        set_saving.set(true);
        let api = api.clone();
        spawn_local(async move {
            match staff::update_lead_status(&api, lead_id, &update).await {
                Ok(()) => {
                    notify_success(store, "Lead updated");
                    editing.try_set(None);
                    on_saved.run(());
                }
                Err(err) => {
                    notify_error(store, &err);
                    error.try_set(Some(err.user_message()));
                }
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <Show when=move || editing.with(|l| l.is_some())>
            <div class="modal-backdrop">
                <form class="modal status-form" on:submit=submit.clone()>
                    <header class="modal-header">
                        <h2>{move || editing.with(|l| l.as_ref().map(|l| l.name.clone()).unwrap_or_default())}</h2>
                        <button type="button" class="modal-close" on:click=move |_| editing.set(None)>"×"</button>
                    </header>
                    <label class="form-field">
                        <span class="form-label">"Status *"</span>
                        <select
                            required=true
                            prop:value=move || status.with(|s| s.as_str().to_string())
                            on:change=move |ev| status.set(LeadStatus::from(event_target_value(&ev)))
                        >
                            {LeadStatus::SELECTABLE
                                .iter()
                                .map(|s| view! { <option value=s.as_str().to_string()>{s.label().to_string()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <label class="form-field">
                        <span class="form-label">"Remarks"</span>
                        <input
                            type="text"
                            prop:value=move || message.get()
                            on:input=move |ev| message.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        <span class="form-label">"Follow-up date"</span>
                        <input
                            type="date"
                            prop:value=move || follow_up_date.get()
                            on:change=move |ev| follow_up_date.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        <span class="form-label">"Follow-up time"</span>
                        <input
                            type="time"
                            prop:value=move || follow_up_time.get()
                            on:change=move |ev| follow_up_time.set(event_target_value(&ev))
                        />
                    </label>
                    {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                    <footer class="modal-footer">
                        <button type="button" class="btn" on:click=move |_| editing.set(None)>"Cancel"</button>
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </footer>
                </form>
            </div>
        </Show>
    }
}

// ========================
// Attendance
// ========================

#[component]
pub fn AttendancePage() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let list = RwSignal::new(ListView::<AttendanceRecord>::new());
    let filters = RwSignal::new(FilterState::default());
    let reload = RwSignal::new(0u32);
    let applied = Memo::new(move |_| filters.with(|f| f.applied().clone()));
    cancel_on_cleanup(list);

    Effect::new(move |_| {
        let _ = reload.get();
        // Check-in/out in the header changes today's row
        let _ = ctx.attendance_version.get();
        let filters: ListFilters = applied.get();
        let api = api.clone();
        spawn_list_fetch(list, async move { attendance::history(&api, &filters).await });
    });

    let cell: CellFn<AttendanceRecord> = json_cell::<AttendanceRecord>;

    view! {
        <section class="page attendance">
            <FilterBar
                filters=filters
                on_reload=Callback::new(move |_| reload.update(|n| *n += 1))
                search_placeholder="Search days..."
            />
            <DataTable
                list=list
                rows=searched_rows(list, filters)
                columns=ATTENDANCE_COLUMNS
                cell=cell
                empty_text="No attendance in this range"
            />
        </section>
    }
}

// ========================
// Profile
// ========================

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let generation = Generation::new();

    // Refresh on visit; the header keeps showing the cached copy meanwhile
    let ticket = generation.next();
    spawn_local(async move {
        let result = profile::me(&api).await;
        if !generation.is_current(ticket) {
            return;
        }
        match result {
            Ok(me) => store.profile().set(Some(me)),
            Err(err) => notify_error(store, &err),
        }
    });

    view! {
        <section class="page profile">
            {move || match store.profile().get() {
                None => view! { <p class="page-status">"Loading profile..."</p> }.into_any(),
                Some(me) => view! {
                    <dl class="profile-card">
                        <dt>"Name"</dt>
                        <dd>{me.name}</dd>
                        <dt>"Email"</dt>
                        <dd>{me.email.unwrap_or_else(|| "-".to_string())}</dd>
                        <dt>"Mobile"</dt>
                        <dd>{me.mobile.unwrap_or_else(|| "-".to_string())}</dd>
                        <dt>"Role"</dt>
                        <dd>{me.role.label()}</dd>
                    </dl>
                }
                .into_any(),
            }}
        </section>
    }
}
