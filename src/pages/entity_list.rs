//! Entity List Page
//!
//! One list + CRUD page for any [`EntityResource`]: filters, search,
//! responsive table, Add/Edit dialog and optimistic status toggles.

use leptos::prelude::*;
use leptos::task::spawn_local;

use lead_desk_core::columns::ColumnSpec;
use lead_desk_core::filters::FilterState;
use lead_desk_core::forms::{FormMode, FormSchema, FormValues};
use lead_desk_core::list_view::DialogState;
use lead_desk_core::models::{Activatable, Entity};
use lead_desk_core::optimistic::{flip_active, settle_active};
use lead_desk_core::resource::EntityResource;
use lead_desk_core::ListView;

use crate::api::use_api;
use crate::components::{CellFn, DataTable, EntityFormDialog, FilterBar, StatusToggle};
use crate::fetch::{cancel_on_cleanup, searched_rows, spawn_list_fetch};
use crate::pages::admin::use_team_leaders;
use crate::pages::tables::{json_cell, USER_COLUMNS};
use crate::store::{notify_error, notify_success, use_app_store};

#[component]
pub fn EntityListPage<R>(
    resource: R,
    #[prop(default = USER_COLUMNS)] columns: &'static [ColumnSpec],
) -> impl IntoView
where
    R: EntityResource,
{
    let api = use_api();
    let store = use_app_store();

    let list = RwSignal::new(ListView::<R::Row>::new());
    let filters = RwSignal::new(FilterState::default());
    let reload = RwSignal::new(0u32);
    let applied = Memo::new(move |_| filters.with(|f| f.applied().clone()));
    cancel_on_cleanup(list);

    // ========================
    // Fetch
    // ========================

    Effect::new({
        let api = api.clone();
        let resource = resource.clone();
        move |_| {
            let _ = reload.get();
            let filters = applied.get();
            let api = api.clone();
            let resource = resource.clone();
            spawn_list_fetch(list, async move { resource.list(&api, &filters).await });
        }
    });

    let rows = searched_rows(list, filters);

    // ========================
    // Add / Edit
    // ========================

    let dialog = RwSignal::new(DialogState::Closed);
    let values = RwSignal::new(FormValues::default());
    let form_error = RwSignal::new(None::<String>);
    let schema = RwSignal::new(None::<FormSchema>);

    let open_dialog = Callback::new({
        let api = api.clone();
        let resource = resource.clone();
        move |record: Option<R::Row>| {
            let mode = record.as_ref().map_or(FormMode::Create, |r| FormMode::Edit(r.id()));
            form_error.set(None);
            schema.set(None);
            values.set(FormValues::default());
            dialog.set(DialogState::Open(mode));

            let api = api.clone();
            let resource = resource.clone();
            spawn_local(async move {
                match resource.schema(&api).await {
                    Ok(loaded) => {
                        if let Some(record) = &record {
                            values.try_set(loaded.values_from(record));
                        }
                        schema.try_set(Some(loaded));
                    }
                    Err(err) => {
                        form_error.try_set(Some(err.user_message()));
                    }
                }
            });
        }
    });

    let on_submit = Callback::new({
        let api = api.clone();
        let resource = resource.clone();
        move |_: ()| {
            let Some(current_schema) = schema.get_untracked() else {
                return;
            };
            let Some(mode) = dialog.with_untracked(|d| d.mode()) else {
                return;
            };
            let current = values.get_untracked();
            if let Err(message) = current_schema.validate(&current, mode) {
                form_error.set(Some(message));
                return;
            }
            let Some(mode) = dialog.try_update(|d| d.begin_submit()).flatten() else {
                return;
            };
            form_error.set(None);

            let payload = current_schema.build_payload(&current);
            let api = api.clone();
            let resource = resource.clone();
            spawn_local(async move {
                let result = resource.submit(&api, mode, payload).await;
                let failure = dialog.try_update(|d| d.finish_submit(&result)).flatten();
                match result {
                    Ok(()) => {
                        let verb = if mode == FormMode::Create { "added" } else { "updated" };
                        notify_success(store, format!("{} {}", current_schema.entity, verb));
                    }
                    Err(err) => {
                        notify_error(store, &err);
                        form_error.try_set(failure);
                    }
                }
                reload.try_update(|n| *n += 1);
            });
        }
    });

    // ========================
    // Status toggle
    // ========================

    let toggle = Callback::new({
        let resource = resource.clone();
        move |id: u32| {
            let Some(pending) = list.try_update(|v| flip_active(v.rows_mut(), id)).flatten() else {
                return;
            };
            let api = api.clone();
            let resource = resource.clone();
            spawn_local(async move {
                let outcome = resource.toggle_active(&api, id).await;
                match list.try_update(move |v| settle_active(pending, v.rows_mut(), outcome)) {
                    Some(Ok(active)) => {
                        notify_success(store, if active { "Marked active" } else { "Marked inactive" })
                    }
                    Some(Err(err)) => notify_error(store, &err),
                    None => {}
                }
            });
        }
    });

    let actions = Callback::new(move |row: R::Row| {
        let id = row.id();
        let active = row.is_active();
        view! {
            <div class="row-actions">
                <StatusToggle active=active on_toggle=Callback::new(move |_| toggle.run(id)) />
                <button class="btn btn-small" on:click=move |_| open_dialog.run(Some(row.clone()))>
                    "Edit"
                </button>
            </div>
        }
        .into_any()
    });

    let cell: CellFn<R::Row> = json_cell::<R::Row>;
    let title = resource.title();
    let show_dates = resource.filterable();
    let leader_choices = resource.filterable().then(use_team_leaders);

    view! {
        <section class="page entity-list">
            <header class="page-header">
                <h1>{title}</h1>
                <button class="btn btn-primary" on:click=move |_| open_dialog.run(None)>
                    "Add"
                </button>
            </header>
            <FilterBar
                filters=filters
                on_reload=Callback::new(move |_| reload.update(|n| *n += 1))
                show_dates=show_dates
                team_leaders=leader_choices
            />
            <DataTable
                list=list
                rows=rows
                columns=columns
                cell=cell
                actions=actions
            />
            <EntityFormDialog
                schema=schema
                dialog=dialog
                values=values
                error=form_error
                on_submit=on_submit
            />
        </section>
    }
}
