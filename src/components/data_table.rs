//! Data Table Component
//!
//! Responsive table over a [`ListView`]. Columns below the current
//! breakpoint move into a detail row toggled by +/−; only one row is
//! expanded at a time.

use leptos::prelude::*;

use lead_desk_core::columns::{hidden_indices, needs_expander, visible_indices, ColumnSpec};
use lead_desk_core::models::Entity;
use lead_desk_core::{ListView, LoadState};

use crate::context::use_app_context;

/// Text for one cell, looked up by column key
pub type CellFn<T> = fn(&T, &'static str) -> String;

#[component]
pub fn DataTable<T>(
    list: RwSignal<ListView<T>>,
    /// Rows to show, after any in-memory search
    #[prop(into)]
    rows: Signal<Vec<T>>,
    columns: &'static [ColumnSpec],
    cell: CellFn<T>,
    /// Trailing per-row controls (edit, toggle...)
    #[prop(optional)]
    actions: Option<Callback<T, AnyView>>,
    #[prop(default = "No records found")] empty_text: &'static str,
) -> impl IntoView
where
    T: Entity<Id = u32> + Send + Sync + 'static,
{
    let ctx = use_app_context();
    let visible = Memo::new(move |_| visible_indices(columns, ctx.breakpoint.get()));
    let hidden = Memo::new(move |_| hidden_indices(columns, ctx.breakpoint.get()));
    let expander = Memo::new(move |_| needs_expander(columns, ctx.breakpoint.get()));
    let has_actions = actions.is_some();

    let span = Signal::derive(move || {
        visible.get().len() + usize::from(expander.get()) + usize::from(has_actions)
    });

    let body = move || {
        let state = list.with(|v| v.state().clone());
        match state {
            LoadState::Idle | LoadState::Loading => view! {
                <tr><td class="table-status" colspan=span.get().to_string()>"Loading..."</td></tr>
            }
            .into_any(),
            LoadState::Failed(message) => view! {
                <tr><td class="table-status table-error" colspan=span.get().to_string()>"Error: " {message}</td></tr>
            }
            .into_any(),
            LoadState::Loaded => {
                let rows = rows.get();
                if rows.is_empty() {
                    return view! {
                        <tr><td class="table-status" colspan=span.get().to_string()>{empty_text}</td></tr>
                    }
                    .into_any();
                }
                rows.into_iter()
                    .map(|row| {
                        view! {
                            <TableRow
                                list=list
                                row=row
                                columns=columns
                                cell=cell
                                actions=actions
                                visible=visible
                                hidden=hidden
                                expander=expander
                                span=span
                            />
                        }
                    })
                    .collect_view()
                    .into_any()
            }
        }
    };

    view! {
        <div class="table-wrap">
            <table class="data-table">
                <thead>
                    <tr>
                        <Show when=move || expander.get()>
                            <th class="col-expander"></th>
                        </Show>
                        {move || visible
                            .get()
                            .into_iter()
                            .map(|i| view! { <th>{columns[i].label}</th> })
                            .collect_view()}
                        <Show when=move || has_actions>
                            <th class="col-actions">"Actions"</th>
                        </Show>
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
            {move || {
                let shown = rows.with(|r| r.len());
                list.with(|v| v.total())
                    .filter(|total| *total as usize > shown)
                    .map(|total| view! { <p class="table-footer">{format!("Showing {} of {}", shown, total)}</p> })
            }}
        </div>
    }
}

#[component]
fn TableRow<T>(
    list: RwSignal<ListView<T>>,
    row: T,
    columns: &'static [ColumnSpec],
    cell: CellFn<T>,
    actions: Option<Callback<T, AnyView>>,
    visible: Memo<Vec<usize>>,
    hidden: Memo<Vec<usize>>,
    expander: Memo<bool>,
    span: Signal<usize>,
) -> impl IntoView
where
    T: Entity<Id = u32> + Send + Sync + 'static,
{
    let id = row.id();
    let is_expanded = move || list.with(|v| v.is_expanded(id));
    let texts: Vec<String> = columns.iter().map(|c| cell(&row, c.key)).collect();
    let texts = StoredValue::new(texts);
    let controls = actions.map(|render| render.run(row));

    view! {
        <tr class=move || if is_expanded() { "data-row expanded" } else { "data-row" }>
            <Show when=move || expander.get()>
                <td class="col-expander">
                    <button
                        class="expand-btn"
                        on:click=move |_| list.update(|v| v.toggle_expanded(id))
                    >
                        {move || if is_expanded() { "−" } else { "+" }}
                    </button>
                </td>
            </Show>
            {move || visible
                .get()
                .into_iter()
                .map(|i| view! { <td>{texts.with_value(|t| t[i].clone())}</td> })
                .collect_view()}
            {controls.map(|c| view! { <td class="col-actions">{c}</td> })}
        </tr>
        <Show when=move || is_expanded() && expander.get()>
            <tr class="detail-row">
                <td colspan=move || span.get().to_string()>
                    <dl class="detail-list">
                        {move || hidden
                            .get()
                            .into_iter()
                            .map(|i| view! {
                                <dt>{columns[i].label}</dt>
                                <dd>{texts.with_value(|t| t[i].clone())}</dd>
                            })
                            .collect_view()}
                    </dl>
                </td>
            </tr>
        </Show>
    }
}
