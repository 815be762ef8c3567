//! Entity Form Dialog Component
//!
//! Two-tab Add/Edit modal rendered from a [`FormSchema`]. Submitting is
//! owned by the page; this component only edits values.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use lead_desk_core::forms::{FieldKind, FieldSpec, FileUpload, FormMode, FormSchema, FormTab, FormValues};
use lead_desk_core::list_view::DialogState;

#[component]
pub fn EntityFormDialog(
    /// `None` while the schema is still loading
    #[prop(into)]
    schema: Signal<Option<FormSchema>>,
    dialog: RwSignal<DialogState>,
    values: RwSignal<FormValues>,
    /// Server or validation message shown above the buttons
    error: RwSignal<Option<String>>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let (tab, set_tab) = signal(FormTab::Personal);
    let mode = Memo::new(move |_| dialog.with(|d| d.mode()).unwrap_or(FormMode::Create));

    // Every open starts on the first tab
    Effect::new(move |_| {
        if dialog.with(|d| d.is_open()) {
            set_tab.set(FormTab::Personal);
        }
    });

    let title = move || {
        let entity = schema.with(|s| s.as_ref().map(|s| s.entity).unwrap_or_default());
        match mode.get() {
            FormMode::Edit(_) => format!("Edit {}", entity),
            _ => format!("Add {}", entity),
        }
    };

    let close = move |_| {
        if !dialog.with_untracked(|d| d.is_submitting()) {
            dialog.set(DialogState::Closed);
            error.set(None);
        }
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(());
    };

    view! {
        <Show when=move || dialog.with(|d| d.is_open())>
            <div class="modal-backdrop">
                <form class="modal entity-form" on:submit=submit>
                    <header class="modal-header">
                        <h2>{title}</h2>
                        <button type="button" class="modal-close" on:click=close>"×"</button>
                    </header>

                    <nav class="form-tabs">
                        {FormTab::ALL
                            .into_iter()
                            .map(|t| view! {
                                <button
                                    type="button"
                                    class=move || if tab.get() == t { "form-tab active" } else { "form-tab" }
                                    on:click=move |_| set_tab.set(t)
                                >
                                    {t.label()}
                                </button>
                            })
                            .collect_view()}
                    </nav>

                    <div class="form-grid">
                        {move || {
                            let mode = mode.get();
                            let current = tab.get();
                            match schema.get() {
                                None => view! { <p class="form-loading">"Loading form..."</p> }.into_any(),
                                Some(schema) => schema
                                    .fields_for(current)
                                    .cloned()
                                    .map(|field| view! { <FormField field=field mode=mode values=values /> })
                                    .collect_view()
                                    .into_any(),
                            }
                        }}
                    </div>

                    {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}

                    <footer class="modal-footer">
                        <button type="button" class="btn" on:click=close>"Cancel"</button>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || dialog.with(|d| d.is_submitting()) || schema.with(|s| s.is_none())
                        >
                            {move || if dialog.with(|d| d.is_submitting()) { "Saving..." } else { "Save" }}
                        </button>
                    </footer>
                </form>
            </div>
        </Show>
    }
}

#[component]
fn FormField(field: FieldSpec, mode: FormMode, values: RwSignal<FormValues>) -> impl IntoView {
    let name = field.name;
    let required = field.is_required(mode);
    let label = if required { format!("{} *", field.label) } else { field.label.to_string() };

    let input = match field.kind {
        FieldKind::Select(options) => view! {
            <select
                name=name
                required=required
                prop:value=move || values.with(|v| v.text(name).to_string())
                on:change=move |ev| values.update(|v| v.set_text(name, event_target_value(&ev)))
            >
                <option value="">"Select..."</option>
                {options
                    .into_iter()
                    .map(|(value, text)| view! { <option value=value>{text}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::File => view! {
            <input
                type="file"
                name=name
                required=required
                on:change=move |ev| pick_file(ev, name, values)
            />
            {move || values.with(|v| v.file(name).map(|f| f.filename.clone()))
                .map(|filename| view! { <span class="file-name">{filename}</span> })}
        }
        .into_any(),
        kind => view! {
            <input
                type=kind.input_type()
                name=name
                required=required
                autocomplete=if kind == FieldKind::Password { "new-password" } else { "off" }
                prop:value=move || values.with(|v| v.text(name).to_string())
                on:input=move |ev| values.update(|v| v.set_text(name, event_target_value(&ev)))
            />
        }
        .into_any(),
    };

    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            {input}
        </label>
    }
}

/// Read the picked file into memory; clearing the input clears the value
fn pick_file(ev: web_sys::Event, name: &'static str, values: RwSignal<FormValues>) {
    let file = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0));

    let Some(file) = file else {
        values.update(|v| v.set_file(name, None));
        return;
    };

    spawn_local(async move {
        match leptos_viewport::read_file_bytes(&file).await {
            Ok(bytes) => {
                let upload = FileUpload { filename: file.name(), bytes };
                values.try_update(|v| v.set_file(name, Some(upload)));
            }
            Err(err) => log::warn!("[form] could not read {}: {:?}", name, err),
        }
    });
}
