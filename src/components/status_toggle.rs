//! Status Toggle Component

use leptos::prelude::*;

/// Active/inactive switch; the page flips the row optimistically
#[component]
pub fn StatusToggle(active: bool, on_toggle: Callback<()>) -> impl IntoView {
    view! {
        <button
            type="button"
            role="switch"
            aria-checked=active.to_string()
            class=if active { "status-toggle on" } else { "status-toggle off" }
            on:click=move |ev| {
                ev.stop_propagation();
                on_toggle.run(());
            }
        >
            {if active { "Active" } else { "Inactive" }}
        </button>
    }
}
