//! Toast Host Component
//!
//! Fixed corner stack rendering the store's toast queue.

use leptos::prelude::*;

use crate::store::{store_dismiss_toast, use_app_store, AppStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-host">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class() role="status">
                            <span>{toast.text}</span>
                            <button class="toast-close" on:click=move |_| store_dismiss_toast(store, id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
