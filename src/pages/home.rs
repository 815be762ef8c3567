//! Landing Pages

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::store::{use_app_store, AppStateStoreFields};

/// Sends the signed-in user to their role's area
#[component]
pub fn RoleRedirect() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if let Some(role) = store.profile().with(|p| p.as_ref().map(|p| p.role)) {
            log::debug!("[app] routing {:?} home", role);
            navigate(role.home(), Default::default());
        }
    });

    view! {
        <section class="page landing">
            {move || match store.profile_error().get() {
                Some(message) => view! {
                    <p class="page-error">"Could not load your account: " {message}</p>
                    <p class="page-status">"Sign in again and reload this page."</p>
                }
                .into_any(),
                None => view! { <p class="page-status">"Loading..."</p> }.into_any(),
            }}
        </section>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <section class="page not-found">
            <h1>"Page not found"</h1>
            <a href="/">"Back to dashboard"</a>
        </section>
    }
}
