//! Superadmin Pages

use leptos::prelude::*;
use leptos::task::spawn_local;

use lead_desk_core::endpoints::superadmin;
use lead_desk_core::kpi::SUPERADMIN_CARDS;
use lead_desk_core::models::Counts;

use crate::api::use_api;
use crate::components::KpiCardRow;
use crate::fetch::Generation;

#[component]
pub fn SuperadminDashboard() -> impl IntoView {
    let api = use_api();
    let generation = Generation::new();
    let counts = RwSignal::new(None::<Counts>);
    let error = RwSignal::new(None::<String>);

    let ticket = generation.next();
    spawn_local(async move {
        let result = superadmin::dashboard_counts(&api).await;
        if !generation.is_current(ticket) {
            return;
        }
        match result {
            Ok(loaded) => counts.set(Some(loaded)),
            Err(err) => error.set(Some(err.user_message())),
        }
    });

    view! {
        <section class="page superadmin-dashboard">
            <header class="page-header">
                <h1>"Platform Overview"</h1>
            </header>
            {move || error.get().map(|message| view! { <p class="page-error">"Error: " {message}</p> })}
            <KpiCardRow cards=SUPERADMIN_CARDS counts=counts />
        </section>
    }
}
