//! KPI Card Row Component
//!
//! Metric tiles resolved against a counts object. Linked cards render as
//! router anchors.

use leptos::prelude::*;
use leptos_router::components::A;

use lead_desk_core::kpi::{self, KpiCard};
use lead_desk_core::models::Counts;

#[component]
pub fn KpiCardRow(
    cards: &'static [KpiCard],
    /// `None` until the summary arrives
    #[prop(into)]
    counts: Signal<Option<Counts>>,
) -> impl IntoView {
    view! {
        <div class="kpi-row">
            {move || match counts.get() {
                None => cards
                    .iter()
                    .map(|card| view! {
                        <div class="kpi-card kpi-placeholder">
                            <span class="kpi-title">{card.title}</span>
                            <span class="kpi-value">"–"</span>
                        </div>
                    })
                    .collect_view()
                    .into_any(),
                Some(counts) => kpi::resolve(cards, &counts)
                    .into_iter()
                    .map(|(card, value)| view! { <KpiTile card=*card value=value /> })
                    .collect_view()
                    .into_any(),
            }}
        </div>
    }
}

#[component]
fn KpiTile(card: KpiCard, value: i64) -> impl IntoView {
    let class = format!("kpi-card {}", card.tone.css_class());
    let body = view! {
        <span class="kpi-icon">{card.icon}</span>
        <span class="kpi-title">{card.title}</span>
        <span class="kpi-value">{value}</span>
    };

    match card.link {
        Some(href) => view! { <A href=href attr:class=class>{body}</A> }.into_any(),
        None => view! { <div class=class>{body}</div> }.into_any(),
    }
}
