//! Filter Bar Component
//!
//! Date range and team leader inputs edit the draft; only Apply promotes
//! them. Search filters fetched rows on every keystroke.

use leptos::prelude::*;

use lead_desk_core::filters::{FilterState, Refetch};
use lead_desk_core::models::UserAccount;

#[component]
pub fn FilterBar(
    filters: RwSignal<FilterState>,
    /// Apply or Clear left the applied filters as they were; the page
    /// re-fetches itself (retry after a failure)
    on_reload: Callback<()>,
    /// Extra page state to reset on Clear
    #[prop(optional)]
    on_clear: Option<Callback<()>>,
    #[prop(default = true)] show_dates: bool,
    /// Team leader choices; no select when absent
    #[prop(optional_no_strip)]
    team_leaders: Option<Signal<Vec<UserAccount>>>,
    #[prop(default = "Search...")] search_placeholder: &'static str,
) -> impl IntoView {
    let (error, set_error) = signal(None::<String>);
    let show_apply = has_list_filters(show_dates, team_leaders.is_some());

    let on_apply = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !show_apply {
            return;
        }
        match filters.try_update(|f| f.apply()) {
            Some(Ok(refetch)) => {
                set_error.set(None);
                if refetch == Refetch::Reload {
                    on_reload.run(());
                }
            }
            Some(Err(message)) => set_error.set(Some(message)),
            None => {}
        }
    };

    let on_reset = move |_| {
        let refetch = filters.try_update(|f| f.clear());
        set_error.set(None);
        if let Some(reset) = on_clear {
            reset.run(());
        }
        if refetch == Some(Refetch::Reload) {
            on_reload.run(());
        }
    };

    view! {
        <form class="filter-bar" on:submit=on_apply>
            <input
                type="search"
                class="filter-search"
                placeholder=search_placeholder
                prop:value=move || filters.with(|f| f.search().to_string())
                on:input=move |ev| filters.update(|f| f.set_search(event_target_value(&ev)))
            />
            <Show when=move || show_dates>
                <label class="filter-field">
                    "From"
                    <input
                        type="date"
                        prop:value=move || filters.with(|f| f.draft.start_date.clone())
                        on:change=move |ev| filters.update(|f| f.draft.start_date = event_target_value(&ev))
                    />
                </label>
                <label class="filter-field">
                    "To"
                    <input
                        type="date"
                        prop:value=move || filters.with(|f| f.draft.end_date.clone())
                        on:change=move |ev| filters.update(|f| f.draft.end_date = event_target_value(&ev))
                    />
                </label>
            </Show>
            {team_leaders.map(|leaders| view! {
                <select
                    class="filter-field"
                    prop:value=move || filters.with(|f| {
                        f.draft.team_leader.map(|id| id.to_string()).unwrap_or_default()
                    })
                    on:change=move |ev| {
                        let picked = event_target_value(&ev).parse::<u32>().ok();
                        filters.update(|f| f.draft.team_leader = picked);
                    }
                >
                    <option value="">"All team leaders"</option>
                    {move || leaders
                        .get()
                        .into_iter()
                        .map(|tl| view! { <option value=tl.id.to_string()>{tl.name}</option> })
                        .collect_view()}
                </select>
            })}
            <Show when=move || show_apply>
                <button type="submit" class="btn btn-primary">"Apply"</button>
            </Show>
            <button type="button" class="btn" on:click=on_reset>"Clear"</button>
            {move || error.get().map(|message| view! { <span class="filter-error">{message}</span> })}
        </form>
    }
}

/// Apply only means something when an input drives the fetch
fn has_list_filters(show_dates: bool, has_team_leaders: bool) -> bool {
    show_dates || has_team_leaders
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_hidden_without_list_filters() {
        assert!(!has_list_filters(false, false));
        assert!(has_list_filters(true, false));
        assert!(has_list_filters(false, true));
    }
}
