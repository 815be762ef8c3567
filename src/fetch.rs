//! List Fetch Helpers
//!
//! Wires a [`ListView`] signal to the async API: every fetch takes a
//! ticket first, so only the latest one lands.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Serialize;

use lead_desk_core::filters::FilterState;
use lead_desk_core::list_view::Applied;
use lead_desk_core::models::{Counts, Entity, ListPage};
use lead_desk_core::{ApiResult, ListView, LoadState};

/// Start a fetch into `view`. Results of fetches issued before a newer
/// one are dropped by the view itself.
pub fn spawn_list_fetch<T, Fut>(view: RwSignal<ListView<T>>, fetch: Fut)
where
    T: Entity + Send + Sync + 'static,
    T::Id: Send + Sync,
    Fut: Future<Output = ApiResult<ListPage<T>>> + 'static,
{
    let Some(ticket) = view.try_update(|v| v.begin_fetch()) else {
        return;
    };
    spawn_local(async move {
        let result = fetch.await;
        if view.try_update(|v| v.finish(ticket, result)) == Some(Applied::Stale) {
            log::debug!("[fetch] result superseded");
        }
    });
}

/// Drop whatever is in flight when the owning view unmounts
pub fn cancel_on_cleanup<T>(view: RwSignal<ListView<T>>)
where
    T: Entity + Send + Sync + 'static,
    T::Id: Send + Sync,
{
    on_cleanup(move || {
        view.try_update(|v| v.cancel());
    });
}

/// Single-value fetches (counts, profile) use a bare generation counter
#[derive(Clone, Copy)]
pub struct Generation(RwSignal<u64>);

impl Generation {
    pub fn new() -> Self {
        let generation = Self(RwSignal::new(0));
        let inner = generation.0;
        on_cleanup(move || {
            inner.try_update(|g| *g += 1);
        });
        generation
    }

    pub fn next(&self) -> u64 {
        self.0.try_update(|g| {
            *g += 1;
            *g
        })
        .unwrap_or_default()
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.try_get_untracked() == Some(ticket)
    }
}

/// Summary counts once the list has loaded; `None` shows placeholders
pub fn loaded_counts<T>(view: RwSignal<ListView<T>>) -> Signal<Option<Counts>>
where
    T: Entity + Send + Sync + 'static,
    T::Id: Send + Sync,
{
    Signal::derive(move || {
        view.with(|v| (*v.state() == LoadState::Loaded).then(|| v.counts().clone()))
    })
}

/// Fetched rows after the in-memory search; typing never hits the network
pub fn searched_rows<T>(view: RwSignal<ListView<T>>, filters: RwSignal<FilterState>) -> Signal<Vec<T>>
where
    T: Entity + Serialize + Send + Sync + 'static,
    T::Id: Send + Sync,
{
    Signal::derive(move || {
        let search = filters.with(|f| f.search().to_string());
        view.with(|v| v.visible_rows(&search))
    })
}
