//! Filter State
//!
//! Inputs edit a draft; fetches only ever see the applied copy. Free-text
//! search is separate because it never triggers a fetch.

use crate::query::Query;

/// Filters that drive a fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    /// ISO `YYYY-MM-DD`, empty when unset
    pub start_date: String,
    pub end_date: String,
    pub team_leader: Option<u32>,
}

impl ListFilters {
    pub fn to_query(&self) -> Query {
        Query::new()
            .param("start_date", &self.start_date)
            .param("end_date", &self.end_date)
            .opt("team_leader_id", self.team_leader)
    }

    pub fn is_empty(&self) -> bool {
        *self == ListFilters::default()
    }

    /// ISO dates compare correctly as strings
    fn check_range(&self) -> Result<(), String> {
        if !self.start_date.is_empty()
            && !self.end_date.is_empty()
            && self.start_date > self.end_date
        {
            return Err("Start date must be on or before end date".to_string());
        }
        Ok(())
    }
}

/// How fresh rows follow an Apply or Clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refetch {
    /// The applied filters changed; whatever watches them fetches
    Filters,
    /// Applied filters are unchanged; the caller re-fetches explicitly
    Reload,
}

/// Per-view filter state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// What the inputs currently show
    pub draft: ListFilters,
    applied: ListFilters,
    search: String,
}

impl FilterState {
    pub fn applied(&self) -> &ListFilters {
        &self.applied
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Search filters in memory only; no fetch follows
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Promote the draft. Applying the same filters again still asks for a
    /// reload, so a failed fetch can be retried.
    pub fn apply(&mut self) -> Result<Refetch, String> {
        self.draft.check_range()?;
        if self.draft == self.applied {
            return Ok(Refetch::Reload);
        }
        self.applied = self.draft.clone();
        Ok(Refetch::Filters)
    }

    /// Back to defaults; the next fetch matches the one on mount
    pub fn clear(&mut self) -> Refetch {
        let changed = !self.applied.is_empty();
        *self = FilterState::default();
        if changed {
            Refetch::Filters
        } else {
            Refetch::Reload
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::list_view::{Applied, ListView, LoadState};
    use crate::models::{Lead, ListPage};

    #[test]
    fn test_draft_does_not_leak_until_apply() {
        let mut state = FilterState::default();
        state.draft.start_date = "2024-03-01".to_string();
        assert!(state.applied().is_empty());

        assert_eq!(state.apply(), Ok(Refetch::Filters));
        assert_eq!(state.applied().start_date, "2024-03-01");
        assert_eq!(state.apply(), Ok(Refetch::Reload));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut state = FilterState::default();
        state.draft.start_date = "2024-05-10".to_string();
        state.draft.end_date = "2024-05-01".to_string();
        assert!(state.apply().is_err());
        assert!(state.applied().is_empty());
    }

    #[test]
    fn test_clear_matches_initial_query() {
        let initial = FilterState::default().applied().to_query();

        let mut state = FilterState::default();
        state.draft = ListFilters {
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-31".to_string(),
            team_leader: Some(4),
        };
        state.apply().unwrap();
        state.set_search("doe");
        assert_eq!(
            state.applied().to_query().to_query_string(),
            "?start_date=2024-01-01&end_date=2024-01-31&team_leader_id=4"
        );

        assert_eq!(state.clear(), Refetch::Filters);
        assert_eq!(state.draft, ListFilters::default());
        assert_eq!(state.search(), "");
        assert_eq!(state.applied().to_query(), initial);
        assert_eq!(initial.to_query_string(), "");
    }

    #[test]
    fn test_clear_on_defaults_asks_for_reload() {
        let mut state = FilterState::default();
        state.set_search("asha");
        assert_eq!(state.clear(), Refetch::Reload);
        assert_eq!(state.search(), "");
    }

    #[test]
    fn test_reapply_retries_failed_fetch() {
        let mut state = FilterState::default();
        let mut view = ListView::<Lead>::new();
        state.draft.end_date = "2024-06-30".to_string();
        assert_eq!(state.apply(), Ok(Refetch::Filters));

        let ticket = view.begin_fetch();
        view.finish(ticket, Err(ApiError::Network("offline".into())));
        assert!(matches!(view.state(), LoadState::Failed(_)));

        // Same filters: nothing changed, so the reload has to be explicit
        assert_eq!(state.apply(), Ok(Refetch::Reload));
        let ticket = view.begin_fetch();
        let page: ListPage<Lead> = serde_json::from_value(serde_json::json!([{"id": 1, "name": "Asha"}])).unwrap();
        assert_eq!(view.finish(ticket, Ok(page)), Applied::Fresh);
        assert_eq!(view.state(), &LoadState::Loaded);
        assert_eq!(view.rows().len(), 1);
    }
}
