//! List View State
//!
//! The state behind every list page: load state, rows, counts, the one
//! expanded row, and the Add/Edit dialog. Fetches are fenced by a
//! generation counter so only the most recently issued fetch can land.

use log::debug;
use serde::Serialize;

use crate::error::ApiError;
use crate::forms::FormMode;
use crate::models::{Counts, Entity, ListPage};
use crate::search::filter_rows;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    /// Message for the inline error branch
    Failed(String),
}

/// Handed out by [`ListView::begin_fetch`], handed back with the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Whether a finished fetch was used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Fresh,
    /// A newer fetch was issued (or the view went away); result dropped
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T: Entity> {
    rows: Vec<T>,
    counts: Counts,
    total: Option<u64>,
    state: LoadState,
    generation: u64,
    expanded: Option<T::Id>,
}

impl<T: Entity> Default for ListView<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            counts: Counts::default(),
            total: None,
            state: LoadState::Idle,
            generation: 0,
            expanded: None,
        }
    }
}

impl<T: Entity> ListView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// For optimistic edits of individual rows
    pub fn rows_mut(&mut self) -> &mut [T] {
        &mut self.rows
    }

    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    /// Server-side total for paginated endpoints
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    // ========================
    // Fetch lifecycle
    // ========================

    /// Enter Loading; any fetch issued earlier becomes stale
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        FetchTicket(self.generation)
    }

    /// Land a fetch result if it is still the latest one.
    /// Failures clear the rows so nothing stale sits next to the error.
    pub fn finish(&mut self, ticket: FetchTicket, result: Result<ListPage<T>, ApiError>) -> Applied {
        if ticket.0 != self.generation {
            debug!("[list] dropping stale fetch #{} (current #{})", ticket.0, self.generation);
            return Applied::Stale;
        }
        match result {
            Ok(page) => {
                self.rows = page.rows;
                self.counts = page.counts;
                self.total = page.count;
                self.state = LoadState::Loaded;
                if let Some(id) = self.expanded {
                    if !self.rows.iter().any(|r| r.id() == id) {
                        self.expanded = None;
                    }
                }
            }
            Err(err) => {
                self.rows.clear();
                self.counts = Counts::default();
                self.total = None;
                self.expanded = None;
                self.state = LoadState::Failed(err.user_message());
            }
        }
        Applied::Fresh
    }

    /// View is going away: whatever is in flight must not land
    pub fn cancel(&mut self) {
        self.generation += 1;
        if self.state == LoadState::Loading {
            self.state = LoadState::Idle;
        }
    }

    // ========================
    // Expanded row
    // ========================

    /// Expanding a row collapses whichever row was open
    pub fn toggle_expanded(&mut self, id: T::Id) {
        self.expanded = if self.expanded == Some(id) { None } else { Some(id) };
    }

    pub fn expanded(&self) -> Option<T::Id> {
        self.expanded
    }

    pub fn is_expanded(&self, id: T::Id) -> bool {
        self.expanded == Some(id)
    }
}

impl<T: Entity + Serialize> ListView<T> {
    /// Rows after the in-memory search
    pub fn visible_rows(&self, search: &str) -> Vec<T> {
        filter_rows(&self.rows, search)
    }
}

// ========================
// Dialogs
// ========================

/// Add/Edit dialog lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open(FormMode),
    Submitting(FormMode),
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, DialogState::Submitting(_))
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self {
            DialogState::Closed => None,
            DialogState::Open(mode) | DialogState::Submitting(mode) => Some(*mode),
        }
    }

    /// Start a submit; `None` if one is already running or nothing is open
    pub fn begin_submit(&mut self) -> Option<FormMode> {
        match *self {
            DialogState::Open(mode) => {
                *self = DialogState::Submitting(mode);
                Some(mode)
            }
            _ => None,
        }
    }

    /// Success closes the dialog. Failure leaves it open for another try and
    /// returns the message to toast and show inline.
    pub fn finish_submit<T>(&mut self, result: &Result<T, ApiError>) -> Option<String> {
        if let DialogState::Submitting(mode) = *self {
            *self = if result.is_ok() { DialogState::Closed } else { DialogState::Open(mode) };
        }
        result.as_ref().err().map(ApiError::user_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceRecord, Lead, LeadStatus, ProductivityRow};

    fn lead(id: u32, name: &str) -> Lead {
        serde_json::from_value(serde_json::json!({"id": id, "name": name})).unwrap()
    }

    fn page(rows: Vec<Lead>) -> ListPage<Lead> {
        let counts = [("total_leads", rows.len() as i64)].into_iter().collect();
        ListPage::new(rows, counts)
    }

    #[test]
    fn test_load_then_fail_clears_rows() {
        let mut view = ListView::<Lead>::new();
        let t1 = view.begin_fetch();
        assert!(view.is_loading());
        assert_eq!(view.finish(t1, Ok(page(vec![lead(1, "A"), lead(2, "B")]))), Applied::Fresh);
        assert_eq!(view.rows().len(), 2);
        assert_eq!(view.counts().get("total_leads"), 2);

        let t2 = view.begin_fetch();
        view.finish(t2, Err(ApiError::Http { status: 500, message: "boom".into() }));
        assert_eq!(view.error(), Some("boom"));
        assert!(view.rows().is_empty());
        assert_eq!(view.counts().get("total_leads"), 0);
    }

    #[test]
    fn test_out_of_order_responses() {
        let mut view = ListView::<Lead>::new();
        let old = view.begin_fetch();
        let new = view.begin_fetch();

        assert_eq!(view.finish(new, Ok(page(vec![lead(2, "New filter")]))), Applied::Fresh);
        assert_eq!(view.finish(old, Ok(page(vec![lead(1, "Old filter")]))), Applied::Stale);
        assert_eq!(view.rows()[0].name, "New filter");
    }

    #[test]
    fn test_cancel_discards_in_flight() {
        let mut view = ListView::<Lead>::new();
        let ticket = view.begin_fetch();
        view.cancel();
        assert_eq!(view.state(), &LoadState::Idle);
        assert_eq!(view.finish(ticket, Ok(page(vec![lead(1, "late")]))), Applied::Stale);
        assert!(view.rows().is_empty());
    }

    #[test]
    fn test_expand_is_exclusive() {
        let mut view = ListView::<Lead>::new();
        let t = view.begin_fetch();
        view.finish(t, Ok(page(vec![lead(1, "A"), lead(2, "B")])));

        view.toggle_expanded(1);
        assert!(view.is_expanded(1));
        view.toggle_expanded(2);
        assert!(view.is_expanded(2));
        assert!(!view.is_expanded(1));
        view.toggle_expanded(2);
        assert_eq!(view.expanded(), None);
    }

    #[test]
    fn test_expanded_row_dropped_when_gone() {
        let mut view = ListView::<Lead>::new();
        let t = view.begin_fetch();
        view.finish(t, Ok(page(vec![lead(1, "A")])));
        view.toggle_expanded(1);

        let t = view.begin_fetch();
        view.finish(t, Ok(page(vec![lead(3, "C")])));
        assert_eq!(view.expanded(), None);
    }

    #[test]
    fn test_expand_one_attendance_day_without_ids() {
        let mut view = ListView::<AttendanceRecord>::new();
        let t = view.begin_fetch();
        let page: ListPage<AttendanceRecord> = serde_json::from_value(serde_json::json!([
            {"date": "2024-05-01", "status": "Present"},
            {"date": "2024-05-02", "status": "Present"},
            {"date": "2024-05-03", "status": "Absent"}
        ]))
        .unwrap();
        view.finish(t, Ok(page));

        let first = view.rows()[0].id();
        view.toggle_expanded(first);
        let expanded = view.rows().iter().filter(|r| view.is_expanded(r.id())).count();
        assert_eq!(expanded, 1);
        assert_eq!(view.expanded(), Some(20240501));

        let third = view.rows()[2].id();
        view.toggle_expanded(third);
        assert!(!view.is_expanded(first));
        assert!(view.is_expanded(20240503));
    }

    #[test]
    fn test_search_does_not_touch_rows() {
        let mut view = ListView::<Lead>::new();
        let t = view.begin_fetch();
        let mut john = lead(1, "John Doe");
        john.status = LeadStatus::Visit;
        view.finish(t, Ok(page(vec![john, lead(2, "Jane Roe")])));

        let hits = view.visible_rows("doe");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
        assert_eq!(view.visible_rows("visit").len(), 1);
        assert_eq!(view.rows().len(), 2);
    }

    #[test]
    fn test_report_rows() {
        let mut view = ListView::<ProductivityRow>::new();
        let t = view.begin_fetch();
        let page: ListPage<ProductivityRow> = serde_json::from_value(serde_json::json!({
            "staff_list": [{"id": 1, "total_leads": 10, "interested": 5, "visit": 2}],
            "counts": {"total_leads": 10, "interested": 5}
        }))
        .unwrap();
        view.finish(t, Ok(page));
        assert_eq!(view.rows()[0].interested_percentage(), 50);
    }

    #[test]
    fn test_dialog_submit_cycle() {
        let mut dialog = DialogState::Open(FormMode::Create);
        assert_eq!(dialog.begin_submit(), Some(FormMode::Create));
        assert!(dialog.is_submitting());
        assert_eq!(dialog.begin_submit(), None);

        let refused: Result<(), ApiError> = Err(ApiError::Http { status: 415, message: "Unsupported Media Type".into() });
        assert_eq!(dialog.finish_submit(&refused).as_deref(), Some("Unsupported Media Type"));
        assert_eq!(dialog, DialogState::Open(FormMode::Create));

        dialog.begin_submit();
        assert_eq!(dialog.finish_submit(&Ok::<(), ApiError>(())), None);
        assert!(!dialog.is_open());
    }
}
