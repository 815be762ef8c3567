//! Optimistic Updates
//!
//! Snapshot a row, change it locally, then either take the server's value
//! or put the snapshot back.

use crate::models::{Activatable, Entity};

/// A pending local change to one row
#[derive(Debug, Clone, PartialEq)]
#[must_use = "an optimistic change must be committed or rolled back"]
pub struct Optimistic<T: Entity> {
    snapshot: T,
}

impl<T: Entity> Optimistic<T> {
    /// Apply `change` to the row with `id`. `None` when the row is gone.
    pub fn apply(rows: &mut [T], id: T::Id, change: impl FnOnce(&mut T)) -> Option<Self> {
        let row = rows.iter_mut().find(|r| r.id() == id)?;
        let snapshot = row.clone();
        change(row);
        Some(Self { snapshot })
    }

    pub fn id(&self) -> T::Id {
        self.snapshot.id()
    }

    /// Server accepted: let `confirm` overwrite the guess with what it reported
    pub fn commit(self, rows: &mut [T], confirm: impl FnOnce(&mut T)) {
        if let Some(row) = rows.iter_mut().find(|r| r.id() == self.snapshot.id()) {
            confirm(row);
        }
    }

    /// Server refused: restore the snapshot
    pub fn rollback(self, rows: &mut [T]) {
        self.revert(rows, |row, before| *row = before.clone());
    }

    /// Server refused: undo just the changed part. The row may have been
    /// reloaded meanwhile, so other fields keep their current values.
    pub fn revert(self, rows: &mut [T], undo: impl FnOnce(&mut T, &T)) {
        let id = self.snapshot.id();
        if let Some(row) = rows.iter_mut().find(|r| r.id() == id) {
            undo(row, &self.snapshot);
        }
    }
}

/// Flip a row's active flag ahead of the toggle request
pub fn flip_active<T: Activatable>(rows: &mut [T], id: T::Id) -> Option<Optimistic<T>> {
    Optimistic::apply(rows, id, |row| {
        let next = !row.is_active();
        row.set_active(next);
    })
}

/// Finish a toggle with the server's outcome
pub fn settle_active<T: Activatable, E>(
    pending: Optimistic<T>,
    rows: &mut [T],
    outcome: Result<bool, E>,
) -> Result<bool, E> {
    match outcome {
        Ok(active) => {
            pending.commit(rows, |row| row.set_active(active));
            Ok(active)
        }
        Err(err) => {
            pending.revert(rows, |row, before| row.set_active(before.is_active()));
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserAccount;

    fn staff(id: u32, active: bool) -> UserAccount {
        serde_json::from_value(serde_json::json!({"id": id, "name": format!("S{}", id), "is_active": active}))
            .unwrap()
    }

    #[test]
    fn test_rollback_restores_prior_value() {
        let mut rows = vec![staff(1, false), staff(2, true)];
        let pending = flip_active(&mut rows, 1).unwrap();
        assert!(rows[0].is_active);

        let result = settle_active(pending, &mut rows, Err::<bool, &str>("server down"));
        assert_eq!(result, Err("server down"));
        assert!(!rows[0].is_active);
        assert!(rows[1].is_active);
    }

    #[test]
    fn test_server_value_wins_over_guess() {
        let mut rows = vec![staff(1, false)];

        let pending = flip_active(&mut rows, 1).unwrap();
        settle_active(pending, &mut rows, Ok::<bool, ()>(true)).unwrap();
        assert!(rows[0].is_active);

        // Second toggle: client guesses false, server says it is still active
        let pending = flip_active(&mut rows, 1).unwrap();
        assert!(!rows[0].is_active);
        settle_active(pending, &mut rows, Ok::<bool, ()>(true)).unwrap();
        assert!(rows[0].is_active);
    }

    #[test]
    fn test_failed_toggle_keeps_reloaded_fields() {
        let mut rows = vec![staff(1, false)];
        let pending = flip_active(&mut rows, 1).unwrap();

        // An edit lands and the list reloads while the toggle is in flight
        let mut fresh = staff(1, true);
        fresh.name = "Renamed".to_string();
        rows = vec![fresh];

        assert!(settle_active(pending, &mut rows, Err::<bool, &str>("timeout")).is_err());
        assert!(!rows[0].is_active);
        assert_eq!(rows[0].name, "Renamed");
    }

    #[test]
    fn test_rollback_restores_whole_row() {
        let mut rows = vec![staff(1, true)];
        let pending = Optimistic::apply(&mut rows, 1, |row| row.name = "Draft".to_string()).unwrap();
        pending.rollback(&mut rows);
        assert_eq!(rows[0].name, "S1");
    }

    #[test]
    fn test_missing_row() {
        let mut rows = vec![staff(1, true)];
        assert!(flip_active(&mut rows, 99).is_none());
    }
}
