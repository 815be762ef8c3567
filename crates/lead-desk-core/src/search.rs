//! In-Memory Search
//!
//! Case-insensitive substring match over every scalar a row serializes to.

use serde::Serialize;
use serde_json::Value;

/// Does any scalar field of `row` contain `needle`?
/// An empty needle matches everything.
pub fn row_matches<T: Serialize>(row: &T, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    match serde_json::to_value(row) {
        Ok(value) => value_contains(&value, &needle),
        Err(_) => false,
    }
}

/// Rows that match, in their original order
pub fn filter_rows<T: Serialize + Clone>(rows: &[T], needle: &str) -> Vec<T> {
    if needle.trim().is_empty() {
        return rows.to_vec();
    }
    rows.iter().filter(|r| row_matches(*r, needle)).cloned().collect()
}

fn value_contains(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Number(n) => n.to_string().contains(needle),
        Value::Bool(b) => b.to_string().contains(needle),
        Value::Array(items) => items.iter().any(|v| value_contains(v, needle)),
        Value::Object(map) => map.values().any(|v| value_contains(v, needle)),
        Value::Null => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lead, LeadStatus, UserRef};

    fn lead(id: u32, name: &str, call: &str) -> Lead {
        Lead {
            id,
            name: name.to_string(),
            call: Some(call.to_string()),
            email: None,
            status: LeadStatus::Leads,
            message: None,
            follow_up_date: None,
            follow_up_time: None,
            assigned_to: Some(UserRef::Name("Meera Nair".to_string())),
            team_leader: None,
            created_date: Some("2024-02-11".to_string()),
        }
    }

    #[test]
    fn test_case_insensitive_name_match() {
        let rows = vec![lead(1, "John Doe", "9000"), lead(2, "Jane Roe", "9111")];
        let hits = filter_rows(&rows, "doe");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "John Doe");
    }

    #[test]
    fn test_matches_numbers_and_nested_fields() {
        let row = lead(42, "Sam", "98450");
        assert!(row_matches(&row, "8450"));
        assert!(row_matches(&row, "42"));
        assert!(row_matches(&row, "NAIR"));
        assert!(row_matches(&row, "2024-02"));
        assert!(!row_matches(&row, "zzz"));
    }

    #[test]
    fn test_blank_search_keeps_all() {
        let rows = vec![lead(1, "A", "1"), lead(2, "B", "2")];
        assert_eq!(filter_rows(&rows, "  ").len(), 2);
    }
}
