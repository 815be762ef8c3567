//! Table Columns
//!
//! Column sets and cell text for every table in the app.

use serde::Serialize;
use serde_json::Value;

use lead_desk_core::columns::{Breakpoint::*, ColumnSpec};
use lead_desk_core::models::{Lead, ProductivityRow};

/// Shown for empty cells
const BLANK: &str = "-";

pub const USER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("name", "Name", Mobile),
    ColumnSpec::new("mobile", "Mobile", Tablet),
    ColumnSpec::new("email", "Email", Tablet),
    ColumnSpec::new("username", "Username", Desktop),
    ColumnSpec::new("team_leader", "Team Leader", Desktop),
    ColumnSpec::new("total_leads", "Leads", Desktop),
    ColumnSpec::new("created_date", "Joined", Desktop),
];

pub const ADMIN_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("name", "Name", Mobile),
    ColumnSpec::new("mobile", "Mobile", Tablet),
    ColumnSpec::new("email", "Email", Tablet),
    ColumnSpec::new("username", "Username", Desktop),
    ColumnSpec::new("company", "Company", Desktop),
    ColumnSpec::new("created_date", "Joined", Desktop),
];

pub const LEAD_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("name", "Name", Mobile),
    ColumnSpec::new("status", "Status", Mobile),
    ColumnSpec::new("call", "Phone", Tablet),
    ColumnSpec::new("follow_up", "Follow-up", Tablet),
    ColumnSpec::new("assigned_to", "Assigned To", Desktop),
    ColumnSpec::new("message", "Remarks", Desktop),
    ColumnSpec::new("email", "Email", Desktop),
    ColumnSpec::new("created_date", "Created", Desktop),
];

pub const PRODUCTIVITY_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("name", "Staff", Mobile),
    ColumnSpec::new("total_leads", "Leads", Mobile),
    ColumnSpec::new("interested", "Interested", Tablet),
    ColumnSpec::new("interested_percentage", "Interested %", Tablet),
    ColumnSpec::new("visit", "Visits", Tablet),
    ColumnSpec::new("visit_percentage", "Visit %", Desktop),
    ColumnSpec::new("not_interested", "Not Interested", Desktop),
    ColumnSpec::new("not_picked", "Not Picked", Desktop),
    ColumnSpec::new("lost", "Lost", Desktop),
    ColumnSpec::new("team_leader", "Team Leader", Desktop),
];

pub const ATTENDANCE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("date", "Date", Mobile),
    ColumnSpec::new("status", "Status", Mobile),
    ColumnSpec::new("check_in", "Check In", Tablet),
    ColumnSpec::new("check_out", "Check Out", Tablet),
    ColumnSpec::new("working_hours", "Hours", Desktop),
];

/// Report tags accepted by the lead list endpoints
pub const LEAD_TAGS: &[(&str, &str)] = &[
    ("all", "All"),
    ("today_follow", "Today's Follow-ups"),
    ("interested", "Interested"),
    ("visit", "Visit"),
    ("not_interested", "Not Interested"),
    ("not_picked", "Not Picked"),
    ("other_location", "Other Location"),
    ("lost", "Lost"),
];

pub fn tag_label(tag: &str) -> &str {
    LEAD_TAGS
        .iter()
        .find(|(key, _)| *key == tag)
        .map(|(_, label)| *label)
        .unwrap_or(tag)
}

// ========================
// Cell text
// ========================

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => BLANK.to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.trim().is_empty() => BLANK.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        // Nested user references: prefer the name
        Value::Object(obj) => obj
            .get("name")
            .or_else(|| obj.get("id"))
            .map(value_text)
            .unwrap_or_else(|| BLANK.to_string()),
    }
}

/// Any serializable row, by JSON field name
pub fn json_cell<T: Serialize>(row: &T, key: &'static str) -> String {
    match serde_json::to_value(row) {
        Ok(Value::Object(obj)) => obj.get(key).map(value_text).unwrap_or_else(|| BLANK.to_string()),
        _ => BLANK.to_string(),
    }
}

pub fn lead_cell(lead: &Lead, key: &'static str) -> String {
    match key {
        "status" => lead.status.label().to_string(),
        "assigned_to" => lead
            .assigned_to
            .as_ref()
            .map(|u| u.display_name())
            .unwrap_or_else(|| BLANK.to_string()),
        "follow_up" => match (&lead.follow_up_date, &lead.follow_up_time) {
            (Some(date), Some(time)) => format!("{} {}", date, time),
            (Some(date), None) => date.clone(),
            _ => BLANK.to_string(),
        },
        _ => json_cell(lead, key),
    }
}

pub fn productivity_cell(row: &ProductivityRow, key: &'static str) -> String {
    match key {
        "interested_percentage" => format!("{}%", row.interested_percentage()),
        "visit_percentage" => format!("{}%", row.visit_percentage()),
        _ => json_cell(row, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_cell_prefers_user_ref_name() {
        let row = json!({"name": "Asha", "team_leader": {"id": 4, "name": "Ravi"}, "mobile": ""});
        assert_eq!(json_cell(&row, "team_leader"), "Ravi");
        assert_eq!(json_cell(&row, "mobile"), BLANK);
        assert_eq!(json_cell(&row, "missing"), BLANK);
    }

    #[test]
    fn test_lead_cell_uses_display_label() {
        let lead: Lead = serde_json::from_value(json!({
            "id": 1,
            "name": "John Doe",
            "status": "Intrested",
            "follow_up_date": "2024-05-02",
            "follow_up_time": "10:30"
        }))
        .unwrap();
        assert_eq!(lead_cell(&lead, "status"), "Interested");
        assert_eq!(lead_cell(&lead, "follow_up"), "2024-05-02 10:30");
    }

    #[test]
    fn test_productivity_percentages() {
        let row: ProductivityRow =
            serde_json::from_value(json!({"id": 1, "total_leads": 8, "interested": 2, "visit": 1})).unwrap();
        assert_eq!(productivity_cell(&row, "interested_percentage"), "25%");
        assert_eq!(productivity_cell(&row, "visit_percentage"), "13%");
    }
}
