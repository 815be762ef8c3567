//! Models
//!
//! Records mirrored 1:1 from backend JSON. The client never owns these;
//! it holds transient copies for display and re-fetches after mutations.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::kpi::percentage;

// ========================
// Entity
// ========================

/// Anything rendered as a table row
pub trait Entity: Clone {
    /// Row identifier; drives keyed rendering and the expanded row
    type Id: Copy + Eq + std::hash::Hash + fmt::Debug + 'static;

    fn id(&self) -> Self::Id;
}

/// Rows with an active/inactive switch
pub trait Activatable: Entity {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

// ========================
// Leads
// ========================

/// Pipeline status. Spellings match the backend, typo included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeadStatus {
    #[default]
    Leads,
    Interested,
    NotInterested,
    OtherLocation,
    NotPicked,
    Lost,
    Visit,
    /// Status strings this build does not know about
    Other(String),
}

impl LeadStatus {
    /// Statuses a user can pick when updating a lead
    pub const SELECTABLE: [LeadStatus; 7] = [
        LeadStatus::Leads,
        LeadStatus::Interested,
        LeadStatus::NotInterested,
        LeadStatus::OtherLocation,
        LeadStatus::NotPicked,
        LeadStatus::Lost,
        LeadStatus::Visit,
    ];

    /// Wire value
    pub fn as_str(&self) -> &str {
        match self {
            LeadStatus::Leads => "Leads",
            LeadStatus::Interested => "Intrested",
            LeadStatus::NotInterested => "Not Interested",
            LeadStatus::OtherLocation => "Other Location",
            LeadStatus::NotPicked => "Not Picked",
            LeadStatus::Lost => "Lost",
            LeadStatus::Visit => "Visit",
            LeadStatus::Other(s) => s,
        }
    }

    /// Display label (fixes the backend spelling)
    pub fn label(&self) -> &str {
        match self {
            LeadStatus::Interested => "Interested",
            other => other.as_str(),
        }
    }
}

impl From<String> for LeadStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Leads" => LeadStatus::Leads,
            "Intrested" | "Interested" => LeadStatus::Interested,
            "Not Interested" => LeadStatus::NotInterested,
            "Other Location" => LeadStatus::OtherLocation,
            "Not Picked" => LeadStatus::NotPicked,
            "Lost" => LeadStatus::Lost,
            "Visit" => LeadStatus::Visit,
            _ => LeadStatus::Other(value),
        }
    }
}

impl From<LeadStatus> for String {
    fn from(value: LeadStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reference to another user: the backend sends an id, a name, or both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(u32),
    Name(String),
    Object {
        id: u32,
        #[serde(default)]
        name: String,
    },
}

impl UserRef {
    pub fn id(&self) -> Option<u32> {
        match self {
            UserRef::Id(id) | UserRef::Object { id, .. } => Some(*id),
            UserRef::Name(_) => None,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            UserRef::Id(id) => format!("#{}", id),
            UserRef::Name(name) => name.clone(),
            UserRef::Object { id, name } if name.is_empty() => format!("#{}", id),
            UserRef::Object { name, .. } => name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub call: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub follow_up_date: Option<String>,
    #[serde(default)]
    pub follow_up_time: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<UserRef>,
    #[serde(default)]
    pub team_leader: Option<UserRef>,
    #[serde(default)]
    pub created_date: Option<String>,
}

impl Entity for Lead {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Body for a staff member moving a lead through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadStatusUpdate {
    pub status: LeadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_time: Option<String>,
}

impl LeadStatusUpdate {
    /// From raw form inputs; blank inputs are left out of the body
    pub fn from_inputs(status: LeadStatus, message: &str, follow_up_date: &str, follow_up_time: &str) -> Self {
        let non_blank = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Self {
            status,
            message: non_blank(message),
            follow_up_date: non_blank(follow_up_date),
            follow_up_time: non_blank(follow_up_time),
        }
    }
}

// ========================
// Users
// ========================

/// Staff member, team leader or admin. Which relation is filled depends on
/// the role: staff point at a team leader, team leaders at an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub ifsc_code: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub pan_number: Option<String>,
    #[serde(default)]
    pub aadhar_number: Option<String>,
    /// Admins only
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default = "default_true", alias = "user_active", alias = "active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub team_leader: Option<UserRef>,
    #[serde(default)]
    pub admin: Option<UserRef>,
    #[serde(default)]
    pub total_leads: Option<i64>,
    #[serde(default)]
    pub earnings: Option<Value>,
}

pub type StaffMember = UserAccount;
pub type TeamLeader = UserAccount;
pub type AdminUser = UserAccount;

fn default_true() -> bool {
    true
}

impl Entity for UserAccount {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Activatable for UserAccount {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

/// Response of the toggle-status endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToggleStatusResponse {
    #[serde(alias = "user_active", alias = "active")]
    pub is_active: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Role of the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Superadmin,
    Admin,
    #[serde(alias = "teamleader", alias = "team-leader")]
    TeamLeader,
    Staff,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Landing route for this role
    pub fn home(&self) -> &'static str {
        match self {
            Role::Superadmin => "/superadmin",
            Role::Admin => "/admin",
            Role::TeamLeader => "/team-leader",
            Role::Staff | Role::Unknown => "/staff",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Superadmin => "Superadmin",
            Role::Admin => "Admin",
            Role::TeamLeader => "Team Leader",
            Role::Staff => "Staff",
            Role::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Unknown
}

// ========================
// Reports
// ========================

/// One staff member's lead breakdown in the productivity report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityRow {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team_leader: Option<UserRef>,
    #[serde(default)]
    pub total_leads: i64,
    #[serde(default)]
    pub interested: i64,
    #[serde(default)]
    pub not_interested: i64,
    #[serde(default)]
    pub not_picked: i64,
    #[serde(default)]
    pub lost: i64,
    #[serde(default)]
    pub visit: i64,
}

impl ProductivityRow {
    pub fn interested_percentage(&self) -> i64 {
        percentage(self.interested, self.total_leads)
    }

    pub fn visit_percentage(&self) -> i64 {
        percentage(self.visit, self.total_leads)
    }
}

impl Entity for ProductivityRow {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

// ========================
// Attendance
// ========================

/// One day of a staff member's attendance. History rows often come
/// without an `id`; the day itself then keys the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub id: u32,
    pub date: String,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub working_hours: Option<String>,
}

impl Entity for AttendanceRecord {
    type Id = u32;

    /// Server id, else the date packed as `YYYYMMDD`
    fn id(&self) -> u32 {
        if self.id != 0 {
            return self.id;
        }
        self.date
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(8)
            .fold(0u32, |acc, c| acc * 10 + c.to_digit(10).unwrap_or(0))
    }
}

/// Header summary for the staff area
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceToday {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub checked_in: bool,
    #[serde(default)]
    pub check_in_time: Option<String>,
    #[serde(default)]
    pub check_out_time: Option<String>,
}

impl AttendanceToday {
    pub fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }

    pub fn summary(&self) -> String {
        match (&self.check_in_time, &self.check_out_time) {
            (Some(inn), Some(out)) => format!("Checked in {} · out {}", inn, out),
            (Some(inn), None) => format!("Checked in at {}", inn),
            _ => "Not checked in".to_string(),
        }
    }
}

// ========================
// Counts & list envelope
// ========================

/// Named counters attached to list responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, Value>);

impl Counts {
    /// Counter value; missing or non-numeric keys read as 0
    pub fn get(&self, key: &str) -> i64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.round() as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Counts(iter.into_iter().map(|(k, v)| (k.into(), Value::from(v))).collect())
    }
}

/// Keys a list endpoint may put its rows under
const ROW_KEYS: [&str; 4] = ["results", "staff_list", "leads", "data"];
/// Keys a list endpoint may put its summary under
const COUNT_KEYS: [&str; 2] = ["counts", "lead_counts"];

/// A page of rows plus whatever summary came with it
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    pub counts: Counts,
    pub count: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            counts: Counts::default(),
            count: None,
            next: None,
            previous: None,
        }
    }
}

impl<T> ListPage<T> {
    pub fn new(rows: Vec<T>, counts: Counts) -> Self {
        Self {
            rows,
            counts,
            ..Default::default()
        }
    }
}

impl<T: DeserializeOwned> ListPage<T> {
    /// Accepts a bare array or any of the known envelopes
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Array(_) => Ok(ListPage::new(serde_json::from_value(value)?, Counts::default())),
            Value::Object(mut obj) => {
                let rows = match ROW_KEYS.iter().find_map(|k| obj.remove(*k)) {
                    Some(Value::Null) | None => Vec::new(),
                    Some(rows) => serde_json::from_value(rows)?,
                };
                let counts = match COUNT_KEYS.iter().find_map(|k| obj.remove(*k)) {
                    Some(Value::Null) | None => Counts::default(),
                    Some(counts) => serde_json::from_value(counts)?,
                };
                Ok(ListPage {
                    rows,
                    counts,
                    count: obj.get("count").and_then(Value::as_u64),
                    next: obj.get("next").and_then(Value::as_str).map(str::to_string),
                    previous: obj.get("previous").and_then(Value::as_str).map(str::to_string),
                })
            }
            Value::Null => Ok(ListPage::default()),
            other => Err(serde_json::Error::custom(format!(
                "expected list envelope, got {}",
                other
            ))),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ListPage<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ListPage::from_value(value).map_err(D::Error::custom)
    }
}
