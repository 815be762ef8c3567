//! Add/Edit Forms
//!
//! A form is a schema of fields split over two tabs. The same schema drives
//! rendering, required-field checks, prefill on edit and the multipart body.

use std::collections::BTreeMap;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::models::UserAccount;

// ========================
// Schema
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTab {
    Personal,
    Account,
}

impl FormTab {
    pub const ALL: [FormTab; 2] = [FormTab::Personal, FormTab::Account];

    pub fn label(&self) -> &'static str {
        match self {
            FormTab::Personal => "Personal",
            FormTab::Account => "Account",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Password,
    Date,
    Number,
    /// (value, label) pairs
    Select(Vec<(String, String)>),
    File,
}

impl FieldKind {
    /// `type` attribute of the rendered input
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Select(_) => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Password => "password",
            FieldKind::Date => "date",
            FieldKind::Number => "number",
            FieldKind::File => "file",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Required {
    No,
    Always,
    /// Passwords and documents: needed to create, optional when editing
    OnCreate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub tab: FormTab,
    pub required: Required,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind, tab: FormTab) -> Self {
        Self { name, label, kind, tab, required: Required::No }
    }

    pub fn required(mut self) -> Self {
        self.required = Required::Always;
        self
    }

    pub fn required_on_create(mut self) -> Self {
        self.required = Required::OnCreate;
        self
    }

    pub fn is_required(&self, mode: FormMode) -> bool {
        match self.required {
            Required::No => false,
            Required::Always => true,
            Required::OnCreate => mode == FormMode::Create,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    /// Singular entity name, e.g. "Staff"
    pub entity: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn fields_for(&self, tab: FormTab) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(move |f| f.tab == tab)
    }

    /// Labels of required fields left empty, in schema order
    pub fn missing_required(&self, values: &FormValues, mode: FormMode) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.is_required(mode))
            .filter(|f| match f.kind {
                FieldKind::File => values.file(f.name).is_none(),
                _ => values.text(f.name).trim().is_empty(),
            })
            .map(|f| f.label)
            .collect()
    }

    /// Check required fields; the error is ready for a toast
    pub fn validate(&self, values: &FormValues, mode: FormMode) -> Result<(), String> {
        let missing = self.missing_required(values, mode);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("Please fill in: {}", missing.join(", ")))
        }
    }

    /// Multipart body for a submit. Blank values are left out, so a blank
    /// password on edit keeps the current one.
    pub fn build_payload(&self, values: &FormValues) -> MultipartPayload {
        let mut payload = MultipartPayload::default();
        for field in &self.fields {
            match field.kind {
                FieldKind::File => {
                    if let Some(file) = values.file(field.name) {
                        payload.files.push((field.name.to_string(), file.clone()));
                    }
                }
                _ => {
                    let text = values.text(field.name).trim();
                    if !text.is_empty() {
                        payload.fields.push((field.name.to_string(), text.to_string()));
                    }
                }
            }
        }
        payload
    }

    /// Prefill values from an existing record. Passwords and files start empty.
    pub fn values_from<T: Serialize>(&self, record: &T) -> FormValues {
        let mut values = FormValues::default();
        let Ok(Value::Object(obj)) = serde_json::to_value(record) else {
            return values;
        };
        for field in &self.fields {
            if matches!(field.kind, FieldKind::File | FieldKind::Password) {
                continue;
            }
            let text = match obj.get(field.name) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                Some(Value::Object(inner)) => match inner.get("id") {
                    Some(id) => id.to_string(),
                    None => continue,
                },
                _ => continue,
            };
            values.set_text(field.name, text);
        }
        values
    }
}

// ========================
// Values & payload
// ========================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Current contents of a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    text: BTreeMap<String, String>,
    files: BTreeMap<String, FileUpload>,
}

impl FormValues {
    pub fn text(&self, name: &str) -> &str {
        self.text.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.text.insert(name.to_string(), value.into());
    }

    pub fn file(&self, name: &str) -> Option<&FileUpload> {
        self.files.get(name)
    }

    pub fn set_file(&mut self, name: &str, file: Option<FileUpload>) {
        match file {
            Some(file) => {
                self.files.insert(name.to_string(), file);
            }
            None => {
                self.files.remove(name);
            }
        }
    }
}

/// Body of an Add/Edit submit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, FileUpload)>,
}

impl MultipartPayload {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.files.iter().any(|(k, _)| k == name)
    }

    pub fn into_form(self) -> Form {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for (name, file) in self.files {
            form = form.part(name, Part::bytes(file.bytes).file_name(file.filename));
        }
        form
    }
}

// ========================
// Schemas
// ========================

fn personal_fields() -> Vec<FieldSpec> {
    use FieldKind::*;
    use FormTab::Personal;
    vec![
        FieldSpec::new("name", "Full Name", Text, Personal).required(),
        FieldSpec::new("email", "Email", Email, Personal).required(),
        FieldSpec::new("mobile", "Mobile", Tel, Personal).required(),
        FieldSpec::new("dob", "Date of Birth", Date, Personal),
        FieldSpec::new("address", "Address", Text, Personal),
        FieldSpec::new("username", "Username", Text, Personal).required(),
        FieldSpec::new("password", "Password", Password, Personal).required_on_create(),
    ]
}

fn account_fields() -> Vec<FieldSpec> {
    use FieldKind::*;
    use FormTab::Account;
    vec![
        FieldSpec::new("account_number", "Account Number", Text, Account),
        FieldSpec::new("ifsc_code", "IFSC Code", Text, Account),
        FieldSpec::new("bank_name", "Bank Name", Text, Account),
        FieldSpec::new("pan_number", "PAN Number", Text, Account),
        FieldSpec::new("aadhar_number", "Aadhar Number", Text, Account),
        FieldSpec::new("photo", "Photo", File, Account),
        FieldSpec::new("aadhar_card", "Aadhar Card", File, Account),
        FieldSpec::new("pan_card", "PAN Card", File, Account),
    ]
}

/// Staff belong to a team leader picked from the current list
pub fn staff_schema(team_leaders: &[UserAccount]) -> FormSchema {
    let options = team_leaders
        .iter()
        .filter(|tl| tl.is_active)
        .map(|tl| (tl.id.to_string(), tl.name.clone()))
        .collect();
    let mut fields = personal_fields();
    fields.push(
        FieldSpec::new("team_leader", "Team Leader", FieldKind::Select(options), FormTab::Personal)
            .required(),
    );
    fields.extend(account_fields());
    FormSchema { entity: "Staff", fields }
}

pub fn team_leader_schema() -> FormSchema {
    let mut fields = personal_fields();
    fields.extend(account_fields());
    FormSchema { entity: "Team Leader", fields }
}

pub fn admin_schema() -> FormSchema {
    let mut fields = personal_fields();
    fields.push(FieldSpec::new("company", "Company", FieldKind::Text, FormTab::Personal));
    fields.extend(account_fields());
    FormSchema { entity: "Admin", fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRef;

    fn filled() -> FormValues {
        let mut values = FormValues::default();
        values.set_text("name", "John Doe");
        values.set_text("email", "john@example.com");
        values.set_text("mobile", "9876543210");
        values.set_text("username", "john");
        values
    }

    #[test]
    fn test_password_required_only_on_create() {
        let schema = team_leader_schema();
        let values = filled();
        assert_eq!(schema.missing_required(&values, FormMode::Create), vec!["Password"]);
        assert!(schema.validate(&values, FormMode::Edit(3)).is_ok());
    }

    #[test]
    fn test_blank_password_omitted_from_payload() {
        let schema = team_leader_schema();
        let mut values = filled();
        values.set_text("password", "   ");
        let payload = schema.build_payload(&values);
        assert_eq!(payload.text("name"), Some("John Doe"));
        assert_eq!(payload.text("password"), None);

        values.set_text("password", "s3cret");
        assert_eq!(schema.build_payload(&values).text("password"), Some("s3cret"));
    }

    #[test]
    fn test_files_only_when_selected() {
        let schema = staff_schema(&[]);
        let mut values = filled();
        values.set_file("photo", Some(FileUpload { filename: "me.png".into(), bytes: vec![1, 2, 3] }));
        let payload = schema.build_payload(&values);
        assert!(payload.has_file("photo"));
        assert!(!payload.has_file("pan_card"));

        values.set_file("photo", None);
        assert!(!schema.build_payload(&values).has_file("photo"));
    }

    #[test]
    fn test_staff_schema_lists_active_team_leaders() {
        let active: UserAccount = serde_json::from_value(serde_json::json!({"id": 5, "name": "Priya"})).unwrap();
        let inactive: UserAccount =
            serde_json::from_value(serde_json::json!({"id": 6, "name": "Old", "is_active": false})).unwrap();
        let schema = staff_schema(&[active, inactive]);
        let select = schema.fields.iter().find(|f| f.name == "team_leader").unwrap();
        assert_eq!(select.kind, FieldKind::Select(vec![("5".to_string(), "Priya".to_string())]));
        assert_eq!(schema.validate(&filled(), FormMode::Edit(1)), Err("Please fill in: Team Leader".to_string()));
    }

    #[test]
    fn test_prefill_from_record() {
        let mut staff: UserAccount =
            serde_json::from_value(serde_json::json!({"id": 9, "name": "Asha", "mobile": "99"})).unwrap();
        staff.team_leader = Some(UserRef::Object { id: 5, name: "Priya".into() });
        let values = staff_schema(&[]).values_from(&staff);
        assert_eq!(values.text("name"), "Asha");
        assert_eq!(values.text("team_leader"), "5");
        assert_eq!(values.text("password"), "");
    }

    #[test]
    fn test_tabs_partition_fields() {
        let schema = admin_schema();
        let personal = schema.fields_for(FormTab::Personal).count();
        let account = schema.fields_for(FormTab::Account).count();
        assert_eq!(personal + account, schema.fields.len());
        assert!(schema.fields_for(FormTab::Account).any(|f| f.kind == FieldKind::File));
    }
}
