//! Lead Exports
//!
//! Exports come back as a file; the browser side turns it into a download.

use percent_encoding::percent_decode_str;
use serde::Serialize;

/// A downloaded file, ready to hand to the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Body of the team leader export endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRequest {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl ExportRequest {
    /// Name used when the server sends no `Content-Disposition`
    pub fn default_filename(&self) -> String {
        format!("{}_leads.xlsx", self.status)
    }
}

/// Pull the filename out of a `Content-Disposition` header.
/// RFC 5987 `filename*=` wins over plain `filename=`.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    for part in header.split(';').map(str::trim) {
        let Some((key, value)) = part.split_once('=') else { continue };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = value.trim().trim_matches('"');
                let raw = encoded.split_once("''").map(|(_, name)| name).unwrap_or(encoded);
                let decoded = percent_decode_str(raw).decode_utf8_lossy().to_string();
                if !decoded.is_empty() {
                    return Some(decoded);
                }
            }
            "filename" => {
                let name = value.trim().trim_matches('"');
                if !name.is_empty() {
                    plain = Some(name.to_string());
                }
            }
            _ => {}
        }
    }
    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_filename() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="visit_leads_2024.xlsx""#),
            Some("visit_leads_2024.xlsx".to_string())
        );
    }

    #[test]
    fn test_extended_filename_preferred() {
        let header = r#"attachment; filename="fallback.xlsx"; filename*=UTF-8''Interested%20Leads.xlsx"#;
        assert_eq!(filename_from_disposition(header), Some("Interested Leads.xlsx".to_string()));
    }

    #[test]
    fn test_no_filename() {
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition(r#"inline; filename="""#), None);
    }

    #[test]
    fn test_default_name_uses_status() {
        let req = ExportRequest { status: "interested".to_string(), start_date: None, end_date: None };
        assert_eq!(req.default_filename(), "interested_leads.xlsx");
        assert_eq!(serde_json::to_value(&req).unwrap(), serde_json::json!({"status": "interested"}));
    }
}
