//! API Errors
//!
//! One error type for every client call, plus the logic that turns a
//! backend error body into a single human-readable message.

use serde_json::{Map, Value};
use thiserror::Error;

/// Common result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything an API call can fail with
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No token in the credential store; raised before any request is sent.
    #[error("authentication token missing")]
    MissingAuth,

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 4xx response carrying field-keyed error arrays, already aggregated.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A 2xx body that did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Transport failure (DNS, CORS, connection reset...).
    #[error("network error: {0}")]
    Network(String),

    /// Export returned 404 or an empty file.
    #[error("nothing to export")]
    EmptyExport,

    /// The file arrived but the browser could not save it.
    #[error("download failed: {0}")]
    Download(String),
}

impl ApiError {
    /// Text shown in toasts and inline error branches
    pub fn user_message(&self) -> String {
        match self {
            ApiError::MissingAuth => "You are not signed in. Please log in again.".to_string(),
            ApiError::Http { message, .. } => message.clone(),
            ApiError::Validation(message) => message.clone(),
            ApiError::Decode(_) => "Unexpected response from server".to_string(),
            ApiError::Network(detail) => format!("Network error: {}", detail),
            ApiError::EmptyExport => "No records found to export".to_string(),
            ApiError::Download(filename) => format!("Could not save {}", filename),
        }
    }

    /// HTTP status, when the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build the error for a non-2xx response from its status and raw body.
    ///
    /// Order of preference: `message`, `detail`, `error`, then field-keyed
    /// arrays. Anything unparseable falls back to the status reason phrase.
    pub fn from_response(status: u16, body: &[u8]) -> ApiError {
        let fallback = || {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Request failed with status {}", status))
        };

        let parsed: Option<Map<String, Value>> = serde_json::from_slice(body).ok();
        let Some(obj) = parsed else {
            return ApiError::Http { status, message: fallback() };
        };

        for key in ["message", "detail", "error"] {
            if let Some(text) = obj.get(key).and_then(scalar_text) {
                return ApiError::Http { status, message: text };
            }
        }

        match aggregate_field_errors(&obj) {
            Some(joined) if (400..500).contains(&status) => ApiError::Validation(joined),
            Some(joined) => ApiError::Http { status, message: joined },
            None => ApiError::Http { status, message: fallback() },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `{"email": ["taken"], "non_field_errors": ["bad"]}` -> `"email: taken; bad"`
fn aggregate_field_errors(obj: &Map<String, Value>) -> Option<String> {
    let mut parts = Vec::new();
    for (field, value) in obj {
        let messages: Vec<String> = match value {
            Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
            other => scalar_text(other).into_iter().collect(),
        };
        if messages.is_empty() {
            continue;
        }
        let joined = messages.join(", ");
        if field == "non_field_errors" {
            parts.push(joined);
        } else {
            parts.push(format!("{}: {}", field, joined));
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field_wins() {
        let err = ApiError::from_response(400, br#"{"message":"Staff not found","email":["x"]}"#);
        assert_eq!(err, ApiError::Http { status: 400, message: "Staff not found".to_string() });
    }

    #[test]
    fn test_download_failure_names_file() {
        let err = ApiError::Download("interested_leads.xlsx".to_string());
        assert_eq!(err.user_message(), "Could not save interested_leads.xlsx");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_detail_field() {
        let err = ApiError::from_response(401, br#"{"detail":"Invalid token."}"#);
        assert_eq!(err.user_message(), "Invalid token.");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_field_errors_aggregate() {
        let err = ApiError::from_response(
            400,
            br#"{"email":["This field must be unique."],"mobile":["Required.","Too short."]}"#,
        );
        assert_eq!(
            err,
            ApiError::Validation(
                "email: This field must be unique.; mobile: Required., Too short.".to_string()
            )
        );
    }

    #[test]
    fn test_non_field_errors_have_no_prefix() {
        let err = ApiError::from_response(400, br#"{"non_field_errors":["Passwords differ"]}"#);
        assert_eq!(err.user_message(), "Passwords differ");
    }

    #[test]
    fn test_non_json_body_uses_reason_phrase() {
        let err = ApiError::from_response(415, b"<html>Unsupported</html>");
        assert_eq!(
            err,
            ApiError::Http { status: 415, message: "Unsupported Media Type".to_string() }
        );
    }

    #[test]
    fn test_unknown_status_generic_message() {
        let err = ApiError::from_response(599, b"");
        assert_eq!(err.user_message(), "Request failed with status 599");
    }

    #[test]
    fn test_field_arrays_on_server_error_stay_http() {
        let err = ApiError::from_response(500, br#"{"db":["down"]}"#);
        assert_eq!(err, ApiError::Http { status: 500, message: "db: down".to_string() });
    }
}
