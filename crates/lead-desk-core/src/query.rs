//! Query String Builder
//!
//! Filters are optional; empty values never reach the URL.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// RFC 3986 unreserved characters stay as-is
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Ordered list of query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter; blank values are skipped
    pub fn param(mut self, key: &str, value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Add a parameter only when present
    pub fn opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v.to_string()),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `?a=1&b=2`, or an empty string when there are no parameters
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let encoded: Vec<String> = self
            .pairs
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_VALUE),
                    utf8_percent_encode(v, QUERY_VALUE)
                )
            })
            .collect();
        format!("?{}", encoded.join("&"))
    }
}

/// Percent-encode a single path segment (tags, ids typed by users)
pub fn path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, QUERY_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_skipped() {
        let q = Query::new()
            .param("start_date", "2024-01-01")
            .param("end_date", "")
            .opt::<u32>("team_leader_id", None);
        assert_eq!(q.to_query_string(), "?start_date=2024-01-01");
    }

    #[test]
    fn test_no_params_no_question_mark() {
        assert_eq!(Query::new().param("search", "  ").to_query_string(), "");
    }

    #[test]
    fn test_values_encoded() {
        let q = Query::new().param("search", "John Doe&co").opt("team_leader_id", Some(7));
        assert_eq!(q.to_query_string(), "?search=John%20Doe%26co&team_leader_id=7");
    }

    #[test]
    fn test_path_segment() {
        assert_eq!(path_segment("today_follow"), "today_follow");
        assert_eq!(path_segment("not interested"), "not%20interested");
    }
}
