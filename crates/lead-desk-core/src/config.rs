//! Client Configuration

/// Used when `API_BASE_URL` was not set at build time
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Where the backend lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL baked in at compile time (wasm has no process environment)
    pub fn from_build_env() -> Self {
        Self::new(option_env!("API_BASE_URL").unwrap_or(DEFAULT_BASE_URL))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint path onto the base URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}
