//! Browser API Wiring
//!
//! Builds the shared [`ApiClient`] with a token read from localStorage and
//! hands it out through context.

use std::sync::Arc;

use leptos::prelude::*;
use lead_desk_core::{ApiClient, ApiConfig, CredentialProvider};

/// localStorage key the login flow writes the token to
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Reads the token on every request; never writes it
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageCredentials;

impl CredentialProvider for LocalStorageCredentials {
    fn token(&self) -> Option<String> {
        leptos_viewport::storage_get(AUTH_TOKEN_KEY)
    }
}

pub fn create_api_client() -> ApiClient {
    let config = ApiConfig::from_build_env();
    log::debug!("[api] base url {}", config.base_url());
    ApiClient::new(config, Arc::new(LocalStorageCredentials))
}

/// Get the API client from context
pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}
