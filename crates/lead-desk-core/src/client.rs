//! API Client
//!
//! Thin wrapper over `reqwest`: every call reads the token, issues exactly
//! one request, and maps non-2xx responses to [`ApiError`]. No retries, no
//! timeouts, no caching.

use std::sync::Arc;

use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::credentials::{authorization_header, CredentialProvider};
use crate::error::{ApiError, ApiResult};
use crate::export::{filename_from_disposition, ExportFile};
use crate::forms::MultipartPayload;
use crate::query::Query;

/// Shared client; cheap to clone
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            credentials,
        }
    }

    // ========================
    // Request plumbing
    // ========================

    /// Fails with `MissingAuth` before anything touches the network
    fn request(&self, method: Method, path: &str, query: &Query) -> ApiResult<RequestBuilder> {
        let auth = authorization_header(self.credentials.as_ref()).ok_or_else(|| {
            warn!("[api] {} {} refused: no auth token", method, path);
            ApiError::MissingAuth
        })?;
        let url = format!("{}{}", self.config.url(path), query.to_query_string());
        debug!("[api] {} {}", method, url);
        Ok(self.http.request(method, url).header(AUTHORIZATION, auth))
    }

    async fn execute(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await.map_err(|e| {
            warn!("[api] transport error: {}", e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.bytes().await.unwrap_or_default();
        let err = ApiError::from_response(status.as_u16(), &body);
        warn!("[api] {} -> {}: {}", url, status.as_u16(), err.user_message());
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_value(Value::Null).map_err(ApiError::from);
        }
        serde_json::from_slice(&bytes).map_err(ApiError::from)
    }

    // ========================
    // Verbs
    // ========================

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &Query) -> ApiResult<T> {
        let builder = self.request(Method::GET, path, query)?;
        let response = self.execute(builder).await?;
        Self::decode(response).await
    }

    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path, &Query::new())?.json(body);
        let response = self.execute(builder).await?;
        Self::decode(response).await
    }

    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: MultipartPayload,
    ) -> ApiResult<T> {
        let builder = self
            .request(method, path, &Query::new())?
            .multipart(payload.into_form());
        let response = self.execute(builder).await?;
        Self::decode(response).await
    }

    /// POST with no body (toggles, check-in/out)
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let builder = self.request(Method::POST, path, &Query::new())?;
        let response = self.execute(builder).await?;
        Self::decode(response).await
    }

    /// Fetch a file. 404 and empty bodies become [`ApiError::EmptyExport`].
    pub async fn download(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        default_filename: &str,
    ) -> ApiResult<ExportFile> {
        let mut builder = self.request(method, path, &Query::new())?;
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = match self.execute(builder).await {
            Err(ApiError::Http { status: 404, .. }) => return Err(ApiError::EmptyExport),
            other => other?,
        };

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| default_filename.to_string());
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        if bytes.is_empty() {
            warn!("[api] {} returned an empty file", path);
            return Err(ApiError::EmptyExport);
        }
        debug!("[api] downloaded {} ({} bytes)", filename, bytes.len());
        Ok(ExportFile { filename, content_type, bytes })
    }
}
