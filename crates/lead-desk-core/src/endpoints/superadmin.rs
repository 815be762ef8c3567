//! Superadmin Endpoints

use reqwest::Method;

use super::discard;
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::forms::MultipartPayload;
use crate::models::{AdminUser, Counts, ListPage, ToggleStatusResponse};
use crate::query::Query;

pub async fn list_admins(api: &ApiClient) -> ApiResult<ListPage<AdminUser>> {
    api.get_json("/accounts/api/superadmin/admins/", &Query::new()).await
}

pub async fn add_admin(api: &ApiClient, payload: MultipartPayload) -> ApiResult<()> {
    discard(
        api.send_multipart(Method::POST, "/accounts/api/superadmin/admins/", payload)
            .await,
    )
}

pub async fn edit_admin(api: &ApiClient, id: u32, payload: MultipartPayload) -> ApiResult<()> {
    let path = format!("/accounts/api/superadmin/admin/edit/{}/", id);
    discard(api.send_multipart(Method::PATCH, &path, payload).await)
}

pub async fn toggle_admin_status(api: &ApiClient, id: u32) -> ApiResult<bool> {
    let path = format!("/accounts/api/superadmin/toggle-status/{}/", id);
    let response: ToggleStatusResponse = api.post_empty(&path).await?;
    Ok(response.is_active)
}

/// Platform-wide counters for the superadmin KPI row. The endpoint answers
/// either with a bare counts object or wrapped under `counts`.
pub async fn dashboard_counts(api: &ApiClient) -> ApiResult<Counts> {
    let value: serde_json::Value = api
        .get_json("/accounts/api/superadmin/dashboard/", &Query::new())
        .await?;
    let counts: Counts = match value.get("counts").cloned() {
        Some(inner) => serde_json::from_value(inner)?,
        None => serde_json::from_value(value)?,
    };
    Ok(counts)
}
