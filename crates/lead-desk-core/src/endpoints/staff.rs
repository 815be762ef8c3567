//! Staff Lead Endpoints

use reqwest::Method;

use super::discard;
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{Lead, LeadStatusUpdate, ListPage};
use crate::query::{path_segment, Query};

/// The signed-in staff member's leads for a tag
pub async fn my_leads(api: &ApiClient, tag: &str, search: &str) -> ApiResult<ListPage<Lead>> {
    let path = format!("/accounts/api/staff/leads/{}/", path_segment(tag));
    api.get_json(&path, &Query::new().param("search", search)).await
}

/// Request a status transition; the server decides what it accepts
pub async fn update_lead_status(api: &ApiClient, lead_id: u32, update: &LeadStatusUpdate) -> ApiResult<()> {
    let path = format!("/accounts/api/staff/lead/{}/status/", lead_id);
    discard(api.send_json(Method::PATCH, &path, update).await)
}
