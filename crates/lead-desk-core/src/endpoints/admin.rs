//! Admin Endpoints

use reqwest::Method;

use super::discard;
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::filters::ListFilters;
use crate::forms::MultipartPayload;
use crate::models::{Lead, ListPage, ProductivityRow, StaffMember, TeamLeader, ToggleStatusResponse};
use crate::query::{path_segment, Query};

// ========================
// Reports
// ========================

/// Per-staff lead breakdown, filtered by team leader and date range
pub async fn productivity_report(
    api: &ApiClient,
    filters: &ListFilters,
) -> ApiResult<ListPage<ProductivityRow>> {
    api.get_json("/accounts/api/admin/productivity-report/", &filters.to_query())
        .await
}

/// Leads of one report tag (`all`, `interested`, `visit`...)
pub async fn leads_by_tag(api: &ApiClient, tag: &str, filters: &ListFilters) -> ApiResult<ListPage<Lead>> {
    let path = format!("/accounts/api/admin/leads/{}/", path_segment(tag));
    api.get_json(&path, &filters.to_query()).await
}

/// Leads assigned to one staff member
pub async fn staff_leads(
    api: &ApiClient,
    staff_id: u32,
    status: Option<&str>,
    filters: &ListFilters,
) -> ApiResult<ListPage<Lead>> {
    let path = format!("/accounts/api/admin/staff-leads/{}/", staff_id);
    let query = Query::new()
        .param("start_date", &filters.start_date)
        .param("end_date", &filters.end_date)
        .opt("status", status);
    api.get_json(&path, &query).await
}

// ========================
// Staff
// ========================

pub async fn list_staff(api: &ApiClient, filters: &ListFilters) -> ApiResult<ListPage<StaffMember>> {
    api.get_json("/accounts/api/admin/add-staff/", &filters.to_query()).await
}

pub async fn add_staff(api: &ApiClient, payload: MultipartPayload) -> ApiResult<()> {
    discard(
        api.send_multipart(Method::POST, "/accounts/api/admin/add-staff/", payload)
            .await,
    )
}

pub async fn edit_staff(api: &ApiClient, id: u32, payload: MultipartPayload) -> ApiResult<()> {
    let path = format!("/accounts/api/admin/staff/edit/{}/", id);
    discard(api.send_multipart(Method::PATCH, &path, payload).await)
}

/// Flip active/inactive for staff or a team leader; returns the new state
pub async fn toggle_status(api: &ApiClient, id: u32) -> ApiResult<bool> {
    let path = format!("/accounts/api/admin/toggle-status/{}/", id);
    let response: ToggleStatusResponse = api.post_empty(&path).await?;
    Ok(response.is_active)
}

// ========================
// Team leaders
// ========================

pub async fn list_team_leaders(api: &ApiClient) -> ApiResult<ListPage<TeamLeader>> {
    api.get_json("/accounts/api/admin/team-leaders/", &Query::new()).await
}

pub async fn add_team_leader(api: &ApiClient, payload: MultipartPayload) -> ApiResult<()> {
    discard(
        api.send_multipart(Method::POST, "/accounts/api/admin/team-leaders/", payload)
            .await,
    )
}

pub async fn edit_team_leader(api: &ApiClient, id: u32, payload: MultipartPayload) -> ApiResult<()> {
    let path = format!("/accounts/api/admin/team-leader/edit/{}/", id);
    discard(api.send_multipart(Method::PATCH, &path, payload).await)
}
