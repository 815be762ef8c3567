//! Team Leader Endpoints

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::export::{ExportFile, ExportRequest};
use crate::filters::ListFilters;
use crate::models::{Lead, ListPage, StaffMember};
use crate::query::{path_segment, Query};

/// Leads across the team for one tag (`today_follow`, `interested`...)
pub async fn customers_by_tag(
    api: &ApiClient,
    tag: &str,
    filters: &ListFilters,
) -> ApiResult<ListPage<Lead>> {
    let path = format!("/accounts/api/teamcustomer/{}/", path_segment(tag));
    let query = Query::new()
        .param("start_date", &filters.start_date)
        .param("end_date", &filters.end_date);
    api.get_json(&path, &query).await
}

/// Staff reporting to the signed-in team leader
pub async fn list_staff(api: &ApiClient) -> ApiResult<ListPage<StaffMember>> {
    api.get_json("/accounts/api/team-leader/staff/", &Query::new()).await
}

/// Download leads with a status as a spreadsheet
pub async fn export_leads(api: &ApiClient, request: &ExportRequest) -> ApiResult<ExportFile> {
    let body = serde_json::to_value(request)?;
    api.download(
        Method::POST,
        "/accounts/api/team-leader/export-leads/",
        Some(&body),
        &request.default_filename(),
    )
    .await
}
