//! Attendance Endpoints
//!
//! Self-service attendance for the staff area. Hours and status are
//! computed server-side.

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::filters::ListFilters;
use crate::models::{AttendanceRecord, AttendanceToday, ListPage};
use crate::query::Query;

pub async fn today(api: &ApiClient) -> ApiResult<AttendanceToday> {
    api.get_json("/accounts/attendance/today/", &Query::new()).await
}

/// Check in and return the refreshed summary
pub async fn check_in(api: &ApiClient) -> ApiResult<AttendanceToday> {
    let _: serde_json::Value = api.post_empty("/accounts/attendance/check-in/").await?;
    today(api).await
}

/// Check out and return the refreshed summary
pub async fn check_out(api: &ApiClient) -> ApiResult<AttendanceToday> {
    let _: serde_json::Value = api.post_empty("/accounts/attendance/check-out/").await?;
    today(api).await
}

pub async fn history(api: &ApiClient, filters: &ListFilters) -> ApiResult<ListPage<AttendanceRecord>> {
    let query = Query::new()
        .param("start_date", &filters.start_date)
        .param("end_date", &filters.end_date);
    api.get_json("/accounts/attendance/history/", &query).await
}
