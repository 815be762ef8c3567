//! Profile Endpoint

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::Profile;
use crate::query::Query;

/// Who is signed in, and with which role
pub async fn me(api: &ApiClient) -> ApiResult<Profile> {
    api.get_json("/accounts/api/profile/", &Query::new()).await
}
