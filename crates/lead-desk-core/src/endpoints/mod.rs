//! Endpoint Functions
//!
//! One async function per backend endpoint, organized by role area.

pub mod admin;
pub mod attendance;
pub mod profile;
pub mod staff;
pub mod superadmin;
pub mod team_leader;

use serde_json::Value;

use crate::error::ApiResult;

/// Mutations whose response body the UI does not use; the list is
/// re-fetched instead.
pub(crate) fn discard(result: ApiResult<Value>) -> ApiResult<()> {
    result.map(|_| ())
}
