//! Entity Resources
//!
//! The endpoint set behind one generic list + CRUD page. Staff, team
//! leaders and admins differ only in paths and form schema.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::ApiClient;
use crate::endpoints::{admin, superadmin};
use crate::error::ApiResult;
use crate::filters::ListFilters;
use crate::forms::{self, FormMode, FormSchema, MultipartPayload};
use crate::models::{Activatable, ListPage, UserAccount};

/// CRUD contract of a list page. Futures are `?Send`: in the browser
/// everything runs on one thread.
#[async_trait(?Send)]
pub trait EntityResource: Clone + Send + Sync + 'static {
    type Row: Activatable<Id = u32>
        + Serialize
        + DeserializeOwned
        + Debug
        + PartialEq
        + Send
        + Sync
        + 'static;

    /// Page heading, plural
    fn title(&self) -> &'static str;

    /// Whether the page shows team leader / date filters
    fn filterable(&self) -> bool {
        false
    }

    async fn list(&self, api: &ApiClient, filters: &ListFilters) -> ApiResult<ListPage<Self::Row>>;

    /// Form schema; may need data from the server (e.g. select options)
    async fn schema(&self, api: &ApiClient) -> ApiResult<FormSchema>;

    async fn create(&self, api: &ApiClient, payload: MultipartPayload) -> ApiResult<()>;

    async fn update(&self, api: &ApiClient, id: u32, payload: MultipartPayload) -> ApiResult<()>;

    /// Returns the active flag the server settled on
    async fn toggle_active(&self, api: &ApiClient, id: u32) -> ApiResult<bool>;

    /// Route create/update by dialog mode
    async fn submit(&self, api: &ApiClient, mode: FormMode, payload: MultipartPayload) -> ApiResult<()> {
        match mode {
            FormMode::Create => self.create(api, payload).await,
            FormMode::Edit(id) => self.update(api, id, payload).await,
        }
    }
}

// ========================
// Staff (admin area)
// ========================

#[derive(Debug, Clone, Copy, Default)]
pub struct StaffResource;

#[async_trait(?Send)]
impl EntityResource for StaffResource {
    type Row = UserAccount;

    fn title(&self) -> &'static str {
        "Staff"
    }

    fn filterable(&self) -> bool {
        true
    }

    async fn list(&self, api: &ApiClient, filters: &ListFilters) -> ApiResult<ListPage<UserAccount>> {
        admin::list_staff(api, filters).await
    }

    async fn schema(&self, api: &ApiClient) -> ApiResult<FormSchema> {
        let team_leaders = admin::list_team_leaders(api).await?;
        Ok(forms::staff_schema(&team_leaders.rows))
    }

    async fn create(&self, api: &ApiClient, payload: MultipartPayload) -> ApiResult<()> {
        admin::add_staff(api, payload).await
    }

    async fn update(&self, api: &ApiClient, id: u32, payload: MultipartPayload) -> ApiResult<()> {
        admin::edit_staff(api, id, payload).await
    }

    async fn toggle_active(&self, api: &ApiClient, id: u32) -> ApiResult<bool> {
        admin::toggle_status(api, id).await
    }
}

// ========================
// Team leaders (admin area)
// ========================

#[derive(Debug, Clone, Copy, Default)]
pub struct TeamLeaderResource;

#[async_trait(?Send)]
impl EntityResource for TeamLeaderResource {
    type Row = UserAccount;

    fn title(&self) -> &'static str {
        "Team Leaders"
    }

    async fn list(&self, api: &ApiClient, _filters: &ListFilters) -> ApiResult<ListPage<UserAccount>> {
        admin::list_team_leaders(api).await
    }

    async fn schema(&self, _api: &ApiClient) -> ApiResult<FormSchema> {
        Ok(forms::team_leader_schema())
    }

    async fn create(&self, api: &ApiClient, payload: MultipartPayload) -> ApiResult<()> {
        admin::add_team_leader(api, payload).await
    }

    async fn update(&self, api: &ApiClient, id: u32, payload: MultipartPayload) -> ApiResult<()> {
        admin::edit_team_leader(api, id, payload).await
    }

    async fn toggle_active(&self, api: &ApiClient, id: u32) -> ApiResult<bool> {
        admin::toggle_status(api, id).await
    }
}

// ========================
// Admins (superadmin area)
// ========================

#[derive(Debug, Clone, Copy, Default)]
pub struct AdminResource;

#[async_trait(?Send)]
impl EntityResource for AdminResource {
    type Row = UserAccount;

    fn title(&self) -> &'static str {
        "Admins"
    }

    async fn list(&self, api: &ApiClient, _filters: &ListFilters) -> ApiResult<ListPage<UserAccount>> {
        superadmin::list_admins(api).await
    }

    async fn schema(&self, _api: &ApiClient) -> ApiResult<FormSchema> {
        Ok(forms::admin_schema())
    }

    async fn create(&self, api: &ApiClient, payload: MultipartPayload) -> ApiResult<()> {
        superadmin::add_admin(api, payload).await
    }

    async fn update(&self, api: &ApiClient, id: u32, payload: MultipartPayload) -> ApiResult<()> {
        superadmin::edit_admin(api, id, payload).await
    }

    async fn toggle_active(&self, api: &ApiClient, id: u32) -> ApiResult<bool> {
        superadmin::toggle_admin_status(api, id).await
    }
}
