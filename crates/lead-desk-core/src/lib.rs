//! Lead Desk Core
//!
//! Everything the dashboard needs that is not DOM:
//! - client / endpoints: REST access with an injected credential provider
//! - models: records mirrored from backend JSON
//! - list_view / filters / search / columns: the list-filter-CRUD view state
//! - forms / resource: generic Add/Edit dialogs over an entity resource
//! - kpi / nav / export / optimistic: smaller view helpers

pub mod client;
pub mod columns;
pub mod config;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod export;
pub mod filters;
pub mod forms;
pub mod kpi;
pub mod list_view;
pub mod models;
pub mod nav;
pub mod optimistic;
pub mod query;
pub mod resource;
pub mod search;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use credentials::{CredentialProvider, StaticToken};
pub use error::{ApiError, ApiResult};
pub use list_view::{Applied, FetchTicket, ListView, LoadState};
