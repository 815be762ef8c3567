//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use lead_desk_core::models::{AttendanceToday, Profile};
use lead_desk_core::ApiError;

/// How long a toast stays on screen
const TOAST_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub text: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, once `/profile` answered
    pub profile: Option<Profile>,
    /// Why the profile could not be loaded (usually a missing token)
    pub profile_error: Option<String>,
    /// Today's attendance for the header
    pub today: Option<AttendanceToday>,
    /// Toast queue, oldest first
    pub toasts: Vec<Toast>,
    /// Next toast id
    pub next_toast_id: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Toasts
// ========================

/// Queue a toast; it dismisses itself after a few seconds
pub fn store_push_toast(store: AppStore, kind: ToastKind, text: impl Into<String>) {
    let id = {
        let next_id = store.next_toast_id();
        let mut next = next_id.write();
        *next += 1;
        *next
    };
    store.toasts().write().push(Toast { id, kind, text: text.into() });

    spawn_local(async move {
        TimeoutFuture::new(TOAST_MS).await;
        store_dismiss_toast(store, id);
    });
}

pub fn store_dismiss_toast(store: AppStore, id: u32) {
    if let Some(mut toasts) = store.toasts().try_write() {
        toasts.retain(|t| t.id != id);
    }
}

pub fn notify_success(store: AppStore, text: impl Into<String>) {
    store_push_toast(store, ToastKind::Success, text);
}

pub fn notify_error(store: AppStore, err: &ApiError) {
    log::warn!("[ui] {}", err);
    store_push_toast(store, ToastKind::Error, err.user_message());
}
