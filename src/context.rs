//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use lead_desk_core::columns::Breakpoint;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Responsive breakpoint of the window width
    pub breakpoint: Memo<Breakpoint>,
    /// Bumped after check-in/out so the header refreshes - read
    pub attendance_version: ReadSignal<u32>,
    /// Bumped after check-in/out so the header refreshes - write
    set_attendance_version: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(viewport_width: ReadSignal<f64>) -> Self {
        let breakpoint = Memo::new(move |_| Breakpoint::from_width(viewport_width.get()));
        let (attendance_version, set_attendance_version) = signal(0u32);
        Self {
            breakpoint,
            attendance_version,
            set_attendance_version,
        }
    }

    /// Ask attendance views to re-fetch
    pub fn refresh_attendance(&self) {
        self.set_attendance_version.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
