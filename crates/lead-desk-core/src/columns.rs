//! Responsive Columns
//!
//! Each column declares the smallest viewport it shows on. Whatever is
//! hidden at the current width goes into the row's detail panel.

/// Viewport classes, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

/// Below this width the viewport is `Mobile`
pub const TABLET_MIN_PX: f64 = 640.0;
/// From this width on the viewport is `Desktop`
pub const DESKTOP_MIN_PX: f64 = 1024.0;

impl Breakpoint {
    pub fn from_width(width: f64) -> Self {
        if width >= DESKTOP_MIN_PX {
            Breakpoint::Desktop
        } else if width >= TABLET_MIN_PX {
            Breakpoint::Tablet
        } else {
            Breakpoint::Mobile
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub label: &'static str,
    /// Smallest breakpoint the column is visible at
    pub min: Breakpoint,
}

impl ColumnSpec {
    pub const fn new(key: &'static str, label: &'static str, min: Breakpoint) -> Self {
        Self { key, label, min }
    }

    pub fn visible_at(&self, bp: Breakpoint) -> bool {
        bp >= self.min
    }
}

/// Indices of columns shown in the table at `bp`
pub fn visible_indices(columns: &[ColumnSpec], bp: Breakpoint) -> Vec<usize> {
    (0..columns.len()).filter(|&i| columns[i].visible_at(bp)).collect()
}

/// Indices of columns moved into the detail panel at `bp`
pub fn hidden_indices(columns: &[ColumnSpec], bp: Breakpoint) -> Vec<usize> {
    (0..columns.len()).filter(|&i| !columns[i].visible_at(bp)).collect()
}

/// The +/- control only shows when something is hidden
pub fn needs_expander(columns: &[ColumnSpec], bp: Breakpoint) -> bool {
    columns.iter().any(|c| !c.visible_at(bp))
}
