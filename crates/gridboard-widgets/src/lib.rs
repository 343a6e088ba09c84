//! egui integration for Gridboard dashboards.
//!
//! - **Input**: egui pointer events to gesture events, container geometry
//! - **Handles**: resize handle painting and cursors
//! - **Indicator**: resize guide lines and drag ghosts
//! - **View**: an interactive dashboard widget tying them together

pub mod convert;
pub mod handles;
pub mod indicator;
pub mod input;
pub mod view;

pub use handles::{cursor_icon, handle_shapes, paint_handles};
pub use indicator::{IndicatorStyle, ShapeSink, paint_feedback};
pub use input::{EguiContainer, pointer_events, translate_event};
pub use view::DashboardView;

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Gap between a widget's frame and its grid cell edge
    pub const CELL_GAP: f32 = 4.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Widget card background
    pub const WIDGET_BG: Color32 = Color32::from_rgb(255, 255, 255);
    /// Drag ghost fill (translucent accent)
    pub const GHOST_FILL: Color32 = Color32::from_rgba_premultiplied(15, 33, 62, 64);
}
