//! Gridboard Core Library
//!
//! Platform-agnostic drag and resize interaction for widgets laid out on a
//! column grid. Hosts feed pointer events and a clock in; controllers report
//! snapped grid positions and sizes through handler traits.

pub mod capture;
pub mod config;
pub mod coords;
pub mod dashboard;
pub mod drag;
pub mod feedback;
pub mod handles;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod resize;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_support;

pub use capture::{CaptureLease, NoCapture, PointerCapture};
pub use config::{ConfigError, ConfigResult, DashboardConfig, GestureConfig, GridConfig};
pub use coords::{CellMetrics, GridContainer, GridFrame};
pub use dashboard::{CommitOnRelease, Dashboard, DashboardWidget, LayoutError, LayoutResult, WidgetId};
pub use drag::{DragEvent, DragHandler, DragPhase, DragVisual, HoldDragController};
pub use feedback::{Feedback, IndicatorShape, IndicatorSink};
pub use handles::{Handle, HANDLE_HIT_TOLERANCE, HANDLE_SIZE, hit_test_handles, widget_handles};
pub use input::{PointerButton, PointerEvent};
pub use interaction::{GestureKind, WidgetInteraction};
pub use layout::{Constraints, GridPosition, GridSize, WidgetKind, WidgetLayout};
pub use resize::{ResizeController, ResizeCursor, ResizeDirection, ResizeEvent, ResizeHandler, ResizeLine};
pub use timer::{Duration, Instant, ScopedTimer, Throttle};
