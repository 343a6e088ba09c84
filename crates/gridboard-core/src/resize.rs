//! Eight-direction resize controller.
//!
//! Pointer moves are throttled, the horizontal delta is exponentially
//! smoothed, and the result is snapped to a column span with
//! `clamp(round(width / cell_width), min, max)`. The same proposed width,
//! unclamped and unrounded, drives the continuous line indicator.
//!
//! Rows are snapped straight from the unsmoothed vertical delta: there are
//! few row steps, and smoothing them made snapping feel laggy.

use crate::capture::{CaptureLease, NoCapture, PointerCapture};
use crate::config::{GestureConfig, GridConfig};
use crate::coords::{GridContainer, GridFrame, to_grid_space};
use crate::layout::{Constraints, GridSize, round_span};
use crate::timer::{Instant, Throttle};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Edge or corner a resize is dragged from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeDirection {
    #[serde(rename = "n")]
    North,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "w")]
    West,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "nw")]
    NorthWest,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "sw")]
    SouthWest,
}

/// Cursor shown while hovering or dragging a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeCursor {
    /// Vertical double arrow.
    NsResize,
    /// Horizontal double arrow.
    EwResize,
    /// Diagonal, top-right to bottom-left.
    NeswResize,
    /// Diagonal, top-left to bottom-right.
    NwseResize,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::North,
        ResizeDirection::South,
        ResizeDirection::East,
        ResizeDirection::West,
        ResizeDirection::NorthEast,
        ResizeDirection::NorthWest,
        ResizeDirection::SouthEast,
        ResizeDirection::SouthWest,
    ];

    /// Parse a compass code such as `"se"`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::NorthEast => "ne",
            Self::NorthWest => "nw",
            Self::SouthEast => "se",
            Self::SouthWest => "sw",
        }
    }

    /// +1 when moving right grows the widget, -1 when moving left does, 0 for
    /// purely vertical handles.
    pub fn horizontal_sign(self) -> f64 {
        match self {
            Self::East | Self::NorthEast | Self::SouthEast => 1.0,
            Self::West | Self::NorthWest | Self::SouthWest => -1.0,
            Self::North | Self::South => 0.0,
        }
    }

    /// +1 when moving down grows the widget, -1 when moving up does, 0 for
    /// purely horizontal handles.
    pub fn vertical_sign(self) -> f64 {
        match self {
            Self::South | Self::SouthEast | Self::SouthWest => 1.0,
            Self::North | Self::NorthEast | Self::NorthWest => -1.0,
            Self::East | Self::West => 0.0,
        }
    }

    pub fn has_horizontal(self) -> bool {
        self.horizontal_sign() != 0.0
    }

    /// Whether the direction includes `n` or `s`.
    pub fn has_vertical(self) -> bool {
        self.vertical_sign() != 0.0
    }

    pub fn cursor(self) -> ResizeCursor {
        match self {
            Self::North | Self::South => ResizeCursor::NsResize,
            Self::East | Self::West => ResizeCursor::EwResize,
            Self::NorthEast | Self::SouthWest => ResizeCursor::NeswResize,
            Self::NorthWest | Self::SouthEast => ResizeCursor::NwseResize,
        }
    }
}

/// Continuous resize feedback for the line indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLine {
    /// Proposed width in columns, before rounding and clamping.
    pub col_ratio: f64,
    /// Proposed width in pixels.
    pub width: f64,
    /// Proposed height in rows, before rounding and clamping. `None` for
    /// horizontal-only directions.
    pub row_ratio: Option<f64>,
}

/// Receives resize gesture callbacks.
pub trait ResizeHandler {
    /// Resize began from `direction` at `size`. West and north handles
    /// move the leading edge, so consumers keep the opposite edge fixed.
    fn on_resize_start(&mut self, _direction: ResizeDirection, _size: GridSize) {}
    /// Committed size changed.
    fn on_resize(&mut self, _size: GridSize) {}
    /// Continuous feedback, on every executed tick.
    fn on_resize_move(&mut self, _line: ResizeLine) {}
    /// Resize released with the final committed size.
    fn on_resize_end(&mut self, _size: GridSize) {}
}

/// Resize callbacks as values, in the order they fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeEvent {
    Started(ResizeDirection, GridSize),
    Resized(GridSize),
    Moved(ResizeLine),
    Ended(GridSize),
}

impl ResizeHandler for Vec<ResizeEvent> {
    fn on_resize_start(&mut self, direction: ResizeDirection, size: GridSize) {
        self.push(ResizeEvent::Started(direction, size));
    }

    fn on_resize(&mut self, size: GridSize) {
        self.push(ResizeEvent::Resized(size));
    }

    fn on_resize_move(&mut self, line: ResizeLine) {
        self.push(ResizeEvent::Moved(line));
    }

    fn on_resize_end(&mut self, size: GridSize) {
        self.push(ResizeEvent::Ended(size));
    }
}

impl ResizeHandler for () {}

/// One step of exponential smoothing.
pub fn smooth(previous: f64, raw: f64, factor: f64) -> f64 {
    previous + (raw - previous) * factor
}

/// Snap a pixel width to a clamped column span.
pub fn cols_for_width(width: f64, cell_width: f64, constraints: &Constraints) -> u32 {
    constraints.clamp_cols(round_span(width / cell_width))
}

/// Snap a vertical pixel delta to a clamped row span.
///
/// The delta is rounded to the nearest half row, then to the nearest whole row.
/// Both steps round ties away from zero, so shrinking by a given distance
/// mirrors growing by it: -1.4 rows snaps to -2 just as 1.4 snaps to 2.
pub fn rows_for_delta(
    start_rows: u32,
    delta_y: f64,
    row_height: f64,
    constraints: &Constraints,
) -> u32 {
    let half_rows = (delta_y / row_height * 2.0).round() / 2.0;
    constraints.clamp_rows(i64::from(start_rows).saturating_add(round_span(half_rows)))
}

struct ResizeSession {
    direction: ResizeDirection,
    /// Pointer at pointer-down, in grid-local coordinates.
    start_pointer: Point,
    start_size: GridSize,
    smoothed_delta: f64,
    committed: GridSize,
    line: Option<ResizeLine>,
    throttle: Throttle<Point>,
    _lease: CaptureLease,
}

/// Resize state machine for one widget.
pub struct ResizeController {
    grid: GridConfig,
    config: GestureConfig,
    constraints: Constraints,
    container: Rc<dyn GridContainer>,
    capture: Rc<dyn PointerCapture>,
    session: Option<ResizeSession>,
}

impl ResizeController {
    pub fn new(
        grid: GridConfig,
        config: GestureConfig,
        constraints: Constraints,
        container: Rc<dyn GridContainer>,
    ) -> Self {
        Self {
            grid,
            config,
            constraints,
            container,
            capture: Rc::new(NoCapture),
            session: None,
        }
    }

    /// Attach global listeners through `capture` while a session is open.
    pub fn with_capture(mut self, capture: Rc<dyn PointerCapture>) -> Self {
        self.capture = capture;
        self
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn direction(&self) -> Option<ResizeDirection> {
        self.session.as_ref().map(|s| s.direction)
    }

    /// Cursor to show; `None` once the gesture is over.
    pub fn cursor(&self) -> Option<ResizeCursor> {
        self.direction().map(ResizeDirection::cursor)
    }

    /// Latest continuous feedback.
    pub fn line(&self) -> Option<ResizeLine> {
        self.session.as_ref().and_then(|s| s.line)
    }

    /// Last committed size of the open session.
    pub fn committed(&self) -> Option<GridSize> {
        self.session.as_ref().map(|s| s.committed)
    }

    /// When the host should call [`poll`](Self::poll) next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.as_ref().and_then(|s| s.throttle.next_deadline())
    }

    /// Start resizing from a handle.
    ///
    /// Returns false, leaving the controller idle, when the grid container
    /// is not laid out and the pointer cannot be mapped into it.
    pub fn pointer_down(
        &mut self,
        position: Point,
        start_size: GridSize,
        direction: ResizeDirection,
        now: Instant,
        handler: &mut dyn ResizeHandler,
    ) -> bool {
        if self.session.is_some() {
            log::debug!("Resize session replaced by new pointer-down");
            self.session = None;
        }

        let Some(bounds) = self.container.bounds() else {
            log::warn!("Resize ignored: grid container is not laid out");
            return false;
        };

        log::debug!(
            "Resize started from {} at {:?} ({:?})",
            direction.code(),
            start_size,
            now
        );
        self.session = Some(ResizeSession {
            direction,
            start_pointer: to_grid_space(position, bounds.origin()),
            start_size,
            smoothed_delta: 0.0,
            committed: start_size,
            line: None,
            throttle: Throttle::new(self.config.resize_throttle()),
            _lease: CaptureLease::acquire(&self.capture),
        });
        handler.on_resize_start(direction, start_size);
        true
    }

    pub fn pointer_move(&mut self, position: Point, now: Instant, handler: &mut dyn ResizeHandler) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(pointer) = session.throttle.submit(now, position) {
            self.execute(pointer, handler);
        }
    }

    /// Run a coalesced move whose trailing deadline has passed.
    pub fn poll(&mut self, now: Instant, handler: &mut dyn ResizeHandler) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(pointer) = session.throttle.poll(now) {
            self.execute(pointer, handler);
        }
    }

    /// Finish the resize. A coalesced move still waiting is applied first.
    pub fn pointer_up(&mut self, now: Instant, handler: &mut dyn ResizeHandler) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(pointer) = session.throttle.flush(now) {
            self.execute(pointer, handler);
        }

        if let Some(session) = self.session.take() {
            log::debug!("Resize ended at {:?}", session.committed);
            handler.on_resize_end(session.committed);
        }
    }

    /// Abort without callbacks.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Resize session cancelled");
        }
    }

    fn execute(&mut self, pointer: Point, handler: &mut dyn ResizeHandler) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(frame) = GridFrame::measure(self.container.as_ref(), &self.grid) else {
            log::warn!("Resize tick skipped: grid container has no usable width");
            return;
        };
        let metrics = frame.metrics;
        let current = frame.to_local(pointer);
        let direction = session.direction;

        let raw_delta = (current.x - session.start_pointer.x) * direction.horizontal_sign();
        session.smoothed_delta = smooth(session.smoothed_delta, raw_delta, self.config.smooth_factor);
        let proposed_width =
            metrics.span_width(session.start_size.cols) + session.smoothed_delta;
        let cols = cols_for_width(proposed_width, metrics.cell_width, &self.constraints);

        let (rows, row_ratio) = if direction.has_vertical() {
            let delta_y = (current.y - session.start_pointer.y) * direction.vertical_sign();
            let rows = rows_for_delta(
                session.start_size.rows,
                delta_y,
                metrics.row_height,
                &self.constraints,
            );
            let ratio = f64::from(session.start_size.rows) + delta_y / metrics.row_height;
            (rows, Some(ratio))
        } else {
            (session.start_size.rows, None)
        };

        let line = ResizeLine {
            col_ratio: proposed_width / metrics.cell_width,
            width: proposed_width,
            row_ratio,
        };
        log::trace!(
            "Resize raw {:.1}px smoothed {:.1}px -> {}x{}",
            raw_delta,
            session.smoothed_delta,
            cols,
            rows
        );
        session.line = Some(line);
        handler.on_resize_move(line);

        let size = GridSize::new(cols, rows);
        if size != session.committed {
            session.committed = size;
            handler.on_resize(size);
        }
    }
}

impl fmt::Debug for ResizeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeController")
            .field("grid", &self.grid)
            .field("constraints", &self.constraints)
            .field("direction", &self.direction())
            .field("committed", &self.committed())
            .finish_non_exhaustive()
    }
}
