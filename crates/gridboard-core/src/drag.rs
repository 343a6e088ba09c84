//! Hold-to-drag controller.
//!
//! A press only becomes a drag once the pointer has stayed within
//! [`GestureConfig::min_drag_distance`] for [`GestureConfig::hold_duration`].
//! Moving further before that turns the press into a tap and the session is
//! dropped without any callback.
//!
//! ```text
//! Idle --down--> PendingHold --hold elapsed--> Dragging --up--> Idle
//!                    |  \--moved too far / up--> Idle (no callbacks)
//! ```
//!
//! While dragging, the controller produces two signals: a continuous pixel
//! offset for the ghost outline (applied once per animation frame) and a
//! clamped grid position reported through [`DragHandler::on_drag`] on every
//! move.

use crate::capture::{CaptureLease, NoCapture, PointerCapture};
use crate::config::{GestureConfig, GridConfig};
use crate::coords::{GridContainer, GridFrame};
use crate::layout::{GridPosition, clamp_position, floor_span};
use crate::timer::{Instant, ScopedTimer};
use kurbo::{Point, Rect, Vec2};
use std::fmt;
use std::rc::Rc;

/// Receives drag gesture callbacks.
pub trait DragHandler {
    /// The hold elapsed; `origin` is the widget's position at pointer-down.
    fn on_drag_start(&mut self, _origin: GridPosition) {}
    /// Clamped candidate cell for the current pointer position.
    ///
    /// Fires on every move, even when the candidate is unchanged.
    fn on_drag(&mut self, _candidate: GridPosition) {}
    /// The drag was released. Reports the original position; committing a
    /// new one is left to the consumer.
    fn on_drag_end(&mut self, _origin: GridPosition) {}
}

/// Drag callbacks as values, in the order they fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    Started(GridPosition),
    Moved(GridPosition),
    Ended(GridPosition),
}

impl DragHandler for Vec<DragEvent> {
    fn on_drag_start(&mut self, origin: GridPosition) {
        self.push(DragEvent::Started(origin));
    }

    fn on_drag(&mut self, candidate: GridPosition) {
        self.push(DragEvent::Moved(candidate));
    }

    fn on_drag_end(&mut self, origin: GridPosition) {
        self.push(DragEvent::Ended(origin));
    }
}

/// Handler that ignores every callback.
impl DragHandler for () {}

/// Where the drag state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    PendingHold,
    Dragging,
}

/// Continuous drag feedback: the widget's bounds at drag start and the
/// pointer offset since pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragVisual {
    pub offset: Vec2,
    pub anchor: Option<Rect>,
}

impl DragVisual {
    /// Ghost outline: the anchor translated by the current offset.
    pub fn ghost_rect(&self) -> Option<Rect> {
        self.anchor.map(|anchor| anchor + self.offset)
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }
}

struct DragSession {
    origin: Point,
    start: GridPosition,
    widget_bounds: Rect,
    hold: ScopedTimer,
    dragging: bool,
    /// Offset waiting for the next animation frame.
    pending_offset: Option<Vec2>,
    last_candidate: Option<GridPosition>,
    _lease: CaptureLease,
}

/// Hold-to-drag state machine for one widget.
pub struct HoldDragController {
    grid: GridConfig,
    config: GestureConfig,
    container: Rc<dyn GridContainer>,
    capture: Rc<dyn PointerCapture>,
    session: Option<DragSession>,
    visual: DragVisual,
}

impl HoldDragController {
    /// Create a controller measuring cells against `container`.
    pub fn new(grid: GridConfig, config: GestureConfig, container: Rc<dyn GridContainer>) -> Self {
        Self {
            grid,
            config,
            container,
            capture: Rc::new(NoCapture),
            session: None,
            visual: DragVisual::default(),
        }
    }

    /// Attach global listeners through `capture` while a session is open.
    pub fn with_capture(mut self, capture: Rc<dyn PointerCapture>) -> Self {
        self.capture = capture;
        self
    }

    pub fn phase(&self) -> DragPhase {
        match &self.session {
            None => DragPhase::Idle,
            Some(session) if session.dragging => DragPhase::Dragging,
            Some(_) => DragPhase::PendingHold,
        }
    }

    /// Whether a session (pending or dragging) is open.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == DragPhase::Dragging
    }

    /// Continuous feedback as of the last animation frame.
    pub fn visual(&self) -> DragVisual {
        self.visual
    }

    /// Most recent candidate reported through [`DragHandler::on_drag`].
    pub fn last_candidate(&self) -> Option<GridPosition> {
        self.session.as_ref().and_then(|s| s.last_candidate)
    }

    /// When the host should call [`poll`](Self::poll) next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.as_ref().and_then(|s| s.hold.deadline())
    }

    /// Open a session. Any previous session is discarded without callbacks.
    pub fn pointer_down(
        &mut self,
        position: Point,
        start: GridPosition,
        widget_bounds: Rect,
        now: Instant,
    ) {
        if self.session.is_some() {
            log::debug!("Drag session replaced by new pointer-down");
            self.reset();
        }

        log::debug!(
            "Drag hold armed at ({:.1}, {:.1}) for {:?}",
            position.x,
            position.y,
            start
        );
        self.session = Some(DragSession {
            origin: position,
            start,
            widget_bounds,
            hold: ScopedTimer::armed(now, self.config.hold_duration()),
            dragging: false,
            pending_offset: None,
            last_candidate: None,
            _lease: CaptureLease::acquire(&self.capture),
        });
    }

    /// Fire the hold timer if it is due.
    pub fn poll(&mut self, now: Instant, handler: &mut dyn DragHandler) {
        self.fire_hold_if_due(now, handler);
    }

    pub fn pointer_move(&mut self, position: Point, now: Instant, handler: &mut dyn DragHandler) {
        self.fire_hold_if_due(now, handler);

        let Some(session) = self.session.as_mut() else {
            return;
        };
        let delta = position - session.origin;

        if !session.dragging {
            let threshold = self.config.min_drag_distance;
            if delta.x.abs() > threshold || delta.y.abs() > threshold {
                log::debug!(
                    "Drag hold cancelled: moved ({:.1}, {:.1}) before hold elapsed",
                    delta.x,
                    delta.y
                );
                self.session = None;
            }
            return;
        }

        session.pending_offset = Some(delta);

        let Some(frame) = GridFrame::measure(self.container.as_ref(), &self.grid) else {
            log::warn!("Drag tick skipped: grid container has no usable width");
            return;
        };
        let col_delta = floor_span(delta.x / frame.metrics.cell_width);
        let row_delta = floor_span(delta.y / frame.metrics.row_height);
        let candidate = clamp_position(
            i64::from(session.start.col).saturating_add(col_delta),
            i64::from(session.start.row).saturating_add(row_delta),
            self.grid.columns,
        );
        log::trace!(
            "Drag delta ({:.1}, {:.1}) -> candidate {:?}",
            delta.x,
            delta.y,
            candidate
        );
        session.last_candidate = Some(candidate);
        handler.on_drag(candidate);
    }

    /// Close the session. Fires [`DragHandler::on_drag_end`] only if the
    /// hold had elapsed.
    pub fn pointer_up(&mut self, now: Instant, handler: &mut dyn DragHandler) {
        self.fire_hold_if_due(now, handler);

        let Some(session) = self.session.take() else {
            return;
        };
        self.visual = DragVisual::default();

        if session.dragging {
            log::debug!("Drag ended for {:?}", session.start);
            handler.on_drag_end(session.start);
        } else {
            log::trace!("Press released before hold elapsed");
        }
    }

    /// Apply the latest pointer offset to the visual state.
    ///
    /// Returns true when the ghost moved and needs repainting.
    pub fn animation_frame(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match session.pending_offset.take() {
            Some(offset) if offset != self.visual.offset => {
                self.visual.offset = offset;
                true
            }
            _ => false,
        }
    }

    /// Abort any session without callbacks.
    pub fn cancel(&mut self) {
        if self.session.is_some() {
            log::debug!("Drag session cancelled");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.session = None;
        self.visual = DragVisual::default();
    }

    fn fire_hold_if_due(&mut self, now: Instant, handler: &mut dyn DragHandler) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.dragging || !session.hold.fire_if_due(now) {
            return;
        }

        session.dragging = true;
        self.visual = DragVisual {
            offset: Vec2::ZERO,
            anchor: Some(session.widget_bounds),
        };
        log::debug!("Drag started for {:?}", session.start);
        handler.on_drag_start(session.start);
    }
}

impl fmt::Debug for HoldDragController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoldDragController")
            .field("grid", &self.grid)
            .field("phase", &self.phase())
            .field("visual", &self.visual)
            .finish_non_exhaustive()
    }
}
