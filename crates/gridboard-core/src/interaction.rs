//! Per-widget gesture arbitration.
//!
//! A widget owns one drag and one resize controller. Pointer-down on a
//! handle starts a resize, on the body a hold-to-drag; starting one cancels
//! the other, so at most one gesture is open per widget.

use crate::capture::PointerCapture;
use crate::config::DashboardConfig;
use crate::coords::{GridContainer, GridFrame};
use crate::drag::{DragHandler, HoldDragController};
use crate::feedback::Feedback;
use crate::handles::{HANDLE_HIT_TOLERANCE, hit_test_handles};
use crate::input::{PointerButton, PointerEvent};
use crate::layout::{Constraints, WidgetLayout};
use crate::resize::{ResizeController, ResizeCursor, ResizeDirection, ResizeHandler};
use crate::timer::Instant;
use kurbo::{Point, Rect};
use std::fmt;
use std::rc::Rc;

/// Which gesture is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize,
}

/// Drag and resize controllers for a single widget.
pub struct WidgetInteraction {
    layout: WidgetLayout,
    config: DashboardConfig,
    constraints: Constraints,
    container: Rc<dyn GridContainer>,
    drag: HoldDragController,
    resize: ResizeController,
    /// Widget bounds when the open resize began.
    resize_anchor: Option<Rect>,
    resizable: bool,
}

impl WidgetInteraction {
    pub fn new(
        layout: WidgetLayout,
        constraints: Constraints,
        config: DashboardConfig,
        container: Rc<dyn GridContainer>,
    ) -> Self {
        let drag = HoldDragController::new(config.grid, config.gestures, Rc::clone(&container));
        let resize =
            ResizeController::new(config.grid, config.gestures, constraints, Rc::clone(&container));
        Self {
            layout,
            config,
            constraints,
            container,
            drag,
            resize,
            resize_anchor: None,
            resizable: true,
        }
    }

    /// Route global listener attachment for both gestures through `capture`.
    pub fn with_capture(mut self, capture: Rc<dyn PointerCapture>) -> Self {
        self.drag = self.drag.with_capture(Rc::clone(&capture));
        self.resize = self.resize.with_capture(capture);
        self
    }

    /// Show resize handles (typically only while the widget is selected).
    pub fn set_resizable(&mut self, resizable: bool) {
        self.resizable = resizable;
    }

    pub fn layout(&self) -> WidgetLayout {
        self.layout
    }

    /// Update the layout after the consumer committed a change.
    pub fn set_layout(&mut self, layout: WidgetLayout) {
        self.layout = layout;
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// On-screen bounds of the widget at its committed layout.
    pub fn widget_rect(&self) -> Option<Rect> {
        let frame = GridFrame::measure(self.container.as_ref(), &self.config.grid)?;
        let WidgetLayout { position, size } = self.layout;
        Some(frame.cell_rect(position.col, position.row, size.cols, size.rows))
    }

    pub fn active_gesture(&self) -> Option<GestureKind> {
        if self.resize.is_active() {
            Some(GestureKind::Resize)
        } else if self.drag.is_active() {
            Some(GestureKind::Drag)
        } else {
            None
        }
    }

    pub fn gesture_active(&self) -> bool {
        self.active_gesture().is_some()
    }

    /// Whether a pointer-down at `point` would start a gesture here.
    pub fn accepts(&self, point: Point) -> bool {
        self.widget_rect().is_some_and(|rect| {
            self.handle_at(rect, point).is_some() || rect.contains(point)
        })
    }

    /// Process one pointer event. Returns true if the widget consumed it.
    pub fn handle_event<H: DragHandler + ResizeHandler>(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        handler: &mut H,
    ) -> bool {
        match *event {
            PointerEvent::Down {
                position,
                button: PointerButton::Primary,
            } => self.pointer_down(position, now, handler),
            PointerEvent::Down { .. } => false,
            PointerEvent::Move { position } => {
                if self.resize.is_active() {
                    self.resize.pointer_move(position, now, handler);
                    true
                } else if self.drag.is_active() {
                    self.drag.pointer_move(position, now, handler);
                    true
                } else {
                    false
                }
            }
            PointerEvent::Up { .. } if !event.is_primary() => false,
            PointerEvent::Up { .. } => {
                let consumed = self.gesture_active();
                self.resize.pointer_up(now, handler);
                self.drag.pointer_up(now, handler);
                self.resize_anchor = None;
                consumed
            }
            PointerEvent::Cancel => {
                let consumed = self.gesture_active();
                self.cancel();
                consumed
            }
        }
    }

    /// Fire due timers of the open gesture.
    pub fn poll<H: DragHandler + ResizeHandler>(&mut self, now: Instant, handler: &mut H) {
        self.drag.poll(now, handler);
        self.resize.poll(now, handler);
    }

    /// Advance frame-batched drag feedback. Returns true if a repaint is needed.
    pub fn animation_frame(&mut self) -> bool {
        self.drag.animation_frame()
    }

    /// Continuous feedback for the open gesture.
    pub fn feedback(&self) -> Feedback {
        if let (Some(line), Some(direction), Some(widget)) =
            (self.resize.line(), self.resize.direction(), self.resize_anchor)
        {
            if let Some(frame) = GridFrame::measure(self.container.as_ref(), &self.config.grid) {
                return Feedback::Resize {
                    line,
                    direction,
                    widget,
                    metrics: frame.metrics,
                };
            }
        }
        let visual = self.drag.visual();
        if visual.is_active() {
            Feedback::Drag(visual)
        } else {
            Feedback::Inactive
        }
    }

    /// Cursor for the open resize, or for a handle under `hover`.
    pub fn cursor(&self, hover: Point) -> Option<ResizeCursor> {
        if let Some(cursor) = self.resize.cursor() {
            return Some(cursor);
        }
        let rect = self.widget_rect()?;
        self.handle_at(rect, hover).map(|d| d.cursor())
    }

    /// When the host should call [`poll`](Self::poll) next.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.drag.next_deadline(), self.resize.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Abort any open gesture without callbacks.
    pub fn cancel(&mut self) {
        self.drag.cancel();
        self.resize.cancel();
        self.resize_anchor = None;
    }

    fn pointer_down<H: DragHandler + ResizeHandler>(
        &mut self,
        position: Point,
        now: Instant,
        handler: &mut H,
    ) -> bool {
        let Some(rect) = self.widget_rect() else {
            log::warn!("Pointer-down ignored: grid container has no usable width");
            return false;
        };

        if let Some(direction) = self.handle_at(rect, position) {
            self.drag.cancel();
            let started =
                self.resize
                    .pointer_down(position, self.layout.size, direction, now, handler);
            self.resize_anchor = started.then_some(rect);
            return started;
        }

        if rect.contains(position) {
            self.resize.cancel();
            self.resize_anchor = None;
            self.drag
                .pointer_down(position, self.layout.position, rect, now);
            return true;
        }
        false
    }

    fn handle_at(&self, rect: Rect, point: Point) -> Option<ResizeDirection> {
        if !self.resizable {
            return None;
        }
        hit_test_handles(rect, &self.constraints, point, HANDLE_HIT_TOLERANCE)
    }
}

impl fmt::Debug for WidgetInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetInteraction")
            .field("layout", &self.layout)
            .field("gesture", &self.active_gesture())
            .field("drag", &self.drag)
            .field("resize", &self.resize)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::DragEvent;
    use crate::layout::{GridPosition, GridSize, WidgetKind};
    use crate::resize::ResizeEvent;
    use crate::test_support::{CountingCapture, Recorder, ms};

    fn interaction(kind: WidgetKind, layout: WidgetLayout) -> WidgetInteraction {
        // 200px cells, 100px rows.
        let container: Rc<dyn GridContainer> = Rc::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        WidgetInteraction::new(layout, kind.constraints(), DashboardConfig::default(), container)
    }

    fn chart_at_origin() -> WidgetInteraction {
        interaction(
            WidgetKind::Chart,
            WidgetLayout::new(GridPosition::new(1, 1), GridSize::new(1, 1)),
        )
    }

    #[test]
    fn test_body_press_starts_drag() {
        let t0 = Instant::now();
        let mut widget = chart_at_origin();
        let mut rec = Recorder::default();

        assert!(widget.handle_event(&PointerEvent::down(Point::new(100.0, 50.0)), t0, &mut rec));
        assert_eq!(widget.active_gesture(), Some(GestureKind::Drag));
        widget.poll(t0 + ms(200), &mut rec);
        widget.handle_event(&PointerEvent::moved(Point::new(350.0, 50.0)), t0 + ms(220), &mut rec);
        widget.handle_event(&PointerEvent::up(Point::new(350.0, 50.0)), t0 + ms(240), &mut rec);

        assert_eq!(
            rec.drag,
            vec![
                DragEvent::Started(GridPosition::new(1, 1)),
                DragEvent::Moved(GridPosition::new(2, 1)),
                DragEvent::Ended(GridPosition::new(1, 1)),
            ]
        );
        assert!(rec.resize.is_empty());
        assert!(!widget.gesture_active());
    }

    #[test]
    fn test_handle_press_starts_resize() {
        let t0 = Instant::now();
        let mut widget = chart_at_origin();
        let mut rec = Recorder::default();

        // East edge midpoint of a 200x100 widget.
        assert!(widget.handle_event(&PointerEvent::down(Point::new(200.0, 50.0)), t0, &mut rec));
        assert_eq!(widget.active_gesture(), Some(GestureKind::Resize));
        assert_eq!(widget.cursor(Point::ZERO), Some(ResizeCursor::EwResize));

        widget.handle_event(&PointerEvent::moved(Point::new(600.0, 50.0)), t0 + ms(60), &mut rec);
        assert!(matches!(widget.feedback(), Feedback::Resize { .. }));
        widget.handle_event(&PointerEvent::up(Point::new(600.0, 50.0)), t0 + ms(300), &mut rec);

        assert!(rec.drag.is_empty());
        assert_eq!(rec.resize.first(), Some(&ResizeEvent::Started(ResizeDirection::East, GridSize::new(1, 1))));
        assert!(matches!(rec.resize.last(), Some(ResizeEvent::Ended(_))));
        assert_eq!(widget.feedback(), Feedback::Inactive);
    }

    #[test]
    fn test_non_resizable_widget_drags_from_edge() {
        let t0 = Instant::now();
        let mut widget = chart_at_origin();
        widget.set_resizable(false);
        let mut rec = Recorder::default();

        widget.handle_event(&PointerEvent::down(Point::new(199.0, 50.0)), t0, &mut rec);
        assert_eq!(widget.active_gesture(), Some(GestureKind::Drag));
        assert_eq!(widget.cursor(Point::new(200.0, 50.0)), None);
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let t0 = Instant::now();
        let mut widget = chart_at_origin();
        let mut rec = Recorder::default();

        assert!(!widget.accepts(Point::new(500.0, 300.0)));
        assert!(!widget.handle_event(&PointerEvent::down(Point::new(500.0, 300.0)), t0, &mut rec));
        assert!(!widget.handle_event(&PointerEvent::moved(Point::new(510.0, 300.0)), t0, &mut rec));
        assert!(!widget.gesture_active());
    }

    #[test]
    fn test_resize_press_cancels_pending_drag() {
        let t0 = Instant::now();
        let counter = Rc::new(CountingCapture::default());
        let mut widget = chart_at_origin().with_capture(counter.clone());
        let mut rec = Recorder::default();

        widget.handle_event(&PointerEvent::down(Point::new(100.0, 50.0)), t0, &mut rec);
        widget.handle_event(&PointerEvent::down(Point::new(200.0, 50.0)), t0 + ms(50), &mut rec);
        assert_eq!(widget.active_gesture(), Some(GestureKind::Resize));
        assert_eq!(counter.active(), 1);

        // The abandoned hold never fires.
        widget.poll(t0 + ms(400), &mut rec);
        assert!(rec.drag.is_empty());

        widget.handle_event(&PointerEvent::Cancel, t0 + ms(410), &mut rec);
        assert_eq!(counter.active(), 0);
        assert_eq!(counter.attached(), counter.detached());
    }

    #[test]
    fn test_secondary_button_ignored() {
        let t0 = Instant::now();
        let mut widget = chart_at_origin();
        let mut rec = Recorder::default();
        let event = PointerEvent::Down {
            position: Point::new(100.0, 50.0),
            button: PointerButton::Secondary,
        };
        assert!(!widget.handle_event(&event, t0, &mut rec));
    }

    #[test]
    fn test_next_deadline_tracks_hold() {
        let t0 = Instant::now();
        let mut widget = chart_at_origin();
        let mut rec = Recorder::default();
        assert!(widget.next_deadline().is_none());
        widget.handle_event(&PointerEvent::down(Point::new(100.0, 50.0)), t0, &mut rec);
        assert_eq!(widget.next_deadline(), Some(t0 + ms(200)));
    }

    #[test]
    fn test_drag_feedback_after_frame() {
        let t0 = Instant::now();
        let mut widget = chart_at_origin();
        let mut rec = Recorder::default();

        widget.handle_event(&PointerEvent::down(Point::new(100.0, 50.0)), t0, &mut rec);
        widget.poll(t0 + ms(200), &mut rec);
        widget.handle_event(&PointerEvent::moved(Point::new(130.0, 60.0)), t0 + ms(210), &mut rec);
        assert!(widget.animation_frame());

        match widget.feedback() {
            Feedback::Drag(visual) => {
                assert_eq!(visual.ghost_rect(), Some(Rect::new(30.0, 10.0, 230.0, 110.0)));
            }
            other => panic!("unexpected feedback {other:?}"),
        }
    }
}
