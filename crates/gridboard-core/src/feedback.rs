//! Visual feedback for in-flight gestures.
//!
//! Feedback follows the continuous, pre-snap signal so the indicator glides
//! with the pointer while the committed layout jumps cell by cell. Nothing
//! here keeps state: each frame maps the current signal to shapes.

use crate::coords::CellMetrics;
use crate::drag::DragVisual;
use crate::resize::{ResizeDirection, ResizeLine};
use kurbo::{Line, Point, Rect};

/// A shape the host should paint this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorShape {
    /// Resize guide line.
    Line(Line),
    /// Outline following a dragged widget.
    Ghost(Rect),
}

/// Paints indicator shapes.
pub trait IndicatorSink {
    fn draw(&mut self, shape: IndicatorShape);
}

impl IndicatorSink for Vec<IndicatorShape> {
    fn draw(&mut self, shape: IndicatorShape) {
        self.push(shape);
    }
}

/// Continuous signal for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feedback {
    Inactive,
    Resize {
        line: ResizeLine,
        direction: ResizeDirection,
        /// Widget bounds at their committed size when the resize began.
        widget: Rect,
        metrics: CellMetrics,
    },
    Drag(DragVisual),
}

/// Linear map from a span ratio to a pixel offset.
pub fn ratio_to_offset(ratio: f64, unit: f64) -> f64 {
    ratio * unit
}

/// Emit the shapes for `feedback`. Returns false when nothing was drawn.
pub fn emit(feedback: &Feedback, sink: &mut dyn IndicatorSink) -> bool {
    match *feedback {
        Feedback::Inactive => false,
        Feedback::Drag(visual) => match visual.ghost_rect() {
            Some(rect) => {
                sink.draw(IndicatorShape::Ghost(rect));
                true
            }
            None => false,
        },
        Feedback::Resize {
            line,
            direction,
            widget,
            metrics,
        } => {
            let mut drawn = false;
            if let Some(guide) = column_guide(&line, direction, widget, metrics) {
                sink.draw(IndicatorShape::Line(guide));
                drawn = true;
            }
            if let Some(guide) = row_guide(&line, direction, widget, metrics) {
                sink.draw(IndicatorShape::Line(guide));
                drawn = true;
            }
            drawn
        }
    }
}

/// Vertical guide at the proposed right (or left, for west handles) edge.
pub fn column_guide(
    line: &ResizeLine,
    direction: ResizeDirection,
    widget: Rect,
    metrics: CellMetrics,
) -> Option<Line> {
    let offset = ratio_to_offset(line.col_ratio, metrics.cell_width);
    let x = match direction.horizontal_sign() {
        s if s > 0.0 => widget.x0 + offset,
        s if s < 0.0 => widget.x1 - offset,
        _ => return None,
    };
    Some(Line::new(Point::new(x, widget.y0), Point::new(x, widget.y1)))
}

/// Horizontal guide at the proposed bottom (or top, for north handles) edge.
pub fn row_guide(
    line: &ResizeLine,
    direction: ResizeDirection,
    widget: Rect,
    metrics: CellMetrics,
) -> Option<Line> {
    let offset = ratio_to_offset(line.row_ratio?, metrics.row_height);
    let y = if direction.vertical_sign() > 0.0 {
        widget.y0 + offset
    } else {
        widget.y1 - offset
    };
    Some(Line::new(Point::new(widget.x0, y), Point::new(widget.x1, y)))
}
