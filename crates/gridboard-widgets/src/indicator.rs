//! Resize guides and drag ghosts as egui shapes.

use egui::{Color32, CornerRadius, Shape, Stroke, StrokeKind};
use gridboard_core::{Feedback, IndicatorShape, IndicatorSink, feedback};

use crate::convert::{to_egui_rect, to_pos2};
use crate::{sizing, theme};

/// How indicators are painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorStyle {
    pub line: Stroke,
    pub ghost_stroke: Stroke,
    pub ghost_fill: Color32,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            line: Stroke::new(2.0, theme::ACCENT),
            ghost_stroke: Stroke::new(1.5, theme::ACCENT),
            ghost_fill: theme::GHOST_FILL,
        }
    }
}

/// Collects indicator shapes for a painter.
#[derive(Debug, Default)]
pub struct ShapeSink {
    style: IndicatorStyle,
    shapes: Vec<Shape>,
}

impl ShapeSink {
    pub fn new(style: IndicatorStyle) -> Self {
        Self {
            style,
            shapes: Vec::new(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }
}

impl IndicatorSink for ShapeSink {
    fn draw(&mut self, shape: IndicatorShape) {
        match shape {
            IndicatorShape::Line(line) => {
                self.shapes.push(Shape::line_segment(
                    [to_pos2(line.p0), to_pos2(line.p1)],
                    self.style.line,
                ));
            }
            IndicatorShape::Ghost(rect) => {
                let rect = to_egui_rect(rect);
                let radius = CornerRadius::same(sizing::CORNER_RADIUS);
                self.shapes
                    .push(Shape::rect_filled(rect, radius, self.style.ghost_fill));
                self.shapes.push(Shape::rect_stroke(
                    rect,
                    radius,
                    self.style.ghost_stroke,
                    StrokeKind::Outside,
                ));
            }
        }
    }
}

/// Paint the feedback for the current frame.
pub fn paint_feedback(painter: &egui::Painter, state: &Feedback, style: IndicatorStyle) {
    let mut sink = ShapeSink::new(style);
    if feedback::emit(state, &mut sink) {
        painter.extend(sink.into_shapes());
    }
}
