//! Painting resize handles and picking resize cursors.

use egui::{Color32, CornerRadius, CursorIcon, Shape, Stroke, StrokeKind};
use gridboard_core::{Constraints, HANDLE_SIZE, ResizeCursor, widget_handles};

use crate::convert::{to_egui_rect, to_kurbo_rect};
use crate::theme;

pub fn cursor_icon(cursor: ResizeCursor) -> CursorIcon {
    match cursor {
        ResizeCursor::NsResize => CursorIcon::ResizeVertical,
        ResizeCursor::EwResize => CursorIcon::ResizeHorizontal,
        ResizeCursor::NeswResize => CursorIcon::ResizeNeSw,
        ResizeCursor::NwseResize => CursorIcon::ResizeNwSe,
    }
}

/// Selection outline plus one square per available handle.
pub fn handle_shapes(bounds: egui::Rect, constraints: &Constraints) -> Vec<Shape> {
    let mut shapes = vec![Shape::rect_stroke(
        bounds,
        CornerRadius::ZERO,
        Stroke::new(1.0, theme::ACCENT),
        StrokeKind::Middle,
    )];

    for handle in widget_handles(to_kurbo_rect(bounds), constraints) {
        let rect = to_egui_rect(handle.rect(HANDLE_SIZE));
        // White fill, blue border
        shapes.push(Shape::rect_filled(rect, CornerRadius::same(2), Color32::WHITE));
        shapes.push(Shape::rect_stroke(
            rect,
            CornerRadius::same(2),
            Stroke::new(1.5, theme::ACCENT),
            StrokeKind::Inside,
        ));
    }
    shapes
}

pub fn paint_handles(painter: &egui::Painter, bounds: egui::Rect, constraints: &Constraints) {
    painter.extend(handle_shapes(bounds, constraints));
}
