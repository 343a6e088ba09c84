//! Resize handles around a widget.

use crate::layout::Constraints;
use crate::resize::ResizeDirection;
use kurbo::{Point, Rect};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 10.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// A resize handle with its on-screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub direction: ResizeDirection,
    /// Center of the handle in viewport coordinates.
    pub position: Point,
}

impl Handle {
    pub fn new(direction: ResizeDirection, position: Point) -> Self {
        Self {
            direction,
            position,
        }
    }

    /// Check if a point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance
            && (point.y - self.position.y).abs() <= tolerance
    }

    /// Square the handle is painted in.
    pub fn rect(&self, size: f64) -> Rect {
        Rect::from_center_size(self.position, (size, size))
    }

    pub fn is_corner(&self) -> bool {
        self.direction.has_horizontal() && self.direction.has_vertical()
    }
}

/// Handles for a widget, skipping those that can only act on an axis the
/// constraints pin in place.
///
/// Corners come first so hit testing prefers them over edges.
pub fn widget_handles(bounds: Rect, constraints: &Constraints) -> Vec<Handle> {
    let center = bounds.center();
    let all = [
        Handle::new(ResizeDirection::NorthWest, Point::new(bounds.x0, bounds.y0)),
        Handle::new(ResizeDirection::NorthEast, Point::new(bounds.x1, bounds.y0)),
        Handle::new(ResizeDirection::SouthWest, Point::new(bounds.x0, bounds.y1)),
        Handle::new(ResizeDirection::SouthEast, Point::new(bounds.x1, bounds.y1)),
        Handle::new(ResizeDirection::North, Point::new(center.x, bounds.y0)),
        Handle::new(ResizeDirection::South, Point::new(center.x, bounds.y1)),
        Handle::new(ResizeDirection::West, Point::new(bounds.x0, center.y)),
        Handle::new(ResizeDirection::East, Point::new(bounds.x1, center.y)),
    ];

    let cols = constraints.resizable_cols();
    let rows = constraints.resizable_rows();
    all.into_iter()
        .filter(|h| {
            let d = h.direction;
            (d.has_horizontal() && cols) || (d.has_vertical() && rows)
        })
        .collect()
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(
    bounds: Rect,
    constraints: &Constraints,
    point: Point,
    tolerance: f64,
) -> Option<ResizeDirection> {
    widget_handles(bounds, constraints)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.direction)
}
