//! Pointer-to-grid coordinate mapping.
//!
//! The grid container is an injected capability: controllers ask it for its
//! current bounds on every tick instead of caching them, because the
//! container may be resized or shifted (sidebar toggle, window resize) while
//! a gesture is in flight.

use crate::config::GridConfig;
use kurbo::{Point, Rect, Vec2};
use std::cell::Cell;

/// Source of the grid container's on-screen geometry.
pub trait GridContainer {
    /// Current bounds of the container in viewport coordinates.
    ///
    /// `None` when the container is not laid out yet.
    fn bounds(&self) -> Option<Rect>;
}

/// Fixed bounds, mostly useful for hosts that lay out once.
impl GridContainer for Rect {
    fn bounds(&self) -> Option<Rect> {
        Some(*self)
    }
}

/// Bounds updated by the host as layout changes.
impl GridContainer for Cell<Rect> {
    fn bounds(&self) -> Option<Rect> {
        Some(self.get())
    }
}

impl GridContainer for Cell<Option<Rect>> {
    fn bounds(&self) -> Option<Rect> {
        self.get()
    }
}

/// Pixel size of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Width of one column in pixels.
    pub cell_width: f64,
    /// Height of one row in pixels.
    pub row_height: f64,
}

impl CellMetrics {
    /// Derive cell metrics from a container width.
    ///
    /// Returns `None` when the width cannot produce a usable cell size.
    pub fn from_width(container_width: f64, grid: &GridConfig) -> Option<Self> {
        let cell_width = base_cell_width(container_width, grid.columns)?;
        let row_height = cell_width * grid.cell_aspect_ratio;
        if !row_height.is_finite() || row_height <= 0.0 {
            return None;
        }
        Some(Self {
            cell_width,
            row_height,
        })
    }

    /// Width in pixels of a span of `cols` columns.
    pub fn span_width(&self, cols: u32) -> f64 {
        self.cell_width * f64::from(cols)
    }

    /// Height in pixels of a span of `rows` rows.
    pub fn span_height(&self, rows: u32) -> f64 {
        self.row_height * f64::from(rows)
    }
}

/// Container geometry resolved for a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridFrame {
    /// Container top-left in viewport coordinates.
    pub origin: Point,
    pub metrics: CellMetrics,
}

impl GridFrame {
    /// Measure the container, or `None` if it has no usable width.
    pub fn measure(container: &dyn GridContainer, grid: &GridConfig) -> Option<Self> {
        let bounds = container.bounds()?;
        let metrics = CellMetrics::from_width(bounds.width(), grid)?;
        Some(Self {
            origin: bounds.origin(),
            metrics,
        })
    }

    /// Map a viewport point into the container's local frame.
    pub fn to_local(&self, pointer: Point) -> Point {
        to_grid_space(pointer, self.origin)
    }

    /// On-screen rectangle of a cell span anchored at a 1-indexed cell.
    pub fn cell_rect(&self, col: u32, row: u32, cols: u32, rows: u32) -> Rect {
        let x0 = self.origin.x + self.metrics.span_width(col.saturating_sub(1));
        let y0 = self.origin.y + self.metrics.span_height(row.saturating_sub(1));
        Rect::new(
            x0,
            y0,
            x0 + self.metrics.span_width(cols),
            y0 + self.metrics.span_height(rows),
        )
    }
}

/// Position of `pointer` relative to the container's top-left corner.
pub fn to_grid_space(pointer: Point, container_origin: Point) -> Point {
    Point::ZERO + (pointer - container_origin)
}

/// Container width divided by the column count.
///
/// `None` for a zero, negative or non-finite width, or zero columns, so no
/// division result can reach the layout.
pub fn base_cell_width(container_width: f64, columns: u32) -> Option<f64> {
    if columns == 0 || !container_width.is_finite() || container_width <= 0.0 {
        return None;
    }
    Some(container_width / f64::from(columns))
}

/// Difference between two pointer positions.
pub fn pointer_delta(from: Point, to: Point) -> Vec2 {
    to - from
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_cell_width() {
        assert_eq!(base_cell_width(800.0, 4), Some(200.0));
        assert_eq!(base_cell_width(0.0, 4), None);
        assert_eq!(base_cell_width(-10.0, 4), None);
        assert_eq!(base_cell_width(f64::NAN, 4), None);
        assert_eq!(base_cell_width(800.0, 0), None);
    }

    #[test]
    fn test_to_grid_space_offsets_origin() {
        // Grid sits behind a 240px side panel.
        let local = to_grid_space(Point::new(340.0, 150.0), Point::new(240.0, 100.0));
        assert!((local.x - 100.0).abs() < f64::EPSILON);
        assert!((local.y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_measure_frame() {
        let grid = GridConfig::new(4, 0.5);
        let container = Rect::new(240.0, 60.0, 1040.0, 900.0);
        let frame = GridFrame::measure(&container, &grid).unwrap();
        assert_eq!(frame.origin, Point::new(240.0, 60.0));
        assert!((frame.metrics.cell_width - 200.0).abs() < f64::EPSILON);
        assert!((frame.metrics.row_height - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_measure_zero_width() {
        let grid = GridConfig::new(4, 0.5);
        let container = Rect::new(10.0, 10.0, 10.0, 500.0);
        assert!(GridFrame::measure(&container, &grid).is_none());

        let unlaid: Cell<Option<Rect>> = Cell::new(None);
        assert!(GridFrame::measure(&unlaid, &grid).is_none());
    }

    #[test]
    fn test_measure_follows_container_changes() {
        let grid = GridConfig::new(4, 1.0);
        let container = Cell::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        let before = GridFrame::measure(&container, &grid).unwrap();
        container.set(Rect::new(0.0, 0.0, 400.0, 600.0));
        let after = GridFrame::measure(&container, &grid).unwrap();
        assert!((before.metrics.cell_width - 200.0).abs() < f64::EPSILON);
        assert!((after.metrics.cell_width - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cell_rect() {
        let grid = GridConfig::new(4, 0.5);
        let frame = GridFrame::measure(&Rect::new(100.0, 0.0, 900.0, 600.0), &grid).unwrap();
        let rect = frame.cell_rect(2, 3, 2, 1);
        assert_eq!(rect, Rect::new(300.0, 200.0, 700.0, 300.0));
    }
}
