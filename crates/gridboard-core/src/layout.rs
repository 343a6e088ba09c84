//! Grid layout primitives: positions, sizes, constraints and widget kinds.

use serde::{Deserialize, Serialize};

/// A 1-indexed grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub col: u32,
    pub row: u32,
}

impl GridPosition {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// A span of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: u32,
    pub rows: u32,
}

impl GridSize {
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }
}

/// Where a widget sits on the grid and how much of it it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetLayout {
    pub position: GridPosition,
    pub size: GridSize,
}

impl WidgetLayout {
    pub const fn new(position: GridPosition, size: GridSize) -> Self {
        Self { position, size }
    }

    /// Last column covered by the widget, saturating at `u32::MAX`.
    pub fn last_col(&self) -> u32 {
        self.position.col.saturating_add(self.size.cols.saturating_sub(1))
    }

    /// Last row covered by the widget, saturating at `u32::MAX`.
    pub fn last_row(&self) -> u32 {
        self.position.row.saturating_add(self.size.rows.saturating_sub(1))
    }

    /// Check whether the widget fits horizontally in a grid of `columns`.
    pub fn fits(&self, columns: u32) -> bool {
        self.position.row >= 1
            && self.size.rows >= 1
            && self.size.cols >= 1
            && self.position.col >= 1
            && self
                .position
                .col
                .checked_add(self.size.cols - 1)
                .is_some_and(|last| last <= columns)
    }
}

/// Size limits for a widget.
///
/// `min_size <= max_size` componentwise is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub min_size: GridSize,
    pub max_size: GridSize,
}

impl Constraints {
    pub const fn new(min_size: GridSize, max_size: GridSize) -> Self {
        Self { min_size, max_size }
    }

    /// Clamp a proposed column span.
    pub fn clamp_cols(&self, cols: i64) -> u32 {
        clamp_span(cols, self.min_size.cols, self.max_size.cols)
    }

    /// Clamp a proposed row span.
    pub fn clamp_rows(&self, rows: i64) -> u32 {
        clamp_span(rows, self.min_size.rows, self.max_size.rows)
    }

    /// Clamp a size componentwise.
    pub fn clamp(&self, size: GridSize) -> GridSize {
        GridSize::new(
            self.clamp_cols(i64::from(size.cols)),
            self.clamp_rows(i64::from(size.rows)),
        )
    }

    /// Check whether a size lies within the limits.
    pub fn contains(&self, size: GridSize) -> bool {
        (self.min_size.cols..=self.max_size.cols).contains(&size.cols)
            && (self.min_size.rows..=self.max_size.rows).contains(&size.rows)
    }

    /// Whether the widget can change its column span at all.
    pub fn resizable_cols(&self) -> bool {
        self.min_size.cols < self.max_size.cols
    }

    /// Whether the widget can change its row span at all.
    pub fn resizable_rows(&self) -> bool {
        self.min_size.rows < self.max_size.rows
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::new(GridSize::new(1, 1), GridSize::new(4, 4))
    }
}

/// Clamp `value` into `[lo, hi]`.
///
/// Never panics: with `lo > hi` the upper bound wins.
pub fn clamp_span(value: i64, lo: u32, hi: u32) -> u32 {
    let clamped = value.max(i64::from(lo)).min(i64::from(hi));
    u32::try_from(clamped).unwrap_or(0)
}

/// Clamp a drag candidate: column into `[1, columns]`, row to `>= 1`.
pub fn clamp_position(col: i64, row: i64, columns: u32) -> GridPosition {
    let col = clamp_span(col, 1, columns.max(1));
    let row = u32::try_from(row.max(1)).unwrap_or(u32::MAX);
    GridPosition::new(col, row)
}

/// Round a floating grid quantity to an integer span, saturating at the `i64` range.
pub(crate) fn round_span(value: f64) -> i64 {
    if value.is_nan() { 0 } else { value.round() as i64 }
}

/// Floor a floating grid quantity, saturating at the `i64` range.
pub(crate) fn floor_span(value: f64) -> i64 {
    if value.is_nan() { 0 } else { value.floor() as i64 }
}

/// Dashboard widget types and their default size limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Time-series chart (fixed single row).
    Chart,
    Gauge,
    Slider,
    Switch,
    /// Single value readout.
    Stat,
    Table,
    CameraFeed,
    Map,
}

impl WidgetKind {
    /// All kinds, in catalogue order.
    pub const ALL: [WidgetKind; 8] = [
        WidgetKind::Chart,
        WidgetKind::Gauge,
        WidgetKind::Slider,
        WidgetKind::Switch,
        WidgetKind::Stat,
        WidgetKind::Table,
        WidgetKind::CameraFeed,
        WidgetKind::Map,
    ];

    /// Default size limits for this kind of widget.
    pub fn constraints(self) -> Constraints {
        let (min, max) = match self {
            WidgetKind::Chart => ((1, 1), (4, 1)),
            WidgetKind::Gauge => ((1, 1), (2, 2)),
            WidgetKind::Slider => ((1, 1), (4, 1)),
            WidgetKind::Switch => ((1, 1), (1, 1)),
            WidgetKind::Stat => ((1, 1), (2, 1)),
            WidgetKind::Table => ((2, 2), (4, 6)),
            WidgetKind::CameraFeed => ((2, 2), (4, 4)),
            WidgetKind::Map => ((2, 2), (4, 4)),
        };
        Constraints::new(GridSize::new(min.0, min.1), GridSize::new(max.0, max.1))
    }

    /// Size a freshly added widget of this kind starts with.
    pub fn default_size(self) -> GridSize {
        self.constraints().min_size
    }
}
