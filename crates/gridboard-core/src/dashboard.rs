//! Dashboard layout: which widget sits where.
//!
//! Gesture controllers only propose positions and sizes. The dashboard is
//! where proposals become layout, and where placement rules are enforced:
//! a widget starts at column and row 1 or later, never extends past the last
//! column, and stays within its kind's size limits.

use crate::config::{DashboardConfig, GridConfig};
use crate::coords::{GridContainer, GridFrame};
use crate::drag::DragHandler;
use crate::interaction::WidgetInteraction;
use crate::layout::{Constraints, GridPosition, GridSize, WidgetKind, WidgetLayout};
use crate::resize::{ResizeDirection, ResizeHandler};
use kurbo::{Point, Rect};
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a widget on a dashboard.
pub type WidgetId = Uuid;

/// Layout errors.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Unknown widget: {0}")]
    UnknownWidget(WidgetId),
    #[error("Widget at column {col} spanning {cols} does not fit in {columns} columns")]
    OutOfBounds { col: u32, cols: u32, columns: u32 },
    #[error("Size {cols}x{rows} violates constraints {min:?}..={max:?}")]
    ConstraintViolation {
        cols: u32,
        rows: u32,
        min: GridSize,
        max: GridSize,
    },
}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// A widget placed on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardWidget {
    pub id: WidgetId,
    pub kind: WidgetKind,
    pub layout: WidgetLayout,
    pub constraints: Constraints,
}

/// Widgets on one grid.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    grid: GridConfig,
    widgets: HashMap<WidgetId, DashboardWidget>,
    /// Insertion order; later widgets are on top.
    order: Vec<WidgetId>,
    /// Latest drag candidate awaiting release.
    drag_candidate: Option<(WidgetId, GridPosition)>,
    /// Handle and starting layout of the resize in progress.
    resize_anchor: Option<(WidgetId, ResizeDirection, WidgetLayout)>,
}

impl Dashboard {
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            ..Default::default()
        }
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Add a widget of `kind` at its default size.
    pub fn add(&mut self, kind: WidgetKind, position: GridPosition) -> LayoutResult<WidgetId> {
        self.insert(kind, WidgetLayout::new(position, kind.default_size()))
    }

    /// Add a widget with an explicit layout.
    pub fn insert(&mut self, kind: WidgetKind, layout: WidgetLayout) -> LayoutResult<WidgetId> {
        let constraints = kind.constraints();
        self.check(&layout, &constraints)?;

        let id = Uuid::new_v4();
        self.widgets.insert(
            id,
            DashboardWidget {
                id,
                kind,
                layout,
                constraints,
            },
        );
        self.order.push(id);
        log::debug!("Added {kind:?} {id} at {layout:?}");
        Ok(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&DashboardWidget> {
        self.widgets.get(&id)
    }

    pub fn remove(&mut self, id: WidgetId) -> Option<DashboardWidget> {
        let widget = self.widgets.remove(&id)?;
        self.order.retain(|other| *other != id);
        if self.drag_candidate.is_some_and(|(dragged, _)| dragged == id) {
            self.drag_candidate = None;
        }
        if self.resize_anchor.is_some_and(|(resized, ..)| resized == id) {
            self.resize_anchor = None;
        }
        Some(widget)
    }

    /// Widgets bottom to top.
    pub fn widgets(&self) -> impl Iterator<Item = &DashboardWidget> {
        self.order.iter().filter_map(|id| self.widgets.get(id))
    }

    /// Move a widget. A column that would push it past the right edge is
    /// pulled left until it fits.
    pub fn move_to(&mut self, id: WidgetId, position: GridPosition) -> LayoutResult<()> {
        let columns = self.grid.columns;
        let widget = self
            .widgets
            .get_mut(&id)
            .ok_or(LayoutError::UnknownWidget(id))?;

        let layout = WidgetLayout::new(
            fit_position(position, widget.layout.size.cols, columns),
            widget.layout.size,
        );
        check_bounds(&layout, columns)?;
        log::debug!("Moved {id} to {:?}", layout.position);
        widget.layout = layout;
        Ok(())
    }

    /// Resize a widget, shifting its column left when it would no longer fit.
    pub fn resize(&mut self, id: WidgetId, size: GridSize) -> LayoutResult<()> {
        let position = self.get(id).ok_or(LayoutError::UnknownWidget(id))?.layout.position;
        self.place(id, position, size)
    }

    /// Resize a widget dragged by a `direction` handle from its `start`
    /// layout.
    ///
    /// The edge opposite the handle stays put: west handles keep the last
    /// column fixed and north handles keep the last row fixed. A span that
    /// would cross the first column or row is pinned there instead.
    pub fn resize_from(
        &mut self,
        id: WidgetId,
        start: WidgetLayout,
        direction: ResizeDirection,
        size: GridSize,
    ) -> LayoutResult<()> {
        let mut position = start.position;
        if direction.horizontal_sign() < 0.0 {
            position.col = leading_edge(start.last_col(), size.cols);
        }
        if direction.vertical_sign() < 0.0 {
            position.row = leading_edge(start.last_row(), size.rows);
        }
        self.place(id, position, size)
    }

    /// Candidate cell of the drag in progress, for drop previews.
    pub fn drag_candidate(&self, id: WidgetId) -> Option<GridPosition> {
        self.drag_candidate
            .and_then(|(dragged, candidate)| (dragged == id).then_some(candidate))
    }

    /// On-screen rectangle of a widget.
    pub fn widget_rect(&self, id: WidgetId, frame: &GridFrame) -> Option<Rect> {
        let WidgetLayout { position, size } = self.widgets.get(&id)?.layout;
        Some(frame.cell_rect(position.col, position.row, size.cols, size.rows))
    }

    /// Topmost widget whose rectangle contains `point`.
    pub fn widget_at(&self, point: Point, frame: &GridFrame) -> Option<WidgetId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| self.widget_rect(*id, frame).is_some_and(|r| r.contains(point)))
    }

    /// Gesture controllers for a widget, seeded with its current layout.
    pub fn interaction(
        &self,
        id: WidgetId,
        config: &DashboardConfig,
        container: Rc<dyn GridContainer>,
    ) -> LayoutResult<WidgetInteraction> {
        let widget = self.get(id).ok_or(LayoutError::UnknownWidget(id))?;
        let config = DashboardConfig {
            grid: self.grid,
            ..*config
        };
        Ok(WidgetInteraction::new(
            widget.layout,
            widget.constraints,
            config,
            container,
        ))
    }

    /// Handler committing gesture results for `id` into this dashboard.
    pub fn commit(&mut self, id: WidgetId) -> CommitOnRelease<'_> {
        CommitOnRelease {
            dashboard: self,
            id,
        }
    }

    fn place(&mut self, id: WidgetId, position: GridPosition, size: GridSize) -> LayoutResult<()> {
        let columns = self.grid.columns;
        let widget = self
            .widgets
            .get_mut(&id)
            .ok_or(LayoutError::UnknownWidget(id))?;

        check_constraints(size, &widget.constraints)?;
        let layout = WidgetLayout::new(fit_position(position, size.cols, columns), size);
        check_bounds(&layout, columns)?;
        log::debug!("Resized {id} to {}x{} at {:?}", size.cols, size.rows, layout.position);
        widget.layout = layout;
        Ok(())
    }

    fn check(&self, layout: &WidgetLayout, constraints: &Constraints) -> LayoutResult<()> {
        check_constraints(layout.size, constraints)?;
        check_bounds(layout, self.grid.columns)
    }
}

/// Pull `position` left so a span of `cols` ends at or before `columns`.
fn fit_position(position: GridPosition, cols: u32, columns: u32) -> GridPosition {
    let last_start = columns.saturating_sub(cols).saturating_add(1).max(1);
    GridPosition::new(position.col.clamp(1, last_start), position.row.max(1))
}

/// First cell of a span of `span` cells ending at `last`, at least 1.
fn leading_edge(last: u32, span: u32) -> u32 {
    last.saturating_add(1).saturating_sub(span).max(1)
}

fn check_bounds(layout: &WidgetLayout, columns: u32) -> LayoutResult<()> {
    if layout.fits(columns) {
        Ok(())
    } else {
        Err(LayoutError::OutOfBounds {
            col: layout.position.col,
            cols: layout.size.cols,
            columns,
        })
    }
}

fn check_constraints(size: GridSize, constraints: &Constraints) -> LayoutResult<()> {
    if constraints.contains(size) {
        Ok(())
    } else {
        Err(LayoutError::ConstraintViolation {
            cols: size.cols,
            rows: size.rows,
            min: constraints.min_size,
            max: constraints.max_size,
        })
    }
}

/// Gesture handler that writes results into a [`Dashboard`].
///
/// Drag candidates are remembered on the dashboard and committed on release;
/// resize sizes are committed as they arrive, anchored at the edge opposite
/// the handle. Rejected proposals are logged and leave the layout unchanged.
pub struct CommitOnRelease<'a> {
    dashboard: &'a mut Dashboard,
    id: WidgetId,
}

impl CommitOnRelease<'_> {
    /// Current layout of the target widget.
    pub fn layout(&self) -> Option<WidgetLayout> {
        self.dashboard.get(self.id).map(|w| w.layout)
    }
}

impl DragHandler for CommitOnRelease<'_> {
    fn on_drag_start(&mut self, _origin: GridPosition) {
        self.dashboard.drag_candidate = None;
    }

    fn on_drag(&mut self, candidate: GridPosition) {
        self.dashboard.drag_candidate = Some((self.id, candidate));
    }

    fn on_drag_end(&mut self, _origin: GridPosition) {
        let Some((id, candidate)) = self.dashboard.drag_candidate.take() else {
            return;
        };
        if id != self.id {
            return;
        }
        if let Err(err) = self.dashboard.move_to(id, candidate) {
            log::warn!("Drop rejected: {err}");
        }
    }
}

impl ResizeHandler for CommitOnRelease<'_> {
    fn on_resize_start(&mut self, direction: ResizeDirection, _size: GridSize) {
        self.dashboard.resize_anchor = self.layout().map(|start| (self.id, direction, start));
    }

    fn on_resize(&mut self, size: GridSize) {
        let result = match self.dashboard.resize_anchor {
            Some((id, direction, start)) if id == self.id => {
                self.dashboard.resize_from(id, start, direction, size)
            }
            _ => self.dashboard.resize(self.id, size),
        };
        if let Err(err) = result {
            log::warn!("Resize rejected: {err}");
        }
    }

    fn on_resize_end(&mut self, _size: GridSize) {
        if self.dashboard.resize_anchor.is_some_and(|(id, ..)| id == self.id) {
            self.dashboard.resize_anchor = None;
        }
    }
}
