//! Dashboard view: lays widgets out in an egui rect and routes pointer
//! input to the widget under the pointer.

use std::collections::HashMap;
use std::rc::Rc;

use egui::{Align2, CornerRadius, FontId, Sense, Stroke, StrokeKind, Ui};
use gridboard_core::{
    Dashboard, DashboardConfig, Feedback, GestureKind, GridContainer, GridFrame, Instant,
    PointerEvent, WidgetId, WidgetInteraction,
};

use crate::convert::{to_egui_rect, to_point};
use crate::handles::{cursor_icon, paint_handles};
use crate::indicator::{IndicatorStyle, paint_feedback};
use crate::input::{EguiContainer, pointer_events};
use crate::{sizing, theme};

/// Interactive view over a [`Dashboard`].
///
/// Holds gesture state between frames; the dashboard itself stays with the
/// caller.
pub struct DashboardView {
    config: DashboardConfig,
    container: Rc<EguiContainer>,
    interactions: HashMap<WidgetId, WidgetInteraction>,
    /// Widget owning the pointer until its gesture ends.
    active: Option<WidgetId>,
    selected: Option<WidgetId>,
    style: IndicatorStyle,
}

impl DashboardView {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            container: Rc::new(EguiContainer::new()),
            interactions: HashMap::new(),
            active: None,
            selected: None,
            style: IndicatorStyle::default(),
        }
    }

    pub fn with_style(mut self, style: IndicatorStyle) -> Self {
        self.style = style;
        self
    }

    pub fn container(&self) -> &EguiContainer {
        &self.container
    }

    pub fn selected(&self) -> Option<WidgetId> {
        self.selected
    }

    /// Whether a drag or resize is in progress.
    pub fn gesture_active(&self) -> bool {
        self.active
            .and_then(|id| self.interactions.get(&id))
            .is_some_and(WidgetInteraction::gesture_active)
    }

    /// Show the dashboard in all available space.
    pub fn show(&mut self, ui: &mut Ui, dashboard: &mut Dashboard) -> egui::Response {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, Sense::hover());
        self.container.set(rect);

        let now = Instant::now();
        let events = ui.input(|i| pointer_events(&i.events));
        for event in &events {
            self.handle_pointer(dashboard, event, now);
        }
        self.poll(dashboard, now);

        self.paint(ui, dashboard);
        self.update_cursor(ui, response.hover_pos());
        self.schedule_repaint(ui.ctx(), now);
        response
    }

    /// Route one pointer event. Returns true if a widget consumed it.
    pub fn handle_pointer(
        &mut self,
        dashboard: &mut Dashboard,
        event: &PointerEvent,
        now: Instant,
    ) -> bool {
        self.sync(dashboard);

        if let PointerEvent::Down { position, .. } = *event {
            if !self.gesture_active() {
                self.active = self.widget_accepting(dashboard, position);
                self.select(self.active);
            }
        }

        let Some(id) = self.active else {
            return false;
        };
        let Some(interaction) = self.interactions.get_mut(&id) else {
            self.active = None;
            return false;
        };

        let consumed = interaction.handle_event(event, now, &mut dashboard.commit(id));
        if !interaction.gesture_active() {
            if let Some(widget) = dashboard.get(id) {
                interaction.set_layout(widget.layout);
            }
            self.active = None;
        }
        consumed
    }

    /// Fire due hold and throttle timers.
    pub fn poll(&mut self, dashboard: &mut Dashboard, now: Instant) {
        let Some(id) = self.active else {
            return;
        };
        if let Some(interaction) = self.interactions.get_mut(&id) {
            interaction.poll(now, &mut dashboard.commit(id));
            interaction.animation_frame();
        }
    }

    /// Keep one interaction per widget, following the committed layout.
    fn sync(&mut self, dashboard: &Dashboard) {
        self.interactions
            .retain(|id, _| dashboard.get(*id).is_some());
        if self.selected.is_some_and(|id| dashboard.get(id).is_none()) {
            self.selected = None;
        }

        for widget in dashboard.widgets() {
            if let Some(interaction) = self.interactions.get_mut(&widget.id) {
                if !interaction.gesture_active() {
                    interaction.set_layout(widget.layout);
                }
                continue;
            }
            let container: Rc<dyn GridContainer> = self.container.clone();
            match dashboard.interaction(widget.id, &self.config, container) {
                Ok(mut interaction) => {
                    interaction.set_resizable(self.selected == Some(widget.id));
                    self.interactions.insert(widget.id, interaction);
                }
                Err(err) => log::warn!("Skipping widget {}: {err}", widget.id),
            }
        }
    }

    fn select(&mut self, id: Option<WidgetId>) {
        // Tapping empty space keeps the current selection.
        if id.is_none() {
            return;
        }
        self.selected = id;
        for (widget, interaction) in &mut self.interactions {
            interaction.set_resizable(Some(*widget) == id);
        }
    }

    /// Topmost widget that would start a gesture at `point`.
    fn widget_accepting(&self, dashboard: &Dashboard, point: kurbo::Point) -> Option<WidgetId> {
        // The selected widget's handles stick out past its rect.
        if let Some(id) = self.selected {
            if self.interactions.get(&id).is_some_and(|i| i.accepts(point)) {
                return Some(id);
            }
        }
        let ids: Vec<WidgetId> = dashboard.widgets().map(|w| w.id).collect();
        ids.into_iter()
            .rev()
            .find(|id| self.interactions.get(id).is_some_and(|i| i.accepts(point)))
    }

    fn paint(&self, ui: &Ui, dashboard: &Dashboard) {
        let painter = ui.painter();
        let Some(frame) = GridFrame::measure(self.container.as_ref(), &self.config.grid) else {
            return;
        };
        let radius = CornerRadius::same(sizing::CORNER_RADIUS);

        for widget in dashboard.widgets() {
            let Some(rect) = dashboard.widget_rect(widget.id, &frame) else {
                continue;
            };
            let rect = to_egui_rect(rect).shrink(sizing::CELL_GAP);
            painter.rect_filled(rect, radius, theme::WIDGET_BG);
            painter.rect_stroke(rect, radius, Stroke::new(1.0, theme::BORDER), StrokeKind::Inside);
            painter.text(
                rect.left_top() + egui::vec2(8.0, 6.0),
                Align2::LEFT_TOP,
                format!("{:?}", widget.kind),
                FontId::proportional(12.0),
                theme::TEXT_MUTED,
            );
        }

        if let Some(id) = self.selected {
            if let (Some(widget), Some(rect)) = (dashboard.get(id), dashboard.widget_rect(id, &frame)) {
                paint_handles(painter, to_egui_rect(rect), &widget.constraints);
            }
        }

        if let Some(interaction) = self.active.and_then(|id| self.interactions.get(&id)) {
            paint_feedback(painter, &interaction.feedback(), self.style);
        }
    }

    fn update_cursor(&self, ui: &Ui, hover: Option<egui::Pos2>) {
        let Some(interaction) = self
            .active
            .or(self.selected)
            .and_then(|id| self.interactions.get(&id))
        else {
            return;
        };
        if let Some(cursor) = hover.and_then(|pos| interaction.cursor(to_point(pos))) {
            ui.ctx().set_cursor_icon(cursor_icon(cursor));
        } else if interaction.active_gesture() == Some(GestureKind::Drag) {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let Some(interaction) = self.active.and_then(|id| self.interactions.get(&id)) else {
            return;
        };
        if interaction.feedback() != Feedback::Inactive {
            ctx.request_repaint();
        } else if let Some(deadline) = interaction.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

impl std::fmt::Debug for DashboardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardView")
            .field("active", &self.active)
            .field("selected", &self.selected)
            .field("widgets", &self.interactions.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridboard_core::{GestureConfig, GridConfig, GridPosition, GridSize, WidgetKind};
    use kurbo::Point;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup() -> (DashboardView, Dashboard) {
        let config = DashboardConfig {
            grid: GridConfig::new(4, 0.5),
            gestures: GestureConfig {
                smooth_factor: 1.0,
                ..Default::default()
            },
        };
        let view = DashboardView::new(config);
        // 200px cells, 100px rows.
        view.container()
            .set(egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0)));
        (view, Dashboard::new(config.grid))
    }

    #[test]
    fn test_press_selects_topmost_and_drag_commits() {
        let _ = env_logger::builder().is_test(true).try_init();
        let t0 = Instant::now();
        let (mut view, mut board) = setup();
        let below = board.add(WidgetKind::Table, GridPosition::new(1, 1)).unwrap();
        let above = board.add(WidgetKind::Stat, GridPosition::new(2, 2)).unwrap();

        assert!(view.handle_pointer(&mut board, &PointerEvent::down(Point::new(250.0, 150.0)), t0));
        assert_eq!(view.selected(), Some(above));
        assert!(view.gesture_active());

        view.poll(&mut board, t0 + ms(200));
        view.handle_pointer(&mut board, &PointerEvent::moved(Point::new(450.0, 150.0)), t0 + ms(220));
        view.handle_pointer(&mut board, &PointerEvent::up(Point::new(450.0, 150.0)), t0 + ms(240));

        assert!(!view.gesture_active());
        assert_eq!(board.get(above).unwrap().layout.position, GridPosition::new(3, 2));
        assert_eq!(board.get(below).unwrap().layout.position, GridPosition::new(1, 1));
    }

    #[test]
    fn test_selected_widget_resizes_from_handle() {
        let t0 = Instant::now();
        let (mut view, mut board) = setup();
        let id = board.add(WidgetKind::Chart, GridPosition::new(1, 1)).unwrap();

        // Tap selects without dragging.
        view.handle_pointer(&mut board, &PointerEvent::down(Point::new(100.0, 50.0)), t0);
        view.handle_pointer(&mut board, &PointerEvent::up(Point::new(100.0, 50.0)), t0 + ms(50));
        assert_eq!(view.selected(), Some(id));
        assert!(!view.gesture_active());

        // East handle sits on the right edge.
        view.handle_pointer(&mut board, &PointerEvent::down(Point::new(200.0, 50.0)), t0 + ms(100));
        view.handle_pointer(&mut board, &PointerEvent::moved(Point::new(600.0, 50.0)), t0 + ms(160));
        view.handle_pointer(&mut board, &PointerEvent::up(Point::new(600.0, 50.0)), t0 + ms(170));

        assert_eq!(board.get(id).unwrap().layout.size, GridSize::new(3, 1));
    }

    #[test]
    fn test_press_on_empty_space_is_ignored() {
        let t0 = Instant::now();
        let (mut view, mut board) = setup();
        board.add(WidgetKind::Gauge, GridPosition::new(1, 1)).unwrap();

        assert!(!view.handle_pointer(&mut board, &PointerEvent::down(Point::new(700.0, 500.0)), t0));
        assert!(view.selected().is_none());
    }

    #[test]
    fn test_removed_widget_is_forgotten() {
        let t0 = Instant::now();
        let (mut view, mut board) = setup();
        let id = board.add(WidgetKind::Gauge, GridPosition::new(1, 1)).unwrap();
        view.handle_pointer(&mut board, &PointerEvent::down(Point::new(50.0, 50.0)), t0);
        view.handle_pointer(&mut board, &PointerEvent::Cancel, t0 + ms(10));

        board.remove(id);
        view.handle_pointer(&mut board, &PointerEvent::moved(Point::new(60.0, 60.0)), t0 + ms(20));
        assert!(view.selected().is_none());
    }
}
