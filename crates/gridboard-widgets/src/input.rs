//! egui input adapters: pointer event translation and container geometry.

use std::cell::Cell;

use gridboard_core::{GridContainer, PointerButton, PointerEvent};

use crate::convert::{to_kurbo_rect, to_point};

/// Map an egui pointer button. Extra buttons are not used by gestures.
pub fn translate_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        egui::PointerButton::Extra1 | egui::PointerButton::Extra2 => None,
    }
}

/// Translate one egui event into a gesture pointer event.
pub fn translate_event(event: &egui::Event) -> Option<PointerEvent> {
    match event {
        egui::Event::PointerMoved(pos) => Some(PointerEvent::Move {
            position: to_point(*pos),
        }),
        egui::Event::PointerButton {
            pos,
            button,
            pressed,
            ..
        } => {
            let button = translate_button(*button)?;
            let position = to_point(*pos);
            Some(if *pressed {
                PointerEvent::Down { position, button }
            } else {
                PointerEvent::Up { position, button }
            })
        }
        // Pointer left the window: nothing will deliver the release.
        egui::Event::PointerGone => Some(PointerEvent::Cancel),
        _ => None,
    }
}

/// Translate a frame's worth of egui events, keeping order.
pub fn pointer_events(events: &[egui::Event]) -> Vec<PointerEvent> {
    events.iter().filter_map(translate_event).collect()
}

/// Grid container backed by the egui rect allocated this frame.
///
/// Set once per frame before routing events; controllers re-query it on
/// every tick, so a resized panel is picked up mid-gesture.
#[derive(Debug, Default)]
pub struct EguiContainer {
    rect: Cell<Option<egui::Rect>>,
}

impl EguiContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, rect: egui::Rect) {
        self.rect.set(Some(rect));
    }

    /// Forget the rect, e.g. when the view is hidden.
    pub fn clear(&self) {
        self.rect.set(None);
    }

    pub fn rect(&self) -> Option<egui::Rect> {
        self.rect.get()
    }
}

impl GridContainer for EguiContainer {
    fn bounds(&self) -> Option<kurbo::Rect> {
        self.rect.get().map(to_kurbo_rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, Pos2};
    use kurbo::Point;

    #[test]
    fn test_translate_press_and_release() {
        let press = egui::Event::PointerButton {
            pos: Pos2::new(10.0, 20.0),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(translate_event(&press), Some(PointerEvent::down(Point::new(10.0, 20.0))));

        let release = egui::Event::PointerButton {
            pos: Pos2::new(30.0, 40.0),
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(translate_event(&release), Some(PointerEvent::up(Point::new(30.0, 40.0))));
    }

    #[test]
    fn test_translate_filters_and_orders() {
        let events = vec![
            egui::Event::PointerMoved(Pos2::new(1.0, 2.0)),
            egui::Event::Text("x".into()),
            egui::Event::PointerButton {
                pos: Pos2::ZERO,
                button: egui::PointerButton::Extra1,
                pressed: true,
                modifiers: Modifiers::NONE,
            },
            egui::Event::PointerGone,
        ];
        assert_eq!(
            pointer_events(&events),
            vec![PointerEvent::moved(Point::new(1.0, 2.0)), PointerEvent::Cancel]
        );
    }

    #[test]
    fn test_container_bounds() {
        let container = EguiContainer::new();
        assert!(container.bounds().is_none());

        container.set(egui::Rect::from_min_size(Pos2::new(40.0, 10.0), egui::vec2(800.0, 600.0)));
        assert_eq!(container.bounds(), Some(kurbo::Rect::new(40.0, 10.0, 840.0, 610.0)));

        container.clear();
        assert!(container.rect().is_none());
    }
}
