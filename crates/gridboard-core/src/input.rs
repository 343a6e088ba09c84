//! Unified pointer events for mouse, pen and single-finger touch input.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer button identifiers. Touch contacts report as `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// A pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: PointerButton,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        button: PointerButton,
    },
    /// The pointer left the window or the platform aborted the contact.
    Cancel,
}

impl PointerEvent {
    /// Primary-button press at `position`.
    pub fn down(position: Point) -> Self {
        Self::Down {
            position,
            button: PointerButton::Primary,
        }
    }

    pub fn moved(position: Point) -> Self {
        Self::Move { position }
    }

    /// Primary-button release at `position`.
    pub fn up(position: Point) -> Self {
        Self::Up {
            position,
            button: PointerButton::Primary,
        }
    }

    /// Viewport position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::Down { position, .. } | Self::Move { position } | Self::Up { position, .. } => {
                Some(position)
            }
            Self::Cancel => None,
        }
    }

    /// Whether this event can start or end a gesture.
    pub fn is_primary(&self) -> bool {
        match self {
            Self::Down { button, .. } | Self::Up { button, .. } => *button == PointerButton::Primary,
            Self::Move { .. } | Self::Cancel => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(PointerEvent::down(p).position(), Some(p));
        assert_eq!(PointerEvent::moved(p).position(), Some(p));
        assert_eq!(PointerEvent::up(p).position(), Some(p));
        assert_eq!(PointerEvent::Cancel.position(), None);
    }

    #[test]
    fn test_secondary_button_is_not_primary() {
        let event = PointerEvent::Down {
            position: Point::ZERO,
            button: PointerButton::Secondary,
        };
        assert!(!event.is_primary());
        assert!(PointerEvent::down(Point::ZERO).is_primary());
    }

    #[test]
    fn test_trace_deserializes() {
        let json = r#"[
            { "Down": { "position": { "x": 1.0, "y": 2.0 }, "button": "Primary" } },
            { "Move": { "position": { "x": 5.0, "y": 2.0 } } },
            "Cancel"
        ]"#;
        let events: Vec<PointerEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], PointerEvent::moved(Point::new(5.0, 2.0)));
        assert_eq!(events[2], PointerEvent::Cancel);
    }
}
