//! Conversions between kurbo (f64) and egui (f32) geometry.

use egui::{Pos2, Rect};

pub fn to_point(pos: Pos2) -> kurbo::Point {
    kurbo::Point::new(f64::from(pos.x), f64::from(pos.y))
}

pub fn to_pos2(point: kurbo::Point) -> Pos2 {
    Pos2::new(point.x as f32, point.y as f32)
}

pub fn to_kurbo_rect(rect: Rect) -> kurbo::Rect {
    kurbo::Rect::from_points(to_point(rect.min), to_point(rect.max))
}

pub fn to_egui_rect(rect: kurbo::Rect) -> Rect {
    Rect::from_min_max(
        to_pos2(kurbo::Point::new(rect.x0, rect.y0)),
        to_pos2(kurbo::Point::new(rect.x1, rect.y1)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_round_trip() {
        let rect = kurbo::Rect::new(12.0, 8.0, 212.5, 108.25);
        assert_eq!(to_kurbo_rect(to_egui_rect(rect)), rect);
    }
}
