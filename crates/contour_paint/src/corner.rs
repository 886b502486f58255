//! Corner-local coordinates shared by the corner generators
//!
//! Corner tables are written for a path travelling clockwise. Each entry is
//! an `(along, across)` pair: `along` is the distance back from the corner
//! along the edge the path arrives on, `across` is the distance away from
//! that edge towards the next one.

use contour_core::{Corner, Point, Rect};

/// Per-axis scale applied to corner-local coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CornerScale {
    pub x: f32,
    pub y: f32,
}

impl CornerScale {
    pub fn uniform(radius: f32) -> Self {
        Self {
            x: radius,
            y: radius,
        }
    }
}

/// Map a corner-local `(along, across)` coordinate into `rect`
pub(crate) fn corner_point(
    rect: Rect,
    corner: Corner,
    (along, across): (f32, f32),
    scale: CornerScale,
) -> Point {
    match corner {
        // Arriving on the top edge, heading right
        Corner::TopRight => Point::new(
            rect.max_x() - along * scale.x,
            rect.min_y() + across * scale.y,
        ),
        // Arriving on the right edge, heading down
        Corner::BottomRight => Point::new(
            rect.max_x() - across * scale.x,
            rect.max_y() - along * scale.y,
        ),
        // Arriving on the bottom edge, heading left
        Corner::BottomLeft => Point::new(
            rect.min_x() + along * scale.x,
            rect.max_y() - across * scale.y,
        ),
        // Arriving on the left edge, heading up
        Corner::TopLeft => Point::new(
            rect.min_x() + across * scale.x,
            rect.min_y() + along * scale.y,
        ),
    }
}

/// The rectangle's own vertex at `corner`
pub(crate) fn rect_corner(rect: Rect, corner: Corner) -> Point {
    match corner {
        Corner::TopLeft => Point::new(rect.min_x(), rect.min_y()),
        Corner::TopRight => Point::new(rect.max_x(), rect.min_y()),
        Corner::BottomRight => Point::new(rect.max_x(), rect.max_y()),
        Corner::BottomLeft => Point::new(rect.min_x(), rect.max_y()),
    }
}

/// Clockwise drawing order, starting after the top-left corner
pub(crate) const DRAW_ORDER: [Corner; 4] = [
    Corner::TopRight,
    Corner::BottomRight,
    Corner::BottomLeft,
    Corner::TopLeft,
];
