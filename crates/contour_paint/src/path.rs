//! Path building
//!
//! Core types are re-exported from contour_core for unified type system.
//! PathBuilder provides a point-based fluent API used by the corner generators.

// Re-export core types
pub use contour_core::{Path, PathCommand, Point};

/// Builder for constructing paths with fluent API
///
/// PathBuilder works in whole points rather than coordinate pairs and
/// maintains cursor state for the quarter-arc helpers.
pub struct PathBuilder {
    path: Path,
    current: Point,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            path: Path::new(),
            current: Point::ZERO,
        }
    }

    pub fn move_to(mut self, point: Point) -> Self {
        self.path = self.path.move_to(point.x, point.y);
        self.current = point;
        self
    }

    pub fn line_to(mut self, point: Point) -> Self {
        self.path = self.path.line_to(point.x, point.y);
        self.current = point;
        self
    }

    /// Cubic Bézier to `end` through `control1` and `control2`
    pub fn curve_to(mut self, end: Point, control1: Point, control2: Point) -> Self {
        self.path = self
            .path
            .cubic_to(control1.x, control1.y, control2.x, control2.y, end.x, end.y);
        self.current = end;
        self
    }

    /// Quarter circle/ellipse from the cursor to `end`
    ///
    /// `elbow` is the corner of the quarter's bounding box that the arc bends
    /// around, e.g. the rectangle corner for a rounded-rect corner.
    pub fn quarter_arc_to(self, elbow: Point, end: Point) -> Self {
        let start = self.current;
        let k = contour_core::KAPPA;
        let control1 = start + (elbow - start) * k;
        let control2 = end + (elbow - end) * k;
        self.curve_to(end, control1, control2)
    }

    pub fn close(mut self) -> Self {
        self.path = self.path.close();
        self
    }

    pub fn build(self) -> Path {
        self.path
    }

    /// Get the current cursor position
    pub fn current_position(&self) -> Point {
        self.current
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}
