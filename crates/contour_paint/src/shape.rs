//! Shapes
//!
//! A [`Shape`] turns a bounding rectangle into a closed [`Path`]. Every
//! variant implements [`ShapePath`]; most of them can also produce an
//! *offset* outline, grown (positive) or shrunk (negative) by a distance
//! along their normals, which borders use to place strokes.

use contour_core::diagnostics::{self, Diagnostic};
use contour_core::{CornerCurve, CornerRadius, CornerSet, Path, Rect};

use crate::combined::CombinedShape;
use crate::continuous::{circular_rounded_rect, continuous_rounded_rect};
use crate::path::PathBuilder;
use crate::super_ellipse::SuperEllipse;

/// Path generation capability shared by all shapes
pub trait ShapePath {
    /// Human-readable name used in diagnostics
    fn name(&self) -> &'static str;

    /// Outline of the shape fitted to `rect`
    fn path(&self, rect: Rect) -> Path;

    /// Outline grown by `offset`, or `None` if the shape cannot be offset
    fn offset_path(&self, rect: Rect, offset: f32) -> Option<Path> {
        let _ = (rect, offset);
        None
    }
}

/// Rectangle with optionally rounded corners
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub corner_radius: f32,
    pub corners: CornerSet,
    pub curve: CornerCurve,
}

impl Rectangle {
    /// Continuous corners of `corner_radius` on every corner
    pub fn new(corner_radius: f32) -> Self {
        Self {
            corner_radius: corner_radius.max(0.0),
            corners: CornerSet::all(),
            curve: CornerCurve::Continuous,
        }
    }

    pub fn sharp() -> Self {
        Self::new(0.0)
    }

    pub fn with_corners(mut self, corners: CornerSet) -> Self {
        self.corners = corners;
        self
    }

    pub fn with_curve(mut self, curve: CornerCurve) -> Self {
        self.curve = curve;
        self
    }

    fn rounded_path(&self, rect: Rect, radius: f32) -> Path {
        match self.curve {
            CornerCurve::Continuous => continuous_rounded_rect(rect, radius, self.corners),
            CornerCurve::Circular => circular_rounded_rect(rect, radius, self.corners),
        }
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::sharp()
    }
}

impl ShapePath for Rectangle {
    fn name(&self) -> &'static str {
        "rectangle"
    }

    fn path(&self, rect: Rect) -> Path {
        self.rounded_path(rect, self.corner_radius)
    }

    fn offset_path(&self, rect: Rect, offset: f32) -> Option<Path> {
        let radius = if self.corner_radius > 0.0 {
            (self.corner_radius + offset).max(0.0)
        } else {
            0.0
        };
        Some(self.rounded_path(rect.expand(offset), radius))
    }
}

/// How a capsule closes its short ends
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CapsuleStyle {
    /// Continuous corners of half the shorter side
    #[default]
    Continuous,
    /// Semicircular ends
    Circular,
}

/// Rectangle whose shorter sides are fully rounded
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Capsule {
    pub style: CapsuleStyle,
}

impl Capsule {
    pub fn new(style: CapsuleStyle) -> Self {
        Self { style }
    }

    /// Two semicircles joined by straight edges along the longer axis
    fn circular_path(rect: Rect) -> Path {
        let (min_x, min_y, max_x, max_y) = (rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y());
        let center = rect.center();
        let p = contour_core::Point::new;

        if rect.width() > rect.height() {
            let r = rect.height() / 2.0;
            PathBuilder::new()
                .move_to(p(min_x + r, min_y))
                .line_to(p(max_x - r, min_y))
                .quarter_arc_to(p(max_x, min_y), p(max_x, center.y))
                .quarter_arc_to(p(max_x, max_y), p(max_x - r, max_y))
                .line_to(p(min_x + r, max_y))
                .quarter_arc_to(p(min_x, max_y), p(min_x, center.y))
                .quarter_arc_to(p(min_x, min_y), p(min_x + r, min_y))
                .close()
                .build()
        } else {
            let r = rect.width() / 2.0;
            PathBuilder::new()
                .move_to(p(min_x, min_y + r))
                .quarter_arc_to(p(min_x, min_y), p(center.x, min_y))
                .quarter_arc_to(p(max_x, min_y), p(max_x, min_y + r))
                .line_to(p(max_x, max_y - r))
                .quarter_arc_to(p(max_x, max_y), p(center.x, max_y))
                .quarter_arc_to(p(min_x, max_y), p(min_x, max_y - r))
                .line_to(p(min_x, min_y + r))
                .close()
                .build()
        }
    }
}

impl ShapePath for Capsule {
    fn name(&self) -> &'static str {
        "capsule"
    }

    fn path(&self, rect: Rect) -> Path {
        if !diagnostics::check_area("capsule", rect) {
            return Path::rect(rect);
        }

        if rect.width() == rect.height() {
            return Path::ellipse(rect);
        }

        match self.style {
            CapsuleStyle::Continuous => {
                let radius = rect.width().min(rect.height()) / 2.0;
                continuous_rounded_rect(rect, radius, CornerSet::all())
            }
            CapsuleStyle::Circular => Self::circular_path(rect),
        }
    }

    fn offset_path(&self, rect: Rect, offset: f32) -> Option<Path> {
        Some(self.path(rect.expand(offset)))
    }
}

/// Circle centered in the rectangle, with the shorter side as diameter
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circle;

impl ShapePath for Circle {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn path(&self, rect: Rect) -> Path {
        if !diagnostics::check_area("circle", rect) {
            return Path::rect(rect);
        }
        Path::circle(rect.center(), rect.width().min(rect.height()) / 2.0)
    }

    fn offset_path(&self, rect: Rect, offset: f32) -> Option<Path> {
        Some(self.path(rect.expand(offset)))
    }
}

/// Ellipse inscribed in the rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ellipse;

impl ShapePath for Ellipse {
    fn name(&self) -> &'static str {
        "ellipse"
    }

    fn path(&self, rect: Rect) -> Path {
        if !diagnostics::check_area("ellipse", rect) {
            return Path::rect(rect);
        }
        Path::ellipse(rect)
    }

    fn offset_path(&self, rect: Rect, offset: f32) -> Option<Path> {
        Some(self.path(rect.expand(offset)))
    }
}

/// Any shape a border can be drawn around
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    Capsule(Capsule),
    Circle(Circle),
    Ellipse(Ellipse),
    SuperEllipse(SuperEllipse),
    Combined(CombinedShape),
}

impl Shape {
    /// Rectangle with continuous corners
    pub fn rectangle(corner_radius: f32) -> Self {
        Shape::Rectangle(Rectangle::new(corner_radius))
    }

    pub fn capsule() -> Self {
        Shape::Capsule(Capsule::default())
    }

    pub fn circle() -> Self {
        Shape::Circle(Circle)
    }

    pub fn ellipse() -> Self {
        Shape::Ellipse(Ellipse)
    }

    pub fn super_ellipse(radii: impl Into<CornerRadius>) -> Self {
        Shape::SuperEllipse(SuperEllipse::new(radii))
    }

    fn as_shape_path(&self) -> &dyn ShapePath {
        match self {
            Shape::Rectangle(shape) => shape,
            Shape::Capsule(shape) => shape,
            Shape::Circle(shape) => shape,
            Shape::Ellipse(shape) => shape,
            Shape::SuperEllipse(shape) => shape,
            Shape::Combined(shape) => shape,
        }
    }

    /// Whether [`ShapePath::offset_path`] produces an outline
    pub fn supports_offset(&self) -> bool {
        !matches!(self, Shape::Combined(_))
    }

    /// Outline grown by `offset`
    ///
    /// A zero offset is exactly [`ShapePath::path`]. Shapes that cannot be
    /// offset report [`Diagnostic::UnsupportedOffset`] and ignore the offset.
    pub fn path_with_offset(&self, rect: Rect, offset: f32) -> Path {
        if offset == 0.0 {
            return self.path(rect);
        }

        match self.offset_path(rect, offset) {
            Some(path) => path,
            None => {
                diagnostics::report(Diagnostic::UnsupportedOffset {
                    shape: self.name(),
                    offset,
                });
                self.path(rect)
            }
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Rectangle(Rectangle::default())
    }
}

impl ShapePath for Shape {
    fn name(&self) -> &'static str {
        self.as_shape_path().name()
    }

    fn path(&self, rect: Rect) -> Path {
        self.as_shape_path().path(rect)
    }

    fn offset_path(&self, rect: Rect, offset: f32) -> Option<Path> {
        self.as_shape_path().offset_path(rect, offset)
    }
}

impl From<Rectangle> for Shape {
    fn from(shape: Rectangle) -> Self {
        Shape::Rectangle(shape)
    }
}

impl From<Capsule> for Shape {
    fn from(shape: Capsule) -> Self {
        Shape::Capsule(shape)
    }
}

impl From<Circle> for Shape {
    fn from(shape: Circle) -> Self {
        Shape::Circle(shape)
    }
}

impl From<Ellipse> for Shape {
    fn from(shape: Ellipse) -> Self {
        Shape::Ellipse(shape)
    }
}

impl From<SuperEllipse> for Shape {
    fn from(shape: SuperEllipse) -> Self {
        Shape::SuperEllipse(shape)
    }
}

impl From<CombinedShape> for Shape {
    fn from(shape: CombinedShape) -> Self {
        Shape::Combined(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_core::Point;

    fn offsettable_shapes() -> Vec<Shape> {
        vec![
            Shape::rectangle(12.0),
            Shape::Rectangle(Rectangle::new(12.0).with_curve(CornerCurve::Circular)),
            Shape::capsule(),
            Shape::Capsule(Capsule::new(CapsuleStyle::Circular)),
            Shape::circle(),
            Shape::ellipse(),
            Shape::super_ellipse(CornerRadius::new(4.0, 8.0, 12.0, 0.0)),
        ]
    }

    #[test]
    fn test_zero_radius_rectangle_is_rect() {
        let rect = Rect::new(10.0, 10.0, 80.0, 40.0);
        assert_eq!(Shape::rectangle(0.0).path(rect), Path::rect(rect));
        assert_eq!(Rectangle::sharp().path(rect), Path::rect(rect));
    }

    #[test]
    fn test_square_capsule_is_ellipse() {
        let rect = Rect::new(0.0, 0.0, 40.0, 40.0);
        assert_eq!(Shape::capsule().path(rect), Path::ellipse(rect));
        assert_eq!(
            Capsule::new(CapsuleStyle::Circular).path(rect),
            Path::ellipse(rect)
        );
    }

    #[test]
    fn test_zero_offset_is_identity() {
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
        for shape in offsettable_shapes() {
            assert_eq!(shape.path_with_offset(rect, 0.0), shape.path(rect));
            assert_eq!(shape.offset_path(rect, 0.0), Some(shape.path(rect)));
        }
    }

    #[test]
    fn test_paths_are_closed() {
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
        for shape in offsettable_shapes() {
            let path = shape.path(rect);
            assert!(path.is_closed(), "{} is not closed", shape.name());
            if !matches!(shape, Shape::Circle(_)) {
                assert!(path.bounds().approx_eq(&rect, 1e-3), "{}", shape.name());
            }
        }
    }

    #[test]
    fn test_circular_capsule_wide_and_tall() {
        let wide = Rect::new(0.0, 0.0, 100.0, 40.0);
        let path = Capsule::new(CapsuleStyle::Circular).path(wide);
        assert_eq!(path.line_count(), 2);
        assert_eq!(path.curve_count(), 4);
        assert!(path.is_closed());
        assert!(path.bounds().approx_eq(&wide, 1e-3));

        let tall = Rect::new(0.0, 0.0, 40.0, 100.0);
        let path = Capsule::new(CapsuleStyle::Circular).path(tall);
        assert_eq!(path.line_count(), 2);
        assert!(path.is_closed());
        assert!(path.bounds().approx_eq(&tall, 1e-3));
    }

    #[test]
    fn test_continuous_capsule_uses_half_short_side() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        assert_eq!(
            Shape::capsule().path(rect),
            continuous_rounded_rect(rect, 20.0, CornerSet::all())
        );
    }

    #[test]
    fn test_circle_uses_shorter_side() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let bounds = Shape::circle().path(rect).bounds();
        assert!(bounds.approx_eq(&Rect::new(30.0, 0.0, 40.0, 40.0), 1e-3));
    }

    #[test]
    fn test_rectangle_offset() {
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
        let shape = Rectangle::new(12.0);

        let grown = shape.offset_path(rect, 4.0).unwrap();
        assert_eq!(
            grown,
            continuous_rounded_rect(rect.expand(4.0), 16.0, CornerSet::all())
        );
        assert_eq!(grown.first_point().map(|p| p.y), Some(-4.0));

        // Sharp rectangles stay sharp when grown
        let sharp = Rectangle::sharp().offset_path(rect, 4.0).unwrap();
        assert_eq!(sharp, Path::rect(rect.expand(4.0)));
    }

    #[test]
    fn test_zero_area_reports_invalid_geometry() {
        let rect = Rect::new(0.0, 0.0, 50.0, 0.0);
        for shape in offsettable_shapes() {
            let (path, diagnostics) = diagnostics::capture(|| shape.path(rect));
            assert_eq!(path, Path::rect(rect));
            assert!(matches!(
                diagnostics.as_slice(),
                [Diagnostic::InvalidGeometry { .. }]
            ));
        }
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(Shape::circle().name(), "circle");
        assert_eq!(Shape::super_ellipse(4.0).name(), "super ellipse");
        assert!(Shape::capsule().supports_offset());
    }

    #[test]
    fn test_start_point_of_circular_rectangle() {
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
        let shape = Rectangle::new(10.0).with_curve(CornerCurve::Circular);
        assert_eq!(shape.path(rect).first_point(), Some(Point::new(10.0, 0.0)));
    }
}
