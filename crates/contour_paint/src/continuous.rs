//! Continuous-corner rounded rectangles
//!
//! A continuous corner leaves the straight edge earlier than a circular arc
//! of the same radius and eases curvature in over three cubic segments, so
//! the outline has no visible "kink" where edge meets corner. Each corner
//! spans [`SHAPE_CONSTANT`] × radius along both of its edges.
//!
//! When the rectangle is too small for the requested radius the generator
//! shrinks the corner on the constrained axis only, see [`CornerRegime`].

use contour_core::diagnostics;
use contour_core::{Corner, CornerSet, Path, Rect, Size};

use crate::corner::{corner_point, rect_corner, CornerScale, DRAW_ORDER};
use crate::path::PathBuilder;

/// Distance, in radii, that a continuous corner extends along each edge
pub const SHAPE_CONSTANT: f32 = 1.528_664_83;

/// Minimum side length, in radii, for an unconstrained corner
pub const SHAPE_BREAK_RATIO: f32 = 3.057_329_9;

/// Where the straight edge hands over to the corner
const EDGE_END: (f32, f32) = (1.528_664_71, 0.0);

struct CornerCurveSegment {
    control1: (f32, f32),
    control2: (f32, f32),
    end: (f32, f32),
}

/// The three cubic segments of one corner in corner-local coordinates
const CORNER_SEGMENTS: [CornerCurveSegment; 3] = [
    CornerCurveSegment {
        control1: (1.088_493_23, 0.0),
        control2: (0.868_406_89, 0.0),
        end: (0.669_934_27, 0.065_496_00),
    },
    CornerCurveSegment {
        control1: (0.432_614_74, 0.149_601_68),
        control2: (0.149_601_04, 0.432_615_68),
        end: (0.065_495_69, 0.669_934_93),
    },
    CornerCurveSegment {
        control1: (0.0, 0.868_405_86),
        control2: (0.0, 1.088_492_55),
        end: (0.0, SHAPE_CONSTANT),
    },
];

/// How a requested radius fits into a rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerRegime {
    /// Both sides are long enough; corners use the requested radius
    Full,
    /// The height is too short: corners are squashed vertically
    ShortHeight,
    /// The width is too short: corners are squashed horizontally
    ShortWidth,
    /// Both sides are too short: corners shrink uniformly and meet
    Constrained,
}

/// Classify how `radius` fits into a rectangle of `size`
pub fn classify(size: Size, radius: f32) -> CornerRegime {
    let threshold = SHAPE_BREAK_RATIO * radius;
    match (size.width > threshold, size.height > threshold) {
        (true, true) => CornerRegime::Full,
        (true, false) => CornerRegime::ShortHeight,
        (false, true) => CornerRegime::ShortWidth,
        (false, false) => CornerRegime::Constrained,
    }
}

/// The largest radius whose corners still fit along the shorter side
pub fn radius_limit(size: Size) -> f32 {
    size.width.min(size.height) / 2.0 / SHAPE_CONSTANT
}

fn corner_scale(size: Size, radius: f32) -> CornerScale {
    let limit = radius_limit(size);
    match classify(size, radius) {
        CornerRegime::Full => CornerScale::uniform(radius),
        CornerRegime::ShortHeight => CornerScale {
            x: radius,
            y: limit,
        },
        CornerRegime::ShortWidth => CornerScale {
            x: limit,
            y: radius,
        },
        CornerRegime::Constrained => CornerScale::uniform(limit),
    }
}

/// Closed path of `rect` with continuous corners of `radius` on `corners`
///
/// Corners outside `corners` stay sharp. A zero radius yields exactly
/// [`Path::rect`]. The path starts where the top-left corner meets the top
/// edge and runs clockwise.
pub fn continuous_rounded_rect(rect: Rect, radius: f32, corners: CornerSet) -> Path {
    if !diagnostics::check_area("continuous rounded rect", rect) {
        return Path::rect(rect);
    }

    let radius = radius.max(0.0);
    if radius == 0.0 || corners.is_empty() {
        return Path::rect(rect);
    }

    let regime = classify(rect.size(), radius);
    let scale = corner_scale(rect.size(), radius);
    tracing::debug!(?regime, ?scale, "continuous corners for {:?}", rect);

    let start = if corners.contains(CornerSet::TOP_LEFT) {
        corner_point(rect, Corner::TopLeft, (0.0, SHAPE_CONSTANT), scale)
    } else {
        rect_corner(rect, Corner::TopLeft)
    };

    let mut builder = PathBuilder::new().move_to(start);
    for corner in DRAW_ORDER {
        if !corners.contains(corner.flag()) {
            builder = builder.line_to(rect_corner(rect, corner));
            continue;
        }

        let at = |local| corner_point(rect, corner, local, scale);
        builder = builder.line_to(at(EDGE_END));
        for segment in &CORNER_SEGMENTS {
            builder = builder.curve_to(at(segment.end), at(segment.control1), at(segment.control2));
        }
    }

    builder.close().build()
}

/// Closed path of `rect` with quarter-circle corners of `radius` on `corners`
///
/// The radius is clamped to half the shorter side.
pub fn circular_rounded_rect(rect: Rect, radius: f32, corners: CornerSet) -> Path {
    if !diagnostics::check_area("circular rounded rect", rect) {
        return Path::rect(rect);
    }

    let radius = radius
        .max(0.0)
        .min(rect.width().min(rect.height()) / 2.0);
    if radius == 0.0 || corners.is_empty() {
        return Path::rect(rect);
    }

    let scale = CornerScale::uniform(radius);
    let start = if corners.contains(CornerSet::TOP_LEFT) {
        corner_point(rect, Corner::TopLeft, (0.0, 1.0), scale)
    } else {
        rect_corner(rect, Corner::TopLeft)
    };

    let mut builder = PathBuilder::new().move_to(start);
    for corner in DRAW_ORDER {
        let vertex = rect_corner(rect, corner);
        if corners.contains(corner.flag()) {
            builder = builder
                .line_to(corner_point(rect, corner, (1.0, 0.0), scale))
                .quarter_arc_to(vertex, corner_point(rect, corner, (0.0, 1.0), scale));
        } else {
            builder = builder.line_to(vertex);
        }
    }

    builder.close().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_core::{Diagnostic, Point};

    fn assert_inside(path: &Path, rect: Rect) {
        let bounds = path.bounds();
        assert!(bounds.min_x() >= rect.min_x() - 1e-3, "{bounds:?} vs {rect:?}");
        assert!(bounds.min_y() >= rect.min_y() - 1e-3, "{bounds:?} vs {rect:?}");
        assert!(bounds.max_x() <= rect.max_x() + 1e-3, "{bounds:?} vs {rect:?}");
        assert!(bounds.max_y() <= rect.max_y() + 1e-3, "{bounds:?} vs {rect:?}");
    }

    #[test]
    fn test_full_regime_segment_counts() {
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
        let path = continuous_rounded_rect(rect, 12.0, CornerSet::all());

        assert_eq!(classify(rect.size(), 12.0), CornerRegime::Full);
        assert_eq!(path.line_count(), 4);
        assert_eq!(path.curve_count(), 12);
        assert!(path.is_closed());
        assert!(path.bounds().approx_eq(&rect, 1e-3));
    }

    #[test]
    fn test_corner_extent() {
        let rect = Rect::new(10.0, 20.0, 100.0, 60.0);
        let path = continuous_rounded_rect(rect, 12.0, CornerSet::all());
        let extent = SHAPE_CONSTANT * 12.0;

        assert!(path
            .first_point()
            .unwrap()
            .approx_eq(Point::new(10.0 + extent, 20.0), 1e-3));

        // The top-right corner ends on the right edge one extent down
        let vertices: Vec<Point> = path.vertices().collect();
        assert!(vertices[4].approx_eq(Point::new(110.0, 20.0 + extent), 1e-3));
    }

    #[test]
    fn test_zero_radius_is_rect() {
        let rect = Rect::new(5.0, 5.0, 80.0, 40.0);
        assert_eq!(
            continuous_rounded_rect(rect, 0.0, CornerSet::all()),
            Path::rect(rect)
        );
        assert_eq!(
            circular_rounded_rect(rect, 0.0, CornerSet::all()),
            Path::rect(rect)
        );
    }

    #[test]
    fn test_corner_subset() {
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
        let path = continuous_rounded_rect(rect, 12.0, CornerSet::TOP);

        assert_eq!(path.curve_count(), 6);
        assert_eq!(path.line_count(), 4);
        assert!(path.is_closed());

        let vertices: Vec<Point> = path.vertices().collect();
        assert!(vertices.contains(&Point::new(100.0, 60.0)));
        assert!(vertices.contains(&Point::new(0.0, 60.0)));
        assert!(!vertices.contains(&Point::new(100.0, 0.0)));
    }

    #[test]
    fn test_sharp_top_left_starts_at_origin() {
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
        let path = continuous_rounded_rect(rect, 12.0, CornerSet::BOTTOM_RIGHT);

        assert_eq!(path.first_point(), Some(Point::new(0.0, 0.0)));
        assert_eq!(path.curve_count(), 3);
        assert!(path.is_closed());
    }

    #[test]
    fn test_constrained_regimes_stay_inside() {
        let cases = [
            (Rect::new(0.0, 0.0, 100.0, 20.0), CornerRegime::ShortHeight),
            (Rect::new(0.0, 0.0, 20.0, 100.0), CornerRegime::ShortWidth),
            (Rect::new(0.0, 0.0, 20.0, 24.0), CornerRegime::Constrained),
        ];

        for (rect, regime) in cases {
            assert_eq!(classify(rect.size(), 12.0), regime);
            let path = continuous_rounded_rect(rect, 12.0, CornerSet::all());
            assert_eq!(path.curve_count(), 12);
            assert!(path.is_closed());
            assert_inside(&path, rect);
        }
    }

    #[test]
    fn test_short_height_keeps_horizontal_extent() {
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        let path = continuous_rounded_rect(rect, 12.0, CornerSet::all());

        // Horizontal extent follows the requested radius
        let start = path.first_point().unwrap();
        assert!((start.x - SHAPE_CONSTANT * 12.0).abs() < 1e-3);

        // Vertical extent is squashed to meet at mid-height
        let vertices: Vec<Point> = path.vertices().collect();
        assert!((vertices[4].y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_area_reports() {
        let rect = Rect::new(0.0, 0.0, 0.0, 40.0);
        let (path, diagnostics) =
            diagnostics::capture(|| continuous_rounded_rect(rect, 8.0, CornerSet::all()));

        assert_eq!(path, Path::rect(rect));
        assert!(matches!(
            diagnostics.as_slice(),
            [Diagnostic::InvalidGeometry { .. }]
        ));
    }

    #[test]
    fn test_circular_rounded_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let path = circular_rounded_rect(rect, 50.0, CornerSet::all());

        assert_eq!(path.line_count(), 4);
        assert_eq!(path.curve_count(), 4);
        assert!(path.is_closed());
        // Radius is clamped to half the height
        assert_eq!(path.first_point(), Some(Point::new(20.0, 0.0)));
        assert!(path.bounds().approx_eq(&rect, 1e-3));
    }
}
