//! Super-ellipse rectangles with independent corner radii
//!
//! Each rounded corner is drawn with three cubic segments whose control
//! points come from a fixed coefficient table scaled by the corner radius.
//! A corner occupies [`ELLIPSE_COEFFICIENT`] × radius along both of its
//! edges, so radii are clamped per edge before drawing.

use contour_core::diagnostics::{self, Diagnostic};
use contour_core::{Corner, CornerRadius, CornerSet, Path, Rect, Size};

use crate::corner::{corner_point, rect_corner, CornerScale, DRAW_ORDER};
use crate::path::PathBuilder;
use crate::shape::ShapePath;

/// Edge extent of a corner, in radii
pub const ELLIPSE_COEFFICIENT: f32 = 1.28195;

/// Control-point coefficients, in radii
pub const COEFFICIENTS: [f32; 11] = [
    0.04641, 0.08715, 0.13357, 0.16296, 0.21505, 0.29086, 0.32461, 0.37801, 0.44576, 0.6074,
    0.77037,
];

const CLAMP_EPSILON: f32 = 1e-4;

/// One corner in corner-local coordinates: the start point followed by
/// three `(control1, control2, end)` triples.
fn corner_table() -> [(f32, f32); 10] {
    let c = COEFFICIENTS;
    let e = ELLIPSE_COEFFICIENT;

    let p1 = (e, 0.0);
    let p2 = (p1.0 - c[10], p1.1 + c[2]);
    let p3 = (p2.0 - c[7], p2.1 + c[7]);
    let p4 = (p3.0 - c[2], p3.1 + c[10]);

    [
        p1,
        (p1.0 - c[8], p1.1),
        (p1.0 - c[9], p1.1 + c[0]),
        p2,
        (p2.0 - c[3], p2.1 + c[1]),
        (p2.0 - c[5], p2.1 + c[4]),
        p3,
        (p3.0 - c[1], p3.1 + c[3]),
        (p3.0 - c[2], p3.1 + c[6]),
        p4,
    ]
}

/// Scale `radii` down so that no two corners overlap along any edge
///
/// Each edge compares the extents of its two corners against its length;
/// a corner keeps the tighter of its two edge constraints. Infinite radii
/// are treated as `f32::MAX` and negative or NaN radii as zero, so the
/// result is always finite.
pub fn clamp_radii(rect: Rect, radii: CornerRadius) -> CornerRadius {
    let e = ELLIPSE_COEFFICIENT as f64;
    let extent = |r: f32| f64::from(r.max(0.0).min(f32::MAX)) * e;
    let [tl, tr, br, bl] = radii.to_array().map(extent);
    let (w, h) = (
        f64::from(rect.width().max(0.0)),
        f64::from(rect.height().max(0.0)),
    );
    let eps = f64::from(CLAMP_EPSILON);

    let top = (w / (tl + tr + eps)).min(1.0);
    let right = (h / (tr + br + eps)).min(1.0);
    let bottom = (w / (br + bl + eps)).min(1.0);
    let left = (h / (bl + tl + eps)).min(1.0);

    let clamp = |extent: f64, a: f64, b: f64| (extent * a.min(b) / e) as f32;

    CornerRadius::new(
        clamp(tl, top, left),
        clamp(tr, top, right),
        clamp(br, bottom, right),
        clamp(bl, bottom, left),
    )
}

/// Closed super-ellipse path of `rect` with per-corner `radii`
///
/// Radii are clamped with [`clamp_radii`] first. Zero-radius corners are
/// drawn as the plain rectangle corner.
pub fn super_ellipse_path(rect: Rect, radii: CornerRadius) -> Path {
    if !diagnostics::check_area("super ellipse", rect) {
        return Path::rect(rect);
    }

    let radii = clamp_radii(rect, radii);
    let table = corner_table();

    let start = match radii.top_left {
        r if r > 0.0 => corner_point(rect, Corner::TopLeft, table[9], CornerScale::uniform(r)),
        _ => rect_corner(rect, Corner::TopLeft),
    };

    let mut builder = PathBuilder::new().move_to(start);
    for corner in DRAW_ORDER {
        let radius = radii.get(corner);
        if radius <= 0.0 {
            builder = builder.line_to(rect_corner(rect, corner));
            continue;
        }

        let at = |i: usize| corner_point(rect, corner, table[i], CornerScale::uniform(radius));
        builder = builder.line_to(at(0));
        for i in [1, 4, 7] {
            builder = builder.curve_to(at(i + 2), at(i), at(i + 1));
        }
    }

    builder.close().build()
}

/// A rectangle with independently sized super-ellipse corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SuperEllipse {
    pub radii: CornerRadius,
}

impl SuperEllipse {
    pub fn new(radii: impl Into<CornerRadius>) -> Self {
        Self {
            radii: radii.into(),
        }
    }

    /// Set the radius of every corner in `corners` from a corner size
    ///
    /// Only circular corner sizes are supported; an elliptical size is
    /// reported and leaves the shape unchanged.
    pub fn with_corner_size(mut self, corners: CornerSet, size: Size) -> Self {
        if size.width != size.height {
            diagnostics::report(Diagnostic::UnsupportedCornerAspect { size });
            return self;
        }

        let radius = size.width.max(0.0);
        for corner in Corner::CLOCKWISE {
            if !corners.contains(corner.flag()) {
                continue;
            }
            match corner {
                Corner::TopLeft => self.radii.top_left = radius,
                Corner::TopRight => self.radii.top_right = radius,
                Corner::BottomRight => self.radii.bottom_right = radius,
                Corner::BottomLeft => self.radii.bottom_left = radius,
            }
        }
        self
    }
}

impl ShapePath for SuperEllipse {
    fn name(&self) -> &'static str {
        "super ellipse"
    }

    fn path(&self, rect: Rect) -> Path {
        super_ellipse_path(rect, self.radii)
    }

    fn offset_path(&self, rect: Rect, offset: f32) -> Option<Path> {
        let radii = self
            .radii
            .map(|r| if r > 0.0 { (r + offset).max(0.0) } else { 0.0 });
        Some(super_ellipse_path(rect.expand(offset), radii))
    }
}
