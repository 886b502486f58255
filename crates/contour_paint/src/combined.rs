//! Boolean shape combinators

use contour_core::{CombineMode, Path, Rect};

use crate::shape::{Shape, ShapePath};

/// Two shapes combined with a boolean operation
///
/// The produced path is the main shape's outline carrying the sub shape's
/// outline as a deferred operand; rasterizers apply the operation. Combined
/// shapes cannot be offset.
#[derive(Clone, Debug, PartialEq)]
pub struct CombinedShape {
    pub main: Box<Shape>,
    pub sub: Box<Shape>,
    pub mode: CombineMode,
}

impl CombinedShape {
    pub fn new(main: impl Into<Shape>, sub: impl Into<Shape>, mode: CombineMode) -> Self {
        Self {
            main: Box::new(main.into()),
            sub: Box::new(sub.into()),
            mode,
        }
    }
}

impl ShapePath for CombinedShape {
    fn name(&self) -> &'static str {
        "combined shape"
    }

    fn path(&self, rect: Rect) -> Path {
        self.main.path(rect).combine(self.sub.path(rect), self.mode)
    }
}

impl Shape {
    /// Area covered by either shape
    pub fn union(self, other: impl Into<Shape>) -> Shape {
        CombinedShape::new(self, other, CombineMode::Union).into()
    }

    /// Area covered by both shapes
    pub fn intersection(self, other: impl Into<Shape>) -> Shape {
        CombinedShape::new(self, other, CombineMode::Intersection).into()
    }

    /// Area of this shape not covered by `other`
    pub fn subtracting(self, other: impl Into<Shape>) -> Shape {
        CombinedShape::new(self, other, CombineMode::Difference).into()
    }

    /// Area covered by exactly one of the shapes
    pub fn symmetric_difference(self, other: impl Into<Shape>) -> Shape {
        CombinedShape::new(self, other, CombineMode::Xor).into()
    }
}
