//! Contour shapes
//!
//! Path generators for the outlines borders are drawn around. All core
//! types are unified with contour_core.
//!
//! # Features
//!
//! - Continuous ("squircle") rounded rectangles with per-corner selection
//! - Super-ellipse rectangles with independent corner radii
//! - Capsules, circles and ellipses
//! - Offset outlines for border placement
//! - Boolean combinations of shapes
//!
//! # Example
//!
//! ```rust
//! use contour_paint::{Shape, ShapePath};
//! use contour_core::Rect;
//!
//! let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
//! let path = Shape::rectangle(12.0).path(rect);
//! assert_eq!(path.curve_count(), 12);
//!
//! // Grow the outline by 4pt on every side
//! let outer = Shape::rectangle(12.0).path_with_offset(rect, 4.0);
//! assert!(outer.bounds().width() > path.bounds().width());
//! ```

pub mod combined;
pub mod continuous;
mod corner;
pub mod path;
pub mod shape;
pub mod super_ellipse;

pub use combined::CombinedShape;
pub use continuous::{
    circular_rounded_rect, continuous_rounded_rect, CornerRegime, SHAPE_BREAK_RATIO,
    SHAPE_CONSTANT,
};
pub use path::PathBuilder;
pub use shape::{Capsule, CapsuleStyle, Circle, Ellipse, Rectangle, Shape, ShapePath};
pub use super_ellipse::{clamp_radii, super_ellipse_path, SuperEllipse, ELLIPSE_COEFFICIENT};

// ─────────────────────────────────────────────────────────────────────────────
// Core type re-exports from contour_core (unified type system)
// ─────────────────────────────────────────────────────────────────────────────

pub use contour_core::{CombineMode, CornerCurve, CornerRadius, CornerSet, Path, Rect};
