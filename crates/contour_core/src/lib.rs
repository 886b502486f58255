//! Contour core types
//!
//! This crate provides the foundational primitives shared by the Contour crates:
//!
//! - **Geometry**: points, sizes and y-down rectangles
//! - **Paths**: move/line/cubic/close command lists with deferred boolean operands
//! - **Corners**: corner selection masks, per-corner radii and corner curve styles
//! - **Fills**: colors and unit-space gradients
//! - **Diagnostics**: the non-fatal reporting channel used instead of errors
//! - **Config**: serde/TOML configuration for rasterization and host capabilities
//!
//! # Example
//!
//! ```rust
//! use contour_core::{Path, Rect};
//!
//! let path = Path::rect(Rect::new(0.0, 0.0, 100.0, 60.0));
//! assert_eq!(path.line_count(), 4);
//! assert!(path.is_closed());
//! ```

pub mod color;
pub mod config;
pub mod corner;
pub mod diagnostics;
pub mod geometry;
pub mod gradient;
pub mod path;

pub use color::Color;
pub use config::{
    ConfigError, ContourConfig, HostConfig, RasterConfig, RasterOrigin, StrokePlacement,
};
pub use corner::{Corner, CornerCurve, CornerRadius, CornerSet};
pub use diagnostics::Diagnostic;
pub use geometry::{Point, Rect, Size, Vec2};
pub use gradient::{Gradient, GradientKind, GradientStop};
pub use path::{CombineMode, Path, PathCommand, PathOperation, KAPPA};
