//! Contour border images
//!
//! CPU rasterization of borders drawn inside arbitrary shapes, using
//! tiny-skia for path filling, shading and compositing. The output is a
//! premultiplied RGBA8 image sized to the shape's bounds at a given scale,
//! suitable for texture upload.
//!
//! # Example
//!
//! ```rust
//! use contour_core::{Color, Size};
//! use contour_paint::Shape;
//! use contour_raster::make_border_image;
//!
//! let image = make_border_image(
//!     2.0,
//!     &Color::RED.into(),
//!     &Shape::rectangle(12.0),
//!     Size::new(100.0, 60.0),
//!     2.0,
//! );
//! assert_eq!(image.dimensions(), (200, 120));
//! ```

pub mod content;
pub mod error;
pub mod image;
pub mod mask;
pub mod morphology;
pub mod pipeline;

pub use content::{BorderContent, ImageProvider};
pub use error::RasterError;
pub use image::{Extent, RasterImage};
pub use mask::Coverage;
pub use pipeline::{make_border_image, BorderRasterizer};
