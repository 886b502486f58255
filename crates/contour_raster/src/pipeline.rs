//! Border image pipeline
//!
//! A border image is produced in five steps:
//!
//! 1. Fill the shape outline into a coverage mask at the output scale
//! 2. Erode the mask by the stroke width
//! 3. Subtract the eroded mask from the original, leaving an inside ring
//! 4. Render the content over the full extent
//! 5. Keep the content only where the ring covers it
//!
//! None of the steps can fail from the caller's point of view: problems are
//! reported as diagnostics and a fallback is substituted. A shape mask that
//! cannot be allocated is replaced by full coverage. Images larger than
//! [`RasterConfig::max_pixels`], or whose content buffer cannot be allocated,
//! come back as [`RasterImage::empty`].

use contour_core::diagnostics::{self, Diagnostic};
use contour_core::{RasterConfig, Size, StrokePlacement};
use contour_paint::{Shape, ShapePath};

use crate::content::{render_content, BorderContent};
use crate::error::RasterError;
use crate::image::{Extent, RasterImage};
use crate::mask::{mul_coverage, raster_transform, rasterize_path, Coverage};
use crate::morphology::erode;

/// Renders border images with a fixed configuration
#[derive(Clone, Debug, Default)]
pub struct BorderRasterizer {
    config: RasterConfig,
}

impl BorderRasterizer {
    pub fn new(config: RasterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Render a border of `stroke_width` points drawn inside `shape`
    ///
    /// The image covers `size` at `scale` pixels per point; its extent is
    /// `(round(width × scale), round(height × scale))`.
    pub fn render(
        &self,
        stroke_width: f32,
        content: &BorderContent,
        shape: &Shape,
        size: Size,
        scale: f32,
    ) -> RasterImage {
        let extent = Extent::from_size(size, scale);
        if size.is_empty() || extent.is_empty() {
            diagnostics::report(Diagnostic::InvalidGeometry {
                context: "border image",
                rect: size.to_rect(),
            });
            return RasterImage::white(extent);
        }

        if extent.pixel_count() > self.config.max_pixels {
            diagnostics::report(Diagnostic::AllocationFailed {
                what: "border image",
                width: extent.width,
                height: extent.height,
            });
            return RasterImage::empty();
        }

        if self.config.placement != StrokePlacement::Inside {
            diagnostics::report(Diagnostic::UnsupportedPlacement {
                placement: self.config.placement.name(),
            });
        }

        let ring = match self.ring(shape, size, extent, stroke_width * scale, scale) {
            Ok(ring) => ring,
            Err(err) => {
                diagnostics::report(err.into());
                match Coverage::opaque(extent) {
                    Ok(ring) => ring,
                    Err(err) => {
                        diagnostics::report(err.into());
                        return RasterImage::empty();
                    }
                }
            }
        };

        let mut pixmap = match render_content(content, extent, self.config.origin) {
            Ok(pixmap) => pixmap,
            Err(err) => {
                diagnostics::report(err.into());
                return RasterImage::empty();
            }
        };

        match ring.into_mask() {
            Ok(mask) => pixmap.apply_mask(&mask),
            Err(err) => diagnostics::report(err.into()),
        }

        tracing::debug!(
            stroke_width,
            scale,
            "rendered {}x{} {} border",
            extent.width,
            extent.height,
            shape.name()
        );

        RasterImage::from_pixmap(pixmap)
    }

    /// Coverage of the inside ring of `shape`
    fn ring(
        &self,
        shape: &Shape,
        size: Size,
        extent: Extent,
        stroke_px: f32,
        scale: f32,
    ) -> Result<Coverage, RasterError> {
        if stroke_px.is_nan() || stroke_px <= 0.0 {
            return Ok(Coverage::empty(extent));
        }

        let path = shape.path(size.to_rect());
        let transform = raster_transform(scale, self.config.origin, extent);
        let mask = rasterize_path(&path, extent, transform, self.config.anti_alias)?;

        let eroded = erode(&mask, stroke_px);
        let data = mask
            .data
            .iter()
            .zip(&eroded.data)
            .map(|(&m, &e)| mul_coverage(m, 255 - e))
            .collect();

        Ok(Coverage { extent, data })
    }
}

/// Render a border image with the default configuration
///
/// See [`BorderRasterizer::render`].
pub fn make_border_image(
    stroke_width: f32,
    content: &BorderContent,
    shape: &Shape,
    size: Size,
    scale: f32,
) -> RasterImage {
    BorderRasterizer::default().render(stroke_width, content, shape, size, scale)
}
