//! Shape coverage masks
//!
//! Paths are filled into 8-bit coverage buffers with tiny-skia. Deferred
//! boolean operands carried by a path are filled into their own buffers and
//! folded into the base coverage pixel by pixel.

use contour_core::{CombineMode, Path, PathCommand, RasterOrigin};
use tiny_skia::{FillRule, Mask, Transform};

use crate::error::RasterError;
use crate::image::Extent;

/// 8-bit coverage, one byte per pixel, rows in raster order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coverage {
    pub extent: Extent,
    pub data: Vec<u8>,
}

impl Coverage {
    /// Fully covered; used when a mask cannot be rasterized
    pub fn opaque(extent: Extent) -> Result<Self, RasterError> {
        let mut data = extent.try_alloc(1, "fallback mask")?;
        data.fill(255);
        Ok(Self { extent, data })
    }

    pub fn empty(extent: Extent) -> Self {
        Self {
            extent,
            data: vec![0; extent.area()],
        }
    }

    /// Coverage of the pixel at `(x, y)`
    pub fn at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.extent.width || y >= self.extent.height {
            return None;
        }
        self.data
            .get(y as usize * self.extent.width as usize + x as usize)
            .copied()
    }

    /// Convert to a tiny-skia mask for compositing
    pub(crate) fn into_mask(self) -> Result<Mask, RasterError> {
        let Extent { width, height } = self.extent;
        self.extent
            .int_size()
            .and_then(|size| Mask::from_vec(self.data, size))
            .ok_or_else(|| RasterError::allocation("ring mask", width, height))
    }
}

/// Point-to-pixel transform for an extent
pub(crate) fn raster_transform(scale: f32, origin: RasterOrigin, extent: Extent) -> Transform {
    match origin {
        RasterOrigin::TopLeft => Transform::from_scale(scale, scale),
        RasterOrigin::BottomLeft => {
            Transform::from_scale(scale, -scale).post_translate(0.0, extent.height as f32)
        }
    }
}

/// Build a tiny-skia path from the base commands of `path`
fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo(p) => builder.move_to(p.x, p.y),
            PathCommand::LineTo(p) => builder.line_to(p.x, p.y),
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => builder.cubic_to(control1.x, control1.y, control2.x, control2.y, end.x, end.y),
            PathCommand::Close => builder.close(),
        }
    }
    builder.finish()
}

/// Fill `path` and all of its deferred operands into a coverage buffer
pub fn rasterize_path(
    path: &Path,
    extent: Extent,
    transform: Transform,
    anti_alias: bool,
) -> Result<Coverage, RasterError> {
    let error = || RasterError::allocation("shape mask", extent.width, extent.height);
    let size = extent.int_size().ok_or_else(error)?;
    let mut mask = Mask::from_vec(extent.try_alloc(1, "shape mask")?, size).ok_or_else(error)?;

    // Degenerate paths simply cover nothing
    if let Some(skia_path) = to_skia_path(path) {
        mask.fill_path(&skia_path, FillRule::Winding, anti_alias, transform);
    }

    let mut coverage = Coverage {
        extent,
        data: mask.data().to_vec(),
    };

    for operation in path.operations() {
        let operand = rasterize_path(&operation.path, extent, transform, anti_alias)?;
        combine_coverage(&mut coverage.data, &operand.data, operation.mode);
    }

    tracing::trace!(
        operations = path.operations().count(),
        "rasterized {}x{} coverage",
        extent.width,
        extent.height
    );

    Ok(coverage)
}

/// `a × b / 255`, rounded
pub(crate) fn mul_coverage(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16 + 127) / 255) as u8
}

/// Fold `src` into `dst` with a boolean operation on coverage values
pub fn combine_coverage(dst: &mut [u8], src: &[u8], mode: CombineMode) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = match mode {
            CombineMode::Union => (*d).max(s),
            CombineMode::Intersection => mul_coverage(*d, s),
            CombineMode::Difference => mul_coverage(*d, 255 - s),
            CombineMode::Xor => {
                let both = mul_coverage(*d, s) as u16;
                (*d as u16 + s as u16).saturating_sub(2 * both).min(255) as u8
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_core::{CornerSet, Rect};
    use contour_paint::{Rectangle, Shape, ShapePath};

    fn coverage_of(shape: &Shape, size: f32, origin: RasterOrigin) -> Coverage {
        let extent = Extent::new(size as u32, size as u32);
        let path = shape.path(Rect::new(0.0, 0.0, size, size));
        rasterize_path(&path, extent, raster_transform(1.0, origin, extent), true).unwrap()
    }

    #[test]
    fn test_rect_fills_extent() {
        let coverage = coverage_of(&Shape::rectangle(0.0), 8.0, RasterOrigin::TopLeft);
        assert!(coverage.data.iter().all(|&c| c > 250));
        assert_eq!(coverage.at(4, 4), Some(255));
        assert_eq!(coverage.at(8, 0), None);
    }

    #[test]
    fn test_combine_modes() {
        let mut union = vec![0, 255, 128, 0];
        combine_coverage(&mut union, &[255, 0, 64, 0], CombineMode::Union);
        assert_eq!(union, vec![255, 255, 128, 0]);

        let mut intersection = vec![255, 255, 0];
        combine_coverage(&mut intersection, &[255, 0, 255], CombineMode::Intersection);
        assert_eq!(intersection, vec![255, 0, 0]);

        let mut difference = vec![255, 255, 0];
        combine_coverage(&mut difference, &[255, 0, 255], CombineMode::Difference);
        assert_eq!(difference, vec![0, 255, 0]);

        let mut xor = vec![255, 255, 0, 0];
        combine_coverage(&mut xor, &[255, 0, 255, 0], CombineMode::Xor);
        assert_eq!(xor, vec![0, 255, 255, 0]);
    }

    #[test]
    fn test_difference_operand_cuts_hole() {
        let shape = Shape::rectangle(0.0).subtracting(Shape::circle());
        let coverage = coverage_of(&shape, 20.0, RasterOrigin::TopLeft);

        assert_eq!(coverage.at(10, 10), Some(0));
        assert!(coverage.at(0, 0).unwrap() > 250);
    }

    #[test]
    fn test_bottom_left_origin_flips_rows() {
        let shape: Shape = Rectangle::new(8.0).with_corners(CornerSet::TOP).into();

        let top_left = coverage_of(&shape, 20.0, RasterOrigin::TopLeft);
        assert!(top_left.at(0, 0).unwrap() < 128);
        assert!(top_left.at(0, 19).unwrap() > 250);

        let bottom_left = coverage_of(&shape, 20.0, RasterOrigin::BottomLeft);
        assert!(bottom_left.at(0, 0).unwrap() > 250);
        assert!(bottom_left.at(0, 19).unwrap() < 128);
    }

    #[test]
    fn test_into_mask_keeps_extent() {
        let mask = Coverage::opaque(Extent::new(4, 3)).unwrap().into_mask().unwrap();
        assert_eq!((mask.width(), mask.height()), (4, 3));
    }
}
