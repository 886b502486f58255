//! Raster image data

use contour_core::{Color, Size};
use tiny_skia::{IntSize, Pixmap};

use crate::error::RasterError;

/// Pixel dimensions of a raster
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel extent of `size` points at `scale` pixels per point
    pub fn from_size(size: Size, scale: f32) -> Self {
        let to_px = |v: f32| {
            let px = (v * scale).round();
            if px.is_finite() && px > 0.0 {
                px as u32
            } else {
                0
            }
        };
        Self::new(to_px(size.width), to_px(size.height))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of pixels, without overflow on any platform
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub(crate) fn int_size(&self) -> Option<IntSize> {
        IntSize::from_wh(self.width, self.height)
    }

    /// Zeroed buffer of `bytes_per_pixel` bytes per pixel
    ///
    /// Fails instead of aborting when the buffer cannot be allocated.
    pub(crate) fn try_alloc(
        &self,
        bytes_per_pixel: usize,
        what: &'static str,
    ) -> Result<Vec<u8>, RasterError> {
        let error = || RasterError::allocation(what, self.width, self.height);
        let len = self.area().checked_mul(bytes_per_pixel).ok_or_else(error)?;

        let mut buffer = Vec::new();
        buffer.try_reserve_exact(len).map_err(|_| error())?;
        buffer.resize(len, 0);
        Ok(buffer)
    }
}

/// Rasterized border image
///
/// Pixels are RGBA8 with premultiplied alpha, rows top to bottom unless the
/// rasterizer was configured with a bottom-left origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterImage {
    /// Wrap premultiplied RGBA8 pixel data
    ///
    /// Returns `None` if `pixels` does not hold exactly `width × height` pixels.
    pub fn from_premultiplied(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = Extent::new(width, height).area().checked_mul(4)?;
        (pixels.len() == expected).then_some(Self {
            pixels,
            width,
            height,
        })
    }

    /// An image filled with a single color
    pub fn filled(extent: Extent, color: Color) -> Self {
        let pixel = color.to_premultiplied_rgba8();
        Self {
            pixels: pixel.repeat(extent.area()),
            width: extent.width,
            height: extent.height,
        }
    }

    /// Opaque white, the pipeline's failure image
    pub fn white(extent: Extent) -> Self {
        Self::filled(extent, Color::WHITE)
    }

    pub fn transparent(extent: Extent) -> Self {
        Self::filled(extent, Color::TRANSPARENT)
    }

    /// A 0 × 0 image, returned when no image of the requested extent can be
    /// allocated
    pub fn empty() -> Self {
        Self::transparent(Extent::default())
    }

    pub(crate) fn from_pixmap(pixmap: Pixmap) -> Self {
        let (width, height) = (pixmap.width(), pixmap.height());
        Self {
            pixels: pixmap.take(),
            width,
            height,
        }
    }

    pub(crate) fn into_pixmap(self) -> Option<Pixmap> {
        let size = self.extent().int_size()?;
        Pixmap::from_vec(self.pixels, size)
    }

    /// Get the pixel data as a slice
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// Get the dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    /// Premultiplied RGBA of the pixel at `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
        self.pixel(x, y).map(|p| p[3])
    }

    /// Convert to straight (non-premultiplied) alpha
    ///
    /// Raster output is premultiplied, but most texture upload paths expect
    /// straight alpha.
    pub fn to_straight_alpha(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.pixels.len());

        for chunk in self.pixels.chunks_exact(4) {
            let a = chunk[3] as u32;
            if a > 0 {
                // Unpremultiply: RGB = RGB_premul / A, rounded
                let channel = |c: u8| ((c as u32 * 255 + a / 2) / a).min(255) as u8;
                result.extend_from_slice(&[
                    channel(chunk[0]),
                    channel(chunk[1]),
                    channel(chunk[2]),
                    chunk[3],
                ]);
            } else {
                result.extend_from_slice(&[0, 0, 0, 0]);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_rounds_scaled_size() {
        assert_eq!(
            Extent::from_size(Size::new(50.2, 30.0), 2.0),
            Extent::new(100, 60)
        );
        assert_eq!(Extent::from_size(Size::new(10.0, 10.0), 0.0), Extent::new(0, 0));
        assert!(Extent::from_size(Size::new(-4.0, 10.0), 1.0).is_empty());
    }

    #[test]
    fn test_from_premultiplied_checks_length() {
        assert!(RasterImage::from_premultiplied(2, 2, vec![0; 16]).is_some());
        assert!(RasterImage::from_premultiplied(2, 2, vec![0; 12]).is_none());
    }

    #[test]
    fn test_straight_alpha() {
        let half_red = RasterImage::filled(Extent::new(1, 1), Color::rgba(1.0, 0.0, 0.0, 0.5));
        assert_eq!(half_red.pixel(0, 0), Some([128, 0, 0, 128]));
        assert_eq!(half_red.to_straight_alpha(), vec![255, 0, 0, 128]);

        let clear = RasterImage::transparent(Extent::new(1, 1));
        assert_eq!(clear.to_straight_alpha(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_try_alloc() {
        let buffer = Extent::new(3, 2).try_alloc(4, "test buffer").unwrap();
        assert_eq!(buffer.len(), 24);
        assert!(buffer.iter().all(|&b| b == 0));

        assert!(Extent::new(u32::MAX, u32::MAX)
            .try_alloc(4, "test buffer")
            .is_err());
    }

    #[test]
    fn test_pixel_bounds() {
        let image = RasterImage::white(Extent::new(3, 2));
        assert_eq!(image.pixel(2, 1), Some([255, 255, 255, 255]));
        assert_eq!(image.pixel(3, 0), None);
        assert_eq!(image.dimensions(), (3, 2));
    }
}
