//! Border content rendering
//!
//! Content fills the whole extent; the ring mask is applied afterwards.

use std::fmt;
use std::sync::Arc;

use contour_core::diagnostics::{self, Diagnostic};
use contour_core::{Color, Gradient, GradientKind, Point, RasterOrigin};
use tiny_skia::{
    FilterQuality, LinearGradient, Paint, Pixmap, PixmapPaint, PremultipliedColorU8,
    RadialGradient, Shader, SpreadMode, Transform,
};

use crate::error::RasterError;
use crate::image::{Extent, RasterImage};

/// Produces an image for a requested pixel extent
///
/// Images are returned top row first regardless of the configured origin.
pub type ImageProvider = Arc<dyn Fn(Extent) -> RasterImage + Send + Sync>;

/// What a border is painted with
#[derive(Clone)]
pub enum BorderContent {
    Color(Color),
    Gradient(Gradient),
    Image(ImageProvider),
}

impl BorderContent {
    /// Image content from a provider closure
    pub fn image(provider: impl Fn(Extent) -> RasterImage + Send + Sync + 'static) -> Self {
        BorderContent::Image(Arc::new(provider))
    }
}

impl fmt::Debug for BorderContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BorderContent::Color(color) => f.debug_tuple("Color").field(color).finish(),
            BorderContent::Gradient(gradient) => f.debug_tuple("Gradient").field(gradient).finish(),
            BorderContent::Image(_) => f.debug_tuple("Image").field(&"<provider>").finish(),
        }
    }
}

impl From<Color> for BorderContent {
    fn from(color: Color) -> Self {
        BorderContent::Color(color)
    }
}

impl From<Gradient> for BorderContent {
    fn from(gradient: Gradient) -> Self {
        BorderContent::Gradient(gradient)
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let c = color.clamped();
    tiny_skia::Color::from_rgba(c.r, c.g, c.b, c.a).unwrap_or(tiny_skia::Color::TRANSPARENT)
}

fn premultiplied(color: Color) -> PremultipliedColorU8 {
    let [r, g, b, a] = color.to_premultiplied_rgba8();
    PremultipliedColorU8::from_rgba(r, g, b, a).unwrap_or(PremultipliedColorU8::TRANSPARENT)
}

/// Maps unit-space gradient points into pixel space
struct UnitSpace {
    width: f32,
    height: f32,
    flip: bool,
}

impl UnitSpace {
    fn new(extent: Extent, origin: RasterOrigin) -> Self {
        Self {
            width: extent.width as f32,
            height: extent.height as f32,
            flip: origin == RasterOrigin::BottomLeft,
        }
    }

    fn map(&self, p: Point) -> tiny_skia::Point {
        let y = if self.flip { 1.0 - p.y } else { p.y };
        tiny_skia::Point::from_xy(p.x * self.width, y * self.height)
    }
}

/// Render `content` over the full `extent`
pub(crate) fn render_content(
    content: &BorderContent,
    extent: Extent,
    origin: RasterOrigin,
) -> Result<Pixmap, RasterError> {
    let error = || RasterError::allocation("content pixmap", extent.width, extent.height);
    let size = extent.int_size().ok_or_else(error)?;
    let mut pixmap =
        Pixmap::from_vec(extent.try_alloc(4, "content pixmap")?, size).ok_or_else(error)?;

    match content {
        BorderContent::Color(color) => pixmap.fill(skia_color(*color)),
        BorderContent::Gradient(gradient) => {
            fill_gradient(&mut pixmap, gradient, UnitSpace::new(extent, origin))
        }
        BorderContent::Image(provider) => {
            draw_image(&mut pixmap, provider(extent), extent, origin)
        }
    }

    Ok(pixmap)
}

fn fill_gradient(pixmap: &mut Pixmap, gradient: &Gradient, space: UnitSpace) {
    let start = space.map(gradient.start);
    let end = space.map(gradient.end);

    let shader = match gradient.kind {
        GradientKind::Linear => LinearGradient::new(
            start,
            end,
            skia_stops(gradient),
            SpreadMode::Pad,
            Transform::identity(),
        ),
        GradientKind::Radial => {
            let radius = (end.x - start.x).hypot(end.y - start.y);
            RadialGradient::new(
                start,
                start,
                radius,
                skia_stops(gradient),
                SpreadMode::Pad,
                Transform::identity(),
            )
        }
        GradientKind::Angular => {
            fill_angular(pixmap, gradient, start, end);
            return;
        }
    };

    match shader {
        Some(shader) => fill_with_shader(pixmap, shader),
        // Degenerate geometry (coincident points, zero radius) paints the first stop
        None => pixmap.fill(skia_color(gradient.first_color())),
    }
}

fn skia_stops(gradient: &Gradient) -> Vec<tiny_skia::GradientStop> {
    gradient
        .stops()
        .iter()
        .map(|stop| tiny_skia::GradientStop::new(stop.offset, skia_color(stop.color)))
        .collect()
}

fn fill_with_shader(pixmap: &mut Pixmap, shader: Shader) {
    let Some(rect) =
        tiny_skia::Rect::from_xywh(0.0, 0.0, pixmap.width() as f32, pixmap.height() as f32)
    else {
        return;
    };

    let paint = Paint {
        shader,
        anti_alias: false,
        ..Paint::default()
    };
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

/// Sweep clockwise around `center`, starting in the direction of `toward`
fn fill_angular(
    pixmap: &mut Pixmap,
    gradient: &Gradient,
    center: tiny_skia::Point,
    toward: tiny_skia::Point,
) {
    use std::f32::consts::TAU;

    let width = pixmap.width() as usize;
    let base = (toward.y - center.y).atan2(toward.x - center.x);

    for (i, pixel) in pixmap.pixels_mut().iter_mut().enumerate() {
        let x = (i % width) as f32 + 0.5;
        let y = (i / width) as f32 + 0.5;
        let angle = (y - center.y).atan2(x - center.x) - base;
        let t = angle.rem_euclid(TAU) / TAU;
        *pixel = premultiplied(gradient.color_at(t));
    }
}

/// Reverse the row order of `pixmap` in place
fn flip_rows(pixmap: &mut Pixmap) {
    let stride = pixmap.width() as usize * 4;
    let height = pixmap.height() as usize;
    let data = pixmap.data_mut();
    for y in 0..height / 2 {
        let (top, bottom) = data.split_at_mut((height - 1 - y) * stride);
        top[y * stride..(y + 1) * stride].swap_with_slice(&mut bottom[..stride]);
    }
}

/// Draw a provided image, resampling it if its extent does not match
///
/// Provided images are top row first; with a bottom-left origin they are
/// flipped to match the rest of the output.
fn draw_image(pixmap: &mut Pixmap, image: RasterImage, extent: Extent, origin: RasterOrigin) {
    let actual = image.extent();
    let source = image.into_pixmap().map(|mut source| {
        if origin == RasterOrigin::BottomLeft {
            flip_rows(&mut source);
        }
        source
    });

    if actual == extent {
        if let Some(source) = source {
            *pixmap = source;
        }
        return;
    }

    diagnostics::report(Diagnostic::ImageExtentMismatch {
        expected: (extent.width, extent.height),
        actual: (actual.width, actual.height),
    });

    let Some(source) = source else {
        return;
    };

    let transform = Transform::from_scale(
        extent.width as f32 / actual.width as f32,
        extent.height as f32 / actual.height as f32,
    );
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(content: &BorderContent, extent: Extent) -> RasterImage {
        RasterImage::from_pixmap(render_content(content, extent, RasterOrigin::TopLeft).unwrap())
    }

    #[test]
    fn test_color_fill() {
        let image = render(&Color::BLUE.into(), Extent::new(4, 4));
        assert!(image.data().chunks_exact(4).all(|p| p == [0, 0, 255, 255]));
    }

    #[test]
    fn test_linear_gradient_runs_start_to_end() {
        let image = render(
            &Gradient::horizontal(Color::BLACK, Color::WHITE).into(),
            Extent::new(64, 4),
        );

        let left = image.pixel(0, 2).unwrap();
        let right = image.pixel(63, 2).unwrap();
        assert!(left[0] < 16);
        assert!(right[0] > 240);
    }

    #[test]
    fn test_bottom_left_flips_gradient() {
        let content: BorderContent = Gradient::vertical(Color::BLACK, Color::WHITE).into();
        let image = RasterImage::from_pixmap(
            render_content(&content, Extent::new(4, 64), RasterOrigin::BottomLeft).unwrap(),
        );

        assert!(image.pixel(2, 0).unwrap()[0] > 240);
        assert!(image.pixel(2, 63).unwrap()[0] < 16);
    }

    #[test]
    fn test_radial_gradient_center_and_edge() {
        let gradient = Gradient::new(
            vec![
                contour_core::GradientStop::new(0.0, Color::WHITE),
                contour_core::GradientStop::new(1.0, Color::BLACK),
            ],
            Point::new(0.5, 0.5),
            Point::new(1.0, 0.5),
            GradientKind::Radial,
        );
        let image = render(&gradient.into(), Extent::new(64, 64));

        assert!(image.pixel(32, 32).unwrap()[0] > 240);
        assert!(image.pixel(0, 0).unwrap()[0] < 16);
    }

    #[test]
    fn test_angular_gradient_sweeps_clockwise() {
        let gradient = Gradient::new(
            vec![
                contour_core::GradientStop::new(0.0, Color::BLACK),
                contour_core::GradientStop::new(1.0, Color::WHITE),
            ],
            Point::new(0.5, 0.5),
            Point::new(1.0, 0.5),
            GradientKind::Angular,
        );
        let image = render(&gradient.into(), Extent::new(64, 64));

        // A quarter turn clockwise (y-down) is straight below the center
        let below = image.pixel(32, 60).unwrap()[0];
        let above = image.pixel(32, 4).unwrap()[0];
        assert!((56..72).contains(&below), "{below}");
        assert!((184..200).contains(&above), "{above}");
    }

    #[test]
    fn test_image_provider_receives_extent() {
        let content = BorderContent::image(|extent| RasterImage::filled(extent, Color::GREEN));
        let image = render(&content, Extent::new(8, 6));

        assert_eq!(image.dimensions(), (8, 6));
        assert_eq!(image.pixel(7, 5), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_mismatched_image_is_resampled() {
        let content = BorderContent::image(|_| RasterImage::filled(Extent::new(2, 2), Color::RED));

        let (image, diagnostics) = diagnostics::capture(|| render(&content, Extent::new(8, 8)));
        assert_eq!(image.dimensions(), (8, 8));
        let [r, g, _, a] = image.pixel(4, 4).unwrap();
        assert!(r > 250 && g < 4 && a > 250);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::ImageExtentMismatch {
                expected: (8, 8),
                actual: (2, 2)
            }]
        );
    }

    fn split_image(extent: Extent) -> RasterImage {
        let half = extent.height / 2;
        let pixels = (0..extent.height)
            .flat_map(|y| {
                let pixel = if y < half { [255, 0, 0, 255] } else { [0, 0, 255, 255] };
                std::iter::repeat(pixel).take(extent.width as usize)
            })
            .flatten()
            .collect();
        RasterImage::from_premultiplied(extent.width, extent.height, pixels).unwrap()
    }

    #[test]
    fn test_bottom_left_flips_provided_image() {
        let content = BorderContent::image(split_image);
        let extent = Extent::new(4, 6);

        let top_left = render(&content, extent);
        assert_eq!(top_left.pixel(1, 0), Some([255, 0, 0, 255]));
        assert_eq!(top_left.pixel(1, 5), Some([0, 0, 255, 255]));

        let bottom_left = RasterImage::from_pixmap(
            render_content(&content, extent, RasterOrigin::BottomLeft).unwrap(),
        );
        assert_eq!(bottom_left.pixel(1, 0), Some([0, 0, 255, 255]));
        assert_eq!(bottom_left.pixel(1, 5), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_bottom_left_flips_resampled_image() {
        let content = BorderContent::image(|_| split_image(Extent::new(2, 2)));

        let (image, _) = diagnostics::capture(|| {
            render_content(&content, Extent::new(8, 8), RasterOrigin::BottomLeft).unwrap()
        });
        let image = RasterImage::from_pixmap(image);
        let [r, _, b, _] = image.pixel(4, 0).unwrap();
        assert!(b > 200 && r < 56);
        let [r, _, b, _] = image.pixel(4, 7).unwrap();
        assert!(r > 200 && b < 56);
    }

    #[test]
    fn test_debug_hides_provider() {
        let content = BorderContent::image(RasterImage::white);
        assert_eq!(format!("{content:?}"), "Image(\"<provider>\")");
    }
}
