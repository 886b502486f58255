//! Border content and mask descriptions

use contour_core::{Color, CornerCurve, Gradient};
use contour_paint::Shape;

use crate::layer::Layer;

/// What a border layer is painted with
#[derive(Clone, Debug, PartialEq)]
pub enum BorderContent {
    Color(Color),
    Gradient(Gradient),
    /// An externally owned layer, reparented under the content sublayer
    Layer(Layer),
}

impl BorderContent {
    pub fn kind(&self) -> &'static str {
        match self {
            BorderContent::Color(_) => "color",
            BorderContent::Gradient(_) => "gradient",
            BorderContent::Layer(_) => "layer",
        }
    }
}

impl Default for BorderContent {
    fn default() -> Self {
        BorderContent::Color(Color::BLACK)
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

impl From<Layer> for BorderContent {
    fn from(layer: Layer) -> Self {
        BorderContent::Layer(layer)
    }
}

/// Geometry of the ring a border occupies
///
/// A positive `offset` moves the ring outward past the layer bounds, a
/// negative one moves it inward.
#[derive(Clone, Debug, PartialEq)]
pub enum BorderMask {
    /// A rounded-rect ring the host can often draw natively
    CornerRadius {
        radius: f32,
        stroke_width: f32,
        curve: CornerCurve,
        offset: f32,
    },
    /// A ring following an arbitrary shape outline
    Shape {
        shape: Shape,
        stroke_width: f32,
        offset: f32,
    },
}

impl BorderMask {
    pub fn corner_radius(radius: f32, stroke_width: f32) -> Self {
        BorderMask::CornerRadius {
            radius,
            stroke_width,
            curve: CornerCurve::Continuous,
            offset: 0.0,
        }
    }

    pub fn shape(shape: impl Into<Shape>, stroke_width: f32) -> Self {
        BorderMask::Shape {
            shape: shape.into(),
            stroke_width,
            offset: 0.0,
        }
    }

    pub fn with_offset(mut self, value: f32) -> Self {
        match &mut self {
            BorderMask::CornerRadius { offset, .. } | BorderMask::Shape { offset, .. } => {
                *offset = value
            }
        }
        self
    }

    /// Set the corner curve; shape masks ignore it
    pub fn with_curve(mut self, value: CornerCurve) -> Self {
        if let BorderMask::CornerRadius { curve, .. } = &mut self {
            *curve = value;
        }
        self
    }

    pub fn stroke_width(&self) -> f32 {
        match self {
            BorderMask::CornerRadius { stroke_width, .. } | BorderMask::Shape { stroke_width, .. } => {
                *stroke_width
            }
        }
    }

    pub fn offset(&self) -> f32 {
        match self {
            BorderMask::CornerRadius { offset, .. } | BorderMask::Shape { offset, .. } => *offset,
        }
    }

    /// How far the content must extend past the layer bounds
    ///
    /// Shape masks never extend the content; only their paths move.
    pub fn bounds_extended_offset(&self) -> f32 {
        match self {
            BorderMask::CornerRadius { offset, .. } => offset.max(0.0),
            BorderMask::Shape { .. } => 0.0,
        }
    }
}

impl Default for BorderMask {
    fn default() -> Self {
        BorderMask::corner_radius(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_extended_offset() {
        assert_eq!(BorderMask::corner_radius(8.0, 2.0).bounds_extended_offset(), 0.0);
        assert_eq!(
            BorderMask::corner_radius(8.0, 2.0)
                .with_offset(6.0)
                .bounds_extended_offset(),
            6.0
        );
        assert_eq!(
            BorderMask::corner_radius(8.0, 2.0)
                .with_offset(-6.0)
                .bounds_extended_offset(),
            0.0
        );
        assert_eq!(
            BorderMask::shape(Shape::capsule(), 2.0)
                .with_offset(6.0)
                .bounds_extended_offset(),
            0.0
        );
    }

    #[test]
    fn test_accessors() {
        let mask = BorderMask::shape(Shape::circle(), 3.0).with_offset(-2.0);
        assert_eq!(mask.stroke_width(), 3.0);
        assert_eq!(mask.offset(), -2.0);
    }

    #[test]
    fn test_content_kinds() {
        assert_eq!(BorderContent::from(Color::RED).kind(), "color");
        assert_eq!(
            BorderContent::from(Gradient::vertical(Color::RED, Color::BLUE)).kind(),
            "gradient"
        );
        assert_eq!(
            BorderContent::from(Layer::new(contour_core::Rect::ZERO)).kind(),
            "layer"
        );
    }
}
