//! Gradient fills
//!
//! Gradients are described in unit space: `start`/`end` are fractions of the
//! filled extent, `(0, 0)` is the top-left corner and `(1, 1)` the bottom-right.

use crate::{Color, Point};

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f32,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    /// Create a new gradient stop
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// How stop positions map onto the filled extent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientKind {
    /// Along the line from `start` to `end`
    #[default]
    Linear,
    /// Outward from `start`; the distance to `end` is the radius
    Radial,
    /// Clockwise around `start`, beginning in the direction of `end`
    Angular,
}

/// A multi-stop gradient
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    /// Color stops, sorted by offset
    pub stops: Vec<GradientStop>,
    pub start: Point,
    pub end: Point,
    pub kind: GradientKind,
}

impl Gradient {
    /// Create a gradient from explicit stops
    pub fn new(mut stops: Vec<GradientStop>, start: Point, end: Point, kind: GradientKind) -> Self {
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self {
            stops,
            start,
            end,
            kind,
        }
    }

    /// Create a gradient from parallel color/location lists
    ///
    /// An empty `locations` list spaces the colors evenly. Extra entries on
    /// either side are ignored.
    pub fn from_colors(
        colors: &[Color],
        locations: &[f32],
        start: Point,
        end: Point,
        kind: GradientKind,
    ) -> Self {
        let stops = if locations.is_empty() {
            let last = colors.len().saturating_sub(1).max(1) as f32;
            colors
                .iter()
                .enumerate()
                .map(|(i, color)| GradientStop::new(i as f32 / last, *color))
                .collect()
        } else {
            colors
                .iter()
                .zip(locations)
                .map(|(color, offset)| GradientStop::new(*offset, *color))
                .collect()
        };
        Self::new(stops, start, end, kind)
    }

    /// Top-to-bottom linear gradient between two colors
    pub fn vertical(from: Color, to: Color) -> Self {
        Self::new(
            vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
            Point::new(0.5, 0.0),
            Point::new(0.5, 1.0),
            GradientKind::Linear,
        )
    }

    /// Left-to-right linear gradient between two colors
    pub fn horizontal(from: Color, to: Color) -> Self {
        Self::new(
            vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
            Point::new(0.0, 0.5),
            Point::new(1.0, 0.5),
            GradientKind::Linear,
        )
    }

    /// Get the gradient stops
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Get the first color in the gradient (or BLACK if no stops)
    pub fn first_color(&self) -> Color {
        self.stops
            .first()
            .map(|s| s.color)
            .unwrap_or(Color::BLACK)
    }

    /// Get the last color in the gradient (or BLACK if no stops)
    pub fn last_color(&self) -> Color {
        self.stops.last().map(|s| s.color).unwrap_or(Color::BLACK)
    }

    /// Sample the color at gradient position `t`, padding beyond the end stops
    pub fn color_at(&self, t: f32) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::BLACK;
        };
        if t <= first.offset {
            return first.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return Color::lerp(&a.color, &b.color, (t - a.offset) / span);
            }
        }

        self.last_color()
    }
}
