//! Corner selection and per-corner radii

use bitflags::bitflags;

bitflags! {
    /// Set of rectangle corners a generator should round
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CornerSet: u8 {
        const TOP_LEFT = 1 << 0;
        const TOP_RIGHT = 1 << 1;
        const BOTTOM_LEFT = 1 << 2;
        const BOTTOM_RIGHT = 1 << 3;

        const TOP = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
        const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
        const LEFT = Self::TOP_LEFT.bits() | Self::BOTTOM_LEFT.bits();
        const RIGHT = Self::TOP_RIGHT.bits() | Self::BOTTOM_RIGHT.bits();
    }
}

impl Default for CornerSet {
    fn default() -> Self {
        Self::all()
    }
}

/// A single rectangle corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Clockwise order starting from the top-left corner
    pub const CLOCKWISE: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// The flag for this corner in a [`CornerSet`]
    pub fn flag(self) -> CornerSet {
        match self {
            Corner::TopLeft => CornerSet::TOP_LEFT,
            Corner::TopRight => CornerSet::TOP_RIGHT,
            Corner::BottomRight => CornerSet::BOTTOM_RIGHT,
            Corner::BottomLeft => CornerSet::BOTTOM_LEFT,
        }
    }
}

/// Shape of a rounded corner
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CornerCurve {
    /// Quarter-circle arc
    Circular,
    /// Squircle-like curve that eases into the straight edges
    #[default]
    Continuous,
}

/// Independent radii for each corner, never negative
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    /// Create a corner radius with different values for each corner.
    /// Order: top_left, top_right, bottom_right, bottom_left (clockwise from top-left)
    pub fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self {
            top_left: top_left.max(0.0),
            top_right: top_right.max(0.0),
            bottom_right: bottom_right.max(0.0),
            bottom_left: bottom_left.max(0.0),
        }
    }

    pub fn uniform(radius: f32) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    /// The same radius on every corner in `corners`, zero elsewhere
    pub fn for_corners(radius: f32, corners: CornerSet) -> Self {
        let pick = |corner: Corner| {
            if corners.contains(corner.flag()) {
                radius
            } else {
                0.0
            }
        };
        Self::new(
            pick(Corner::TopLeft),
            pick(Corner::TopRight),
            pick(Corner::BottomRight),
            pick(Corner::BottomLeft),
        )
    }

    pub fn get(&self, corner: Corner) -> f32 {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomRight => self.bottom_right,
            Corner::BottomLeft => self.bottom_left,
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Apply `f` to every radius, clamping the results at zero
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(
            f(self.top_left),
            f(self.top_right),
            f(self.bottom_right),
            f(self.bottom_left),
        )
    }

    /// Check if all corner radii are the same
    pub fn is_uniform(&self) -> bool {
        self.top_left == self.top_right
            && self.top_right == self.bottom_right
            && self.bottom_right == self.bottom_left
    }

    pub fn is_zero(&self) -> bool {
        self.to_array().iter().all(|r| *r == 0.0)
    }
}

impl From<f32> for CornerRadius {
    fn from(radius: f32) -> Self {
        Self::uniform(radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_radii_are_clamped() {
        let radius = CornerRadius::new(-4.0, 8.0, -0.5, 2.0);
        assert_eq!(radius.to_array(), [0.0, 8.0, 0.0, 2.0]);
        assert_eq!(radius.map(|r| r - 5.0).to_array(), [0.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_for_corners() {
        let radius = CornerRadius::for_corners(10.0, CornerSet::TOP);
        assert_eq!(radius.to_array(), [10.0, 10.0, 0.0, 0.0]);
        assert_eq!(CornerSet::default(), CornerSet::all());
    }
}
