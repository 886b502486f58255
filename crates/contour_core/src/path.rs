//! Vector paths
//!
//! A [`Path`] is an ordered list of move/line/cubic/close commands. Paths
//! produced by boolean shape combinators additionally carry deferred
//! [`PathOperation`]s: the base commands are combined with each operand in
//! order by whichever surface consumes the path.

use smallvec::SmallVec;

use crate::{Point, Rect};

/// Cubic Bézier control distance for a quarter circle
pub const KAPPA: f32 = 0.552_284_75;

/// Path command for building vector paths
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Move to a point
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Cubic Bézier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Close the current subpath
    Close,
}

/// Boolean operation applied between two filled paths
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CombineMode {
    /// Area covered by either path
    #[default]
    Union,
    /// Area covered by both paths
    Intersection,
    /// Area of the first path not covered by the second
    Difference,
    /// Area covered by exactly one of the paths
    Xor,
}

/// A deferred boolean operand of a [`Path`]
#[derive(Clone, Debug, PartialEq)]
pub struct PathOperation {
    pub mode: CombineMode,
    pub path: Path,
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
    operations: SmallVec<[Box<PathOperation>; 1]>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Line to a point
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Cubic Bézier curve
    pub fn cubic_to(mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::CubicTo {
            control1: Point::new(cx1, cy1),
            control2: Point::new(cx2, cy2),
            end: Point::new(x, y),
        });
        self
    }

    /// Close the path
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Append a raw command
    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// Attach `other` as a deferred boolean operand
    pub fn combine(mut self, other: Path, mode: CombineMode) -> Self {
        self.operations
            .push(Box::new(PathOperation { mode, path: other }));
        self
    }

    /// Create a rectangle path: four lines, ending back on the origin corner
    pub fn rect(rect: Rect) -> Self {
        Self::new()
            .move_to(rect.min_x(), rect.min_y())
            .line_to(rect.max_x(), rect.min_y())
            .line_to(rect.max_x(), rect.max_y())
            .line_to(rect.min_x(), rect.max_y())
            .line_to(rect.min_x(), rect.min_y())
            .close()
    }

    /// Create the ellipse inscribed in `rect`, clockwise from the top
    pub fn ellipse(rect: Rect) -> Self {
        let rx = rect.width() / 2.0;
        let ry = rect.height() / 2.0;
        let c = rect.center();
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);

        Self::new()
            .move_to(c.x, c.y - ry)
            .cubic_to(c.x + kx, c.y - ry, c.x + rx, c.y - ky, c.x + rx, c.y)
            .cubic_to(c.x + rx, c.y + ky, c.x + kx, c.y + ry, c.x, c.y + ry)
            .cubic_to(c.x - kx, c.y + ry, c.x - rx, c.y + ky, c.x - rx, c.y)
            .cubic_to(c.x - rx, c.y - ky, c.x - kx, c.y - ry, c.x, c.y - ry)
            .close()
    }

    /// Create a circle path
    pub fn circle(center: Point, radius: f32) -> Self {
        Self::ellipse(Rect::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        ))
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Deferred boolean operands, applied in order
    pub fn operations(&self) -> impl Iterator<Item = &PathOperation> {
        self.operations.iter().map(|op| op.as_ref())
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of line segments
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::LineTo(_)))
            .count()
    }

    /// Number of cubic curve segments
    pub fn curve_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::CubicTo { .. }))
            .count()
    }

    /// The first point the path moves to
    pub fn first_point(&self) -> Option<Point> {
        self.commands.iter().find_map(|c| match c {
            PathCommand::MoveTo(p) => Some(*p),
            _ => None,
        })
    }

    /// The end point of the last drawing command
    pub fn last_point(&self) -> Option<Point> {
        self.commands.iter().rev().find_map(|c| match c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::CubicTo { end, .. } => Some(*end),
            PathCommand::Close => None,
        })
    }

    /// Whether the path ends with a close marker on top of its start point
    pub fn is_closed(&self) -> bool {
        let ends_with_close = matches!(self.commands.last(), Some(PathCommand::Close));
        match (self.first_point(), self.last_point()) {
            (Some(first), Some(last)) => ends_with_close && first.approx_eq(last, 1e-3),
            _ => false,
        }
    }

    /// Every on-curve point, in order
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(|c| match c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::CubicTo { end, .. } => Some(*end),
            PathCommand::Close => None,
        })
    }

    /// Bounding rectangle of the base commands and control points
    ///
    /// Intersection and difference operands can only shrink the area, so they
    /// narrow or keep the bounds; union and xor operands widen them.
    pub fn bounds(&self) -> Rect {
        let mut bounds = self.command_bounds();

        for op in self.operations() {
            let other = op.path.bounds();
            bounds = match op.mode {
                CombineMode::Union | CombineMode::Xor => bounds.union(&other),
                CombineMode::Intersection => bounds.intersection(&other).unwrap_or(Rect::ZERO),
                CombineMode::Difference => bounds,
            };
        }

        bounds
    }

    fn command_bounds(&self) -> Rect {
        if self.commands.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        let mut include = |p: &Point| {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        };

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => include(p),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    include(control1);
                    include(control2);
                    include(end);
                }
                PathCommand::Close => {}
            }
        }

        if min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite() {
            Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
        } else {
            Rect::ZERO
        }
    }
}
