//! Points and rectangles in host pixel coordinates.

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Translate by the given offsets.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Which point of a rectangle to use when connecting to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Midpoint of the left edge.
    Left,
    /// Midpoint of the right edge.
    Right,
    /// Midpoint of the top edge.
    Top,
    /// Midpoint of the bottom edge.
    Bottom,
    /// Center of the rectangle.
    #[default]
    Center,
}

/// An axis-aligned rectangle, as returned by a bounding-box measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The point selected by `edge`.
    #[must_use]
    pub fn edge_point(&self, edge: Edge) -> Point {
        let center = self.center();
        match edge {
            Edge::Left => Point::new(self.x, center.y),
            Edge::Right => Point::new(self.right(), center.y),
            Edge::Top => Point::new(center.x, self.y),
            Edge::Bottom => Point::new(center.x, self.bottom()),
            Edge::Center => center,
        }
    }

    /// Check if a point is within this rectangle.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Fraction of this rectangle's area that lies inside `viewport`.
    ///
    /// Degenerate (zero-area) rectangles count as fully visible when their
    /// origin is inside the viewport, matching how browsers report empty
    /// targets.
    #[must_use]
    pub fn visible_fraction(&self, viewport: &Rect) -> f32 {
        let area = self.width * self.height;
        if area <= 0.0 {
            return if viewport.contains_point(self.x, self.y) {
                1.0
            } else {
                0.0
            };
        }
        let w = (self.right().min(viewport.right()) - self.x.max(viewport.x)).max(0.0);
        let h = (self.bottom().min(viewport.bottom()) - self.y.max(viewport.y)).max(0.0);
        (w * h / area).clamp(0.0, 1.0)
    }
}
