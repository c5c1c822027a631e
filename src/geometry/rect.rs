//! Axis-aligned bounding rectangle

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Point;
use crate::error::{Result, VoronoiError};

/// Axis-aligned rectangle given by its minimum corner and its size
///
/// The rectangle bounds every clipped region of a diagram. Corners are
/// reported counter-clockwise in a y-up frame, starting at `(x_min, y_min)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Minimum x coordinate
    pub x: f64,
    /// Minimum y coordinate
    pub y: f64,
    /// Extent along x (must be positive to bound a diagram)
    pub width: f64,
    /// Extent along y (must be positive to bound a diagram)
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its minimum corner and size
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle anchored at the origin
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Smallest rectangle containing every point, `None` for an empty slice
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
        Some(Self::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    #[inline]
    pub fn x_min(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn x_max(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn y_min(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn y_max(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Length of the diagonal, used to scale relative tolerances
    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x_min() && p.x <= self.x_max() && p.y >= self.y_min() && p.y <= self.y_max()
    }

    /// The four corners, counter-clockwise from `(x_min, y_min)`
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x_min(), self.y_min()),
            Point::new(self.x_max(), self.y_min()),
            Point::new(self.x_max(), self.y_max()),
            Point::new(self.x_min(), self.y_max()),
        ]
    }

    /// Check whether `p` lies exactly on one of the four bounding lines
    ///
    /// The comparison is exact: clipping writes border coordinates verbatim,
    /// so a clipped point on the border compares equal to the bound.
    pub fn on_border(&self, p: Point) -> bool {
        p.x == self.x_min() || p.x == self.x_max() || p.y == self.y_min() || p.y == self.y_max()
    }

    /// Total length of the border
    #[inline]
    pub(crate) fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }

    /// Arc-length position of a border point, walking counter-clockwise from
    /// `(x_min, y_min)`. Only meaningful when `on_border(p)` holds.
    pub(crate) fn perimeter_position(&self, p: Point) -> f64 {
        if p.y == self.y_min() {
            p.x - self.x_min()
        } else if p.x == self.x_max() {
            self.width + (p.y - self.y_min())
        } else if p.y == self.y_max() {
            self.width + self.height + (self.x_max() - p.x)
        } else {
            2.0 * self.width + self.height + (self.y_max() - p.y)
        }
    }

    /// Perimeter positions of `corners()`, in the same order
    pub(crate) fn corner_positions(&self) -> [f64; 4] {
        [
            0.0,
            self.width,
            self.width + self.height,
            2.0 * self.width + self.height,
        ]
    }

    /// Validate that the rectangle can bound a diagram
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any component is not finite or if the width
    /// or height is not strictly positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite())
        {
            return Err(VoronoiError::InvalidInput(format!(
                "bounds must be finite (got {:?})",
                self
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(VoronoiError::InvalidInput(format!(
                "bounds width and height must be positive (got {} x {})",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::from_size(100.0, 100.0)
    }
}
