//! Line segments and circles produced by diagram queries

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Point;

/// A finite line segment between two points
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub p0: Point,
    pub p1: Point,
}

impl LineSegment {
    pub const fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.p0.distance(self.p1)
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        (self.p0 + self.p1) * 0.5
    }
}

/// A circle, e.g. the largest site-centred circle inside a cell
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}
