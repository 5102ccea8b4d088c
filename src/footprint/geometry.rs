//! Planar geometry used by the footprint engine.
//!
//! Coordinates are in millimetres in KiCad's board frame: +x points right
//! and +y points down. Every outline and pad is first laid out in the
//! package frame (pin 1 at the upper left) and then turned into the board
//! frame with [`rotate`].

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point (mm).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// A straight line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Segment {
    /// Creates a new segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Creates a segment from raw coordinates.
    #[must_use]
    pub const fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }
}

/// Width and height of an axis-aligned box (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the size with width and height exchanged.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// Rotates `point` about the origin by `degrees` (counter-clockwise in a
/// y-up frame, clockwise on screen in KiCad's y-down frame).
#[must_use]
pub fn rotate(point: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Point::new(
        point.x.mul_add(cos, -(point.y * sin)),
        point.x.mul_add(sin, point.y * cos),
    )
}

/// Rotates both ends of the segment `p1 -> p2` about the origin.
#[must_use]
pub fn rotate_segment(p1: Point, p2: Point, degrees: f64) -> Segment {
    Segment::new(rotate(p1, degrees), rotate(p2, degrees))
}

/// An ordered list of segments drawn on one layer.
///
/// Order only affects drawing order. Closed outlines end where they start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Segments in drawing order.
    pub segments: Vec<Segment>,
}

impl Outline {
    /// Creates an outline from explicit segments.
    #[must_use]
    pub const fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Creates a closed outline through `points`.
    ///
    /// The first segment runs from the last point to the first one, so a
    /// polygon with `n` vertices yields `n` segments.
    #[must_use]
    pub fn closed(points: &[Point]) -> Self {
        let Some(&last) = points.last() else {
            return Self::default();
        };
        let mut previous = last;
        let segments = points
            .iter()
            .map(|&point| {
                let segment = Segment::new(previous, point);
                previous = point;
                segment
            })
            .collect();
        Self { segments }
    }

    /// Returns the outline rotated about the origin.
    #[must_use]
    pub fn rotated(&self, degrees: f64) -> Self {
        Self {
            segments: self
                .segments
                .iter()
                .map(|s| rotate_segment(s.start, s.end, degrees))
                .collect(),
        }
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the outline has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Signed area enclosed by a closed outline (shoelace formula).
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.start.x.mul_add(s.end.y, -(s.end.x * s.start.y)))
            .sum::<f64>()
            / 2.0
    }

    /// Absolute area enclosed by a closed outline.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}
