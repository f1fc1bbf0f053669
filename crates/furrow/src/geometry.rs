//! Core geometry types for furrow.
//!
//! Everything here works in a *local linear frame*: plain Euclidean x/y.
//! Geographic coordinates are mapped into this frame by [`crate::geo`]
//! before any of these operations are used.
//!
//! ## Rust Lesson #3: Operator Overloading
//!
//! `impl Add for Point` lets you write `a + b` instead of `a.add(b)`.
//! The named methods stay around too - `a.scale(2.0)` reads better than
//! `a * 2.0` in some formulas, and both compile to the same code.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point (or vector) in the local linear frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One sweep segment of a coverage path.
///
/// Rows are values: the serpentine pass builds reversed copies with
/// [`Row::reversed`] rather than swapping endpoints in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub start: Point,
    pub end: Point,
}

/// A simple polygon, implicitly closed (last vertex connects to the first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

// ============================================================================
// POINT
// ============================================================================

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    #[inline]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    #[inline]
    pub fn scale(self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s)
    }

    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Rotate 90 degrees counter-clockwise: `(x, y) -> (-y, x)`.
    #[inline]
    pub fn perp(self) -> Point {
        Point::new(-self.y, self.x)
    }

    #[inline]
    pub fn negate(self) -> Point {
        Point::new(-self.x, -self.y)
    }

    /// Vector length.
    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// The zero vector has no direction, so it maps to itself instead of
    /// producing NaNs.
    #[inline]
    pub fn normal(self) -> Point {
        let len = self.length();
        if len == 0.0 {
            return Point::ZERO;
        }
        self.scale(1.0 / len)
    }

    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.sub(other).length()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::add(self, rhs)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::sub(self, rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        self.negate()
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: f64) -> Point {
        self.scale(rhs)
    }
}

// ============================================================================
// ROW
// ============================================================================

impl Row {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Unit vector pointing from `start` to `end`.
    #[inline]
    pub fn direction(&self) -> Point {
        (self.end - self.start).normal()
    }

    /// The same segment traversed the other way.
    #[inline]
    pub fn reversed(&self) -> Row {
        Row::new(self.end, self.start)
    }

    /// Direction glyph for drawing: `[left barb, tip, right barb]`.
    ///
    /// The tip sits half a glyph ahead of the row midpoint and the barbs
    /// trail it by `size`, spread `size / 2` to either side.
    pub fn arrow(&self, size: f64) -> [Point; 3] {
        let back = self.direction() * -size;
        let tip = self.midpoint() + back * -0.5;
        let spread = back.perp() * 0.5;
        [tip + back + spread, tip, tip + back - spread]
    }
}

// ============================================================================
// POLYGON
// ============================================================================

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edges as `(from, to)` pairs, including the closing edge.
    ///
    /// ## Rust Lesson #4: impl Trait in return position
    ///
    /// `impl Iterator<Item = ...>` hides the concrete iterator type
    /// (a `Map<Range<usize>, closure>`) - callers just see "some iterator".
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Get the bounding box as (min_x, min_y, max_x, max_y).
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        if self.vertices.is_empty() {
            return None;
        }

        let min_x = self.vertices.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = self.vertices.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = self.vertices.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = self.vertices.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Some((min_x, min_y, max_x, max_y))
    }

    /// Middle of the bounding box; what areas are recentered on.
    pub fn center(&self) -> Option<Point> {
        self.bounding_box().map(|(min_x, min_y, max_x, max_y)| {
            Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0)
        })
    }

    /// Get the diagonal length of the bounding box.
    ///
    /// Always at least as long as the largest vertex-to-vertex distance.
    #[inline]
    pub fn diagonal(&self) -> Option<f64> {
        self.bounding_box().map(|(min_x, min_y, max_x, max_y)| {
            let width = max_x - min_x;
            let height = max_y - min_y;
            (width * width + height * height).sqrt()
        })
    }

    /// Calculate signed area using the shoelace formula.
    ///
    /// Positive for counter-clockwise winding, negative for clockwise.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area_of_points(&self.vertices)
    }

    /// Copy of the polygon shifted by `offset`.
    pub fn translated(&self, offset: Point) -> Polygon {
        Polygon::new(self.vertices.iter().map(|&p| p + offset).collect())
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Polygon::new(vertices)
    }
}

/// Calculate signed area of a point sequence using the shoelace formula.
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

// ============================================================================
// TESTS
// ============================================================================
