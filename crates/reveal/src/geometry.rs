//! Core geometry types: points, polygons and axis-aligned rectangles.
//!
//! ## Rust Lesson #3: Validated constructors
//!
//! A `Polygon` with fewer than three vertices is meaningless, so the only
//! public way to build one is `Polygon::new`, which returns a `Result`.
//! Once you hold a `Polygon` you never have to check its length again -
//! the type carries the invariant for you.

use serde::{Deserialize, Serialize};

use crate::clip::{point_in_polygon, point_on_segment};
use crate::error::{Error, Result};

/// Tolerance used for "is this on the boundary" style comparisons.
pub const EPSILON: f64 = 1e-9;

/// A point in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point at fraction `t` of the way from `self` to `other`.
    #[inline]
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    /// Cross product of `(a - self)` and `(b - self)`.
    #[inline]
    pub fn cross(&self, a: Point, b: Point) -> f64 {
        (a.x - self.x) * (b.y - self.y) - (a.y - self.y) * (b.x - self.x)
    }
}

/// An axis-aligned rectangle, `[x, x + width] × [y, y + height]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle anchored at the origin, the shape of an image.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Corners in order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.max_x(), self.y),
            Point::new(self.max_x(), self.max_y()),
            Point::new(self.x, self.max_y()),
        ]
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon::from_vertices(self.corners().to_vec())
    }

    /// Boundary-inclusive containment, with `tolerance` slack on every side.
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        p.x >= self.x - tolerance
            && p.x <= self.max_x() + tolerance
            && p.y >= self.y - tolerance
            && p.y <= self.max_y() + tolerance
    }

    /// Clamp a point into the rectangle.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(self.x, self.max_x()), p.y.clamp(self.y, self.max_y()))
    }
}

/// Wire shape of a polygon: `{"pnts": [{"x": .., "y": ..}, ...]}`.
#[derive(Deserialize)]
struct RawPolygon {
    pnts: Vec<Point>,
}

impl TryFrom<RawPolygon> for Polygon {
    type Error = Error;

    fn try_from(raw: RawPolygon) -> Result<Self> {
        Polygon::new(raw.pnts)
    }
}

/// A simple, closed polygon. The closing vertex is implied, not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPolygon")]
pub struct Polygon {
    #[serde(rename = "pnts")]
    points: Vec<Point>,
}

impl Polygon {
    /// Build a polygon, rejecting anything with fewer than 3 vertices.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() < 3 {
            return Err(Error::InvalidPolygon { vertices: points.len() });
        }
        Ok(Self { points })
    }

    /// Internal constructor for vertex lists that are known to be valid.
    pub(crate) fn from_vertices(points: Vec<Point>) -> Self {
        debug_assert!(points.len() >= 3, "polygon with {} vertices", points.len());
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed polygon.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area via the shoelace formula. Sign depends on winding.
    pub fn signed_area(&self) -> f64 {
        signed_area_of_points(&self.points)
    }

    /// Unsigned area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Bounding box of the vertices.
    pub fn bounding_box(&self) -> Rect {
        let min_x = self.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = self.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = self.points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = self.points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Area centroid. Falls back to the vertex average for degenerate input.
    pub fn centroid(&self) -> Point {
        let a = self.signed_area();
        let n = self.points.len();
        if a.abs() < EPSILON {
            let sx: f64 = self.points.iter().map(|p| p.x).sum();
            let sy: f64 = self.points.iter().map(|p| p.y).sum();
            return Point::new(sx / n as f64, sy / n as f64);
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            let f = p.x * q.y - q.x * p.y;
            cx += (p.x + q.x) * f;
            cy += (p.y + q.y) * f;
        }
        Point::new(cx / (6.0 * a), cy / (6.0 * a))
    }

    /// Boundary-inclusive point containment.
    pub fn contains(&self, p: Point) -> bool {
        let n = self.points.len();
        let on_edge = (0..n).any(|i| point_on_segment(p, self.points[i], self.points[(i + 1) % n]));
        on_edge || point_in_polygon(p.x, p.y, &self.points)
    }

    /// True when every turn has the same orientation (collinear runs allowed).
    pub fn is_convex(&self) -> bool {
        let n = self.points.len();
        let mut sign = 0.0_f64;
        for i in 0..n {
            let turn = self.points[i].cross(self.points[(i + 1) % n], self.points[(i + 2) % n]);
            if turn.abs() < EPSILON {
                continue;
            }
            if sign == 0.0 {
                sign = turn.signum();
            } else if turn.signum() != sign {
                return false;
            }
        }
        true
    }

    /// Length and index of the longest edge (edge `i` runs from vertex `i` to `i + 1`).
    pub fn longest_edge(&self) -> (usize, f64) {
        let n = self.points.len();
        (0..n)
            .map(|i| (i, self.points[i].distance(self.points[(i + 1) % n])))
            .fold((0, f64::NEG_INFINITY), |best, cur| if cur.1 > best.1 { cur } else { best })
    }
}

/// Area of a polygon. Never negative.
pub fn area(polygon: &Polygon) -> f64 {
    polygon.area()
}

/// Boundary-inclusive containment test.
pub fn contains(polygon: &Polygon, point: Point) -> bool {
    polygon.contains(point)
}

/// Signed shoelace area of a raw vertex list.
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
