//! Polygon clipping against half-planes and rectangles.
//!
//! Everything here works on convex clippers (a half-plane, a rectangle, a
//! convex tile), which is all the covering generator ever needs. The
//! Sutherland-Hodgman walk keeps the code short and allocation-light.

use crate::geometry::{EPSILON, Point, Polygon, Rect, signed_area_of_points};

// ============================================================================
// POINT PREDICATES
// ============================================================================

/// Test if a point is strictly inside a polygon using ray casting.
///
/// Casts a ray to the right and counts edge crossings.
/// Odd crossings = inside, even = outside. Points exactly on the boundary
/// may land either way; use [`Polygon::contains`] for an inclusive test.
#[inline]
pub fn point_in_polygon(px: f64, py: f64, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Is `p` on the closed segment `a`-`b` (within [`EPSILON`])?
#[inline]
pub fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    let len = a.distance(b);
    if a.cross(b, p).abs() > EPSILON * len.max(1.0) {
        return false;
    }
    let dot = (p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y);
    dot >= -EPSILON && dot <= len * len + EPSILON
}

// ============================================================================
// HALF-PLANE CLIPPING
// ============================================================================
//
// ## Rust Lesson #8: Slices in, Vec out
//
// The clippers borrow their input (`&[Point]`) and hand back a freshly
// owned `Vec<Point>`. Callers can chain them without any lifetime juggling:
// each step owns its result and the previous one is dropped.

/// Signed distance-like value of `p` relative to the directed line through
/// `origin` along `direction`. Positive = left of the line.
#[inline]
fn side(p: Point, origin: Point, direction: Point) -> f64 {
    direction.x * (p.y - origin.y) - direction.y * (p.x - origin.x)
}

/// Keep the part of `points` on the left of (or on) the directed line.
pub fn clip_half_plane(points: &[Point], origin: Point, direction: Point) -> Vec<Point> {
    let n = points.len();
    let mut out = Vec::with_capacity(n + 1);
    if n == 0 {
        return out;
    }

    let sides: Vec<f64> = points.iter().map(|&p| side(p, origin, direction)).collect();
    for i in 0..n {
        let j = (i + 1) % n;
        let (p, sp) = (points[i], sides[i]);
        let (q, sq) = (points[j], sides[j]);

        if sp >= 0.0 {
            out.push(p);
        }
        if (sp > 0.0 && sq < 0.0) || (sp < 0.0 && sq > 0.0) {
            out.push(p.lerp(q, sp / (sp - sq)));
        }
    }

    dedup_points(&mut out);
    out
}

/// Split a convex polygon along the line through `origin` with `direction`.
///
/// Returns `(left, right)`. Both halves share the exact same cut vertices,
/// so they meet without a gap. `None` when the line misses the polygon or
/// one side would be degenerate.
pub fn split_convex(polygon: &Polygon, origin: Point, direction: Point) -> Option<(Polygon, Polygon)> {
    let pts = polygon.points();
    let n = pts.len();
    let sides: Vec<f64> = pts.iter().map(|&p| side(p, origin, direction)).collect();

    let mut left = Vec::with_capacity(n + 2);
    let mut right = Vec::with_capacity(n + 2);
    for i in 0..n {
        let j = (i + 1) % n;
        let (p, sp) = (pts[i], sides[i]);
        let (q, sq) = (pts[j], sides[j]);

        if sp >= 0.0 {
            left.push(p);
        }
        if sp <= 0.0 {
            right.push(p);
        }
        if (sp > 0.0 && sq < 0.0) || (sp < 0.0 && sq > 0.0) {
            let cut = p.lerp(q, sp / (sp - sq));
            left.push(cut);
            right.push(cut);
        }
    }

    dedup_points(&mut left);
    dedup_points(&mut right);
    if left.len() < 3 || right.len() < 3 {
        return None;
    }
    if signed_area_of_points(&left).abs() < EPSILON || signed_area_of_points(&right).abs() < EPSILON {
        return None;
    }
    Some((Polygon::from_vertices(left), Polygon::from_vertices(right)))
}

/// Clip a polygon to a rectangle. `None` when nothing with area remains.
pub fn clip(polygon: &Polygon, rect: &Rect) -> Option<Polygon> {
    let [tl, tr, br, bl] = rect.corners();

    // Each edge is walked so that the rectangle's interior is on its left.
    let mut pts = polygon.points().to_vec();
    pts = clip_half_plane(&pts, tl, Point::new(1.0, 0.0));
    pts = clip_half_plane(&pts, tr, Point::new(0.0, 1.0));
    pts = clip_half_plane(&pts, br, Point::new(-1.0, 0.0));
    pts = clip_half_plane(&pts, bl, Point::new(0.0, -1.0));

    if pts.len() < 3 || signed_area_of_points(&pts).abs() < EPSILON {
        return None;
    }
    Some(Polygon::from_vertices(pts.into_iter().map(|p| rect.clamp(p)).collect()))
}

/// Area shared by `subject` and the convex polygon `clipper`.
pub fn intersection_area(subject: &Polygon, clipper: &Polygon) -> f64 {
    let c = clipper.points();
    let n = c.len();
    let flip = if clipper.signed_area() < 0.0 { -1.0 } else { 1.0 };

    let mut pts = subject.points().to_vec();
    for i in 0..n {
        if pts.len() < 3 {
            return 0.0;
        }
        let a = c[i];
        let b = c[(i + 1) % n];
        let dir = Point::new((b.x - a.x) * flip, (b.y - a.y) * flip);
        pts = clip_half_plane(&pts, a, dir);
    }
    signed_area_of_points(&pts).abs()
}

/// Drop consecutive duplicate vertices, including a closing duplicate.
pub fn dedup_points(points: &mut Vec<Point>) {
    points.dedup_by(|a, b| (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON);
    while points.len() > 1 {
        let first = points[0];
        let last = points[points.len() - 1];
        if (first.x - last.x).abs() < EPSILON && (first.y - last.y).abs() < EPSILON {
            points.pop();
        } else {
            break;
        }
    }
}
