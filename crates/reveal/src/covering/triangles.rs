//! Triangle covering by longest-edge bisection.
//!
//! The rectangle is cut along a random diagonal, then the largest triangle
//! is repeatedly split from its apex to a point near the middle of its
//! longest edge. Longest-edge bisection keeps angles bounded away from
//! zero, so there are no needle triangles however many tiles are asked for.

use crate::geometry::{Polygon, Rect};
use crate::rng::Rng;

use super::refine::refine;

/// Where along the longest edge the cut lands.
const CUT_MIN: f64 = 0.4;
const CUT_MAX: f64 = 0.6;

pub(super) fn cover(rect: Rect, n: usize, rng: &mut Rng) -> Vec<Polygon> {
    if n == 1 {
        return vec![rect.to_polygon()];
    }

    let [tl, tr, br, bl] = rect.corners();
    let initial = if rng.next_f64() < 0.5 {
        vec![
            Polygon::from_vertices(vec![tl, tr, br]),
            Polygon::from_vertices(vec![tl, br, bl]),
        ]
    } else {
        vec![
            Polygon::from_vertices(vec![tl, tr, bl]),
            Polygon::from_vertices(vec![tr, br, bl]),
        ]
    };

    refine(initial, n, |tri| split_triangle(tri, rng.next_range(CUT_MIN, CUT_MAX)))
}

/// Split `tri` from the vertex opposite its longest edge.
fn split_triangle(tri: &Polygon, t: f64) -> Option<(Polygon, Polygon)> {
    let pts = tri.points();
    if pts.len() != 3 {
        return None;
    }
    let (i, _) = tri.longest_edge();
    let a = pts[i];
    let b = pts[(i + 1) % 3];
    let apex = pts[(i + 2) % 3];
    let m = a.lerp(b, t);

    Some((
        Polygon::from_vertices(vec![a, m, apex]),
        Polygon::from_vertices(vec![m, b, apex]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn two_tiles_are_the_diagonal_halves() {
        let mut rng = Rng::new(1);
        let tris = cover(Rect::from_size(40.0, 20.0), 2, &mut rng);
        assert_eq!(tris.len(), 2);
        for t in &tris {
            assert_eq!(t.len(), 3);
            assert!((t.area() - 400.0).abs() < 1e-9);
        }
    }

    #[test]
    fn all_tiles_are_triangles() {
        let mut rng = Rng::new(2);
        let tris = cover(Rect::from_size(300.0, 200.0), 57, &mut rng);
        assert_eq!(tris.len(), 57);
        assert!(tris.iter().all(|t| t.len() == 3));
    }

    #[test]
    fn split_keeps_area() {
        let tri = Polygon::from_vertices(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 4.0),
        ]);
        let (a, b) = split_triangle(&tri, 0.5).unwrap();
        assert!((a.area() + b.area() - tri.area()).abs() < 1e-12);
        assert!((a.area() - b.area()).abs() < 1e-12);
    }

    #[test]
    fn split_uses_longest_edge() {
        let tri = Polygon::from_vertices(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 4.0),
        ]);
        let (a, _) = split_triangle(&tri, 0.5).unwrap();
        // Longest edge is the hypotenuse (10,0)-(0,4); its midpoint is (5,2).
        assert!(a.points().contains(&Point::new(5.0, 2.0)));
    }
}
