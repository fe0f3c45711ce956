//! Randomized convex partition ("shards").
//!
//! Each step cuts the largest cell with a line through its centroid. For a
//! convex cell any such line leaves at least 4/9 of the area on either
//! side, so cells can't collapse into slivers. The cut runs across the
//! cell's longer side, tilted by a random angle, which keeps the pieces
//! from getting long and thin.

use std::f64::consts::PI;

use crate::clip::split_convex;
use crate::geometry::{Point, Polygon, Rect};
use crate::rng::Rng;

use super::refine::refine;

/// Largest tilt away from a straight cut, in radians (±36°).
const MAX_TILT: f64 = PI / 5.0;

pub(super) fn cover(rect: Rect, n: usize, rng: &mut Rng) -> Vec<Polygon> {
    refine(vec![rect.to_polygon()], n, |cell| {
        let tilt = rng.next_range(-MAX_TILT, MAX_TILT);
        cut_through_centroid(cell, tilt)
    })
}

fn cut_through_centroid(cell: &Polygon, tilt: f64) -> Option<(Polygon, Polygon)> {
    let bbox = cell.bounding_box();
    // Wide cells get a (near) vertical cut, tall cells a (near) horizontal one.
    let base = if bbox.width >= bbox.height { PI / 2.0 } else { 0.0 };
    let angle = base + tilt;
    split_convex(cell, cell.centroid(), Point::new(angle.cos(), angle.sin()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shards_are_convex() {
        let mut rng = Rng::new(8);
        let cells = cover(Rect::from_size(500.0, 300.0), 40, &mut rng);
        assert_eq!(cells.len(), 40);
        assert!(cells.iter().all(Polygon::is_convex));
    }

    #[test]
    fn centroid_cut_is_balanced() {
        let square = Rect::from_size(100.0, 100.0).to_polygon();
        for tilt in [-MAX_TILT, -0.3, 0.0, 0.2, MAX_TILT] {
            let (a, b) = cut_through_centroid(&square, tilt).unwrap();
            let smaller = a.area().min(b.area());
            assert!(smaller >= 10_000.0 * 4.0 / 9.0 - 1e-6, "tilt {tilt}: {smaller}");
        }
    }

    #[test]
    fn wide_cell_is_cut_across_its_width() {
        let wide = Rect::from_size(100.0, 10.0).to_polygon();
        let (a, b) = cut_through_centroid(&wide, 0.0).unwrap();
        assert!(a.bounding_box().width < 60.0);
        assert!(b.bounding_box().width < 60.0);
    }
}
