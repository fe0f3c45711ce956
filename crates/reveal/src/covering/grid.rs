//! Rectangular grid covering.
//!
//! The row count follows the aspect ratio so cells stay roughly square, and
//! the remainder of `n / rows` is spread over the first rows. Exactly `n`
//! rectangles come out, whatever `n` is.

use crate::geometry::{Point, Polygon, Rect};

/// Position of grid line `i` of `count`, with the last line pinned to `len`.
#[inline]
fn grid_line(origin: f64, len: f64, i: usize, count: usize) -> f64 {
    if i == count {
        origin + len
    } else {
        origin + len * i as f64 / count as f64
    }
}

pub(super) fn cover(rect: Rect, n: usize) -> Vec<Polygon> {
    let rows = ((n as f64 * rect.height / rect.width).sqrt().round() as usize).clamp(1, n);
    let base = n / rows;
    let extra = n % rows;

    let mut tiles = Vec::with_capacity(n);
    for row in 0..rows {
        let y0 = grid_line(rect.y, rect.height, row, rows);
        let y1 = grid_line(rect.y, rect.height, row + 1, rows);
        let cols = base + usize::from(row < extra);

        for col in 0..cols {
            let x0 = grid_line(rect.x, rect.width, col, cols);
            let x1 = grid_line(rect.x, rect.width, col + 1, cols);
            tiles.push(Polygon::from_vertices(vec![
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ]));
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_square_count() {
        let tiles = cover(Rect::from_size(100.0, 100.0), 9);
        assert_eq!(tiles.len(), 9);
        for t in &tiles {
            assert!((t.area() - 100.0 * 100.0 / 9.0).abs() < 1e-9);
        }
    }

    #[test]
    fn awkward_count_is_exact() {
        for n in [2, 7, 10, 13, 101] {
            let tiles = cover(Rect::from_size(640.0, 480.0), n);
            assert_eq!(tiles.len(), n);
            let total: f64 = tiles.iter().map(Polygon::area).sum();
            assert!((total - 640.0 * 480.0).abs() < 1e-6);
        }
    }

    #[test]
    fn wide_image_gets_one_row() {
        let tiles = cover(Rect::from_size(1000.0, 10.0), 4);
        assert!(tiles.iter().all(|t| t.bounding_box().height == 10.0));
    }

    #[test]
    fn last_line_is_exact() {
        let tiles = cover(Rect::from_size(0.3, 0.7), 3);
        let corners = tiles.iter().flat_map(|t| t.points().iter().copied());
        let max_x = corners.clone().map(|p| p.x).fold(0.0, f64::max);
        let max_y = corners.map(|p| p.y).fold(0.0, f64::max);
        assert_eq!(max_x, 0.3);
        assert_eq!(max_y, 0.7);
    }
}
