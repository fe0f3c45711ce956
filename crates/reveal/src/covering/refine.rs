//! Largest-first refinement shared by the randomized covering types.
//!
//! Always splitting the biggest cell keeps tile sizes even: a cell is only
//! ever cut while it is the largest one around, so no tile ends up smaller
//! than a fixed fraction of the final average.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::warn;

use crate::clip::split_convex;
use crate::geometry::{Point, Polygon};

/// Heap entry ordered by area, ties broken by slot so the order is total.
struct BySize {
    area: f64,
    slot: usize,
}

impl PartialEq for BySize {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BySize {}

impl PartialOrd for BySize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BySize {
    fn cmp(&self, other: &Self) -> Ordering {
        self.area
            .total_cmp(&other.area)
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

/// Split cells until there are `target` of them.
///
/// `split` is the covering type's own cut. When it declines a cell the cell
/// is bisected perpendicular to its longest edge instead; a cell neither cut
/// accepts is left whole and the next largest is tried.
pub(super) fn refine<F>(initial: Vec<Polygon>, target: usize, mut split: F) -> Vec<Polygon>
where
    F: FnMut(&Polygon) -> Option<(Polygon, Polygon)>,
{
    let mut cells = initial;
    let mut heap: BinaryHeap<BySize> = cells
        .iter()
        .enumerate()
        .map(|(slot, cell)| BySize { area: cell.area(), slot })
        .collect();

    while cells.len() < target {
        let Some(BySize { slot, .. }) = heap.pop() else {
            warn!("ran out of splittable cells at {} of {target}", cells.len());
            break;
        };

        let Some((a, b)) = split(&cells[slot]).or_else(|| bisect(&cells[slot])) else {
            continue;
        };

        heap.push(BySize { area: a.area(), slot });
        heap.push(BySize { area: b.area(), slot: cells.len() });
        cells[slot] = a;
        cells.push(b);
    }

    cells
}

/// Fallback cut: through the centroid, perpendicular to the longest edge.
fn bisect(cell: &Polygon) -> Option<(Polygon, Polygon)> {
    let (i, _) = cell.longest_edge();
    let pts = cell.points();
    let a = pts[i];
    let b = pts[(i + 1) % pts.len()];
    let normal = Point::new(-(b.y - a.y), b.x - a.x);
    split_convex(cell, cell.centroid(), normal)
}
