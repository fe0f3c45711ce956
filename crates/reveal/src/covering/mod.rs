//! Covering generator: split an image rectangle into N tiles.
//!
//! Every covering type produces convex tiles that exactly tile the
//! rectangle: no gaps, no overlaps, nothing outside the image. Types differ
//! only in the shape of the tiles.
//!
//! ```
//! use reveal::covering::{generate, CoveringType};
//!
//! let covering = generate(640.0, 480.0, 12, CoveringType::Shards, Some(7)).unwrap();
//! assert_eq!(covering.len(), 12);
//! assert!(covering.check(1e-6).is_ok());
//! ```

mod grid;
mod refine;
mod shards;
mod triangles;

use std::time::Instant;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::clip::{dedup_points, intersection_area};
use crate::error::{Error, Result};
use crate::geometry::{Point, Polygon, Rect};
use crate::rng::{Rng, fresh_seed};

/// Default lower bound on the average tile area, in square pixels.
pub const DEFAULT_MIN_TILE_AREA: f64 = 16.0;

/// Average tile area below which cuts would produce halves the splitter
/// rejects as degenerate. Holds whatever `min_tile_area` is configured.
pub const MIN_SPLIT_AREA: f64 = 1e-6;

/// Available tile shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoveringType {
    /// Randomly bisected triangles.
    #[default]
    Triangles,
    /// An (almost) square grid of rectangles.
    Rectangles,
    /// Randomized convex partition: cells cut through their centroid.
    Shards,
}

impl CoveringType {
    pub fn all() -> &'static [CoveringType] {
        &[CoveringType::Triangles, CoveringType::Rectangles, CoveringType::Shards]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CoveringType::Triangles => "triangles",
            CoveringType::Rectangles => "rectangles",
            CoveringType::Shards => "shards",
        }
    }

    /// Case-insensitive lookup; accepts the singular too.
    pub fn from_name(name: &str) -> Option<CoveringType> {
        match name.to_ascii_lowercase().as_str() {
            "triangles" | "triangle" => Some(CoveringType::Triangles),
            "rectangles" | "rectangle" | "grid" => Some(CoveringType::Rectangles),
            "shards" | "shard" | "convex" => Some(CoveringType::Shards),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CoveringType::Triangles => "triangles from repeated longest-edge bisection",
            CoveringType::Rectangles => "rows of equally sized rectangles",
            CoveringType::Shards => "convex shards cut through their centroids",
        }
    }
}

/// A finished covering of a `width × height` rectangle. Immutable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Covering {
    width: f64,
    height: f64,
    mode: CoveringType,
    seed: u64,
    polygons: Vec<Polygon>,
}

impl Covering {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn mode(&self) -> CoveringType {
        self.mode
    }

    /// The seed that reproduces this covering.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn total_area(&self) -> f64 {
        self.polygons.iter().map(Polygon::area).sum()
    }

    /// Verify the covering invariants. `tolerance` is relative to the
    /// rectangle's area (overlaps and the area sum) and its size (bounds).
    ///
    /// Overlap testing is pairwise with a bounding-box prefilter, so this is
    /// meant for tests and validation, not the hot path.
    pub fn check(&self, tolerance: f64) -> std::result::Result<(), Defect> {
        let bounds = self.bounds();
        let expected = bounds.area();
        let slack = tolerance * self.width.max(self.height);

        for (i, poly) in self.polygons.iter().enumerate() {
            if poly.points().iter().any(|p| !bounds.contains(*p, slack)) {
                return Err(Defect::OutOfBounds { tile: i });
            }
            if !poly.is_convex() {
                return Err(Defect::NotConvex { tile: i });
            }
        }

        let actual = self.total_area();
        if (actual - expected).abs() > tolerance * expected {
            return Err(Defect::AreaMismatch { expected, actual });
        }

        let boxes: Vec<Rect> = self.polygons.iter().map(Polygon::bounding_box).collect();
        for i in 0..self.polygons.len() {
            for j in (i + 1)..self.polygons.len() {
                let (a, b) = (boxes[i], boxes[j]);
                if a.max_x() <= b.x || b.max_x() <= a.x || a.max_y() <= b.y || b.max_y() <= a.y {
                    continue;
                }
                let shared = intersection_area(&self.polygons[i], &self.polygons[j]);
                if shared > tolerance * expected {
                    return Err(Defect::Overlap { a: i, b: j, area: shared });
                }
            }
        }
        Ok(())
    }
}

/// A broken covering invariant, reported by [`Covering::check`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Defect {
    #[error("tile {tile} leaves the rectangle")]
    OutOfBounds { tile: usize },
    #[error("tile {tile} is not convex")]
    NotConvex { tile: usize },
    #[error("tile areas sum to {actual}, rectangle is {expected}")]
    AreaMismatch { expected: f64, actual: f64 },
    #[error("tiles {a} and {b} overlap by {area}")]
    Overlap { a: usize, b: usize, area: f64 },
}

/// Everything needed to build one covering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoveringRequest {
    pub width: f64,
    pub height: f64,
    pub tile_count: usize,
    pub mode: CoveringType,
    /// `None` draws a fresh seed, so every round looks different.
    pub seed: Option<u64>,
    pub min_tile_area: f64,
}

impl CoveringRequest {
    pub fn new(width: f64, height: f64, tile_count: usize, mode: CoveringType) -> Self {
        Self {
            width,
            height,
            tile_count,
            mode,
            seed: None,
            min_tile_area: DEFAULT_MIN_TILE_AREA,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_min_tile_area(mut self, min_tile_area: f64) -> Self {
        self.min_tile_area = min_tile_area;
        self
    }

    /// Minimum average tile area actually enforced. Non-positive or
    /// non-finite values fall back to [`DEFAULT_MIN_TILE_AREA`].
    pub fn effective_min_tile_area(&self) -> f64 {
        let configured = if self.min_tile_area.is_finite() && self.min_tile_area > 0.0 {
            self.min_tile_area
        } else {
            DEFAULT_MIN_TILE_AREA
        };
        configured.max(MIN_SPLIT_AREA)
    }

    /// Largest tile count this request's rectangle supports.
    pub fn max_tiles(&self) -> usize {
        let area = sanitize_extent(self.width) * sanitize_extent(self.height);
        ((area / self.effective_min_tile_area()).floor() as usize).max(1)
    }

    pub fn generate(&self) -> Result<Covering> {
        let width = sanitize_extent(self.width);
        let height = sanitize_extent(self.height);
        let n = self.tile_count.max(1);

        let max = self.max_tiles();
        if n > max {
            debug!("rejecting {n} tiles for {width}x{height}, at most {max} fit");
            return Err(Error::TooManyTiles { requested: n, max });
        }

        let seed = self.seed.unwrap_or_else(fresh_seed);
        let mut rng = Rng::new(seed);
        let rect = Rect::from_size(width, height);
        let start = Instant::now();

        let mut polygons = match self.mode {
            CoveringType::Rectangles => grid::cover(rect, n),
            CoveringType::Triangles => triangles::cover(rect, n, &mut rng),
            CoveringType::Shards => shards::cover(rect, n, &mut rng),
        };
        if polygons.len() != n {
            warn!("only {} of {n} tiles could be cut", polygons.len());
            return Err(Error::TooManyTiles { requested: n, max: polygons.len() });
        }
        for poly in &mut polygons {
            *poly = snap_to_rect(poly, &rect);
        }
        rng.shuffle(&mut polygons);

        debug!(
            "generated {} {} tiles for {}x{} (seed {}) in {:?}",
            polygons.len(),
            self.mode.name(),
            width,
            height,
            seed,
            start.elapsed()
        );
        trace!("covering: {polygons:?}");

        Ok(Covering {
            width,
            height,
            mode: self.mode,
            seed,
            polygons,
        })
    }
}

/// Generate a covering of `width × height` with `tile_count` tiles.
pub fn generate(
    width: f64,
    height: f64,
    tile_count: usize,
    mode: CoveringType,
    seed: Option<u64>,
) -> Result<Covering> {
    CoveringRequest::new(width, height, tile_count, mode)
        .with_seed(seed)
        .generate()
}

/// Host-facing shortcut: fresh seed, default tile shape, just the polygons.
pub fn generate_covering(width: f64, height: f64, tile_count: usize) -> Result<Vec<Polygon>> {
    generate(width, height, tile_count, CoveringType::default(), None).map(Covering::into_polygons)
}

/// Images that haven't finished loading report 0 (or garbage); treat as 1.
fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 1.0 }
}

/// Clamp into the rectangle and pull near-edge coordinates onto the edge.
fn snap_to_rect(poly: &Polygon, rect: &Rect) -> Polygon {
    let tol = 1e-9 * rect.width.max(rect.height);
    let snap = |v: f64, lo: f64, hi: f64| {
        if (v - lo).abs() <= tol {
            lo
        } else if (v - hi).abs() <= tol {
            hi
        } else {
            v.clamp(lo, hi)
        }
    };
    let mut points: Vec<Point> = poly
        .points()
        .iter()
        .map(|p| Point::new(snap(p.x, rect.x, rect.max_x()), snap(p.y, rect.y, rect.max_y())))
        .collect();
    // A cut vertex snapped onto a corner duplicates its neighbour.
    dedup_points(&mut points);
    if points.len() < 3 {
        return poly.clone();
    }
    Polygon::from_vertices(points)
}
