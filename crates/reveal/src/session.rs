//! Reveal session: which tiles still hide the image.
//!
//! A session is created from a [`Covering`] and then only changes through
//! the four operations below. Each operation returns a [`Redraw`] telling
//! the host exactly which tiles need repainting.
//!
//! ## Rust Lesson #12: Owning state instead of sharing it
//!
//! There is no global "current state" object. Whoever owns the
//! `RevealSession` is the only one who can change it (`&mut self`), and the
//! compiler enforces that. Need it across threads? Put it in a `Mutex` at
//! the boundary - `uncover_next` is a read-modify-write on the cursor.

use log::debug;
use serde::Serialize;

use crate::covering::Covering;
use crate::geometry::{Polygon, Rect};

/// A covering polygon plus whether it still hides the image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub polygon: Polygon,
    /// `true` = still covering the image.
    pub visible: bool,
}

/// Coarse session state, derived from the tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RevealState {
    /// Every tile visible (also the state of an empty session).
    Covered,
    PartiallyUncovered,
    /// Every tile hidden.
    Uncovered,
}

/// What the host has to repaint after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Redraw {
    Nothing,
    /// Only these tile indices changed.
    Tiles(Vec<usize>),
    /// The whole tile list was replaced.
    All,
}

impl Redraw {
    pub fn is_nothing(&self) -> bool {
        matches!(self, Redraw::Nothing)
    }

    fn from_indices(indices: Vec<usize>) -> Self {
        if indices.is_empty() {
            Redraw::Nothing
        } else {
            Redraw::Tiles(indices)
        }
    }
}

/// Tiles for the current image and the cursor choosing the next to reveal.
///
/// `uncover_next` skips tiles that are already hidden, so a fresh session is
/// fully revealed after exactly `len()` calls.
#[derive(Debug, Clone, Default)]
pub struct RevealSession {
    tiles: Vec<Tile>,
    cursor: usize,
    bounds: Rect,
}

impl RevealSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_covering(covering: Covering) -> Self {
        let mut session = Self::new();
        session.load(covering);
        session
    }

    /// Replace all tiles; everything starts covered.
    pub fn load(&mut self, covering: Covering) -> Redraw {
        self.bounds = covering.bounds();
        self.tiles = covering
            .into_polygons()
            .into_iter()
            .map(|polygon| Tile { polygon, visible: true })
            .collect();
        self.cursor = 0;
        debug!("session loaded with {} tiles", self.tiles.len());
        Redraw::All
    }

    /// Hide the next still-visible tile. No-op when none is left.
    pub fn uncover_next(&mut self) -> Redraw {
        let n = self.tiles.len();
        if n == 0 {
            return Redraw::Nothing;
        }

        for _ in 0..n {
            let index = self.cursor % n;
            self.cursor = self.cursor.wrapping_add(1);
            if self.tiles[index].visible {
                self.tiles[index].visible = false;
                return Redraw::Tiles(vec![index]);
            }
        }
        Redraw::Nothing
    }

    /// Show every tile again and restart the cursor.
    pub fn cover_full(&mut self) -> Redraw {
        self.cursor = 0;
        self.set_all(true)
    }

    /// Hide every tile and restart the cursor.
    pub fn uncover_full(&mut self) -> Redraw {
        self.cursor = 0;
        self.set_all(false)
    }

    fn set_all(&mut self, visible: bool) -> Redraw {
        let changed: Vec<usize> = self
            .tiles
            .iter_mut()
            .enumerate()
            .filter(|(_, tile)| tile.visible != visible)
            .map(|(i, tile)| {
                tile.visible = visible;
                i
            })
            .collect();
        Redraw::from_indices(changed)
    }

    pub fn state(&self) -> RevealState {
        let visible = self.visible_count();
        if visible == self.tiles.len() {
            RevealState::Covered
        } else if visible == 0 {
            RevealState::Uncovered
        } else {
            RevealState::PartiallyUncovered
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The rectangle the current covering was made for.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn visible_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.visible).count()
    }

    /// Visibility flags in tile order, handy for renderers.
    pub fn visibility(&self) -> Vec<bool> {
        self.tiles.iter().map(|t| t.visible).collect()
    }
}
