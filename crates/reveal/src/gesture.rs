//! Touch/pointer gesture classification.
//!
//! A gesture is one touch-down-to-touch-up sequence. [`GestureTracker`]
//! collects it, [`classify`] turns it into an [`Action`] (or nothing).
//!
//! ```text
//!            dy < 0: Reset
//!                 ^
//!  dx < 0: Next <-+-> dx > 0: Previous
//!                 v
//!            dy > 0: Clear
//!
//!  neither axis past the threshold: Uncover (a tap)
//! ```

use log::trace;

use crate::action::Action;
use crate::geometry::Point;

/// Minimum travel, in pixels, before a touch counts as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 30.0;

/// Everything known about a finished touch sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    pub start: Point,
    pub end: Point,
    /// More than one finger was down at some point.
    pub multi_touch_seen: bool,
    /// The view was zoomed when the sequence ended.
    pub zoomed: bool,
}

impl GestureState {
    pub fn classify(&self, threshold: f64) -> Option<Action> {
        classify(self.start, self.end, self.multi_touch_seen, self.zoomed, threshold)
    }
}

/// Map a swipe to an action. Horizontal wins ties with vertical, so
/// diagonal swipes resolve to their dominant axis.
pub fn classify(
    start: Point,
    end: Point,
    multi_touch_seen: bool,
    zoomed: bool,
    threshold: f64,
) -> Option<Action> {
    if zoomed || multi_touch_seen {
        return None;
    }

    let dx = end.x - start.x;
    let dy = end.y - start.y;

    let action = if dx.abs() > dy.abs() && dx.abs() > threshold {
        // Leftward swipe pulls the next image in ("natural" scrolling).
        if dx < 0.0 { Action::Next } else { Action::Previous }
    } else if dy.abs() > threshold {
        if dy < 0.0 { Action::Reset } else { Action::Clear }
    } else {
        Action::Uncover
    };
    Some(action)
}

/// Accumulates one touch sequence. Feed it events, call [`end`](Self::end)
/// on release; the tracker is then ready for the next sequence.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    start: Option<Point>,
    last: Option<Point>,
    multi_touch_seen: bool,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finger(s) down. `touches` holds every active touch point.
    pub fn touch_start(&mut self, touches: &[Point]) {
        if touches.len() > 1 {
            self.multi_touch_seen = true;
        }
        if self.start.is_none() {
            self.start = touches.first().copied();
            self.last = self.start;
        }
    }

    pub fn touch_move(&mut self, touches: &[Point]) {
        if touches.len() > 1 {
            self.multi_touch_seen = true;
        }
        if let Some(p) = touches.first() {
            self.last = Some(*p);
        }
    }

    /// Finger(s) up. `end` is the release point when the host knows it.
    /// Returns the finished gesture and resets the tracker.
    pub fn end(&mut self, end: Option<Point>, zoomed: bool) -> Option<GestureState> {
        let tracked = std::mem::take(self);
        let start = tracked.start?;
        let state = GestureState {
            start,
            end: end.or(tracked.last).unwrap_or(start),
            multi_touch_seen: tracked.multi_touch_seen,
            zoomed,
        };
        trace!("gesture finished: {state:?}");
        Some(state)
    }

    /// Convenience: end the sequence and classify it in one go.
    pub fn finish(&mut self, end: Option<Point>, zoomed: bool, threshold: f64) -> Option<Action> {
        self.end(end, zoomed)?.classify(threshold)
    }

    pub fn in_progress(&self) -> bool {
        self.start.is_some()
    }
}
