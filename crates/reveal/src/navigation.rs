//! Position within the host's image list.

use log::debug;

/// Wrap-around cursor over `total` images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageCursor {
    index: usize,
    total: usize,
}

impl ImageCursor {
    pub fn new(total: usize) -> Self {
        Self { index: 0, total }
    }

    /// The host found a new set of images; start over at the first.
    pub fn reset(&mut self, total: usize) {
        self.index = 0;
        self.total = total;
    }

    /// Move by `delta` (negative = back), wrapping at both ends.
    /// Returns the new `(index, total)`, or `None` without images.
    pub fn step(&mut self, delta: isize) -> Option<(usize, usize)> {
        if self.total == 0 {
            return None;
        }
        let next = (self.index as isize + delta).rem_euclid(self.total as isize) as usize;
        debug!("image index {} -> {next} of {}", self.index, self.total);
        self.index = next;
        Some(self.progress())
    }

    pub fn progress(&self) -> (usize, usize) {
        (self.index, self.total)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_forward_and_back() {
        let mut c = ImageCursor::new(3);
        assert_eq!(c.step(1), Some((1, 3)));
        assert_eq!(c.step(1), Some((2, 3)));
        assert_eq!(c.step(1), Some((0, 3)));
        assert_eq!(c.step(-1), Some((2, 3)));
        assert_eq!(c.step(-7), Some((1, 3)));
    }

    #[test]
    fn empty_list_has_no_position() {
        let mut c = ImageCursor::default();
        assert_eq!(c.step(1), None);
        assert!(c.is_empty());
    }

    #[test]
    fn reset_starts_over() {
        let mut c = ImageCursor::new(5);
        c.step(3);
        c.reset(2);
        assert_eq!(c.progress(), (0, 2));
    }
}
