//! Deterministic pseudo-random numbers for covering generation.
//!
//! Coverings must be bit-for-bit reproducible from a seed, so the generator
//! never touches a global or OS-backed RNG. The only place fresh entropy
//! enters is [`fresh_seed`], and its result is recorded on the covering.

/// A fast, deterministic pseudo-random number generator.
///
/// Linear Congruential Generator (Knuth's MMIX constants) with the output
/// taken from the high bits, which are the well-mixed ones.
///
/// # Example
/// ```
/// use reveal::rng::Rng;
///
/// let mut rng = Rng::new(12345);
/// let value = rng.next_f64(); // in [0, 1)
/// assert!((0.0..1.0).contains(&value));
/// ```
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Same seed, same sequence. Always.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[min, max)`.
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}

/// Draw a seed from the thread-local OS-seeded generator.
pub fn fresh_seed() -> u64 {
    rand::random()
}
