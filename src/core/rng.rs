//! Deterministic random number generation for a table.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical shuffles, so a whole
//!   game can be replayed from its seed.
//! - **Interior inserts**: picks positions strictly between the bottom and
//!   the top of a pile, used when cards are pushed back into the draw pile.
//!
//! ```
//! use rust_uno::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut left = vec![1, 2, 3, 4, 5];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backing every random decision of a session.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Pick an insert position for a pile of `len` cards that is neither
    /// the bottom (index 0) nor the top (index `len`).
    ///
    /// Piles with fewer than two cards have no interior; the card goes to
    /// the bottom so it is at least not drawn next.
    pub fn interior_position(&mut self, len: usize) -> usize {
        if len < 2 {
            0
        } else {
            self.inner.gen_range(1..len)
        }
    }

    /// Shuffle a slice in place (uniform permutation).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (1..=20).collect();
        let original = data.clone();

        rng.shuffle(&mut data);

        // Same elements, different order (overwhelmingly likely)
        assert_ne!(data, original);
        data.sort_unstable();
        assert_eq!(data, original);
    }

    #[test]
    fn test_interior_position_bounds() {
        let mut rng = GameRng::new(7);

        for len in 2..40 {
            for _ in 0..50 {
                let pos = rng.interior_position(len);
                assert!(pos >= 1, "position {pos} is the bottom of {len}");
                assert!(pos < len, "position {pos} is the top of {len}");
            }
        }
    }

    #[test]
    fn test_interior_position_small_piles() {
        let mut rng = GameRng::new(7);
        assert_eq!(rng.interior_position(0), 0);
        assert_eq!(rng.interior_position(1), 0);
    }
}
