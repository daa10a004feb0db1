//! Deterministic random number generation for pile shuffles.
//!
//! The same seed always produces the same shuffle, so a table can be replayed
//! from a seed and the recorded sequence of operations. The generator state
//! can be captured and restored in O(1).
//!
//! ```
//! use card_table::core::TableRng;
//!
//! let mut a = TableRng::new(42);
//! let mut b = TableRng::new(42);
//!
//! let mut xs = [1, 2, 3, 4, 5, 6];
//! let mut ys = xs;
//! a.shuffle(&mut xs);
//! b.shuffle(&mut ys);
//! assert_eq!(xs, ys);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct TableRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl TableRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> TableRngState {
        TableRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &TableRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position, so capture and restore cost the same no
/// matter how many shuffles have happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = TableRng::new(42);
        let mut rng2 = TableRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = TableRng::new(7);
        let mut cards: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut cards);

        let mut sorted = cards.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
        assert_ne!(cards, sorted);
    }

    #[test]
    fn test_state_restore_continues_sequence() {
        let mut rng = TableRng::new(99);
        for _ in 0..10 {
            rng.gen_range_usize(0..100);
        }

        let saved = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_range_usize(0..100)).collect();

        let mut restored = TableRng::from_state(&saved);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_range_usize(0..100)).collect();

        assert_eq!(expected, actual);
        assert_eq!(restored.seed(), 99);
    }

    #[test]
    fn test_state_serde() {
        let rng = TableRng::new(5);
        let json = serde_json::to_string(&rng.state()).unwrap();
        let state: TableRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, rng.state());
    }
}
