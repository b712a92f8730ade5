//! Deterministic dice.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rolls
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use ludo_engine::core::DiceRng;
//!
//! let mut a = DiceRng::new(42);
//! let mut b = DiceRng::new(42);
//! assert_eq!(a.roll(6), b.roll(6));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic dice source.
///
/// Uses ChaCha8 for speed while keeping the sequence reproducible from
/// the seed, so a match can be replayed or checkpointed mid-game.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DiceRng {
    /// Create a new dice source with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Roll a die with `faces` sides, returning `1..=faces`.
    pub fn roll(&mut self, faces: u8) -> u8 {
        self.inner.gen_range(1..=faces)
    }

    /// Pick an index in `0..len`. Used by simulated players.
    pub fn pick(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> DiceRngState {
        DiceRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &DiceRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable dice state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = DiceRng::new(42);
        let mut rng2 = DiceRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll(6), rng2.roll(6));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = DiceRng::new(1);
        let mut rng2 = DiceRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.roll(6)).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.roll(6)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_roll_range() {
        let mut rng = DiceRng::new(7);
        let mut seen = [false; 6];

        for _ in 0..500 {
            let face = rng.roll(6);
            assert!((1..=6).contains(&face));
            seen[(face - 1) as usize] = true;
        }

        // Every face shows up
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_state_restore() {
        let mut rng = DiceRng::new(42);
        for _ in 0..37 {
            rng.roll(6);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll(6)).collect();

        let mut restored = DiceRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll(6)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_shuffle_is_seeded_permutation() {
        let mut a = [1u8, 2, 3, 4, 5, 6, 7, 8, 9];
        let mut b = a;
        DiceRng::new(5).shuffle(&mut a);
        DiceRng::new(5).shuffle(&mut b);
        assert_eq!(a, b);

        let mut sorted = a;
        sorted.sort_unstable();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_state_serde() {
        let state = DiceRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: DiceRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
