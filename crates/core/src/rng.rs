//! RNG module - 7-bag random piece generation
//!
//! The bag holds at most 7 pending kinds. When it runs empty it is refilled with a
//! Fisher-Yates shuffle of all seven kinds, so every kind appears exactly once per
//! refill window and a repeat can only straddle a bag boundary.
//!
//! Also provides a simple LCG so a game can be replayed from its seed.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagRandomizer {
    /// Current shuffled bag
    bag: [PieceKind; 7],
    /// Index of the next kind to hand out; 7 means the bag is empty
    bag_index: usize,
    rng: SimpleRng,
}

impl BagRandomizer {
    /// Create a randomizer with an empty bag; the first draw fills it.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
            rng: SimpleRng::new(seed),
        }
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Pop the next kind, refilling the bag first if it is empty
    pub fn next_kind(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }
}

impl Iterator for BagRandomizer {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.next_kind())
    }
}

impl Default for BagRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for max in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = BagRandomizer::new(1);

        for _ in 0..20 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.next_kind()).collect();
            drawn.sort_by_key(|k| k.code());
            assert_eq!(drawn, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_no_repeat_within_a_bag() {
        let mut bag = BagRandomizer::new(777);
        for _ in 0..50 {
            let window: Vec<PieceKind> = (0..7).map(|_| bag.next_kind()).collect();
            for (i, a) in window.iter().enumerate() {
                assert!(!window[i + 1..].contains(a), "repeat inside a bag: {:?}", window);
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a: Vec<PieceKind> = BagRandomizer::new(42).take(21).collect();
        let b: Vec<PieceKind> = BagRandomizer::new(42).take(21).collect();
        assert_eq!(a, b);
    }
}
