//! Fisher–Yates shuffle.
//!
//! Walks from the last index down to 1 and swaps each slot with a uniformly
//! chosen slot in `[0, i]`. Given an unbiased source this yields every
//! permutation with equal probability, which a sort-by-random-key does not.

use rand::Rng;

/// Shuffle `items` in place using `rng`.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
