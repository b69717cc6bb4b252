//! Seeded random streams.
//!
//! Every random decision is drawn from a generator derived from
//! `(seed, stream, trial)`, so replaying a history reproduces the same draws
//! and one stream never shifts another. Presentation order in particular is
//! drawn from its own stream and cannot change which staircase value moves.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::types::Side;

/// Independent purposes randomness is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Drawing staircase start values.
    Start,
    /// Deciding which side shows which value.
    Presentation,
    /// Deciding which value moves in a dual-converging staircase.
    Movement,
}

impl Stream {
    fn salt(self) -> u64 {
        match self {
            Stream::Start => 0x5354_4152_5400_0001,
            Stream::Presentation => 0x5052_4553_0000_0002,
            Stream::Movement => 0x4d4f_5645_0000_0003,
        }
    }
}

/// SplitMix64 finalizer.
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Generator for one `(stream, trial)` slot of a session seeded with `seed`.
pub fn trial_rng(seed: u64, stream: Stream, trial: usize) -> Xoshiro256PlusPlus {
    let key = mix64(seed ^ stream.salt()) ^ mix64((trial as u64).wrapping_add(0x9e37_79b9_7f4a_7c15));
    Xoshiro256PlusPlus::seed_from_u64(mix64(key))
}

/// Fair coin for `(stream, trial)`.
pub fn coin_flip(seed: u64, stream: Stream, trial: usize) -> bool {
    trial_rng(seed, stream, trial).random_bool(0.5)
}

/// Side that shows the first of the two values on `trial`.
pub fn presentation_side(seed: u64, trial: usize) -> Side {
    if coin_flip(seed, Stream::Presentation, trial) {
        Side::Left
    } else {
        Side::Right
    }
}

/// Uniformly pick an element of `choices`; `None` when empty.
pub fn pick<T: Copy>(seed: u64, stream: Stream, slot: usize, choices: &[T]) -> Option<T> {
    if choices.is_empty() {
        return None;
    }
    let idx = trial_rng(seed, stream, slot).random_range(0..choices.len());
    Some(choices[idx])
}
