#![warn(missing_docs)]
//! Core primitives shared across the workspace.

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Frame loop rate of the library session.
pub const TICKS_PER_SECOND: u64 = 20;

/// Wall-clock length of one tick.
pub const MILLIS_PER_TICK: u64 = 1000 / TICKS_PER_SECOND;

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }

    /// Tick reached `millis` milliseconds after this one, rounded up to a whole tick.
    pub fn after_millis(self, millis: u64) -> Self {
        self.advance(ticks_from_millis(millis))
    }

    /// Elapsed session time at this tick, in seconds.
    pub fn as_secs_f32(self) -> f32 {
        self.0 as f32 / TICKS_PER_SECOND as f32
    }
}

/// Convert a duration in milliseconds to a tick count, rounding up.
pub fn ticks_from_millis(millis: u64) -> u64 {
    millis.div_ceil(MILLIS_PER_TICK)
}

/// Helper to derive a reproducible RNG seeded by session + object + tick domains.
pub fn scoped_rng(session_seed: u64, object_hash: u64, tick: SimTick) -> StdRng {
    let seed = session_seed ^ object_hash ^ tick.0;
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn millis_round_up_to_whole_ticks() {
        assert_eq!(ticks_from_millis(0), 0);
        assert_eq!(ticks_from_millis(50), 1);
        assert_eq!(ticks_from_millis(51), 2);
        assert_eq!(ticks_from_millis(3000), 60);
        assert_eq!(SimTick(10).after_millis(4000), SimTick(90));
    }

    #[test]
    fn scoped_rng_is_reproducible() {
        let a: u64 = scoped_rng(7, 3, SimTick(5)).gen();
        let b: u64 = scoped_rng(7, 3, SimTick(5)).gen();
        assert_eq!(a, b);
    }
}
