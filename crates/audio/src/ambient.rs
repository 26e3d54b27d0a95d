//! Background page rustling on a randomized interval.

use library_core::{scoped_rng, SimTick, TICKS_PER_SECOND};
use rand::Rng;

/// Object hash mixed into the scheduler's RNG domain.
const PAGE_TURN_DOMAIN: u64 = 0x7061_6765_5f74_7572;

/// Decides when the next page rustle plays.
///
/// Each wait is drawn uniformly from `[min_secs, max_secs]` using an RNG scoped
/// to the session seed and the tick the previous rustle fired on, so a replay
/// with the same seed rustles on the same ticks.
#[derive(Debug, Clone)]
pub struct PageTurnScheduler {
    seed: u64,
    min_ticks: u64,
    max_ticks: u64,
    next_at: SimTick,
}

impl PageTurnScheduler {
    /// Create a scheduler whose first rustle is drawn from `start`.
    ///
    /// Bounds are reordered when given backwards and never drop below one tick.
    pub fn new(seed: u64, min_secs: f32, max_secs: f32, start: SimTick) -> Self {
        let to_ticks = |secs: f32| ((secs.max(0.0) * TICKS_PER_SECOND as f32).round() as u64).max(1);
        let (lo, hi) = (to_ticks(min_secs), to_ticks(max_secs));
        let mut scheduler = Self {
            seed,
            min_ticks: lo.min(hi),
            max_ticks: lo.max(hi),
            next_at: start,
        };
        scheduler.next_at = scheduler.draw_after(start);
        scheduler
    }

    /// Tick the next rustle is due on.
    pub fn next_at(&self) -> SimTick {
        self.next_at
    }

    /// Returns true when a rustle should play at `tick`, then schedules the next one.
    pub fn update(&mut self, tick: SimTick) -> bool {
        if tick < self.next_at {
            return false;
        }
        self.next_at = self.draw_after(tick);
        true
    }

    fn draw_after(&self, tick: SimTick) -> SimTick {
        let mut rng = scoped_rng(self.seed, PAGE_TURN_DOMAIN, tick);
        tick.advance(rng.gen_range(self.min_ticks..=self.max_ticks))
    }
}
