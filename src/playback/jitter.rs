use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Tick-delay strategy for the drip-feed scheduler. Injectable so tests can
/// pin the delay instead of sampling an RNG.
pub trait Jitter: Send {
    fn next_delay(&mut self, speed_ms: u64) -> Duration;
}

/// Uniform draw from `[speed/2, 1.5*speed)` — organic rather than metronomic.
pub struct UniformJitter {
    rng: StdRng,
}

impl UniformJitter {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for UniformJitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Jitter for UniformJitter {
    fn next_delay(&mut self, speed_ms: u64) -> Duration {
        let lo = speed_ms / 2;
        let hi = (speed_ms + speed_ms / 2).max(lo + 1);
        Duration::from_millis(self.rng.gen_range(lo..hi))
    }
}

/// Constant delay, for tests.
pub struct FixedJitter(pub u64);

impl Jitter for FixedJitter {
    fn next_delay(&mut self, _speed_ms: u64) -> Duration {
        Duration::from_millis(self.0)
    }
}
