use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const ARM_DELAY_MIN_SECS: f64 = 2.0;
pub const ARM_DELAY_MAX_SECS: f64 = 5.0;

/// Where the game gets its wait before each target lights up.
pub trait DelaySource {
    fn next_delay(&mut self) -> Duration;
}

/// Uniform delays in `[2, 5)` seconds, drawn fresh every round.
#[derive(Debug, Clone)]
pub struct RandomDelays<R = StdRng> {
    rng: R,
}

impl RandomDelays<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomDelays<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DelaySource for RandomDelays<R> {
    fn next_delay(&mut self) -> Duration {
        Duration::from_secs_f64(self.rng.gen_range(ARM_DELAY_MIN_SECS..ARM_DELAY_MAX_SECS))
    }
}

/// Replays a fixed list of delays, wrapping at the end. Useful wherever the
/// round timing has to be known up front.
#[derive(Debug, Clone)]
pub struct SequenceDelays {
    delays: Vec<Duration>,
    cursor: usize,
}

impl SequenceDelays {
    /// Falls back to the shortest legal delay when `delays` is empty.
    pub fn new(delays: Vec<Duration>) -> Self {
        let delays = if delays.is_empty() {
            vec![Duration::from_secs_f64(ARM_DELAY_MIN_SECS)]
        } else {
            delays
        };
        Self { delays, cursor: 0 }
    }
}

impl DelaySource for SequenceDelays {
    fn next_delay(&mut self) -> Duration {
        let delay = self.delays[self.cursor % self.delays.len()];
        self.cursor += 1;
        delay
    }
}
