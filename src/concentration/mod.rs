pub mod delay;
pub mod state;

pub use delay::{DelaySource, RandomDelays, SequenceDelays, ARM_DELAY_MAX_SECS, ARM_DELAY_MIN_SECS};
pub use state::{GameEffect, GameUpdate, ReactionGame, RoundState, SignalOutcome, ARMED_TIMEOUT};
