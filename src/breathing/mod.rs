pub mod phase;
pub mod state;

pub use phase::BreathPhase;
pub use state::{format_elapsed, BreathCycle, BreathEffect, BreathStatus, BreathUpdate, PhaseSnapshot};
