pub mod runtime;
pub mod scheduler;

pub use runtime::{FiredTimer, TokioScheduler};
pub use scheduler::{ManualScheduler, Scheduler, TimerKey};
