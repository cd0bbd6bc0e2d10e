pub mod mood;
pub mod stats;

pub use mood::{MoodEntry, MoodLevel};
pub use stats::SessionStats;
