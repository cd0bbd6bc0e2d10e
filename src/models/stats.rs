use serde::{Deserialize, Serialize};

/// Counters kept for the lifetime of the process.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub meditation_sessions_completed: u32,
    /// Never decreases; see [`SessionStats::submit_concentration_score`].
    pub best_concentration_score: u32,
}

impl SessionStats {
    pub fn record_meditation_session(&mut self) -> u32 {
        self.meditation_sessions_completed = self.meditation_sessions_completed.saturating_add(1);
        self.meditation_sessions_completed
    }

    /// Keeps the larger of the current best and `score`. Returns true when the best moved.
    pub fn submit_concentration_score(&mut self, score: u32) -> bool {
        if score > self.best_concentration_score {
            self.best_concentration_score = score;
            true
        } else {
            false
        }
    }
}
