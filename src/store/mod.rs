use chrono::Utc;
use log::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{MoodEntry, MoodLevel, SessionStats};

/// Shown by the mood chart before anything has been recorded.
pub const PLACEHOLDER_MOODS: [u8; 7] = [3, 4, 2, 5, 3, 4, 4];

/// In-memory mood history and session counters, owned by the app context.
///
/// Nothing here outlives the process.
#[derive(Debug, Default)]
pub struct WellnessStore {
    moods: Vec<MoodEntry>,
    stats: SessionStats,
}

impl WellnessStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_mood(&mut self, level: u8, note: impl Into<String>) -> Result<MoodEntry> {
        let level = MoodLevel::new(level)?;
        let entry = MoodEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level,
            note: note.into(),
        };
        debug!("Recorded mood {} ({})", level.value(), entry.id);
        self.moods.push(entry.clone());
        Ok(entry)
    }

    /// Levels of the last `n` entries, oldest first.
    pub fn recent_moods(&self, n: usize) -> Vec<u8> {
        if self.moods.is_empty() {
            return PLACEHOLDER_MOODS.to_vec();
        }

        let start = self.moods.len().saturating_sub(n);
        self.moods[start..]
            .iter()
            .map(|entry| entry.level.value())
            .collect()
    }

    pub fn mood_history(&self) -> &[MoodEntry] {
        &self.moods
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn record_meditation_session(&mut self) -> u32 {
        self.stats.record_meditation_session()
    }

    pub fn submit_concentration_score(&mut self, score: u32) -> bool {
        self.stats.submit_concentration_score(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MindWellError;

    #[test]
    fn record_mood_keeps_the_level_and_note() {
        let mut store = WellnessStore::new();
        for level in 1..=5u8 {
            let entry = store.record_mood(level, "after lunch").unwrap();
            assert_eq!(entry.level.value(), level);
            assert_eq!(entry.note, "after lunch");
        }
        assert_eq!(store.mood_history().len(), 5);
    }

    #[test]
    fn record_mood_rejects_out_of_range_levels() {
        let mut store = WellnessStore::new();
        assert!(matches!(
            store.record_mood(0, ""),
            Err(MindWellError::Validation(_))
        ));
        assert!(matches!(
            store.record_mood(6, ""),
            Err(MindWellError::Validation(_))
        ));
        assert!(store.mood_history().is_empty());
    }

    #[test]
    fn empty_store_reports_placeholder_moods() {
        let store = WellnessStore::new();
        assert_eq!(store.recent_moods(7), vec![3, 4, 2, 5, 3, 4, 4]);
    }

    #[test]
    fn recent_moods_are_chronological_and_bounded() {
        let mut store = WellnessStore::new();
        for level in [1, 2, 3] {
            store.record_mood(level, "").unwrap();
        }
        assert_eq!(store.recent_moods(7), vec![1, 2, 3]);
        assert_eq!(store.recent_moods(2), vec![2, 3]);
        assert!(store.recent_moods(0).is_empty());
    }

    #[test]
    fn best_concentration_score_never_decreases() {
        let mut store = WellnessStore::new();
        assert!(store.submit_concentration_score(800));
        assert!(!store.submit_concentration_score(300));
        assert_eq!(store.stats().best_concentration_score, 800);
        assert!(store.submit_concentration_score(1700));
        assert_eq!(store.stats().best_concentration_score, 1700);
    }

    #[test]
    fn meditation_sessions_are_counted() {
        let mut store = WellnessStore::new();
        assert_eq!(store.record_meditation_session(), 1);
        assert_eq!(store.record_meditation_session(), 2);
        assert_eq!(store.stats().meditation_sessions_completed, 2);
    }
}
