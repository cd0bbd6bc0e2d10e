use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MindWellError, Result};

/// A mood rating on the 1 (very bad) to 5 (excellent) scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodLevel(u8);

impl MoodLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(MindWellError::Validation(format!(
                "mood level must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                level
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Translation key for the level's caption.
    pub fn label_key(self) -> &'static str {
        match self.0 {
            1 => "very_bad",
            2 => "bad",
            3 => "okay",
            4 => "good",
            _ => "excellent",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self.0 {
            1 => "😢",
            2 => "😟",
            3 => "😐",
            4 => "😊",
            _ => "😄",
        }
    }
}

impl TryFrom<u8> for MoodLevel {
    type Error = MindWellError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<MoodLevel> for u8 {
    fn from(level: MoodLevel) -> Self {
        level.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: MoodLevel,
    pub note: String,
}
