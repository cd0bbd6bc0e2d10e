use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::i18n::Language;

pub const CONFIG_PATH_VAR: &str = "MINDWELL_CONFIG";
pub const LANGUAGE_VAR: &str = "MINDWELL_LANG";
pub const DEBUG_VAR: &str = "MINDWELL_DEBUG";
const DEFAULT_CONFIG_FILE: &str = "mindwell.json";

/// Start-up options. Read once; nothing is ever written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub language: String,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::En.code().into(),
            debug: false,
        }
    }
}

impl AppConfig {
    /// `$MINDWELL_CONFIG`, else `mindwell.json` in the working directory,
    /// then environment overrides.
    pub fn load() -> Result<Self> {
        let path = env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::from_file(&path)?;
        config.apply_env(|name| env::var(name).ok());
        Ok(config)
    }

    /// Missing file means defaults. A file that does not parse is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Malformed config in {}", path.display()))
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(language) = lookup(LANGUAGE_VAR) {
            self.language = language;
        }
        if let Some(value) = lookup(DEBUG_VAR) {
            self.debug = value == "1" || value.eq_ignore_ascii_case("true");
        }
    }

    /// Configured language, or English when the code is not supported.
    pub fn language(&self) -> Language {
        Language::from_code(&self.language).unwrap_or_default()
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        env::temp_dir().join(format!("mindwell_{name}_{suffix}.json"))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::from_file(&temp_path("missing")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.language(), Language::En);
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn reads_partial_file() {
        let path = temp_path("partial");
        fs::write(&path, r#"{ "language": "zh" }"#).expect("write config");

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.language(), Language::Zh);
        assert!(!config.debug);

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn malformed_file_is_reported_with_its_path() {
        let path = temp_path("malformed");
        fs::write(&path, "not json").expect("write config");

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains(&path.display().to_string()));

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = AppConfig::default();
        config.apply_env(|name| match name {
            LANGUAGE_VAR => Some("ru".into()),
            DEBUG_VAR => Some("TRUE".into()),
            _ => None,
        });
        assert_eq!(config.language(), Language::Ru);
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn unsupported_language_falls_back_to_english() {
        let config = AppConfig {
            language: "xx".into(),
            debug: false,
        };
        assert_eq!(config.language(), Language::En);
    }
}
