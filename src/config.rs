// src/config.rs
//! Engine settings from TOML with environment overrides.
//!
//! Resolution order:
//! 1) `$SENTILEAK_CONFIG_PATH` (must exist when set)
//! 2) `config/sentileak.toml` when present
//! 3) built-in defaults
//!
//! Then `SENTILEAK_LANGUAGE`, `SENTILEAK_LEXICON_DIR` and `SENTILEAK_ELIGIBILITY`
//! override the file values.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::annotate::EligibilityPolicy;
use crate::error::SentimentError;
use crate::lexicon::{DEFAULT_LANGUAGE, DEFAULT_LEXICON_DIR};
use crate::nlp::pipeline::DEFAULT_MAX_TEXT_BYTES;

pub const DEFAULT_CONFIG_PATH: &str = "config/sentileak.toml";

pub const ENV_CONFIG_PATH: &str = "SENTILEAK_CONFIG_PATH";
pub const ENV_LANGUAGE: &str = "SENTILEAK_LANGUAGE";
pub const ENV_LEXICON_DIR: &str = "SENTILEAK_LEXICON_DIR";
pub const ENV_ELIGIBILITY: &str = "SENTILEAK_ELIGIBILITY";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lexicon subdirectory, e.g. `es`.
    pub language: String,
    /// Root holding one directory per language.
    pub lexicon_dir: PathBuf,
    pub eligibility: EligibilityPolicy,
    /// Larger inputs are rejected by the pipeline.
    pub max_text_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            lexicon_dir: PathBuf::from(DEFAULT_LEXICON_DIR),
            eligibility: EligibilityPolicy::default(),
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
        }
    }
}

impl Settings {
    /// Resolve settings from env + files (see module docs).
    pub fn load() -> Result<Self> {
        let mut settings = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!(
                    "{ENV_CONFIG_PATH} points to non-existent path {}",
                    pb.display()
                ));
            }
            Self::from_file(&pb)?
        } else {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Self::from_file(&default)?
            } else {
                Self::default()
            }
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing settings in {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(lang) = non_empty_env(ENV_LANGUAGE) {
            self.language = lang;
        }
        if let Some(dir) = non_empty_env(ENV_LEXICON_DIR) {
            self.lexicon_dir = PathBuf::from(dir);
        }
        if let Some(raw) = non_empty_env(ENV_ELIGIBILITY) {
            self.eligibility = raw
                .parse()
                .map_err(|e: String| SentimentError::config(format!("{ENV_ELIGIBILITY}: {e}")))?;
        }
        Ok(self.validate()?)
    }

    pub fn validate(&self) -> Result<(), SentimentError> {
        if self.language.trim().is_empty() {
            return Err(SentimentError::config("language must not be empty"));
        }
        if self.max_text_bytes == 0 {
            return Err(SentimentError::config("max_text_bytes must be positive"));
        }
        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn clear_env() {
        for k in [ENV_CONFIG_PATH, ENV_LANGUAGE, ENV_LEXICON_DIR, ENV_ELIGIBILITY] {
            env::remove_var(k);
        }
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let s = Settings::from_toml_str(r#"eligibility = "adjective_non_stop""#).unwrap();
        assert_eq!(s.eligibility, EligibilityPolicy::AdjectiveNonStop);
        assert_eq!(s.language, "es");
        assert_eq!(s.lexicon_dir, PathBuf::from("resources"));
        assert_eq!(s.max_text_bytes, DEFAULT_MAX_TEXT_BYTES);
    }

    #[test]
    fn rejects_unknown_policy_and_empty_language() {
        assert!(Settings::from_toml_str(r#"eligibility = "verbs""#).is_err());
        assert!(Settings::from_toml_str(r#"language = " ""#).is_err());
        assert!(Settings::from_toml_str("max_text_bytes = 0").is_err());
    }

    #[test]
    fn invalid_values_surface_as_config_errors() {
        let err = Settings::from_toml_str("max_text_bytes = 0").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SentimentError>(),
            Some(SentimentError::Config { message }) if message.contains("max_text_bytes")
        ));

        let bad = Settings {
            language: String::new(),
            ..Settings::default()
        };
        assert!(matches!(bad.validate(), Err(SentimentError::Config { .. })));
        assert!(Settings::default().validate().is_ok());
    }

    #[serial_test::serial]
    #[test]
    fn env_path_then_env_overrides() {
        clear_env();
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sentileak.toml");
        fs::write(
            &path,
            "language = \"es\"\nlexicon_dir = \"/opt/lexicons\"\nmax_text_bytes = 4096\n",
        )
        .unwrap();

        env::set_var(ENV_CONFIG_PATH, path.display().to_string());
        let s = Settings::load().unwrap();
        assert_eq!(s.lexicon_dir, PathBuf::from("/opt/lexicons"));
        assert_eq!(s.max_text_bytes, 4096);

        env::set_var(ENV_LEXICON_DIR, "custom_data");
        env::set_var(ENV_ELIGIBILITY, "adjective_non_stop");
        let s = Settings::load().unwrap();
        assert_eq!(s.lexicon_dir, PathBuf::from("custom_data"));
        assert_eq!(s.eligibility, EligibilityPolicy::AdjectiveNonStop);

        env::set_var(ENV_ELIGIBILITY, "nonsense");
        let err = Settings::load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SentimentError>(),
            Some(SentimentError::Config { .. })
        ));

        clear_env();
    }

    #[serial_test::serial]
    #[test]
    fn missing_env_path_is_an_error() {
        clear_env();
        env::set_var(ENV_CONFIG_PATH, "/definitely/not/here.toml");
        assert!(Settings::load().is_err());
        clear_env();
    }
}
