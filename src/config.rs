//! TOML-backed terminator configuration.
//!
//! Each present section yields one configured strategy:
//!
//! ```toml
//! [word_threshold]
//! words = { bye = 2, goodbye = 1 }
//! case_sensitive = false
//! mode = "any"
//!
//! [round_limit]
//! max_rounds = 10
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::TerminatorError;
use crate::round_limit::RoundLimitTerminator;
use crate::traits::{ResponseTerminator, TerminationMode};
use crate::word_threshold::WordThresholdTerminator;

/// Word-threshold strategy section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordThresholdConfig {
    /// Watched words and their per-word recurrence thresholds.
    pub words: BTreeMap<String, u32>,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub mode: TerminationMode,
}

/// Round-limit strategy section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundLimitConfig {
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

impl Default for RoundLimitConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
        }
    }
}

fn default_max_rounds() -> u32 {
    10
}

/// Top-level terminator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminatorConfig {
    #[serde(default)]
    pub word_threshold: Option<WordThresholdConfig>,
    #[serde(default)]
    pub round_limit: Option<RoundLimitConfig>,
}

impl TerminatorConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the default (empty) configuration.
    pub fn load(path: &Path) -> Result<Self, TerminatorError> {
        if !path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            TerminatorError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| TerminatorError::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Build the configured strategies, in declaration order.
    ///
    /// Construction-time validation failures (empty word spec, zero
    /// thresholds, zero round limit) propagate as config errors.
    pub fn build(&self) -> Result<Vec<Box<dyn ResponseTerminator>>, TerminatorError> {
        let mut terminators: Vec<Box<dyn ResponseTerminator>> = Vec::new();

        if let Some(wt) = &self.word_threshold {
            terminators.push(Box::new(WordThresholdTerminator::new(
                wt.words.clone(),
                wt.case_sensitive,
                wt.mode,
            )?));
        }

        if let Some(rl) = &self.round_limit {
            terminators.push(Box::new(RoundLimitTerminator::new(rl.max_rounds)?));
        }

        Ok(terminators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_from_toml() {
        let toml_str = r#"
            [word_threshold]
            words = { bye = 2, goodbye = 1 }
            case_sensitive = true
            mode = "all"

            [round_limit]
            max_rounds = 4
        "#;
        let config: TerminatorConfig = toml::from_str(toml_str).unwrap();

        let wt = config.word_threshold.as_ref().unwrap();
        assert_eq!(wt.words["bye"], 2);
        assert_eq!(wt.words["goodbye"], 1);
        assert!(wt.case_sensitive);
        assert_eq!(wt.mode, TerminationMode::All);
        assert_eq!(config.round_limit.as_ref().unwrap().max_rounds, 4);
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let toml_str = r#"
            [word_threshold]
            words = { bye = 2 }

            [round_limit]
        "#;
        let config: TerminatorConfig = toml::from_str(toml_str).unwrap();

        let wt = config.word_threshold.as_ref().unwrap();
        assert!(!wt.case_sensitive);
        assert_eq!(wt.mode, TerminationMode::Any);
        assert_eq!(config.round_limit.as_ref().unwrap().max_rounds, 10);
    }

    #[test]
    fn test_empty_config_builds_no_strategies() {
        let config: TerminatorConfig = toml::from_str("").unwrap();
        assert!(config.word_threshold.is_none());
        assert!(config.round_limit.is_none());
        assert!(config.build().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_mode_rejected_at_parse() {
        let toml_str = r#"
            [word_threshold]
            words = { bye = 2 }
            mode = "sometimes"
        "#;
        let result: Result<TerminatorConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_surfaces_validation_errors() {
        let toml_str = r#"
            [word_threshold]
            words = { bye = 0 }
        "#;
        let config: TerminatorConfig = toml::from_str(toml_str).unwrap();
        let err = config.build().err().unwrap();
        assert!(format!("{err}").contains("`bye`"));
    }

    #[test]
    fn test_build_produces_strategies_in_order() {
        let toml_str = r#"
            [word_threshold]
            words = { bye = 1 }

            [round_limit]
            max_rounds = 3
        "#;
        let config: TerminatorConfig = toml::from_str(toml_str).unwrap();
        let terminators = config.build().unwrap();
        assert_eq!(terminators.len(), 2);
        assert_eq!(terminators[0].name(), "word_threshold");
        assert_eq!(terminators[1].name(), "round_limit");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("__stopgate_test_missing__.toml");
        let _ = std::fs::remove_file(&path);
        let config = TerminatorConfig::load(&path).unwrap();
        assert!(config.word_threshold.is_none());
        assert!(config.round_limit.is_none());
    }

    #[test]
    fn test_load_reads_and_parses_file() {
        let path = std::env::temp_dir().join("__stopgate_test_config__.toml");
        std::fs::write(&path, "[round_limit]\nmax_rounds = 7\n").unwrap();

        let config = TerminatorConfig::load(&path).unwrap();
        assert_eq!(config.round_limit.unwrap().max_rounds, 7);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_reports_parse_failure() {
        let path = std::env::temp_dir().join("__stopgate_test_bad_config__.toml");
        std::fs::write(&path, "[word_threshold]\nwords = \"not a table\"\n").unwrap();

        let err = TerminatorConfig::load(&path).err().unwrap();
        assert!(format!("{err}").contains("failed to parse config"));

        let _ = std::fs::remove_file(&path);
    }
}
