// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),
}

/// How many feasibility violations a rejected flight reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Stop at the first failing rule.
    #[default]
    FirstFailure,
    /// Run every rule and report each failure in rule order.
    CollectAll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub validation_mode: ValidationMode,
    /// Prefix stripped from aircraft running costs before parsing.
    pub currency_symbol: String,
    /// Field delimiter for reference and booking files.
    pub delimiter: char,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::FirstFailure,
            currency_symbol: "£".to_string(),
            delimiter: ',',
        }
    }
}

impl EvaluationConfig {
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("org", "flightcost", "flightcost")
            .map(|dirs| dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("flightcost.json"))
    }

    /// Reads a JSON config. A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!(
                "No config file; using defaults — path={}",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            log::error!("Config parse error — path={} error={}", path.display(), e);
            e
        })?;
        config.delimiter_byte()?;
        log::info!(
            "Loaded config — path={} mode={:?}",
            path.display(),
            config.validation_mode
        );
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// csv only splits on single-byte delimiters.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ConfigError::InvalidDelimiter(self.delimiter))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = EvaluationConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, EvaluationConfig::default());
        assert_eq!(config.validation_mode, ValidationMode::FirstFailure);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "validation_mode": "collect_all" }"#).unwrap();

        let config = EvaluationConfig::load(&path).unwrap();
        assert_eq!(config.validation_mode, ValidationMode::CollectAll);
        assert_eq!(config.currency_symbol, "£");
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = EvaluationConfig {
            validation_mode: ValidationMode::CollectAll,
            currency_symbol: "$".to_string(),
            delimiter: ';',
        };

        config.save(&path).unwrap();
        assert_eq!(EvaluationConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "delimiter": "§" }"#).unwrap();

        assert!(matches!(
            EvaluationConfig::load(&path),
            Err(ConfigError::InvalidDelimiter('§'))
        ));
    }

    #[test]
    fn test_delimiter_byte() {
        let mut config = EvaluationConfig::default();
        assert_eq!(config.delimiter_byte().unwrap(), b',');
        config.delimiter = '→';
        assert!(matches!(
            config.delimiter_byte(),
            Err(ConfigError::InvalidDelimiter('→'))
        ));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            EvaluationConfig::load(&path),
            Err(ConfigError::Json(_))
        ));
    }
}
