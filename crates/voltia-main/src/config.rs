// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Voltia.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use voltia_core::AnalysisConfig;
use voltia_i18n::Language;

/// Environment variable holding the config file path when `--config` is absent
pub const CONFIG_ENV: &str = "VOLTIA_CONFIG";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote price service
    #[serde(default)]
    pub service: ServiceConfig,

    /// Engine tunables
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Report rendering
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the price API, e.g. `http://localhost:8080/api/v1/price`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub language: Language,

    /// chrono format string used for dates in rating sentences
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1/price".to_owned()
}

fn default_timeout_secs() -> u64 {
    voltia_client::DEFAULT_TIMEOUT_SECS
}

fn default_date_format() -> String {
    "%d/%m".to_owned()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            date_format: default_date_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, then `VOLTIA_CONFIG`, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => Self::from_file(&path),
            None => {
                warn!("No configuration file given, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;

        let base_url = self.service.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!(
                "service.base_url must be an http(s) URL, got '{}'",
                self.service.base_url
            );
        }
        if self.service.timeout_secs == 0 {
            anyhow::bail!("service.timeout_secs must be greater than 0");
        }

        if self.display.date_format.is_empty()
            || StrftimeItems::new(&self.display.date_format).any(|item| item == Item::Error)
        {
            anyhow::bail!(
                "display.date_format is not a valid format string: '{}'",
                self.display.date_format
            );
        }

        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use voltia_core::RatingBasis;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.service.base_url, "http://localhost:8080/api/v1/price");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.analysis.window_hours, 3);
        assert_eq!(config.display.language, Language::English);
        assert_eq!(config.display.date_format, "%d/%m");
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
[service]
base_url = "https://prices.example.com/api/v1/price"
timeout_secs = 5

[analysis]
window_hours = 2
similarity_tolerance = 0.01
rating_basis = "cheapest_period"

[display]
language = "es"
date_format = "%d/%m/%Y"
"#,
        );

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.service.timeout_secs, 5);
        assert_eq!(config.analysis.window_hours, 2);
        assert_eq!(config.analysis.rating_basis, RatingBasis::CheapestPeriod);
        assert!((config.analysis.rating_tolerance - 0.02).abs() < f64::EPSILON);
        assert_eq!(config.display.language, Language::Spanish);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = write_config("[display]\nlanguage = \"es\"\n");
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.display.language, Language::Spanish);
        assert_eq!(config.service.timeout_secs, 10);
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::from_file(&dir.path().join("missing.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_language_rejected() {
        let file = write_config("[display]\nlanguage = \"cs\"\n");
        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_invalid_analysis_rejected() {
        let file = write_config("[analysis]\nwindow_hours = 0\n");
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("window_hours"));
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = AppConfig::default();
        config.service.base_url = "localhost:8080".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_timeout() {
        let mut config = AppConfig::default();
        config.service.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_date_format() {
        let mut config = AppConfig::default();
        config.display.date_format = "%Q".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.service.base_url, deserialized.service.base_url);
        assert_eq!(config.analysis, deserialized.analysis);
    }
}
