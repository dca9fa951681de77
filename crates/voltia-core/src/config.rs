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

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::pricing::rating::RatingBasis;

/// Tunables of the analysis engine.
///
/// Every field has a default so a partial `[analysis]` TOML table is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Width in hours of every cheap/expensive window
    #[serde(default = "default_window_hours")]
    pub window_hours: usize,

    /// Max difference of mean prices for a second cheap period to be shown
    #[serde(default = "default_similarity_tolerance")]
    pub similarity_tolerance: f64,

    /// Half-width of the NORMAL band around the baseline
    #[serde(default = "default_rating_tolerance")]
    pub rating_tolerance: f64,

    /// Which mean is compared against the baseline
    #[serde(default)]
    pub rating_basis: RatingBasis,

    /// Minutes after the start of a window's last hour until it counts as elapsed
    #[serde(default = "default_expiry_margin_minutes")]
    pub expiry_margin_minutes: u32,
}

fn default_window_hours() -> usize {
    3
}

fn default_similarity_tolerance() -> f64 {
    0.02
}

fn default_rating_tolerance() -> f64 {
    0.02
}

fn default_expiry_margin_minutes() -> u32 {
    59
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_hours: default_window_hours(),
            similarity_tolerance: default_similarity_tolerance(),
            rating_tolerance: default_rating_tolerance(),
            rating_basis: RatingBasis::default(),
            expiry_margin_minutes: default_expiry_margin_minutes(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_hours == 0 {
            return Err(AnalysisError::InvalidConfig(
                "analysis.window_hours must be at least 1".to_owned(),
            ));
        }
        if !self.similarity_tolerance.is_finite() || self.similarity_tolerance < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "analysis.similarity_tolerance must be a non-negative number, got {}",
                self.similarity_tolerance
            )));
        }
        if !self.rating_tolerance.is_finite() || self.rating_tolerance < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "analysis.rating_tolerance must be a non-negative number, got {}",
                self.rating_tolerance
            )));
        }
        if self.expiry_margin_minutes > 59 {
            return Err(AnalysisError::InvalidConfig(format!(
                "analysis.expiry_margin_minutes must be within 0..=59, got {}",
                self.expiry_margin_minutes
            )));
        }
        Ok(())
    }

    /// Expiry margin as a duration
    #[must_use]
    pub fn expiry_margin(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.expiry_margin_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();

        assert_eq!(config.window_hours, 3);
        assert!((config.similarity_tolerance - 0.02).abs() < f64::EPSILON);
        assert!((config.rating_tolerance - 0.02).abs() < f64::EPSILON);
        assert_eq!(config.rating_basis, RatingBasis::DayMean);
        assert_eq!(config.expiry_margin_minutes, 59);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AnalysisConfig = toml::from_str(
            r#"
            rating_tolerance = 0.05
            rating_basis = "cheapest_period"
            "#,
        )
        .unwrap();

        assert_eq!(config.window_hours, 3);
        assert!((config.rating_tolerance - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.rating_basis, RatingBasis::CheapestPeriod);
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let config = AnalysisConfig {
            window_hours: 0,
            ..AnalysisConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_negative_tolerance_is_rejected() {
        let config = AnalysisConfig {
            rating_tolerance: -0.01,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AnalysisConfig {
            expiry_margin_minutes: 60,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
