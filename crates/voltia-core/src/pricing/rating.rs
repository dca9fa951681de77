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
use tracing::debug;
use voltia_types::{DayRating, Price};

use super::calculate_average;
use super::window::find_cheapest_period;
use crate::config::AnalysisConfig;
use crate::error::Result;

/// Which mean of the day is compared against the baseline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBasis {
    /// Mean of every hour of the day
    #[default]
    DayMean,
    /// Mean of the day's cheapest window
    CheapestPeriod,
}

/// Classify a mean price against a baseline.
///
/// `GOOD` below `baseline - tolerance`, `BAD` above `baseline + tolerance`,
/// `NORMAL` in between with both edges included. Returns `None` when either
/// input is not a finite number, so missing data never reads as `NORMAL`.
#[must_use]
pub fn classify(period_mean: f64, baseline_mean: f64, tolerance: f64) -> Option<DayRating> {
    if !period_mean.is_finite() || !baseline_mean.is_finite() || !tolerance.is_finite() {
        return None;
    }

    let low_line = baseline_mean - tolerance;
    let high_line = baseline_mean + tolerance;

    if period_mean < low_line {
        Some(DayRating::Good)
    } else if period_mean > high_line {
        Some(DayRating::Bad)
    } else {
        Some(DayRating::Normal)
    }
}

/// Rate a day against a baseline using the configured basis.
///
/// `None` when there is no baseline, no prices, or (for
/// [`RatingBasis::CheapestPeriod`]) no full cheapest window.
pub fn rate_day(
    series: &[Price],
    baseline: Option<f64>,
    config: &AnalysisConfig,
) -> Result<Option<DayRating>> {
    let Some(baseline) = baseline else {
        debug!("No baseline available, day rating skipped");
        return Ok(None);
    };

    let mean = match config.rating_basis {
        RatingBasis::DayMean => calculate_average(series),
        RatingBasis::CheapestPeriod => {
            let window = find_cheapest_period(series, config.window_hours)?;
            window.mean()
        }
    };

    let Some(mean) = mean else {
        debug!("No prices to rate");
        return Ok(None);
    };

    let rating = classify(mean, baseline, config.rating_tolerance);
    debug!(
        "Day rating {:?}: mean {:.5} vs baseline {:.5} (±{})",
        rating, mean, baseline, config.rating_tolerance
    );
    Ok(rating)
}
