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

use tracing::info;
use voltia_types::{DailyPriceInfo, Price};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::pricing::periods::find_two_cheap_periods;
use crate::pricing::rating::rate_day;
use crate::pricing::sorted_by_date;
use crate::pricing::window::find_most_expensive_period;

/// Analyze one day of hourly prices.
///
/// Produces the same payload the price service serves for a day: the
/// chronologically sorted prices, up to two cheap periods, the most expensive
/// period and the day rating against `baseline`. Empty periods are left out.
pub fn analyze_day(
    series: &[Price],
    baseline: Option<f64>,
    config: &AnalysisConfig,
) -> Result<DailyPriceInfo> {
    config.validate()?;

    let prices = sorted_by_date(series);
    let width = config.window_hours;

    let (first, second) = find_two_cheap_periods(&prices, width, config.similarity_tolerance)?;
    let cheapest_periods: Vec<_> = [first, second]
        .into_iter()
        .filter(|w| !w.is_empty())
        .collect();

    let expensive = find_most_expensive_period(&prices, width)?;
    let expensive_periods: Vec<_> = std::iter::once(expensive)
        .filter(|w| !w.is_empty())
        .collect();

    let day_rating = rate_day(&prices, baseline, config)?;

    info!(
        "Analyzed {} prices: {} cheap period(s), {} expensive period(s), rating {}",
        prices.len(),
        cheapest_periods.len(),
        expensive_periods.len(),
        day_rating.map_or_else(|| "unavailable".to_owned(), |r| r.to_string())
    );

    Ok(DailyPriceInfo {
        day_rating,
        prices,
        cheapest_periods,
        expensive_periods,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use chrono::NaiveDate;
    use voltia_types::DayRating;

    fn day(price: impl Fn(u32) -> f64) -> Vec<Price> {
        let date = NaiveDate::from_ymd_opt(2023, 5, 13).unwrap();
        (0..24)
            .rev()
            .map(|h| Price::new(date.and_hms_opt(h, 0, 0).unwrap(), price(h)))
            .collect()
    }

    #[test]
    fn test_analyze_day() {
        let series = day(|h| match h {
            3..=5 => 0.02,
            18..=20 => 0.4,
            _ => 0.2,
        });

        let info = analyze_day(&series, Some(0.25), &AnalysisConfig::default()).unwrap();

        assert_eq!(info.prices.first().unwrap().hour(), 0);
        assert_eq!(info.cheapest_periods.len(), 1);
        assert_eq!(info.cheapest_periods[0].first().unwrap().hour(), 3);
        assert_eq!(info.expensive_periods.len(), 1);
        assert_eq!(info.expensive_periods[0].first().unwrap().hour(), 18);
        assert_eq!(info.day_rating, Some(DayRating::Good));
    }

    #[test]
    fn test_analyze_empty_day() {
        let info = analyze_day(&[], Some(0.1), &AnalysisConfig::default()).unwrap();

        assert!(info.is_empty());
        assert!(info.cheapest_periods.is_empty());
        assert!(info.expensive_periods.is_empty());
        assert_eq!(info.day_rating, None);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = AnalysisConfig {
            window_hours: 0,
            ..AnalysisConfig::default()
        };

        assert!(matches!(
            analyze_day(&day(|_| 0.1), None, &config),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }
}
