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
use voltia_types::{Price, Window};

use super::{ensure_finite, sorted_by_date};
use crate::error::{AnalysisError, Result};

/// Which extremum a window search optimizes for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremumMode {
    /// Lowest price sum
    Min,
    /// Highest price sum
    Max,
}

impl ExtremumMode {
    fn improves(self, candidate: f64, best: f64) -> bool {
        match self {
            Self::Min => candidate < best,
            Self::Max => candidate > best,
        }
    }
}

/// Find the contiguous window of `width` hours with the lowest or highest price sum.
///
/// The series is sorted chronologically on a private copy first. Ties go to the
/// earliest window. A series shorter than `width` yields an empty window.
///
/// # Arguments
/// * `series` - Hourly prices in any order
/// * `width` - Window length in hours, at least 1
/// * `mode` - Whether to minimize or maximize the price sum
pub fn find_extremum_window(series: &[Price], width: usize, mode: ExtremumMode) -> Result<Window> {
    if width == 0 {
        return Err(AnalysisError::InvalidWindowWidth(width));
    }
    if series.len() < width {
        debug!(
            "Not enough prices for a {}h window ({} available)",
            width,
            series.len()
        );
        return Ok(Window::empty());
    }
    ensure_finite(series)?;

    let sorted = sorted_by_date(series);

    let mut best_start = 0;
    let mut best_sum = sorted[..width].iter().map(|p| p.price).sum::<f64>();
    for (start, candidate) in sorted.windows(width).enumerate().skip(1) {
        let sum: f64 = candidate.iter().map(|p| p.price).sum();
        if mode.improves(sum, best_sum) {
            best_sum = sum;
            best_start = start;
        }
    }

    let window = Window::new(sorted[best_start..best_start + width].to_vec());
    if let (Some(first), Some(last)) = (window.first(), window.last()) {
        debug!(
            "{:?} {}h window: {} - {} (sum {:.5})",
            mode,
            width,
            first.date_time.format("%Y-%m-%d %H:%M"),
            last.date_time.format("%H:%M"),
            best_sum
        );
    }
    Ok(window)
}

/// Cheapest window of `width` hours
pub fn find_cheapest_period(series: &[Price], width: usize) -> Result<Window> {
    find_extremum_window(series, width, ExtremumMode::Min)
}

/// Most expensive window of `width` hours
pub fn find_most_expensive_period(series: &[Price], width: usize) -> Result<Window> {
    find_extremum_window(series, width, ExtremumMode::Max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn series(prices: &[f64]) -> Vec<Price> {
        (0_u32..)
            .zip(prices)
            .map(|(h, &p)| Price::new(at(h), p))
            .collect()
    }

    fn hours(window: &Window) -> Vec<u32> {
        window.iter().map(Price::hour).collect()
    }

    #[test]
    fn test_empty_series_yields_empty_window() {
        assert!(find_cheapest_period(&[], 3).unwrap().is_empty());
        assert!(find_most_expensive_period(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_short_series_yields_empty_window() {
        let prices = series(&[1.0]);

        assert!(find_cheapest_period(&prices, 3).unwrap().is_empty());
        assert!(find_most_expensive_period(&prices, 3).unwrap().is_empty());
    }

    #[test]
    fn test_zero_width_is_an_error() {
        let prices = series(&[1.0, 2.0]);

        assert_eq!(
            find_cheapest_period(&prices, 0),
            Err(AnalysisError::InvalidWindowWidth(0))
        );
    }

    #[test]
    fn test_non_finite_price_is_an_error() {
        let prices = series(&[1.0, f64::INFINITY, 2.0]);

        assert!(matches!(
            find_cheapest_period(&prices, 2),
            Err(AnalysisError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_min_window() {
        let prices = series(&[5.0, 4.0, 1.0, 1.0, 1.0, 6.0, 0.5, 7.0]);
        let window = find_cheapest_period(&prices, 3).unwrap();

        assert_eq!(hours(&window), vec![2, 3, 4]);
    }

    #[test]
    fn test_max_window() {
        let prices = series(&[5.0, 4.0, 1.0, 1.0, 1.0, 6.0, 0.5, 7.0]);
        let window = find_most_expensive_period(&prices, 2).unwrap();

        assert_eq!(hours(&window), vec![0, 1]);
    }

    #[test]
    fn test_ties_resolve_to_earliest_window() {
        let prices = series(&[2.0, 1.0, 1.0, 2.0, 1.0, 1.0, 2.0]);

        assert_eq!(hours(&find_cheapest_period(&prices, 2).unwrap()), vec![1, 2]);
        assert_eq!(
            hours(&find_most_expensive_period(&prices, 1).unwrap()),
            vec![0]
        );
    }

    #[test]
    fn test_unsorted_input_is_sorted_on_a_copy() {
        let mut prices = series(&[3.0, 0.1, 0.2, 3.0, 3.0]);
        prices.reverse();
        let before = prices.clone();

        let window = find_cheapest_period(&prices, 2).unwrap();

        assert_eq!(hours(&window), vec![1, 2]);
        assert_eq!(prices, before);
    }

    #[test]
    fn test_ids_are_carried_through() {
        let prices: Vec<Price> = series(&[3.0, 0.1, 3.0])
            .into_iter()
            .map(|p| {
                let id = format!("id-{}", p.hour());
                p.with_id(id)
            })
            .collect();

        let window = find_cheapest_period(&prices, 1).unwrap();
        assert_eq!(window.first().unwrap().id.as_deref(), Some("id-1"));
    }

    #[test]
    fn test_min_window_sum_is_not_beaten_by_any_other_window() {
        let prices = series(&[
            0.12, 0.08, 0.09, 0.15, 0.02, 0.2, 0.01, 0.03, 0.11, 0.07, 0.05, 0.06,
        ]);

        for width in 1..=prices.len() {
            let best = find_cheapest_period(&prices, width).unwrap();
            let worst = find_most_expensive_period(&prices, width).unwrap();
            for candidate in prices.windows(width) {
                let sum: f64 = candidate.iter().map(|p| p.price).sum();
                assert!(best.sum() <= sum + 1e-12);
                assert!(worst.sum() >= sum - 1e-12);
            }
        }
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let prices = series(&[0.3, 0.1, 0.2, 0.05, 0.4]);

        let first = find_cheapest_period(&prices, 2).unwrap();
        let second = find_cheapest_period(&prices, 2).unwrap();
        assert_eq!(first, second);
    }
}
