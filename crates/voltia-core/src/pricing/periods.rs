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

use tracing::debug;
use voltia_types::{Price, Window};

use super::sorted_by_date;
use super::window::find_cheapest_period;
use crate::error::{AnalysisError, Result};

/// Find up to two non-overlapping cheap windows.
///
/// The first is the cheapest window of the whole series. The second is the
/// cheaper of the best windows strictly before and strictly after the first
/// one, kept only when its mean is within `similarity_tolerance` of the
/// first's. Time is not considered here: elapsed periods are hidden at display
/// time (see [`crate::display::visible_periods`]).
///
/// Either window may be empty; an empty second window means "no second period".
pub fn find_two_cheap_periods(
    series: &[Price],
    width: usize,
    similarity_tolerance: f64,
) -> Result<(Window, Window)> {
    if width == 0 {
        return Err(AnalysisError::InvalidWindowWidth(width));
    }
    if series.len() < width {
        return Ok((Window::empty(), Window::empty()));
    }

    let first = find_cheapest_period(series, width)?;
    let (Some(first_start), Some(first_end), Some(first_mean)) = (
        first.first().map(|p| p.date_time),
        first.last().map(|p| p.date_time),
        first.mean(),
    ) else {
        return Ok((first, Window::empty()));
    };

    let sorted = sorted_by_date(series);
    let before: Vec<Price> = sorted
        .iter()
        .filter(|p| p.date_time < first_start)
        .cloned()
        .collect();
    let after: Vec<Price> = sorted
        .into_iter()
        .filter(|p| p.date_time > first_end)
        .collect();

    let before_candidate = find_cheapest_period(&before, width)?;
    let after_candidate = find_cheapest_period(&after, width)?;

    let second = match (
        before_candidate.is_full(width),
        after_candidate.is_full(width),
    ) {
        (true, true) => {
            // Equal means keep the later window
            if before_candidate.mean() < after_candidate.mean() {
                before_candidate
            } else {
                after_candidate
            }
        }
        (true, false) => before_candidate,
        (false, true) => after_candidate,
        (false, false) => Window::empty(),
    };

    let second = match second.mean() {
        Some(second_mean) if (first_mean - second_mean).abs() > similarity_tolerance => {
            debug!(
                "Second cheap period dropped: mean {:.5} vs {:.5} exceeds tolerance {}",
                second_mean, first_mean, similarity_tolerance
            );
            Window::empty()
        }
        _ => second,
    };

    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 5, 12)
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
    fn test_empty_series() {
        let (first, second) = find_two_cheap_periods(&[], 3, 0.02).unwrap();

        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn test_series_shorter_than_window() {
        let (first, second) = find_two_cheap_periods(&series(&[1.0]), 3, 0.02).unwrap();

        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn test_zero_width_is_an_error() {
        assert!(find_two_cheap_periods(&series(&[1.0]), 0, 0.02).is_err());
    }

    #[test]
    fn test_dominant_window_has_no_second_period() {
        let prices = series(&[
            0.20, 0.21, 0.19, 0.18, 0.05, 0.04, 0.05, 0.17, 0.19, 0.22, 0.23, 0.2,
        ]);

        let (first, second) = find_two_cheap_periods(&prices, 3, 0.02).unwrap();

        assert_eq!(hours(&first), vec![4, 5, 6]);
        assert!(second.is_empty());
    }

    #[test]
    fn test_comparable_second_period_after_first() {
        let prices = series(&[
            0.20, 0.21, 0.05, 0.04, 0.05, 0.19, 0.06, 0.05, 0.06, 0.22, 0.23, 0.2,
        ]);

        let (first, second) = find_two_cheap_periods(&prices, 3, 0.02).unwrap();

        assert_eq!(hours(&first), vec![2, 3, 4]);
        assert_eq!(hours(&second), vec![6, 7, 8]);
    }

    #[test]
    fn test_cheaper_side_wins() {
        // before: 0-2 mean 0.06, after: 9-11 mean 0.07
        let prices = series(&[
            0.06, 0.06, 0.06, 0.3, 0.3, 0.05, 0.05, 0.05, 0.3, 0.07, 0.07, 0.07,
        ]);

        let (first, second) = find_two_cheap_periods(&prices, 3, 0.02).unwrap();

        assert_eq!(hours(&first), vec![5, 6, 7]);
        assert_eq!(hours(&second), vec![0, 1, 2]);
    }

    #[test]
    fn test_equal_sides_prefer_later_window() {
        let prices = series(&[
            0.06, 0.06, 0.06, 0.3, 0.05, 0.05, 0.05, 0.3, 0.06, 0.06, 0.06,
        ]);

        let (_, second) = find_two_cheap_periods(&prices, 3, 0.02).unwrap();

        assert_eq!(hours(&second), vec![8, 9, 10]);
    }

    #[test]
    fn test_only_one_side_fits_a_window() {
        // first at 1-3 leaves a single hour before it
        let prices = series(&[0.3, 0.01, 0.01, 0.01, 0.3, 0.02, 0.02, 0.02]);

        let (first, second) = find_two_cheap_periods(&prices, 3, 0.02).unwrap();

        assert_eq!(hours(&first), vec![1, 2, 3]);
        assert_eq!(hours(&second), vec![5, 6, 7]);
    }

    #[test]
    fn test_no_room_for_second_period() {
        let prices = series(&[0.3, 0.01, 0.01, 0.01, 0.3]);

        let (first, second) = find_two_cheap_periods(&prices, 3, 0.02).unwrap();

        assert_eq!(hours(&first), vec![1, 2, 3]);
        assert!(second.is_empty());
    }

    #[test]
    fn test_periods_never_overlap() {
        let prices = series(&[
            0.1, 0.09, 0.08, 0.07, 0.06, 0.05, 0.06, 0.07, 0.08, 0.09, 0.1, 0.11,
        ]);

        let (first, second) = find_two_cheap_periods(&prices, 3, 1.0).unwrap();

        assert!(!second.is_empty());
        for price in &second {
            assert!(!first.contains(price.date_time));
        }
    }
}
