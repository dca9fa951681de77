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

pub mod periods;
pub mod rating;
pub mod window;

use chrono::{NaiveDateTime, Timelike};
use tracing::debug;
use voltia_types::{DailyAverage, Price, PriceStats, parse_timestamp};

use crate::error::{AnalysisError, Result};
use window::find_cheapest_period;

/// Hourly prices in a complete day
pub const HOURS_PER_DAY: usize = 24;

/// Build a price from its wire representation.
///
/// Accepts naive ISO-8601 timestamps with or without seconds. Offsets are not
/// accepted: timestamps are expected to be in the target locale already.
pub fn parse_price(date_time: &str, price: f64) -> Result<Price> {
    let date_time_value =
        parse_timestamp(date_time).map_err(|e| AnalysisError::InvalidTimestamp {
            value: date_time.to_owned(),
            reason: e.to_string(),
        })?;

    if !price.is_finite() {
        return Err(AnalysisError::InvalidPrice {
            date_time: date_time.to_owned(),
            price,
        });
    }

    Ok(Price::new(date_time_value, price))
}

/// Chronologically sorted copy of a series; the input is left untouched
#[must_use]
pub fn sorted_by_date(series: &[Price]) -> Vec<Price> {
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|p| p.date_time);
    sorted
}

/// Reject NaN / infinite prices before they poison window sums
pub(crate) fn ensure_finite(series: &[Price]) -> Result<()> {
    match series.iter().find(|p| !p.price.is_finite()) {
        Some(bad) => Err(AnalysisError::InvalidPrice {
            date_time: bad.date_time.to_string(),
            price: bad.price,
        }),
        None => Ok(()),
    }
}

fn mean_of(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return None;
    }
    #[expect(
        clippy::cast_precision_loss,
        reason = "price counts never exceed mantissa precision"
    )]
    let count = count as f64;
    Some(sum / count)
}

/// Arithmetic mean of all prices, `None` for an empty series
#[must_use]
pub fn calculate_average(series: &[Price]) -> Option<f64> {
    mean_of(series.iter().map(|p| p.price))
}

/// Cheapest hour; the earliest one wins on ties
#[must_use]
pub fn min_price(series: &[Price]) -> Option<Price> {
    sorted_by_date(series)
        .into_iter()
        .reduce(|best, p| if p.price < best.price { p } else { best })
}

/// Most expensive hour; the earliest one wins on ties
#[must_use]
pub fn max_price(series: &[Price]) -> Option<Price> {
    sorted_by_date(series)
        .into_iter()
        .reduce(|best, p| if p.price > best.price { p } else { best })
}

/// Price of the hour `now` falls into, if the series covers it
#[must_use]
pub fn current_price(series: &[Price], now: NaiveDateTime) -> Option<Price> {
    series
        .iter()
        .find(|p| p.date() == now.date() && p.hour() == now.hour())
        .cloned()
}

#[must_use]
pub fn price_stats(series: &[Price], now: NaiveDateTime) -> PriceStats {
    PriceStats {
        min: min_price(series),
        max: max_price(series),
        average: calculate_average(series),
        current: current_price(series, now),
    }
}

/// Mean price of every calendar day in a multi-day series.
///
/// The series must hold whole days of hourly prices.
pub fn daily_averages(series: &[Price]) -> Result<Vec<DailyAverage>> {
    if !series.chunks_exact(HOURS_PER_DAY).remainder().is_empty() {
        return Err(AnalysisError::IncompleteDay { len: series.len() });
    }

    let sorted = sorted_by_date(series);
    let averages: Vec<DailyAverage> = sorted
        .chunk_by(|a, b| a.date() == b.date())
        .filter_map(|day| {
            let first = day.first()?;
            Some(DailyAverage {
                date: first.date(),
                average: calculate_average(day)?,
            })
        })
        .collect();

    debug!("Computed {} daily averages", averages.len());
    Ok(averages)
}

/// Baseline price (e.g. the 30-day average) from daily averages
#[must_use]
pub fn baseline_from_averages(averages: &[DailyAverage]) -> Option<f64> {
    mean_of(averages.iter().map(|a| a.average))
}

/// Baseline built from each day's cheapest window.
///
/// Days too short to hold a full window are skipped rather than counted as zero.
pub fn cheap_period_baseline(days: &[Vec<Price>], width: usize) -> Result<Option<f64>> {
    let mut means = Vec::with_capacity(days.len());
    for day in days {
        let window = find_cheapest_period(day, width)?;
        if window.is_full(width)
            && let Some(mean) = window.mean()
        {
            means.push(mean);
        }
    }

    debug!(
        "Cheap period baseline from {}/{} days",
        means.len(),
        days.len()
    );
    Ok(mean_of(means))
}
