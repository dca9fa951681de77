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

use chrono::{Duration, NaiveDateTime, Timelike};
use voltia_types::{ChartData, DailyPriceInfo, Price};

use super::{project_to_hourly_axis, visible_periods};
use crate::config::AnalysisConfig;
use crate::pricing::sorted_by_date;

fn same_hour(price: &Price, instant: NaiveDateTime) -> bool {
    price.date() == instant.date() && price.hour() == instant.hour()
}

/// Build every dataset of a day's price chart.
///
/// Elapsed cheap/expensive periods are left out; the "current" dataset
/// highlights the hour `now` falls into and the following one.
#[must_use]
pub fn build_chart_data(
    info: &DailyPriceInfo,
    baseline: Option<f64>,
    now: NaiveDateTime,
    config: &AnalysisConfig,
) -> ChartData {
    let prices = sorted_by_date(&info.prices);
    let margin = config.expiry_margin();
    let next_hour = now + Duration::hours(1);

    let labels = prices
        .iter()
        .map(|p| p.date_time.format("%H:%M").to_string())
        .collect();

    let price = prices.iter().map(|p| p.price).collect();

    let baseline = baseline
        .filter(|b| b.is_finite())
        .map(|b| vec![b; prices.len()])
        .unwrap_or_default();

    let cheap = visible_periods(&info.cheapest_periods, now, margin)
        .iter()
        .map(|w| project_to_hourly_axis(w, now, margin))
        .collect();

    let expensive = visible_periods(&info.expensive_periods, now, margin)
        .iter()
        .map(|w| project_to_hourly_axis(w, now, margin))
        .collect();

    let current = prices
        .iter()
        .map(|p| (same_hour(p, now) || same_hour(p, next_hour)).then_some(p.price))
        .collect();

    ChartData {
        labels,
        price,
        baseline,
        cheap,
        expensive,
        current,
    }
}
