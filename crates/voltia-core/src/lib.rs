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

//! Price period analysis engine.
//!
//! Pure, synchronous transformations over an hourly price series: cheapest and
//! most expensive windows, day rating against a baseline and hour-aligned
//! projections for charting. Nothing here performs I/O, reads the clock or
//! keeps references to its inputs, so every function can be called from any
//! thread without coordination.

pub mod config;
pub mod display;
pub mod error;
pub mod pricing;
pub mod report;

pub use config::AnalysisConfig;
pub use display::chart::build_chart_data;
pub use display::{is_expired, project_to_hourly_axis, visible_periods};
pub use error::{AnalysisError, Result};
pub use pricing::periods::find_two_cheap_periods;
pub use pricing::rating::{RatingBasis, classify, rate_day};
pub use pricing::window::{
    ExtremumMode, find_cheapest_period, find_extremum_window, find_most_expensive_period,
};
pub use pricing::{
    baseline_from_averages, calculate_average, cheap_period_baseline, current_price,
    daily_averages, max_price, min_price, parse_price, price_stats, sorted_by_date,
};
pub use report::analyze_day;

// Re-export the value objects so callers only need one dependency
pub use voltia_types::{
    ChartData, DailyAverage, DailyPriceInfo, DayRating, PaddedProjection, Price, PriceStats,
    Window,
};
