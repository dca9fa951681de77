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

//! Display-side policies: expiry of elapsed periods and projection onto the
//! 24-hour chart axis.
//!
//! Period selection stays time-agnostic; hiding elapsed periods happens only here.

pub mod chart;

use chrono::{Duration, DurationRound, NaiveDateTime};
use tracing::debug;
use voltia_types::{PaddedProjection, Window};

use crate::pricing::HOURS_PER_DAY;

/// Last hour of the day; a window ending here is extended to 24:00
const LAST_HOUR: u32 = 23;

/// Whether a window has fully elapsed.
///
/// The cut-off is the start of the window's last hour plus `margin`
/// (59 minutes by default, i.e. `HH:59`); the window is expired once that
/// instant is strictly before `now`. Empty windows never expire.
#[must_use]
pub fn is_expired(window: &Window, now: NaiveDateTime, margin: Duration) -> bool {
    let Some(last) = window.last() else {
        return false;
    };
    let hour_start = last
        .date_time
        .duration_trunc(Duration::hours(1))
        .unwrap_or(last.date_time);
    hour_start + margin < now
}

/// Non-empty windows that have not elapsed yet, in their original order
#[must_use]
pub fn visible_periods(windows: &[Window], now: NaiveDateTime, margin: Duration) -> Vec<Window> {
    windows
        .iter()
        .filter(|w| !w.is_empty() && !is_expired(w, now, margin))
        .cloned()
        .collect()
}

/// Project a window onto the hourly chart axis.
///
/// Returns an empty projection for empty or expired windows. Otherwise slot
/// `h` (0..24) holds the price of the first entry whose hour is `h` or `h - 1`,
/// absent when there is none. Accepting `h - 1` shifts values one slot to the
/// right of the hour they were published for; chart consumers rely on this
/// alignment, so it is kept as is. When the window's last hour is 23 a 25th
/// slot repeats slot 23 so the period is drawn up to 24:00.
#[must_use]
pub fn project_to_hourly_axis(
    window: &Window,
    now: NaiveDateTime,
    expiry_margin: Duration,
) -> PaddedProjection {
    let Some(last) = window.last() else {
        return PaddedProjection::empty();
    };
    if is_expired(window, now, expiry_margin) {
        debug!(
            "Period ending {} has elapsed, not projected",
            last.date_time.format("%Y-%m-%d %H:%M")
        );
        return PaddedProjection::empty();
    }

    let mut slots: Vec<Option<f64>> = (0_u32..)
        .take(HOURS_PER_DAY)
        .map(|slot| {
            window
                .iter()
                .find(|p| p.hour() == slot || p.hour() + 1 == slot)
                .map(|p| p.price)
        })
        .collect();

    if last.hour() == LAST_HOUR {
        let closing = slots.last().copied().flatten();
        slots.push(closing);
    }

    PaddedProjection::new(slots)
}
