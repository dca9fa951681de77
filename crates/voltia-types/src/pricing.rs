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

use chrono::{NaiveDate, NaiveDateTime, ParseError, Timelike};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::rating::DayRating;

/// Accepted `dateTime` layouts: naive ISO-8601 with or without seconds
pub const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a naive ISO-8601 timestamp in any of the [`TIMESTAMP_FORMATS`].
///
/// Surrounding whitespace is ignored. On failure the error of the last
/// attempted layout is returned.
///
/// # Errors
///
/// Returns the chrono parse error when no layout matches.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ParseError> {
    let value = value.trim();
    let [first, rest @ ..] = TIMESTAMP_FORMATS;
    rest.iter().fold(NaiveDateTime::parse_from_str(value, first), |parsed, format| {
        parsed.or_else(|_| NaiveDateTime::parse_from_str(value, format))
    })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_timestamp(&value)
        .map_err(|e| de::Error::custom(format!("invalid dateTime '{value}': {e}")))
}

// ============= Pricing Value Objects =============

/// A single hourly price observation as published by the price service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Opaque identifier assigned by the price service, never inspected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Start of the hour (naive local time, already normalized by the caller)
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_time: NaiveDateTime,

    /// Price for this hour (EUR/kWh)
    pub price: f64,
}

impl Price {
    #[must_use]
    pub fn new(date_time: NaiveDateTime, price: f64) -> Self {
        Self {
            id: None,
            date_time,
            price,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Hour of day (0-23) this price belongs to
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.date_time.hour()
    }

    /// Calendar day this price belongs to
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date_time.date()
    }
}

/// A contiguous run of hourly prices, kept in chronological order.
///
/// An empty window is a regular value meaning "no period" (not enough data,
/// no comparable second period, ...), never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Window(Vec<Price>);

impl Window {
    #[must_use]
    pub fn new(prices: Vec<Price>) -> Self {
        Self(prices)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn prices(&self) -> &[Price] {
        &self.0
    }

    #[must_use]
    pub fn into_prices(self) -> Vec<Price> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Price> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the window holds exactly `width` hours
    #[must_use]
    pub fn is_full(&self, width: usize) -> bool {
        self.0.len() == width
    }

    #[must_use]
    pub fn first(&self) -> Option<&Price> {
        self.0.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Price> {
        self.0.last()
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().map(|p| p.price).sum()
    }

    /// Mean price of the window, `None` when empty
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.0.is_empty() {
            return None;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "window length never exceeds a few days of hours"
        )]
        let len = self.0.len() as f64;
        Some(self.sum() / len)
    }

    /// Whether the window covers the given hour start
    #[must_use]
    pub fn contains(&self, date_time: NaiveDateTime) -> bool {
        self.0.iter().any(|p| p.date_time == date_time)
    }
}

impl From<Vec<Price>> for Window {
    fn from(prices: Vec<Price>) -> Self {
        Self(prices)
    }
}

impl<'a> IntoIterator for &'a Window {
    type Item = &'a Price;
    type IntoIter = std::slice::Iter<'a, Price>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Analysis of a single day (same shape as the price service `dailyinfo` payload)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPriceInfo {
    /// Day rating against the baseline, `None` when it cannot be computed
    #[serde(default)]
    pub day_rating: Option<DayRating>,

    /// Hourly prices of the day in chronological order
    pub prices: Vec<Price>,

    /// Up to two cheap windows, cheapest first
    #[serde(default)]
    pub cheapest_periods: Vec<Window>,

    /// Most expensive window (at most one)
    #[serde(default)]
    pub expensive_periods: Vec<Window>,
}

impl DailyPriceInfo {
    /// Calendar day covered by this analysis
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.prices.first().map(Price::date)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Mean price of one calendar day (price service `averages` payload entry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAverage {
    pub date: NaiveDate,
    pub average: f64,
}

/// Headline figures for a day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    /// Cheapest hour (earliest one on ties)
    pub min: Option<Price>,

    /// Most expensive hour (earliest one on ties)
    pub max: Option<Price>,

    /// Mean of all hours
    pub average: Option<f64>,

    /// Hour matching "now", only present when the series covers it
    pub current: Option<Price>,
}
