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

use crate::error::{ClientError, ClientResult};
use chrono::NaiveDate;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};
use voltia_types::{DailyAverage, DailyPriceInfo, Price};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client for the price service REST API.
///
/// The service publishes the next day's prices in the evening; until then the
/// day endpoints answer 404, which is reported as `Ok(None)` rather than an error.
#[derive(Debug, Clone)]
pub struct PriceServiceClient {
    base_url: String,
    client: Client,
}

impl PriceServiceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(ClientError::ConfigError(
                "price service base URL must not be empty".to_owned(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        info!("Price service client initialised: {}", base_url);
        Ok(Self { base_url, client })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the assembled day report for `date`.
    ///
    /// Provided for library consumers that trust the service's own analysis;
    /// the `voltia` binary fetches raw prices and analyzes them locally.
    pub fn daily_info(&self, date: NaiveDate) -> ClientResult<Option<DailyPriceInfo>> {
        let url = format!("{}/dailyinfo", self.base_url);
        self.get_json(&url, &[("date", date.format(DATE_FORMAT).to_string())])
    }

    /// Fetch the per-day averages of the period ending at `date`.
    pub fn daily_averages(&self, date: NaiveDate) -> ClientResult<Option<Vec<DailyAverage>>> {
        let url = format!("{}/averages", self.base_url);
        self.get_json(&url, &[("date", date.format(DATE_FORMAT).to_string())])
    }

    /// Fetch the raw hourly prices between `start` and `end`, both inclusive.
    ///
    /// An unpublished range yields an empty series.
    pub fn prices(&self, start: NaiveDate, end: NaiveDate) -> ClientResult<Vec<Price>> {
        let prices: Option<Vec<Price>> = self.get_json(
            &self.base_url,
            &[
                ("start", start.format(DATE_FORMAT).to_string()),
                ("end", end.format(DATE_FORMAT).to_string()),
            ],
        )?;
        let prices = prices.unwrap_or_default();
        debug!("Fetched {} prices for {} to {}", prices.len(), start, end);
        Ok(prices)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> ClientResult<Option<T>> {
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(url).query(query).send()?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json::<T>()?)),
            StatusCode::NOT_FOUND => {
                warn!("Price service has no data for {} {:?}", url, query);
                Ok(None)
            }
            status => {
                let message = response.text().unwrap_or_default();
                warn!("Price service returned {}: {}", status, message);
                Err(ClientError::Status {
                    status: status.as_u16(),
                    url: url.to_owned(),
                    message,
                })
            }
        }
    }
}
