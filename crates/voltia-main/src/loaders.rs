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

//! Price series sources for the CLI.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;
use voltia_client::PriceServiceClient;
use voltia_core::{DailyPriceInfo, Price, parse_price};

/// Something that yields an hourly price series
pub trait PriceLoader {
    /// Human readable origin, used in log lines
    fn source(&self) -> String;

    fn load(&self) -> Result<Vec<Price>>;
}

/// JSON file holding either a bare price array or a `dailyinfo` payload
#[derive(Debug)]
pub struct JsonFileLoader {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPayload {
    Prices(Vec<Price>),
    DailyInfo(DailyPriceInfo),
}

impl JsonFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PriceLoader for JsonFileLoader {
    fn source(&self) -> String {
        format!("JSON file {}", self.path.display())
    }

    fn load(&self) -> Result<Vec<Price>> {
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let payload: JsonPayload = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse prices from {}", self.path.display()))?;

        let prices = match payload {
            JsonPayload::Prices(prices) => prices,
            JsonPayload::DailyInfo(info) => info.prices,
        };
        info!("Loaded {} prices from {}", prices.len(), self.source());
        Ok(prices)
    }
}

/// CSV file with a `dateTime,price[,id]` header
#[derive(Debug)]
pub struct CsvFileLoader {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "dateTime", alias = "date_time")]
    date_time: String,
    price: f64,
    #[serde(default)]
    id: Option<String>,
}

impl CsvFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceLoader for CsvFileLoader {
    fn source(&self) -> String {
        format!("CSV file {}", self.path.display())
    }

    fn load(&self) -> Result<Vec<Price>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(self.path())
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        let mut prices = Vec::new();
        for (idx, row) in reader.deserialize::<CsvRow>().enumerate() {
            let line = idx + 2;
            let row = row.with_context(|| format!("Malformed CSV row at line {line}"))?;
            let price = parse_price(&row.date_time, row.price)
                .with_context(|| format!("Invalid price at line {line}"))?;
            prices.push(match row.id {
                Some(id) => price.with_id(id),
                None => price,
            });
        }

        info!("Loaded {} prices from {}", prices.len(), self.source());
        Ok(prices)
    }
}

/// Prices of one calendar day from the remote service
#[derive(Debug)]
pub struct ServiceLoader<'a> {
    client: &'a PriceServiceClient,
    date: NaiveDate,
}

impl<'a> ServiceLoader<'a> {
    pub fn new(client: &'a PriceServiceClient, date: NaiveDate) -> Self {
        Self { client, date }
    }
}

impl PriceLoader for ServiceLoader<'_> {
    fn source(&self) -> String {
        format!("{} for {}", self.client.base_url(), self.date)
    }

    fn load(&self) -> Result<Vec<Price>> {
        let prices = self
            .client
            .prices(self.date, self.date)
            .with_context(|| format!("Failed to fetch prices from {}", self.source()))?;
        info!("Loaded {} prices from {}", prices.len(), self.source());
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_json_price_array() {
        let file = temp_file(
            ".json",
            r#"[
                {"id": "a", "dateTime": "2023-05-13T13:00:00", "price": 0.03258},
                {"id": "b", "dateTime": "2023-05-13T12:00:00", "price": 0.03298}
            ]"#,
        );

        let prices = JsonFileLoader::new(file.path()).load().unwrap();

        assert_eq!(prices.len(), 2);
        // Loaders keep the file order, sorting is the engine's job
        assert_eq!(prices[0].id.as_deref(), Some("a"));
        assert_eq!(prices[1].date_time.hour(), 12);
    }

    #[test]
    fn test_json_daily_info_payload() {
        let file = temp_file(
            ".json",
            r#"{
                "dayRating": "NORMAL",
                "prices": [{"dateTime": "2023-05-13T00:00:00", "price": 0.11263}],
                "cheapestPeriods": [],
                "expensivePeriods": []
            }"#,
        );

        let prices = JsonFileLoader::new(file.path()).load().unwrap();
        assert_eq!(prices.len(), 1);
        assert!((prices[0].price - 0.11263).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_and_csv_accept_minute_timestamps() {
        let json = temp_file(
            ".json",
            r#"[{"dateTime": "2023-05-13T13:00", "price": 0.03258}]"#,
        );
        let csv = temp_file(".csv", "dateTime,price\n2023-05-13T13:00,0.03258\n");

        let from_json = JsonFileLoader::new(json.path()).load().unwrap();
        let from_csv = CsvFileLoader::new(csv.path()).load().unwrap();

        assert_eq!(from_json, from_csv);
        assert_eq!(from_json[0].date_time.hour(), 13);
    }

    #[test]
    fn test_json_malformed_timestamp() {
        let file = temp_file(
            ".json",
            r#"[{"dateTime": "13/05/2023 12:00", "price": 0.1}]"#,
        );
        assert!(JsonFileLoader::new(file.path()).load().is_err());
    }

    #[test]
    fn test_csv_with_ids() {
        let file = temp_file(
            ".csv",
            "dateTime,price,id\n\
             2023-05-13T12:00:00,0.03298,x1\n\
             2023-05-13T13:00,0.03258,x2\n",
        );

        let prices = CsvFileLoader::new(file.path()).load().unwrap();

        assert_eq!(prices.len(), 2);
        assert_eq!(prices[1].id.as_deref(), Some("x2"));
        assert_eq!(prices[1].date_time.hour(), 13);
    }

    #[test]
    fn test_csv_without_ids() {
        let file = temp_file(
            ".csv",
            "date_time,price\n2023-05-13T12:00:00,0.03298\n",
        );

        let prices = CsvFileLoader::new(file.path()).load().unwrap();
        assert_eq!(prices.len(), 1);
        assert!(prices[0].id.is_none());
    }

    #[test]
    fn test_csv_bad_timestamp_reports_line() {
        let file = temp_file(
            ".csv",
            "dateTime,price\n2023-05-13T12:00:00,0.03298\nnoon,0.1\n",
        );

        let err = CsvFileLoader::new(file.path()).load().unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        assert!(CsvFileLoader::new(&path).load().is_err());
        assert!(JsonFileLoader::new(&path).load().is_err());
    }
}
