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

//! Day report assembly and terminal rendering.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};
use serde::Serialize;
use voltia_core::{
    AnalysisConfig, ChartData, DailyAverage, DailyPriceInfo, DayRating, Price, PriceStats,
    Window, analyze_day, build_chart_data, price_stats, visible_periods,
};
use voltia_i18n::I18n;

/// Everything the CLI shows for one day
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayReport {
    pub date: Option<NaiveDate>,
    pub now: NaiveDateTime,
    /// Mean of the recent daily averages the day is rated against
    pub baseline: Option<f64>,
    pub info: DailyPriceInfo,
    pub stats: PriceStats,
    /// Cheap periods that have not elapsed at `now`
    pub upcoming_cheap: Vec<Window>,
    pub upcoming_expensive: Vec<Window>,
    pub chart: ChartData,
    /// Recent daily averages, shown against the baseline
    pub averages: Vec<DailyAverage>,
}

impl DayReport {
    pub fn build(
        prices: &[Price],
        baseline: Option<f64>,
        now: NaiveDateTime,
        config: &AnalysisConfig,
    ) -> Result<Self> {
        let info = analyze_day(prices, baseline, config).context("Failed to analyze prices")?;
        let stats = price_stats(&info.prices, now);
        let margin = config.expiry_margin();
        let upcoming_cheap = visible_periods(&info.cheapest_periods, now, margin);
        let upcoming_expensive = visible_periods(&info.expensive_periods, now, margin);
        let chart = build_chart_data(&info, baseline, now, config);

        Ok(Self {
            date: info.date(),
            now,
            baseline,
            info,
            stats,
            upcoming_cheap,
            upcoming_expensive,
            chart,
            averages: Vec::new(),
        })
    }

    /// Attach the recent daily averages, kept in chronological order
    #[must_use]
    pub fn with_averages(mut self, mut averages: Vec<DailyAverage>) -> Self {
        averages.sort_by_key(|a| a.date);
        self.averages = averages;
        self
    }

    fn is_tomorrow(&self) -> bool {
        self.date == self.now.date().checked_add_signed(Duration::days(1))
    }
}

/// Localized plain-text rendering of a [`DayReport`]
#[derive(Debug)]
pub struct ReportRenderer<'a> {
    i18n: &'a I18n,
    date_format: &'a str,
}

fn rating_key(rating: DayRating) -> &'static str {
    match rating {
        DayRating::Good => "rating-good",
        DayRating::Normal => "rating-normal",
        DayRating::Bad => "rating-bad",
    }
}

pub fn format_price(value: f64) -> String {
    format!("{value:.5} €")
}

fn format_hour(date_time: NaiveDateTime) -> String {
    date_time.format("%H:%M").to_string()
}

impl<'a> ReportRenderer<'a> {
    pub fn new(i18n: &'a I18n, date_format: &'a str) -> Self {
        Self { i18n, date_format }
    }

    /// Rating sentence for the report's day, phrased as today or tomorrow
    pub fn rating_sentence(&self, report: &DayReport) -> Result<String> {
        let date = report
            .date
            .map(|d| d.format(self.date_format).to_string())
            .unwrap_or_default();
        let prefix = if report.is_tomorrow() {
            "tomorrow"
        } else {
            "today"
        };

        let text = match report.info.day_rating {
            Some(rating) => {
                let rating = self.i18n.get(rating_key(rating))?;
                self.i18n.format_with(
                    &format!("{prefix}-rating"),
                    &[("date", date.as_str()), ("rating", rating.as_str())],
                )?
            }
            None => self.i18n.format_with(
                &format!("{prefix}-rating-unavailable"),
                &[("date", date.as_str())],
            )?,
        };
        Ok(text)
    }

    /// Notice printed when a day has not been published yet
    pub fn no_data(&self, date: NaiveDate, now: NaiveDateTime) -> Result<String> {
        if now.date().checked_add_signed(Duration::days(1)) == Some(date) {
            Ok(self.i18n.get("tomorrow-no-data")?)
        } else {
            let date = date.format(self.date_format).to_string();
            Ok(self
                .i18n
                .format_with("today-rating-unavailable", &[("date", date.as_str())])?)
        }
    }

    /// Delta text relative to the baseline; positive deltas are savings
    fn delta(&self, baseline: Option<f64>, price: f64) -> Result<Option<String>> {
        let Some(baseline) = baseline else {
            return Ok(None);
        };
        let delta = baseline - price;
        if delta == 0.0 {
            return Ok(None);
        }
        let amount = format_price(delta.abs());
        let key = if delta > 0.0 {
            "below-average"
        } else {
            "above-average"
        };
        Ok(Some(
            self.i18n.format_with(key, &[("amount", amount.as_str())])?,
        ))
    }

    fn delta_cell(&self, baseline: Option<f64>, price: f64) -> Result<Cell> {
        let cell = match self.delta(baseline, price)? {
            Some(text) if baseline.is_some_and(|b| b >= price) => Cell::new(text).fg(Color::Green),
            Some(text) => Cell::new(text).fg(Color::Red),
            None => Cell::new(""),
        };
        Ok(cell)
    }

    fn metrics_table(&self, report: &DayReport) -> Result<Table> {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);

        let entries = [
            ("current-price", report.stats.current.as_ref()),
            ("min-price", report.stats.min.as_ref()),
            ("max-price", report.stats.max.as_ref()),
        ];
        for (key, price) in entries {
            let Some(price) = price else { continue };
            let time = format_hour(price.date_time);
            let label = self.i18n.format_with(key, &[("time", time.as_str())])?;
            table.add_row(vec![
                Cell::new(label),
                Cell::new(format_price(price.price)).add_attribute(Attribute::Bold),
                self.delta_cell(report.baseline, price.price)?,
            ]);
        }

        if let Some(baseline) = report.baseline {
            table.add_row(vec![
                Cell::new(self.i18n.get("thirty-day-average")?),
                Cell::new(format_price(baseline)),
                Cell::new(""),
            ]);
        }

        Ok(table)
    }

    fn period_lines(&self, report: &DayReport) -> Result<Vec<String>> {
        let groups = [
            ("cheap-period", &report.upcoming_cheap),
            ("expensive-period", &report.upcoming_expensive),
        ];

        let mut lines = Vec::new();
        for (key, windows) in groups {
            for window in windows {
                let (Some(first), Some(last)) = (window.first(), window.last()) else {
                    continue;
                };
                let start = format_hour(first.date_time);
                let end = format_hour(last.date_time);
                let mut line = self
                    .i18n
                    .format_with(key, &[("start", start.as_str()), ("end", end.as_str())])?;
                if let Some(mean) = window.mean() {
                    line.push_str(&format!(" ({})", format_price(mean)));
                }
                lines.push(line);
            }
        }

        if lines.is_empty() {
            lines.push(self.i18n.get("no-upcoming-periods")?);
        }
        Ok(lines)
    }

    fn hourly_table(&self, report: &DayReport) -> Result<Table> {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new(self.i18n.get("hour")?).add_attribute(Attribute::Bold),
            Cell::new(self.i18n.get("price")?).add_attribute(Attribute::Bold),
            Cell::new(""),
        ]);

        let current = report.stats.current.as_ref().map(|p| p.date_time);
        for price in &report.info.prices {
            let marker = if report.upcoming_cheap.iter().any(|w| w.contains(price.date_time)) {
                Cell::new("▼").fg(Color::Green)
            } else if report
                .upcoming_expensive
                .iter()
                .any(|w| w.contains(price.date_time))
            {
                Cell::new("▲").fg(Color::Red)
            } else {
                Cell::new("")
            };

            let mut hour = Cell::new(format_hour(price.date_time));
            if current == Some(price.date_time) {
                hour = hour.add_attribute(Attribute::Bold);
            }

            table.add_row(vec![hour, Cell::new(format_price(price.price)), marker]);
        }

        Ok(table)
    }

    /// Daily averages of the last days next to their distance from the baseline
    fn averages_table(&self, report: &DayReport) -> Result<Table> {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new(""),
            Cell::new(self.i18n.get("average")?).add_attribute(Attribute::Bold),
            Cell::new(""),
        ]);

        for average in &report.averages {
            table.add_row(vec![
                Cell::new(average.date.format(self.date_format).to_string()),
                Cell::new(format_price(average.average)),
                self.delta_cell(report.baseline, average.average)?,
            ]);
        }

        Ok(table)
    }

    /// Full report: title, rating, metrics, upcoming periods, hourly prices
    /// and, when known, the recent daily averages
    pub fn render(&self, report: &DayReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.i18n.get("title")?);
        output.push('\n');

        output.push_str(&self.rating_sentence(report)?);
        output.push_str("\n\n");

        output.push_str(&self.metrics_table(report)?.to_string());
        output.push_str("\n\n");

        for line in self.period_lines(report)? {
            output.push_str(&line);
            output.push('\n');
        }
        output.push('\n');

        output.push_str(&self.hourly_table(report)?.to_string());
        output.push('\n');

        if !report.averages.is_empty() {
            output.push('\n');
            output.push_str(&self.i18n.get("last-thirty-days")?);
            output.push('\n');
            output.push_str(&self.averages_table(report)?.to_string());
            output.push('\n');
        }

        Ok(output)
    }
}
