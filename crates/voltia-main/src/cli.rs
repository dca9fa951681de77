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

//! Command line definitions.

use chrono::{NaiveDate, NaiveDateTime};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use voltia_i18n::Language;

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

#[derive(Debug, Parser)]
#[command(name = "voltia")]
#[command(author, version, about = "Cheapest and most expensive electricity periods of the day")]
#[command(
    long_about = "Finds the cheapest and most expensive periods in a day of hourly electricity\n\
    prices and rates the day against the recent average.\n\
    \nExamples:\n  \
    voltia show                                 # Today's report from the price service\n  \
    voltia tomorrow                             # Tomorrow's report, once published\n  \
    voltia analyze --from-json prices.json --baseline 0.12 --format json"
)]
pub struct Cli {
    /// Path to a TOML configuration file (falls back to VOLTIA_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report language, overrides `display.language`
    #[arg(long, global = true)]
    pub language: Option<Language>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze prices from a local JSON or CSV file
    Analyze(AnalyzeArgs),

    /// Fetch a day from the price service and print its report
    Show(ShowArgs),

    /// Same as `show` for the day after `--now`
    Tomorrow(OutputArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Reference time, defaults to the local clock
    #[arg(long, value_parser = parse_timestamp)]
    pub now: Option<NaiveDateTime>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["from_json", "from_csv"])))]
pub struct AnalyzeArgs {
    /// JSON file with a price array or a dailyinfo payload
    #[arg(long)]
    pub from_json: Option<PathBuf>,

    /// CSV file with `dateTime,price[,id]` columns
    #[arg(long)]
    pub from_csv: Option<PathBuf>,

    /// Mean price to rate the day against
    #[arg(long)]
    pub baseline: Option<f64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Day to show, defaults to the date of `--now`
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM[:SS], got '{value}'"))
}
