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

mod cli;
mod config;
mod loaders;
mod report;

use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate, NaiveDateTime};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use cli::{AnalyzeArgs, Cli, Commands, OutputArgs, OutputFormat};
use config::AppConfig;
use loaders::{CsvFileLoader, JsonFileLoader, PriceLoader, ServiceLoader};
use report::{DayReport, ReportRenderer};
use voltia_client::PriceServiceClient;
use voltia_core::baseline_from_averages;
use voltia_i18n::I18n;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `--format json` output stays machine readable
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set default tracing subscriber")?;

    let config = AppConfig::load(cli.config.as_deref())?;
    let language = cli.language.unwrap_or(config.display.language);
    let i18n = I18n::new(language).context("Failed to load translations")?;
    let renderer = ReportRenderer::new(&i18n, &config.display.date_format);

    match &cli.command {
        Commands::Analyze(args) => run_analyze(&config, &renderer, args),
        Commands::Show(args) => {
            let now = resolve_now(&args.output);
            let date = args.date.unwrap_or(now.date());
            run_show(&config, &renderer, date, now, args.output.format)
        }
        Commands::Tomorrow(output) => {
            let now = resolve_now(output);
            let date = now
                .date()
                .checked_add_days(Days::new(1))
                .context("Date out of range")?;
            run_show(&config, &renderer, date, now, output.format)
        }
    }
}

fn resolve_now(output: &OutputArgs) -> NaiveDateTime {
    output.now.unwrap_or_else(|| Local::now().naive_local())
}

fn emit(report: &DayReport, renderer: &ReportRenderer<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            println!("{json}");
        }
        OutputFormat::Table => print!("{}", renderer.render(report)?),
    }
    Ok(())
}

fn run_analyze(config: &AppConfig, renderer: &ReportRenderer<'_>, args: &AnalyzeArgs) -> Result<()> {
    let loader: Box<dyn PriceLoader> = match (&args.from_json, &args.from_csv) {
        (Some(path), _) => Box::new(JsonFileLoader::new(path)),
        (None, Some(path)) => Box::new(CsvFileLoader::new(path)),
        (None, None) => anyhow::bail!("Either --from-json or --from-csv is required"),
    };

    let prices = loader.load()?;
    let now = resolve_now(&args.output);
    info!("Analyzing {} prices from {}", prices.len(), loader.source());

    let report = DayReport::build(&prices, args.baseline, now, &config.analysis)?;
    emit(&report, renderer, args.output.format)
}

fn run_show(
    config: &AppConfig,
    renderer: &ReportRenderer<'_>,
    date: NaiveDate,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<()> {
    let client = PriceServiceClient::new(&config.service.base_url, config.timeout())
        .context("Failed to create price service client")?;

    let prices = ServiceLoader::new(&client, date).load()?;
    if prices.is_empty() {
        warn!("No prices published for {}", date);
        match format {
            OutputFormat::Json => println!("null"),
            OutputFormat::Table => println!("{}", renderer.no_data(date, now)?),
        }
        return Ok(());
    }

    let averages = client
        .daily_averages(date)
        .with_context(|| format!("Failed to fetch daily averages for {date}"))?;
    let baseline = averages.as_deref().and_then(baseline_from_averages);
    if baseline.is_none() {
        warn!("No daily averages for {}, the day will not be rated", date);
    }

    let report = DayReport::build(&prices, baseline, now, &config.analysis)?
        .with_averages(averages.unwrap_or_default());
    emit(&report, renderer, format)?;

    // Today's table view also tells whether tomorrow looks better
    if format == OutputFormat::Table && date == now.date() {
        let tomorrow = date.checked_add_days(Days::new(1)).context("Date out of range")?;
        let prices = ServiceLoader::new(&client, tomorrow).load()?;
        if prices.is_empty() {
            println!("{}", renderer.no_data(tomorrow, now)?);
        } else {
            let report = DayReport::build(&prices, baseline, now, &config.analysis)?;
            println!("{}", renderer.rating_sentence(&report)?);
        }
    }

    Ok(())
}
