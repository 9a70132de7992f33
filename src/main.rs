//! weather-enrich: attach weekly weather statistics to dated, geolocated case reports.

use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Duration;
use weather_enrich::{
    enrich_file, BatchRunner, HttpObservationFetcher, InvalidDatePolicy, RecordEnricher, Settings,
    Units,
};

#[derive(Parser)]
#[command(
    name = "weather-enrich",
    version,
    about = "Enrich a CSV of case reports with weather statistics for the preceding week"
)]
struct Cli {
    /// Config file to use instead of the standard search locations
    #[arg(long, env = "WEATHER_ENRICH_CONFIG")]
    config: Option<PathBuf>,

    /// Input CSV with report_date, location, lat and long columns
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Output CSV path
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Maximum number of concurrent weather requests
    #[arg(long)]
    concurrency: Option<usize>,

    /// Days of history before each report date
    #[arg(long)]
    lookback_days: Option<i64>,

    /// Measurement units: m, e, h or s
    #[arg(long)]
    units: Option<Units>,

    /// Zero-fill records with unparseable dates instead of aborting
    #[arg(long)]
    skip_invalid_dates: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (mut settings, source) = Settings::load(cli.config.as_deref())?;
    info!("Using settings from {}", source);
    apply_overrides(&mut settings, cli);

    let credentials = settings.credentials()?;
    let fetcher = match settings.request_timeout_secs {
        Some(secs) => HttpObservationFetcher::with_timeout(Duration::from_secs(secs))?,
        None => HttpObservationFetcher::new(),
    };
    let enricher = RecordEnricher::builder()
        .fetcher(fetcher)
        .credentials(credentials)
        .lookback_days(settings.lookback_days)
        .base_url(settings.base_url.clone())
        .build();
    let runner = BatchRunner::builder()
        .enricher(enricher)
        .concurrency(settings.concurrency)
        .invalid_dates(settings.invalid_dates)
        .build();

    let written = enrich_file(&runner, &settings.input, &settings.output)
        .await
        .with_context(|| format!("enriching {}", settings.input.display()))?;
    println!("Wrote {} rows to {}", written, settings.output.display());
    Ok(())
}

fn apply_overrides(settings: &mut Settings, cli: Cli) {
    if let Some(input) = cli.input {
        settings.input = input;
    }
    if let Some(output) = cli.output {
        settings.output = output;
    }
    if let Some(concurrency) = cli.concurrency {
        settings.concurrency = concurrency;
    }
    if let Some(days) = cli.lookback_days {
        settings.lookback_days = days;
    }
    if let Some(units) = cli.units {
        settings.units = units;
    }
    if cli.skip_invalid_dates {
        settings.invalid_dates = InvalidDatePolicy::ZeroFill;
    }
}
