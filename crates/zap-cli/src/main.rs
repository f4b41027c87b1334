mod report;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zap_core::dates::parse_date;
use zap_core::{load_app_config, Category, SortField};
use zap_scraper::{RatingsClient, ScraperError};

use crate::report::{build_request, render, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "zap-cli")]
#[command(about = "Daily TV ratings charts")]
struct Cli {
    /// Chart to fetch: cable, final (alias broadcast) or tv (alias fast-affiliate)
    #[arg(default_value = "final")]
    category: Category,

    /// Chart date, e.g. "July 25 2017" or "Aug. 1, 2017" [default: yesterday]
    #[arg(long, short, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Keep only shows matching this query; repeat for alternatives
    #[arg(long, short)]
    show: Vec<String>,

    /// Keep only networks matching this query; repeat for alternatives
    #[arg(long, short)]
    network: Vec<String>,

    /// Stop after this many entries (0 means no limit)
    #[arg(long, short)]
    limit: Option<usize>,

    /// Order entries by show, network, time, date, viewers, rating or share
    #[arg(long, short = 'S')]
    sort: Option<SortField>,

    /// Print JSON instead of a text table
    #[arg(long)]
    json: bool,

    /// Also print the per-network daily averages (broadcast charts only)
    #[arg(long, short)]
    averages: bool,

    /// Only log errors
    #[arg(long, short)]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_app_config()?;
    config.quiet |= cli.quiet;
    init_tracing(&config)?;

    if cli.averages && cli.category.is_cable() {
        return Err(ScraperError::AveragesUnavailable(cli.category).into());
    }

    let request = build_request(&cli);
    let client = RatingsClient::new(&config)?;
    let page = client.resolve(request.category, request.date).await?;

    let mut chart = page.chart(&request);
    if let Some(field) = cli.sort {
        chart.sort(field)?;
    }
    let averages = if cli.averages {
        Some(page.network_averages()?)
    } else {
        None
    };
    tracing::info!(entries = chart.len(), url = %chart.url, "chart ready");

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    println!("{}", render(&chart, averages.as_ref(), format)?);

    Ok(())
}

/// Diagnostics go to stderr so stdout stays clean for the chart.
fn init_tracing(config: &zap_core::AppConfig) -> anyhow::Result<()> {
    let env_filter = if config.quiet {
        EnvFilter::try_new(config.log_filter())?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config.log_filter()))?
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
