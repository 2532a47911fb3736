//! Command implementations for the arrivals CLI
//!
//! Sets up logging, then dispatches to the processor, the analytic
//! functions or the reports. `anyhow` adds user-facing context here;
//! the library below returns typed errors.

use crate::analytics::{missing_rate, moving_average, yoy_change};
use crate::cli::args::{
    Args, Command, MissingArgs, ProcessArgs, ReportArgs, ReportKind, RollingArgs, SeriesArgs,
    YoyArgs,
};
use crate::error::ArrivalsError;
use crate::models::{ProcessingStats, SeriesNode};
use crate::processor::ArrivalsProcessor;
use crate::reports;
use crate::store::{Store, write_csv};
use anyhow::{Context, Result};
use colored::*;
use polars::prelude::DataFrame;
use tracing::{debug, info};

/// Main command runner
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    match &args.command {
        Command::Process(process) => {
            run_process(process, args.show_progress()).await?;
        }
        Command::Yoy(yoy) => run_yoy(yoy)?,
        Command::Rolling(rolling) => run_rolling(rolling)?,
        Command::Missing(missing) => run_missing(missing)?,
        Command::Report(report) => run_report(report)?,
    }
    Ok(())
}

/// Set up the tracing subscriber; `RUST_LOG` overrides the flags
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("arrivals_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

async fn run_process(args: &ProcessArgs, show_progress: bool) -> Result<ProcessingStats> {
    let config = args.to_config(show_progress)?;
    let processor = ArrivalsProcessor::new(args.inputs.iter().cloned(), args.output_dir.clone())
        .context("Failed to resolve input files")?
        .with_config(config);

    info!("Processing {} file(s)", processor.files().len());
    let stats = processor.process().await?;

    if stats.files_processed == 0 && stats.files_failed > 0 {
        anyhow::bail!("All {} input file(s) failed to process", stats.files_failed);
    }
    Ok(stats)
}

/// Open the store and look up the requested series
fn open_series(args: &SeriesArgs) -> Result<(Store, SeriesNode)> {
    let store = Store::open(&args.store)
        .with_context(|| format!("Failed to open store {}", args.store.display()))?;
    let series = store
        .find_series(args.series_id)
        .cloned()
        .ok_or_else(|| {
            ArrivalsError::invalid_argument(format!("unknown series id {}", args.series_id))
        })?;
    Ok((store, series))
}

fn run_yoy(args: &YoyArgs) -> Result<()> {
    let (store, series) = open_series(&args.series)?;
    let index = store.observation_index();

    println!("{} {}", "Series:".bright_cyan(), series.full_path.bright_white());
    match yoy_change(&index, series.series_id, args.month) {
        Some(change) => println!(
            "  {} {:+.2}%",
            args.month.format("%Y-%m").to_string().bright_cyan(),
            change
        ),
        None => println!(
            "  {} {}",
            args.month.format("%Y-%m").to_string().bright_cyan(),
            "no result (missing or zero base)".bright_yellow()
        ),
    }
    Ok(())
}

fn run_rolling(args: &RollingArgs) -> Result<()> {
    let (store, series) = open_series(&args.series)?;
    let index = store.observation_index();
    let means = moving_average(&index, series.series_id, args.window)?;

    println!(
        "{} {} ({}-month window)",
        "Series:".bright_cyan(),
        series.full_path.bright_white(),
        args.window
    );
    for (date, mean) in means {
        match mean {
            Some(mean) => println!("  {}  {:.2}", date.format("%Y-%m"), mean),
            None => println!("  {}  {}", date.format("%Y-%m"), "-".bright_black()),
        }
    }
    Ok(())
}

fn run_missing(args: &MissingArgs) -> Result<()> {
    let (store, series) = open_series(&args.series)?;
    let index = store.observation_index();
    let rate = missing_rate(&index, series.series_id, args.start, args.end)?;

    println!("{} {}", "Series:".bright_cyan(), series.full_path.bright_white());
    println!(
        "  {} {} to {}: {:.1}%",
        "Missing".bright_cyan(),
        args.start.format("%Y-%m"),
        args.end.format("%Y-%m"),
        rate * 100.0
    );
    Ok(())
}

fn run_report(args: &ReportArgs) -> Result<()> {
    let store = Store::open(&args.store)
        .with_context(|| format!("Failed to open store {}", args.store.display()))?;

    let mut df: DataFrame = match args.kind {
        ReportKind::Top => reports::top_latest(&store, args.limit)?,
        ReportKind::Monthly => reports::level_totals(&store, args.level)?,
        ReportKind::Yearly => reports::yearly_totals(&store, args.level)?,
        ReportKind::Missing => reports::missing_by_series(&store)?,
        ReportKind::Rebound => reports::rebound(&store, args.base_year, args.compare_year)?,
        ReportKind::Seasonality => reports::seasonality(&store, args.window, args.min_periods)?,
    };

    println!("{}", df);

    if let Some(path) = &args.csv {
        write_csv(&mut df, path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("{} {}", "Wrote".bright_green(), path.display());
    }
    Ok(())
}
