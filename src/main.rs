//! CLI entry point for the weather flight rater.
//!
//! Provides subcommands for running a single assessment cycle and for
//! polling both sources on a fixed interval, appending each published
//! assessment to a CSV history file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use wx_rater::acquire::{
    AerodromeSource, AviationWeatherClient, HttpStation, MetarRecord, StationRecord, StationSource,
};
use wx_rater::classify::assess;
use wx_rater::observations::CycleInput;
use wx_rater::output::{AssessmentRecord, append_record, print_json};

#[derive(Parser)]
#[command(name = "wx_rater")]
#[command(about = "Rates flight suitability from two weather sources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one assessment cycle and print the published record
    Assess {
        #[command(flatten)]
        sources: SourceArgs,

        /// CSV file to append the assessment to
        #[arg(short, long, default_value = "history.csv")]
        output: String,
    },
    /// Poll both sources on a fixed interval
    Watch {
        #[command(flatten)]
        sources: SourceArgs,

        /// CSV file to append assessments to
        #[arg(short, long, default_value = "history.csv")]
        output: String,

        /// Poll interval in seconds
        #[arg(short, long, default_value_t = 180)]
        interval: u64,

        /// Number of cycles to run (0 = infinite)
        #[arg(short = 'n', long, default_value_t = 0)]
        samples: usize,
    },
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Aerodrome station id queried against aviationweather.gov
    #[arg(short, long, default_value = "KSLC")]
    airport: String,

    /// Override: METAR geojson URL or file path (takes precedence over --airport)
    #[arg(long)]
    metar: Option<String>,

    /// Local station summary JSON URL or file path
    /// (falls back to the STATION_URL environment variable)
    #[arg(long)]
    station: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/wx_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("wx_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Assess { sources, output } => {
            let (aerodrome, station) = build_sources(&sources);
            run_cycle(&aerodrome, station.as_ref(), &output).await?;
        }
        Commands::Watch {
            sources,
            output,
            interval,
            samples,
        } => {
            let (aerodrome, station) = build_sources(&sources);
            watch(&aerodrome, station.as_ref(), &output, interval, samples).await?;
        }
    }

    Ok(())
}

fn build_sources(args: &SourceArgs) -> (AviationWeatherClient, Option<HttpStation>) {
    let aerodrome = match &args.metar {
        Some(source) => AviationWeatherClient::from_source(source.clone()),
        None => AviationWeatherClient::for_airport(&args.airport),
    };

    let station_source = args
        .station
        .clone()
        .or_else(|| std::env::var("STATION_URL").ok());
    if station_source.is_none() {
        warn!("No station source configured; secondary readings will be unavailable");
    }
    let station = station_source.map(HttpStation::from_source);

    (aerodrome, station)
}

/// Runs one full cycle: acquire both records, classify, publish.
///
/// A source that failed terminally becomes an explicit unavailable record
/// and the cycle proceeds through the fail-safe path. A hard validation
/// failure inside the pipeline is returned and nothing is published.
async fn run_cycle(
    aerodrome: &impl AerodromeSource,
    station: Option<&impl StationSource>,
    output: &str,
) -> Result<AssessmentRecord> {
    let metar = match aerodrome.latest().await {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, "Aerodrome source unavailable");
            MetarRecord::unavailable()
        }
    };

    let station_record = match station {
        Some(source) => match source.latest().await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Station source unavailable");
                StationRecord::unavailable()
            }
        },
        None => StationRecord::unavailable(),
    };

    let input = CycleInput::from_records(&metar, &station_record)?;
    let assessment = assess(&input)?;
    let record = AssessmentRecord::from_assessment(&assessment);

    append_record(output, &record)?;
    print_json(&record)?;

    info!(
        rating = record.rating,
        wind_kt = record.wind_kt,
        gust_kt = record.gust_kt,
        "Cycle published"
    );

    Ok(record)
}

/// Polls both sources on a fixed interval.
///
/// A cycle that produces no assessment leaves the previously published one
/// in place; the loop itself never retries within a cycle.
async fn watch(
    aerodrome: &impl AerodromeSource,
    station: Option<&impl StationSource>,
    output: &str,
    interval: u64,
    samples: usize,
) -> Result<()> {
    if samples == 0 {
        info!(interval, "Polling infinitely. Press Ctrl+C to stop.");
    } else {
        info!(samples, interval, "Starting assessment cycles");
    }

    let mut cycle_count = 0;
    let mut last_published: Option<AssessmentRecord> = None;

    loop {
        if samples > 0 && cycle_count >= samples {
            break;
        }
        cycle_count += 1;

        info!(
            cycle = cycle_count,
            total = if samples == 0 { None } else { Some(samples) },
            "Starting cycle"
        );

        match run_cycle(aerodrome, station, output).await {
            Ok(record) => last_published = Some(record),
            Err(e) => {
                error!(
                    error = %e,
                    has_previous = last_published.is_some(),
                    "Cycle produced no assessment; keeping previous one"
                );
            }
        }

        if samples == 0 || cycle_count < samples {
            tokio::time::sleep(tokio::time::Duration::from_secs(interval)).await;
        }
    }

    info!(cycles = cycle_count, "Finished assessment cycles");
    Ok(())
}
