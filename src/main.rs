//! CLI entry point for the bikeshare explorer.
//!
//! Provides subcommands for rendering the aggregate views of one region
//! and for listing the configured regions. The trip table is built once
//! per invocation, before any aggregation runs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use bikeshare_explorer::aggregators::region_report;
use bikeshare_explorer::loader::RegionSources;
use bikeshare_explorer::output::{render_text, write_json};
use bikeshare_explorer::table::TripTable;

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore regional bikeshare trip data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the trip table and report all aggregate views for one region
    Report {
        /// Region id to report on (e.g. "chicago")
        region: String,

        /// Directory containing one trip CSV per region (file stem = region id)
        #[arg(short, long, default_value = "Data")]
        data_dir: String,

        /// JSON file mapping region ids to CSV paths; overrides --data-dir
        #[arg(short, long)]
        sources: Option<String>,

        /// Write the report as JSON to this path instead of rendering text
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List configured regions and their trip counts
    Regions {
        /// Directory containing one trip CSV per region
        #[arg(short, long, default_value = "Data")]
        data_dir: String,

        /// JSON file mapping region ids to CSV paths; overrides --data-dir
        #[arg(short, long)]
        sources: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            region,
            data_dir,
            sources,
            output,
        } => {
            let sources = resolve_sources(sources.as_deref(), &data_dir)?;
            anyhow::ensure!(
                sources.contains(&region),
                "unknown region {region:?}; configured regions: {:?}",
                sources.region_ids().collect::<Vec<_>>()
            );

            let table = TripTable::build(&sources)?;
            let report = region_report(&table, &region);

            match output {
                Some(path) => write_json(&path, &report)?,
                None => print!("{}", render_text(&report)),
            }
        }
        Commands::Regions { data_dir, sources } => {
            let sources = resolve_sources(sources.as_deref(), &data_dir)?;
            let table = TripTable::build(&sources)?;

            for region in sources.region_ids() {
                info!(region, trips = table.region_len(region), "Region");
                println!("{region}\t{}", table.region_len(region));
            }
        }
    }

    Ok(())
}

/// Builds the region map from an explicit JSON sources file, or by
/// scanning the data directory when no file is given.
fn resolve_sources(sources_file: Option<&str>, data_dir: &str) -> Result<RegionSources> {
    let sources = match sources_file {
        Some(path) => RegionSources::from_file(path)?,
        None => RegionSources::discover(data_dir)?,
    };
    anyhow::ensure!(
        !sources.is_empty(),
        "no region sources configured in {data_dir}"
    );
    Ok(sources)
}
