//! Weather observation ingester service.
//!
//! Runs the administrative reset-and-reload operation as one unit: clears
//! the archive, parses the station files in the data directory, bulk-loads
//! the observations, and recomputes the yearly statistics. Safe to re-run;
//! it always starts from a cleared archive.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use ingestion::{IngesterConfig, IngestionPipeline};

#[derive(Parser, Debug)]
#[command(name = "ingester")]
#[command(about = "Reset-and-reload ingestion for the weather observation archive")]
struct Args {
    /// Directory of station observation files (overrides WX_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<std::path::PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting weather observation ingester");

    let mut config = IngesterConfig::from_env();
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    info!(
        data_dir = %config.data_dir.display(),
        extension = %config.file_extension,
        "Loaded configuration"
    );

    let pipeline = IngestionPipeline::new(config).await?;
    let report = pipeline.run().await?;

    if report.has_errors() {
        if let Some(e) = &report.load_error {
            error!(error = %e, "Bulk load failed");
        }
        if let Some(e) = &report.aggregation_error {
            error!(error = %e, "Aggregation failed");
        }
        anyhow::bail!("ingestion run {} completed with errors", report.run_id);
    }

    info!(
        run_id = %report.run_id,
        files = report.files_read,
        rows = report.rows_loaded,
        statistics = report.statistics_rows,
        skipped_lines = report.lines_skipped,
        duration_ms = report.duration_ms,
        "Ingestion run succeeded"
    );

    Ok(())
}
