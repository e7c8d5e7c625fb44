//! The administrative reset-and-reload pipeline.
//!
//! Runs the operator-triggered sequence as one unit: ensure the schema
//! exists, clear both tables, parse the station files, bulk-load the
//! observations, and recompute the yearly statistics. Load and aggregation
//! failures are recorded in the report rather than aborting the run, so the
//! caller must inspect the report instead of assuming success. Re-running
//! the pipeline is always safe because it starts from a cleared archive.
//! Concurrent runs are not guarded in-process; serializing them is operator
//! responsibility.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument};
use uuid::Uuid;

use storage::Archive;

use crate::config::IngesterConfig;
use crate::error::Result;
use crate::reader::scan_directory;

/// Outcome of one pipeline run.
#[derive(Debug)]
pub struct IngestionReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub files_read: usize,
    pub lines_skipped: usize,
    pub rows_loaded: u64,
    pub statistics_rows: u64,
    pub load_error: Option<String>,
    pub aggregation_error: Option<String>,
    pub duration_ms: u64,
}

impl IngestionReport {
    /// Whether either storage stage failed.
    pub fn has_errors(&self) -> bool {
        self.load_error.is_some() || self.aggregation_error.is_some()
    }
}

/// Parser, loader, and aggregator wired to one archive.
pub struct IngestionPipeline {
    config: IngesterConfig,
    archive: Archive,
}

impl IngestionPipeline {
    /// Connect to the archive described by the configuration.
    pub async fn new(config: IngesterConfig) -> Result<Self> {
        let archive = Archive::connect(&config.database_url).await?;
        Ok(Self { config, archive })
    }

    /// Run the reset-and-reload operation once.
    pub async fn run(&self) -> Result<IngestionReport> {
        self.run_with_id(Uuid::new_v4()).await
    }

    #[instrument(skip(self), fields(run_id = %run_id))]
    async fn run_with_id(&self, run_id: Uuid) -> Result<IngestionReport> {
        let started_at = Utc::now();
        let run_started = Instant::now();
        info!(
            data_dir = %self.config.data_dir.display(),
            "Starting ingestion run"
        );

        // Schema bootstrap and reset are run-fatal: without a cleared
        // archive the remaining stages have nothing sound to work against.
        self.archive.migrate().await?;
        self.archive.clear().await?;

        let scan = scan_directory(&self.config.data_dir, &self.config.file_extension)?;

        let mut rows_loaded = 0;
        let mut load_error = None;
        let load_started = Instant::now();
        match self.archive.insert_observations(&scan.observations).await {
            Ok(count) => {
                rows_loaded = count;
                info!(
                    rows = count,
                    elapsed_ms = load_started.elapsed().as_millis() as u64,
                    "Observations loaded"
                );
            }
            Err(e) => {
                error!(
                    rows_attempted = scan.observations.len(),
                    elapsed_ms = load_started.elapsed().as_millis() as u64,
                    error = %e,
                    "Bulk load failed, batch rolled back"
                );
                load_error = Some(e.to_string());
            }
        }

        let mut statistics_rows = 0;
        let mut aggregation_error = None;
        let aggregate_started = Instant::now();
        match self.archive.aggregate_statistics().await {
            Ok(count) => {
                statistics_rows = count;
                info!(
                    rows = count,
                    elapsed_ms = aggregate_started.elapsed().as_millis() as u64,
                    "Statistics generated"
                );
            }
            Err(e) => {
                error!(error = %e, "Statistics generation failed, transaction rolled back");
                aggregation_error = Some(e.to_string());
            }
        }

        let report = IngestionReport {
            run_id,
            started_at,
            files_read: scan.files_read,
            lines_skipped: scan.lines_skipped,
            rows_loaded,
            statistics_rows,
            load_error,
            aggregation_error,
            duration_ms: run_started.elapsed().as_millis() as u64,
        };

        info!(
            files = report.files_read,
            rows = report.rows_loaded,
            statistics = report.statistics_rows,
            skipped_lines = report.lines_skipped,
            duration_ms = report.duration_ms,
            "Ingestion run complete"
        );

        Ok(report)
    }
}
