//! Weather observation ingestion library.
//!
//! Provides the record parser for station text files and the
//! reset-and-reload pipeline used by the `ingester` service. It handles:
//!
//! - Directory scanning and per-line parsing of station files
//! - Bulk loading of parsed observations (whole-batch transaction)
//! - Recomputation of per-station yearly statistics

pub mod config;
pub mod error;
pub mod pipeline;
pub mod reader;

// Re-exports
pub use config::IngesterConfig;
pub use error::{IngestionError, Result};
pub use pipeline::{IngestionPipeline, IngestionReport};
pub use reader::{scan_directory, LineError, ScanReport};
