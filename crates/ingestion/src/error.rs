//! Error types for the ingestion crate.

use std::path::PathBuf;

use thiserror::Error;

use wx_common::WxError;

/// Errors that can occur during an ingestion run.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Data directory not found: {}", .0.display())]
    InvalidDataDir(PathBuf),

    #[error("Archive operation failed: {0}")]
    Archive(#[from] WxError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestionError>;
