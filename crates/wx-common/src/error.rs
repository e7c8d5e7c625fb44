//! Error types for weather-obs services.

use thiserror::Error;

/// Result type alias using WxError.
pub type WxResult<T> = Result<T, WxError>;

/// Primary error type for archive operations.
#[derive(Debug, Error)]
pub enum WxError {
    // === Data Errors ===
    #[error("Failed to read data: {0}")]
    DataReadError(String),

    // === Storage Errors ===
    #[error("Database error: {0}")]
    DatabaseError(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl WxError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            WxError::ServiceUnavailable(_) => 503,
            _ => 500,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for WxError {
    fn from(err: std::io::Error) -> Self {
        WxError::DataReadError(err.to_string())
    }
}

impl From<serde_json::Error> for WxError {
    fn from(err: serde_json::Error) -> Self {
        WxError::InternalError(format!("JSON error: {}", err))
    }
}
