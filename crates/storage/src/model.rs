//! Entities stored in the weather archive.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Rows returned per page by the read operations. Not configurable through
/// the API.
pub const PAGE_SIZE: i64 = 100;

/// Sentinel marking a missing daily measurement.
pub const MISSING: i32 = -9999;

/// One station-day reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Observation {
    pub station: String,
    /// `YYYYMMDD`, zero-padded.
    pub date: String,
    /// Tenths of a degree Celsius; [`MISSING`] when not measured.
    pub maximum_temperature: i32,
    /// Tenths of a degree Celsius; [`MISSING`] when not measured.
    pub minimum_temperature: i32,
    /// Tenths of a millimetre; [`MISSING`] when not measured.
    pub precipitation: i32,
}

/// One station-year aggregate, recomputed from observations on each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Statistic {
    pub station: String,
    /// `YYYY`.
    pub date: String,
    pub final_maximum_temperature: f64,
    pub final_minimum_temperature: f64,
    pub final_precipitation: f64,
}

/// Equality filters and page selector for the read operations.
///
/// Absent filters match everything; present filters combine with AND.
/// Pages are 1-based and values below 1 select the first page.
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    pub station: Option<String>,
    pub date: Option<String>,
    pub page: i64,
}

impl RecordQuery {
    /// Row offset of the selected page.
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * PAGE_SIZE
    }
}
