//! Parsing of raw station observation files.
//!
//! Each file holds one station's daily readings as tab-separated lines,
//! `DATE\tMAXTEMP\tMINTEMP\tPRECIP`, all integers with `-9999` marking a
//! missing measurement. The station identifier is the file name minus its
//! extension.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use storage::Observation;
use wx_common::normalize_day;

use crate::error::{IngestionError, Result};

/// Fields per observation line.
const FIELD_COUNT: usize = 4;

/// Longest station identifier the archive accepts.
const MAX_STATION_LEN: usize = 15;

/// Why a single line was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("expected 4 tab-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("field '{field}' is not an integer: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("malformed date: {value:?}")]
    InvalidDate { value: String },
}

/// Everything produced by one directory scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub observations: Vec<Observation>,
    pub files_read: usize,
    pub lines_skipped: usize,
}

/// Parse every station file in `dir` carrying the given extension.
///
/// Malformed lines are logged and skipped without aborting the file or the
/// scan; an unreadable file or directory fails the whole scan.
pub fn scan_directory(dir: &Path, extension: &str) -> Result<ScanReport> {
    if !dir.is_dir() {
        return Err(IngestionError::InvalidDataDir(dir.to_path_buf()));
    }

    let mut report = ScanReport::default();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| IngestionError::FileRead(e.into()))?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }

        let Some(station) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!(path = %path.display(), "Skipping file with undecodable name");
            continue;
        };
        if station.len() > MAX_STATION_LEN {
            // The station column is VARCHAR(15); one odd file must not
            // poison the whole batch.
            warn!(
                station = %station,
                path = %path.display(),
                "Skipping file: station identifier exceeds {} characters",
                MAX_STATION_LEN
            );
            continue;
        }

        read_station_file(path, station, &mut report)?;
        report.files_read += 1;
    }

    info!(
        files = report.files_read,
        records = report.observations.len(),
        skipped = report.lines_skipped,
        "Directory scan complete"
    );

    Ok(report)
}

/// Parse one station file, appending to the report.
fn read_station_file(path: &Path, station: &str, report: &mut ScanReport) -> Result<()> {
    debug!(station = %station, path = %path.display(), "Reading station file");
    let contents = fs::read_to_string(path)?;

    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(reading) => report.observations.push(Observation {
                station: station.to_string(),
                date: reading.date,
                maximum_temperature: reading.maximum_temperature,
                minimum_temperature: reading.minimum_temperature,
                precipitation: reading.precipitation,
            }),
            Err(e) => {
                warn!(
                    station = %station,
                    line = index + 1,
                    error = %e,
                    "Skipping malformed line"
                );
                report.lines_skipped += 1;
            }
        }
    }

    Ok(())
}

/// One parsed line, before it is attached to a station.
#[derive(Debug, PartialEq, Eq)]
struct DailyReading {
    date: String,
    maximum_temperature: i32,
    minimum_temperature: i32,
    precipitation: i32,
}

fn parse_line(line: &str) -> std::result::Result<DailyReading, LineError> {
    // Field count is checked before any indexed access.
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(LineError::FieldCount {
            found: fields.len(),
        });
    }

    let date = normalize_day(fields[0].trim()).ok_or_else(|| LineError::InvalidDate {
        value: fields[0].to_string(),
    })?;

    Ok(DailyReading {
        date,
        maximum_temperature: parse_field("maximum_temperature", fields[1])?,
        minimum_temperature: parse_field("minimum_temperature", fields[2])?,
        precipitation: parse_field("precipitation", fields[3])?,
    })
}

fn parse_field(field: &'static str, raw: &str) -> std::result::Result<i32, LineError> {
    raw.trim().parse().map_err(|_| LineError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}
