//! Fixture helpers for station observation files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Create a temporary directory to hold station files.
pub fn data_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Write one station file into `dir` and return its path.
///
/// Each entry in `lines` becomes one line of the file.
pub fn write_station_file(dir: &Path, file_name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(file_name);
    let mut file = fs::File::create(&path).expect("failed to create station file");
    for line in lines {
        writeln!(file, "{}", line).expect("failed to write station line");
    }
    path
}

/// A well-formed observation line.
pub fn observation_line(date: &str, max_temp: i32, min_temp: i32, precip: i32) -> String {
    format!("{}\t{}\t{}\t{}", date, max_temp, min_temp, precip)
}

/// The three-row fixture shared by the archive and API tests: two stations,
/// with one date repeated across them.
pub fn three_row_fixture(dir: &Path) {
    write_station_file(
        dir,
        "station1.txt",
        &[
            observation_line("19850101", 10, 1, 10),
            observation_line("19860101", 30, 3, 30),
        ],
    );
    write_station_file(
        dir,
        "station2.txt",
        &[observation_line("19860101", 20, 2, 20)],
    );
}
