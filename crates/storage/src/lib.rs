//! Storage layer for the weather-obs workspace.
//!
//! Provides the PostgreSQL archive holding raw daily observations and the
//! per-station yearly statistics derived from them.

pub mod archive;
pub mod model;

pub use archive::Archive;
pub use model::{Observation, RecordQuery, Statistic, MISSING, PAGE_SIZE};
