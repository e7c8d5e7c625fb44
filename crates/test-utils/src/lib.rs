//! Shared test utilities for the weather-obs workspace.
//!
//! Provides fixture helpers for building station data directories and a
//! skip macro for tests that need a live PostgreSQL instance.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;

// Re-export commonly used items at the crate root
pub use fixtures::*;

/// Macro to skip a test when no test database is configured.
///
/// Expands to the connection URL from `TEST_DATABASE_URL`. Database-backed
/// tests truncate the `observations` and `statistics` tables, so point the
/// variable at a throwaway database.
///
/// # Usage
///
/// ```ignore
/// use test_utils::require_database;
///
/// #[tokio::test]
/// async fn test_round_trip() {
///     let url = require_database!();
///     // Test code using url...
/// }
/// ```
///
/// If the variable is not set, the test prints a skip message and returns
/// early.
#[macro_export]
macro_rules! require_database {
    () => {{
        match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("SKIPPED: set TEST_DATABASE_URL to run database-backed tests.");
                return;
            }
        }
    }};
}
