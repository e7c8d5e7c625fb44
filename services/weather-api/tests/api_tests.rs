//! Tests for the weather read API.
//!
//! The serialization tests pin the wire shape of both endpoints and run
//! everywhere. The end-to-end test drives the full ingest pipeline and the
//! query service against a live PostgreSQL instance; it is skipped unless
//! `TEST_DATABASE_URL` is set.

use std::sync::Mutex;

use ingestion::{IngesterConfig, IngestionPipeline};
use storage::{Archive, Observation, Statistic};
use test_utils::{data_dir, require_database, three_row_fixture};
use weather_api::handlers::ListParams;
use weather_api::state::AppState;

// ============================================================================
// Response serialization tests
// ============================================================================

#[test]
fn observation_serializes_with_the_documented_field_names() {
    let obs = Observation {
        station: "station1".to_string(),
        date: "19850101".to_string(),
        maximum_temperature: 1,
        minimum_temperature: 1,
        precipitation: 10,
    };

    let json = serde_json::to_value(&obs).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "station": "station1",
            "date": "19850101",
            "maximum_temperature": 1,
            "minimum_temperature": 1,
            "precipitation": 10
        })
    );
}

#[test]
fn statistic_serializes_with_the_documented_field_names() {
    let stat = Statistic {
        station: "station1".to_string(),
        date: "1985".to_string(),
        final_maximum_temperature: 1.5,
        final_minimum_temperature: 0.5,
        final_precipitation: 10.0,
    };

    let json = serde_json::to_value(&stat).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "station": "station1",
            "date": "1985",
            "final_maximum_temperature": 1.5,
            "final_minimum_temperature": 0.5,
            "final_precipitation": 10.0
        })
    );
}

#[test]
fn empty_result_serializes_as_an_empty_array() {
    let rows: Vec<Observation> = Vec::new();
    assert_eq!(serde_json::to_string(&rows).unwrap(), "[]");
}

// ============================================================================
// End-to-end: pipeline then query service
// ============================================================================

static DB_LOCK: Mutex<()> = Mutex::new(());

#[tokio::test]
async fn ingested_fixture_is_fully_readable_through_the_query_service() {
    let url = require_database!();
    let _guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let dir = data_dir();
    three_row_fixture(dir.path());

    let config = IngesterConfig {
        database_url: url.clone(),
        data_dir: dir.path().to_path_buf(),
        file_extension: "txt".to_string(),
    };
    let pipeline = IngestionPipeline::new(config).await.unwrap();
    let report = pipeline.run().await.unwrap();
    assert!(!report.has_errors());
    assert_eq!(report.rows_loaded, 3);

    let state = AppState::with_archive(Archive::connect(&url).await.unwrap());

    // No filters: the whole fixture on the first page.
    let all = state
        .archive
        .observations(&ListParams::default().to_query())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    // station + date combine with AND down to a single row.
    let params = ListParams {
        station: Some("station1".to_string()),
        date: Some("19860101".to_string()),
        page: None,
    };
    let matched = state
        .archive
        .observations(&params.to_query())
        .await
        .unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].maximum_temperature, 30);

    // A malformed page falls back to the first page.
    let params = ListParams {
        page: Some("not-a-number".to_string()),
        ..Default::default()
    };
    assert_eq!(
        state
            .archive
            .observations(&params.to_query())
            .await
            .unwrap()
            .len(),
        3
    );

    // A page past the end is empty, not an error.
    let params = ListParams {
        page: Some("2".to_string()),
        ..Default::default()
    };
    assert!(state
        .archive
        .observations(&params.to_query())
        .await
        .unwrap()
        .is_empty());

    // One statistic per station-year: station1 in 1985 and 1986,
    // station2 in 1986.
    let stats = state
        .archive
        .statistics(&ListParams::default().to_query())
        .await
        .unwrap();
    assert_eq!(stats.len(), 3);

    let params = ListParams {
        station: Some("station2".to_string()),
        ..Default::default()
    };
    let station2 = state.archive.statistics(&params.to_query()).await.unwrap();
    assert_eq!(station2.len(), 1);
    assert_eq!(station2[0].date, "1986");
    assert_eq!(station2[0].final_maximum_temperature, 20.0);
    assert_eq!(station2[0].final_precipitation, 20.0);
}
