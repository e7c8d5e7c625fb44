//! HTTP handlers for the weather read API.
//!
//! Both read endpoints answer 200 with a JSON array; no matches and
//! out-of-range pages yield an empty array. Only a storage fault produces a
//! non-200 status.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use storage::RecordQuery;
use wx_common::WxError;

use crate::state::AppState;

/// Query parameters accepted by both read endpoints.
///
/// Everything arrives as text and there is no user-input error path: a
/// `page` that fails to parse as a positive integer falls back to the first
/// page, and empty filter values are treated as absent.
#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub page: Option<String>,
    pub date: Option<String>,
    pub station: Option<String>,
}

impl ListParams {
    /// Convert to the storage-level query.
    pub fn to_query(&self) -> RecordQuery {
        RecordQuery {
            station: non_empty(&self.station),
            date: non_empty(&self.date),
            page: self
                .page
                .as_deref()
                .and_then(|p| p.trim().parse::<i64>().ok())
                .filter(|p| *p >= 1)
                .unwrap_or(1),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// GET /api/weather/ - one page of raw observations
pub async fn list_observations(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Response {
    match state.archive.observations(&params.to_query()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => storage_error(e),
    }
}

/// GET /api/weather/stats/ - one page of yearly statistics
pub async fn list_statistics(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Response {
    match state.archive.statistics(&params.to_query()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => storage_error(e),
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Basic health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub database: String,
}

/// GET /ready - Readiness check (verifies database connectivity)
pub async fn ready_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let database = match state.archive.ping().await {
        Ok(()) => "ok".to_string(),
        Err(e) => format!("error: {}", e),
    };
    let ready = database == "ok";

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadyResponse { ready, database })).into_response()
}

fn storage_error(err: WxError) -> Response {
    error!(error = %err, "Read query failed");
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_params_select_the_first_page_unfiltered() {
        let query = ListParams::default().to_query();
        assert_eq!(query.page, 1);
        assert_eq!(query.station, None);
        assert_eq!(query.date, None);
    }

    #[test]
    fn valid_page_values_pass_through() {
        let params = ListParams {
            page: Some("7".to_string()),
            ..Default::default()
        };
        assert_eq!(params.to_query().page, 7);
    }

    #[test]
    fn malformed_page_values_fall_back_to_the_default() {
        for bad in ["abc", "1.5", "-2", "0", ""] {
            let params = ListParams {
                page: Some(bad.to_string()),
                ..Default::default()
            };
            assert_eq!(params.to_query().page, 1, "page={:?}", bad);
        }
    }

    #[test]
    fn empty_filter_values_are_treated_as_absent() {
        let params = ListParams {
            station: Some(String::new()),
            date: Some("   ".to_string()),
            ..Default::default()
        };
        let query = params.to_query();
        assert_eq!(query.station, None);
        assert_eq!(query.date, None);
    }

    #[test]
    fn filter_values_are_trimmed_but_otherwise_passed_through() {
        let params = ListParams {
            station: Some(" station1 ".to_string()),
            date: Some("19860101".to_string()),
            ..Default::default()
        };
        let query = params.to_query();
        assert_eq!(query.station.as_deref(), Some("station1"));
        assert_eq!(query.date.as_deref(), Some("19860101"));
    }
}
