//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness endpoints for monitoring and
//! load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_persistence::core::BookCatalog;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Returns a simple health status without touching the backends.
///
/// # HTTP Request
///
/// `GET [base]/health`
pub async fn health_handler() -> Response {
    debug!("Processing health check request");

    let health_response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(health_response)).into_response()
}

/// Handler for the liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for the readiness probe.
///
/// Runs the health check of every backend behind the catalog.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
///
/// # Response
///
/// - `200 OK` - every backend answered
/// - `503 Service Unavailable` - at least one backend failed
pub async fn readiness_handler<C>(State(state): State<AppState<C>>) -> Response
where
    C: BookCatalog + Send + Sync,
{
    debug!("Processing readiness check request");

    let report = state.catalog().health_check().await;

    let mut checks = Map::new();
    let mut ready = true;
    for (name, outcome) in report {
        let value = match outcome {
            Ok(()) => Value::from("ok"),
            Err(e) => {
                warn!(backend = name, error = %e, "Backend not ready");
                ready = false;
                Value::from(e.to_string())
            }
        };
        checks.insert(name.to_string(), value);
    }

    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (status, Json(json!({ "status": label, "checks": checks }))).into_response()
}
