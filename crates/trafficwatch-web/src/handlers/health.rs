//! Health check endpoint

use crate::state::AppState;
use axum::{extract::State, response::Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Timestamp of the check
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Records currently held by the store
    pub records: usize,
    /// Alerts currently held by the store
    pub alerts: usize,
}

/// Basic health check
///
/// The store lives in memory, so the service is healthy whenever it can
/// answer.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = state.service.snapshot();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        uptime_seconds: state.uptime_seconds(),
        records: snapshot.records.len(),
        alerts: snapshot.alerts.len(),
    })
}
