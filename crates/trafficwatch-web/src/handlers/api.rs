//! JSON API handlers

use crate::{
    analytics::{self, AnalyticsQuery, AnalyticsReport},
    error::ApiError,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use trafficwatch_core::{
    Alert, AlertId, TrafficRecord,
    aggregate::{self, AlertStatistics, TrafficSummary},
};
use trafficwatch_simulator::ServiceStatus;

/// Default history window in hours
pub const DEFAULT_HISTORY_HOURS: u32 = 24;

/// Record list response
#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    /// Records, most recent first
    pub records: Vec<TrafficRecord>,
    /// Number of records
    pub count: usize,
}

/// Alert list response
#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    /// Alerts, newest first
    pub alerts: Vec<Alert>,
    /// Counts by kind
    pub statistics: AlertStatistics,
}

/// Dismissal response
#[derive(Debug, Serialize)]
pub struct DismissResponse {
    /// Always true
    pub success: bool,
    /// The removed alert
    pub dismissed: Alert,
}

/// Summary response
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Card metrics over every record
    #[serde(flatten)]
    pub summary: TrafficSummary,
    /// Average congestion as a percentage
    pub average_congestion_percent: f64,
    /// Active alerts
    pub active_alerts: usize,
    /// Distinct locations, first seen first
    pub locations: Vec<String>,
}

/// History query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// Location to look up, required
    pub location: Option<String>,
    /// Window in hours, defaults to 24
    pub hours: Option<u32>,
}

/// History response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Location looked up
    pub location: String,
    /// Window in hours
    pub hours: u32,
    /// Matching records, most recent first
    pub records: Vec<TrafficRecord>,
}

/// `GET /api/records`
pub async fn list_records(State(state): State<Arc<AppState>>) -> Json<RecordsResponse> {
    let records = state.service.records();
    debug!(count = records.len(), "Listing records");
    Json(RecordsResponse {
        count: records.len(),
        records,
    })
}

/// `GET /api/alerts`
pub async fn list_alerts(State(state): State<Arc<AppState>>) -> Json<AlertsResponse> {
    let alerts = state.service.alerts();
    Json(AlertsResponse {
        statistics: aggregate::alert_statistics(&alerts),
        alerts,
    })
}

/// `DELETE /api/alerts/:id`
pub async fn dismiss_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AlertId>,
) -> Result<Json<DismissResponse>, ApiError> {
    let dismissed = state
        .service
        .dismiss_alert(id)
        .ok_or_else(|| ApiError::not_found(format!("Alert {id} not found")))?;

    info!(id, "Alert dismissed via API");
    Ok(Json(DismissResponse {
        success: true,
        dismissed,
    }))
}

/// `GET /api/summary`
pub async fn summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    let snapshot = state.service.snapshot();
    let summary =
        TrafficSummary::from_records(&snapshot.records, state.service.congestion_threshold());

    Json(SummaryResponse {
        average_congestion_percent: summary.average_congestion_percent(),
        summary,
        active_alerts: snapshot.alerts.len(),
        locations: aggregate::distinct_locations(&snapshot.records),
    })
}

/// `GET /api/analytics?location=&hours=`
pub async fn analytics_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyticsQuery>,
) -> Json<AnalyticsReport> {
    let (location, range) = query.filters();
    let records = analytics::load_records(&state.service, &location, range).await;
    Json(AnalyticsReport::build(
        &records,
        &location,
        range,
        state.service.congestion_threshold(),
    ))
}

/// `GET /api/history?location=&hours=`
pub async fn traffic_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let location = query
        .location
        .as_deref()
        .map(str::trim)
        .filter(|location| !location.is_empty())
        .ok_or_else(|| ApiError::bad_request("Please enter a location"))?
        .to_string();
    let hours = query.hours.unwrap_or(DEFAULT_HISTORY_HOURS);

    let records = state.service.traffic_history(&location, hours).await;
    Ok(Json(HistoryResponse {
        location,
        hours,
        records,
    }))
}

/// `GET /api/status`
pub async fn status(State(state): State<Arc<AppState>>) -> Json<ServiceStatus> {
    Json(state.service.status())
}
