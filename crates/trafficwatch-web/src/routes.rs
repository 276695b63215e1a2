//! Route definitions

use crate::{
    handlers::{api, health, pages, upload},
    state::AppState,
};
use axum::{
    Json, Router,
    http::StatusCode,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

/// Server-rendered pages and their form targets
pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(pages::dashboard))
        .route("/upload", get(pages::upload_page).post(pages::submit_upload))
        .route("/analytics", get(pages::analytics_page))
        .route("/alerts", get(pages::alerts_page))
        .route("/alerts/:id/dismiss", post(pages::dismiss_alert))
}

/// JSON API
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/records", get(api::list_records))
        .route("/api/alerts", get(api::list_alerts))
        .route("/api/alerts/:id", delete(api::dismiss_alert))
        .route("/api/summary", get(api::summary))
        .route("/api/analytics", get(api::analytics_report))
        .route("/api/history", get(api::traffic_history))
        .route("/api/status", get(api::status))
        .route("/api/upload", post(upload::upload_image))
        .layer(CompressionLayer::new())
}

/// Health check routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health::health_check))
}

/// Build all application routes
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(page_routes())
        .merge(api_routes())
        .merge(health_routes())
        .fallback(not_found_handler)
}

/// Handle 404 Not Found errors
async fn not_found_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not Found",
            "code": "ROUTE_NOT_FOUND",
            "message": "The requested endpoint does not exist"
        })),
    )
}
