//! Shared helpers for router tests

#![allow(dead_code, clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use std::sync::Arc;
use tower::ServiceExt;
use trafficwatch_core::Config;
use trafficwatch_simulator::{MockAnalysisBackend, TrafficService, TrafficStore};
use trafficwatch_web::{AppState, build_app_with_state};

/// Boundary used by [`multipart_body`]
pub const BOUNDARY: &str = "----trafficwatch-test-boundary";

/// Configuration with both simulated latencies removed
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.simulator = config.simulator.without_latency();
    config
}

/// App over the sample store and the given mock backend
pub fn app_with_backend(backend: Arc<MockAnalysisBackend>) -> (Router, Arc<TrafficService>) {
    app_with_store(TrafficStore::with_sample_data(chrono::Utc::now()), backend)
}

/// App over an explicit store and mock backend
pub fn app_with_store(
    store: TrafficStore,
    backend: Arc<MockAnalysisBackend>,
) -> (Router, Arc<TrafficService>) {
    let config = test_config();
    let service = Arc::new(TrafficService::new(
        store,
        backend,
        config.simulator.clone(),
    ));
    let state = AppState::with_service(config, Arc::clone(&service));
    (build_app_with_state(state), service)
}

/// Multipart body with an optional image part and a location part
pub fn multipart_body(image: Option<(&str, &[u8])>, location: &str) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((filename, data)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"location\"\r\n\r\n{location}\r\n--{BOUNDARY}--\r\n"
        )
        .as_bytes(),
    );
    body
}

/// POST a multipart body to `uri`
pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Send one request through the router
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// GET `uri`
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

/// Response body as text
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
