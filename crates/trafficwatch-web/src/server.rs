//! Web server setup and configuration

use crate::{routes::build_routes, state::AppState};
use axum::{Router, extract::DefaultBodyLimit};
use std::sync::Arc;
use trafficwatch_core::Config;

/// Build the complete web application with all routes and state
pub fn build_app(config: Config) -> Router {
    build_app_with_state(AppState::new(config))
}

/// Build the application around prepared state
///
/// Tests use this to inject a service with a mock backend.
pub fn build_app_with_state(state: AppState) -> Router {
    let body_limit = state.config.upload.max_upload_size;

    build_routes()
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(Arc::new(state))
}
