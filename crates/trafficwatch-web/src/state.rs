//! Application state management

use std::sync::Arc;
use std::time::Instant;
use trafficwatch_core::Config;
use trafficwatch_simulator::TrafficService;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Store and simulated analysis pipeline
    pub service: Arc<TrafficService>,
    /// When the server started
    pub started_at: Instant,
}

impl AppState {
    /// Create state with a service built from the simulator settings
    pub fn new(config: Config) -> Self {
        let service = Arc::new(TrafficService::from_config(config.simulator.clone()));
        Self::with_service(config, service)
    }

    /// Create state around an existing service
    pub fn with_service(config: Config, service: Arc<TrafficService>) -> Self {
        Self {
            config,
            service,
            started_at: Instant::now(),
        }
    }

    /// Image extensions accepted by the upload form
    #[must_use]
    pub fn allowed_extensions(&self) -> &[String] {
        &self.config.upload.allowed_extensions
    }

    /// Seconds since the server started
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
