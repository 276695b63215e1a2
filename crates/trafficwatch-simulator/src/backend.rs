//! Analysis backend trait
//!
//! A backend turns an uploaded image into a [`Reading`]. The simulator
//! ships a random backend for the running dashboard and a mock backend for
//! tests; a real detection model would plug in behind the same trait.

use crate::error::SimulatorResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trafficwatch_core::{ImageFile, TrafficRecord, VehicleCounts, utils};

/// Output of analysing one image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Vehicle counts by category
    pub vehicle_counts: VehicleCounts,
    /// Traffic density in `[0, 1]`
    pub congestion_score: f64,
    /// Estimated minutes until normal flow resumes
    pub clearance_time_minutes: u32,
    /// Whether an ambulance was detected
    pub ambulance_detected: bool,
}

impl Reading {
    /// Turn the reading into a record for `location` taken at `timestamp`
    #[must_use]
    pub fn into_record(self, location: &str, timestamp: DateTime<Utc>) -> TrafficRecord {
        TrafficRecord {
            frame_id: utils::frame_id(location, &timestamp),
            timestamp,
            location: location.to_string(),
            vehicle_counts: self.vehicle_counts,
            congestion_score: self.congestion_score,
            clearance_time_minutes: self.clearance_time_minutes,
            ambulance_detected: self.ambulance_detected,
        }
    }
}

/// Source of readings for uploaded images
#[async_trait]
pub trait AnalysisBackend: Send + Sync + std::fmt::Debug {
    /// Analyse one image captured at `location`
    async fn analyze(&self, location: &str, image: &ImageFile) -> SimulatorResult<Reading>;

    /// Backend name, used in logs
    fn name(&self) -> &str;
}
