//! Mock analysis backend for testing

use crate::backend::{AnalysisBackend, Reading};
use crate::error::{SimulatorError, SimulatorResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::{Duration, sleep};
use trafficwatch_core::{ImageFile, VehicleCounts};

/// Mock analysis backend for testing
///
/// Replays queued readings in order and repeats the fallback reading once
/// the queue is empty.
#[derive(Debug)]
pub struct MockAnalysisBackend {
    /// Readings handed out first
    queue: Mutex<VecDeque<Reading>>,

    /// Reading used when the queue is empty
    fallback: Reading,

    /// Mock processing delay
    processing_delay_ms: u64,

    /// Failure message, if configured to fail
    failure: Option<String>,

    /// Number of `analyze` calls
    calls: AtomicUsize,

    /// Locations passed to `analyze`, in call order
    locations: Mutex<Vec<String>>,
}

impl MockAnalysisBackend {
    /// Create a mock that returns a quiet, alert-free reading
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Reading {
                vehicle_counts: VehicleCounts::new(8, 1, 0, 2, 0),
                congestion_score: 0.3,
                clearance_time_minutes: 6,
                ambulance_detected: false,
            },
            processing_delay_ms: 0,
            failure: None,
            calls: AtomicUsize::new(0),
            locations: Mutex::new(Vec::new()),
        }
    }

    /// Queue a reading
    pub fn with_reading(self, reading: Reading) -> Self {
        self.queue.lock().push_back(reading);
        self
    }

    /// Set processing delay for testing
    pub const fn with_delay(mut self, delay_ms: u64) -> Self {
        self.processing_delay_ms = delay_ms;
        self
    }

    /// Configure to fail every analysis
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of analyses requested so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Locations passed to `analyze`, in call order
    pub fn locations(&self) -> Vec<String> {
        self.locations.lock().clone()
    }

    /// Reading with the given score and ambulance flag
    pub const fn reading(congestion_score: f64, ambulance_detected: bool) -> Reading {
        Reading {
            vehicle_counts: VehicleCounts::new(12, 2, 1, 3, if ambulance_detected { 1 } else { 0 }),
            congestion_score,
            clearance_time_minutes: 10,
            ambulance_detected,
        }
    }
}

impl Default for MockAnalysisBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisBackend for MockAnalysisBackend {
    async fn analyze(&self, location: &str, _image: &ImageFile) -> SimulatorResult<Reading> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.locations.lock().push(location.to_string());

        if self.processing_delay_ms > 0 {
            sleep(Duration::from_millis(self.processing_delay_ms)).await;
        }

        if let Some(message) = &self.failure {
            return Err(SimulatorError::backend(message.clone()));
        }

        let queued = self.queue.lock().pop_front();
        Ok(queued.unwrap_or(self.fallback))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image() -> ImageFile {
        ImageFile::new("frame.png", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_queued_readings_then_fallback() {
        let backend = MockAnalysisBackend::new()
            .with_reading(MockAnalysisBackend::reading(0.9, false))
            .with_reading(MockAnalysisBackend::reading(0.1, true));

        let first = backend.analyze("A", &image()).await.unwrap();
        let second = backend.analyze("B", &image()).await.unwrap();
        let third = backend.analyze("C", &image()).await.unwrap();

        assert_eq!(first.congestion_score, 0.9);
        assert!(second.ambulance_detected);
        assert_eq!(third.congestion_score, 0.3);
        assert_eq!(backend.calls(), 3);
        assert_eq!(backend.locations(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let backend = MockAnalysisBackend::new().with_failure("camera offline");
        let error = backend.analyze("A", &image()).await.unwrap_err();
        assert_eq!(error.to_string(), "Analysis failed: camera offline");
        assert_eq!(backend.calls(), 1);
    }

    #[test]
    fn test_reading_helper_keeps_counts_consistent() {
        let reading = MockAnalysisBackend::reading(0.75, true);
        assert_eq!(reading.vehicle_counts.ambulances(), 1);
        assert_eq!(reading.vehicle_counts.total(), 19);
    }
}
