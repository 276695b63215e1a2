//! Upload simulator service
//!
//! Owns the store and the analysis backend. Every mutation of the store
//! happens under a single write lock, so readers never observe a record
//! without the alert it raised. Simulated latencies are awaited before the
//! lock is taken.

use crate::backend::AnalysisBackend;
use crate::error::SimulatorResult;
use crate::random::RandomAnalysisBackend;
use crate::rules;
use crate::store::TrafficStore;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};
use trafficwatch_core::{
    Alert, AlertId, TrafficRecord, ValidatedUpload, aggregate::TrafficSummary,
    config::SimulatorConfig,
};
use validator::Validate;

/// Result of a successful simulated upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    /// The generated record
    pub record: TrafficRecord,
    /// The alert it raised, if any
    pub alert: Option<Alert>,
}

/// Consistent copy of the store contents
#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    /// Records, most recent first
    pub records: Vec<TrafficRecord>,
    /// Alerts, in insertion order
    pub alerts: Vec<Alert>,
    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}

impl StoreSnapshot {
    /// Alerts ordered newest first
    #[must_use]
    pub fn alerts_by_recency(&self) -> Vec<Alert> {
        let mut alerts = self.alerts.clone();
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        alerts
    }
}

/// Loading flag and last error, as shown by the views
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    /// Whether a simulated call is in flight
    pub loading: bool,
    /// Message of the most recent failure, cleared by the next upload
    pub last_error: Option<String>,
}

/// Marks one simulated call as in flight until dropped
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Traffic store plus the simulated analysis pipeline
#[derive(Debug)]
pub struct TrafficService {
    store: RwLock<TrafficStore>,
    backend: Arc<dyn AnalysisBackend>,
    settings: SimulatorConfig,
    in_flight: AtomicUsize,
    last_error: RwLock<Option<String>>,
}

impl TrafficService {
    /// Create a service from an explicit store and backend
    pub fn new(
        store: TrafficStore,
        backend: Arc<dyn AnalysisBackend>,
        settings: SimulatorConfig,
    ) -> Self {
        Self {
            store: RwLock::new(store),
            backend,
            settings,
            in_flight: AtomicUsize::new(0),
            last_error: RwLock::new(None),
        }
    }

    /// Create a service with the random backend, seeded as configured
    pub fn from_config(settings: SimulatorConfig) -> Self {
        let store = if settings.seed_sample_data {
            TrafficStore::with_sample_data(Utc::now())
        } else {
            TrafficStore::empty()
        };
        let backend = settings
            .rng_seed
            .map_or_else(RandomAnalysisBackend::new, RandomAnalysisBackend::with_seed);

        info!(
            seeded = settings.seed_sample_data,
            upload_latency_ms = settings.upload_latency_ms,
            threshold = settings.congestion_threshold,
            "Traffic service initialized"
        );
        Self::new(store, Arc::new(backend), settings)
    }

    /// Simulator settings in use
    pub const fn settings(&self) -> &SimulatorConfig {
        &self.settings
    }

    /// Congestion score above which an alert is raised
    pub const fn congestion_threshold(&self) -> f64 {
        self.settings.congestion_threshold
    }

    /// Analyse an uploaded image and store the result
    ///
    /// Waits the configured upload latency, asks the backend for a reading,
    /// then prepends the record and appends its alert in one step. A
    /// failure is remembered as the last error and nothing is stored.
    pub async fn upload_image(&self, upload: ValidatedUpload) -> SimulatorResult<UploadOutcome> {
        let _loading = InFlight::start(&self.in_flight);
        *self.last_error.write() = None;

        match self.run_upload(&upload).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(
                    location = upload.location(),
                    backend = self.backend.name(),
                    error = %e,
                    "Simulated upload failed"
                );
                *self.last_error.write() = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn run_upload(&self, upload: &ValidatedUpload) -> SimulatorResult<UploadOutcome> {
        let location = upload.location();
        debug!(
            location,
            filename = %upload.image().filename,
            bytes = upload.image().len(),
            "Starting simulated analysis"
        );

        tokio::time::sleep(self.settings.upload_latency()).await;

        let reading = self.backend.analyze(location, upload.image()).await?;
        let record = reading.into_record(location, Utc::now());
        record.validate()?;

        let draft = rules::derive_alert(&record, self.settings.congestion_threshold);
        let alert = self.store.write().insert(record.clone(), draft);

        info!(
            frame_id = %record.frame_id,
            location,
            vehicles = record.vehicle_counts.total(),
            congestion = record.congestion_score,
            alert = ?alert.as_ref().map(|a| a.kind),
            "Traffic image analyzed"
        );

        Ok(UploadOutcome { record, alert })
    }

    /// Records at `location` from the last `hours` hours
    ///
    /// Waits the configured history latency first.
    pub async fn traffic_history(&self, location: &str, hours: u32) -> Vec<TrafficRecord> {
        let _loading = InFlight::start(&self.in_flight);
        tokio::time::sleep(self.settings.history_latency()).await;

        let since = history_cutoff(Utc::now(), hours);
        let records = self.store.read().history(location, since);
        debug!(location, hours, found = records.len(), "History query");
        records
    }

    /// Remove one alert by id
    pub fn dismiss_alert(&self, id: AlertId) -> Option<Alert> {
        let removed = self.store.write().dismiss_alert(id);
        match &removed {
            Some(alert) => info!(id, kind = %alert.kind, "Alert dismissed"),
            None => debug!(id, "Dismiss ignored, no such alert"),
        }
        removed
    }

    /// Copy of the current records and alerts
    pub fn snapshot(&self) -> StoreSnapshot {
        let store = self.store.read();
        StoreSnapshot {
            records: store.records().to_vec(),
            alerts: store.alerts().to_vec(),
            taken_at: Utc::now(),
        }
    }

    /// Records, most recent first
    pub fn records(&self) -> Vec<TrafficRecord> {
        self.store.read().records().to_vec()
    }

    /// Alerts, newest first
    pub fn alerts(&self) -> Vec<Alert> {
        self.store.read().alerts_by_recency()
    }

    /// Distinct record locations
    pub fn locations(&self) -> Vec<String> {
        self.store.read().locations()
    }

    /// Card metrics over every record
    pub fn summary(&self) -> TrafficSummary {
        TrafficSummary::from_records(self.store.read().records(), self.congestion_threshold())
    }

    /// Whether any simulated call is in flight
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Message of the most recent failed upload
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    /// Loading flag and last error together
    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            loading: self.is_loading(),
            last_error: self.last_error(),
        }
    }
}

/// Start of a history window ending at `now`
///
/// A window reaching past the earliest representable time covers all history.
fn history_cutoff(now: DateTime<Utc>, hours: u32) -> DateTime<Utc> {
    Duration::try_hours(i64::from(hours))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::mock::MockAnalysisBackend;
    use pretty_assertions::assert_eq;
    use trafficwatch_core::{AlertKind, ImageFile, UploadForm, config::UploadConfig};

    fn settings() -> SimulatorConfig {
        SimulatorConfig::default().without_latency()
    }

    fn service(backend: MockAnalysisBackend) -> (TrafficService, Arc<MockAnalysisBackend>) {
        let backend = Arc::new(backend);
        let service = TrafficService::new(
            TrafficStore::with_sample_data(Utc::now()),
            backend.clone(),
            settings(),
        );
        (service, backend)
    }

    fn upload(location: &str) -> ValidatedUpload {
        UploadForm::new(Some(ImageFile::new("frame.jpg", vec![0xFF, 0xD8])), location)
            .validate(&UploadConfig::default().allowed_extensions)
            .unwrap()
    }

    #[tokio::test]
    async fn test_ambulance_raises_single_high_priority_alert() {
        let (service, _) = service(
            MockAnalysisBackend::new().with_reading(MockAnalysisBackend::reading(0.95, true)),
        );

        let outcome = service.upload_image(upload("Ring Road")).await.unwrap();
        let alert = outcome.alert.unwrap();

        assert_eq!(alert.kind, AlertKind::HighPriority);
        assert_eq!(alert.message, "Ambulance detected at Ring Road");
        assert_eq!(alert.timestamp, outcome.record.timestamp);

        let snapshot = service.snapshot();
        assert_eq!(snapshot.alerts.len(), 3);
        let new: Vec<_> = snapshot.alerts.iter().filter(|a| a.location == "Ring Road").collect();
        assert_eq!(new.len(), 1);
        assert!(new.iter().all(|a| a.kind != AlertKind::TrafficCongestion));
    }

    #[tokio::test]
    async fn test_high_score_raises_congestion_alert() {
        let (service, _) = service(
            MockAnalysisBackend::new().with_reading(MockAnalysisBackend::reading(0.75, false)),
        );

        let outcome = service.upload_image(upload("Ring Road")).await.unwrap();
        assert_eq!(outcome.alert.unwrap().kind, AlertKind::TrafficCongestion);
    }

    #[tokio::test]
    async fn test_threshold_score_raises_nothing() {
        let (service, _) = service(
            MockAnalysisBackend::new().with_reading(MockAnalysisBackend::reading(0.70, false)),
        );

        let outcome = service.upload_image(upload("Ring Road")).await.unwrap();
        assert!(outcome.alert.is_none());
        assert_eq!(service.snapshot().alerts.len(), 2);
        assert_eq!(service.snapshot().records.len(), 3);
    }

    #[tokio::test]
    async fn test_upload_prepends_record() {
        let (service, backend) = service(MockAnalysisBackend::new());

        let outcome = service.upload_image(upload("Harbour Bridge")).await.unwrap();
        let records = service.records();

        assert_eq!(records[0], outcome.record);
        assert_eq!(records[0].location, "Harbour Bridge");
        assert!(records[0].frame_id.starts_with("Harbour Bridge_"));
        assert_eq!(backend.calls(), 1);
        assert_eq!(backend.locations(), vec!["Harbour Bridge"]);
    }

    #[tokio::test]
    async fn test_failed_upload_sets_error_and_stores_nothing() {
        let (service, _) = service(MockAnalysisBackend::new().with_failure("camera offline"));

        let result = service.upload_image(upload("Ring Road")).await;

        assert!(result.is_err());
        assert_eq!(
            service.last_error().as_deref(),
            Some("Analysis failed: camera offline")
        );
        assert!(!service.is_loading());
        assert_eq!(service.records().len(), 2);
        assert_eq!(service.snapshot().alerts.len(), 2);
    }

    #[tokio::test]
    async fn test_next_upload_clears_last_error() {
        let backend = Arc::new(MockAnalysisBackend::new());
        let service = TrafficService::new(TrafficStore::empty(), backend, settings());
        *service.last_error.write() = Some("earlier failure".to_string());

        service.upload_image(upload("Ring Road")).await.unwrap();
        assert_eq!(service.status(), ServiceStatus::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_flag_tracks_in_flight_upload() {
        let backend = Arc::new(MockAnalysisBackend::new().with_delay(2_000));
        let service = Arc::new(TrafficService::new(
            TrafficStore::empty(),
            backend,
            settings(),
        ));
        assert!(!service.is_loading());

        let task = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.upload_image(upload("Ring Road")).await }
        });

        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        assert!(service.is_loading());
        assert!(service.records().is_empty());

        task.await.unwrap().unwrap();
        assert!(!service.is_loading());
        assert_eq!(service.records().len(), 1);
    }

    #[tokio::test]
    async fn test_history_filters_by_location() {
        let (service, _) = service(MockAnalysisBackend::new());
        service.upload_image(upload("Ring Road")).await.unwrap();

        let history = service.traffic_history("Ring Road", 24).await;
        assert_eq!(history.len(), 1);

        let seeded = service.traffic_history("Main Street Junction", 1).await;
        assert_eq!(seeded.len(), 1);
        assert!(service.traffic_history("Nowhere", 24).await.is_empty());
    }

    #[tokio::test]
    async fn test_history_with_huge_window_returns_everything() {
        let (service, _) = service(MockAnalysisBackend::new());

        let history = service.traffic_history("Main Street Junction", u32::MAX).await;
        assert_eq!(history.len(), 1);
        assert!(!service.is_loading());
    }

    #[test]
    fn test_history_cutoff() {
        let now = Utc::now();
        assert_eq!(history_cutoff(now, 0), now);
        assert_eq!(history_cutoff(now, 24), now - Duration::hours(24));
        assert_eq!(history_cutoff(now, u32::MAX), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_dismiss_alert() {
        let (service, _) = service(MockAnalysisBackend::new());
        assert_eq!(service.dismiss_alert(1).unwrap().id, 1);
        assert!(service.dismiss_alert(1).is_none());

        let ids: Vec<_> = service.snapshot().alerts.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_summary_over_seeded_store() {
        let (service, _) = service(MockAnalysisBackend::new());
        let summary = service.summary();

        assert_eq!(summary.records, 2);
        assert_eq!(summary.total_vehicles, 63);
        assert_eq!(summary.ambulance_detections, 1);
        assert_eq!(summary.high_congestion, 1);
        assert_eq!(summary.average_clearance_minutes, 15.0);
    }

    #[test]
    fn test_from_config_respects_seed_flag() {
        let mut settings = settings();
        settings.seed_sample_data = false;
        settings.rng_seed = Some(9);

        let service = TrafficService::from_config(settings);
        assert!(service.records().is_empty());
        assert!(service.alerts().is_empty());

        let seeded = TrafficService::from_config(SimulatorConfig::default());
        assert_eq!(seeded.records().len(), 2);
        assert_eq!(seeded.alerts()[0].id, 1);
    }
}
