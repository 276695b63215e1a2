//! In-memory store of traffic records and alerts

use crate::seed;
use chrono::{DateTime, Utc};
use trafficwatch_core::{Alert, AlertDraft, AlertId, TrafficRecord, aggregate};

/// Records (most recent first) and alerts (insertion order)
#[derive(Debug, Clone)]
pub struct TrafficStore {
    records: Vec<TrafficRecord>,
    alerts: Vec<Alert>,
    next_alert_id: AlertId,
}

impl TrafficStore {
    /// Create a store with injected initial state
    ///
    /// `records` must already be most recent first. New alert ids start
    /// above the largest id in `alerts`.
    #[must_use]
    pub fn new(records: Vec<TrafficRecord>, alerts: Vec<Alert>) -> Self {
        let next_alert_id = alerts.iter().map(|alert| alert.id).max().unwrap_or(0) + 1;
        Self {
            records,
            alerts,
            next_alert_id,
        }
    }

    /// Create a store holding the fixed sample data
    #[must_use]
    pub fn with_sample_data(now: DateTime<Utc>) -> Self {
        Self::new(seed::sample_records(now), seed::sample_alerts(now))
    }

    /// Create a store with no records or alerts
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Add a record at the front
    pub fn prepend_record(&mut self, record: TrafficRecord) {
        self.records.insert(0, record);
    }

    /// Append an alert, allocating its id
    pub fn push_alert(&mut self, draft: AlertDraft) -> Alert {
        let alert = draft.with_id(self.next_alert_id);
        self.next_alert_id += 1;
        self.alerts.push(alert.clone());
        alert
    }

    /// Store a record together with the alert it raised, if any
    pub fn insert(&mut self, record: TrafficRecord, alert: Option<AlertDraft>) -> Option<Alert> {
        self.prepend_record(record);
        alert.map(|draft| self.push_alert(draft))
    }

    /// Remove the alert with `id`, keeping the order of the rest
    ///
    /// Returns the removed alert, or `None` if no alert had that id.
    pub fn dismiss_alert(&mut self, id: AlertId) -> Option<Alert> {
        let position = self.alerts.iter().position(|alert| alert.id == id)?;
        Some(self.alerts.remove(position))
    }

    /// All records, most recent first
    #[must_use]
    pub fn records(&self) -> &[TrafficRecord] {
        &self.records
    }

    /// All alerts, in insertion order
    #[must_use]
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// All alerts, newest timestamp first
    #[must_use]
    pub fn alerts_by_recency(&self) -> Vec<Alert> {
        let mut alerts = self.alerts.clone();
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        alerts
    }

    /// Distinct record locations in first-seen order
    #[must_use]
    pub fn locations(&self) -> Vec<String> {
        aggregate::distinct_locations(&self.records)
    }

    /// Records at `location` taken strictly after `since`
    #[must_use]
    pub fn history(&self, location: &str, since: DateTime<Utc>) -> Vec<TrafficRecord> {
        self.records
            .iter()
            .filter(|record| record.location == location && record.timestamp > since)
            .cloned()
            .collect()
    }
}
