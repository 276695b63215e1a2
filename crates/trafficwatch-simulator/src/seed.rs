//! Fixed sample data loaded at startup

use chrono::{DateTime, Duration, Utc};
use trafficwatch_core::{
    Alert, AlertKind, Severity, TrafficRecord, VehicleCounts, utils::frame_id,
};

/// Two sample records, most recent first
#[must_use]
pub fn sample_records(now: DateTime<Utc>) -> Vec<TrafficRecord> {
    let earlier = now - Duration::minutes(5);
    vec![
        TrafficRecord {
            frame_id: frame_id("junction_1", &now),
            timestamp: now,
            location: "Main Street Junction".to_string(),
            vehicle_counts: VehicleCounts::new(15, 3, 2, 8, 0),
            congestion_score: 0.65,
            clearance_time_minutes: 12,
            ambulance_detected: false,
        },
        TrafficRecord {
            frame_id: frame_id("junction_2", &earlier),
            timestamp: earlier,
            location: "Highway Intersection".to_string(),
            vehicle_counts: VehicleCounts::new(25, 5, 1, 3, 1),
            congestion_score: 0.85,
            clearance_time_minutes: 18,
            ambulance_detected: true,
        },
    ]
}

/// Two sample alerts, in insertion order
#[must_use]
pub fn sample_alerts(now: DateTime<Utc>) -> Vec<Alert> {
    vec![
        Alert {
            id: 1,
            kind: AlertKind::HighPriority,
            message: "Ambulance detected at Highway Intersection".to_string(),
            timestamp: now,
            location: "Highway Intersection".to_string(),
            severity: Severity::High,
        },
        Alert {
            id: 2,
            kind: AlertKind::TrafficCongestion,
            message: "High traffic congestion detected at Main Street Junction".to_string(),
            timestamp: now - Duration::minutes(10),
            location: "Main Street Junction".to_string(),
            severity: Severity::Medium,
        },
    ]
}
