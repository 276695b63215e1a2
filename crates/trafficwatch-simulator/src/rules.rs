//! Alert rules applied to every new record

use trafficwatch_core::{AlertDraft, AlertKind, TrafficRecord};

/// Congestion score above which an alert is raised when none is configured
pub const DEFAULT_CONGESTION_THRESHOLD: f64 = 0.7;

/// Derive at most one alert for a freshly analysed record
///
/// An ambulance always wins. Otherwise a congestion alert is raised when
/// the score is strictly above `threshold`.
#[must_use]
pub fn derive_alert(record: &TrafficRecord, threshold: f64) -> Option<AlertDraft> {
    let (kind, message) = if record.ambulance_detected {
        (
            AlertKind::HighPriority,
            format!("Ambulance detected at {}", record.location),
        )
    } else if record.congestion_score > threshold {
        (
            AlertKind::TrafficCongestion,
            format!("High traffic congestion detected at {}", record.location),
        )
    } else {
        return None;
    };

    Some(AlertDraft {
        kind,
        message,
        timestamp: record.timestamp,
        location: record.location.clone(),
        severity: kind.default_severity(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use trafficwatch_core::{Severity, VehicleCounts};

    fn record(score: f64, ambulance: bool) -> TrafficRecord {
        TrafficRecord {
            frame_id: "Ring Road_1".to_string(),
            timestamp: Utc::now(),
            location: "Ring Road".to_string(),
            vehicle_counts: VehicleCounts::new(10, 1, 1, 1, u32::from(ambulance)),
            congestion_score: score,
            clearance_time_minutes: 7,
            ambulance_detected: ambulance,
        }
    }

    #[rstest]
    #[case(0.10, false, None)]
    #[case(0.70, false, None)]
    #[case(0.75, false, Some(AlertKind::TrafficCongestion))]
    #[case(0.99, false, Some(AlertKind::TrafficCongestion))]
    #[case(0.10, true, Some(AlertKind::HighPriority))]
    #[case(0.95, true, Some(AlertKind::HighPriority))]
    fn test_alert_kind(#[case] score: f64, #[case] ambulance: bool, #[case] expected: Option<AlertKind>) {
        let alert = derive_alert(&record(score, ambulance), DEFAULT_CONGESTION_THRESHOLD);
        assert_eq!(alert.map(|a| a.kind), expected);
    }

    #[test]
    fn test_ambulance_alert_contents() {
        let source = record(0.95, true);
        let alert = derive_alert(&source, DEFAULT_CONGESTION_THRESHOLD).unwrap();

        assert_eq!(alert.message, "Ambulance detected at Ring Road");
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(alert.timestamp, source.timestamp);
        assert_eq!(alert.location, "Ring Road");
    }

    #[test]
    fn test_congestion_alert_contents() {
        let alert = derive_alert(&record(0.8, false), DEFAULT_CONGESTION_THRESHOLD).unwrap();
        assert_eq!(alert.message, "High traffic congestion detected at Ring Road");
        assert_eq!(alert.severity, Severity::Medium);
    }

    #[test]
    fn test_threshold_is_configurable() {
        assert!(derive_alert(&record(0.55, false), 0.5).is_some());
        assert!(derive_alert(&record(0.85, false), 0.9).is_none());
    }
}
