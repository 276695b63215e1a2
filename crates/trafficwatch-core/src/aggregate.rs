//! Aggregations behind the dashboard cards and charts
//!
//! Every function here is pure and treats an empty slice as a valid input
//! with zero-valued output. Record slices are expected most-recent-first,
//! which is the order the store keeps them in.

use crate::types::{Alert, AlertKind, TrafficRecord, VehicleCategory};
use chrono::Timelike;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Records shown on the congestion trend chart
pub const CONGESTION_TREND_LIMIT: usize = 20;

/// Records shown on the dashboard trend chart
pub const TRAFFIC_TREND_LIMIT: usize = 10;

/// Average vehicle total for one hour of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyBucket {
    /// Zero-padded label, e.g. `"09:00"`
    pub hour: String,
    /// Rounded mean of the record totals in this hour
    pub vehicles: u64,
    /// Number of records in the bucket
    pub samples: usize,
}

/// Vehicle count for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    /// Category
    pub category: VehicleCategory,
    /// Title-cased name
    pub name: &'static str,
    /// Count
    pub value: u64,
}

/// One point on the congestion trend line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CongestionPoint {
    /// `HH:MM` of the record
    pub time: String,
    /// Congestion percentage, one decimal
    pub congestion: f64,
}

/// One point on the dashboard trend charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// `HH:MM` of the record
    pub time: String,
    /// Vehicle total
    pub vehicles: u32,
    /// Congestion percentage, one decimal
    pub congestion: f64,
    /// Clearance estimate in minutes
    pub clearance: u32,
}

/// Alert counts by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertStatistics {
    /// `HIGH_PRIORITY` alerts
    pub high_priority: usize,
    /// `TRAFFIC_CONGESTION` alerts
    pub traffic_congestion: usize,
    /// All alerts
    pub total: usize,
}

/// Headline metrics shown on the dashboard and analytics cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TrafficSummary {
    /// Number of records summarised
    pub records: usize,
    /// Sum of vehicle totals
    pub total_vehicles: u64,
    /// Mean congestion score in `[0, 1]`
    pub average_congestion: f64,
    /// Mean clearance estimate in minutes
    pub average_clearance_minutes: f64,
    /// Records with an ambulance
    pub ambulance_detections: usize,
    /// Records above the congestion threshold
    pub high_congestion: usize,
}

impl TrafficSummary {
    /// Summarise `records`, counting scores strictly above `threshold` as high
    #[must_use]
    pub fn from_records(records: &[TrafficRecord], threshold: f64) -> Self {
        Self {
            records: records.len(),
            total_vehicles: total_vehicles(records),
            average_congestion: average_congestion(records),
            average_clearance_minutes: average_clearance(records),
            ambulance_detections: ambulance_detections(records),
            high_congestion: high_congestion_count(records, threshold),
        }
    }

    /// Mean congestion as a percentage
    #[must_use]
    pub fn average_congestion_percent(&self) -> f64 {
        self.average_congestion * 100.0
    }
}

/// Sum of per-record vehicle totals
#[must_use]
pub fn total_vehicles(records: &[TrafficRecord]) -> u64 {
    records
        .iter()
        .map(|record| u64::from(record.vehicle_counts.total()))
        .sum()
}

/// Mean congestion score, 0 for no records
#[must_use]
pub fn average_congestion(records: &[TrafficRecord]) -> f64 {
    mean(records.iter().map(|record| record.congestion_score))
}

/// Mean clearance estimate in minutes, 0 for no records
#[must_use]
pub fn average_clearance(records: &[TrafficRecord]) -> f64 {
    mean(
        records
            .iter()
            .map(|record| f64::from(record.clearance_time_minutes)),
    )
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Records with an ambulance detected
#[must_use]
pub fn ambulance_detections(records: &[TrafficRecord]) -> usize {
    records
        .iter()
        .filter(|record| record.ambulance_detected)
        .count()
}

/// Records whose congestion score is strictly above `threshold`
#[must_use]
pub fn high_congestion_count(records: &[TrafficRecord], threshold: f64) -> usize {
    records
        .iter()
        .filter(|record| record.congestion_score > threshold)
        .count()
}

/// Average vehicle total per UTC hour of day, ordered by label
#[must_use]
pub fn hourly_pattern(records: &[TrafficRecord]) -> Vec<HourlyBucket> {
    let mut buckets: BTreeMap<u32, (u64, usize)> = BTreeMap::new();
    for record in records {
        let entry = buckets.entry(record.timestamp.hour()).or_default();
        entry.0 += u64::from(record.vehicle_counts.total());
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(hour, (vehicles, samples))| HourlyBucket {
            hour: format!("{hour:02}:00"),
            vehicles: (vehicles as f64 / samples as f64).round() as u64,
            samples,
        })
        .collect()
}

/// Per-category sums across `records`, zero categories left out
#[must_use]
pub fn vehicle_type_distribution(records: &[TrafficRecord]) -> Vec<CategoryShare> {
    VehicleCategory::ALL
        .into_iter()
        .map(|category| CategoryShare {
            category,
            name: category.label(),
            value: records
                .iter()
                .map(|record| u64::from(record.vehicle_counts.get(category)))
                .sum(),
        })
        .filter(|share| share.value > 0)
        .collect()
}

/// All five category counts of the newest record, empty for no records
#[must_use]
pub fn latest_breakdown(records: &[TrafficRecord]) -> Vec<CategoryShare> {
    records.first().map_or_else(Vec::new, |latest| {
        latest
            .vehicle_counts
            .iter()
            .map(|(category, count)| CategoryShare {
                category,
                name: category.label(),
                value: u64::from(count),
            })
            .collect()
    })
}

/// Congestion percentages of the newest `limit` records
#[must_use]
pub fn congestion_trend(records: &[TrafficRecord], limit: usize) -> Vec<CongestionPoint> {
    records
        .iter()
        .take(limit)
        .map(|record| CongestionPoint {
            time: crate::utils::format_clock(&record.timestamp),
            congestion: round_tenth(record.congestion_percent()),
        })
        .collect()
}

/// The newest `limit` records as chart points, oldest first
#[must_use]
pub fn traffic_trend(records: &[TrafficRecord], limit: usize) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = records
        .iter()
        .take(limit)
        .map(|record| TrendPoint {
            time: crate::utils::format_clock(&record.timestamp),
            vehicles: record.vehicle_counts.total(),
            congestion: round_tenth(record.congestion_percent()),
            clearance: record.clearance_time_minutes,
        })
        .collect();
    points.reverse();
    points
}

/// Alert counts by kind
#[must_use]
pub fn alert_statistics(alerts: &[Alert]) -> AlertStatistics {
    AlertStatistics {
        high_priority: alerts
            .iter()
            .filter(|alert| alert.kind == AlertKind::HighPriority)
            .count(),
        traffic_congestion: alerts
            .iter()
            .filter(|alert| alert.kind == AlertKind::TrafficCongestion)
            .count(),
        total: alerts.len(),
    }
}

/// Distinct locations in first-seen order
#[must_use]
pub fn distinct_locations(records: &[TrafficRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| seen.insert(record.location.as_str()))
        .map(|record| record.location.clone())
        .collect()
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{AlertDraft, Severity, VehicleCounts};
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, hour, minute, 0)
            .single()
            .unwrap()
    }

    fn record(
        location: &str,
        timestamp: DateTime<Utc>,
        counts: VehicleCounts,
        score: f64,
        clearance: u32,
    ) -> TrafficRecord {
        TrafficRecord {
            frame_id: format!("{location}_{}", timestamp.timestamp_millis()),
            timestamp,
            location: location.to_string(),
            vehicle_counts: counts,
            congestion_score: score,
            clearance_time_minutes: clearance,
            ambulance_detected: counts.ambulances() > 0,
        }
    }

    fn sample() -> Vec<TrafficRecord> {
        vec![
            record("Main Street Junction", at(14, 30), VehicleCounts::new(15, 3, 2, 8, 0), 0.65, 12),
            record("Highway Intersection", at(14, 25), VehicleCounts::new(25, 5, 1, 3, 1), 0.85, 18),
            record("Main Street Junction", at(9, 5), VehicleCounts::new(10, 0, 0, 0, 0), 0.25, 6),
        ]
    }

    #[test]
    fn test_empty_input_yields_zeroes() {
        assert_eq!(total_vehicles(&[]), 0);
        assert_eq!(average_congestion(&[]), 0.0);
        assert_eq!(average_clearance(&[]), 0.0);
        assert!(!average_congestion(&[]).is_nan());
        assert!(hourly_pattern(&[]).is_empty());
        assert!(vehicle_type_distribution(&[]).is_empty());
        assert!(latest_breakdown(&[]).is_empty());
        assert!(congestion_trend(&[], 20).is_empty());
        assert!(traffic_trend(&[], 10).is_empty());
        assert_eq!(TrafficSummary::from_records(&[], 0.7), TrafficSummary::default());
    }

    #[test]
    fn test_totals_and_means() {
        let records = sample();
        assert_eq!(total_vehicles(&records), 28 + 35 + 10);
        assert!((average_congestion(&records) - 0.583_333).abs() < 1e-5);
        assert_eq!(average_clearance(&records), 12.0);
        assert_eq!(ambulance_detections(&records), 1);
        assert_eq!(high_congestion_count(&records, 0.7), 1);
    }

    #[test]
    fn test_hourly_pattern_groups_and_sorts() {
        let buckets = hourly_pattern(&sample());
        assert_eq!(
            buckets,
            vec![
                HourlyBucket { hour: "09:00".to_string(), vehicles: 10, samples: 1 },
                HourlyBucket { hour: "14:00".to_string(), vehicles: 32, samples: 2 },
            ]
        );
    }

    #[test]
    fn test_hourly_pattern_rounds_half_up() {
        let records = vec![
            record("A", at(8, 0), VehicleCounts::new(1, 0, 0, 0, 0), 0.1, 1),
            record("A", at(8, 30), VehicleCounts::new(2, 0, 0, 0, 0), 0.1, 1),
        ];
        assert_eq!(hourly_pattern(&records)[0].vehicles, 2);
    }

    #[test]
    fn test_distribution_excludes_zero_categories() {
        let records = vec![record("A", at(8, 0), VehicleCounts::new(4, 0, 2, 0, 0), 0.1, 1)];
        let names: Vec<_> = vehicle_type_distribution(&records)
            .into_iter()
            .map(|share| (share.name, share.value))
            .collect();
        assert_eq!(names, vec![("Cars", 4), ("Buses", 2)]);
    }

    #[test]
    fn test_distribution_sums_across_records() {
        let shares = vehicle_type_distribution(&sample());
        let cars = shares.iter().find(|s| s.category == VehicleCategory::Cars).unwrap();
        assert_eq!(cars.value, 50);
        assert_eq!(shares.len(), 5);
    }

    #[test]
    fn test_latest_breakdown_keeps_zero_categories() {
        let breakdown = latest_breakdown(&sample());
        assert_eq!(breakdown.len(), 5);
        assert_eq!(breakdown[0].value, 15);
        assert_eq!(breakdown[4].value, 0);
    }

    #[test]
    fn test_traffic_trend_is_oldest_first() {
        let trend = traffic_trend(&sample(), 2);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].time, "14:25");
        assert_eq!(trend[0].vehicles, 35);
        assert_eq!(trend[0].congestion, 85.0);
        assert_eq!(trend[1].time, "14:30");
    }

    #[test]
    fn test_congestion_trend_limits_and_rounds() {
        let records = vec![record("A", at(7, 15), VehicleCounts::default(), 0.123_456, 1)];
        let trend = congestion_trend(&records, CONGESTION_TREND_LIMIT);
        assert_eq!(trend, vec![CongestionPoint { time: "07:15".to_string(), congestion: 12.3 }]);
        assert_eq!(congestion_trend(&sample(), 1).len(), 1);
    }

    #[test]
    fn test_alert_statistics() {
        let draft = |kind| AlertDraft {
            kind,
            message: String::new(),
            timestamp: at(1, 0),
            location: "A".to_string(),
            severity: Severity::Low,
        };
        let alerts = vec![
            draft(AlertKind::HighPriority).with_id(1),
            draft(AlertKind::TrafficCongestion).with_id(2),
            draft(AlertKind::TrafficCongestion).with_id(3),
            draft(AlertKind::General).with_id(4),
        ];

        assert_eq!(
            alert_statistics(&alerts),
            AlertStatistics { high_priority: 1, traffic_congestion: 2, total: 4 }
        );
    }

    #[test]
    fn test_distinct_locations_first_seen_order() {
        assert_eq!(
            distinct_locations(&sample()),
            vec!["Main Street Junction", "Highway Intersection"]
        );
    }

    fn arb_record() -> impl Strategy<Value = TrafficRecord> {
        (0_u32..50, 0_u32..10, 0_u32..5, 0_u32..20, 0_u32..2, 0.0_f64..=1.0, 0_u32..60, 0_u32..24)
            .prop_map(|(cars, trucks, buses, bikes, ambulances, score, clearance, hour)| {
                record(
                    "Prop Junction",
                    at(hour, 0),
                    VehicleCounts::new(cars, trucks, buses, bikes, ambulances),
                    score,
                    clearance,
                )
            })
    }

    proptest! {
        #[test]
        fn prop_total_vehicles_is_sum_of_totals(records in prop::collection::vec(arb_record(), 0..40)) {
            let expected: u64 = records.iter().map(|r| u64::from(r.vehicle_counts.total())).sum();
            prop_assert_eq!(total_vehicles(&records), expected);
        }

        #[test]
        fn prop_average_congestion_stays_in_range(records in prop::collection::vec(arb_record(), 0..40)) {
            let average = average_congestion(&records);
            prop_assert!(!average.is_nan());
            prop_assert!((0.0..=1.0 + 1e-9).contains(&average));
        }

        #[test]
        fn prop_distribution_sums_to_total(records in prop::collection::vec(arb_record(), 0..40)) {
            let sum: u64 = vehicle_type_distribution(&records).iter().map(|s| s.value).sum();
            prop_assert_eq!(sum, total_vehicles(&records));
        }

        #[test]
        fn prop_hourly_samples_cover_every_record(records in prop::collection::vec(arb_record(), 0..40)) {
            let samples: usize = hourly_pattern(&records).iter().map(|b| b.samples).sum();
            prop_assert_eq!(samples, records.len());
        }
    }
}
