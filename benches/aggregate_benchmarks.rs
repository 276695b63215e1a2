//! Benchmarks for trafficwatch-core aggregation

use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use trafficwatch_core::{TrafficRecord, VehicleCounts, aggregate::*, utils::*};

/// A day of records, one per minute, across four junctions
fn day_of_records(count: usize) -> Vec<TrafficRecord> {
    let start = Utc
        .with_ymd_and_hms(2024, 3, 15, 23, 59, 0)
        .single()
        .unwrap_or_default();
    let locations = [
        "Main Street Junction",
        "Highway Intersection",
        "Harbour Bridge",
        "Central Station",
    ];

    locations
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, location)| {
            let timestamp = start - Duration::minutes(i as i64);
            let n = i as u32;
            TrafficRecord {
                frame_id: frame_id(location, &timestamp),
                timestamp,
                location: location.to_string(),
                vehicle_counts: VehicleCounts::new(5 + n % 20, n % 5, n % 3, n % 10, u32::from(i % 5 == 0)),
                congestion_score: 0.2 + (i % 80) as f64 / 100.0,
                clearance_time_minutes: 5 + n % 20,
                ambulance_detected: i % 5 == 0,
            }
        })
        .collect()
}

/// Benchmark the dashboard card metrics
fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");

    for size in [10, 100, 1440] {
        let records = day_of_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("from_records", size), &records, |b, records| {
            b.iter(|| TrafficSummary::from_records(black_box(records), 0.7));
        });
    }

    group.finish();
}

/// Benchmark the analytics groupings
fn bench_groupings(c: &mut Criterion) {
    let mut group = c.benchmark_group("groupings");
    let records = day_of_records(1440);
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("hourly_pattern", |b| {
        b.iter(|| hourly_pattern(black_box(&records)));
    });
    group.bench_function("vehicle_type_distribution", |b| {
        b.iter(|| vehicle_type_distribution(black_box(&records)));
    });
    group.bench_function("distinct_locations", |b| {
        b.iter(|| distinct_locations(black_box(&records)));
    });

    group.finish();
}

/// Benchmark chart series and timestamp formatting
fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    let records = day_of_records(1440);
    let now = records.first().map(|r| r.timestamp).unwrap_or_default();

    group.bench_function("congestion_trend", |b| {
        b.iter(|| congestion_trend(black_box(&records), CONGESTION_TREND_LIMIT));
    });
    group.bench_function("traffic_trend", |b| {
        b.iter(|| traffic_trend(black_box(&records), TRAFFIC_TREND_LIMIT));
    });
    group.bench_function("format_relative", |b| {
        b.iter(|| {
            records
                .iter()
                .map(|record| format_relative(&record.timestamp, &now))
                .collect::<Vec<_>>()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_summary, bench_groupings, bench_formatting);

criterion_main!(benches);
