//! Dashboard page

use super::components::{self, COLORS};
use super::layout;
use trafficwatch_core::{
    Alert, TrafficRecord,
    aggregate::{self, TrafficSummary},
    utils,
};
use trafficwatch_simulator::StoreSnapshot;

/// Alerts shown in the overview card
pub const ALERT_OVERVIEW_LIMIT: usize = 5;

/// Records shown in the recent analyses list
pub const RECENT_ANALYSES_LIMIT: usize = 10;

/// Render the dashboard for a store snapshot
#[must_use]
pub fn render(snapshot: &StoreSnapshot, threshold: f64) -> String {
    let summary = TrafficSummary::from_records(&snapshot.records, threshold);
    let alerts = snapshot.alerts_by_recency();

    let body = format!(
        r#"<div class="bar"><h1>Traffic Dashboard</h1><span class="muted">Last updated: {updated}</span></div>
{metrics}
<div class="grid wide">
{chart}
{alerts}
</div>
{recent}"#,
        updated = utils::format_timestamp(&snapshot.taken_at),
        metrics = metrics(&summary),
        chart = traffic_chart(&snapshot.records),
        alerts = alerts_overview(&alerts),
        recent = recent_analyses(&snapshot.records),
    );

    layout::page("Dashboard", "/", None, &body)
}

/// The four headline metric cards
#[must_use]
pub fn metrics(summary: &TrafficSummary) -> String {
    let cards = [
        components::metric_card("Total Vehicles", &summary.total_vehicles.to_string()),
        components::metric_card(
            "Avg Congestion",
            &format!("{:.1}%", summary.average_congestion_percent()),
        ),
        components::metric_card(
            "Avg Clearance Time",
            &format!("{:.0} min", summary.average_clearance_minutes),
        ),
        components::metric_card("Ambulance Alerts", &summary.ambulance_detections.to_string()),
    ];
    format!(r#"<div class="grid">{}</div>"#, cards.concat())
}

/// Vehicle and congestion trends plus the newest record's breakdown
#[must_use]
pub fn traffic_chart(records: &[TrafficRecord]) -> String {
    if records.is_empty() {
        return r#"<div class="card"><h2>Traffic Trends</h2><div class="empty"><p>No data available for charting</p></div></div>"#
            .to_string();
    }

    let trend = aggregate::traffic_trend(records, aggregate::TRAFFIC_TREND_LIMIT);
    let vehicles: Vec<(String, f64)> = trend
        .iter()
        .map(|point| (point.time.clone(), f64::from(point.vehicles)))
        .collect();
    let congestion: Vec<(String, f64)> = trend
        .iter()
        .map(|point| (point.time.clone(), point.congestion))
        .collect();

    let breakdown = aggregate::latest_breakdown(records);
    let distribution = if breakdown.iter().any(|share| share.value > 0) {
        let items: Vec<(String, f64)> = breakdown
            .iter()
            .map(|share| (share.name.to_string(), share.value as f64))
            .collect();
        format!(
            "<h3>Vehicle Type Distribution</h3>{}",
            components::bar_chart(&items, COLORS[1], false)
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="card"><h2>Traffic Trends</h2>
<h3>Vehicle Count Over Time</h3>{vehicles}
<h3>Congestion Score Over Time</h3>{congestion}
{distribution}</div>"#,
        vehicles = components::line_chart(&vehicles, None, COLORS[0]),
        congestion = components::line_chart(&congestion, Some(100.0), COLORS[2]),
    )
}

/// The newest alerts, `alerts` already ordered newest first
#[must_use]
pub fn alerts_overview(alerts: &[Alert]) -> String {
    let count = alerts.len();
    let heading = format!(
        r#"<div class="bar"><h2>Recent Alerts</h2><span class="muted">{count} alert{}</span></div>"#,
        utils::plural(i64::try_from(count).unwrap_or(i64::MAX))
    );

    let content = if alerts.is_empty() {
        r#"<div class="empty"><p>No alerts at this time</p><p class="muted">System is running normally</p></div>"#
            .to_string()
    } else {
        alerts
            .iter()
            .take(ALERT_OVERVIEW_LIMIT)
            .map(components::alert_summary)
            .collect()
    };

    format!(r#"<div class="card">{heading}{content}</div>"#)
}

/// The newest analysed records
#[must_use]
pub fn recent_analyses(records: &[TrafficRecord]) -> String {
    let content = if records.is_empty() {
        r#"<div class="empty"><p>No traffic analyses yet</p><p class="muted">Upload an image to get started</p></div>"#
            .to_string()
    } else {
        records
            .iter()
            .take(RECENT_ANALYSES_LIMIT)
            .map(components::record_card)
            .collect()
    };

    format!(r#"<section class="card"><h2>Recent Analyses</h2>{content}</section>"#)
}
