//! Analytics page

use super::components::{self, COLORS};
use super::{escape_html, layout};
use crate::analytics::{ALL_LOCATIONS, AnalyticsReport, TimeRange};

/// Render the analytics page
///
/// `locations` feeds the location menu; the report carries the current
/// selection.
#[must_use]
pub fn render(report: &AnalyticsReport, locations: &[String]) -> String {
    let body = format!(
        r#"<h1>Analytics</h1>
{filters}
<div class="grid wide">
{hourly}
{trend}
{types}
{summary}
</div>"#,
        filters = filter_form(report, locations),
        hourly = hourly_card(report),
        trend = trend_card(report),
        types = types_card(report),
        summary = summary_card(report),
    );

    layout::page("Analytics", "/analytics", None, &body)
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{value}"{selected}>{label}</option>"#,
        value = escape_html(value),
        label = escape_html(label),
        selected = if selected { " selected" } else { "" },
    )
}

/// Location and time range menus
#[must_use]
pub fn filter_form(report: &AnalyticsReport, locations: &[String]) -> String {
    let mut location_options = option(
        ALL_LOCATIONS,
        "All Locations",
        report.location == ALL_LOCATIONS,
    );
    for location in locations {
        location_options.push_str(&option(location, location, *location == report.location));
    }

    let range_options: String = TimeRange::ALL
        .iter()
        .map(|range| {
            option(
                &range.hours().to_string(),
                range.label(),
                range.hours() == report.hours,
            )
        })
        .collect();

    format!(
        r#"<form class="card" method="get" action="/analytics">
<label for="location">Location</label> <select id="location" name="location">{location_options}</select>
<label for="hours">Time range</label> <select id="hours" name="hours">{range_options}</select>
<button type="submit">Apply</button>
</form>"#
    )
}

fn empty_card(title: &str) -> String {
    format!(
        r#"<div class="card"><h2>{title}</h2><div class="empty"><p>No data for the selected filters</p></div></div>"#
    )
}

fn hourly_card(report: &AnalyticsReport) -> String {
    if report.hourly.is_empty() {
        return empty_card("Hourly Traffic Pattern");
    }
    let items: Vec<(String, f64)> = report
        .hourly
        .iter()
        .map(|bucket| (bucket.hour.clone(), bucket.vehicles as f64))
        .collect();
    format!(
        r#"<div class="card"><h2>Hourly Traffic Pattern</h2>{}</div>"#,
        components::bar_chart(&items, COLORS[0], false)
    )
}

fn trend_card(report: &AnalyticsReport) -> String {
    if report.congestion_trend.is_empty() {
        return empty_card("Congestion Trends");
    }
    // Newest first in the report, charted oldest first.
    let points: Vec<(String, f64)> = report
        .congestion_trend
        .iter()
        .rev()
        .map(|point| (point.time.clone(), point.congestion))
        .collect();
    format!(
        r#"<div class="card"><h2>Congestion Trends</h2>{}</div>"#,
        components::line_chart(&points, Some(100.0), COLORS[3])
    )
}

fn types_card(report: &AnalyticsReport) -> String {
    if report.vehicle_types.is_empty() {
        return empty_card("Vehicle Type Distribution");
    }
    let items: Vec<(String, f64)> = report
        .vehicle_types
        .iter()
        .map(|share| (share.name.to_string(), share.value as f64))
        .collect();
    format!(
        r#"<div class="card"><h2>Vehicle Type Distribution</h2>{}</div>"#,
        components::bar_chart(&items, COLORS[1], true)
    )
}

fn summary_card(report: &AnalyticsReport) -> String {
    let summary = &report.summary;
    format!(
        r#"<div class="card"><h2>Summary Statistics</h2>
<p class="metric-label">Total Vehicles</p><p class="metric-value">{total}</p>
<p class="metric-label">Avg Congestion</p><p class="metric-value">{congestion:.1}%</p>
<p class="metric-label">Avg Clearance (min)</p><p class="metric-value">{clearance:.1}</p>
<p class="metric-label">Ambulance Alerts</p><p class="metric-value">{ambulances}</p>
</div>"#,
        total = summary.total_vehicles,
        congestion = summary.average_congestion_percent(),
        clearance = summary.average_clearance_minutes,
        ambulances = summary.ambulance_detections,
    )
}
