//! Cards, badges and charts shared by the pages

use super::escape_html;
use trafficwatch_core::{Alert, AlertKind, CongestionLevel, TrafficRecord, utils};

/// Chart palette, cycled by series index
pub const COLORS: [&str; 5] = ["#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6"];

const CHART_WIDTH: f64 = 400.0;
const CHART_HEIGHT: f64 = 160.0;

/// Card with a label and a large value
#[must_use]
pub fn metric_card(label: &str, value: &str) -> String {
    format!(
        r#"<div class="card"><p class="metric-label">{label}</p><p class="metric-value">{value}</p></div>"#,
        label = escape_html(label),
        value = escape_html(value),
    )
}

/// Congestion badge, e.g. "High Congestion"
#[must_use]
pub fn congestion_badge(level: CongestionLevel) -> String {
    let class = match level {
        CongestionLevel::High => "high",
        CongestionLevel::Medium => "medium",
        CongestionLevel::Low => "low",
    };
    format!(
        r#"<span class="badge {class}">{} Congestion</span>"#,
        level.label()
    )
}

/// Badge for an alert kind
#[must_use]
pub fn alert_badge(kind: AlertKind) -> String {
    let class = match kind {
        AlertKind::HighPriority => "high",
        AlertKind::TrafficCongestion => "medium",
        AlertKind::General => "info",
    };
    format!(r#"<span class="badge {class}">{}</span>"#, kind.badge())
}

/// CSS class for an alert container
#[must_use]
pub const fn alert_class(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::HighPriority => "alert high-priority",
        AlertKind::TrafficCongestion => "alert traffic-congestion",
        AlertKind::General => "alert",
    }
}

/// Compact alert entry with an absolute timestamp
#[must_use]
pub fn alert_summary(alert: &Alert) -> String {
    format!(
        r#"<div class="{class}"><strong>{title}</strong> <span class="muted">{time}</span><p>{message}</p><p class="muted">{location}</p></div>"#,
        class = alert_class(alert.kind),
        title = alert.kind.title(),
        time = utils::format_timestamp(&alert.timestamp),
        message = escape_html(&alert.message),
        location = escape_html(&alert.location),
    )
}

/// One analysed record with its category counts
#[must_use]
pub fn record_card(record: &TrafficRecord) -> String {
    let ambulance = if record.ambulance_detected {
        r#" <span class="badge high">Ambulance</span>"#
    } else {
        ""
    };
    let counts = &record.vehicle_counts;

    format!(
        r#"<div class="card record">
<div><strong>{location}</strong>{ambulance} {badge}</div>
<p class="muted">{time} &middot; {total} vehicles &middot; Clearance: {clearance} min</p>
<p>Cars {cars} &middot; Trucks {trucks} &middot; Buses {buses} &middot; Bikes {bikes}</p>
</div>"#,
        location = escape_html(&record.location),
        badge = congestion_badge(record.congestion_level()),
        time = utils::format_timestamp(&record.timestamp),
        total = counts.total(),
        clearance = record.clearance_time_minutes,
        cars = counts.cars(),
        trucks = counts.trucks(),
        buses = counts.buses(),
        bikes = counts.bikes(),
    )
}

/// Horizontal bar chart of labelled values
///
/// Bars are scaled to the largest value. With `show_share` each row also
/// shows its percentage of the sum.
#[must_use]
pub fn bar_chart(items: &[(String, f64)], color: &str, show_share: bool) -> String {
    let max = items.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let sum: f64 = items.iter().map(|(_, v)| *v).sum();

    let rows: String = items
        .iter()
        .map(|(label, value)| {
            let width = if max > 0.0 { value / max * 100.0 } else { 0.0 };
            let shown = if show_share && sum > 0.0 {
                format!("{value} ({:.0}%)", value / sum * 100.0)
            } else {
                value.to_string()
            };
            format!(
                r#"<div class="row"><span class="label">{label}</span><div class="track"><div class="fill" style="width:{width:.1}%;background:{color}"></div></div><span class="value">{shown}</span></div>"#,
                label = escape_html(label),
            )
        })
        .collect();

    format!(r#"<div class="bars">{rows}</div>"#)
}

/// Line chart of labelled values as inline SVG
///
/// The y axis runs from zero to `y_max`, or to the largest value when
/// `y_max` is `None`.
#[must_use]
pub fn line_chart(points: &[(String, f64)], y_max: Option<f64>, color: &str) -> String {
    if points.is_empty() {
        return String::new();
    }

    let top = y_max
        .unwrap_or_else(|| points.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max))
        .max(1.0);
    let step = if points.len() > 1 {
        CHART_WIDTH / (points.len() - 1) as f64
    } else {
        0.0
    };

    let coords: Vec<(f64, f64, &str, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let x = i as f64 * step;
            let y = CHART_HEIGHT - (value / top).clamp(0.0, 1.0) * CHART_HEIGHT;
            (x, y, label.as_str(), *value)
        })
        .collect();

    let polyline: Vec<String> = coords.iter().map(|(x, y, _, _)| format!("{x:.1},{y:.1}")).collect();
    let dots: String = coords
        .iter()
        .map(|(x, y, label, value)| {
            format!(
                r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{color}"><title>{label}: {value}</title></circle>"#,
                label = escape_html(label),
            )
        })
        .collect();

    format!(
        r#"<svg viewBox="-5 -5 {w} {h}" width="100%" height="180" role="img"><polyline fill="none" stroke="{color}" stroke-width="2" points="{points}"/>{dots}</svg>"#,
        w = CHART_WIDTH + 10.0,
        h = CHART_HEIGHT + 10.0,
        points = polyline.join(" "),
    )
}
