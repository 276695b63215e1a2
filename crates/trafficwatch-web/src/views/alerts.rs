//! Alerts page

use super::{Notification, components, escape_html, layout};
use chrono::{DateTime, Utc};
use trafficwatch_core::{Alert, aggregate, utils};

/// Render the alert list
///
/// `alerts` must already be ordered newest first.
#[must_use]
pub fn render(alerts: &[Alert], now: DateTime<Utc>, notification: Option<&Notification>) -> String {
    let count = alerts.len();
    let heading = format!(
        r#"<div class="bar"><h1>Traffic Alerts</h1><span class="muted">{count} active alert{}</span></div>"#,
        utils::plural(i64::try_from(count).unwrap_or(i64::MAX))
    );

    let content = if alerts.is_empty() {
        r#"<div class="card empty"><h2>All Clear!</h2><p>No active traffic alerts at this time.</p></div>"#
            .to_string()
    } else {
        let items: String = alerts.iter().map(|alert| alert_item(alert, &now)).collect();
        format!("{items}{}", statistics(alerts))
    };

    layout::page("Alerts", "/alerts", notification, &format!("{heading}{content}"))
}

/// One alert with its relative age and a dismiss button
#[must_use]
pub fn alert_item(alert: &Alert, now: &DateTime<Utc>) -> String {
    format!(
        r#"<div class="{class}">
<div>{badge} <span class="muted">{age}</span></div>
<h3>{title}</h3>
<p>{message}</p>
<p class="muted">Location: {location}</p>
<form class="inline" method="post" action="/alerts/{id}/dismiss"><button type="submit">Dismiss</button></form>
</div>"#,
        class = components::alert_class(alert.kind),
        badge = components::alert_badge(alert.kind),
        age = utils::format_relative(&alert.timestamp, now),
        title = alert.kind.title(),
        message = escape_html(&alert.message),
        location = escape_html(&alert.location),
        id = alert.id,
    )
}

/// Counts by kind
#[must_use]
pub fn statistics(alerts: &[Alert]) -> String {
    let stats = aggregate::alert_statistics(alerts);
    let cards = [
        components::metric_card("High Priority", &stats.high_priority.to_string()),
        components::metric_card("Traffic Congestion", &stats.traffic_congestion.to_string()),
        components::metric_card("Total Alerts", &stats.total.to_string()),
    ];
    format!(
        r#"<section><h2>Alert Statistics</h2><div class="grid">{}</div></section>"#,
        cards.concat()
    )
}
