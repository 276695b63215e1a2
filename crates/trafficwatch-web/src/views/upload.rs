//! Upload page

use super::{Notification, components, escape_html, layout};
use trafficwatch_simulator::{ServiceStatus, UploadOutcome};

/// Everything the upload page shows besides the form itself
#[derive(Debug, Default)]
pub struct UploadPage<'a> {
    /// Transient message from the last submission
    pub notification: Option<&'a Notification>,
    /// Result of a successful submission
    pub outcome: Option<&'a UploadOutcome>,
    /// Location to pre-fill after a failed submission
    pub location: &'a str,
    /// Loading flag and last error of the simulator
    pub status: ServiceStatus,
}

/// `accept` attribute value for the allowed extensions
#[must_use]
pub fn accept_attribute(allowed_extensions: &[String]) -> String {
    allowed_extensions
        .iter()
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render the upload page
#[must_use]
pub fn render(allowed_extensions: &[String], page: &UploadPage<'_>) -> String {
    let supported = allowed_extensions
        .iter()
        .map(|ext| ext.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(", ");

    let body = format!(
        r#"<h1>Upload Traffic Image</h1>
<p class="muted">Upload a traffic image for real-time analysis and congestion prediction</p>
{status}
<div class="card">
<form method="post" action="/upload" enctype="multipart/form-data">
<p><label for="location">Location</label><br>
<input id="location" name="location" type="text" placeholder="e.g. Main Street Junction" value="{location}"></p>
<p><label for="image">Traffic image</label><br>
<input id="image" name="image" type="file" accept="{accept}"></p>
<p class="muted">Supports: {supported}</p>
<p><button type="submit"{disabled}>Analyze Image</button></p>
</form>
</div>
{outcome}"#,
        status = status_line(&page.status),
        location = escape_html(page.location),
        accept = escape_html(&accept_attribute(allowed_extensions)),
        supported = escape_html(&supported),
        disabled = if page.status.loading { " disabled" } else { "" },
        outcome = page.outcome.map(outcome_card).unwrap_or_default(),
    );

    layout::page("Upload", "/upload", page.notification, &body)
}

fn status_line(status: &ServiceStatus) -> String {
    if status.loading {
        return r#"<p class="muted" role="status">Analysis in progress...</p>"#.to_string();
    }
    status
        .last_error
        .as_deref()
        .map(|error| {
            format!(
                r#"<p class="muted" role="status">Last analysis failed: {}</p>"#,
                escape_html(error)
            )
        })
        .unwrap_or_default()
}

/// The generated record and the alert it raised
#[must_use]
pub fn outcome_card(outcome: &UploadOutcome) -> String {
    let alert = outcome
        .alert
        .as_ref()
        .map(components::alert_summary)
        .unwrap_or_else(|| r#"<p class="muted">No alert raised</p>"#.to_string());

    format!(
        r#"<section class="card"><h2>Analysis Result</h2>{record}{alert}</section>"#,
        record = components::record_card(&outcome.record),
    )
}
