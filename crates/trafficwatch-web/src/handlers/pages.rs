//! Page handlers rendering server-side HTML

use super::upload::{UPLOAD_SUCCESS_MESSAGE, read_upload_form};
use crate::{
    analytics::{self, AnalyticsQuery, AnalyticsReport},
    state::AppState,
    views::{self, Notification, upload::UploadPage},
};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use trafficwatch_core::AlertId;

/// Dashboard page
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let snapshot = state.service.snapshot();
    Html(views::dashboard::render(
        &snapshot,
        state.service.congestion_threshold(),
    ))
}

/// Upload form
pub async fn upload_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let page = UploadPage {
        status: state.service.status(),
        ..UploadPage::default()
    };
    Html(views::upload::render(state.allowed_extensions(), &page))
}

/// Upload form submission
///
/// Validation failures re-render the form with the message and leave the
/// store untouched.
pub async fn submit_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> (StatusCode, Html<String>) {
    let extensions = state.allowed_extensions();

    let form = match read_upload_form(&mut multipart).await {
        Ok(form) => form,
        Err(e) => {
            let note = Notification::error(e.message);
            let page = UploadPage {
                notification: Some(&note),
                status: state.service.status(),
                ..UploadPage::default()
            };
            return (e.status, Html(views::upload::render(extensions, &page)));
        }
    };

    let location = form.location.clone();
    let upload = match form.validate(extensions) {
        Ok(upload) => upload,
        Err(e) => {
            warn!(location = %location, "Upload rejected: {}", e);
            let note = Notification::error(e.user_message());
            let page = UploadPage {
                notification: Some(&note),
                location: &location,
                status: state.service.status(),
                ..UploadPage::default()
            };
            return (
                StatusCode::BAD_REQUEST,
                Html(views::upload::render(extensions, &page)),
            );
        }
    };

    match state.service.upload_image(upload).await {
        Ok(outcome) => {
            info!(location = %outcome.record.location, "Upload analysed");
            let note = Notification::success(UPLOAD_SUCCESS_MESSAGE);
            let page = UploadPage {
                notification: Some(&note),
                outcome: Some(&outcome),
                status: state.service.status(),
                ..UploadPage::default()
            };
            (StatusCode::OK, Html(views::upload::render(extensions, &page)))
        }
        Err(e) => {
            error!("Upload failed: {}", e);
            let note = Notification::error(format!("Upload failed: {e}"));
            let page = UploadPage {
                notification: Some(&note),
                location: &location,
                status: state.service.status(),
                ..UploadPage::default()
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::upload::render(extensions, &page)),
            )
        }
    }
}

/// Analytics page
pub async fn analytics_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyticsQuery>,
) -> Html<String> {
    let (location, range) = query.filters();
    let records = analytics::load_records(&state.service, &location, range).await;
    let report = AnalyticsReport::build(
        &records,
        &location,
        range,
        state.service.congestion_threshold(),
    );

    Html(views::analytics::render(&report, &state.service.locations()))
}

/// Alerts page
pub async fn alerts_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let alerts = state.service.alerts();
    Html(views::alerts::render(&alerts, Utc::now(), None))
}

/// Dismiss button on the alerts page
///
/// Forms cannot send `DELETE`, so the page posts here and is redirected
/// back to the list.
pub async fn dismiss_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AlertId>,
) -> Redirect {
    if state.service.dismiss_alert(id).is_none() {
        warn!(id, "Dismiss requested for unknown alert");
    }
    Redirect::to("/alerts")
}
