//! Image upload handling shared by the form page and the JSON API

use crate::{error::ApiError, state::AppState};
use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use trafficwatch_core::{Alert, ImageFile, TrafficRecord, UploadForm};

/// Message shown after a successful upload
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Image uploaded and analysis started!";

/// Response for a successful upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Always true
    pub success: bool,
    /// Success message for the client
    pub message: String,
    /// The generated record
    pub record: TrafficRecord,
    /// The alert it raised, if any
    pub alert: Option<Alert>,
}

/// Read the `image` and `location` fields of a multipart body
///
/// Unknown fields are skipped. A file input left empty arrives as a
/// part with no file name and no bytes and is treated as no file.
pub async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read multipart field: {}", e);
                return Err(ApiError::bad_request(format!("Invalid multipart data: {e}")));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read image: {e}")))?;

                if filename.is_empty() && data.is_empty() {
                    continue;
                }
                let mut image = ImageFile::new(filename, data);
                image.content_type = content_type;
                form.image = Some(image);
            }
            "location" => {
                form.location = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read location: {e}")))?;
            }
            other => {
                warn!(field = other, "Ignoring unknown upload field");
            }
        }
    }

    Ok(form)
}

/// `POST /api/upload`
///
/// Validates the form, runs the simulated analysis and returns the new
/// record with its alert.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut multipart = multipart.map_err(|e| {
        ApiError::bad_request(format!("Request must be multipart/form-data: {e}"))
    })?;

    let form = read_upload_form(&mut multipart).await?;
    let upload = form.validate(state.allowed_extensions())?;
    let outcome = state.service.upload_image(upload).await?;

    info!(
        location = %outcome.record.location,
        frame_id = %outcome.record.frame_id,
        "Upload analysed via API"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            success: true,
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            record: outcome.record,
            alert: outcome.alert,
        }),
    ))
}
