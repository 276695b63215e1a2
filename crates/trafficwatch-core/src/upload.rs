//! Upload form validation
//!
//! A submitted form is checked here, before anything reaches the
//! simulator. The simulator only accepts a [`ValidatedUpload`], which can
//! only be produced by [`UploadForm::validate`].

use crate::{Error, Result, utils};
use bytes::Bytes;

/// An uploaded image blob
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// Client supplied file name
    pub filename: String,
    /// Client supplied content type, if any
    pub content_type: Option<String>,
    /// Raw bytes
    pub data: Bytes,
}

impl ImageFile {
    /// Create an image from a name and its bytes
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Size in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the file has no content
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Raw upload form as submitted by the user
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    /// Selected image, if any
    pub image: Option<ImageFile>,
    /// Location text as typed
    pub location: String,
}

/// An upload that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    image: ImageFile,
    location: String,
}

impl ValidatedUpload {
    /// The uploaded image
    #[must_use]
    pub const fn image(&self) -> &ImageFile {
        &self.image
    }

    /// Trimmed, non-empty location
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl UploadForm {
    /// Create a form
    pub fn new(image: Option<ImageFile>, location: impl Into<String>) -> Self {
        Self {
            image,
            location: location.into(),
        }
    }

    /// Check the form in the order the user fixes it: file first, then
    /// location, then file type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when no file was chosen, the location
    /// is blank, or the file extension is not in `allowed_extensions`.
    pub fn validate(self, allowed_extensions: &[String]) -> Result<ValidatedUpload> {
        let Some(image) = self.image.filter(|image| !image.filename.is_empty()) else {
            return Err(Error::validation("image", "Please select an image file"));
        };

        let location = self.location.trim();
        if location.is_empty() {
            return Err(Error::validation("location", "Please enter a location"));
        }

        if !utils::validate_file_extension(&image.filename, allowed_extensions) {
            return Err(Error::validation(
                "image",
                format!(
                    "Unsupported image type. Supports: {}",
                    allowed_extensions.join(", ").to_uppercase()
                ),
            ));
        }

        Ok(ValidatedUpload {
            image,
            location: location.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn allowed() -> Vec<String> {
        crate::config::UploadConfig::default().allowed_extensions
    }

    fn png() -> ImageFile {
        ImageFile::new("junction.png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn test_valid_upload_trims_location() {
        let upload = UploadForm::new(Some(png()), "  Main Street Junction ")
            .validate(&allowed())
            .unwrap();

        assert_eq!(upload.location(), "Main Street Junction");
        assert_eq!(upload.image().filename, "junction.png");
        assert_eq!(upload.image().len(), 4);
    }

    #[test]
    fn test_missing_file_is_reported_first() {
        let error = UploadForm::new(None, "").validate(&allowed()).unwrap_err();
        assert_eq!(error.user_message(), "Please select an image file");
    }

    #[rstest]
    #[case("")]
    #[case("   \t")]
    fn test_blank_location_rejected(#[case] location: &str) {
        let error = UploadForm::new(Some(png()), location)
            .validate(&allowed())
            .unwrap_err();

        assert!(
            matches!(
                &error,
                Error::Validation { field, message }
                    if field == "location" && message == "Please enter a location"
            ),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn test_file_without_name_counts_as_missing() {
        let form = UploadForm::new(Some(ImageFile::new("", vec![1, 2, 3])), "Highway 101");
        let error = form.validate(&allowed()).unwrap_err();
        assert_eq!(error.user_message(), "Please select an image file");
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let form = UploadForm::new(Some(ImageFile::new("notes.txt", vec![1])), "Highway 101");
        let error = form.validate(&allowed()).unwrap_err();
        assert!(error.user_message().contains("JPEG, JPG, PNG, GIF, BMP"));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let form = UploadForm::new(Some(ImageFile::new("CAM01.JPG", vec![1])), "Highway 101");
        assert!(form.validate(&allowed()).is_ok());
    }
}
