//! Error types for the upload simulator

use thiserror::Error;

/// Result type alias for simulator operations
pub type SimulatorResult<T> = Result<T, SimulatorError>;

/// Errors that can occur while simulating an analysis
#[derive(Error, Debug)]
pub enum SimulatorError {
    /// The analysis backend could not produce a reading
    #[error("Analysis failed: {message}")]
    Backend {
        /// Error message
        message: String,
    },

    /// The backend produced a reading that does not form a valid record
    #[error("Invalid reading: {0}")]
    InvalidReading(String),

    /// Error from the core crate
    #[error(transparent)]
    Core(#[from] trafficwatch_core::Error),
}

impl SimulatorError {
    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

impl From<validator::ValidationErrors> for SimulatorError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidReading(errors.to_string())
    }
}
