//! Core types and utilities for the `trafficwatch` dashboard
//!
//! Holds the record and alert model, configuration, upload validation and
//! the pure aggregation functions the dashboard views are built from.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod types;
pub mod upload;
pub mod utils;

/// Simple error context handling for binaries
pub mod context_error {
    use std::{error::Error as StdError, fmt};

    /// A simple error type that can wrap any error with context
    #[derive(Debug)]
    pub struct ContextError {
        source: Option<Box<dyn StdError + Send + Sync>>,
        message: String,
    }

    impl ContextError {
        /// Create a new context error from a message
        pub fn new<S: Into<String>>(message: S) -> Self {
            Self {
                source: None,
                message: message.into(),
            }
        }

        /// Create a new context error from an existing error with context
        pub fn with_context<E, S>(error: E, message: S) -> Self
        where
            E: StdError + Send + Sync + 'static,
            S: Into<String>,
        {
            Self {
                source: Some(Box::new(error)),
                message: message.into(),
            }
        }
    }

    impl fmt::Display for ContextError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match &self.source {
                Some(source) => write!(f, "{}: {source}", self.message),
                None => write!(f, "{}", self.message),
            }
        }
    }

    impl StdError for ContextError {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn StdError + 'static))
        }
    }

    /// Result type alias for context errors
    pub type Result<T> = std::result::Result<T, ContextError>;

    /// Create a context error from a literal or a format string
    #[macro_export]
    macro_rules! context_error {
        ($msg:literal) => {
            $crate::context_error::ContextError::new($msg)
        };
        ($fmt:expr, $($arg:tt)*) => {
            $crate::context_error::ContextError::new(format!($fmt, $($arg)*))
        };
    }
}

pub use config::{Config, LogFormat, LoggingConfig};
pub use error::{Error, Result};
pub use types::{
    Alert, AlertDraft, AlertId, AlertKind, CongestionLevel, Severity, TrafficRecord,
    VehicleCategory, VehicleCounts,
};
pub use upload::{ImageFile, UploadForm, ValidatedUpload};

/// Initialize the logging system
///
/// `RUST_LOG` wins over the configured level when it is set.
///
/// # Errors
///
/// Returns an error if the level cannot be parsed or a global subscriber
/// is already installed.
pub fn init_logging(config: &LoggingConfig) -> context_error::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            context_error::ContextError::with_context(e, format!("Invalid log level '{}'", config.level))
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
    };

    installed.map_err(|e| {
        context_error::ContextError::with_context(e, "Failed to install tracing subscriber")
    })
}
