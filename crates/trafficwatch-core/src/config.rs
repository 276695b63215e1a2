//! Configuration management for the `trafficwatch` dashboard

use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use validator::Validate;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,

    /// Upload simulator configuration
    #[serde(default)]
    #[validate(nested)]
    pub simulator: SimulatorConfig,

    /// Image upload configuration
    #[serde(default)]
    #[validate(nested)]
    pub upload: UploadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub port: u16,
}

/// Upload simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SimulatorConfig {
    /// Artificial delay before a simulated analysis completes
    #[serde(default = "default_upload_latency_ms")]
    #[validate(range(max = 60_000))]
    pub upload_latency_ms: u64,

    /// Artificial delay before a history query returns
    #[serde(default = "default_history_latency_ms")]
    #[validate(range(max = 60_000))]
    pub history_latency_ms: u64,

    /// Congestion score above which a congestion alert is raised
    #[serde(default = "default_congestion_threshold")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub congestion_threshold: f64,

    /// Load the fixed sample records and alerts at startup
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,

    /// Seed for the random analysis backend, random if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

/// Image upload configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadConfig {
    /// Accepted image extensions
    #[serde(default = "default_allowed_extensions")]
    #[validate(length(min = 1))]
    pub allowed_extensions: Vec<String>,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_upload_size")]
    #[validate(range(min = 1))]
    pub max_upload_size: usize,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Human readable lines
    Text,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format
    #[serde(default)]
    pub format: LogFormat,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_upload_latency_ms() -> u64 {
    2000
}

const fn default_history_latency_ms() -> u64 {
    1000
}

const fn default_congestion_threshold() -> f64 {
    0.7
}

const fn default_seed_sample_data() -> bool {
    true
}

fn default_allowed_extensions() -> Vec<String> {
    ["jpeg", "jpg", "png", "gif", "bmp"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_max_upload_size() -> usize {
    10 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            upload_latency_ms: default_upload_latency_ms(),
            history_latency_ms: default_history_latency_ms(),
            congestion_threshold: default_congestion_threshold(),
            seed_sample_data: default_seed_sample_data(),
            rng_seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Simulated analysis latency
    #[must_use]
    pub const fn upload_latency(&self) -> Duration {
        Duration::from_millis(self.upload_latency_ms)
    }

    /// Simulated history query latency
    #[must_use]
    pub const fn history_latency(&self) -> Duration {
        Duration::from_millis(self.history_latency_ms)
    }

    /// Settings with both latencies removed, for tests and demos
    #[must_use]
    pub fn without_latency(mut self) -> Self {
        self.upload_latency_ms = 0;
        self.history_latency_ms = 0;
        self
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from an optional file and the environment
    ///
    /// Without an explicit path, `config.{toml,json,yaml}` in the working
    /// directory is read if present. Environment variables prefixed with
    /// `TRAFFICWATCH` override file values, with `__` separating sections,
    /// e.g. `TRAFFICWATCH_SIMULATOR__UPLOAD_LATENCY_MS=0`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the resulting
    /// configuration fails validation.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("TRAFFICWATCH")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("upload.allowed_extensions")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.check()?;
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn check(&self) -> crate::Result<()> {
        self.validate().map_err(crate::Error::from)
    }
}
