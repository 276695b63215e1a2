//! In-memory traffic store and simulated image analysis
//!
//! The [`TrafficService`] owns one [`TrafficStore`] and an injected
//! [`AnalysisBackend`]. Uploads go through the backend after a simulated
//! latency, the resulting record is stored and at most one alert is raised
//! for it. Nothing here talks to a real detection model.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::significant_drop_tightening,
    clippy::unused_async
)]

pub mod backend;
pub mod error;
pub mod mock;
pub mod random;
pub mod rules;
pub mod seed;
pub mod service;
pub mod store;

pub use backend::{AnalysisBackend, Reading};
pub use error::{SimulatorError, SimulatorResult};
pub use mock::MockAnalysisBackend;
pub use random::RandomAnalysisBackend;
pub use service::{ServiceStatus, StoreSnapshot, TrafficService, UploadOutcome};
pub use store::TrafficStore;
