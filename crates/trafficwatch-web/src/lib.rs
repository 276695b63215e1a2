//! Traffic monitoring dashboard
//!
//! Server-rendered HTML pages (dashboard, upload, analytics, alerts) and a
//! JSON API over one in-memory traffic store.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod analytics;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

// Re-export the main functions
pub use server::{build_app, build_app_with_state};
pub use state::AppState;
