//! Utility functions for the `trafficwatch` dashboard

use chrono::{DateTime, Utc};
use std::path::Path;

/// Validate file extension
#[must_use]
pub fn validate_file_extension(filename: &str, allowed: &[String]) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            allowed
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

/// Frame identifier for a generated record
#[must_use]
pub fn frame_id(location: &str, timestamp: &DateTime<Utc>) -> String {
    format!("{location}_{}", timestamp.timestamp_millis())
}

/// Absolute timestamp as shown on cards
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Hour and minute, as used on chart axes
#[must_use]
pub fn format_clock(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%H:%M").to_string()
}

/// Age of `timestamp` relative to `now`
///
/// Under a minute reads "Just now", under an hour "N minutes ago", under a
/// day "N hours ago"; anything older falls back to the absolute timestamp.
#[must_use]
pub fn format_relative(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let minutes = (*now - *timestamp).num_minutes();

    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} minute{} ago", plural(minutes));
    }
    if minutes < 1440 {
        let hours = minutes / 60;
        return format!("{hours} hour{} ago", plural(hours));
    }
    format_timestamp(timestamp)
}

/// Suffix for a count: "" for one, "s" otherwise
#[must_use]
pub const fn plural(count: i64) -> &'static str {
    if count == 1 { "" } else { "s" }
}
