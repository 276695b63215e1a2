//! Analytics filters and report

use serde::{Deserialize, Serialize};
use trafficwatch_core::{
    TrafficRecord,
    aggregate::{self, CategoryShare, CongestionPoint, HourlyBucket, TrafficSummary},
};
use trafficwatch_simulator::TrafficService;

/// Query value selecting every location
pub const ALL_LOCATIONS: &str = "all";

/// Time window offered by the analytics filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    /// Last hour
    LastHour,
    /// Last 24 hours
    #[default]
    LastDay,
    /// Last 168 hours
    LastWeek,
}

impl TimeRange {
    /// Every range, in menu order
    pub const ALL: [Self; 3] = [Self::LastHour, Self::LastDay, Self::LastWeek];

    /// Window length in hours
    #[must_use]
    pub const fn hours(self) -> u32 {
        match self {
            Self::LastHour => 1,
            Self::LastDay => 24,
            Self::LastWeek => 168,
        }
    }

    /// Menu label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LastHour => "Last Hour",
            Self::LastDay => "Last 24 Hours",
            Self::LastWeek => "Last Week",
        }
    }

    /// Range for an hour count, if it is one of the offered windows
    #[must_use]
    pub fn from_hours(hours: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|range| range.hours() == hours)
    }
}

/// Location selected in the analytics filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationFilter {
    /// Every record, regardless of time range
    All,
    /// History of one location within the time range
    Only(String),
}

impl LocationFilter {
    /// Parse a query value; blank or `all` selects every location
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | ALL_LOCATIONS) => Self::All,
            Some(location) => Self::Only(location.to_string()),
        }
    }

    /// Query value for this filter
    #[must_use]
    pub fn as_param(&self) -> &str {
        match self {
            Self::All => ALL_LOCATIONS,
            Self::Only(location) => location.as_str(),
        }
    }
}

/// Raw analytics query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// Location or `all`
    pub location: Option<String>,
    /// Window in hours: 1, 24 or 168
    pub hours: Option<u32>,
}

impl AnalyticsQuery {
    /// Resolve the filters, falling back to the 24 hour window
    #[must_use]
    pub fn filters(&self) -> (LocationFilter, TimeRange) {
        let range = self
            .hours
            .and_then(TimeRange::from_hours)
            .unwrap_or_default();
        (LocationFilter::from_param(self.location.as_deref()), range)
    }
}

/// Records matching the filters
///
/// Selecting every location returns the whole store; a single location goes
/// through the history query, including its simulated latency.
pub async fn load_records(
    service: &TrafficService,
    location: &LocationFilter,
    range: TimeRange,
) -> Vec<TrafficRecord> {
    match location {
        LocationFilter::All => service.records(),
        LocationFilter::Only(location) => service.traffic_history(location, range.hours()).await,
    }
}

/// Everything the analytics page shows
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    /// Selected location or `all`
    pub location: String,
    /// Selected window in hours
    pub hours: u32,
    /// Average vehicles per hour of day
    pub hourly: Vec<HourlyBucket>,
    /// Congestion of the newest records
    pub congestion_trend: Vec<CongestionPoint>,
    /// Vehicle totals by category
    pub vehicle_types: Vec<CategoryShare>,
    /// Headline metrics
    pub summary: TrafficSummary,
}

impl AnalyticsReport {
    /// Build the report for already filtered records
    #[must_use]
    pub fn build(
        records: &[TrafficRecord],
        location: &LocationFilter,
        range: TimeRange,
        threshold: f64,
    ) -> Self {
        Self {
            location: location.as_param().to_string(),
            hours: range.hours(),
            hourly: aggregate::hourly_pattern(records),
            congestion_trend: aggregate::congestion_trend(records, aggregate::CONGESTION_TREND_LIMIT),
            vehicle_types: aggregate::vehicle_type_distribution(records),
            summary: TrafficSummary::from_records(records, threshold),
        }
    }
}
