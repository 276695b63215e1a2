//! Core data types for the `trafficwatch` dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Alert identifier type
pub type AlertId = u64;

/// Vehicle categories reported by an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    /// Passenger cars
    Cars,
    /// Trucks
    Trucks,
    /// Buses
    Buses,
    /// Bicycles and motorcycles
    Bikes,
    /// Ambulances
    Ambulances,
}

impl VehicleCategory {
    /// Every category, in display order
    pub const ALL: [Self; 5] = [
        Self::Cars,
        Self::Trucks,
        Self::Buses,
        Self::Bikes,
        Self::Ambulances,
    ];

    /// Title-cased label used in charts and tables
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cars => "Cars",
            Self::Trucks => "Trucks",
            Self::Buses => "Buses",
            Self::Bikes => "Bikes",
            Self::Ambulances => "Ambulances",
        }
    }
}

impl std::fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-category vehicle counts of one analysed frame
///
/// The total is always derived from the five categories, so a
/// `VehicleCounts` can never disagree with itself. The serialized form
/// still carries `total` for API consumers; deserializing a payload whose
/// `total` does not match the categories fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "VehicleCountsRepr", try_from = "VehicleCountsRepr")]
pub struct VehicleCounts {
    cars: u32,
    trucks: u32,
    buses: u32,
    bikes: u32,
    ambulances: u32,
}

impl VehicleCounts {
    /// Create counts from the five categories
    #[must_use]
    pub const fn new(cars: u32, trucks: u32, buses: u32, bikes: u32, ambulances: u32) -> Self {
        Self {
            cars,
            trucks,
            buses,
            bikes,
            ambulances,
        }
    }

    /// Number of cars
    #[must_use]
    pub const fn cars(&self) -> u32 {
        self.cars
    }

    /// Number of trucks
    #[must_use]
    pub const fn trucks(&self) -> u32 {
        self.trucks
    }

    /// Number of buses
    #[must_use]
    pub const fn buses(&self) -> u32 {
        self.buses
    }

    /// Number of bikes
    #[must_use]
    pub const fn bikes(&self) -> u32 {
        self.bikes
    }

    /// Number of ambulances
    #[must_use]
    pub const fn ambulances(&self) -> u32 {
        self.ambulances
    }

    /// Count for a single category
    #[must_use]
    pub const fn get(&self, category: VehicleCategory) -> u32 {
        match category {
            VehicleCategory::Cars => self.cars,
            VehicleCategory::Trucks => self.trucks,
            VehicleCategory::Buses => self.buses,
            VehicleCategory::Bikes => self.bikes,
            VehicleCategory::Ambulances => self.ambulances,
        }
    }

    /// Sum of the five categories
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.cars + self.trucks + self.buses + self.bikes + self.ambulances
    }

    /// Category/count pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (VehicleCategory, u32)> + '_ {
        VehicleCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

#[derive(Serialize, Deserialize)]
struct VehicleCountsRepr {
    cars: u32,
    trucks: u32,
    buses: u32,
    bikes: u32,
    ambulances: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total: Option<u32>,
}

impl From<VehicleCounts> for VehicleCountsRepr {
    fn from(counts: VehicleCounts) -> Self {
        Self {
            cars: counts.cars,
            trucks: counts.trucks,
            buses: counts.buses,
            bikes: counts.bikes,
            ambulances: counts.ambulances,
            total: Some(counts.total()),
        }
    }
}

impl TryFrom<VehicleCountsRepr> for VehicleCounts {
    type Error = crate::Error;

    fn try_from(repr: VehicleCountsRepr) -> Result<Self, Self::Error> {
        let counts = Self::new(repr.cars, repr.trucks, repr.buses, repr.bikes, repr.ambulances);
        match repr.total {
            Some(total) if total != counts.total() => Err(crate::Error::validation(
                "vehicle_counts.total",
                format!(
                    "total {total} does not match the category sum {}",
                    counts.total()
                ),
            )),
            _ => Ok(counts),
        }
    }
}

/// Congestion band shown on record badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    /// Score above 0.7
    High,
    /// Score above 0.4
    Medium,
    /// Everything else
    Low,
}

impl CongestionLevel {
    /// Band a congestion score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            Self::High
        } else if score > 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Badge label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// One analysed traffic frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TrafficRecord {
    /// Frame identifier, `{location}_{unix_millis}` for generated records
    #[validate(length(min = 1))]
    pub frame_id: String,

    /// When the frame was analysed
    pub timestamp: DateTime<Utc>,

    /// Where the frame was captured
    #[validate(length(min = 1, max = 255))]
    pub location: String,

    /// Vehicle counts by category
    pub vehicle_counts: VehicleCounts,

    /// Traffic density in `[0, 1]`
    #[validate(range(min = 0.0, max = 1.0))]
    pub congestion_score: f64,

    /// Estimated minutes until normal flow resumes
    pub clearance_time_minutes: u32,

    /// Whether an ambulance was detected in the frame
    pub ambulance_detected: bool,
}

impl TrafficRecord {
    /// Congestion band of this record
    #[must_use]
    pub fn congestion_level(&self) -> CongestionLevel {
        CongestionLevel::from_score(self.congestion_score)
    }

    /// Congestion as a percentage
    #[must_use]
    pub fn congestion_percent(&self) -> f64 {
        self.congestion_score * 100.0
    }
}

/// Kind of dashboard alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    /// Ambulance detected, highest precedence
    HighPriority,
    /// Congestion score exceeded the threshold
    TrafficCongestion,
    /// Any other alert
    #[serde(other)]
    General,
}

impl AlertKind {
    /// Heading shown on alert cards
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::HighPriority => "High Priority Alert",
            Self::TrafficCongestion | Self::General => "Traffic Alert",
        }
    }

    /// Badge text shown next to the timestamp
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::HighPriority => "High Priority",
            Self::TrafficCongestion => "Traffic Alert",
            Self::General => "Info",
        }
    }

    /// Severity attached to newly raised alerts of this kind
    #[must_use]
    pub const fn default_severity(self) -> Severity {
        match self {
            Self::HighPriority => Severity::High,
            Self::TrafficCongestion => Severity::Medium,
            Self::General => Severity::Low,
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighPriority => write!(f, "HIGH_PRIORITY"),
            Self::TrafficCongestion => write!(f, "TRAFFIC_CONGESTION"),
            Self::General => write!(f, "GENERAL"),
        }
    }
}

/// Alert severity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// High severity
    High,
    /// Medium severity
    Medium,
    /// Low severity
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// An alert that has not been given an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDraft {
    /// Alert kind
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// Human readable message
    pub message: String,
    /// Timestamp copied from the triggering record
    pub timestamp: DateTime<Utc>,
    /// Location copied from the triggering record
    pub location: String,
    /// Severity label
    pub severity: Severity,
}

impl AlertDraft {
    /// Attach an id
    #[must_use]
    pub fn with_id(self, id: AlertId) -> Alert {
        Alert {
            id,
            kind: self.kind,
            message: self.message,
            timestamp: self.timestamp,
            location: self.location,
            severity: self.severity,
        }
    }
}

/// A dashboard alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert identifier
    pub id: AlertId,
    /// Alert kind
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// Human readable message
    pub message: String,
    /// When the alert was raised
    pub timestamp: DateTime<Utc>,
    /// Location the alert refers to
    pub location: String,
    /// Severity label
    pub severity: Severity,
}
