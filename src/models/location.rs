//! Coordinate and device location status

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A single position reading
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as `lat,lng` for URLs and prompts
    #[must_use]
    pub fn format_pair(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Great-circle distance to another coordinate
    #[must_use]
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let from = HaversineLocation {
            latitude: self.latitude,
            longitude: self.longitude,
        };
        let to = HaversineLocation {
            latitude: other.latitude,
            longitude: other.longitude,
        };
        distance(from, to, Units::Kilometers)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Outcome classification of the most recent location acquisition.
///
/// `PermissionDenied` is sticky; every other status is replaced by newer readings.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    #[default]
    Unknown,
    Active,
    PermissionDenied,
    SignalLost,
    Unsupported,
}

impl LocationStatus {
    /// Short badge text shown next to the map
    #[must_use]
    pub fn badge(&self) -> &'static str {
        match self {
            LocationStatus::Active => "GPS ON",
            LocationStatus::Unknown => "GPS",
            LocationStatus::SignalLost => "SINAL FRACO",
            LocationStatus::PermissionDenied | LocationStatus::Unsupported => "MODO OFFLINE",
        }
    }
}
