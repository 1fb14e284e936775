//! What the guided view shows for a place and the latest coordinate

use serde::Serialize;

use crate::models::{Coordinate, LocationStatus, Place};

/// Average urban driving speed used for the arrival estimate
const URBAN_SPEED_KMH: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteView {
    pub destination_name: String,
    pub destination_address: String,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub map_url: String,
    pub distance_km: f64,
    pub eta_minutes: u32,
    pub comfort_phrase: Option<&'static str>,
    pub gps_status: LocationStatus,
    pub gps_badge: &'static str,
    pub notice: Option<String>,
}

/// Embeddable map with driving directions from `origin` to the place.
///
/// Places without coordinates are addressed by name and address.
#[must_use]
pub fn map_embed_url(origin: &Coordinate, place: &Place) -> String {
    let destination = match place.coordinate {
        Some(coordinate) => coordinate.format_pair(),
        None => urlencoding::encode(&format!("{}, {}", place.name, place.address)).into_owned(),
    };
    format!(
        "https://maps.google.com/maps?saddr={}&daddr={}&t=m&z=15&output=embed",
        origin.format_pair(),
        destination
    )
}

/// Whole minutes at urban speed, at least one for any non-zero distance
#[must_use]
pub fn eta_minutes(distance_km: f64) -> u32 {
    if distance_km <= 0.0 {
        return 0;
    }
    ((distance_km / URBAN_SPEED_KMH * 60.0).ceil() as u32).max(1)
}

pub(crate) struct RouteInputs<'a> {
    pub place: &'a Place,
    pub origin: Coordinate,
    pub fallback_destination: Coordinate,
    pub comfort_phrase: Option<&'static str>,
    pub gps_status: LocationStatus,
    pub notice: Option<String>,
}

impl RouteView {
    pub(crate) fn build(inputs: RouteInputs<'_>) -> Self {
        let RouteInputs {
            place,
            origin,
            fallback_destination,
            comfort_phrase,
            gps_status,
            notice,
        } = inputs;
        let destination = place.coordinate.unwrap_or(fallback_destination);
        let distance_km = origin.distance_km(&destination);

        Self {
            destination_name: place.name.clone(),
            destination_address: place.address.clone(),
            origin,
            destination,
            map_url: map_embed_url(&origin, place),
            distance_km,
            eta_minutes: eta_minutes(distance_km),
            comfort_phrase,
            gps_status,
            gps_badge: gps_status.badge(),
            notice,
        }
    }
}
