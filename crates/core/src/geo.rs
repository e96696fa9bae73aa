//! Coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::Place;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::Validation(format!(
                "Coordinates out of range: ({latitude}, {longitude})"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn of(place: &Place) -> Option<Self> {
        Some(Self {
            latitude: place.latitude?,
            longitude: place.longitude?,
        })
    }
}

/// Haversine distance in kilometres.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Fill in missing `distance_km` from `origin` and sort nearest first.
/// Places without coordinates or distance sort last.
pub fn annotate_and_sort(places: &mut [Place], origin: Coordinates) {
    for place in places.iter_mut() {
        if place.distance_km.is_none() {
            place.distance_km = Coordinates::of(place).map(|c| haversine_km(origin, c));
        }
    }
    places.sort_by(|a, b| {
        let da = a.distance_km.unwrap_or(f64::INFINITY);
        let db = b.distance_km.unwrap_or(f64::INFINITY);
        da.total_cmp(&db)
    });
}
