//! Collaborator interfaces for the trip planner.
//!
//! The scheduler itself only consumes [`RouteLeg`]s. Geocoding and routing
//! sit behind these traits so the planner can be driven by live services
//! (Nominatim, OSRM), by the haversine fallback, or by test doubles.

use serde::{Deserialize, Serialize};

use crate::error::{GeocodeError, RouteError};
use crate::polyline::Polyline;
use crate::rules::{METERS_PER_MILE, SECONDS_PER_HOUR};

/// A resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub lat: f64,
    pub lon: f64,
    /// Full name as returned by the geocoder.
    pub display_name: String,
    /// Canonical short label used on log sheets, e.g. "Chicago, Illinois".
    pub short_name: String,
}

impl Place {
    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

/// One point-to-point part of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    #[serde(default)]
    pub from_location: String,
    #[serde(default)]
    pub to_location: String,
}

impl RouteLeg {
    pub fn new(distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            distance_meters,
            duration_seconds,
            from_location: String::new(),
            to_location: String::new(),
        }
    }

    pub fn between(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_location = from.into();
        self.to_location = to.into();
        self
    }

    pub fn drive_hours(&self) -> f64 {
        self.duration_seconds / SECONDS_PER_HOUR
    }

    pub fn distance_miles(&self) -> f64 {
        self.distance_meters / METERS_PER_MILE
    }
}

/// A driving route through an ordered list of waypoints.
///
/// `legs` has one entry per consecutive waypoint pair. Leg labels are left
/// blank by providers; callers that know the place names fill them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: Polyline,
    pub legs: Vec<RouteLeg>,
}

/// Resolves free-text locations.
pub trait Geocoder {
    /// Resolve `query` to its best match, or fail with
    /// [`GeocodeError::NotFound`] when there is none.
    fn geocode(&self, query: &str) -> Result<Place, GeocodeError>;
}

/// Computes driving routes between coordinates.
pub trait RouteProvider {
    /// Route through `waypoints`, each given as (lat, lon).
    fn route(&self, waypoints: &[(f64, f64)]) -> Result<Route, RouteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leg_unit_conversion() {
        let leg = RouteLeg::new(160_934.0, 7200.0);
        assert!((leg.drive_hours() - 2.0).abs() < 1e-9);
        assert!((leg.distance_miles() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_leg_labels_default_to_blank() {
        let leg: RouteLeg =
            serde_json::from_str(r#"{"distance_meters": 1000.0, "duration_seconds": 60.0}"#).unwrap();
        assert!(leg.from_location.is_empty());
        assert!(leg.to_location.is_empty());
    }
}
