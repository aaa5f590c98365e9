//! Haversine route provider (fallback when OSRM is unavailable).
//!
//! Estimates each leg from great-circle distance stretched by a road
//! coefficient, driven at a constant average speed. Ignores the road network
//! entirely, but never fails for a well-formed waypoint list.

use crate::error::RouteError;
use crate::polyline::Polyline;
use crate::rules::{AVG_SPEED_MPH, METERS_PER_MILE, SECONDS_PER_HOUR};
use crate::traits::{Route, RouteLeg, RouteProvider};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Typical ratio of road distance to straight-line distance.
const DEFAULT_ROAD_COEFFICIENT: f64 = 1.3;

#[derive(Debug, Clone)]
pub struct HaversineRouter {
    /// Assumed average driving speed in mph.
    pub speed_mph: f64,
    pub road_coefficient: f64,
}

impl Default for HaversineRouter {
    fn default() -> Self {
        Self {
            speed_mph: AVG_SPEED_MPH,
            road_coefficient: DEFAULT_ROAD_COEFFICIENT,
        }
    }
}

impl HaversineRouter {
    pub fn new(speed_mph: f64, road_coefficient: f64) -> Self {
        Self {
            speed_mph,
            road_coefficient,
        }
    }

    /// Great-circle distance between two (lat, lon) points in kilometers.
    pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    fn leg(&self, from: (f64, f64), to: (f64, f64)) -> RouteLeg {
        let meters = Self::haversine_km(from, to) * 1000.0 * self.road_coefficient;
        let hours = meters / METERS_PER_MILE / self.speed_mph;
        RouteLeg::new(meters, hours * SECONDS_PER_HOUR)
    }
}

impl RouteProvider for HaversineRouter {
    fn route(&self, waypoints: &[(f64, f64)]) -> Result<Route, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::NoRoute(format!(
                "need at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }
        if self.speed_mph.is_nan() || self.speed_mph <= 0.0 {
            return Err(RouteError::NoRoute(format!("speed must be positive, got {}", self.speed_mph)));
        }

        let legs: Vec<RouteLeg> = waypoints
            .windows(2)
            .map(|pair| self.leg(pair[0], pair[1]))
            .collect();

        Ok(Route {
            distance_meters: legs.iter().map(|leg| leg.distance_meters).sum(),
            duration_seconds: legs.iter().map(|leg| leg.duration_seconds).sum(),
            geometry: Polyline::new(waypoints.to_vec()),
            legs,
        })
    }
}
