//! Route geometry as a decoded coordinate sequence.
//!
//! Points are kept as (latitude, longitude). GeoJSON, which OSRM returns and
//! map frontends expect, orders them [longitude, latitude]; conversion happens
//! at that boundary only, so a polyline serializes as a GeoJSON LineString.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

#[derive(Serialize)]
struct LineString {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: Vec<[f64; 2]>,
}

impl Serialize for Polyline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        LineString {
            kind: "LineString",
            coordinates: self.to_lon_lat(),
        }
        .serialize(serializer)
    }
}

impl Polyline {
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Build from GeoJSON `[lon, lat]` positions.
    pub fn from_lon_lat(coordinates: &[[f64; 2]]) -> Self {
        Self {
            points: coordinates.iter().map(|[lon, lat]| (*lat, *lon)).collect(),
        }
    }

    /// GeoJSON `[lon, lat]` positions.
    pub fn to_lon_lat(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|(lat, lon)| [*lon, *lat]).collect()
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
