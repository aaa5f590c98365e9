//! OSRM HTTP adapter for driving routes.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::RouteError;
use crate::polyline::Polyline;
use crate::traits::{Route, RouteLeg, RouteProvider};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, waypoints: &[(f64, f64)]) -> String {
        let coords = waypoints
            .iter()
            .map(|(lat, lng)| format!("{:.6},{:.6}", lng, lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson&steps=false&annotations=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl RouteProvider for OsrmClient {
    fn route(&self, waypoints: &[(f64, f64)]) -> Result<Route, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::NoRoute(format!(
                "need at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }

        let url = self.route_url(waypoints);
        debug!(waypoints = waypoints.len(), %url, "requesting OSRM route");

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())
            .map_err(|err| {
                warn!(error = %err, "OSRM request failed");
                RouteError::from(err)
            })?;

        into_route(body)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: Option<OsrmGeometry>,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    distance: f64,
    duration: f64,
}

fn into_route(body: OsrmRouteResponse) -> Result<Route, RouteError> {
    if body.code != "Ok" {
        let message = body.message.unwrap_or_else(|| "Unknown error".to_string());
        warn!(code = %body.code, %message, "OSRM returned no route");
        return Err(RouteError::NoRoute(format!("{}: {}", body.code, message)));
    }

    let route = body
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RouteError::InvalidResponse("OSRM answered Ok without routes".to_string()))?;

    let legs = route
        .legs
        .iter()
        .map(|leg| RouteLeg::new(leg.distance, leg.duration))
        .collect::<Vec<_>>();
    debug!(
        distance_m = route.distance,
        duration_s = route.duration,
        legs = legs.len(),
        "received OSRM route"
    );

    Ok(Route {
        distance_meters: route.distance,
        duration_seconds: route.duration,
        geometry: route
            .geometry
            .map(|geometry| Polyline::from_lon_lat(&geometry.coordinates))
            .unwrap_or_default(),
        legs,
    })
}
