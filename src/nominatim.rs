//! Nominatim geocoding client.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::GeocodeError;
use crate::traits::{Geocoder, Place};

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying User-Agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("hos-planner/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimGeocoder {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str) -> Result<Place, GeocodeError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        debug!(%query, "geocoding via Nominatim");

        let results = self
            .client
            .get(url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<NominatimResult>>())
            .map_err(|err| {
                warn!(%query, error = %err, "Nominatim request failed");
                GeocodeError::from(err)
            })?;

        first_place(query, results)
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

fn first_place(query: &str, results: Vec<NominatimResult>) -> Result<Place, GeocodeError> {
    let result = results
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;

    let lat = parse_coordinate(&result.lat, "latitude")?;
    let lon = parse_coordinate(&result.lon, "longitude")?;
    let display_name = result.display_name.unwrap_or_else(|| query.to_string());

    Ok(Place {
        lat,
        lon,
        short_name: short_name(&display_name),
        display_name,
    })
}

fn parse_coordinate(value: &str, what: &str) -> Result<f64, GeocodeError> {
    value
        .trim()
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("{what} {value:?} is not a number")))
}

/// Shorten a full display name to its first two parts, e.g.
/// "Chicago, Cook County, Illinois, United States" → "Chicago, Cook County".
pub fn short_name(display_name: &str) -> String {
    let parts: Vec<&str> = display_name
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [] => display_name.trim().to_string(),
        [only] => only.to_string(),
        [first, second, ..] => format!("{first}, {second}"),
    }
}
