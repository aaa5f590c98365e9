//! Real US freight cities for realistic test fixtures.
//!
//! Coordinates are city-centre points from OpenStreetMap. Display names
//! follow Nominatim's "city, county, state, country" layout.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub display_name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, display_name: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            name,
            display_name,
            lat,
            lng,
        }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Upper Midwest (short hops, single-day trips)
// ============================================================================

pub const CHICAGO: Location = Location::new(
    "Chicago, IL",
    "Chicago, Cook County, Illinois, United States",
    41.8755616,
    -87.6244212,
);
pub const MILWAUKEE: Location = Location::new(
    "Milwaukee, WI",
    "Milwaukee, Milwaukee County, Wisconsin, United States",
    43.0349931,
    -87.9224969,
);
pub const MADISON: Location = Location::new(
    "Madison, WI",
    "Madison, Dane County, Wisconsin, United States",
    43.074761,
    -89.3837613,
);
pub const MINNEAPOLIS: Location = Location::new(
    "Minneapolis, MN",
    "Minneapolis, Hennepin County, Minnesota, United States",
    44.9772995,
    -93.2654692,
);

// ============================================================================
// Long haul (multi-day trips)
// ============================================================================

pub const DENVER: Location = Location::new(
    "Denver, CO",
    "Denver, Denver County, Colorado, United States",
    39.7392364,
    -104.984862,
);
pub const DALLAS: Location = Location::new(
    "Dallas, TX",
    "Dallas, Dallas County, Texas, United States",
    32.7762719,
    -96.7968559,
);
pub const LOS_ANGELES: Location = Location::new(
    "Los Angeles, CA",
    "Los Angeles, Los Angeles County, California, United States",
    34.0536909,
    -118.242766,
);
pub const NEW_YORK: Location = Location::new(
    "New York, NY",
    "New York, New York County, New York, United States",
    40.7127281,
    -74.0060152,
);

pub const ALL_CITIES: &[Location] = &[
    CHICAGO,
    MILWAUKEE,
    MADISON,
    MINNEAPOLIS,
    DENVER,
    DALLAS,
    LOS_ANGELES,
    NEW_YORK,
];

pub fn find(name: &str) -> Option<&'static Location> {
    ALL_CITIES.iter().find(|city| city.name.eq_ignore_ascii_case(name.trim()))
}
