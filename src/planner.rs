//! End-to-end trip planning: geocode, route, schedule, total.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::PlanError;
use crate::polyline::Polyline;
use crate::rules::{round_to, CYCLE_LIMIT_HRS, METERS_PER_MILE, SECONDS_PER_HOUR};
use crate::schedule::{build_trip_schedule, DEFAULT_START_HOUR};
use crate::timeline::{Day, Event};
use crate::totals::DailyTotals;
use crate::traits::{Geocoder, Place, RouteLeg, RouteProvider};

#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Hour of day the driver starts the first shift.
    pub start_hour: f64,
    /// Cycle limit the plan is reported against.
    pub cycle_limit_hrs: f64,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            cycle_limit_hrs: CYCLE_LIMIT_HRS,
        }
    }
}

/// What the driver asks for.
#[derive(Debug, Clone)]
pub struct TripRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Hours already used in the current 70-hour cycle.
    pub current_cycle_used: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub route: RouteSummary,
    pub schedule: Vec<DaySchedule>,
    pub cycle: CycleSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub waypoints: Vec<Waypoint>,
    pub geometry: Polyline,
    pub legs: Vec<RouteLeg>,
    pub total_distance_miles: f64,
    pub total_duration_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Waypoint {
    pub label: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

/// One day of the schedule with its totals, rounded to hundredths.
#[derive(Debug, Clone, Serialize)]
pub struct DaySchedule {
    pub day: u32,
    pub date_offset: u32,
    pub events: Vec<Event>,
    pub totals: DailyTotals,
}

/// The trip measured against the rolling cycle limit. Informational: the
/// schedule itself does not stop when the limit is reached.
#[derive(Debug, Clone, Serialize)]
pub struct CycleSummary {
    pub used_before_trip: f64,
    pub trip_on_duty_hours: f64,
    pub used_after_trip: f64,
    pub limit: f64,
    pub exceeds_limit: bool,
}

const WAYPOINT_LABELS: [&str; 3] = ["Current Location", "Pickup", "Dropoff"];

/// Plan a trip from free-text locations.
///
/// Geocodes the three stops, routes through them, labels the route legs with
/// the places' short names, and builds the duty schedule with per-day
/// totals.
pub fn plan_trip<G, R>(
    request: &TripRequest,
    geocoder: &G,
    router: &R,
    options: &PlanOptions,
) -> Result<TripPlan, PlanError>
where
    G: Geocoder,
    R: RouteProvider,
{
    let queries = [
        required(&request.current_location, "current_location")?,
        required(&request.pickup_location, "pickup_location")?,
        required(&request.dropoff_location, "dropoff_location")?,
    ];
    let cycle_used = request.current_cycle_used;
    if !cycle_used.is_finite() || cycle_used < 0.0 {
        return Err(PlanError::InvalidCycleHours(cycle_used));
    }

    let places = queries
        .iter()
        .map(|query| geocoder.geocode(query))
        .collect::<Result<Vec<Place>, _>>()?;

    let coords: Vec<(f64, f64)> = places.iter().map(Place::coords).collect();
    let mut route = router.route(&coords)?;
    for (leg, pair) in route.legs.iter_mut().zip(places.windows(2)) {
        leg.from_location = pair[0].short_name.clone();
        leg.to_location = pair[1].short_name.clone();
    }

    let days = build_trip_schedule(
        &places[0].short_name,
        &places[1].short_name,
        &places[2].short_name,
        cycle_used,
        &route.legs,
        options.start_hour,
    )?;

    let schedule = summarize_days(days);
    let cycle = cycle_summary(cycle_used, &schedule, options.cycle_limit_hrs);
    if cycle.exceeds_limit {
        warn!(
            used_after_trip = cycle.used_after_trip,
            limit = cycle.limit,
            "trip exceeds the driver's cycle limit"
        );
    }

    let total_distance_miles = round_to(route.distance_meters / METERS_PER_MILE, 1);
    let total_duration_hours = round_to(route.duration_seconds / SECONDS_PER_HOUR, 2);
    info!(
        from = %places[0].short_name,
        to = %places[2].short_name,
        miles = total_distance_miles,
        days = schedule.len(),
        "trip planned"
    );

    let waypoints = WAYPOINT_LABELS
        .into_iter()
        .zip(places)
        .map(|(label, place)| Waypoint {
            label,
            lat: place.lat,
            lon: place.lon,
            display_name: place.short_name,
        })
        .collect();

    Ok(TripPlan {
        route: RouteSummary {
            waypoints,
            geometry: route.geometry,
            legs: route.legs,
            total_distance_miles,
            total_duration_hours,
        },
        schedule,
        cycle,
    })
}

/// Attach rounded totals to each day. Days are independent, so they are
/// totalled in parallel; output order follows input order.
pub fn summarize_days(days: Vec<Day>) -> Vec<DaySchedule> {
    days.into_par_iter()
        .map(|day| {
            let totals = day.totals().rounded(2);
            DaySchedule {
                day: day.day,
                date_offset: day.date_offset,
                events: day.events,
                totals,
            }
        })
        .collect()
}

fn cycle_summary(used_before_trip: f64, schedule: &[DaySchedule], limit: f64) -> CycleSummary {
    let trip_on_duty_hours = round_to(
        schedule.iter().map(|day| day.totals.on_duty_total()).sum(),
        2,
    );
    let used_after_trip = round_to(used_before_trip + trip_on_duty_hours, 2);
    CycleSummary {
        used_before_trip,
        trip_on_duty_hours,
        used_after_trip,
        limit,
        exceeds_limit: used_after_trip > limit,
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, PlanError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(PlanError::MissingLocation(field))
    } else {
        Ok(trimmed)
    }
}
