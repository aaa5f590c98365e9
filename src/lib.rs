//! hos-planner
//!
//! Hours-of-service trip scheduling for commercial drivers: turns a planned
//! route into a multi-day duty log and per-day duty-status totals.

pub mod error;
pub mod rules;
pub mod traits;
pub mod segment;
pub mod shift;
pub mod timeline;
pub mod schedule;
pub mod totals;
pub mod planner;
pub mod osrm;
pub mod nominatim;
pub mod haversine;
pub mod polyline;

pub use error::{GeocodeError, PlanError, RouteError, ScheduleError};
pub use planner::{plan_trip, PlanOptions, TripPlan, TripRequest};
pub use schedule::{build_trip_schedule, DEFAULT_START_HOUR};
pub use timeline::{Day, DutyStatus, Event};
pub use totals::{compute_daily_totals, DailyTotals};
pub use traits::{Geocoder, Place, Route, RouteLeg, RouteProvider};
