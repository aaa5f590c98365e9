//! Error types for scheduling, the collaborators, and trip planning.

use thiserror::Error;

/// Failures of the schedule builder.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Caller supplied legs or hours the builder cannot schedule.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The builder produced (or was about to produce) an inconsistent
    /// timeline. This is a defect, not a user error.
    #[error("schedule invariant violated: {0}")]
    InvariantViolation(String),
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("location not found: {0}")]
    NotFound(String),

    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid geocoder response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("no route: {0}")]
    NoRoute(String),

    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid router response: {0}")]
    InvalidResponse(String),
}

/// Failures of an end-to-end trip plan, one variant per stage.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("{0} is required")]
    MissingLocation(&'static str),

    #[error("cycle hours used must be a non-negative number, got {0}")]
    InvalidCycleHours(f64),

    #[error("geocoding failed: {0}")]
    Geocoding(#[from] GeocodeError),

    #[error("routing failed: {0}")]
    Routing(#[from] RouteError),

    #[error("scheduling failed: {0}")]
    Schedule(#[from] ScheduleError),
}
