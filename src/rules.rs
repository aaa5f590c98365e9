//! Hours-of-service policy table.
//!
//! These values are regulatory, not tuning knobs, so they are compile-time
//! constants rather than fields on an options struct.

/// Max driving per shift before a rest is required.
pub const DRIVE_LIMIT_HRS: f64 = 11.0;

/// Max on-duty window per shift before a rest is required.
pub const DUTY_WINDOW_HRS: f64 = 14.0;

/// Cumulative driving after which a 30-minute break is mandatory.
pub const BREAK_AFTER_HRS: f64 = 8.0;

pub const BREAK_DURATION_HRS: f64 = 0.5;

/// Off-duty rest between shifts, spent in the sleeper berth.
pub const REST_DURATION_HRS: f64 = 10.0;

pub const PRE_TRIP_HRS: f64 = 0.5;
pub const POST_TRIP_HRS: f64 = 0.5;

/// Duration of each loading/unloading stop.
pub const LOADING_HRS: f64 = 0.5;

pub const FUELING_MILES: f64 = 500.0;
pub const FUELING_HRS: f64 = 0.25;

/// Rolling 70-hour / 8-day cycle limit. Reported, not enforced.
pub const CYCLE_LIMIT_HRS: f64 = 70.0;

/// Average highway speed used when estimating drive time without a router.
pub const AVG_SPEED_MPH: f64 = 55.0;

pub const HOURS_PER_DAY: f64 = 24.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const METERS_PER_MILE: f64 = 1609.34;

/// Tolerance for midnight and limit checks, absorbs accumulated float error.
pub const TIME_EPSILON_HRS: f64 = 0.001;

/// Tolerance for the fuel-distance check.
pub const FUEL_TOLERANCE_MILES: f64 = 0.1;

/// Round an hour-of-day value to the 4-decimal precision events carry.
pub fn round_hours(value: f64) -> f64 {
    round_to(value, 4)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
