//! Hours-of-service trip schedule builder.
//!
//! A single forward sweep over the trip's segments. Driving is carved into
//! the longest chunks the shift allows (see [`ChunkLimits`]); after each
//! chunk the builder settles whatever fell due, in priority order: the
//! 30-minute break, the fuel stop, the 10-hour rest. Midnight is handled by
//! the [`Timeline`] cursor, which splits whatever status is open.

use tracing::{debug, trace};

use crate::error::ScheduleError;
use crate::rules::{
    BREAK_DURATION_HRS, FUELING_HRS, HOURS_PER_DAY, POST_TRIP_HRS, PRE_TRIP_HRS,
    REST_DURATION_HRS, TIME_EPSILON_HRS,
};
use crate::segment::{build_segments, Segment, TripLabels};
use crate::shift::{ChunkLimits, ShiftState};
use crate::timeline::{Day, DutyStatus, Timeline};
use crate::traits::RouteLeg;

pub const DEFAULT_START_HOUR: f64 = 6.0;

pub const PRE_TRIP_REMARK: &str = "Pre-trip inspection";
pub const POST_TRIP_REMARK: &str = "Post-trip inspection";
pub const BREAK_REMARK: &str = "30-min break";
pub const FUEL_REMARK: &str = "Fuel stop";
pub const REST_REMARK: &str = "10-hour rest";
pub const END_OF_SHIFT_REMARK: &str = "End of shift";

/// Guard against a drive segment that never finishes.
const MAX_CHUNKS_PER_SEGMENT: usize = 10_000;

/// Build a day-by-day duty schedule for a trip.
///
/// `legs` are current → pickup and pickup → dropoff, in that order; either
/// may be missing. The location names label events when a leg carries no
/// labels of its own. `cycle_used_hrs` is validated but does not change the
/// schedule.
pub fn build_trip_schedule(
    current_location: &str,
    pickup_location: &str,
    dropoff_location: &str,
    cycle_used_hrs: f64,
    legs: &[RouteLeg],
    start_hour: f64,
) -> Result<Vec<Day>, ScheduleError> {
    validate(cycle_used_hrs, legs, start_hour)?;

    let labels = TripLabels {
        current: current_location,
        pickup: pickup_location,
        dropoff: dropoff_location,
    };
    let segments = build_segments(legs, labels);
    debug!(segments = segments.len(), start_hour, "building trip schedule");

    let mut sim = Simulation::new(current_location);
    sim.start(start_hour);

    for segment in &segments {
        match segment {
            Segment::Drive {
                hours,
                distance_miles,
                from,
                to,
            } => sim.drive(*hours, *distance_miles, from, to)?,
            Segment::OnDutyStop {
                hours,
                location,
                remark,
            } => sim.on_duty_stop(*hours, location, remark),
        }
    }

    let days = sim.finish();
    for day in &days {
        check_day(day)?;
    }
    debug!(days = days.len(), "trip schedule built");
    Ok(days)
}

fn validate(cycle_used_hrs: f64, legs: &[RouteLeg], start_hour: f64) -> Result<(), ScheduleError> {
    if !(start_hour.is_finite() && (0.0..HOURS_PER_DAY).contains(&start_hour)) {
        return Err(ScheduleError::InvalidInput(format!(
            "start hour must be in [0, 24), got {start_hour}"
        )));
    }
    if !cycle_used_hrs.is_finite() || cycle_used_hrs < 0.0 {
        return Err(ScheduleError::InvalidInput(format!(
            "cycle hours used must be non-negative, got {cycle_used_hrs}"
        )));
    }
    if legs.len() > 2 {
        return Err(ScheduleError::InvalidInput(format!(
            "expected at most 2 legs (to pickup, to dropoff), got {}",
            legs.len()
        )));
    }
    for (i, leg) in legs.iter().enumerate() {
        if !leg.distance_meters.is_finite() || leg.distance_meters < 0.0 {
            return Err(ScheduleError::InvalidInput(format!(
                "leg {} distance must be non-negative, got {}",
                i + 1,
                leg.distance_meters
            )));
        }
        if !leg.duration_seconds.is_finite() || leg.duration_seconds < 0.0 {
            return Err(ScheduleError::InvalidInput(format!(
                "leg {} duration must be non-negative, got {}",
                i + 1,
                leg.duration_seconds
            )));
        }
    }
    Ok(())
}

/// Every day must start at 00:00 and move strictly forward below 24:00, so
/// that its events tile the whole day in one order only.
fn check_day(day: &Day) -> Result<(), ScheduleError> {
    let violation = |what: String| {
        Err(ScheduleError::InvariantViolation(format!("day {}: {}", day.day, what)))
    };

    match day.events.first() {
        None => return violation("no events".to_string()),
        Some(first) if first.time != 0.0 => {
            return violation(format!("first event at {} instead of 0", first.time));
        }
        Some(_) => {}
    }
    for pair in day.events.windows(2) {
        if pair[1].time <= pair[0].time {
            return violation(format!("event at {} follows {}", pair[1].time, pair[0].time));
        }
    }
    if let Some(last) = day.events.last() {
        if last.time >= HOURS_PER_DAY {
            return violation(format!("event at {} is past midnight", last.time));
        }
    }
    Ok(())
}

/// Mutable state of one schedule build.
struct Simulation {
    timeline: Timeline,
    shift: ShiftState,
    location: String,
}

impl Simulation {
    fn new(location: &str) -> Self {
        Self {
            timeline: Timeline::new(),
            shift: ShiftState::default(),
            location: location.to_string(),
        }
    }

    /// Off duty until `start_hour`, then the first pre-trip inspection.
    fn start(&mut self, start_hour: f64) {
        if start_hour > 0.0 {
            self.timeline.emit(DutyStatus::OffDuty, &self.location, "");
            self.timeline.advance(start_hour);
        }
        self.pre_trip();
    }

    fn pre_trip(&mut self) {
        self.shift.start_shift(self.timeline.time());
        self.work(DutyStatus::OnDuty, PRE_TRIP_REMARK, PRE_TRIP_HRS);
        self.shift.record_on_duty(PRE_TRIP_HRS);
    }

    /// Emit `status` at the cursor and hold it for `hours`.
    fn work(&mut self, status: DutyStatus, remark: &str, hours: f64) {
        self.timeline.emit(status, &self.location, remark);
        self.timeline.advance(hours);
    }

    fn rest(&mut self) {
        debug!(
            day = self.timeline.date_offset() + 1,
            at = self.timeline.time(),
            shift_started_at = ?self.shift.shift_start_time,
            drive_hrs = self.shift.shift_drive_hrs,
            duty_hrs = self.shift.shift_duty_hrs,
            location = %self.location,
            "taking 10-hour rest"
        );
        self.work(DutyStatus::SleeperBerth, REST_REMARK, REST_DURATION_HRS);
        self.shift.reset_after_rest();
    }

    fn take_break(&mut self) {
        debug!(at = self.timeline.time(), "taking 30-minute break");
        self.work(DutyStatus::OffDuty, BREAK_REMARK, BREAK_DURATION_HRS);
        self.shift.record_break();
    }

    fn fuel_stop(&mut self) {
        debug!(at = self.timeline.time(), miles = self.shift.miles_since_fuel, "fuel stop");
        self.work(DutyStatus::OnDuty, FUEL_REMARK, FUELING_HRS);
        self.shift.record_fuel();
    }

    fn drive(&mut self, hours: f64, distance_miles: f64, from: &str, to: &str) -> Result<(), ScheduleError> {
        self.location = from.to_string();
        let mut remaining_hours = hours;
        let mut remaining_miles = distance_miles;
        let mut chunks = 0;

        if remaining_hours > TIME_EPSILON_HRS {
            if !self.shift.in_shift() {
                self.pre_trip();
            }
            // A break or fuel stop can carry over from the previous leg.
            self.settle(false);
        }

        while remaining_hours > TIME_EPSILON_HRS {
            chunks += 1;
            if chunks > MAX_CHUNKS_PER_SEGMENT {
                return Err(ScheduleError::InvariantViolation(format!(
                    "drive {from} -> {to} did not finish after {MAX_CHUNKS_PER_SEGMENT} chunks"
                )));
            }

            let limits = ChunkLimits::new(&self.shift, remaining_hours, remaining_miles, self.timeline.time());
            let (chunk, binding) = limits.chunk();
            let chunk = chunk.min(remaining_hours);
            trace!(at = self.timeline.time(), chunk, ?binding, "driving chunk");

            let miles = remaining_miles * (chunk / remaining_hours);
            self.timeline.ensure(DutyStatus::Driving, &self.location);
            self.shift.record_drive(chunk, miles);
            remaining_hours -= chunk;
            remaining_miles -= miles;
            self.timeline.advance(chunk);

            let finished = remaining_hours <= TIME_EPSILON_HRS;
            if finished {
                self.location = to.to_string();
            }
            self.settle(finished);
        }

        self.location = to.to_string();
        Ok(())
    }

    /// Handle whatever fell due during the last chunk, one obligation at a
    /// time until nothing is pending.
    ///
    /// A rest takes precedence when the shift is spent or when the break or
    /// fuel stop would overrun the duty window; it also clears the break
    /// requirement. If the segment just finished, the rest is left to the
    /// stop that follows.
    fn settle(&mut self, segment_finished: bool) {
        loop {
            let break_due = self.shift.break_due();
            let fuel_due = self.shift.fuel_due();
            let must_rest = self.shift.needs_rest()
                || (break_due && !self.shift.fits_in_window(BREAK_DURATION_HRS))
                || (fuel_due && !self.shift.fits_in_window(FUELING_HRS));

            if must_rest {
                if segment_finished {
                    return;
                }
                self.rest();
                self.pre_trip();
            } else if break_due {
                self.take_break();
            } else if fuel_due {
                self.fuel_stop();
            } else {
                return;
            }
        }
    }

    fn on_duty_stop(&mut self, hours: f64, location: &str, remark: &str) {
        if !self.shift.fits_in_window(hours) {
            self.rest();
        }
        self.location = location.to_string();
        if !self.shift.in_shift() {
            self.shift.start_shift(self.timeline.time());
        }

        self.work(DutyStatus::OnDuty, remark, hours);
        self.shift.record_on_duty(hours);

        if self.shift.needs_rest() {
            self.rest();
        }
    }

    /// Post-trip inspection, then sleeper berth for the rest of the day.
    fn finish(mut self) -> Vec<Day> {
        if self.shift.needs_rest() || !self.shift.fits_in_window(POST_TRIP_HRS) {
            self.rest();
        }
        self.work(DutyStatus::OnDuty, POST_TRIP_REMARK, POST_TRIP_HRS);
        self.shift.record_on_duty(POST_TRIP_HRS);
        self.timeline
            .emit(DutyStatus::SleeperBerth, &self.location, END_OF_SHIFT_REMARK);
        self.timeline.finish()
    }
}
