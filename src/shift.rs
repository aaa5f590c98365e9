//! Per-shift accumulators and the driving-chunk constraints derived from them.

use crate::rules::{
    BREAK_AFTER_HRS, BREAK_DURATION_HRS, DRIVE_LIMIT_HRS, DUTY_WINDOW_HRS, FUELING_HRS,
    FUELING_MILES, FUEL_TOLERANCE_MILES, HOURS_PER_DAY, TIME_EPSILON_HRS,
};

/// What a driver has accumulated since the last rest (and, for the break
/// and fuel counters, since the last break / fuel stop).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftState {
    pub shift_drive_hrs: f64,
    /// Elapsed on-duty window, breaks included.
    pub shift_duty_hrs: f64,
    pub drive_since_break: f64,
    pub miles_since_fuel: f64,
    /// Hour of day the current shift began, `None` between shifts.
    pub shift_start_time: Option<f64>,
}

impl ShiftState {
    pub fn start_shift(&mut self, hour_of_day: f64) {
        self.shift_start_time = Some(hour_of_day);
    }

    pub fn in_shift(&self) -> bool {
        self.shift_start_time.is_some()
    }

    /// Driving left before the driving cap or the duty window forces a rest.
    pub fn hours_to_rest(&self) -> f64 {
        (DRIVE_LIMIT_HRS - self.shift_drive_hrs).min(DUTY_WINDOW_HRS - self.shift_duty_hrs)
    }

    pub fn hours_to_break(&self) -> f64 {
        BREAK_AFTER_HRS - self.drive_since_break
    }

    /// Driving hours until the next fuel stop falls due on a segment with
    /// `remaining_hours` / `remaining_miles` left, assuming uniform speed.
    /// Infinite when the segment ends before the tank does.
    pub fn hours_to_fuel(&self, remaining_hours: f64, remaining_miles: f64) -> f64 {
        if remaining_miles <= 0.0 || self.miles_since_fuel + remaining_miles <= FUELING_MILES {
            return f64::INFINITY;
        }
        let miles_to_fuel = (FUELING_MILES - self.miles_since_fuel).max(0.0);
        remaining_hours * (miles_to_fuel / remaining_miles).min(1.0)
    }

    pub fn needs_rest(&self) -> bool {
        self.shift_drive_hrs >= DRIVE_LIMIT_HRS - TIME_EPSILON_HRS
            || self.shift_duty_hrs >= DUTY_WINDOW_HRS - TIME_EPSILON_HRS
    }

    pub fn break_due(&self) -> bool {
        self.drive_since_break >= BREAK_AFTER_HRS - TIME_EPSILON_HRS
    }

    pub fn fuel_due(&self) -> bool {
        self.miles_since_fuel >= FUELING_MILES - FUEL_TOLERANCE_MILES
    }

    /// Whether `hours` more on-duty time fits in the 14-hour window.
    pub fn fits_in_window(&self, hours: f64) -> bool {
        self.shift_duty_hrs + hours <= DUTY_WINDOW_HRS + TIME_EPSILON_HRS
    }

    pub fn record_drive(&mut self, hours: f64, miles: f64) {
        self.shift_drive_hrs += hours;
        self.shift_duty_hrs += hours;
        self.drive_since_break += hours;
        self.miles_since_fuel += miles;
    }

    pub fn record_on_duty(&mut self, hours: f64) {
        self.shift_duty_hrs += hours;
    }

    /// A break stops the break clock but not the duty window.
    pub fn record_break(&mut self) {
        self.shift_duty_hrs += BREAK_DURATION_HRS;
        self.drive_since_break = 0.0;
    }

    pub fn record_fuel(&mut self) {
        self.shift_duty_hrs += FUELING_HRS;
        self.miles_since_fuel = 0.0;
    }

    /// Clear every accumulator after a completed rest. The driver refuels
    /// during the rest, so the fuel counter starts over too.
    pub fn reset_after_rest(&mut self) {
        *self = Self::default();
    }
}

/// The limit that determined a chunk's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    RemainingSegment,
    ToFuel,
    ToBreak,
    ToRest,
    ToMidnight,
}

/// Upper bounds on the next contiguous stretch of driving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkLimits {
    pub remaining_segment: f64,
    pub to_fuel: f64,
    pub to_break: f64,
    pub to_rest: f64,
    pub to_midnight: f64,
}

impl ChunkLimits {
    pub fn new(shift: &ShiftState, remaining_hours: f64, remaining_miles: f64, hour_of_day: f64) -> Self {
        Self {
            remaining_segment: remaining_hours,
            to_fuel: shift.hours_to_fuel(remaining_hours, remaining_miles),
            to_break: shift.hours_to_break(),
            to_rest: shift.hours_to_rest(),
            to_midnight: HOURS_PER_DAY - hour_of_day,
        }
    }

    /// The smallest limit and which constraint it came from. Ties go to the
    /// constraint listed first, so finishing the segment wins over any
    /// obligation that happens to coincide with it.
    pub fn binding(&self) -> (f64, Constraint) {
        [
            (self.remaining_segment, Constraint::RemainingSegment),
            (self.to_fuel, Constraint::ToFuel),
            (self.to_break, Constraint::ToBreak),
            (self.to_rest, Constraint::ToRest),
            (self.to_midnight, Constraint::ToMidnight),
        ]
        .into_iter()
        .fold((f64::INFINITY, Constraint::RemainingSegment), |best, candidate| {
            if candidate.0 < best.0 { candidate } else { best }
        })
    }

    /// Chunk length to drive, floored so the sweep always makes progress.
    pub fn chunk(&self) -> (f64, Constraint) {
        let (hours, constraint) = self.binding();
        if hours <= 0.0 {
            (TIME_EPSILON_HRS, constraint)
        } else {
            (hours, constraint)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_shift_limits() {
        let shift = ShiftState::default();
        assert_eq!(shift.hours_to_rest(), 11.0);
        assert_eq!(shift.hours_to_break(), 8.0);
        assert!(!shift.needs_rest());
        assert!(!shift.in_shift());
    }

    #[test]
    fn test_duty_window_binds_before_drive_limit() {
        let shift = ShiftState {
            shift_drive_hrs: 5.0,
            shift_duty_hrs: 12.0,
            ..Default::default()
        };
        assert_eq!(shift.hours_to_rest(), 2.0);
    }

    #[test]
    fn test_needs_rest_within_tolerance() {
        let shift = ShiftState {
            shift_drive_hrs: 10.9995,
            shift_duty_hrs: 11.5,
            ..Default::default()
        };
        assert!(shift.needs_rest());
    }

    #[test]
    fn test_hours_to_fuel_interpolates() {
        let shift = ShiftState {
            miles_since_fuel: 400.0,
            ..Default::default()
        };
        // 100 of the remaining 200 miles reach the fuel threshold.
        let hours = shift.hours_to_fuel(4.0, 200.0);
        assert!((hours - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_hours_to_fuel_infinite_when_segment_short() {
        let shift = ShiftState::default();
        assert!(shift.hours_to_fuel(2.0, 120.0).is_infinite());
        assert!(shift.hours_to_fuel(2.0, 0.0).is_infinite());
    }

    #[test]
    fn test_break_keeps_window_running() {
        let mut shift = ShiftState::default();
        shift.record_drive(8.0, 440.0);
        assert!(shift.break_due());
        shift.record_break();
        assert!(!shift.break_due());
        assert_eq!(shift.shift_duty_hrs, 8.5);
        assert_eq!(shift.shift_drive_hrs, 8.0);
    }

    #[test]
    fn test_rest_clears_everything() {
        let mut shift = ShiftState::default();
        shift.start_shift(6.0);
        shift.record_drive(11.0, 480.0);
        shift.reset_after_rest();
        assert_eq!(shift.shift_drive_hrs, 0.0);
        assert_eq!(shift.shift_duty_hrs, 0.0);
        assert_eq!(shift.drive_since_break, 0.0);
        assert_eq!(shift.shift_start_time, None);
        assert_eq!(shift.miles_since_fuel, 0.0);
        assert_eq!(shift, ShiftState::default());
    }

    #[test]
    fn test_fits_in_window() {
        let shift = ShiftState {
            shift_duty_hrs: 13.5,
            ..Default::default()
        };
        assert!(shift.fits_in_window(0.5));
        assert!(!shift.fits_in_window(0.75));
    }

    #[test]
    fn test_binding_constraint_each_kind() {
        let base = ChunkLimits {
            remaining_segment: 5.0,
            to_fuel: f64::INFINITY,
            to_break: 8.0,
            to_rest: 11.0,
            to_midnight: 18.0,
        };
        assert_eq!(base.binding(), (5.0, Constraint::RemainingSegment));
        assert_eq!(ChunkLimits { to_fuel: 3.0, ..base }.binding().1, Constraint::ToFuel);
        assert_eq!(ChunkLimits { to_break: 2.0, ..base }.binding().1, Constraint::ToBreak);
        assert_eq!(ChunkLimits { to_rest: 1.5, ..base }.binding().1, Constraint::ToRest);
        assert_eq!(ChunkLimits { to_midnight: 1.0, ..base }.binding().1, Constraint::ToMidnight);
    }

    #[test]
    fn test_tie_prefers_segment_completion() {
        let limits = ChunkLimits {
            remaining_segment: 3.0,
            to_fuel: f64::INFINITY,
            to_break: 3.0,
            to_rest: 3.0,
            to_midnight: 10.0,
        };
        assert_eq!(limits.binding(), (3.0, Constraint::RemainingSegment));
    }

    #[test]
    fn test_chunk_never_stalls() {
        let limits = ChunkLimits {
            remaining_segment: 3.0,
            to_fuel: f64::INFINITY,
            to_break: 0.0,
            to_rest: 3.0,
            to_midnight: 10.0,
        };
        let (hours, constraint) = limits.chunk();
        assert!(hours > 0.0);
        assert_eq!(constraint, Constraint::ToBreak);
    }

    #[test]
    fn test_limits_from_state() {
        let shift = ShiftState {
            shift_drive_hrs: 2.0,
            shift_duty_hrs: 3.0,
            drive_since_break: 2.0,
            miles_since_fuel: 450.0,
            shift_start_time: Some(6.0),
        };
        let limits = ChunkLimits::new(&shift, 4.0, 220.0, 21.0);
        assert_eq!(limits.to_break, 6.0);
        assert_eq!(limits.to_rest, 9.0);
        assert_eq!(limits.to_midnight, 3.0);
        assert!((limits.to_fuel - 4.0 * 50.0 / 220.0).abs() < 1e-9);
        assert_eq!(limits.binding().1, Constraint::ToFuel);
    }
}
