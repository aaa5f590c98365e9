//! Duty-status events, calendar days, and the cursor that writes them.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rules::{round_hours, HOURS_PER_DAY, TIME_EPSILON_HRS};
use crate::totals::{compute_daily_totals, DailyTotals};

/// The four mutually exclusive log-sheet lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    OffDuty,
    SleeperBerth,
    Driving,
    OnDuty,
}

impl DutyStatus {
    /// In log-sheet row order.
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDuty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "off_duty",
            DutyStatus::SleeperBerth => "sleeper_berth",
            DutyStatus::Driving => "driving",
            DutyStatus::OnDuty => "on_duty",
        }
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change of duty status. The status holds until the next event's `time`,
/// or until midnight for the last event of a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Hour of day in `[0, 24)`, rounded to 4 decimals.
    pub time: f64,
    pub status: DutyStatus,
    pub location: String,
    pub remark: String,
}

impl Event {
    pub fn new(time: f64, status: DutyStatus, location: impl Into<String>, remark: impl Into<String>) -> Self {
        Self {
            time,
            status,
            location: location.into(),
            remark: remark.into(),
        }
    }
}

/// One calendar day of the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    /// 1-based day number.
    pub day: u32,
    /// Days since the trip started.
    pub date_offset: u32,
    pub events: Vec<Event>,
}

impl Day {
    fn open(date_offset: u32) -> Self {
        Self {
            day: date_offset + 1,
            date_offset,
            events: Vec::new(),
        }
    }

    pub fn totals(&self) -> DailyTotals {
        compute_daily_totals(&self.events)
    }
}

/// The status currently in force, replayed at 00:00 when a day rolls over.
#[derive(Debug, Clone)]
struct OpenStatus {
    status: DutyStatus,
    location: String,
    remark: String,
}

/// Write cursor over a multi-day log.
///
/// Time only moves forward through [`Timeline::advance`], which closes the
/// current day at each midnight crossed and reopens the next one with the
/// status that was in force. On-duty work keeps its remark across midnight;
/// other statuses continue with a blank one.
#[derive(Debug)]
pub struct Timeline {
    closed: Vec<Day>,
    current: Day,
    time: f64,
    open: Option<OpenStatus>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            closed: Vec::new(),
            current: Day::open(0),
            time: 0.0,
            open: None,
        }
    }

    /// Hour of day of the cursor. Always in `[0, 24 - TIME_EPSILON_HRS)`.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn date_offset(&self) -> u32 {
        self.current.date_offset
    }

    pub fn open_status(&self) -> Option<DutyStatus> {
        self.open.as_ref().map(|open| open.status)
    }

    /// Record a status change at the cursor. An event already written at
    /// the same rounded time would last zero hours, so it is replaced.
    pub fn emit(&mut self, status: DutyStatus, location: &str, remark: &str) {
        let event = Event::new(round_hours(self.time), status, location, remark);
        let events = &mut self.current.events;
        if events.last().is_some_and(|last| last.time == event.time) {
            events.pop();
        }
        events.push(event);
        self.open = Some(OpenStatus {
            status,
            location: location.to_string(),
            remark: remark.to_string(),
        });
    }

    /// Emit `status` unless it is already the one in force.
    pub fn ensure(&mut self, status: DutyStatus, location: &str) {
        if self.open_status() != Some(status) {
            self.emit(status, location, "");
        }
    }

    /// Move the cursor forward, splitting the open status at every midnight.
    /// Returns the number of midnights crossed.
    pub fn advance(&mut self, hours: f64) -> u32 {
        let mut left = hours;
        let mut crossed = 0;
        while left > 0.0 {
            let to_midnight = HOURS_PER_DAY - self.time;
            if left + TIME_EPSILON_HRS < to_midnight {
                self.time += left;
                break;
            }
            left -= to_midnight;
            self.roll_over();
            crossed += 1;
        }
        crossed
    }

    fn roll_over(&mut self) {
        let next = Day::open(self.current.date_offset + 1);
        let finished = std::mem::replace(&mut self.current, next);
        debug!(day = finished.day, events = finished.events.len(), "closing day at midnight");
        self.closed.push(finished);
        self.time = 0.0;

        if let Some(open) = self.open.take() {
            let remark = if open.status == DutyStatus::OnDuty {
                open.remark.as_str()
            } else {
                ""
            };
            self.current
                .events
                .push(Event::new(0.0, open.status, open.location.as_str(), remark));
            self.open = Some(open);
        }
    }

    /// Close the current day and hand back every day written.
    pub fn finish(mut self) -> Vec<Day> {
        self.closed.push(self.current);
        self.closed
    }
}
