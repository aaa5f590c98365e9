//! Per-day hours by duty status.

use serde::{Deserialize, Serialize};

use crate::rules::{round_to, HOURS_PER_DAY};
use crate::timeline::{DutyStatus, Event};

/// Hours spent in each duty status over one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub off_duty: f64,
    pub sleeper_berth: f64,
    pub driving: f64,
    pub on_duty: f64,
}

impl DailyTotals {
    pub fn get(&self, status: DutyStatus) -> f64 {
        match status {
            DutyStatus::OffDuty => self.off_duty,
            DutyStatus::SleeperBerth => self.sleeper_berth,
            DutyStatus::Driving => self.driving,
            DutyStatus::OnDuty => self.on_duty,
        }
    }

    fn add(&mut self, status: DutyStatus, hours: f64) {
        let slot = match status {
            DutyStatus::OffDuty => &mut self.off_duty,
            DutyStatus::SleeperBerth => &mut self.sleeper_berth,
            DutyStatus::Driving => &mut self.driving,
            DutyStatus::OnDuty => &mut self.on_duty,
        };
        *slot += hours;
    }

    pub fn total(&self) -> f64 {
        self.off_duty + self.sleeper_berth + self.driving + self.on_duty
    }

    /// Hours that count against the driver's cycle: driving plus on-duty.
    pub fn on_duty_total(&self) -> f64 {
        self.driving + self.on_duty
    }

    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            off_duty: round_to(self.off_duty, decimals),
            sleeper_berth: round_to(self.sleeper_berth, decimals),
            driving: round_to(self.driving, decimals),
            on_duty: round_to(self.on_duty, decimals),
        }
    }
}

/// Sum how long each status was in force.
///
/// Events are sorted by time first, so the order they arrive in does not
/// matter. Each event runs until the next one starts, the last one until
/// midnight. Negative spans (events past 24h) count as zero.
pub fn compute_daily_totals(events: &[Event]) -> DailyTotals {
    let mut totals = DailyTotals::default();

    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by(|a, b| a.time.total_cmp(&b.time));

    for (i, event) in sorted.iter().enumerate() {
        let end = sorted.get(i + 1).map_or(HOURS_PER_DAY, |next| next.time);
        totals.add(event.status, (end - event.time).max(0.0));
    }

    totals
}
