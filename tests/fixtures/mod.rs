//! Test fixtures for hos-planner.
//!
//! Provides realistic test data including:
//! - Real US city locations (from OpenStreetMap)
//! - Leg builders and helpers that flatten a schedule onto absolute time

#![allow(dead_code)]

pub mod us_cities;

#[allow(unused_imports)]
pub use us_cities::*;

use hos_planner::rules::METERS_PER_MILE;
use hos_planner::{Day, DutyStatus, Event, RouteLeg};

/// A leg of `miles` that takes `hours` to drive.
pub fn leg(miles: f64, hours: f64) -> RouteLeg {
    RouteLeg::new(miles * METERS_PER_MILE, hours * 3600.0)
}

/// One status interval of a schedule, in hours since the first midnight.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
    pub status: DutyStatus,
    pub remark: String,
}

impl Span {
    pub fn hours(&self) -> f64 {
        self.end - self.start
    }
}

/// Lay every event of every day onto one absolute time axis. Each event
/// lasts until the next event of its day, or until that day's midnight.
pub fn spans(days: &[Day]) -> Vec<Span> {
    let mut out = Vec::new();
    for day in days {
        let base = f64::from(day.date_offset) * 24.0;
        for (i, event) in day.events.iter().enumerate() {
            let end = day.events.get(i + 1).map_or(24.0, |next| next.time);
            out.push(Span {
                start: base + event.time,
                end: base + end,
                status: event.status,
                remark: event.remark.clone(),
            });
        }
    }
    out
}

pub fn remarks(days: &[Day]) -> Vec<String> {
    days.iter()
        .flat_map(|day| day.events.iter())
        .filter(|event| !event.remark.is_empty())
        .map(|event| event.remark.clone())
        .collect()
}

/// Occurrences of `remark`, not counting the 00:00 continuation of an
/// activity that ran past midnight.
pub fn count_remark(days: &[Day], remark: &str) -> usize {
    let mut count = 0;
    let mut previous: Option<&Event> = None;
    for day in days {
        for (i, event) in day.events.iter().enumerate() {
            let continues = i == 0
                && previous.is_some_and(|prev| prev.status == event.status && prev.remark == event.remark);
            if event.remark == remark && !continues {
                count += 1;
            }
        }
        previous = day.events.last().or(previous);
    }
    count
}

pub fn total_driving(days: &[Day]) -> f64 {
    days.iter().map(|day| day.totals().driving).sum()
}
