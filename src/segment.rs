//! Flattening route legs into the obligations a driver works through.

use crate::rules::LOADING_HRS;
use crate::traits::RouteLeg;

pub const PICKUP_REMARK: &str = "Pickup/Loading";
pub const DROPOFF_REMARK: &str = "Dropoff/Unloading";

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Continuous driving obligation.
    Drive {
        hours: f64,
        distance_miles: f64,
        from: String,
        to: String,
    },
    /// Fixed-duration stationary on-duty work (loading/unloading).
    OnDutyStop {
        hours: f64,
        location: String,
        remark: String,
    },
}

impl Segment {
    pub fn hours(&self) -> f64 {
        match self {
            Segment::Drive { hours, .. } | Segment::OnDutyStop { hours, .. } => *hours,
        }
    }

    fn drive(leg: &RouteLeg, fallback_from: &str, fallback_to: &str) -> Self {
        Segment::Drive {
            hours: leg.drive_hours(),
            distance_miles: leg.distance_miles(),
            from: label_or(&leg.from_location, fallback_from),
            to: label_or(&leg.to_location, fallback_to),
        }
    }

    fn stop(location: String, remark: &str) -> Self {
        Segment::OnDutyStop {
            hours: LOADING_HRS,
            location,
            remark: remark.to_string(),
        }
    }
}

/// Location labels used when a leg carries none.
#[derive(Debug, Clone, Copy)]
pub struct TripLabels<'a> {
    pub current: &'a str,
    pub pickup: &'a str,
    pub dropoff: &'a str,
}

/// Build the segment list for a trip.
///
/// Leg 1 (current → pickup) becomes a drive followed by loading, leg 2
/// (pickup → dropoff) a drive. Unloading at the dropoff always closes the
/// list, so the result is never empty and always ends with an
/// [`Segment::OnDutyStop`]. Legs past the second are ignored; the builder
/// rejects them before getting here.
pub fn build_segments(legs: &[RouteLeg], labels: TripLabels<'_>) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(4);

    if let Some(leg) = legs.first() {
        segments.push(Segment::drive(leg, labels.current, labels.pickup));
        segments.push(Segment::stop(label_or(&leg.to_location, labels.pickup), PICKUP_REMARK));
    }

    if let Some(leg) = legs.get(1) {
        segments.push(Segment::drive(leg, labels.pickup, labels.dropoff));
    }

    segments.push(Segment::stop(labels.dropoff.to_string(), DROPOFF_REMARK));
    segments
}

fn label_or(label: &str, fallback: &str) -> String {
    let chosen = if label.is_empty() { fallback } else { label };
    chosen.to_string()
}
