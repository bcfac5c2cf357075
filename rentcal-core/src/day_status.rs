//! Day status resolution: reserved beats blocked beats available.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::{AvailabilityOverride, OverrideSet};
use crate::date_range::DateRange;
use crate::reservation::ReservationInterval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Reserved,
    Blocked,
    Available,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Reserved => "reserved",
            DayStatus::Blocked => "blocked",
            DayStatus::Available => "available",
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a single date.
///
/// Total over every date: with no matching records the day is available.
/// When several overrides share a date the last one wins.
pub fn resolve_status(
    date: NaiveDate,
    reservations: &[ReservationInterval],
    overrides: &[AvailabilityOverride],
) -> DayStatus {
    if reservations.iter().any(|r| r.occupies(date)) {
        return DayStatus::Reserved;
    }

    match overrides.iter().rev().find(|o| o.date == date) {
        Some(o) if !o.is_available => DayStatus::Blocked,
        _ => DayStatus::Available,
    }
}

/// Resolve every day of `window` in one pass over the data.
pub fn resolve_window(
    window: DateRange,
    reservations: &[ReservationInterval],
    overrides: &[AvailabilityOverride],
) -> BTreeMap<NaiveDate, DayStatus> {
    let mut index = OverrideSet::new();
    for o in overrides.iter().filter(|o| window.contains(o.date)) {
        index.upsert(o.clone());
    }

    let occupying: Vec<DateRange> = reservations
        .iter()
        .filter(|r| r.status.is_occupying())
        .filter_map(|r| r.range())
        .filter(|range| range.intersects(&window))
        .collect();

    window
        .days()
        .map(|date| {
            let status = if occupying.iter().any(|range| range.contains(date)) {
                DayStatus::Reserved
            } else if index.get(date).is_some_and(|o| !o.is_available) {
                DayStatus::Blocked
            } else {
                DayStatus::Available
            };
            (date, status)
        })
        .collect()
}

/// Per-status day counts for a resolved window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub available: usize,
    pub blocked: usize,
    pub reserved: usize,
}

impl StatusCounts {
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a DayStatus>) -> Self {
        let mut counts = StatusCounts::default();
        for status in statuses {
            match status {
                DayStatus::Available => counts.available += 1,
                DayStatus::Blocked => counts.blocked += 1,
                DayStatus::Reserved => counts.reserved += 1,
            }
        }
        counts
    }
}
