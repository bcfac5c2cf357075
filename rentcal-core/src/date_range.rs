//! Date-only calendar math.
//!
//! Everything here works on `NaiveDate` (year, month, day with no time zone),
//! so a `2024-06-10` read from the wire is always June 10th no matter where the
//! admin is sitting.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::error::{RentCalError, RentCalResult};

/// An inclusive range of calendar days. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range from two dates in either order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if b < a {
            DateRange { start: b, end: a }
        } else {
            DateRange { start: a, end: b }
        }
    }

    pub fn single(date: NaiveDate) -> Self {
        DateRange {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True if the two ranges share at least one day.
    pub fn intersects(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Every calendar day from `start` through `end`, inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Number of days in the range (never zero).
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_single_day() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} → {}", self.start, self.end)
        }
    }
}

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    first: NaiveDate,
}

impl Month {
    /// Returns `None` if `month` is not in 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Month { first })
    }

    /// The month a date falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Month {
            first: date - Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first - Duration::days(1)
    }

    pub fn num_days(&self) -> u32 {
        self.last_day().day()
    }

    /// The inclusive window the loader fetches for this month.
    pub fn window(&self) -> DateRange {
        DateRange::new(self.first_day(), self.last_day())
    }

    pub fn next(&self) -> Self {
        Month {
            first: self.first + Months::new(1),
        }
    }

    pub fn prev(&self) -> Self {
        Month::containing(self.first - Duration::days(1))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Month {
    type Err = RentCalError;

    /// Parse `YYYY-MM`. Both month digits are required.
    fn from_str(s: &str) -> RentCalResult<Self> {
        let trimmed = s.trim();
        if trimmed.len() != 7 || trimmed.as_bytes()[4] != b'-' {
            return Err(RentCalError::InvalidMonth(s.to_string()));
        }

        NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .map(Month::containing)
            .map_err(|_| RentCalError::InvalidMonth(s.to_string()))
    }
}

/// Parse a `YYYY-MM-DD` string from its components, never through a timestamp.
pub fn parse_date(s: &str) -> RentCalResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| RentCalError::InvalidDate(s.to_string()))
}
