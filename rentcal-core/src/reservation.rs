//! Read-only projection of bookings made elsewhere in the marketplace.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::error::RentCalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// The statuses an admin may pick in the side panel.
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Cancelled,
        ReservationStatus::Completed,
    ];

    /// Only pending and confirmed bookings hold the calendar.
    pub fn is_occupying(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = RentCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReservationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                RentCalError::InvalidInput(format!(
                    "Unknown reservation status '{}'. Expected one of: pending, confirmed, cancelled, completed",
                    s
                ))
            })
    }
}

/// A booking occupying `start_date` through `end_date`, both inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationInterval {
    pub id: String,
    pub listing_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
}

impl ReservationInterval {
    /// The booked dates, or `None` when the record ends before it starts.
    pub fn range(&self) -> Option<DateRange> {
        (self.start_date <= self.end_date).then(|| DateRange::new(self.start_date, self.end_date))
    }

    /// True if the booking spans `date`, whatever its status.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// True if the booking spans `date` and is still holding it.
    pub fn occupies(&self, date: NaiveDate) -> bool {
        self.status.is_occupying() && self.covers(date)
    }
}

/// Wire body for a status change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusPatch {
    pub status: ReservationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn reservation(status: ReservationStatus) -> ReservationInterval {
        ReservationInterval {
            id: "r-1".to_string(),
            listing_id: "villa-1".to_string(),
            start_date: d(10),
            end_date: d(12),
            status,
            guest_name: None,
            total_price: None,
        }
    }

    #[test]
    fn test_reservation_covers_end_date() {
        let r = reservation(ReservationStatus::Confirmed);
        assert!(r.covers(d(10)));
        assert!(r.covers(d(11)));
        assert!(r.covers(d(12)));
        assert!(!r.covers(d(9)));
        assert!(!r.covers(d(13)));
    }

    #[test]
    fn test_inverted_reservation_covers_nothing() {
        let r = ReservationInterval {
            start_date: d(12),
            end_date: d(10),
            ..reservation(ReservationStatus::Confirmed)
        };
        assert!(r.range().is_none());
        for day in 9..=13 {
            assert!(!r.covers(d(day)));
            assert!(!r.occupies(d(day)));
        }
    }

    #[test]
    fn test_only_pending_and_confirmed_occupy() {
        assert!(reservation(ReservationStatus::Pending).occupies(d(11)));
        assert!(reservation(ReservationStatus::Confirmed).occupies(d(11)));
        assert!(!reservation(ReservationStatus::Cancelled).occupies(d(11)));
        assert!(!reservation(ReservationStatus::Completed).occupies(d(11)));
    }

    #[test]
    fn test_status_wire_format() {
        let json = r#"{"id":"r-9","listing_id":"boat-2","start_date":"2024-06-05",
                      "end_date":"2024-06-07","status":"confirmed","guest_name":"Deniz"}"#;
        let r: ReservationInterval = serde_json::from_str(json).unwrap();
        assert_eq!(r.status, ReservationStatus::Confirmed);
        assert_eq!(r.guest_name.as_deref(), Some("Deniz"));

        let patch = serde_json::to_string(&StatusPatch {
            status: ReservationStatus::Cancelled,
        })
        .unwrap();
        assert_eq!(patch, r#"{"status":"cancelled"}"#);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Confirmed".parse::<ReservationStatus>().unwrap(), ReservationStatus::Confirmed);
        assert!("refunded".parse::<ReservationStatus>().is_err());
    }
}
