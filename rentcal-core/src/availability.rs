//! Per-date availability overrides.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An administrative record forcing a date's availability for one listing.
///
/// Unique per `(listing_id, date)`. Unblocking sets `is_available = true`;
/// records are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityOverride {
    pub listing_id: String,
    pub date: NaiveDate,
    pub is_available: bool,

    // Carried through, not used for day status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_nights: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AvailabilityOverride {
    pub fn new(listing_id: &str, date: NaiveDate, is_available: bool) -> Self {
        AvailabilityOverride {
            listing_id: listing_id.to_string(),
            date,
            is_available,
            price: None,
            min_nights: None,
            notes: None,
        }
    }
}

/// One entry of a bulk write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideUpdate {
    pub date: NaiveDate,
    pub is_available: bool,
}

/// Body of a single-date upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideUpsert {
    pub listing_id: String,
    pub date: NaiveDate,
    pub is_available: bool,
}

/// Body of a bulk upsert: every date is written in one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOverrideRequest {
    pub listing_id: String,
    pub updates: Vec<OverrideUpdate>,
}

/// A listing's overrides indexed by date.
///
/// Inserting a second record for the same date replaces the first, matching
/// the store's upsert semantics.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    by_date: BTreeMap<NaiveDate, AvailabilityOverride>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, record: AvailabilityOverride) {
        self.by_date.insert(record.date, record);
    }

    pub fn get(&self, date: NaiveDate) -> Option<&AvailabilityOverride> {
        self.by_date.get(&date)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AvailabilityOverride> {
        self.by_date.values()
    }
}
