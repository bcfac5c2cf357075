//! Batched block / unblock of a date range.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::availability::{BulkOverrideRequest, OverrideUpdate, OverrideUpsert};
use crate::date_range::DateRange;
use crate::day_status::DayStatus;
use crate::error::{RentCalError, RentCalResult};
use crate::store::AvailabilityStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkIntent {
    /// Make the dates unavailable.
    Block,
    /// Make the dates available again.
    Unblock,
}

impl BulkIntent {
    pub fn is_available(&self) -> bool {
        matches!(self, BulkIntent::Unblock)
    }

    /// What a modifier-click does to a day: blocked days are unblocked,
    /// available days are blocked, reserved days are left alone.
    pub fn toggle_for(status: DayStatus) -> Option<Self> {
        match status {
            DayStatus::Blocked => Some(BulkIntent::Unblock),
            DayStatus::Available => Some(BulkIntent::Block),
            DayStatus::Reserved => None,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            BulkIntent::Block => "block",
            BulkIntent::Unblock => "unblock",
        }
    }
}

/// One override per day of `range`, in date order.
///
/// Reserved days are included on purpose: their override is stored but has
/// no visible effect while the reservation holds the day.
pub fn plan_bulk(range: DateRange, intent: BulkIntent) -> Vec<OverrideUpdate> {
    range
        .days()
        .map(|date| OverrideUpdate {
            date,
            is_available: intent.is_available(),
        })
        .collect()
}

/// Submits availability writes, at most one at a time.
#[derive(Debug, Default)]
pub struct BulkUpdater {
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the submission ends, however it ends.
pub(crate) struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl BulkUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub(crate) fn try_begin(&self) -> RentCalResult<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| RentCalError::Busy)?;
        Ok(InFlight { flag: &self.in_flight })
    }

    /// Write one override per day of `range` as a single batch.
    ///
    /// Returns the number of dates written.
    pub async fn apply<S: AvailabilityStore + ?Sized>(
        &self,
        store: &S,
        listing_id: &str,
        range: DateRange,
        intent: BulkIntent,
    ) -> RentCalResult<usize> {
        let _guard = self.try_begin()?;

        let updates = plan_bulk(range, intent);
        let count = updates.len();
        let request = BulkOverrideRequest {
            listing_id: listing_id.to_string(),
            updates,
        };

        debug!(listing_id, %range, intent = intent.verb(), count, "submitting bulk override");
        match store.bulk_upsert(&request).await {
            Ok(()) => {
                info!(listing_id, %range, intent = intent.verb(), count, "bulk override applied");
                Ok(count)
            }
            Err(e) => {
                warn!(listing_id, %range, error = %e, "bulk override failed");
                Err(e)
            }
        }
    }

    /// Single-day shortcut through the single-record endpoint.
    pub async fn apply_one<S: AvailabilityStore + ?Sized>(
        &self,
        store: &S,
        listing_id: &str,
        date: NaiveDate,
        intent: BulkIntent,
    ) -> RentCalResult<()> {
        let _guard = self.try_begin()?;

        let request = OverrideUpsert {
            listing_id: listing_id.to_string(),
            date,
            is_available: intent.is_available(),
        };

        store.upsert_override(&request).await.inspect_err(|e| {
            warn!(listing_id, %date, error = %e, "override update failed");
        })?;
        info!(listing_id, %date, intent = intent.verb(), "override applied");
        Ok(())
    }
}
