//! Loads the overrides and reservations behind the visible month.

use tracing::{debug, warn};

use crate::availability::AvailabilityOverride;
use crate::date_range::Month;
use crate::error::{RentCalError, RentCalResult};
use crate::reservation::ReservationInterval;
use crate::store::AvailabilityStore;

/// Everything fetched for one listing and one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthData {
    pub month: Month,
    pub overrides: Vec<AvailabilityOverride>,
    pub reservations: Vec<ReservationInterval>,
}

impl MonthData {
    pub fn empty(month: Month) -> Self {
        MonthData {
            month,
            overrides: Vec::new(),
            reservations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Identifies one load request. Only the most recent ticket may apply its
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    month: Month,
}

impl LoadTicket {
    pub fn month(&self) -> Month {
        self.month
    }
}

/// Holds the last good month of data plus the outcome of the latest request.
#[derive(Debug, Default)]
pub struct MonthLoader {
    data: Option<MonthData>,
    error: Option<String>,
    generation: u64,
    pending: Option<u64>,
}

impl MonthLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&MonthData> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn state(&self) -> LoadState {
        if self.pending.is_some() {
            LoadState::Loading
        } else if self.error.is_some() {
            LoadState::Failed
        } else if self.data.is_some() {
            LoadState::Ready
        } else {
            LoadState::Idle
        }
    }

    /// Start a request for `month`, superseding any request still out.
    pub fn begin(&mut self, month: Month) -> LoadTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        LoadTicket {
            generation: self.generation,
            month,
        }
    }

    /// Apply the outcome of a request.
    ///
    /// Results for superseded tickets are dropped and `false` is returned.
    /// A failure records its message and leaves the previous data in place.
    pub fn finish(&mut self, ticket: LoadTicket, result: RentCalResult<MonthData>) -> bool {
        if self.pending != Some(ticket.generation) {
            debug!(month = %ticket.month, generation = ticket.generation, "dropping stale month response");
            return false;
        }
        self.pending = None;

        match result {
            Ok(data) => {
                debug!(
                    month = %data.month,
                    overrides = data.overrides.len(),
                    reservations = data.reservations.len(),
                    "month loaded"
                );
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                warn!(month = %ticket.month, error = %e, "month load failed");
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Fetch and apply `month` for `listing_id`.
    pub async fn load<S: AvailabilityStore + ?Sized>(&mut self, store: &S, listing_id: &str, month: Month) -> bool {
        let ticket = self.begin(month);
        let result = fetch_month(store, listing_id, month).await;
        self.finish(ticket, result)
    }
}

/// Fetch overrides and reservations for the month window concurrently.
pub async fn fetch_month<S: AvailabilityStore + ?Sized>(
    store: &S,
    listing_id: &str,
    month: Month,
) -> RentCalResult<MonthData> {
    if listing_id.trim().is_empty() {
        return Err(RentCalError::InvalidInput("Listing id must not be empty".into()));
    }

    let window = month.window();
    let (overrides, reservations) = tokio::try_join!(
        store.fetch_overrides(listing_id, window),
        store.fetch_reservations(listing_id, window),
    )?;

    Ok(MonthData {
        month,
        overrides,
        reservations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::ReservationStatus;
    use crate::testing::MemoryStore;
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn june() -> Month {
        Month::new(2024, 6).unwrap()
    }

    #[tokio::test]
    async fn test_load_fetches_month_window() {
        let store = MemoryStore::new()
            .with_reservation("r-1", d(5, 30), d(6, 2), ReservationStatus::Confirmed)
            .with_reservation("r-2", d(7, 1), d(7, 3), ReservationStatus::Confirmed)
            .with_block(d(6, 15))
            .with_block(d(7, 15));

        let mut loader = MonthLoader::new();
        assert_eq!(loader.state(), LoadState::Idle);

        assert!(loader.load(&store, "villa-1", june()).await);

        let data = loader.data().unwrap();
        assert_eq!(loader.state(), LoadState::Ready);
        assert_eq!(data.month, june());
        assert_eq!(data.overrides.len(), 1);
        assert_eq!(data.reservations.len(), 1);
        assert_eq!(data.reservations[0].id, "r-1");
    }

    #[tokio::test]
    async fn test_empty_listing_is_rejected() {
        let store = MemoryStore::new();
        let mut loader = MonthLoader::new();

        loader.load(&store, "  ", june()).await;

        assert_eq!(loader.state(), LoadState::Failed);
        assert_eq!(loader.error(), Some("Invalid input: Listing id must not be empty"));
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let store = MemoryStore::new().with_block(d(6, 15));
        let mut loader = MonthLoader::new();
        loader.load(&store, "villa-1", june()).await;

        store.fail("connection reset");
        loader.load(&store, "villa-1", june().next()).await;

        assert_eq!(loader.state(), LoadState::Failed);
        assert_eq!(loader.error(), Some("Server error (500): connection reset"));
        let data = loader.data().unwrap();
        assert_eq!(data.month, june());
        assert_eq!(data.overrides.len(), 1);

        store.recover();
        loader.load(&store, "villa-1", june()).await;
        assert_eq!(loader.state(), LoadState::Ready);
        assert_eq!(loader.error(), None);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut loader = MonthLoader::new();
        let june_ticket = loader.begin(june());
        let july_ticket = loader.begin(june().next());
        assert_eq!(loader.state(), LoadState::Loading);

        assert!(loader.finish(july_ticket, Ok(MonthData::empty(june().next()))));
        assert!(!loader.finish(june_ticket, Ok(MonthData::empty(june()))));

        assert_eq!(loader.data().unwrap().month, june().next());
        assert_eq!(loader.state(), LoadState::Ready);
    }

    #[test]
    fn test_stale_failure_does_not_surface() {
        let mut loader = MonthLoader::new();
        let old = loader.begin(june());
        let current = loader.begin(june().next());

        assert!(!loader.finish(old, Err(RentCalError::Busy)));
        assert_eq!(loader.error(), None);
        assert_eq!(loader.state(), LoadState::Loading);

        loader.finish(current, Ok(MonthData::empty(current.month())));
        assert_eq!(loader.state(), LoadState::Ready);
    }
}
