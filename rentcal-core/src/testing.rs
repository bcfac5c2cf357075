//! In-memory `AvailabilityStore` for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::availability::{AvailabilityOverride, BulkOverrideRequest, OverrideUpsert};
use crate::date_range::DateRange;
use crate::error::{RentCalError, RentCalResult};
use crate::reservation::{ReservationInterval, ReservationStatus};
use crate::store::AvailabilityStore;

#[derive(Default)]
pub struct MemoryStore {
    pub overrides: Mutex<Vec<AvailabilityOverride>>,
    pub reservations: Mutex<Vec<ReservationInterval>>,
    pub bulk_requests: Mutex<Vec<BulkOverrideRequest>>,
    pub single_requests: Mutex<Vec<OverrideUpsert>>,
    pub fetches: AtomicUsize,
    /// When set, every call fails with this message.
    pub fail_with: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reservation(self, id: &str, start: NaiveDate, end: NaiveDate, status: ReservationStatus) -> Self {
        self.reservations.lock().unwrap().push(ReservationInterval {
            id: id.to_string(),
            listing_id: "villa-1".to_string(),
            start_date: start,
            end_date: end,
            status,
            guest_name: None,
            total_price: None,
        });
        self
    }

    pub fn with_block(self, date: NaiveDate) -> Self {
        self.overrides
            .lock()
            .unwrap()
            .push(AvailabilityOverride::new("villa-1", date, false));
        self
    }

    pub fn fail(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn recover(&self) {
        *self.fail_with.lock().unwrap() = None;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn check(&self) -> RentCalResult<()> {
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(RentCalError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn upsert(&self, listing_id: &str, date: NaiveDate, is_available: bool) {
        let mut overrides = self.overrides.lock().unwrap();
        match overrides
            .iter_mut()
            .find(|o| o.listing_id == listing_id && o.date == date)
        {
            Some(existing) => existing.is_available = is_available,
            None => overrides.push(AvailabilityOverride::new(listing_id, date, is_available)),
        }
    }
}

#[async_trait]
impl AvailabilityStore for MemoryStore {
    async fn fetch_overrides(&self, listing_id: &str, window: DateRange) -> RentCalResult<Vec<AvailabilityOverride>> {
        self.check()?;
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .overrides
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.listing_id == listing_id && window.contains(o.date))
            .cloned()
            .collect())
    }

    async fn fetch_reservations(&self, listing_id: &str, window: DateRange) -> RentCalResult<Vec<ReservationInterval>> {
        self.check()?;
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.listing_id == listing_id && r.range().is_some_and(|range| range.intersects(&window)))
            .cloned()
            .collect())
    }

    async fn upsert_override(&self, request: &OverrideUpsert) -> RentCalResult<()> {
        self.check()?;
        self.single_requests.lock().unwrap().push(request.clone());
        self.upsert(&request.listing_id, request.date, request.is_available);
        Ok(())
    }

    async fn bulk_upsert(&self, request: &BulkOverrideRequest) -> RentCalResult<()> {
        self.check()?;
        self.bulk_requests.lock().unwrap().push(request.clone());
        for update in &request.updates {
            self.upsert(&request.listing_id, update.date, update.is_available);
        }
        Ok(())
    }

    async fn update_reservation_status(&self, reservation_id: &str, status: ReservationStatus) -> RentCalResult<()> {
        self.check()?;
        let mut reservations = self.reservations.lock().unwrap();
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == reservation_id)
            .ok_or_else(|| RentCalError::Api {
                status: 404,
                message: format!("Reservation {reservation_id} not found"),
            })?;
        reservation.status = status;
        Ok(())
    }
}
