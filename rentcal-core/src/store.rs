//! The backend the calendar reads from and writes to.
//!
//! `ApiClient` is the production implementation; tests use an in-memory one.

use async_trait::async_trait;

use crate::availability::{AvailabilityOverride, BulkOverrideRequest, OverrideUpsert};
use crate::date_range::DateRange;
use crate::error::RentCalResult;
use crate::reservation::{ReservationInterval, ReservationStatus};

#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Overrides for `listing_id` dated inside `window`.
    async fn fetch_overrides(&self, listing_id: &str, window: DateRange) -> RentCalResult<Vec<AvailabilityOverride>>;

    /// Reservations for `listing_id` whose range intersects `window`, any status.
    async fn fetch_reservations(&self, listing_id: &str, window: DateRange) -> RentCalResult<Vec<ReservationInterval>>;

    async fn upsert_override(&self, request: &OverrideUpsert) -> RentCalResult<()>;

    /// Write every update in one request: all of them land or none do.
    async fn bulk_upsert(&self, request: &BulkOverrideRequest) -> RentCalResult<()>;

    async fn update_reservation_status(&self, reservation_id: &str, status: ReservationStatus) -> RentCalResult<()>;
}
