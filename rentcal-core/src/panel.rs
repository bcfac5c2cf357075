//! Side panel listing the reservations on one day.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::date_range::DateRange;
use crate::error::RentCalResult;
use crate::reservation::{ReservationInterval, ReservationStatus};
use crate::store::AvailabilityStore;

/// The panel reads reservations on its own rather than sharing the
/// calendar's month data, so the two may briefly disagree until the next
/// refresh.
#[derive(Debug, Clone)]
pub struct ReservationPanel {
    listing_id: String,
    date: NaiveDate,
    reservations: Vec<ReservationInterval>,
    error: Option<String>,
}

impl ReservationPanel {
    /// Open the panel for `date` and load its reservations. A load failure is
    /// kept for display; the panel still opens.
    pub async fn open<S: AvailabilityStore + ?Sized>(store: &S, listing_id: &str, date: NaiveDate) -> Self {
        let mut panel = ReservationPanel {
            listing_id: listing_id.to_string(),
            date,
            reservations: Vec::new(),
            error: None,
        };
        panel.reload(store).await;
        panel
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Every reservation covering the date, whatever its status.
    pub fn reservations(&self) -> &[ReservationInterval] {
        &self.reservations
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn reload<S: AvailabilityStore + ?Sized>(&mut self, store: &S) {
        match fetch_day(store, &self.listing_id, self.date).await {
            Ok(reservations) => {
                self.reservations = reservations;
                self.error = None;
            }
            Err(e) => {
                warn!(listing_id = %self.listing_id, date = %self.date, error = %e, "reservation panel load failed");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Change one reservation's status.
    ///
    /// Returns `true` when the change was stored, in which case the panel has
    /// already reloaded and the caller should refresh its month. On failure
    /// the message is kept inline and the panel stays as it was.
    pub async fn change_status<S: AvailabilityStore + ?Sized>(
        &mut self,
        store: &S,
        reservation_id: &str,
        status: ReservationStatus,
    ) -> bool {
        match store.update_reservation_status(reservation_id, status).await {
            Ok(()) => {
                info!(reservation_id, %status, "reservation status changed");
                self.reload(store).await;
                true
            }
            Err(e) => {
                warn!(reservation_id, %status, error = %e, "reservation status change failed");
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

async fn fetch_day<S: AvailabilityStore + ?Sized>(
    store: &S,
    listing_id: &str,
    date: NaiveDate,
) -> RentCalResult<Vec<ReservationInterval>> {
    let mut reservations = store.fetch_reservations(listing_id, DateRange::single(date)).await?;
    reservations.retain(|r| r.covers(date));
    reservations.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));
    Ok(reservations)
}
