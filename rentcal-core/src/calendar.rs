//! The admin availability calendar for one listing.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bulk::{BulkIntent, BulkUpdater};
use crate::date_range::Month;
use crate::day_status::{DayStatus, StatusCounts, resolve_status, resolve_window};
use crate::error::{RentCalError, RentCalResult};
use crate::loader::{LoadState, MonthData, MonthLoader};
use crate::panel::ReservationPanel;
use crate::reservation::ReservationStatus;
use crate::selection::RangeSelection;
use crate::store::AvailabilityStore;

/// What a click on a day did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClick {
    /// The day is reserved; its reservation panel is now open.
    OpenedPanel,
    /// Modifier-click: the day was blocked or unblocked right away.
    Toggled(BulkIntent),
    /// The day went into the range selection.
    Selected(RangeSelection),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn offset(&self, weekday: Weekday) -> usize {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday() as usize,
            WeekStart::Monday => weekday.num_days_from_monday() as usize,
        }
    }

    pub fn labels(&self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            WeekStart::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub selected: bool,
    pub today: bool,
}

/// A month laid out in weeks. Padding before the first and after the last
/// day is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: Month,
    pub week_start: WeekStart,
    pub weeks: Vec<[Option<GridCell>; 7]>,
}

impl MonthGrid {
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.weeks.iter().flatten().flatten()
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(self.cells().map(|cell| &cell.status))
    }
}

pub struct AvailabilityCalendar<S> {
    store: S,
    listing_id: String,
    month: Month,
    today: NaiveDate,
    loader: MonthLoader,
    selection: RangeSelection,
    updater: BulkUpdater,
    panel: Option<ReservationPanel>,
    mutation_error: Option<String>,
}

impl<S: AvailabilityStore> AvailabilityCalendar<S> {
    /// Create a calendar showing `month`. Nothing is fetched until
    /// [`refresh`](Self::refresh).
    pub fn new(store: S, listing_id: &str, month: Month) -> RentCalResult<Self> {
        if listing_id.trim().is_empty() {
            return Err(RentCalError::InvalidInput("Listing id must not be empty".into()));
        }

        Ok(AvailabilityCalendar {
            store,
            listing_id: listing_id.to_string(),
            month,
            today: chrono::Local::now().date_naive(),
            loader: MonthLoader::new(),
            selection: RangeSelection::new(),
            updater: BulkUpdater::new(),
            panel: None,
            mutation_error: None,
        })
    }

    /// Override the date highlighted as today.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn listing_id(&self) -> &str {
        &self.listing_id
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn selection(&self) -> RangeSelection {
        self.selection
    }

    pub fn panel(&self) -> Option<&ReservationPanel> {
        self.panel.as_ref()
    }

    pub fn load_state(&self) -> LoadState {
        self.loader.state()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.loader.error()
    }

    pub fn mutation_error(&self) -> Option<&str> {
        self.mutation_error.as_deref()
    }

    /// Data for the visible month, if it has loaded.
    pub fn data(&self) -> Option<&MonthData> {
        self.loader.data().filter(|data| data.month == self.month)
    }

    /// Re-fetch the visible month from the store.
    pub async fn refresh(&mut self) -> bool {
        self.loader.load(&self.store, &self.listing_id, self.month).await
    }

    pub async fn show_month(&mut self, month: Month) -> bool {
        self.month = month;
        self.refresh().await
    }

    pub async fn next_month(&mut self) -> bool {
        self.show_month(self.month.next()).await
    }

    pub async fn prev_month(&mut self) -> bool {
        self.show_month(self.month.prev()).await
    }

    /// Status of `date` under the loaded data. Days without loaded data are
    /// available.
    pub fn status_of(&self, date: NaiveDate) -> DayStatus {
        match self.data() {
            Some(data) => resolve_status(date, &data.reservations, &data.overrides),
            None => DayStatus::Available,
        }
    }

    /// Handle a click on `date`. `modifier` is the shortcut key that toggles
    /// a single day without touching the selection.
    pub async fn click_day(&mut self, date: NaiveDate, modifier: bool) -> RentCalResult<DayClick> {
        let status = self.status_of(date);

        if status == DayStatus::Reserved {
            debug!(%date, "opening reservation panel");
            self.panel = Some(ReservationPanel::open(&self.store, &self.listing_id, date).await);
            return Ok(DayClick::OpenedPanel);
        }

        if modifier {
            let intent = self.toggle_day(date).await?;
            return Ok(DayClick::Toggled(intent));
        }

        self.selection.select(date);
        Ok(DayClick::Selected(self.selection))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Block or unblock a single non-reserved day based on its current status.
    pub async fn toggle_day(&mut self, date: NaiveDate) -> RentCalResult<BulkIntent> {
        let intent = BulkIntent::toggle_for(self.status_of(date))
            .ok_or_else(|| RentCalError::InvalidInput(format!("{date} is reserved")))?;

        let result = self
            .updater
            .apply_one(&self.store, &self.listing_id, date, intent)
            .await;
        self.settle_mutation(result).await?;
        Ok(intent)
    }

    /// Apply `intent` to every day in the selection as one batch.
    ///
    /// On success the month is reloaded and the selection cleared. On failure
    /// the selection is kept so the admin can retry.
    pub async fn apply_bulk(&mut self, intent: BulkIntent) -> RentCalResult<usize> {
        let range = self.selection.range().ok_or(RentCalError::EmptySelection)?;

        let result = self
            .updater
            .apply(&self.store, &self.listing_id, range, intent)
            .await;
        let written = self.settle_mutation(result).await?;
        self.selection.clear();
        Ok(written)
    }

    /// Change a reservation's status through the open panel.
    pub async fn change_reservation_status(
        &mut self,
        reservation_id: &str,
        status: ReservationStatus,
    ) -> RentCalResult<bool> {
        let panel = self
            .panel
            .as_mut()
            .ok_or_else(|| RentCalError::InvalidInput("No reservation panel is open".into()))?;

        let changed = panel.change_status(&self.store, reservation_id, status).await;
        if changed {
            self.refresh().await;
        }
        Ok(changed)
    }

    /// Lay out the visible month.
    pub fn grid(&self, week_start: WeekStart) -> MonthGrid {
        let window = self.month.window();
        let resolved = match self.data() {
            Some(data) => resolve_window(window, &data.reservations, &data.overrides),
            None => resolve_window(window, &[], &[]),
        };

        let mut weeks = Vec::new();
        let mut week: [Option<GridCell>; 7] = [None; 7];
        let mut column = week_start.offset(self.month.first_day().weekday());

        for (date, status) in resolved {
            week[column] = Some(GridCell {
                date,
                status,
                selected: self.selection.in_selected_range(date),
                today: date == self.today,
            });
            column += 1;
            if column == 7 {
                weeks.push(week);
                week = [None; 7];
                column = 0;
            }
        }
        if column > 0 {
            weeks.push(week);
        }

        MonthGrid {
            month: self.month,
            week_start,
            weeks,
        }
    }

    async fn settle_mutation<T>(&mut self, result: RentCalResult<T>) -> RentCalResult<T> {
        match result {
            Ok(value) => {
                self.mutation_error = None;
                self.refresh().await;
                Ok(value)
            }
            Err(e) => {
                self.mutation_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
