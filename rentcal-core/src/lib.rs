//! Core types for the rentcal availability calendar.
//!
//! This crate provides everything the admin calendar needs for one listing:
//! - `day_status` resolves each date to reserved / blocked / available
//! - `selection` tracks the two-click range used by bulk operations
//! - `bulk` plans and submits batched availability overrides
//! - `loader` fetches a month of overrides and reservations
//! - `panel` lists and updates the reservations covering a single day
//! - `calendar` ties them together the way the admin screen uses them
//! - `client` talks to the REST backend through the `store::AvailabilityStore` trait

pub mod availability;
pub mod bulk;
pub mod calendar;
pub mod client;
pub mod config;
pub mod date_range;
pub mod day_status;
pub mod error;
pub mod loader;
pub mod panel;
pub mod reservation;
pub mod selection;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use availability::{AvailabilityOverride, BulkOverrideRequest, OverrideSet, OverrideUpdate, OverrideUpsert};
pub use bulk::{BulkIntent, BulkUpdater};
pub use calendar::{AvailabilityCalendar, DayClick, GridCell, MonthGrid, WeekStart};
pub use client::ApiClient;
pub use crate::config::RentcalConfig;
pub use date_range::{DateRange, Month};
pub use day_status::{DayStatus, StatusCounts, resolve_status};
pub use error::{RentCalError, RentCalResult};
pub use loader::{LoadState, MonthData, MonthLoader};
pub use panel::ReservationPanel;
pub use reservation::{ReservationInterval, ReservationStatus};
pub use selection::RangeSelection;
pub use store::AvailabilityStore;
