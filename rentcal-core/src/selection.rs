//! Two-click date range selection used to scope bulk operations.

use chrono::NaiveDate;

use crate::date_range::DateRange;

/// Ephemeral selection state, never persisted.
///
/// A third click does not extend a full range; it starts a new one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RangeSelection {
    #[default]
    Empty,
    Partial {
        start: NaiveDate,
    },
    Full {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl RangeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a clicked date into the selection.
    ///
    /// Callers must not pass reserved dates; those open the reservation panel
    /// instead.
    pub fn select(&mut self, date: NaiveDate) {
        *self = match *self {
            RangeSelection::Empty | RangeSelection::Full { .. } => RangeSelection::Partial { start: date },
            RangeSelection::Partial { start } if date < start => RangeSelection::Full { start: date, end: start },
            RangeSelection::Partial { start } => RangeSelection::Full { start, end: date },
        };
    }

    pub fn clear(&mut self) {
        *self = RangeSelection::Empty;
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RangeSelection::Empty)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match *self {
            RangeSelection::Empty => None,
            RangeSelection::Partial { start } | RangeSelection::Full { start, .. } => Some(start),
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match *self {
            RangeSelection::Full { end, .. } => Some(end),
            _ => None,
        }
    }

    /// The range a bulk operation would cover. A lone start date is a
    /// one-day range.
    pub fn range(&self) -> Option<DateRange> {
        match *self {
            RangeSelection::Empty => None,
            RangeSelection::Partial { start } => Some(DateRange::single(start)),
            RangeSelection::Full { start, end } => Some(DateRange::new(start, end)),
        }
    }

    /// Highlight query for rendering.
    pub fn in_selected_range(&self, date: NaiveDate) -> bool {
        self.range().is_some_and(|range| range.contains(date))
    }
}
