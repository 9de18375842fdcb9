//! Event domain model.
//!
//! # Responsibility
//! - Define a named occurrence anchored to one date (point) or a date
//!   range (period).
//!
//! # Invariants
//! - `id` is stable and never reused for another event.
//! - A period event is a single entity spanning `[date, end_date]`, never
//!   two point events.
//! - A reversed period (`end_date < date`) is not rejected here; the index
//!   builder treats it as covering no weeks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an event.
pub type EventId = Uuid;

/// A point-in-time or period occurrence pinned to the week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeEvent {
    /// Stable global ID used for linking and index entries.
    pub id: EventId,
    /// Anchor day; for period events this is the first day.
    pub date: NaiveDate,
    /// Last day of a period event; `None` means a single-week point event.
    pub end_date: Option<NaiveDate>,
    pub title: String,
    pub description: Option<String>,
    /// Optional `#RGB` or `#RRGGBB` display color.
    pub color: Option<String>,
}

impl LifeEvent {
    /// Creates a point event with a generated stable ID.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self::with_id(Uuid::new_v4(), title, date)
    }

    /// Creates a point event with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: EventId, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            date,
            end_date: None,
            title: title.into(),
            description: None,
            color: None,
        }
    }

    /// Creates a period event spanning `[date, end_date]`.
    pub fn period(title: impl Into<String>, date: NaiveDate, end_date: NaiveDate) -> Self {
        let mut event = Self::new(title, date);
        event.end_date = Some(end_date);
        event
    }

    /// Returns whether this event spans a date range.
    pub fn is_period(&self) -> bool {
        self.end_date.is_some()
    }

    /// Applies a partial edit in place. Absent patch fields keep current
    /// values; double-`Option` fields use `Some(None)` to clear.
    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Partial edit for an event. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub date: Option<NaiveDate>,
    /// Outer `Some` replaces the end date; `Some(None)` turns a period
    /// event back into a point event.
    pub end_date: Option<Option<NaiveDate>>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub color: Option<Option<String>>,
}
