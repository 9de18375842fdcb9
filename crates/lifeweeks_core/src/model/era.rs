//! Era domain model.
//!
//! # Responsibility
//! - Define the named, colored, categorized date range representing a life
//!   chapter.
//! - Provide patch semantics for partial edits.
//!
//! # Invariants
//! - `id` is stable and never reused for another era.
//! - An absent `end_date` means the era is ongoing and floats to "today"
//!   at query time.
//! - Eras may overlap arbitrarily; the model places no exclusivity rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an era.
pub type EraId = Uuid;

/// Fixed category set for eras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EraCategory {
    Work,
    Education,
    Location,
    Relationship,
    Health,
    Other,
}

impl EraCategory {
    /// All categories in wire order, used by the codec for diagnostics.
    pub const ALL: [EraCategory; 6] = [
        Self::Work,
        Self::Education,
        Self::Location,
        Self::Relationship,
        Self::Health,
        Self::Other,
    ];

    /// Wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Education => "education",
            Self::Location => "location",
            Self::Relationship => "relationship",
            Self::Health => "health",
            Self::Other => "other",
        }
    }

    /// Parses a wire name back into a category.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// A named, colored, categorized life chapter spanning a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Era {
    /// Stable global ID used for linking and index entries.
    pub id: EraId,
    pub title: String,
    /// First day the era covers.
    pub start_date: NaiveDate,
    /// Last day the era covers; `None` means ongoing.
    pub end_date: Option<NaiveDate>,
    /// `#RGB` or `#RRGGBB` display color.
    pub color: String,
    pub category: EraCategory,
}

impl Era {
    /// Creates an ongoing era with a generated stable ID.
    pub fn new(
        title: impl Into<String>,
        start_date: NaiveDate,
        color: impl Into<String>,
        category: EraCategory,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, start_date, color, category)
    }

    /// Creates an ongoing era with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: EraId,
        title: impl Into<String>,
        start_date: NaiveDate,
        color: impl Into<String>,
        category: EraCategory,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            start_date,
            end_date: None,
            color: color.into(),
            category,
        }
    }

    /// Returns whether the era has no end date yet.
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }

    /// Applies a partial edit in place. Absent patch fields keep current
    /// values; `end_date: Some(None)` clears the end and makes the era
    /// ongoing again.
    pub fn apply(&mut self, patch: EraPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
    }
}

/// Partial edit for an era. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EraPatch {
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    /// Outer `Some` replaces the end date; `Some(None)` clears it.
    pub end_date: Option<Option<NaiveDate>>,
    pub color: Option<String>,
    pub category: Option<EraCategory>,
}
