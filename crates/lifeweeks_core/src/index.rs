//! Derived per-week annotation index.
//!
//! # Responsibility
//! - Map every annotated week index to the ordered era/event ids active in
//!   that week.
//! - Stay a pure function of profile + eras + events so rebuilds are
//!   deterministic.
//!
//! # Invariants
//! - The index is sparse: weeks without annotations have no entry.
//! - Id lists are duplicate-free and keep collection insertion order.
//! - Annotations entirely outside `[0, total_weeks)` contribute nothing;
//!   a reversed period contributes nothing. Neither is an error.

use crate::calculus::{era_active_in_week, week_index_of, week_range};
use crate::model::{Era, EraId, EventId, LifeEvent, Profile};
use std::collections::BTreeMap;

/// Zero-based week number since birth.
pub type WeekIndex = u32;

/// Sparse mapping from week index to the annotations active in that week.
pub type AnnotationIndex = BTreeMap<WeekIndex, WeekAnnotations>;

/// Era and event ids touching one week, in collection insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekAnnotations {
    pub era_ids: Vec<EraId>,
    pub event_ids: Vec<EventId>,
}

impl WeekAnnotations {
    /// Returns whether the week carries no annotations at all.
    pub fn is_empty(&self) -> bool {
        self.era_ids.is_empty() && self.event_ids.is_empty()
    }
}

/// Builds the full annotation index from scratch.
///
/// Cost is O(E*T + V): each era scans the whole week range, each point
/// event resolves in O(1) and each period event in O(weeks spanned). At
/// grid scale (a few thousand weeks, at most a few hundred annotations)
/// the full scan stays comfortably interactive, which is why no
/// incremental maintenance exists.
pub fn build_annotation_index(
    profile: &Profile,
    eras: &[Era],
    events: &[LifeEvent],
) -> AnnotationIndex {
    let mut index = AnnotationIndex::new();
    let total_weeks = profile.total_weeks();

    for era in eras {
        for week_index in 0..total_weeks {
            let week = week_range(profile.birth_date, week_index);
            if era_active_in_week(era.start_date, era.end_date, week) {
                push_unique(&mut index.entry(week_index).or_default().era_ids, era.id);
            }
        }
    }

    for event in events {
        match event.end_date {
            None => {
                let week_index = week_index_of(profile.birth_date, event.date);
                if week_index >= 0 && (week_index as u32) < total_weeks {
                    push_unique(
                        &mut index.entry(week_index as u32).or_default().event_ids,
                        event.id,
                    );
                }
            }
            Some(end_date) => {
                if total_weeks == 0 {
                    continue;
                }
                let first = week_index_of(profile.birth_date, event.date).max(0);
                let last =
                    week_index_of(profile.birth_date, end_date).min(i64::from(total_weeks) - 1);
                // A reversed or fully out-of-range period leaves first > last
                // and the loop body never runs.
                for week_index in first..=last {
                    push_unique(
                        &mut index.entry(week_index as u32).or_default().event_ids,
                        event.id,
                    );
                }
            }
        }
    }

    index
}

// Idempotent append: repeat contributions (e.g. a period event revisiting a
// week) keep first-seen order instead of duplicating.
fn push_unique(ids: &mut Vec<uuid::Uuid>, id: uuid::Uuid) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}
