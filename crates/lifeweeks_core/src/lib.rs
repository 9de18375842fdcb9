//! Core temporal model for the lifeweeks life calendar.
//!
//! Maps a birth date and a set of possibly overlapping, possibly unbounded
//! date ranges onto a dense per-week lookup structure under the Life-Year
//! grid model (52 weeks per row, anchored to the birth date). This crate is
//! the single source of truth for week boundaries, past/current/future
//! classification and era/event overlap; rendering and input handling live
//! in host applications.

pub mod calculus;
pub mod codec;
pub mod index;
pub mod logging;
pub mod model;
pub mod state;
pub mod store;

pub use calculus::{
    era_active_in_week, index_of, is_current, is_past, position_of, week_index_of, week_range,
    GridPosition, WeekBounds, DAYS_PER_WEEK, WEEKS_PER_YEAR,
};
pub use codec::{
    DecodedSnapshot, Snapshot, SnapshotData, SnapshotEra, SnapshotError, SnapshotEvent,
    SnapshotResult, Violation, SNAPSHOT_VERSION,
};
pub use index::{build_annotation_index, AnnotationIndex, WeekAnnotations, WeekIndex};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    clamp_life_expectancy, Era, EraCategory, EraId, EraPatch, EventId, EventPatch, LifeEvent,
    Profile, LIFE_EXPECTANCY_DEFAULT, LIFE_EXPECTANCY_MAX, LIFE_EXPECTANCY_MIN,
};
pub use state::{ChangeKind, Clock, FixedClock, LifeCalendar, SystemClock, WeekRecord};
pub use store::{
    erase_calendar, load_calendar, save_calendar, MemoryStore, SnapshotStore, DEFAULT_STORE_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
