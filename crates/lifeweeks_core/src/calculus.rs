//! Pure week arithmetic under the Life-Year grid model.
//!
//! # Responsibility
//! - Convert between calendar dates and week indices.
//! - Classify weeks as past/current and test era/week overlap.
//!
//! # Invariants
//! - Week 0 begins on the birth date; week `w` begins `7w` days later.
//! - Every grid row holds exactly 52 weeks regardless of solar-year
//!   length. Row boundaries drift off the actual birthday after roughly a
//!   year; that drift is the accepted price for a rectangular grid (ISO
//!   calendar weeks would insert 53-week rows every 5-6 years).
//! - All arithmetic is calendar-day granularity over `NaiveDate`; no
//!   wall-clock or timezone math, so DST transitions cannot shift a week.

use chrono::{Days, NaiveDate};

/// Columns per grid row under the Life-Year model.
pub const WEEKS_PER_YEAR: u32 = 52;

/// Days per grid week.
pub const DAYS_PER_WEEK: u64 = 7;

/// Half-open-by-construction bounds of one grid week: `end = start + 7d`.
///
/// Past/current classification treats both endpoints as inclusive, which
/// tolerates a one-day overlap where the day a week ends is also the day
/// the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Row/column coordinate of a week inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Zero-based life year (grid row).
    pub year: u32,
    /// Zero-based week within the row, `0..52`.
    pub week_of_year: u32,
}

/// Returns the calendar bounds of a week: `start = birth + 7w` days,
/// `end = start + 7` days. Defined for every `week_index >= 0`; range
/// clamping is the caller's concern.
pub fn week_range(birth_date: NaiveDate, week_index: u32) -> WeekBounds {
    let start = add_days(birth_date, DAYS_PER_WEEK * u64::from(week_index));
    WeekBounds {
        start,
        end: add_days(start, DAYS_PER_WEEK),
    }
}

/// Returns the number of complete 7-day periods between the birth date and
/// `date`. Negative when `date` precedes the birth date (floor division),
/// so callers can clamp or reject as appropriate.
pub fn week_index_of(birth_date: NaiveDate, date: NaiveDate) -> i64 {
    (date - birth_date).num_days().div_euclid(7)
}

/// Maps a week index to its grid row and column.
pub fn position_of(week_index: u32) -> GridPosition {
    GridPosition {
        year: week_index / WEEKS_PER_YEAR,
        week_of_year: week_index % WEEKS_PER_YEAR,
    }
}

/// Inverse of [`position_of`].
pub fn index_of(year: u32, week_of_year: u32) -> u32 {
    year * WEEKS_PER_YEAR + week_of_year
}

/// Returns whether the week ended strictly before `today`.
pub fn is_past(week_end: NaiveDate, today: NaiveDate) -> bool {
    week_end < today
}

/// Returns whether `today` falls inside `[start, end]`, both endpoints
/// inclusive. On the shared boundary day two adjacent weeks both report
/// current; that ambiguity is tolerated by design.
pub fn is_current(week: WeekBounds, today: NaiveDate) -> bool {
    week.start <= today && today <= week.end
}

/// Tests the closed era interval against the closed week interval for
/// non-disjointness. An absent `era_end` means the era is ongoing and can
/// only be excluded by starting after the week.
pub fn era_active_in_week(
    era_start: NaiveDate,
    era_end: Option<NaiveDate>,
    week: WeekBounds,
) -> bool {
    if era_start > week.end {
        return false;
    }
    match era_end {
        Some(end) => end >= week.start,
        None => true,
    }
}

// NaiveDate covers roughly +/-262000 years; a saturating add keeps the
// functions total for any u32 week index without an error path.
fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}
