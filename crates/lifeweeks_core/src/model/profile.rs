//! User profile: birth date and life expectancy.
//!
//! # Responsibility
//! - Anchor the week grid to a birth date.
//! - Keep life expectancy inside the supported range.
//!
//! # Invariants
//! - `life_expectancy_years` is always within
//!   `[LIFE_EXPECTANCY_MIN, LIFE_EXPECTANCY_MAX]`.
//! - The grid always spans `life_expectancy_years * 52` weeks.

use crate::calculus::WEEKS_PER_YEAR;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lowest accepted life expectancy, in years.
pub const LIFE_EXPECTANCY_MIN: u16 = 50;
/// Highest accepted life expectancy, in years.
pub const LIFE_EXPECTANCY_MAX: u16 = 120;
/// Expectancy used when none has been chosen yet.
pub const LIFE_EXPECTANCY_DEFAULT: u16 = 80;

/// Clamps a requested life expectancy into the supported range.
pub fn clamp_life_expectancy(years: u16) -> u16 {
    years.clamp(LIFE_EXPECTANCY_MIN, LIFE_EXPECTANCY_MAX)
}

/// Grid anchor for one user: when the grid starts and how many rows it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// First day of week 0.
    pub birth_date: NaiveDate,
    /// Number of 52-week rows in the grid. Always within the clamp range.
    pub life_expectancy_years: u16,
}

impl Profile {
    /// Creates a profile, clamping the expectancy into the supported range.
    pub fn new(birth_date: NaiveDate, life_expectancy_years: u16) -> Self {
        Self {
            birth_date,
            life_expectancy_years: clamp_life_expectancy(life_expectancy_years),
        }
    }

    /// Total number of weeks covered by the grid.
    pub fn total_weeks(&self) -> u32 {
        u32::from(self.life_expectancy_years) * WEEKS_PER_YEAR
    }
}
