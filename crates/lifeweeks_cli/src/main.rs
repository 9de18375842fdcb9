//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lifeweeks_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use chrono::NaiveDate;
use lifeweeks_core::{FixedClock, LifeCalendar};

fn main() {
    println!("lifeweeks_core version={}", lifeweeks_core::core_version());

    // Fixed sample input keeps the probe output stable across runs.
    let birth = NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid sample date");
    let today = NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid sample date");

    let mut calendar = LifeCalendar::new(FixedClock::on_day(today));
    calendar.set_birth_date(birth);
    calendar.set_life_expectancy(80);

    println!("total_weeks={}", calendar.total_weeks());
    if let Some(week) = calendar.week_data(0) {
        println!(
            "week0 start={} end={} past={}",
            week.start_date, week.end_date, week.is_past
        );
    }
}
