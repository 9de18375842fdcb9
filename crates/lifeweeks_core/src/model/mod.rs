//! Domain model for the life calendar.
//!
//! # Responsibility
//! - Define the canonical entities owned by the calendar state: profile,
//!   eras and events.
//! - Keep one typed shape per entity; serialized forms live in `codec`.
//!
//! # Invariants
//! - Every era and event is identified by a stable UUID.
//! - Dates are calendar days (`chrono::NaiveDate`); no time-of-day or
//!   timezone information enters the model.

pub mod era;
pub mod event;
pub mod profile;

pub use era::{Era, EraCategory, EraId, EraPatch};
pub use event::{EventId, EventPatch, LifeEvent};
pub use profile::{
    clamp_life_expectancy, Profile, LIFE_EXPECTANCY_DEFAULT, LIFE_EXPECTANCY_MAX,
    LIFE_EXPECTANCY_MIN,
};
