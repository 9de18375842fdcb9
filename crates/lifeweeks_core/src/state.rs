//! Life calendar state: single authority over profile, eras and events.
//!
//! # Responsibility
//! - Own the user's profile and the era/event collections.
//! - Rebuild the derived annotation index synchronously after every
//!   mutating command, so queries never see stale data.
//! - Notify registered observers after each completed mutation.
//!
//! # Invariants
//! - The annotation index is always a pure function of the current
//!   profile + era collection + event collection.
//! - Collections keep insertion order and hold at most one entity per id.
//! - The state is Uninitialized until a birth date arrives (via
//!   `set_birth_date` or a successful import); until then `week_data`
//!   always returns `None`.

use crate::calculus::{is_current, is_past, position_of, week_range, WEEKS_PER_YEAR};
use crate::codec::{self, DecodedSnapshot, Snapshot, SnapshotError, SnapshotResult};
use crate::index::{build_annotation_index, AnnotationIndex, WeekIndex};
use crate::model::{
    clamp_life_expectancy, Era, EraId, EraPatch, EventId, EventPatch, LifeEvent, Profile,
    LIFE_EXPECTANCY_DEFAULT,
};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use log::{debug, info};

/// Time source for past/current classification and export timestamps.
///
/// Injectable so tests can pin "today" to a fixed day.
pub trait Clock {
    /// Wall-clock instant, used for export timestamps.
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day used for past/current classification. Already zeroed
    /// to day granularity; no time-of-day survives past this call.
    fn today(&self) -> NaiveDate;
}

/// Production clock: local calendar day, UTC export timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Deterministic clock pinned to one calendar day, for tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    /// Creates a clock that always reports the given day.
    pub fn on_day(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.today.and_time(NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Everything a renderer needs to draw one week cell. Synthesized on
/// demand from the profile and the annotation index, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRecord {
    pub index: WeekIndex,
    /// Zero-based life year (grid row).
    pub year: u32,
    /// Zero-based week within the row, `0..52`.
    pub week_of_year: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_past: bool,
    /// May be true for two adjacent weeks on their shared boundary day.
    pub is_current_week: bool,
    /// Active era ids in era-list insertion order.
    pub active_era_ids: Vec<EraId>,
    pub event_ids: Vec<EventId>,
}

/// What a completed mutation changed, delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Profile,
    Eras,
    Events,
    /// A full snapshot import or store load replaced everything.
    Snapshot,
    Cleared,
}

type Observer = Box<dyn FnMut(ChangeKind)>;

/// Single owner of the user's life calendar data and its derived index.
///
/// Every command is synchronous: the index rebuild completes before the
/// command returns, so there is no stale-read window for callers.
pub struct LifeCalendar<C: Clock> {
    birth_date: Option<NaiveDate>,
    life_expectancy_years: u16,
    eras: Vec<Era>,
    events: Vec<LifeEvent>,
    index: AnnotationIndex,
    observers: Vec<Observer>,
    clock: C,
}

impl Default for LifeCalendar<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> LifeCalendar<C> {
    /// Creates an empty (Uninitialized) calendar using the given clock.
    pub fn new(clock: C) -> Self {
        Self {
            birth_date: None,
            life_expectancy_years: LIFE_EXPECTANCY_DEFAULT,
            eras: Vec::new(),
            events: Vec::new(),
            index: AnnotationIndex::new(),
            observers: Vec::new(),
            clock,
        }
    }

    /// Registers an observer called after every completed mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(ChangeKind) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Returns whether a birth date has been set.
    pub fn is_initialized(&self) -> bool {
        self.birth_date.is_some()
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn life_expectancy_years(&self) -> u16 {
        self.life_expectancy_years
    }

    /// Current profile, `None` while Uninitialized.
    pub fn profile(&self) -> Option<Profile> {
        self.birth_date
            .map(|birth_date| Profile::new(birth_date, self.life_expectancy_years))
    }

    /// Eras in insertion order.
    pub fn eras(&self) -> &[Era] {
        &self.eras
    }

    /// Events in insertion order.
    pub fn events(&self) -> &[LifeEvent] {
        &self.events
    }

    pub fn era(&self, id: EraId) -> Option<&Era> {
        self.eras.iter().find(|era| era.id == id)
    }

    pub fn event(&self, id: EventId) -> Option<&LifeEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Read-only view of the derived annotation index.
    pub fn annotation_index(&self) -> &AnnotationIndex {
        &self.index
    }

    /// Grid size: `life_expectancy_years * 52`, defined even while
    /// Uninitialized.
    pub fn total_weeks(&self) -> u32 {
        u32::from(self.life_expectancy_years) * WEEKS_PER_YEAR
    }

    /// Sets (or moves) the grid anchor and rebuilds the index.
    pub fn set_birth_date(&mut self, birth_date: NaiveDate) {
        self.birth_date = Some(birth_date);
        info!("event=birth_date_set module=state birth_date={birth_date}");
        self.rebuild_index();
        self.notify(ChangeKind::Profile);
    }

    /// Sets the life expectancy, clamped into the supported range, and
    /// rebuilds the index. Usable before a birth date exists; the value
    /// takes effect for `total_weeks` immediately.
    pub fn set_life_expectancy(&mut self, years: u16) {
        self.life_expectancy_years = clamp_life_expectancy(years);
        self.rebuild_index();
        self.notify(ChangeKind::Profile);
    }

    /// Adds an era. An era with the same id replaces the existing one in
    /// place, keeping its position in insertion order.
    pub fn add_era(&mut self, era: Era) {
        match self.eras.iter_mut().find(|existing| existing.id == era.id) {
            Some(existing) => *existing = era,
            None => self.eras.push(era),
        }
        self.rebuild_index();
        self.notify(ChangeKind::Eras);
    }

    /// Applies a partial edit to the era with the given id. Unknown ids
    /// are a silent no-op.
    pub fn update_era(&mut self, id: EraId, patch: EraPatch) {
        match self.eras.iter_mut().find(|era| era.id == id) {
            Some(era) => {
                era.apply(patch);
                self.rebuild_index();
                self.notify(ChangeKind::Eras);
            }
            None => debug!("event=era_update_miss module=state id={id}"),
        }
    }

    /// Removes the era with the given id. Unknown ids are a silent no-op.
    pub fn remove_era(&mut self, id: EraId) {
        let before = self.eras.len();
        self.eras.retain(|era| era.id != id);
        if self.eras.len() == before {
            debug!("event=era_remove_miss module=state id={id}");
            return;
        }
        self.rebuild_index();
        self.notify(ChangeKind::Eras);
    }

    /// Adds an event. An event with the same id replaces the existing one
    /// in place, keeping its position in insertion order.
    pub fn add_event(&mut self, event: LifeEvent) {
        match self
            .events
            .iter_mut()
            .find(|existing| existing.id == event.id)
        {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
        self.rebuild_index();
        self.notify(ChangeKind::Events);
    }

    /// Applies a partial edit to the event with the given id. Unknown ids
    /// are a silent no-op.
    pub fn update_event(&mut self, id: EventId, patch: EventPatch) {
        match self.events.iter_mut().find(|event| event.id == id) {
            Some(event) => {
                event.apply(patch);
                self.rebuild_index();
                self.notify(ChangeKind::Events);
            }
            None => debug!("event=event_update_miss module=state id={id}"),
        }
    }

    /// Removes the event with the given id. Unknown ids are a silent
    /// no-op.
    pub fn remove_event(&mut self, id: EventId) {
        let before = self.events.len();
        self.events.retain(|event| event.id != id);
        if self.events.len() == before {
            debug!("event=event_remove_miss module=state id={id}");
            return;
        }
        self.rebuild_index();
        self.notify(ChangeKind::Events);
    }

    /// Synthesizes the record for one week.
    ///
    /// Returns `None` while Uninitialized or when `week_index` falls
    /// outside `[0, total_weeks)`; callers treat absence as "no data",
    /// never as a fault.
    pub fn week_data(&self, week_index: WeekIndex) -> Option<WeekRecord> {
        let profile = self.profile()?;
        if week_index >= profile.total_weeks() {
            return None;
        }

        let week = week_range(profile.birth_date, week_index);
        let position = position_of(week_index);
        let today = self.clock.today();
        let annotations = self.index.get(&week_index);

        Some(WeekRecord {
            index: week_index,
            year: position.year,
            week_of_year: position.week_of_year,
            start_date: week.start,
            end_date: week.end,
            is_past: is_past(week.end, today),
            is_current_week: is_current(week, today),
            active_era_ids: annotations
                .map(|entry| entry.era_ids.clone())
                .unwrap_or_default(),
            event_ids: annotations
                .map(|entry| entry.event_ids.clone())
                .unwrap_or_default(),
        })
    }

    /// Exports the full versioned snapshot document.
    ///
    /// # Errors
    /// - `Uninitialized` when no birth date has been set yet.
    pub fn export_snapshot(&self) -> SnapshotResult<Snapshot> {
        let profile = self.profile().ok_or(SnapshotError::Uninitialized)?;
        Ok(codec::encode_snapshot(
            &profile,
            &self.eras,
            &self.events,
            self.clock.now(),
        ))
    }

    /// Exports the snapshot document as JSON text.
    pub fn export_snapshot_json(&self) -> SnapshotResult<String> {
        codec::snapshot_to_json(&self.export_snapshot()?)
    }

    /// Validates a snapshot document and, only on full success, atomically
    /// replaces profile, eras and events and rebuilds the index.
    ///
    /// # Errors
    /// - Any validation failure leaves the current state completely
    ///   unchanged and reports every violation found.
    pub fn import_snapshot(&mut self, snapshot: &Snapshot) -> SnapshotResult<()> {
        let decoded = codec::decode_snapshot(snapshot)?;
        self.restore(decoded);
        Ok(())
    }

    /// Parses and imports a snapshot from JSON text.
    pub fn import_snapshot_json(&mut self, json: &str) -> SnapshotResult<()> {
        let snapshot = codec::snapshot_from_json(json)?;
        self.import_snapshot(&snapshot)
    }

    /// Resets to the empty Uninitialized state.
    pub fn clear(&mut self) {
        self.birth_date = None;
        self.life_expectancy_years = LIFE_EXPECTANCY_DEFAULT;
        self.eras.clear();
        self.events.clear();
        self.index.clear();
        info!("event=calendar_cleared module=state");
        self.notify(ChangeKind::Cleared);
    }

    /// Replaces all owned data with decoded snapshot contents. Used by
    /// the import and store-load paths after validation succeeded.
    pub(crate) fn restore(&mut self, decoded: DecodedSnapshot) {
        self.birth_date = Some(decoded.profile.birth_date);
        self.life_expectancy_years = decoded.profile.life_expectancy_years;
        self.eras = decoded.eras;
        self.events = decoded.events;
        self.rebuild_index();
        info!(
            "event=snapshot_restored module=state eras={} events={}",
            self.eras.len(),
            self.events.len()
        );
        self.notify(ChangeKind::Snapshot);
    }

    fn rebuild_index(&mut self) {
        match self.profile() {
            Some(profile) => {
                self.index = build_annotation_index(&profile, &self.eras, &self.events);
                debug!(
                    "event=index_rebuilt module=state annotated_weeks={}",
                    self.index.len()
                );
            }
            None => self.index.clear(),
        }
    }

    fn notify(&mut self, kind: ChangeKind) {
        for observer in &mut self.observers {
            observer(kind);
        }
    }
}
