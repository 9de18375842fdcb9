use chrono::NaiveDate;
use lifeweeks_core::{
    erase_calendar, load_calendar, save_calendar, Era, EraCategory, FixedClock, LifeCalendar,
    LifeEvent, MemoryStore, SnapshotStore, DEFAULT_STORE_KEY,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn populated_calendar() -> LifeCalendar<FixedClock> {
    let mut calendar = LifeCalendar::new(FixedClock::on_day(day(2026, 8, 30)));
    calendar.set_birth_date(day(1995, 4, 12));
    calendar.set_life_expectancy(85);
    calendar.add_era(Era::new("Career", day(2017, 2, 1), "#445566", EraCategory::Work));
    calendar.add_event(LifeEvent::new("Moved out", day(2014, 9, 1)));
    calendar
}

#[test]
fn save_then_load_restores_data_and_rebuilds_index() {
    let source = populated_calendar();
    let mut store = MemoryStore::new();
    save_calendar(&source, &mut store, DEFAULT_STORE_KEY).unwrap();

    let mut restored = LifeCalendar::new(FixedClock::on_day(day(2026, 8, 30)));
    let loaded = load_calendar(&mut restored, &store, DEFAULT_STORE_KEY).unwrap();

    assert!(loaded);
    assert_eq!(restored.birth_date(), source.birth_date());
    assert_eq!(restored.eras(), source.eras());
    assert_eq!(restored.events(), source.events());
    assert_eq!(restored.annotation_index(), source.annotation_index());
}

#[test]
fn only_the_bare_payload_is_persisted() {
    let source = populated_calendar();
    let mut store = MemoryStore::new();
    save_calendar(&source, &mut store, DEFAULT_STORE_KEY).unwrap();

    let stored = store.get(DEFAULT_STORE_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stored).unwrap();

    // The envelope (version, exportedAt) and the derived index stay out of
    // the store; it holds profile + eras + events only.
    assert!(value.get("version").is_none());
    assert!(value.get("exportedAt").is_none());
    assert_eq!(value["birthDate"], "1995-04-12");
    assert_eq!(value["lifeExpectancy"], 85);
    assert!(value["eras"].is_array());
    assert!(value["events"].is_array());
}

#[test]
fn load_from_empty_store_is_not_an_error() {
    let store = MemoryStore::new();
    let mut calendar = LifeCalendar::new(FixedClock::on_day(day(2026, 8, 30)));

    let loaded = load_calendar(&mut calendar, &store, DEFAULT_STORE_KEY).unwrap();
    assert!(!loaded);
    assert!(!calendar.is_initialized());
}

#[test]
fn corrupt_stored_payload_leaves_calendar_unchanged() {
    let mut store = MemoryStore::new();
    store.set(DEFAULT_STORE_KEY, "{\"birthDate\": 42}".to_string());

    let mut calendar = populated_calendar();
    let eras_before = calendar.eras().to_vec();

    let result = load_calendar(&mut calendar, &store, DEFAULT_STORE_KEY);
    assert!(result.is_err());
    assert_eq!(calendar.eras(), eras_before);
    assert_eq!(calendar.birth_date(), Some(day(1995, 4, 12)));
}

#[test]
fn invalid_stored_payload_reports_violations_and_keeps_state() {
    let source = populated_calendar();
    let mut store = MemoryStore::new();
    save_calendar(&source, &mut store, DEFAULT_STORE_KEY).unwrap();

    // Corrupt one era color inside the stored JSON.
    let tampered = store
        .get(DEFAULT_STORE_KEY)
        .unwrap()
        .replace("#445566", "blueish");
    store.set(DEFAULT_STORE_KEY, tampered);

    let mut calendar = LifeCalendar::new(FixedClock::on_day(day(2026, 8, 30)));
    let err = load_calendar(&mut calendar, &store, DEFAULT_STORE_KEY).unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].path, "data.eras[0].color");
    assert!(!calendar.is_initialized());
}

#[test]
fn erase_removes_the_payload() {
    let source = populated_calendar();
    let mut store = MemoryStore::new();
    save_calendar(&source, &mut store, DEFAULT_STORE_KEY).unwrap();

    erase_calendar(&mut store, DEFAULT_STORE_KEY);
    assert!(store.get(DEFAULT_STORE_KEY).is_none());
}
