use chrono::NaiveDate;
use lifeweeks_core::{
    ChangeKind, Era, EraCategory, EraPatch, EventPatch, FixedClock, LifeCalendar, LifeEvent,
};
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn calendar_at(today: NaiveDate) -> LifeCalendar<FixedClock> {
    LifeCalendar::new(FixedClock::on_day(today))
}

#[test]
fn uninitialized_state_answers_no_week_data() {
    let calendar = calendar_at(day(2020, 1, 1));
    assert!(!calendar.is_initialized());
    assert!(calendar.week_data(0).is_none());
    assert!(calendar.profile().is_none());
    // Grid size is still defined from the default expectancy.
    assert_eq!(calendar.total_weeks(), 80 * 52);
}

#[test]
fn set_birth_date_initializes_and_set_expectancy_clamps() {
    let mut calendar = calendar_at(day(2020, 1, 1));
    calendar.set_birth_date(day(2000, 1, 1));
    assert!(calendar.is_initialized());

    calendar.set_life_expectancy(30);
    assert_eq!(calendar.life_expectancy_years(), 50);
    assert_eq!(calendar.total_weeks(), 50 * 52);

    calendar.set_life_expectancy(300);
    assert_eq!(calendar.life_expectancy_years(), 120);
    assert_eq!(calendar.total_weeks(), 120 * 52);
}

#[test]
fn week_data_reflects_mutations_immediately() {
    let mut calendar = calendar_at(day(2020, 1, 1));
    calendar.set_birth_date(day(2000, 1, 1));

    let mut era = Era::new("school", day(2000, 1, 1), "#abc", EraCategory::Education);
    era.end_date = Some(day(2000, 1, 14));
    let era_id = era.id;
    calendar.add_era(era);

    assert!(calendar.week_data(0).unwrap().active_era_ids.contains(&era_id));

    calendar.remove_era(era_id);
    assert!(calendar.week_data(0).unwrap().active_era_ids.is_empty());
}

#[test]
fn update_era_patch_moves_index_entries() {
    let mut calendar = calendar_at(day(2020, 1, 1));
    calendar.set_birth_date(day(2000, 1, 1));

    let mut era = Era::new("job", day(2000, 1, 1), "#abc", EraCategory::Work);
    era.end_date = Some(day(2000, 1, 7));
    let era_id = era.id;
    calendar.add_era(era);
    assert!(calendar.week_data(2).unwrap().active_era_ids.is_empty());

    calendar.update_era(
        era_id,
        EraPatch {
            start_date: Some(day(2000, 1, 15)),
            end_date: Some(Some(day(2000, 1, 21))),
            ..EraPatch::default()
        },
    );

    assert!(calendar.week_data(0).unwrap().active_era_ids.is_empty());
    assert!(calendar.week_data(2).unwrap().active_era_ids.contains(&era_id));
    assert_eq!(calendar.era(era_id).unwrap().start_date, day(2000, 1, 15));
}

#[test]
fn unknown_id_mutations_are_no_ops() {
    let mut calendar = calendar_at(day(2020, 1, 1));
    calendar.set_birth_date(day(2000, 1, 1));
    calendar.add_event(LifeEvent::new("kept", day(2001, 1, 1)));

    let ghost = Uuid::new_v4();
    calendar.update_era(ghost, EraPatch::default());
    calendar.remove_era(ghost);
    calendar.update_event(ghost, EventPatch::default());
    calendar.remove_event(ghost);

    assert_eq!(calendar.events().len(), 1);
    assert!(calendar.eras().is_empty());
}

#[test]
fn add_with_existing_id_replaces_in_place() {
    let mut calendar = calendar_at(day(2020, 1, 1));
    calendar.set_birth_date(day(2000, 1, 1));

    let first = Era::new("a", day(2001, 1, 1), "#111", EraCategory::Other);
    let id = first.id;
    calendar.add_era(first);
    calendar.add_era(Era::new("b", day(2002, 1, 1), "#222", EraCategory::Other));

    let mut replacement = Era::new("a2", day(2001, 6, 1), "#333", EraCategory::Work);
    replacement.id = id;
    calendar.add_era(replacement);

    assert_eq!(calendar.eras().len(), 2);
    assert_eq!(calendar.eras()[0].id, id);
    assert_eq!(calendar.eras()[0].title, "a2");
}

#[test]
fn current_week_tracks_injected_clock() {
    let mut calendar = calendar_at(day(2000, 1, 10));
    calendar.set_birth_date(day(2000, 1, 1));

    let week1 = calendar.week_data(1).unwrap();
    assert!(week1.is_current_week);
    assert!(!week1.is_past);

    let week0 = calendar.week_data(0).unwrap();
    assert!(week0.is_past);
    assert!(!week0.is_current_week);

    let week2 = calendar.week_data(2).unwrap();
    assert!(!week2.is_past);
    assert!(!week2.is_current_week);
}

#[test]
fn clear_returns_to_uninitialized() {
    let mut calendar = calendar_at(day(2020, 1, 1));
    calendar.set_birth_date(day(2000, 1, 1));
    calendar.set_life_expectancy(100);
    calendar.add_event(LifeEvent::new("gone", day(2001, 1, 1)));

    calendar.clear();

    assert!(!calendar.is_initialized());
    assert!(calendar.week_data(0).is_none());
    assert!(calendar.events().is_empty());
    assert_eq!(calendar.total_weeks(), 80 * 52);
}

#[test]
fn observers_hear_each_completed_mutation() {
    let heard: Rc<RefCell<Vec<ChangeKind>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&heard);

    let mut calendar = calendar_at(day(2020, 1, 1));
    calendar.subscribe(move |kind| sink.borrow_mut().push(kind));

    calendar.set_birth_date(day(2000, 1, 1));
    let era = Era::new("x", day(2001, 1, 1), "#123", EraCategory::Other);
    let era_id = era.id;
    calendar.add_era(era);
    calendar.remove_era(era_id);
    calendar.add_event(LifeEvent::new("y", day(2002, 1, 1)));
    calendar.clear();

    assert_eq!(
        *heard.borrow(),
        vec![
            ChangeKind::Profile,
            ChangeKind::Eras,
            ChangeKind::Eras,
            ChangeKind::Events,
            ChangeKind::Cleared,
        ]
    );
}

#[test]
fn no_op_mutations_do_not_notify() {
    let heard: Rc<RefCell<Vec<ChangeKind>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&heard);

    let mut calendar = calendar_at(day(2020, 1, 1));
    calendar.set_birth_date(day(2000, 1, 1));
    calendar.subscribe(move |kind| sink.borrow_mut().push(kind));

    calendar.remove_era(Uuid::new_v4());
    calendar.update_event(Uuid::new_v4(), EventPatch::default());

    assert!(heard.borrow().is_empty());
}
