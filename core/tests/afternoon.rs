//! Afternoon extension: the school-wide headcount past the cutoff.

mod common;

use common::*;
use rota_core::{
    config::GeneratorConfig,
    engine::ScheduleGenerator,
    event::GenerationEvent,
    rng::FixedPick,
    snapshot::Snapshot,
    types::Weekday,
    GenerationOutcome,
};

fn run(snap: &Snapshot) -> GenerationOutcome {
    init_logging();
    ScheduleGenerator::build(snap, GeneratorConfig::default())
        .generate_with(monday(), &mut FixedPick(0))
        .unwrap()
}

/// Location 1 needs one head; staff 1 has substituted before, staff 2
/// (07:50-14:10) never has.
fn two_at_one() -> Snapshot {
    let mut veteran = morning_staff(1, 1);
    veteran.last_substitution_date = Some(date("2026-01-05"));
    let mut school = Snapshot::new(
        vec![location(1, 1)],
        vec![veteran, staff(2, 1, (7, 50), (14, 10))],
    );
    school.locations[0].no_cleaning_needed = true;
    school
}

#[test]
fn shift_is_moved_to_end_at_the_cutoff() {
    let snap = two_at_one().with_afternoon_requirement(Weekday::Monday, afternoon((18, 0), 1));
    let outcome = run(&snap);

    assert_eq!(outcome.schedule.afternoon_pool.len(), 1);
    let pool = &outcome.schedule.afternoon_pool[0];
    assert_eq!(pool.staff_id, 2);
    assert_eq!((pool.start, pool.end), (t(11, 40), t(18, 0)));
    assert!(pool.is_substitute && pool.is_afternoon_substitute);
    assert_eq!(pool.original_location_id, Some(1));
    assert!(outcome.events.contains(&GenerationEvent::AfternoonSubstituteAssigned {
        staff_id: 2,
        start: t(11, 40),
        end: t(18, 0),
        replaces_staff_id: None,
    }));
    // Staff 1 still holds location 1.
    assert!(outcome.is_fully_staffed());
}

#[test]
fn inactive_requirement_does_nothing() {
    let mut req = afternoon((18, 0), 1);
    req.active = false;
    let snap = two_at_one().with_afternoon_requirement(Weekday::Monday, req);
    assert!(run(&snap).schedule.afternoon_pool.is_empty());
}

#[test]
fn shortfall_is_reported_when_surplus_runs_out() {
    let snap = two_at_one().with_afternoon_requirement(Weekday::Monday, afternoon((18, 0), 3));
    let outcome = run(&snap);

    assert_eq!(outcome.schedule.afternoon_pool.len(), 1);
    assert!(outcome.events.contains(&GenerationEvent::AfternoonShortfall {
        cutoff: t(18, 0),
        covered: 1,
        required: 3,
    }));
}

#[test]
fn rotation_holder_already_covers_the_afternoon() {
    let snap = Snapshot::new(
        vec![location(1, 0)],
        vec![morning_staff(1, 1), morning_staff(2, 1)],
    )
    .with_rotations(vec![january_monday_rotation(1, (10, 48))])
    .with_afternoon_requirement(Weekday::Monday, afternoon((18, 0), 1));

    let outcome = run(&snap);
    assert!(outcome.schedule.afternoon_pool.is_empty());
}

#[test]
fn absent_afternoon_worker_is_credited() {
    let mut snap = two_at_one()
        .with_afternoon_requirement(Weekday::Monday, afternoon((18, 0), 1))
        .with_absences(vec![absent_all_day(3, MONDAY)]);
    snap.locations.push(location(2, 0));
    snap.staff.push(staff(3, 2, (11, 0), (18, 0)));

    let outcome = run(&snap);
    assert_eq!(outcome.schedule.afternoon_pool[0].replaces_staff_id, Some(3));
}

#[test]
fn afternoon_shifts_keep_their_length() {
    let shifts = [((7, 30), (13, 30)), ((7, 45), (14, 57)), ((8, 0), (12, 0)), ((7, 54), (14, 10))];
    let crew = shifts
        .iter()
        .enumerate()
        .map(|(i, (start, end))| staff(i as u32 + 1, 1, *start, *end))
        .collect();
    let snap = Snapshot::new(vec![location(1, 0)], crew)
        .with_afternoon_requirement(Weekday::Monday, afternoon((17, 30), 4));

    let outcome = run(&snap);
    assert_eq!(outcome.schedule.afternoon_pool.len(), 4);
    for pool in &outcome.schedule.afternoon_pool {
        let normal = snap.staff_member(pool.staff_id).unwrap().shift_on(Weekday::Monday).unwrap();
        assert_eq!(pool.end, t(17, 30));
        assert_eq!(
            pool.start.minutes_until(pool.end),
            normal.start.minutes_until(normal.end),
            "staff {}",
            pool.staff_id
        );
    }
}

#[test]
fn staff_already_working_past_the_cutoff_are_not_drawn() {
    // Staff 1 already counts toward the afternoon; only staff 2 can add a head.
    let mut dated = morning_staff(2, 1);
    dated.last_substitution_date = Some(date("2026-01-05"));
    let snap = Snapshot::new(
        vec![location(1, 1)],
        vec![staff(1, 1, (7, 50), (18, 0)), dated],
    )
    .with_afternoon_requirement(Weekday::Monday, afternoon((18, 0), 2));

    let outcome = run(&snap);
    assert_eq!(outcome.schedule.afternoon_pool.len(), 1);
    let pool = &outcome.schedule.afternoon_pool[0];
    assert_eq!(pool.staff_id, 2);
    assert_eq!((pool.start, pool.end), (t(11, 50), t(18, 0)));
    assert!(!outcome.schedule.is_relocated(1));
    assert!(!outcome
        .events
        .iter()
        .any(|e| matches!(e, GenerationEvent::AfternoonShortfall { .. })));
}

/// Staff 4 (never substituted) stands at location 3 on Mondays; location 2
/// has staff 2 and 3 against a minimum of one.
fn fixed_cover_at_three() -> Snapshot {
    let mut recent = morning_staff(2, 2);
    recent.last_substitution_date = Some(date("2026-01-05"));
    let mut older = morning_staff(3, 2);
    older.last_substitution_date = Some(date("2025-12-01"));
    let mut school = Snapshot::new(
        vec![location(2, 1), location(3, 1)],
        vec![recent, older, morning_staff(4, 2)],
    )
    .with_fixed_coverages(vec![monday_cover(4, 3)])
    .with_afternoon_requirement(Weekday::Monday, afternoon((18, 0), 1));
    for loc in &mut school.locations {
        loc.no_cleaning_needed = true;
    }
    school
}

#[test]
fn post_left_for_the_afternoon_is_refilled() {
    let outcome = run(&fixed_cover_at_three());

    let pool = &outcome.schedule.afternoon_pool;
    assert_eq!(pool.len(), 1);
    assert_eq!(pool[0].staff_id, 4);
    assert_eq!((pool[0].start, pool[0].end), (t(11, 50), t(18, 0)));
    assert_eq!(pool[0].original_location_id, Some(3));

    assert!(outcome.events.contains(&GenerationEvent::SubstituteAssigned {
        location_id:          3,
        staff_id:             2,
        original_location_id: 2,
        replaces_staff_id:    Some(4),
        partial_end:          None,
        cascade:              true,
    }));
    assert!(outcome.is_fully_staffed());
}

#[test]
fn post_left_for_the_afternoon_stays_short_without_surplus() {
    let mut snap = fixed_cover_at_three();
    for id in [2, 3] {
        snap.staff.iter_mut().find(|s| s.id == id).unwrap().fixed_to_location = true;
    }

    let outcome = run(&snap);
    assert_eq!(outcome.schedule.afternoon_pool[0].staff_id, 4);
    assert!(outcome
        .events
        .contains(&GenerationEvent::DeficitUnresolved { location_id: 3, missing: 1 }));
    assert_eq!(outcome.unresolved_deficits(), vec![(3, 1)]);
}
