//! Cleaning overtime: one slot per missing head at day's end.

mod common;

use common::*;
use rota_core::{
    cleaning::present_at_day_end,
    config::GeneratorConfig,
    engine::ScheduleGenerator,
    event::GenerationEvent,
    rng::{FixedPick, PassRng},
    snapshot::Snapshot,
    GenerationOutcome,
};

fn run(snap: &Snapshot) -> GenerationOutcome {
    init_logging();
    ScheduleGenerator::build(snap, GeneratorConfig::default())
        .generate_with(monday(), &mut FixedPick(0))
        .unwrap()
}

/// Location 1: staff 1 and 2, staff 2 absent. Location 2: staff 3 and 4,
/// exactly at minimum, so nobody is moved.
fn one_missing() -> Snapshot {
    let mut crew = vec![morning_staff(1, 1), morning_staff(2, 1), morning_staff(3, 2), morning_staff(4, 2)];
    crew[0].cumulative_overtime_minutes = 40;
    crew[2].cumulative_overtime_minutes = 10;
    crew[3].cumulative_overtime_minutes = 10;
    Snapshot::new(vec![location(1, 1), location(2, 2)], crew)
        .with_absences(vec![absent_all_day(2, MONDAY)])
}

#[test]
fn missing_head_becomes_one_twenty_minute_slot() {
    let outcome = run(&one_missing());

    assert_eq!(outcome.schedule.substitutes().count(), 0);
    assert_eq!(outcome.schedule.cleaning_overtime.len(), 1);
    let record = &outcome.schedule.cleaning_overtime[0];
    assert_eq!(record.location_id, 1);
    assert_eq!(record.location_name, "Location 1");
    assert_eq!(record.overtime_minutes, 20);
    // Staff 3 and 4 tie on the least overtime; input order decides.
    assert_eq!(record.staff_id, 3);
}

#[test]
fn no_overtime_staff_are_skipped() {
    let mut snap = one_missing();
    for s in snap.staff.iter_mut().filter(|s| s.id == 3 || s.id == 4) {
        s.no_overtime_allowed = true;
    }
    let outcome = run(&snap);
    assert_eq!(outcome.schedule.cleaning_overtime[0].staff_id, 1);
}

#[test]
fn flagged_locations_need_no_cleaning() {
    let mut snap = one_missing();
    snap.locations[0].no_cleaning_needed = true;
    assert!(run(&snap).schedule.cleaning_overtime.is_empty());
}

#[test]
fn configured_slot_length_is_used() {
    let snap = one_missing();
    let config = GeneratorConfig { cleaning_overtime_minutes: 30, ..GeneratorConfig::default() };
    let outcome = ScheduleGenerator::build(&snap, config)
        .generate_with(monday(), &mut FixedPick(0))
        .unwrap();
    assert_eq!(outcome.schedule.cleaning_overtime[0].overtime_minutes, 30);
}

#[test]
fn unfilled_slots_are_reported() {
    let mut snap = one_missing();
    for s in &mut snap.staff {
        s.no_overtime_allowed = true;
    }
    let outcome = run(&snap);
    assert!(outcome.schedule.cleaning_overtime.is_empty());
    assert!(outcome
        .events
        .contains(&GenerationEvent::CleaningSlotUnfilled { location_id: 1, missing: 1 }));
}

#[test]
fn substitute_counts_where_the_day_ends() {
    // Staff 2 covers location 1 for the whole shift: location 1 ends the
    // day complete, location 2 is one short.
    let snap = Snapshot::new(
        vec![location(1, 1), location(2, 1)],
        vec![morning_staff(1, 1), morning_staff(2, 2), morning_staff(3, 2)],
    )
    .with_absences(vec![absent_all_day(1, MONDAY)]);

    let outcome = run(&snap);
    assert_eq!(present_at_day_end(&snap, &outcome.schedule, 1), 1);
    assert_eq!(present_at_day_end(&snap, &outcome.schedule, 2), 1);
    let slots: Vec<_> = outcome.schedule.cleaning_overtime.iter().map(|c| c.location_id).collect();
    assert_eq!(slots, vec![2]);
}

#[test]
fn partial_substitute_cleans_at_home() {
    let snap = Snapshot::new(
        vec![location(1, 1), location(2, 1)],
        vec![morning_staff(1, 1), morning_staff(2, 2), morning_staff(3, 2)],
    )
    .with_rotations(vec![january_monday_rotation(1, (10, 48))]);

    let outcome = run(&snap);
    assert!(outcome.schedule.at(1).iter().any(|a| a.is_partial()));
    assert_eq!(present_at_day_end(&snap, &outcome.schedule, 1), 1);
    assert_eq!(present_at_day_end(&snap, &outcome.schedule, 2), 2);
    assert!(outcome.schedule.cleaning_overtime.is_empty());
}

#[test]
fn each_slot_goes_to_a_least_overtime_candidate() {
    for seed in 0..100 {
        let mut rng = PassRng::new(seed, 7);
        let mut crew = Vec::new();
        let mut absences = Vec::new();
        for id in 1..=12 {
            let mut member = morning_staff(id, 1 + id % 3);
            member.cumulative_overtime_minutes = 20 * rng.next_u64_below(6) as u32;
            member.no_overtime_allowed = rng.next_u64_below(5) == 0;
            if rng.next_u64_below(3) == 0 {
                absences.push(absent_all_day(id, MONDAY));
            }
            crew.push(member);
        }
        let snap = Snapshot::new(vec![location(1, 0), location(2, 0), location(3, 0)], crew)
            .with_absences(absences);
        let outcome = run(&snap);

        let mut taken = Vec::new();
        for record in &outcome.schedule.cleaning_overtime {
            let chosen = snap.staff_member(record.staff_id).unwrap();
            let least = snap
                .staff
                .iter()
                .filter(|s| !s.no_overtime_allowed)
                .filter(|s| outcome.schedule.is_present(s.id))
                .filter(|s| !taken.contains(&s.id))
                .map(|s| s.cumulative_overtime_minutes)
                .min()
                .unwrap();
            assert_eq!(chosen.cumulative_overtime_minutes, least, "seed {seed}");
            taken.push(record.staff_id);
        }
    }
}
