//! Cleaning overtime: end-of-day cleaning slots left by missing staff.
//!
//! For each location that needs cleaning, every staff member whose
//! primary location it is counts toward the normal headcount. Whoever is
//! physically there at the end of the day counts toward the actual one.
//! Each missing head becomes one fixed-length overtime slot, given to
//! the eligible staff member with the least cumulative overtime.

use crate::{
    error::RotaResult,
    event::GenerationEvent,
    pass::{PassContext, SchedulePass},
    rng::TieBreak,
    schedule::{Assignment, CleaningOvertimeRecord, Post, Schedule},
    selector::least_overtime,
    snapshot::{Snapshot, Staff},
    types::LocationId,
};

#[derive(Debug, Default)]
pub struct CleaningOvertimeAllocator;

impl CleaningOvertimeAllocator {
    pub fn new() -> Self {
        Self
    }
}

impl SchedulePass for CleaningOvertimeAllocator {
    fn name(&self) -> &'static str {
        "cleaning"
    }

    fn run(
        &mut self,
        ctx:        &PassContext<'_>,
        schedule:   &mut Schedule,
        _tie_break: &mut dyn TieBreak,
    ) -> RotaResult<Vec<GenerationEvent>> {
        let date = ctx.day.date;
        let minutes = ctx.config.cleaning_overtime_minutes;
        let mut events = Vec::new();

        for location in ctx.snapshot.locations.iter().filter(|l| !l.no_cleaning_needed) {
            let normal = ctx.snapshot.staff_at(location.id).count() as u32;
            let present = present_at_day_end(ctx.snapshot, schedule, location.id);
            let missing = normal.saturating_sub(present);
            if missing == 0 {
                continue;
            }
            log::debug!("date={date} location {} ends the day {present}/{normal}", location.id);

            for unfilled in (1..=missing).rev() {
                let candidates = cleaning_candidates(ctx, schedule);
                let Some(staff) = least_overtime(candidates) else {
                    log::warn!("date={date} nobody left for cleaning at location {}", location.id);
                    events.push(GenerationEvent::CleaningSlotUnfilled {
                        location_id: location.id,
                        missing:     unfilled,
                    });
                    break;
                };
                log::info!(
                    "date={date} staff {} cleans location {} ({minutes} min, {} accrued)",
                    staff.id, location.id, staff.cumulative_overtime_minutes
                );
                schedule.push_cleaning(CleaningOvertimeRecord {
                    staff_id:         staff.id,
                    location_id:      location.id,
                    location_name:    location.name.clone(),
                    overtime_minutes: minutes,
                });
                events.push(GenerationEvent::CleaningOvertimeAssigned {
                    location_id:      location.id,
                    staff_id:         staff.id,
                    overtime_minutes: minutes,
                });
            }
        }

        Ok(events)
    }
}

/// Eligible for a cleaning slot right now, in input order.
pub fn cleaning_candidates<'a>(ctx: &PassContext<'a>, schedule: &Schedule) -> Vec<&'a Staff> {
    let weekday = ctx.day.weekday;
    ctx.snapshot
        .staff
        .iter()
        .filter(|s| !s.no_overtime_allowed)
        .filter(|s| s.shift_on(weekday).is_some())
        .filter(|s| schedule.is_present(s.id))
        .filter(|s| !schedule.has_cleaning_overtime(s.id))
        .collect()
}

/// Heads physically at `location_id` when the day ends.
pub fn present_at_day_end(snapshot: &Snapshot, schedule: &Schedule, location_id: LocationId) -> u32 {
    schedule
        .assignments()
        .filter(|a| day_end_location(snapshot, schedule, a) == Some(location_id))
        .count() as u32
}

fn day_end_location(snapshot: &Snapshot, schedule: &Schedule, a: &Assignment) -> Option<LocationId> {
    match a.post {
        Post::Location(id) if a.is_base() => (!schedule.is_relocated(a.staff_id)).then_some(id),
        Post::Location(id) if a.is_partial() => a.original_location_id.or(Some(id)),
        Post::Location(id) => Some(id),
        Post::AfternoonPool => a
            .replaces_staff_id
            .and_then(|r| snapshot.staff_member(r))
            .map(|s| s.primary_location_id),
    }
}
