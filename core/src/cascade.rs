//! Cascading resolver: closes location deficits with surplus staff.
//!
//! For each location in deficit (id order) one substitute is requested
//! per missing head. Moving a substitute can leave the post they vacated
//! short; every such vacancy goes on a worklist that is drained to a
//! fixed point before the next missing head is handled. Each successful
//! step removes one staff member from the eligible pool, so the worklist
//! always empties.

use crate::{
    clock::ClockTime,
    error::RotaResult,
    event::GenerationEvent,
    pass::{PassContext, SchedulePass},
    rng::TieBreak,
    schedule::{Assignment, Post, Schedule},
    selector::{SelectionPurpose, SubstituteSelector},
    snapshot::Staff,
    types::{LocationId, StaffId},
};
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct CascadingResolver;

impl CascadingResolver {
    pub fn new() -> Self {
        Self
    }
}

impl SchedulePass for CascadingResolver {
    fn name(&self) -> &'static str {
        "cascade"
    }

    fn run(
        &mut self,
        ctx:       &PassContext<'_>,
        schedule:  &mut Schedule,
        tie_break: &mut dyn TieBreak,
    ) -> RotaResult<Vec<GenerationEvent>> {
        let date = ctx.day.date;
        let mut events = Vec::new();
        let selector = SubstituteSelector::new(ctx);

        let initial: Vec<LocationId> = ctx.coverage(schedule).deficits().map(|(id, _)| id).collect();

        for location_id in initial {
            // Re-read: vacancies settled earlier in the run may have moved it.
            let mut outstanding = ctx.coverage(schedule).deficit_at(location_id);
            if outstanding == 0 {
                continue;
            }
            log::debug!("date={date} location {location_id} short by {outstanding}");
            events.push(GenerationEvent::DeficitDetected { location_id, missing: outstanding });

            while outstanding > 0 {
                let Some(sub) = selector.select(
                    schedule,
                    SelectionPurpose::CoverDeficit,
                    Some(location_id),
                    tie_break,
                ) else {
                    log::warn!("date={date} no substitute for location {location_id}, {outstanding} left uncovered");
                    events.push(GenerationEvent::DeficitUnresolved { location_id, missing: outstanding });
                    break;
                };

                let assignment = cover_location(ctx, schedule, location_id, sub)?;
                let vacated = vacated_post(schedule, sub);
                log::info!(
                    "date={date} staff {} covers location {location_id} (from {vacated}{})",
                    sub.id,
                    assignment.partial_end.map(|t| format!(", back at {t}")).unwrap_or_default()
                );
                events.push(GenerationEvent::SubstituteAssigned {
                    location_id,
                    staff_id:             sub.id,
                    original_location_id: vacated,
                    replaces_staff_id:    assignment.replaces_staff_id,
                    partial_end:          assignment.partial_end,
                    cascade:              false,
                });
                schedule.push(assignment);
                outstanding -= 1;

                settle_vacancy(ctx, schedule, vacated, sub.id, tie_break, &mut events)?;
            }
        }

        Ok(events)
    }
}

/// The post a staff member leaves when moved: where their base entry is.
pub(crate) fn vacated_post(schedule: &Schedule, staff: &Staff) -> LocationId {
    match schedule.base_entry(staff.id).map(|a| a.post) {
        Some(Post::Location(id)) => id,
        _ => staff.primary_location_id,
    }
}

/// Re-check every post vacated by a move until no new deficit appears or
/// nobody is left to fill it. Each vacancy gets at most one attempt; the
/// filler's own vacated post is queued in turn.
pub(crate) fn settle_vacancy(
    ctx:        &PassContext<'_>,
    schedule:   &mut Schedule,
    vacated:    LocationId,
    moved:      StaffId,
    tie_break:  &mut dyn TieBreak,
    events:     &mut Vec<GenerationEvent>,
) -> RotaResult<()> {
    let date = ctx.day.date;
    let selector = SubstituteSelector::new(ctx);
    let mut worklist: VecDeque<(LocationId, StaffId)> = VecDeque::from([(vacated, moved)]);

    while let Some((location_id, vacated_by)) = worklist.pop_front() {
        let missing = ctx.coverage(schedule).deficit_at(location_id);
        if missing == 0 {
            continue;
        }
        log::info!("date={date} location {location_id} left short by staff {vacated_by} moving");

        let Some(sub) = selector.select(
            schedule,
            SelectionPurpose::CoverDeficit,
            Some(location_id),
            tie_break,
        ) else {
            log::warn!("date={date} no cascading substitute for location {location_id}");
            events.push(GenerationEvent::DeficitUnresolved { location_id, missing });
            continue;
        };

        let shift = sub.required_shift(ctx.day.weekday)?;
        let home = vacated_post(schedule, sub);
        schedule.push(Assignment::substitute(location_id, sub.id, shift, home, Some(vacated_by)));
        log::info!("date={date} staff {} covers location {location_id} in cascade (from {home})", sub.id);
        events.push(GenerationEvent::SubstituteAssigned {
            location_id,
            staff_id:             sub.id,
            original_location_id: home,
            replaces_staff_id:    Some(vacated_by),
            partial_end:          None,
            cascade:              true,
        });
        worklist.push_back((home, sub.id));
    }
    Ok(())
}

/// Build the assignment for `sub` covering a first-order deficit.
fn cover_location(
    ctx:         &PassContext<'_>,
    schedule:    &Schedule,
    location_id: LocationId,
    sub:         &Staff,
) -> RotaResult<Assignment> {
    let shift = sub.required_shift(ctx.day.weekday)?;
    let home = vacated_post(schedule, sub);

    if let Some((holder, enters_at)) = rotation_gap_at(ctx, schedule, location_id) {
        return Ok(Assignment::partial_substitute(location_id, sub.id, shift, enters_at, home, holder));
    }
    let replaces = absent_at(ctx, schedule, location_id);
    Ok(Assignment::substitute(location_id, sub.id, shift, home, replaces))
}

/// Someone at this post arriving late on a rotation, not yet covered.
fn rotation_gap_at(
    ctx:         &PassContext<'_>,
    schedule:    &Schedule,
    location_id: LocationId,
) -> Option<(StaffId, ClockTime)> {
    ctx.snapshot.staff_at(location_id).find_map(|staff| {
        let rotation = ctx.snapshot.rotation_for(staff.id, &ctx.day)?;
        let here = schedule
            .base_entry(staff.id)
            .is_some_and(|a| a.post == Post::Location(location_id));
        (here && !schedule.is_credited_as_replaced(staff.id))
            .then_some((staff.id, rotation.alternate_entry_time))
    })
}

/// First staff member of this post absent all day and not yet replaced.
fn absent_at(ctx: &PassContext<'_>, schedule: &Schedule, location_id: LocationId) -> Option<StaffId> {
    ctx.snapshot
        .staff_at(location_id)
        .filter(|s| ctx.snapshot.is_absent_all_day(s.id, ctx.day.date))
        .map(|s| s.id)
        .find(|id| !schedule.is_credited_as_replaced(*id))
}
