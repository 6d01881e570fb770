//! Afternoon extension: the school-wide headcount past the cutoff.
//!
//! Active only on weekdays with an active requirement. While fewer
//! entries than required end at or after the cutoff, one more
//! substitute is drawn (no target location, so secondary-location
//! affinity does not apply) among those whose entry ends before the
//! cutoff, and their normal shift is moved to end
//! exactly at the cutoff. The post they leave is settled like any
//! other vacancy.

use crate::{
    cascade::{settle_vacancy, vacated_post},
    clock::ClockTime,
    coverage::afternoon_headcount,
    error::RotaResult,
    event::GenerationEvent,
    pass::{PassContext, SchedulePass},
    rng::TieBreak,
    schedule::{Assignment, Schedule},
    selector::{SelectionPurpose, SubstituteSelector},
    snapshot::Staff,
    types::StaffId,
};

#[derive(Debug, Default)]
pub struct AfternoonExtension;

impl AfternoonExtension {
    pub fn new() -> Self {
        Self
    }
}

impl SchedulePass for AfternoonExtension {
    fn name(&self) -> &'static str {
        "afternoon"
    }

    fn run(
        &mut self,
        ctx:       &PassContext<'_>,
        schedule:  &mut Schedule,
        tie_break: &mut dyn TieBreak,
    ) -> RotaResult<Vec<GenerationEvent>> {
        let mut events = Vec::new();
        let Some(req) = ctx.snapshot.active_afternoon_requirement(ctx.day.weekday).copied() else {
            return Ok(events);
        };
        let date = ctx.day.date;
        let cutoff = req.cutoff_time;
        let selector = SubstituteSelector::new(ctx);

        log::info!(
            "date={date} afternoon coverage {}/{} until {cutoff}",
            afternoon_headcount(schedule, cutoff),
            req.required_headcount
        );

        loop {
            let covered = afternoon_headcount(schedule, cutoff);
            if covered >= req.required_headcount {
                break;
            }

            // Anyone already on duty past the cutoff is counted; moving them adds nothing.
            let ends_early = |s: &Staff| schedule.base_entry(s.id).is_some_and(|a| a.end < cutoff);
            let Some(sub) = selector.select_where(
                schedule,
                SelectionPurpose::CoverDeficit,
                None,
                tie_break,
                ends_early,
            ) else {
                log::warn!(
                    "date={date} afternoon short: {covered}/{} until {cutoff}",
                    req.required_headcount
                );
                events.push(GenerationEvent::AfternoonShortfall {
                    cutoff,
                    covered,
                    required: req.required_headcount,
                });
                break;
            };

            let shift = sub.required_shift(ctx.day.weekday)?.ending_at(cutoff)?;
            let home = vacated_post(schedule, sub);
            let replaces = absent_afternoon_holder(ctx, schedule, cutoff);

            log::info!("date={date} staff {} takes the afternoon {}-{}", sub.id, shift.start, shift.end);
            schedule.push(Assignment::afternoon(sub.id, shift, home, replaces));
            events.push(GenerationEvent::AfternoonSubstituteAssigned {
                staff_id:          sub.id,
                start:             shift.start,
                end:               shift.end,
                replaces_staff_id: replaces,
            });

            settle_vacancy(ctx, schedule, home, sub.id, tie_break, &mut events)?;
        }

        Ok(events)
    }
}

/// Best-effort: who was meant to be here past the cutoff but is absent.
/// Absentees whose normal shift reaches the cutoff come first, then
/// absent rotation holders. Staff already credited are skipped.
fn absent_afternoon_holder(
    ctx:      &PassContext<'_>,
    schedule: &Schedule,
    cutoff:   ClockTime,
) -> Option<StaffId> {
    let snapshot = ctx.snapshot;
    let day = &ctx.day;
    let absent_today = |id: StaffId| snapshot.is_absent_all_day(id, day.date);
    let free = |id: &StaffId| !schedule.is_credited_as_replaced(*id);

    let by_hours = snapshot
        .absences_on(day.date)
        .filter(|a| a.covers_whole_day())
        .filter_map(|a| snapshot.staff_member(a.staff_id))
        .filter(|s| s.shift_on(day.weekday).is_some_and(|sh| sh.end >= cutoff))
        .map(|s| s.id)
        .find(free);

    by_hours.or_else(|| {
        snapshot
            .rotations
            .iter()
            .filter(|r| r.applies_on(day))
            .map(|r| r.staff_id)
            .filter(|id| snapshot.staff_member(*id).is_some() && absent_today(*id))
            .find(free)
    })
}
