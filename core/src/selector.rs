//! Substitute selection.
//!
//! Eligible: counted toward the morning surplus (a base entry starting by
//! the morning threshold), has hours on the weekday, not fixed to their
//! location, not already holding a substitute assignment, and with a
//! primary location currently in surplus.
//!
//! Covering a deficit, first match wins:
//!   1. secondary location == needed location (input order)
//!   2. never substituted (random among them, via TieBreak)
//!   3. latest last-substitution date (input order among equals)
//!
//! Tier 3 keeps the most recent date, not the oldest.

use crate::{
    pass::PassContext,
    rng::TieBreak,
    schedule::{Post, Schedule},
    snapshot::Staff,
    types::LocationId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPurpose {
    CoverDeficit,
    MinimizeOvertime,
}

pub struct SubstituteSelector<'c, 'a> {
    ctx: &'c PassContext<'a>,
}

impl<'c, 'a> SubstituteSelector<'c, 'a> {
    pub fn new(ctx: &'c PassContext<'a>) -> Self {
        Self { ctx }
    }

    /// Eligible candidates in snapshot input order.
    pub fn eligible(&self, schedule: &Schedule) -> Vec<&'a Staff> {
        let coverage = self.ctx.coverage(schedule);
        let weekday = self.ctx.day.weekday;
        let threshold = self.ctx.config.morning_threshold;
        self.ctx
            .snapshot
            .staff
            .iter()
            .filter(|s| !s.fixed_to_location)
            .filter(|s| s.shift_on(weekday).is_some())
            .filter(|s| coverage.is_surplus(s.primary_location_id))
            // Late entries (rotations) are not part of the morning surplus.
            .filter(|s| schedule.base_entry(s.id).is_some_and(|a| a.start <= threshold))
            .filter(|s| !schedule.is_relocated(s.id))
            .collect()
    }

    pub fn select(
        &self,
        schedule:  &Schedule,
        purpose:   SelectionPurpose,
        needed:    Option<LocationId>,
        tie_break: &mut dyn TieBreak,
    ) -> Option<&'a Staff> {
        self.select_where(schedule, purpose, needed, tie_break, |_| true)
    }

    /// As `select`, over the eligible candidates that also pass `keep`.
    pub fn select_where(
        &self,
        schedule:  &Schedule,
        purpose:   SelectionPurpose,
        needed:    Option<LocationId>,
        tie_break: &mut dyn TieBreak,
        keep:      impl Fn(&Staff) -> bool,
    ) -> Option<&'a Staff> {
        let mut eligible = self.eligible(schedule);
        eligible.retain(|s| keep(*s));
        if let Some(needed) = needed {
            // Already standing at the post: moving them changes nothing.
            eligible.retain(|s| {
                schedule.base_entry(s.id).map(|a| a.post) != Some(Post::Location(needed))
            });
        }
        if eligible.is_empty() {
            return None;
        }
        match purpose {
            SelectionPurpose::MinimizeOvertime => least_overtime(eligible),
            SelectionPurpose::CoverDeficit     => cover_deficit(&eligible, needed, tie_break),
        }
    }
}

fn cover_deficit<'a>(
    eligible:  &[&'a Staff],
    needed:    Option<LocationId>,
    tie_break: &mut dyn TieBreak,
) -> Option<&'a Staff> {
    if let Some(needed) = needed {
        if let Some(affine) = eligible
            .iter()
            .find(|s| s.secondary_location_id == Some(needed))
        {
            return Some(*affine);
        }
    }

    let first_timers: Vec<&'a Staff> = eligible
        .iter()
        .copied()
        .filter(|s| s.last_substitution_date.is_none())
        .collect();
    if !first_timers.is_empty() {
        return Some(first_timers[tie_break.pick(first_timers.len())]);
    }

    let latest = eligible.iter().filter_map(|s| s.last_substitution_date).max()?;
    eligible
        .iter()
        .copied()
        .find(|s| s.last_substitution_date == Some(latest))
}

/// The candidate with the fewest cumulative overtime minutes;
/// the earliest in input order among equals.
pub fn least_overtime<'a>(candidates: impl IntoIterator<Item = &'a Staff>) -> Option<&'a Staff> {
    candidates
        .into_iter()
        .min_by_key(|s| s.cumulative_overtime_minutes)
}
