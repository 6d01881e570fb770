//! The schedule generator: one batch run per target date.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   0. Presence resolution   (seeds the schedule with base entries)
//!   1. Cascading resolver    (location deficits)
//!   2. Afternoon extension   (school-wide afternoon headcount)
//!   3. Cleaning overtime     (end-of-day cleaning slots)
//!
//! RULES:
//!   - Passes execute in registration order, once per run.
//!   - Each pass sees the schedule exactly as the previous pass left it.
//!   - All randomness flows through the RngBank or an injected TieBreak.
//!   - Nothing is written back to master records here; see writeback.rs.

use crate::{
    afternoon::AfternoonExtension,
    cascade::CascadingResolver,
    cleaning::CleaningOvertimeAllocator,
    clock::TargetDay,
    config::GeneratorConfig,
    coverage::CoverageReport,
    error::RotaResult,
    event::GenerationEvent,
    pass::{PassContext, SchedulePass},
    presence::{PresenceReport, PresenceResolver},
    rng::{PassSlot, RngBank, TieBreak},
    schedule::Schedule,
    snapshot::Snapshot,
    types::{LocationId, RunId},
};
use serde::{Deserialize, Serialize};

/// Everything one run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub run_id:         RunId,
    pub day:            TargetDay,
    pub presence:       PresenceReport,
    pub schedule:       Schedule,
    pub final_coverage: CoverageReport,
    pub events:         Vec<GenerationEvent>,
}

impl GenerationOutcome {
    /// Locations still below their morning minimum, in id order.
    pub fn unresolved_deficits(&self) -> Vec<(LocationId, u32)> {
        self.final_coverage.deficits().collect()
    }

    pub fn is_fully_staffed(&self) -> bool {
        self.final_coverage.total_deficit() == 0
    }
}

pub struct ScheduleGenerator<'a> {
    snapshot: &'a Snapshot,
    config:   GeneratorConfig,
    rng_bank: RngBank,
    passes:   Vec<(PassSlot, Box<dyn SchedulePass>)>,
}

impl<'a> ScheduleGenerator<'a> {
    pub fn new(snapshot: &'a Snapshot, config: GeneratorConfig) -> Self {
        Self {
            snapshot,
            rng_bank: RngBank::new(config.seed),
            config,
            passes: Vec::new(),
        }
    }

    /// Build a fully wired generator with all passes registered.
    /// Call this instead of new() + manual register() calls.
    pub fn build(snapshot: &'a Snapshot, config: GeneratorConfig) -> Self {
        let mut generator = Self::new(snapshot, config);

        // EXECUTION ORDER: fixed, documented, never reordered.
        generator.register(PassSlot::Cascade, Box::new(CascadingResolver::new()));
        generator.register(PassSlot::Afternoon, Box::new(AfternoonExtension::new()));
        generator.register(PassSlot::Cleaning, Box::new(CleaningOvertimeAllocator::new()));
        generator
    }

    /// Register a pass. Call in the documented execution order.
    pub fn register(&mut self, slot: PassSlot, pass: Box<dyn SchedulePass>) {
        self.passes.push((slot, pass));
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate with each pass drawing from its seeded stream.
    pub fn generate(&mut self, day: TargetDay) -> RotaResult<GenerationOutcome> {
        self.execute(day, None)
    }

    /// Generate with every random tie-break answered by `tie_break`.
    pub fn generate_with(
        &mut self,
        day:       TargetDay,
        tie_break: &mut dyn TieBreak,
    ) -> RotaResult<GenerationOutcome> {
        self.execute(day, Some(tie_break))
    }

    fn execute(
        &mut self,
        day:           TargetDay,
        mut tie_break: Option<&mut dyn TieBreak>,
    ) -> RotaResult<GenerationOutcome> {
        let run_id = uuid::Uuid::new_v4().to_string();
        log::info!("date={} run {run_id} started ({})", day.date, day.weekday);

        if !day.weekday.is_working_day() {
            log::info!("date={} is not a working day; empty schedule", day.date);
            return Ok(GenerationOutcome {
                run_id,
                day,
                presence:       PresenceReport::default(),
                schedule:       Schedule::default(),
                final_coverage: CoverageReport::default(),
                events:         Vec::new(),
            });
        }

        let presence = PresenceResolver::new(self.snapshot, day).resolve();
        let mut schedule = presence.to_schedule();
        let mut events = vec![GenerationEvent::PresenceResolved {
            present:  presence.present.len(),
            excluded: presence.excluded.len(),
        }];

        let ctx = PassContext::new(self.snapshot, day, &self.config);
        for (slot, pass) in &mut self.passes {
            let new_events = match tie_break.as_deref_mut() {
                Some(injected) => pass.run(&ctx, &mut schedule, injected)?,
                None => {
                    let mut rng = self.rng_bank.for_pass(*slot);
                    pass.run(&ctx, &mut schedule, &mut rng)?
                }
            };
            for event in &new_events {
                log::debug!("date={} pass {} -> {}", day.date, pass.name(), event.kind());
            }
            events.extend(new_events);
        }

        let final_coverage = ctx.coverage(&schedule);
        let unresolved = final_coverage.total_deficit();
        if unresolved > 0 {
            log::warn!("date={} run {run_id} finished with {unresolved} uncovered heads", day.date);
        } else {
            log::info!("date={} run {run_id} finished fully staffed", day.date);
        }

        Ok(GenerationOutcome {
            run_id,
            day,
            presence,
            schedule,
            final_coverage,
            events,
        })
    }
}
