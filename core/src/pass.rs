//! Pass trait and shared run context.
//!
//! RULE: Every stage after presence resolution implements SchedulePass.
//! The generator calls run() on each registered pass in registration
//! order, once per generation run. Execution order is fixed and
//! documented in engine.rs.

use crate::{
    clock::TargetDay,
    config::GeneratorConfig,
    coverage::{self, CoverageReport},
    error::RotaResult,
    event::GenerationEvent,
    rng::TieBreak,
    schedule::Schedule,
    snapshot::Snapshot,
};

/// Read-only inputs shared by every pass of one run.
pub struct PassContext<'a> {
    pub snapshot: &'a Snapshot,
    pub day:      TargetDay,
    pub config:   &'a GeneratorConfig,
}

impl<'a> PassContext<'a> {
    pub fn new(snapshot: &'a Snapshot, day: TargetDay, config: &'a GeneratorConfig) -> Self {
        Self { snapshot, day, config }
    }

    /// Fresh coverage classification of `schedule`.
    pub fn coverage(&self, schedule: &Schedule) -> CoverageReport {
        coverage::analyze(self.snapshot, schedule, self.config.morning_threshold)
    }
}

/// The contract every pipeline stage must fulfill.
pub trait SchedulePass: Send {
    /// Unique stable name for this pass.
    fn name(&self) -> &'static str;

    /// Called once per run by the generator.
    ///
    /// - `ctx`:       snapshot, target day and config
    /// - `schedule`:  the assignment state left by earlier passes
    /// - `tie_break`: source of the selector's random tie-break
    ///
    /// Returns the events describing what the pass did.
    fn run(
        &mut self,
        ctx:       &PassContext<'_>,
        schedule:  &mut Schedule,
        tie_break: &mut dyn TieBreak,
    ) -> RotaResult<Vec<GenerationEvent>>;
}
