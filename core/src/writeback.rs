//! Acceptance of a generated schedule into the staff master records.
//!
//! RULE: nothing in the generation pipeline calls this. The caller
//! decides when a schedule is accepted and persists the records after.
//!
//!   - every substitute (location or afternoon pool): last substitution
//!     date := the run's date
//!   - every cleaning overtime record: cumulative overtime += its minutes

use crate::{engine::GenerationOutcome, snapshot::Staff, types::StaffId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceSummary {
    /// Staff whose last substitution date was set, ascending id.
    pub substitutes_marked: Vec<StaffId>,
    /// (staff, minutes added) in record order.
    pub overtime_added:     Vec<(StaffId, u32)>,
    /// Ids in the schedule with no matching staff record.
    pub unknown_staff:      Vec<StaffId>,
}

pub fn accept_schedule(staff: &mut [Staff], outcome: &GenerationOutcome) -> AcceptanceSummary {
    let date = outcome.day.date;
    let mut summary = AcceptanceSummary::default();

    let substitutes: BTreeSet<StaffId> = outcome.schedule.substitutes().map(|a| a.staff_id).collect();
    for id in substitutes {
        match staff.iter_mut().find(|s| s.id == id) {
            Some(member) => {
                member.last_substitution_date = Some(date);
                summary.substitutes_marked.push(id);
            }
            None => summary.unknown_staff.push(id),
        }
    }

    for record in &outcome.schedule.cleaning_overtime {
        match staff.iter_mut().find(|s| s.id == record.staff_id) {
            Some(member) => {
                member.cumulative_overtime_minutes =
                    member.cumulative_overtime_minutes.saturating_add(record.overtime_minutes);
                summary.overtime_added.push((record.staff_id, record.overtime_minutes));
            }
            None => summary.unknown_staff.push(record.staff_id),
        }
    }

    for id in &summary.unknown_staff {
        log::warn!("date={date} accepted schedule references unknown staff {id}; skipped");
    }
    log::info!(
        "date={date} run {} accepted: {} substitutes, {} overtime records",
        outcome.run_id,
        summary.substitutes_marked.len(),
        summary.overtime_added.len()
    );
    summary
}
