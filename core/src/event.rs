//! Events emitted while a schedule is generated.
//!
//! RULE: every decision a pass makes is reported as an event, including
//! the ones it could not make. An unresolved deficit is an event, not an
//! error.

use crate::{
    clock::ClockTime,
    types::{LocationId, StaffId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationEvent {
    // ── Presence ───────────────────────────────────
    PresenceResolved {
        present:  usize,
        excluded: usize,
    },

    // ── Location deficits ──────────────────────────
    DeficitDetected {
        location_id: LocationId,
        missing:     u32,
    },
    SubstituteAssigned {
        location_id:          LocationId,
        staff_id:             StaffId,
        original_location_id: LocationId,
        replaces_staff_id:    Option<StaffId>,
        partial_end:          Option<ClockTime>,
        cascade:              bool,
    },
    DeficitUnresolved {
        location_id: LocationId,
        missing:     u32,
    },

    // ── Afternoon pool ─────────────────────────────
    AfternoonSubstituteAssigned {
        staff_id:          StaffId,
        start:             ClockTime,
        end:               ClockTime,
        replaces_staff_id: Option<StaffId>,
    },
    AfternoonShortfall {
        cutoff:   ClockTime,
        covered:  u32,
        required: u32,
    },

    // ── Cleaning ───────────────────────────────────
    CleaningOvertimeAssigned {
        location_id:      LocationId,
        staff_id:         StaffId,
        overtime_minutes: u32,
    },
    CleaningSlotUnfilled {
        location_id: LocationId,
        missing:     u32,
    },
}

impl GenerationEvent {
    /// Stable snake_case name of the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PresenceResolved { .. }            => "presence_resolved",
            Self::DeficitDetected { .. }             => "deficit_detected",
            Self::SubstituteAssigned { .. }          => "substitute_assigned",
            Self::DeficitUnresolved { .. }           => "deficit_unresolved",
            Self::AfternoonSubstituteAssigned { .. } => "afternoon_substitute_assigned",
            Self::AfternoonShortfall { .. }          => "afternoon_shortfall",
            Self::CleaningOvertimeAssigned { .. }    => "cleaning_overtime_assigned",
            Self::CleaningSlotUnfilled { .. }        => "cleaning_slot_unfilled",
        }
    }
}
