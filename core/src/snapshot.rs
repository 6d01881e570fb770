//! The immutable master-record snapshot a generation run reads.
//!
//! A snapshot is loaded once per run (see store.rs) and never mutated
//! by the pipeline. Only the explicit acceptance step in writeback.rs
//! changes staff records, and it works on the caller's copy.

use crate::{
    clock::{ClockTime, Shift, TargetDay},
    error::{RotaError, RotaResult},
    types::{month_name, LocationId, StaffId, Weekday},
};
use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Master records ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id:                     LocationId,
    pub name:                   String,
    pub min_required_headcount: u32,
    #[serde(default)]
    pub no_cleaning_needed:     bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Staff {
    pub id:                          StaffId,
    pub name:                        String,
    pub primary_location_id:         LocationId,
    #[serde(default)]
    pub secondary_location_id:       Option<LocationId>,
    /// Never moved as a substitute.
    #[serde(default)]
    pub fixed_to_location:           bool,
    #[serde(default)]
    pub weekly_hours:                BTreeMap<Weekday, Shift>,
    #[serde(default)]
    pub last_substitution_date:      Option<NaiveDate>,
    #[serde(default)]
    pub cumulative_overtime_minutes: u32,
    #[serde(default)]
    pub no_overtime_allowed:         bool,
}

impl Staff {
    pub fn shift_on(&self, weekday: Weekday) -> Option<Shift> {
        self.weekly_hours.get(&weekday).copied()
    }

    pub fn required_shift(&self, weekday: Weekday) -> RotaResult<Shift> {
        self.shift_on(weekday)
            .ok_or(RotaError::NoHoursOnWeekday { staff_id: self.id, weekday })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Absence {
    pub staff_id: StaffId,
    pub date:     NaiveDate,
    #[serde(default)]
    pub full_day: bool,
    #[serde(default)]
    pub start:    Option<ClockTime>,
    #[serde(default)]
    pub end:      Option<ClockTime>,
}

impl Absence {
    /// An entry without any time bound counts as a full-day absence.
    pub fn covers_whole_day(&self) -> bool {
        self.full_day || (self.start.is_none() && self.end.is_none())
    }
}

/// A monthly shift swap: on `weekday` of `month`/`year` the staff member
/// enters at `alternate_entry_time` and stays for the afternoon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rotation {
    pub staff_id:             StaffId,
    pub weekday:              Weekday,
    #[serde(with = "month_name")]
    pub month:                Month,
    pub year:                 i32,
    pub alternate_entry_time: ClockTime,
}

impl Rotation {
    pub fn applies_on(&self, day: &TargetDay) -> bool {
        self.weekday == day.weekday
            && self.year == day.date.year()
            && self.month.number_from_month() == day.date.month()
    }
}

/// A standing weekday override of a staff member's location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedCoverage {
    pub staff_id:            StaffId,
    pub weekday:             Weekday,
    pub covered_location_id: LocationId,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AfternoonRequirement {
    #[serde(default)]
    pub active:             bool,
    pub cutoff_time:        ClockTime,
    pub required_headcount: u32,
}

// ── Snapshot ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    /// Kept sorted by id; every pass iterates locations in this order.
    pub locations:              Vec<Location>,
    /// Input order is significant: it breaks ties in every selection.
    pub staff:                  Vec<Staff>,
    pub absences:               Vec<Absence>,
    pub rotations:              Vec<Rotation>,
    pub fixed_coverages:        Vec<FixedCoverage>,
    pub afternoon_requirements: BTreeMap<Weekday, AfternoonRequirement>,
}

impl Snapshot {
    pub fn new(mut locations: Vec<Location>, staff: Vec<Staff>) -> Self {
        locations.sort_by_key(|l| l.id);
        Self { locations, staff, ..Self::default() }
    }

    pub fn with_absences(mut self, absences: Vec<Absence>) -> Self {
        self.absences = absences;
        self
    }

    pub fn with_rotations(mut self, rotations: Vec<Rotation>) -> Self {
        self.rotations = rotations;
        self
    }

    pub fn with_fixed_coverages(mut self, fixed: Vec<FixedCoverage>) -> Self {
        self.fixed_coverages = fixed;
        self
    }

    pub fn with_afternoon_requirement(mut self, weekday: Weekday, req: AfternoonRequirement) -> Self {
        self.afternoon_requirements.insert(weekday, req);
        self
    }

    /// Restore the id ordering after loading from an external source.
    pub fn normalized(mut self) -> Self {
        self.locations.sort_by_key(|l| l.id);
        self
    }

    // ── Lookups ──────────────────────────────────────────────────

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn staff_member(&self, id: StaffId) -> Option<&Staff> {
        self.staff.iter().find(|s| s.id == id)
    }

    pub fn location_name(&self, id: LocationId) -> String {
        self.location(id)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| format!("#{id}"))
    }

    pub fn staff_name(&self, id: StaffId) -> String {
        self.staff_member(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("#{id}"))
    }

    pub fn absences_on(&self, date: NaiveDate) -> impl Iterator<Item = &Absence> {
        self.absences.iter().filter(move |a| a.date == date)
    }

    pub fn is_absent_all_day(&self, staff_id: StaffId, date: NaiveDate) -> bool {
        self.absences_on(date)
            .any(|a| a.staff_id == staff_id && a.covers_whole_day())
    }

    pub fn rotation_for(&self, staff_id: StaffId, day: &TargetDay) -> Option<&Rotation> {
        self.rotations
            .iter()
            .find(|r| r.staff_id == staff_id && r.applies_on(day))
    }

    pub fn fixed_coverage_for(&self, staff_id: StaffId, weekday: Weekday) -> Option<&FixedCoverage> {
        self.fixed_coverages
            .iter()
            .find(|c| c.staff_id == staff_id && c.weekday == weekday)
    }

    /// The afternoon requirement for `weekday`, whether active or not.
    pub fn afternoon_requirement(&self, weekday: Weekday) -> Option<&AfternoonRequirement> {
        self.afternoon_requirements.get(&weekday)
    }

    pub fn active_afternoon_requirement(&self, weekday: Weekday) -> Option<&AfternoonRequirement> {
        self.afternoon_requirement(weekday).filter(|r| r.active)
    }

    /// Staff whose primary location is `location_id`, in input order.
    pub fn staff_at(&self, location_id: LocationId) -> impl Iterator<Item = &Staff> {
        self.staff
            .iter()
            .filter(move |s| s.primary_location_id == location_id)
    }
}
