//! The assignment state threaded through every pass of a run.
//!
//! RULE: passes only append. A base entry is never removed when its
//! holder is moved; the holder's substitute assignment marks them as
//! relocated, and readers ask `is_relocated` before counting them.

use crate::{
    clock::{ClockTime, Shift},
    types::{LocationId, StaffId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where an assignment is booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Post {
    Location(LocationId),
    AfternoonPool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub post:     Post,
    pub staff_id: StaffId,
    pub start:    ClockTime,
    pub end:      ClockTime,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_substitute:           bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_afternoon_substitute: bool,
    /// The substitute returns home at this time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_end:             Option<ClockTime>,
    /// Location the substitute was taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_location_id:    Option<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaces_staff_id:       Option<StaffId>,
}

impl Assignment {
    /// A staff member's own presence for the day.
    pub fn base(location_id: LocationId, staff_id: StaffId, start: ClockTime, end: ClockTime) -> Self {
        Self {
            post: Post::Location(location_id),
            staff_id,
            start,
            end,
            is_substitute:           false,
            is_afternoon_substitute: false,
            partial_end:             None,
            original_location_id:    None,
            replaces_staff_id:       None,
        }
    }

    /// A substitute covering `location_id` with their own normal shift.
    pub fn substitute(
        location_id: LocationId,
        staff_id:    StaffId,
        shift:       Shift,
        home:        LocationId,
        replaces:    Option<StaffId>,
    ) -> Self {
        Self {
            is_substitute:        true,
            original_location_id: Some(home),
            replaces_staff_id:    replaces,
            ..Self::base(location_id, staff_id, shift.start, shift.end)
        }
    }

    /// A substitute covering only the morning gap left by a rotation.
    pub fn partial_substitute(
        location_id: LocationId,
        staff_id:    StaffId,
        shift:       Shift,
        returns_at:  ClockTime,
        home:        LocationId,
        replaces:    StaffId,
    ) -> Self {
        Self {
            partial_end: Some(returns_at),
            ..Self::substitute(location_id, staff_id, shift, home, Some(replaces))
        }
    }

    /// A school-wide afternoon substitute with a shifted shift.
    pub fn afternoon(
        staff_id: StaffId,
        shift:    Shift,
        home:     LocationId,
        replaces: Option<StaffId>,
    ) -> Self {
        Self {
            post:                    Post::AfternoonPool,
            staff_id,
            start:                   shift.start,
            end:                     shift.end,
            is_substitute:           true,
            is_afternoon_substitute: true,
            partial_end:             None,
            original_location_id:    Some(home),
            replaces_staff_id:       replaces,
        }
    }

    pub fn is_base(&self) -> bool {
        !self.is_substitute && !self.is_afternoon_substitute
    }

    pub fn is_partial(&self) -> bool {
        self.partial_end.is_some()
    }
}

/// End-of-day cleaning overtime booked for one staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningOvertimeRecord {
    pub staff_id:         StaffId,
    pub location_id:      LocationId,
    pub location_name:    String,
    pub overtime_minutes: u32,
}

/// The schedule result: assignments per location plus the two
/// location-less collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub locations:         BTreeMap<LocationId, Vec<Assignment>>,
    pub afternoon_pool:    Vec<Assignment>,
    pub cleaning_overtime: Vec<CleaningOvertimeRecord>,
}

impl Schedule {
    pub fn push(&mut self, assignment: Assignment) {
        match assignment.post {
            Post::Location(id)  => self.locations.entry(id).or_default().push(assignment),
            Post::AfternoonPool => self.afternoon_pool.push(assignment),
        }
    }

    pub fn push_cleaning(&mut self, record: CleaningOvertimeRecord) {
        self.cleaning_overtime.push(record);
    }

    pub fn at(&self, location_id: LocationId) -> &[Assignment] {
        self.locations
            .get(&location_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every assignment, locations in id order first, then the pool.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.locations
            .values()
            .flatten()
            .chain(self.afternoon_pool.iter())
    }

    pub fn substitutes(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments().filter(|a| !a.is_base())
    }

    /// The staff member's own entry for the day, if present.
    pub fn base_entry(&self, staff_id: StaffId) -> Option<&Assignment> {
        self.locations
            .values()
            .flatten()
            .find(|a| a.is_base() && a.staff_id == staff_id)
    }

    pub fn is_present(&self, staff_id: StaffId) -> bool {
        self.base_entry(staff_id).is_some()
    }

    /// Holds a substitute or afternoon-pool assignment this run.
    pub fn is_relocated(&self, staff_id: StaffId) -> bool {
        self.substitutes().any(|a| a.staff_id == staff_id)
    }

    pub fn in_afternoon_pool(&self, staff_id: StaffId) -> bool {
        self.afternoon_pool.iter().any(|a| a.staff_id == staff_id)
    }

    pub fn has_cleaning_overtime(&self, staff_id: StaffId) -> bool {
        self.cleaning_overtime.iter().any(|c| c.staff_id == staff_id)
    }

    pub fn is_credited_as_replaced(&self, staff_id: StaffId) -> bool {
        self.substitutes()
            .any(|a| a.replaces_staff_id == Some(staff_id))
    }

    /// Entries that represent someone actually on duty: base entries of
    /// staff still at their own post, plus every substitute assignment.
    pub fn effective(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments()
            .filter(move |a| !a.is_base() || !self.is_relocated(a.staff_id))
    }

    pub fn effective_at(&self, location_id: LocationId) -> impl Iterator<Item = &Assignment> {
        self.at(location_id)
            .iter()
            .filter(move |a| !a.is_base() || !self.is_relocated(a.staff_id))
    }
}
