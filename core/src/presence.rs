//! Presence resolution: who is where, and when, before any substitution.
//!
//! Precedence per staff member (first match wins):
//!   1. Full-day absence              → excluded
//!   2. Fixed coverage on the weekday → covered location, normal hours
//!   3. Rotation for weekday/month/year → primary location, from the
//!      alternate entry time until the afternoon cutoff
//!   4. Working hours on the weekday  → primary location, normal hours
//!   5. Otherwise                     → excluded
//!
//! Partial-day absences are reported but do not change presence.

use crate::{
    clock::{ClockTime, TargetDay},
    schedule::{Assignment, Schedule},
    snapshot::{Snapshot, Staff},
    types::{LocationId, StaffId},
};
use serde::{Deserialize, Serialize};

/// Why a staff member is not at their primary location all day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbsenceNote {
    FullDay { staff_id: StaffId },
    Partial { staff_id: StaffId, start: Option<ClockTime>, end: Option<ClockTime> },
    Rotation { staff_id: StaffId, enters_at: ClockTime },
    FixedCoverage { staff_id: StaffId, from: LocationId, to: LocationId },
}

/// One resolved base presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentEntry {
    pub staff_id:    StaffId,
    pub location_id: LocationId,
    pub start:       ClockTime,
    pub end:         ClockTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresenceReport {
    pub present:  Vec<PresentEntry>,
    pub absences: Vec<AbsenceNote>,
    pub excluded: Vec<StaffId>,
}

impl PresenceReport {
    /// Group present entries into base assignments by location.
    pub fn to_schedule(&self) -> Schedule {
        let mut schedule = Schedule::default();
        for entry in &self.present {
            schedule.push(Assignment::base(entry.location_id, entry.staff_id, entry.start, entry.end));
        }
        schedule
    }
}

pub struct PresenceResolver<'a> {
    snapshot: &'a Snapshot,
    day:      TargetDay,
}

impl<'a> PresenceResolver<'a> {
    pub fn new(snapshot: &'a Snapshot, day: TargetDay) -> Self {
        Self { snapshot, day }
    }

    pub fn resolve(&self) -> PresenceReport {
        let mut report = PresenceReport::default();
        self.collect_notes(&mut report);

        for staff in &self.snapshot.staff {
            match self.resolve_one(staff) {
                Some(entry) => report.present.push(entry),
                None        => report.excluded.push(staff.id),
            }
        }

        log::debug!(
            "date={} presence: {} present, {} excluded",
            self.day.date,
            report.present.len(),
            report.excluded.len()
        );
        report
    }

    fn resolve_one(&self, staff: &Staff) -> Option<PresentEntry> {
        let day = &self.day;
        if self.snapshot.is_absent_all_day(staff.id, day.date) {
            return None;
        }
        let normal = staff.shift_on(day.weekday);

        if let Some(cover) = self.snapshot.fixed_coverage_for(staff.id, day.weekday) {
            let Some(shift) = normal else {
                log::warn!(
                    "date={} staff {} has fixed coverage but no hours on {}; skipped",
                    day.date, staff.id, day.weekday
                );
                return None;
            };
            return Some(PresentEntry {
                staff_id:    staff.id,
                location_id: cover.covered_location_id,
                start:       shift.start,
                end:         shift.end,
            });
        }

        if let Some(rotation) = self.snapshot.rotation_for(staff.id, day) {
            let end = self
                .snapshot
                .afternoon_requirement(day.weekday)
                .map(|req| req.cutoff_time)
                .or(normal.map(|s| s.end));
            let Some(end) = end else {
                log::warn!(
                    "date={} staff {} has a rotation but neither an afternoon cutoff nor hours on {}; skipped",
                    day.date, staff.id, day.weekday
                );
                return None;
            };
            return Some(PresentEntry {
                staff_id:    staff.id,
                location_id: staff.primary_location_id,
                start:       rotation.alternate_entry_time,
                end,
            });
        }

        normal.map(|shift| PresentEntry {
            staff_id:    staff.id,
            location_id: staff.primary_location_id,
            start:       shift.start,
            end:         shift.end,
        })
    }

    fn collect_notes(&self, report: &mut PresenceReport) {
        let day = &self.day;
        for absence in self.snapshot.absences_on(day.date) {
            if self.snapshot.staff_member(absence.staff_id).is_none() {
                log::warn!("date={} absence for unknown staff {}; skipped", day.date, absence.staff_id);
                continue;
            }
            report.absences.push(if absence.covers_whole_day() {
                AbsenceNote::FullDay { staff_id: absence.staff_id }
            } else {
                AbsenceNote::Partial {
                    staff_id: absence.staff_id,
                    start:    absence.start,
                    end:      absence.end,
                }
            });
        }

        for rotation in self.snapshot.rotations.iter().filter(|r| r.applies_on(day)) {
            if self.snapshot.staff_member(rotation.staff_id).is_none() {
                log::warn!("date={} rotation for unknown staff {}; skipped", day.date, rotation.staff_id);
                continue;
            }
            report.absences.push(AbsenceNote::Rotation {
                staff_id:  rotation.staff_id,
                enters_at: rotation.alternate_entry_time,
            });
        }

        for cover in self.snapshot.fixed_coverages.iter().filter(|c| c.weekday == day.weekday) {
            let Some(staff) = self.snapshot.staff_member(cover.staff_id) else {
                log::warn!("date={} fixed coverage for unknown staff {}; skipped", day.date, cover.staff_id);
                continue;
            };
            report.absences.push(AbsenceNote::FixedCoverage {
                staff_id: staff.id,
                from:     staff.primary_location_id,
                to:       cover.covered_location_id,
            });
        }
    }
}
