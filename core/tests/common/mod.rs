//! Shared builders for the integration tests.
#![allow(dead_code)]

use chrono::{Month, NaiveDate};
use rota_core::{
    clock::{ClockTime, Shift, TargetDay},
    snapshot::{Absence, AfternoonRequirement, FixedCoverage, Location, Rotation, Staff},
    types::{LocationId, StaffId, Weekday},
};
use std::collections::BTreeMap;

/// 2026-01-12 is a Monday.
pub const MONDAY: &str = "2026-01-12";
pub const SUNDAY: &str = "2026-01-18";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn monday() -> TargetDay {
    TargetDay::parse(MONDAY).unwrap()
}

pub fn t(hour: u16, minute: u16) -> ClockTime {
    ClockTime::hm(hour, minute)
}

pub fn shift(start: (u16, u16), end: (u16, u16)) -> Shift {
    Shift { start: t(start.0, start.1), end: t(end.0, end.1) }
}

pub fn date(iso: &str) -> NaiveDate {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").unwrap()
}

pub fn location(id: LocationId, min_required: u32) -> Location {
    Location {
        id,
        name: format!("Location {id}"),
        min_required_headcount: min_required,
        no_cleaning_needed: false,
    }
}

/// A staff member working Monday with the given hours.
pub fn staff(id: StaffId, primary: LocationId, start: (u16, u16), end: (u16, u16)) -> Staff {
    let mut weekly_hours = BTreeMap::new();
    weekly_hours.insert(Weekday::Monday, shift(start, end));
    Staff {
        id,
        name: format!("Staff {id}"),
        primary_location_id: primary,
        secondary_location_id: None,
        fixed_to_location: false,
        weekly_hours,
        last_substitution_date: None,
        cumulative_overtime_minutes: 0,
        no_overtime_allowed: false,
    }
}

/// A Monday 07:50-14:00 staff member.
pub fn morning_staff(id: StaffId, primary: LocationId) -> Staff {
    staff(id, primary, (7, 50), (14, 0))
}

pub fn absent_all_day(staff_id: StaffId, iso: &str) -> Absence {
    Absence { staff_id, date: date(iso), full_day: true, start: None, end: None }
}

pub fn absent_between(staff_id: StaffId, iso: &str, start: (u16, u16), end: (u16, u16)) -> Absence {
    Absence {
        staff_id,
        date: date(iso),
        full_day: false,
        start: Some(t(start.0, start.1)),
        end: Some(t(end.0, end.1)),
    }
}

pub fn january_monday_rotation(staff_id: StaffId, enters_at: (u16, u16)) -> Rotation {
    Rotation {
        staff_id,
        weekday: Weekday::Monday,
        month: Month::January,
        year: 2026,
        alternate_entry_time: t(enters_at.0, enters_at.1),
    }
}

pub fn monday_cover(staff_id: StaffId, covered_location_id: LocationId) -> FixedCoverage {
    FixedCoverage { staff_id, weekday: Weekday::Monday, covered_location_id }
}

pub fn afternoon(cutoff: (u16, u16), required_headcount: u32) -> AfternoonRequirement {
    AfternoonRequirement { active: true, cutoff_time: t(cutoff.0, cutoff.1), required_headcount }
}
