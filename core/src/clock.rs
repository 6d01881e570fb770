//! Wall-clock times and the target day of a generation run.
//!
//! RULE: every time comparison in the pipeline goes through ClockTime.
//! Raw "HH:MM" strings never travel past the snapshot boundary.

use crate::{
    error::{RotaError, RotaResult},
    types::Weekday,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day with minute resolution, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Compile-time constructor for literal times.
    pub const fn hm(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "clock time out of range");
        Self(hour * 60 + minute)
    }

    pub fn from_hm(hour: u16, minute: u16) -> RotaResult<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(RotaError::InvalidClockTime(format!("{hour}:{minute:02}")));
        }
        Ok(Self(hour * 60 + minute))
    }

    pub fn from_minutes(minutes: u16) -> RotaResult<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(RotaError::InvalidClockTime(format!("{minutes} minutes")));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> u16 { self.0 }
    pub fn hour(&self)    -> u16 { self.0 / 60 }
    pub fn minute(&self)  -> u16 { self.0 % 60 }

    /// Minutes from `self` until `later`, or None if `later` is earlier.
    pub fn minutes_until(&self, later: ClockTime) -> Option<u16> {
        later.0.checked_sub(self.0)
    }

    /// This time moved `minutes` earlier, or None if that crosses midnight.
    pub fn earlier_by(&self, minutes: u16) -> Option<ClockTime> {
        self.0.checked_sub(minutes).map(Self)
    }
}

impl FromStr for ClockTime {
    type Err = RotaError;

    fn from_str(s: &str) -> RotaResult<Self> {
        let bad = || RotaError::InvalidClockTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(bad)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(bad());
        }
        let hour: u16 = h.parse().map_err(|_| bad())?;
        let minute: u16 = m.parse().map_err(|_| bad())?;
        Self::from_hm(hour, minute).map_err(|_| bad())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = RotaError;
    fn try_from(s: String) -> RotaResult<Self> { s.parse() }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self { t.to_string() }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A normal working shift on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub start: ClockTime,
    pub end:   ClockTime,
}

impl Shift {
    /// Shift length in minutes. Fails when the end precedes the start.
    pub fn duration_minutes(&self) -> RotaResult<u16> {
        self.start
            .minutes_until(self.end)
            .ok_or(RotaError::InvalidShift { start: self.start, end: self.end })
    }

    /// The same-length shift ending exactly at `cutoff`.
    pub fn ending_at(&self, cutoff: ClockTime) -> RotaResult<Shift> {
        let duration = self.duration_minutes()?;
        let start = cutoff
            .earlier_by(duration)
            .ok_or(RotaError::ShiftCrossesMidnight { cutoff, duration })?;
        Ok(Shift { start, end: cutoff })
    }
}

/// The calendar date a schedule is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDay {
    pub date:    NaiveDate,
    pub weekday: Weekday,
}

impl TargetDay {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, weekday: date.weekday().into() }
    }

    pub fn parse(iso: &str) -> RotaResult<Self> {
        let date = NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d")
            .map_err(|_| RotaError::InvalidDate(iso.to_string()))?;
        Ok(Self::new(date))
    }
}

impl fmt::Display for TargetDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.date, self.weekday)
    }
}
