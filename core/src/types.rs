//! Shared primitive types used across the entire pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location identifier. Locations are ordered by id everywhere.
pub type LocationId = u32;

/// A staff member identifier.
pub type StaffId = u32;

/// The canonical generation run identifier.
pub type RunId = String;

/// Day of the week as written in the data files.
///
/// Monday through Saturday are working days; Sunday exists so any calendar
/// date maps to a weekday, but no hours table is expected to carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Monday    => "monday",
            Self::Tuesday   => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday  => "thursday",
            Self::Friday    => "friday",
            Self::Saturday  => "saturday",
            Self::Sunday    => "sunday",
        }
    }

    pub fn is_working_day(&self) -> bool {
        !matches!(self, Self::Sunday)
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serde adapter for month names ("january", "March", ...).
pub mod month_name {
    use chrono::Month;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(month: &Month, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&month.name().to_lowercase())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Month, D::Error> {
        let raw = String::deserialize(d)?;
        raw.trim()
            .parse::<Month>()
            .map_err(|_| de::Error::custom(format!("unknown month name: {raw}")))
    }
}
