use crate::{clock::ClockTime, types::{StaffId, Weekday}};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RotaError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid clock time: {0:?}")]
    InvalidClockTime(String),

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Invalid shift: ends at {end} before it starts at {start}")]
    InvalidShift { start: ClockTime, end: ClockTime },

    #[error("A {duration}-minute shift ending at {cutoff} would start before midnight")]
    ShiftCrossesMidnight { cutoff: ClockTime, duration: u16 },

    #[error("Staff {staff_id} has no working hours on {weekday}")]
    NoHoursOnWeekday { staff_id: StaffId, weekday: Weekday },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RotaResult<T> = Result<T, RotaError>;
