//! JSON master-record persistence.
//!
//! RULE: Only store.rs talks to the filesystem.
//! Passes read the in-memory Snapshot; they never open files directly.
//!
//! Layout of a data directory (one JSON document per collection):
//!   locations.json               [Location]
//!   staff.json                   [Staff]
//!   absences.json                [Absence]
//!   rotations.json               [Rotation]
//!   fixed_coverages.json         [FixedCoverage]
//!   afternoon_requirements.json  { weekday: AfternoonRequirement }
//!
//! A missing file loads as an empty collection.

use crate::{
    error::{RotaError, RotaResult},
    snapshot::{Snapshot, Staff},
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

pub const LOCATIONS_FILE:              &str = "locations.json";
pub const STAFF_FILE:                  &str = "staff.json";
pub const ABSENCES_FILE:               &str = "absences.json";
pub const ROTATIONS_FILE:              &str = "rotations.json";
pub const FIXED_COVERAGES_FILE:        &str = "fixed_coverages.json";
pub const AFTERNOON_REQUIREMENTS_FILE: &str = "afternoon_requirements.json";

pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open the data directory at `dir`. Nothing is read until asked.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // ── Read ───────────────────────────────────────────────────

    pub fn load_snapshot(&self) -> RotaResult<Snapshot> {
        let snapshot = Snapshot {
            locations:              self.read_or_default(LOCATIONS_FILE)?,
            staff:                  self.read_or_default(STAFF_FILE)?,
            absences:               self.read_or_default(ABSENCES_FILE)?,
            rotations:              self.read_or_default(ROTATIONS_FILE)?,
            fixed_coverages:        self.read_or_default(FIXED_COVERAGES_FILE)?,
            afternoon_requirements: self.read_or_default(AFTERNOON_REQUIREMENTS_FILE)?,
        }
        .normalized();
        log::info!(
            "loaded {} locations, {} staff from {}",
            snapshot.locations.len(),
            snapshot.staff.len(),
            self.dir.display()
        );
        Ok(snapshot)
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, file: &str) -> RotaResult<T> {
        let path = self.dir.join(file);
        if !path.exists() {
            log::warn!("{} not found; treating as empty", path.display());
            return Ok(T::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|source| RotaError::Io { path, source })?;
        Ok(serde_json::from_str(&raw)?)
    }

    // ── Write ──────────────────────────────────────────────────

    /// Overwrite the staff collection, the only one a run ever changes.
    pub fn save_staff(&self, staff: &[Staff]) -> RotaResult<()> {
        self.write(STAFF_FILE, &staff)?;
        log::info!("saved {} staff records", staff.len());
        Ok(())
    }

    /// Write every collection of `snapshot`, creating the directory.
    pub fn save_snapshot(&self, snapshot: &Snapshot) -> RotaResult<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|source| RotaError::Io { path: self.dir.clone(), source })?;
        self.write(LOCATIONS_FILE, &snapshot.locations)?;
        self.write(STAFF_FILE, &snapshot.staff)?;
        self.write(ABSENCES_FILE, &snapshot.absences)?;
        self.write(ROTATIONS_FILE, &snapshot.rotations)?;
        self.write(FIXED_COVERAGES_FILE, &snapshot.fixed_coverages)?;
        self.write(AFTERNOON_REQUIREMENTS_FILE, &snapshot.afternoon_requirements)?;
        Ok(())
    }

    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> RotaResult<()> {
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, json).map_err(|source| RotaError::Io { path, source })
    }
}
