//! Coverage analysis: morning headcount against each location's minimum.
//!
//! Recomputed from scratch after every mutation. Only entries that start
//! at or before the morning threshold count; a staff member who has been
//! moved away no longer counts at the post they left.

use crate::{
    clock::ClockTime,
    schedule::Schedule,
    snapshot::Snapshot,
    types::LocationId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "by", rename_all = "snake_case")]
pub enum CoverageStatus {
    Exact,
    Surplus(u32),
    Deficit(u32),
}

impl CoverageStatus {
    pub fn classify(counted: u32, required: u32) -> Self {
        match counted.cmp(&required) {
            std::cmp::Ordering::Equal   => Self::Exact,
            std::cmp::Ordering::Greater => Self::Surplus(counted - required),
            std::cmp::Ordering::Less    => Self::Deficit(required - counted),
        }
    }

    pub fn is_surplus(&self) -> bool { matches!(self, Self::Surplus(_)) }

    pub fn deficit(&self) -> u32 {
        match self {
            Self::Deficit(n) => *n,
            _ => 0,
        }
    }
}

/// Per-location classification, keyed and iterated in id order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    statuses: BTreeMap<LocationId, CoverageStatus>,
}

impl CoverageReport {
    /// Unknown locations classify as exact: they have no minimum to miss.
    pub fn status(&self, location_id: LocationId) -> CoverageStatus {
        self.statuses
            .get(&location_id)
            .copied()
            .unwrap_or(CoverageStatus::Exact)
    }

    pub fn deficit_at(&self, location_id: LocationId) -> u32 {
        self.status(location_id).deficit()
    }

    pub fn is_surplus(&self, location_id: LocationId) -> bool {
        self.status(location_id).is_surplus()
    }

    /// Locations in deficit with their missing headcount, in id order.
    pub fn deficits(&self) -> impl Iterator<Item = (LocationId, u32)> + '_ {
        self.statuses
            .iter()
            .filter_map(|(id, s)| match s {
                CoverageStatus::Deficit(n) => Some((*id, *n)),
                _ => None,
            })
    }

    pub fn total_deficit(&self) -> u32 {
        self.deficits().map(|(_, n)| n).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LocationId, &CoverageStatus)> {
        self.statuses.iter()
    }
}

/// Entries counted at `location_id` for the morning minimum.
pub fn morning_headcount(schedule: &Schedule, location_id: LocationId, threshold: ClockTime) -> u32 {
    schedule
        .effective_at(location_id)
        .filter(|a| a.start <= threshold)
        .count() as u32
}

pub fn analyze(snapshot: &Snapshot, schedule: &Schedule, threshold: ClockTime) -> CoverageReport {
    let statuses = snapshot
        .locations
        .iter()
        .map(|loc| {
            let counted = morning_headcount(schedule, loc.id, threshold);
            (loc.id, CoverageStatus::classify(counted, loc.min_required_headcount))
        })
        .collect();
    CoverageReport { statuses }
}

/// Entries across the whole schedule still on duty at `cutoff`.
pub fn afternoon_headcount(schedule: &Schedule, cutoff: ClockTime) -> u32 {
    schedule.effective().filter(|a| a.end >= cutoff).count() as u32
}
