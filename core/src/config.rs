use crate::clock::ClockTime;
use serde::{Deserialize, Serialize};

/// Entries starting after this time do not count toward morning headcount.
pub const DEFAULT_MORNING_THRESHOLD: &str = "08:20";

/// Fixed length of one end-of-day cleaning slot.
pub const DEFAULT_CLEANING_OVERTIME_MINUTES: u32 = 20;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Master seed for the tie-break streams.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_morning_threshold")]
    pub morning_threshold: ClockTime,
    #[serde(default = "default_cleaning_minutes")]
    pub cleaning_overtime_minutes: u32,
}

fn default_seed() -> u64 { DEFAULT_SEED }

fn default_morning_threshold() -> ClockTime { ClockTime::hm(8, 20) }

fn default_cleaning_minutes() -> u32 { DEFAULT_CLEANING_OVERTIME_MINUTES }

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed:                      default_seed(),
            morning_threshold:         default_morning_threshold(),
            cleaning_overtime_minutes: default_cleaning_minutes(),
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file. Missing keys fall back to the defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GeneratorConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
