//! Deterministic random number generation.
//!
//! RULE: Nothing in the pipeline may call any platform RNG.
//! The only random decision is the tier-2 tie-break of the substitute
//! selector, and it flows through the TieBreak trait so callers can
//! swap in a fixed choice.
//!
//! Each pass gets its own RNG stream, seeded deterministically
//! from (master_seed XOR pass_index). This means:
//!   - Adding a new pass never changes existing passes' streams.
//!   - Each pass's stream is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Source of the random choice among equally-ranked candidates.
pub trait TieBreak {
    /// Pick an index in [0, len). Callers never pass len == 0.
    fn pick(&mut self, len: usize) -> usize;
}

/// A named, deterministic RNG for a single pass.
pub struct PassRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl PassRng {
    /// Create a pass RNG from the master seed and a stable
    /// pass index. The index must never change once assigned.
    pub fn new(master_seed: u64, pass_index: u64) -> Self {
        let derived_seed = master_seed ^ (pass_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::Rng;
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }
}

impl TieBreak for PassRng {
    fn pick(&mut self, len: usize) -> usize {
        self.next_u64_below(len as u64) as usize
    }
}

/// Always picks the same position, clamped to the candidate count.
/// Used by tests and by callers that want a reproducible preview
/// without a seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPick(pub usize);

impl TieBreak for FixedPick {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

/// All pass RNGs for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_pass(&self, slot: PassSlot) -> PassRng {
        PassRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable pass slot assignments.
/// NEVER reorder or remove entries; only append.
/// Reordering changes every pass's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum PassSlot {
    Cascade   = 0,
    Afternoon = 1,
    Cleaning  = 2,
}

impl PassSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cascade   => "cascade",
            Self::Afternoon => "afternoon",
            Self::Cleaning  => "cleaning",
        }
    }
}
