//! rota-core: daily substitution schedule generation for school staff.
//!
//! One run takes an immutable `Snapshot` of master records and a target
//! date, and produces a `Schedule`: who stands where, who covers whom,
//! who extends into the afternoon and who stays for cleaning. Master
//! records change only when a caller explicitly accepts the result.

pub mod afternoon;
pub mod cascade;
pub mod cleaning;
pub mod clock;
pub mod compose;
pub mod config;
pub mod coverage;
pub mod engine;
pub mod error;
pub mod event;
pub mod pass;
pub mod presence;
pub mod rng;
pub mod schedule;
pub mod selector;
pub mod snapshot;
pub mod store;
pub mod types;
pub mod writeback;

pub use clock::{ClockTime, Shift, TargetDay};
pub use config::GeneratorConfig;
pub use engine::{GenerationOutcome, ScheduleGenerator};
pub use error::{RotaError, RotaResult};
pub use schedule::{Assignment, CleaningOvertimeRecord, Post, Schedule};
pub use snapshot::Snapshot;
