//! Progress and schedule calculation engine.
//!
//! Pure, synchronous computations over an in-memory project graph:
//! weighted completion roll-up, Critical Path Method scheduling, health
//! assessment, and resource conflict detection. Nothing is cached
//! between calls and the input graph is never mutated.

#![warn(missing_docs)]

pub mod conflict;
pub mod critical_path;
pub mod error;
pub mod progress;

pub use conflict::{detect_conflicts, ConflictPeriod, ResourceConflict};
pub use critical_path::{critical_path, CriticalPath, FLOAT_TOLERANCE};
pub use error::ScheduleError;
pub use progress::{
    generate_report, overall_progress, phase_completion, HealthStatus, PhaseReport,
    ProgressReport, ProjectHealth,
};
