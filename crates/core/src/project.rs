//! Project model - the root aggregate of a tracked project.

use serde::{Deserialize, Serialize};
use crate::id::ProjectId;
use crate::phase::Phase;
use crate::Time;

/// A project is the root aggregate: owner, contractor, schedule frame,
/// and an ordered list of phases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,

    /// Project name
    pub name: String,

    /// Owner organization or person
    pub owner: String,

    /// Contractor responsible for execution
    pub contractor: String,

    /// Planned start date
    pub planned_start: Time,

    /// Planned end date
    pub planned_end: Time,

    /// Actual start date, once work has begun
    pub actual_start: Option<Time>,

    /// Actual end date, once work has finished
    pub actual_end: Option<Time>,

    /// Current status
    pub status: ProjectStatus,

    /// Cached overall completion in [0, 1]. Derived, never authoritative:
    /// the engine recomputes it from the phases on every report.
    pub overall_completion: f64,

    /// Phases in display order
    pub phases: Vec<Phase>,

    /// Creation timestamp
    pub created_at: Time,

    /// Last update timestamp
    pub updated_at: Time,
}

/// Project status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planning,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
}
