//! Phase model - a weighted stage of a project.

use serde::{Deserialize, Serialize};
use crate::activity::Activity;
use crate::id::PhaseId;
use crate::Time;

/// A phase is a stage of a project holding an ordered list of activities.
///
/// Completion is always derived from the activities; it is never stored
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    /// Unique identifier
    pub id: PhaseId,

    /// Phase name
    pub name: String,

    /// Fraction of the project this phase represents. Intended to sum to
    /// 1.0 across a project's phases but not enforced; roll-ups normalize
    /// by the weights actually present.
    pub weight: f64,

    /// Planned start date
    pub planned_start: Time,

    /// Planned end date
    pub planned_end: Time,

    /// Actual start date
    pub actual_start: Option<Time>,

    /// Actual end date
    pub actual_end: Option<Time>,

    /// Activities in display order
    pub activities: Vec<Activity>,

    /// Display order within the project
    pub order: u32,
}
