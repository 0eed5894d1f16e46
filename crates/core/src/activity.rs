//! Activity model - the leaf unit of work, plus its dependency links.

use serde::{Deserialize, Serialize};
use crate::id::ActivityId;
use crate::Time;

/// An activity is the leaf of the project graph. Its `percent_complete`
/// is the only authoritative completion value; phase and project
/// completion are rolled up from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier
    pub id: ActivityId,

    /// Activity name
    pub name: String,

    /// Duration in days (>= 0). Doubles as the effort weight when no
    /// explicit weight is set.
    pub duration_days: f64,

    /// Planned start date
    pub planned_start: Time,

    /// Planned end date
    pub planned_end: Time,

    /// Actual start date
    pub actual_start: Option<Time>,

    /// Actual end date
    pub actual_end: Option<Time>,

    /// Completion in [0, 1]. Authoritative leaf value.
    pub percent_complete: f64,

    /// Explicit effort weight. Falls back to `duration_days` when absent;
    /// see [`Activity::effective_weight`].
    pub weight: Option<f64>,

    /// Identifiers of resources assigned to this activity
    pub assigned_resources: Vec<String>,

    /// Dependencies on other activities, stored on the successor side
    pub dependencies: Vec<TaskDependency>,

    /// Attached document references
    pub documents: Vec<String>,

    /// Current status
    pub status: ActivityStatus,

    /// Free-text notes
    pub notes: Option<String>,
}

impl Activity {
    /// Effort weight used in completion roll-ups: the explicit weight if
    /// one is set, otherwise the duration in days.
    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or(self.duration_days)
    }
}

/// Activity status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityStatus {
    NotStarted,
    InProgress,
    Completed,
    Blocked,
    Overdue,
}

/// A directed dependency edge between two activities.
///
/// Stored denormalized on the successor activity's `dependencies` list;
/// the predecessor may live in any phase of the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDependency {
    /// The activity that must progress first
    pub predecessor: ActivityId,

    /// The activity that depends on the predecessor
    pub successor: ActivityId,

    /// How the two schedules are linked
    pub kind: DependencyKind,

    /// Lag in days. Negative values are lead time (allowed overlap).
    pub lag_days: f64,
}

/// The four standard dependency link types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyKind {
    /// Successor starts after the predecessor finishes
    FinishToStart,
    /// Successor starts after the predecessor starts
    StartToStart,
    /// Successor finishes after the predecessor finishes
    FinishToFinish,
    /// Successor finishes after the predecessor starts
    StartToFinish,
}
