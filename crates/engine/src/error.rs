//! Engine errors.

use sitetrack_core::ActivityId;
use thiserror::Error;

/// Errors produced by the schedule calculations.
///
/// The engine prefers degenerate-safe defaults (empty graphs yield zero
/// completions and empty paths), so the only hard failure is a dependency
/// graph that cannot be scheduled at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// The dependency graph contains a cycle and has no valid schedule.
    #[error("cyclic dependency between activities: {cycle:?}")]
    CyclicDependency {
        /// The activities forming the cycle, in traversal order.
        cycle: Vec<ActivityId>,
    },
}
