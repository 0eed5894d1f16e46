//! Critical Path Method (CPM) over the flattened activity graph.
//!
//! Standard two-pass algorithm: a forward pass computes Early Start /
//! Early Finish per activity, a backward pass computes Late Start /
//! Late Finish, and activities with zero total float are critical.
//! Dependency graphs are cycle-checked up front; a cycle has no valid
//! schedule and is rejected with [`ScheduleError::CyclicDependency`].

use std::collections::{HashMap, HashSet};

use sitetrack_core::{Activity, ActivityId, DependencyKind, Project, TaskDependency};

use crate::error::ScheduleError;

/// Total float below this magnitude counts as zero.
pub const FLOAT_TOLERANCE: f64 = 0.001;

/// Result of a critical path computation.
///
/// Immutable: membership is looked up here rather than flagged on the
/// activities, so recomputation never touches the input graph.
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalPath {
    /// Critical activity ids in discovery order (phase order, then
    /// activity order within the phase). Not guaranteed topological.
    pub activities: Vec<ActivityId>,

    /// Project duration in days: the maximum Early Finish.
    pub duration: f64,

    members: HashSet<ActivityId>,
}

impl CriticalPath {
    fn empty() -> Self {
        Self {
            activities: Vec::new(),
            duration: 0.0,
            members: HashSet::new(),
        }
    }

    /// Whether the given activity is on the critical path.
    pub fn contains(&self, id: ActivityId) -> bool {
        self.members.contains(&id)
    }

    /// True if no activity is critical (empty graph).
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

/// Compute the critical path of a project.
///
/// Flattens activities across all phases, rejects cyclic dependency
/// graphs, then runs the forward and backward passes. An empty activity
/// set yields an empty result without running either pass. Dependency
/// edges referencing unknown activities are ignored.
pub fn critical_path(project: &Project) -> Result<CriticalPath, ScheduleError> {
    let ordered: Vec<&Activity> = project
        .phases
        .iter()
        .flat_map(|phase| phase.activities.iter())
        .collect();

    if ordered.is_empty() {
        return Ok(CriticalPath::empty());
    }

    let by_id: HashMap<ActivityId, &Activity> =
        ordered.iter().map(|a| (a.id, *a)).collect();

    // Edges keyed both ways; edges with endpoints outside the project
    // are dropped.
    let mut predecessors: HashMap<ActivityId, Vec<&TaskDependency>> = HashMap::new();
    let mut successors: HashMap<ActivityId, Vec<&TaskDependency>> = HashMap::new();
    for activity in &ordered {
        for dep in &activity.dependencies {
            if by_id.contains_key(&dep.predecessor) && by_id.contains_key(&dep.successor) {
                predecessors.entry(dep.successor).or_default().push(dep);
                successors.entry(dep.predecessor).or_default().push(dep);
            }
        }
    }

    tracing::debug!(
        activities = ordered.len(),
        "computing critical path"
    );

    check_for_cycles(&ordered, &predecessors)?;

    let mut early: HashMap<ActivityId, (f64, f64)> = HashMap::new();
    for activity in &ordered {
        early_times(activity.id, &by_id, &predecessors, &mut early);
    }

    let project_end = early
        .values()
        .map(|&(_, finish)| finish)
        .fold(0.0, f64::max);

    let mut late: HashMap<ActivityId, (f64, f64)> = HashMap::new();
    for activity in &ordered {
        late_times(activity.id, &by_id, &successors, project_end, &mut late);
    }

    let mut activities = Vec::new();
    let mut members = HashSet::new();
    for activity in &ordered {
        let (early_start, _) = early[&activity.id];
        let (late_start, _) = late[&activity.id];
        if (late_start - early_start).abs() < FLOAT_TOLERANCE {
            activities.push(activity.id);
            members.insert(activity.id);
        }
    }

    tracing::debug!(
        critical = activities.len(),
        duration = project_end,
        "critical path computed"
    );

    Ok(CriticalPath {
        activities,
        duration: project_end,
        members,
    })
}

/// DFS with a recursion stack; returns the offending cycle on failure.
fn check_for_cycles(
    ordered: &[&Activity],
    predecessors: &HashMap<ActivityId, Vec<&TaskDependency>>,
) -> Result<(), ScheduleError> {
    let mut visited: HashSet<ActivityId> = HashSet::new();
    let mut stack: HashSet<ActivityId> = HashSet::new();

    for activity in ordered {
        if !visited.contains(&activity.id) {
            if let Some(cycle) = find_cycle(
                activity.id,
                predecessors,
                &mut visited,
                &mut stack,
                &mut Vec::new(),
            ) {
                return Err(ScheduleError::CyclicDependency { cycle });
            }
        }
    }

    Ok(())
}

fn find_cycle(
    node: ActivityId,
    predecessors: &HashMap<ActivityId, Vec<&TaskDependency>>,
    visited: &mut HashSet<ActivityId>,
    stack: &mut HashSet<ActivityId>,
    path: &mut Vec<ActivityId>,
) -> Option<Vec<ActivityId>> {
    visited.insert(node);
    stack.insert(node);
    path.push(node);

    if let Some(edges) = predecessors.get(&node) {
        for dep in edges {
            if !visited.contains(&dep.predecessor) {
                if let Some(cycle) =
                    find_cycle(dep.predecessor, predecessors, visited, stack, path)
                {
                    return Some(cycle);
                }
            } else if stack.contains(&dep.predecessor) {
                // Found a cycle
                let start = path
                    .iter()
                    .position(|id| *id == dep.predecessor)
                    .unwrap_or(0);
                return Some(path[start..].to_vec());
            }
        }
    }

    path.pop();
    stack.remove(&node);
    None
}

/// Forward pass: (Early Start, Early Finish), memoized.
fn early_times(
    id: ActivityId,
    by_id: &HashMap<ActivityId, &Activity>,
    predecessors: &HashMap<ActivityId, Vec<&TaskDependency>>,
    memo: &mut HashMap<ActivityId, (f64, f64)>,
) -> (f64, f64) {
    if let Some(&times) = memo.get(&id) {
        return times;
    }

    let duration = by_id.get(&id).map(|a| a.duration_days).unwrap_or(0.0);

    let mut early_start: f64 = 0.0;
    if let Some(edges) = predecessors.get(&id) {
        for dep in edges {
            let (pred_start, pred_finish) =
                early_times(dep.predecessor, by_id, predecessors, memo);
            let required = match dep.kind {
                DependencyKind::FinishToStart => pred_finish + dep.lag_days,
                DependencyKind::StartToStart => pred_start + dep.lag_days,
                DependencyKind::FinishToFinish => pred_finish - duration + dep.lag_days,
                DependencyKind::StartToFinish => pred_start - duration + dep.lag_days,
            };
            early_start = early_start.max(required);
        }
    }

    let times = (early_start, early_start + duration);
    memo.insert(id, times);
    times
}

/// Backward pass: (Late Start, Late Finish), memoized. Sink activities
/// finish no later than the project end.
fn late_times(
    id: ActivityId,
    by_id: &HashMap<ActivityId, &Activity>,
    successors: &HashMap<ActivityId, Vec<&TaskDependency>>,
    project_end: f64,
    memo: &mut HashMap<ActivityId, (f64, f64)>,
) -> (f64, f64) {
    if let Some(&times) = memo.get(&id) {
        return times;
    }

    let duration = by_id.get(&id).map(|a| a.duration_days).unwrap_or(0.0);

    let late_finish = match successors.get(&id) {
        None => project_end,
        Some(edges) if edges.is_empty() => project_end,
        Some(edges) => {
            let mut finish = f64::INFINITY;
            for dep in edges {
                let (succ_start, succ_finish) =
                    late_times(dep.successor, by_id, successors, project_end, memo);
                let allowed = match dep.kind {
                    DependencyKind::FinishToStart => succ_start - dep.lag_days,
                    DependencyKind::StartToStart => succ_start - dep.lag_days + duration,
                    DependencyKind::FinishToFinish => succ_finish - dep.lag_days,
                    DependencyKind::StartToFinish => succ_finish - dep.lag_days + duration,
                };
                finish = finish.min(allowed);
            }
            finish
        }
    };

    let times = (late_finish - duration, late_finish);
    memo.insert(id, times);
    times
}
