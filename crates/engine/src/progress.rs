//! Completion roll-up, progress reporting, and health assessment.
//!
//! Leaf activities carry the only authoritative completion values; phase
//! and project completion are weighted averages computed here on every
//! call. Nothing is cached and the input graph is never mutated.

use serde::{Deserialize, Serialize};

use sitetrack_core::{
    Activity, ActivityId, ActivityStatus, Phase, PhaseId, Project, ProjectId, Time,
};

use crate::critical_path::{critical_path, CriticalPath};
use crate::error::ScheduleError;

/// Allowed shortfall between actual and planned progress before a phase
/// counts as behind schedule (5 percentage points).
pub const SCHEDULE_TOLERANCE: f64 = 0.05;

/// A phase lagging more than this many days is a risk factor.
pub const PHASE_LAG_THRESHOLD_DAYS: f64 = 7.0;

/// Weighted total schedule variance below this many days escalates an
/// at-risk project to critical.
pub const CRITICAL_VARIANCE_DAYS: f64 = -14.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Per-phase slice of a progress report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseReport {
    /// The phase this entry describes
    pub phase_id: PhaseId,

    /// Phase name, for display
    pub name: String,

    /// Derived completion in [0, 1]
    pub completion: f64,

    /// The phase's configured weight
    pub weight: f64,

    /// Contribution to overall completion: `completion * weight`
    pub contribution: f64,

    /// Whether actual completion is within tolerance of the time-elapsed
    /// baseline
    pub on_schedule: bool,

    /// Schedule variance in days. Positive = ahead, negative = behind.
    pub days_ahead: f64,
}

/// Overall project health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    AtRisk,
    Critical,
}

/// Health assessment: a status plus the risk factors that produced it.
/// Recommendations map one-to-one onto risk factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectHealth {
    /// Classified status
    pub status: HealthStatus,

    /// Human-readable risk factors
    pub risk_factors: Vec<String>,

    /// One recommendation per risk factor
    pub recommendations: Vec<String>,
}

/// Full progress report for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// The project this report describes
    pub project_id: ProjectId,

    /// Recomputed overall completion in [0, 1]
    pub overall_completion: f64,

    /// Per-phase breakdown, in phase order
    pub phases: Vec<PhaseReport>,

    /// Critical activity ids, in discovery order
    pub critical_path: Vec<ActivityId>,

    /// Health assessment
    pub health: ProjectHealth,

    /// When the report was computed
    pub calculated_at: Time,
}

/// Derived completion of a phase: the weighted mean of its activities'
/// `percent_complete`, weighted by [`Activity::effective_weight`].
///
/// A phase with no activities, or whose weights sum to zero, has
/// completion 0.
pub fn phase_completion(phase: &Phase) -> f64 {
    let total_weight: f64 = phase
        .activities
        .iter()
        .map(Activity::effective_weight)
        .sum();
    if total_weight == 0.0 {
        return 0.0;
    }

    let weighted: f64 = phase
        .activities
        .iter()
        .map(|a| a.percent_complete * a.effective_weight())
        .sum();
    weighted / total_weight
}

/// Derived overall completion of a project: phase completions weighted
/// by phase weight, normalized by the sum of the weights actually
/// present. Projects whose weights do not sum to 1.0 still normalize
/// correctly; zero phases or zero total weight yields 0.
pub fn overall_progress(project: &Project) -> f64 {
    let total_weight: f64 = project.phases.iter().map(|p| p.weight).sum();
    if total_weight == 0.0 {
        return 0.0;
    }

    let weighted: f64 = project
        .phases
        .iter()
        .map(|p| phase_completion(p) * p.weight)
        .sum();
    weighted / total_weight
}

/// Generate a full progress report for a project at the given time.
///
/// Rolls up completions, computes the critical path (a cyclic dependency
/// graph is the one hard failure and is propagated), and assesses
/// health. Pure: same graph and `now` produce the same report.
pub fn generate_report(project: &Project, now: Time) -> Result<ProgressReport, ScheduleError> {
    tracing::debug!(project = %project.id, "generating progress report");

    let path = critical_path(project)?;

    let phases: Vec<PhaseReport> = project
        .phases
        .iter()
        .map(|phase| {
            let completion = phase_completion(phase);
            let planned = planned_progress(phase, now);
            PhaseReport {
                phase_id: phase.id,
                name: phase.name.clone(),
                completion,
                weight: phase.weight,
                contribution: completion * phase.weight,
                on_schedule: completion >= planned - SCHEDULE_TOLERANCE,
                days_ahead: (completion - planned) * phase_span_days(phase),
            }
        })
        .collect();

    let health = assess_health(project, &phases, &path);

    Ok(ProgressReport {
        project_id: project.id,
        overall_completion: overall_progress(project),
        phases,
        critical_path: path.activities,
        health,
        calculated_at: now,
    })
}

/// Time-elapsed planned-progress baseline, clamped to [0, 1].
///
/// Before the planned start the baseline is 0; after the planned end it
/// is 1. A degenerate span (end at or before start) counts as fully
/// elapsed once `now` reaches the start.
fn planned_progress(phase: &Phase, now: Time) -> f64 {
    if now < phase.planned_start {
        return 0.0;
    }
    let span = phase
        .planned_end
        .signed_duration_since(phase.planned_start)
        .num_seconds();
    if span <= 0 {
        return 1.0;
    }
    let elapsed = now
        .signed_duration_since(phase.planned_start)
        .num_seconds();
    (elapsed as f64 / span as f64).clamp(0.0, 1.0)
}

fn phase_span_days(phase: &Phase) -> f64 {
    let seconds = phase
        .planned_end
        .signed_duration_since(phase.planned_start)
        .num_seconds();
    if seconds <= 0 {
        return 0.0;
    }
    seconds as f64 / SECONDS_PER_DAY
}

/// Classify project health from the per-phase reports and the critical
/// path.
///
/// Phases more than [`PHASE_LAG_THRESHOLD_DAYS`] behind downgrade the
/// project to at-risk; combined with a weighted total variance below
/// [`CRITICAL_VARIANCE_DAYS`] they escalate to critical. Any overdue
/// activity on the critical path forces critical outright.
fn assess_health(
    project: &Project,
    phases: &[PhaseReport],
    path: &CriticalPath,
) -> ProjectHealth {
    let mut status = HealthStatus::Healthy;
    let mut risk_factors = Vec::new();
    let mut recommendations = Vec::new();

    let mut lagging_phase = false;
    for report in phases {
        if report.days_ahead < -PHASE_LAG_THRESHOLD_DAYS {
            lagging_phase = true;
            risk_factors.push(format!(
                "Phase '{}' is {:.1} days behind schedule",
                report.name, -report.days_ahead
            ));
            recommendations.push(format!(
                "Review resource allocation for phase '{}'",
                report.name
            ));
        }
    }

    if lagging_phase {
        status = HealthStatus::AtRisk;

        let weighted_variance: f64 = phases
            .iter()
            .map(|p| p.days_ahead * p.weight)
            .sum();
        if weighted_variance < CRITICAL_VARIANCE_DAYS {
            status = HealthStatus::Critical;
        }
    }

    for activity in project.phases.iter().flat_map(|p| p.activities.iter()) {
        if activity.status == ActivityStatus::Overdue && path.contains(activity.id) {
            status = HealthStatus::Critical;
            risk_factors.push(format!(
                "Critical path activity '{}' is overdue",
                activity.name
            ));
            recommendations.push("Prioritize critical path activities".to_string());
        }
    }

    ProjectHealth {
        status,
        risk_factors,
        recommendations,
    }
}
