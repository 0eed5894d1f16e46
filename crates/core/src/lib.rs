//! sitetrack core data models.
//!
//! This crate defines the project -> phase -> activity graph that the
//! calculation engine operates on.

#![warn(missing_docs)]

// Core identities
mod id;

// Project structure
mod project;
mod phase;
mod activity;

// Re-exports
pub use id::*;

pub use project::{Project, ProjectStatus};
pub use phase::Phase;
pub use activity::{Activity, ActivityStatus, DependencyKind, TaskDependency};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> Time {
        Utc.with_ymd_and_hms(2026, 3, d, 0, 0, 0).unwrap()
    }

    fn sample_activity() -> Activity {
        Activity {
            id: ActivityId::new(),
            name: "Pour foundation".to_string(),
            duration_days: 5.0,
            planned_start: day(1),
            planned_end: day(6),
            actual_start: Some(day(2)),
            actual_end: None,
            percent_complete: 0.4,
            weight: None,
            assigned_resources: vec!["crane-1".to_string()],
            dependencies: Vec::new(),
            documents: Vec::new(),
            status: ActivityStatus::InProgress,
            notes: None,
        }
    }

    #[test]
    fn effective_weight_defaults_to_duration() {
        let activity = sample_activity();
        assert_eq!(activity.effective_weight(), 5.0);
    }

    #[test]
    fn effective_weight_prefers_explicit_weight() {
        let mut activity = sample_activity();
        activity.weight = Some(2.5);
        assert_eq!(activity.effective_weight(), 2.5);
    }

    #[test]
    fn activity_round_trips_through_json() {
        let mut activity = sample_activity();
        activity.dependencies.push(TaskDependency {
            predecessor: ActivityId::new(),
            successor: activity.id,
            kind: DependencyKind::FinishToStart,
            lag_days: -1.0,
        });

        let json = serde_json::to_string(&activity).unwrap();
        let back: Activity = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, activity.id);
        assert_eq!(back.dependencies[0].kind, DependencyKind::FinishToStart);
        assert_eq!(back.dependencies[0].lag_days, -1.0);
        assert_eq!(back.status, ActivityStatus::InProgress);
    }

    #[test]
    fn ids_parse_back_from_display() {
        let id = ActivityId::new();
        let parsed: ActivityId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
