//! Resource double-booking detection.
//!
//! Groups activity bookings by resource id and scans each group for
//! strictly overlapping planned date ranges. Quadratic per resource,
//! which is fine for the small booking counts a resource realistically
//! carries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sitetrack_core::{ActivityId, Project, Time};

/// The window during which two bookings overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictPeriod {
    /// Later of the two booking starts
    pub start: Time,

    /// Earlier of the two booking ends
    pub end: Time,
}

/// A resource booked by two activities at the same time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConflict {
    /// The double-booked resource
    pub resource_id: String,

    /// The two activities competing for it
    pub conflicting_activities: (ActivityId, ActivityId),

    /// When the bookings overlap
    pub conflict_period: ConflictPeriod,
}

/// Find every pair of activities that book the same resource over
/// overlapping planned date ranges.
///
/// Overlap is strict: bookings that merely touch at an endpoint do not
/// conflict. Read-only; resources without double bookings produce
/// nothing.
pub fn detect_conflicts(project: &Project) -> Vec<ResourceConflict> {
    let mut bookings: BTreeMap<&str, Vec<(ActivityId, Time, Time)>> = BTreeMap::new();
    for activity in project.phases.iter().flat_map(|p| p.activities.iter()) {
        for resource in &activity.assigned_resources {
            bookings.entry(resource.as_str()).or_default().push((
                activity.id,
                activity.planned_start,
                activity.planned_end,
            ));
        }
    }

    let mut conflicts = Vec::new();
    for (resource, booked) in &bookings {
        for i in 0..booked.len() {
            for j in (i + 1)..booked.len() {
                let (first, start1, end1) = booked[i];
                let (second, start2, end2) = booked[j];
                if start1 < end2 && start2 < end1 {
                    conflicts.push(ResourceConflict {
                        resource_id: resource.to_string(),
                        conflicting_activities: (first, second),
                        conflict_period: ConflictPeriod {
                            start: start1.max(start2),
                            end: end1.min(end2),
                        },
                    });
                }
            }
        }
    }

    tracing::debug!(conflicts = conflicts.len(), "resource conflict scan done");

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sitetrack_core::{
        Activity, ActivityStatus, Phase, PhaseId, ProjectId, ProjectStatus,
    };

    fn day(d: u32) -> Time {
        Utc.with_ymd_and_hms(2026, 3, d, 0, 0, 0).unwrap()
    }

    fn booking(name: &str, resource: &str, start: Time, end: Time) -> Activity {
        Activity {
            id: ActivityId::new(),
            name: name.to_string(),
            duration_days: 1.0,
            planned_start: start,
            planned_end: end,
            actual_start: None,
            actual_end: None,
            percent_complete: 0.0,
            weight: None,
            assigned_resources: vec![resource.to_string()],
            dependencies: Vec::new(),
            documents: Vec::new(),
            status: ActivityStatus::NotStarted,
            notes: None,
        }
    }

    fn project(activities: Vec<Activity>) -> Project {
        Project {
            id: ProjectId::new(),
            name: "Test project".to_string(),
            owner: "Owner".to_string(),
            contractor: "Contractor".to_string(),
            planned_start: day(1),
            planned_end: day(30),
            actual_start: None,
            actual_end: None,
            status: ProjectStatus::InProgress,
            overall_completion: 0.0,
            phases: vec![Phase {
                id: PhaseId::new(),
                name: "Phase 1".to_string(),
                weight: 1.0,
                planned_start: day(1),
                planned_end: day(30),
                actual_start: None,
                actual_end: None,
                activities,
                order: 0,
            }],
            created_at: day(1),
            updated_at: day(1),
        }
    }

    #[test]
    fn overlapping_bookings_conflict() {
        let first = booking("Pour slab", "crane-1", day(1), day(6));
        let second = booking("Lift trusses", "crane-1", day(4), day(9));
        let (first_id, second_id) = (first.id, second.id);

        let conflicts = detect_conflicts(&project(vec![first, second]));

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].resource_id, "crane-1");
        assert_eq!(conflicts[0].conflicting_activities, (first_id, second_id));
        assert_eq!(conflicts[0].conflict_period.start, day(4));
        assert_eq!(conflicts[0].conflict_period.end, day(6));
    }

    #[test]
    fn touching_endpoints_do_not_conflict() {
        let first = booking("Pour slab", "crane-1", day(1), day(6));
        let second = booking("Lift trusses", "crane-1", day(6), day(11));

        let conflicts = detect_conflicts(&project(vec![first, second]));
        assert!(conflicts.is_empty());
    }

    #[test]
    fn conflicts_are_scoped_per_resource() {
        let first = booking("Pour slab", "crane-1", day(1), day(6));
        let second = booking("Excavate", "digger-2", day(1), day(6));

        let conflicts = detect_conflicts(&project(vec![first, second]));
        assert!(conflicts.is_empty());
    }

    #[test]
    fn every_overlapping_pair_is_reported() {
        let first = booking("Pour slab", "crane-1", day(1), day(6));
        let second = booking("Lift trusses", "crane-1", day(4), day(9));
        let third = booking("Set facade", "crane-1", day(6), day(11));
        let (first_id, third_id) = (first.id, third.id);

        let conflicts = detect_conflicts(&project(vec![first, second, third]));

        // First/second and second/third overlap; first/third only touch.
        assert_eq!(conflicts.len(), 2);
        assert!(!conflicts
            .iter()
            .any(|c| c.conflicting_activities == (first_id, third_id)));
    }

    #[test]
    fn multiple_resources_on_one_activity() {
        let mut first = booking("Pour slab", "crane-1", day(1), day(6));
        first.assigned_resources.push("crew-a".to_string());
        let mut second = booking("Lift trusses", "crane-1", day(4), day(9));
        second.assigned_resources.push("crew-a".to_string());

        let conflicts = detect_conflicts(&project(vec![first, second]));

        // Same pair conflicts on both shared resources.
        assert_eq!(conflicts.len(), 2);
        let resources: Vec<&str> =
            conflicts.iter().map(|c| c.resource_id.as_str()).collect();
        assert!(resources.contains(&"crane-1"));
        assert!(resources.contains(&"crew-a"));
    }
}
