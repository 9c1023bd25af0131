//! Total orders over rated candidates.
//!
//! Both modes end with the generation ordinal, so distinct candidates never
//! compare equal and the ranking is deterministic.

use std::cmp::Ordering;

use classgrid_core::{RatedCandidate, SortMode};

/// Compares two candidates under `mode`; smaller ranks first.
///
/// - [`SortMode::GroupCount`]: group count, subgroup count, dead hours,
///   ordinal.
/// - [`SortMode::DeadHours`]: dead hours, group count, ordinal.
pub fn compare(a: &RatedCandidate<'_>, b: &RatedCandidate<'_>, mode: SortMode) -> Ordering {
    let (ma, mb) = (a.metrics(), b.metrics());
    match mode {
        SortMode::GroupCount => (ma.group_count, ma.subgroup_count, ma.dead_hours, a.ordinal())
            .cmp(&(mb.group_count, mb.subgroup_count, mb.dead_hours, b.ordinal())),
        SortMode::DeadHours => (ma.dead_hours, ma.group_count, a.ordinal())
            .cmp(&(mb.dead_hours, mb.group_count, b.ordinal())),
    }
}

/// Sorts candidates best first.
pub fn rank(candidates: &mut [RatedCandidate<'_>], mode: SortMode) {
    candidates.sort_unstable_by(|a, b| compare(a, b, mode));
}

#[cfg(test)]
mod tests {
    use super::*;
    use classgrid_core::{Candidate, ScheduleMetrics};

    fn rated(ordinal: u64, groups: usize, subgroups: usize, dead_hours: u32) -> RatedCandidate<'static> {
        RatedCandidate::new(
            Candidate::new(ordinal, Vec::new(), Vec::new()),
            ScheduleMetrics {
                weekdays: Default::default(),
                dead_hours,
                group_count: groups,
                subgroup_count: subgroups,
            },
        )
    }

    fn ordinals(candidates: &[RatedCandidate<'_>]) -> Vec<u64> {
        candidates.iter().map(|c| c.ordinal()).collect()
    }

    #[test]
    fn test_group_count_mode() {
        let mut candidates = vec![
            rated(0, 3, 3, 0),
            rated(1, 2, 3, 5),
            rated(2, 2, 2, 9),
            rated(3, 2, 2, 1),
        ];
        rank(&mut candidates, SortMode::GroupCount);
        assert_eq!(ordinals(&candidates), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_dead_hours_mode() {
        let mut candidates = vec![
            rated(0, 3, 3, 2),
            rated(1, 1, 3, 2),
            rated(2, 4, 4, 0),
            rated(3, 1, 1, 7),
        ];
        rank(&mut candidates, SortMode::DeadHours);
        assert_eq!(ordinals(&candidates), vec![2, 1, 0, 3]);
    }

    #[test]
    fn test_ties_break_on_ordinal() {
        let mut candidates = vec![rated(7, 2, 2, 1), rated(3, 2, 2, 1), rated(5, 2, 2, 1)];
        rank(&mut candidates, SortMode::GroupCount);
        assert_eq!(ordinals(&candidates), vec![3, 5, 7]);
        rank(&mut candidates, SortMode::DeadHours);
        assert_eq!(ordinals(&candidates), vec![3, 5, 7]);
    }

    #[test]
    fn test_dead_hours_mode_ignores_subgroup_count() {
        let a = rated(0, 2, 5, 1);
        let b = rated(1, 2, 1, 1);
        assert_eq!(compare(&a, &b, SortMode::DeadHours), Ordering::Less);
        assert_eq!(compare(&a, &b, SortMode::GroupCount), Ordering::Greater);
    }
}
