//! Metrics of conflict-free candidates.

use std::collections::{BTreeMap, BTreeSet};

use classgrid_core::{Candidate, ScheduleMetrics, Session};

/// Computes the day, dead-hour and distinct-id metrics of a candidate.
///
/// The candidate must be conflict-free.
pub fn compute_metrics(candidate: &Candidate<'_>) -> ScheduleMetrics {
    let sessions = candidate.sessions();
    let weekdays = sessions.iter().map(|s| s.weekday()).collect();
    let group_count = candidate
        .assignments()
        .iter()
        .map(|a| a.group)
        .collect::<BTreeSet<_>>()
        .len();
    let subgroup_count = candidate
        .assignments()
        .iter()
        .map(|a| a.subgroup)
        .collect::<BTreeSet<_>>()
        .len();

    ScheduleMetrics {
        weekdays,
        dead_hours: dead_hours(sessions),
        group_count,
        subgroup_count,
    }
}

/// Sums the idle hours between consecutive classes of each day.
///
/// Time before the first or after the last class of a day is not counted.
///
/// ```
/// use classgrid_core::{ClassKind, Language, Session, TimeSlot};
/// use classgrid_solver::metrics::dead_hours;
///
/// let monday = |start, end| Session::new(
///     "Z", 10, 11, ClassKind::Lecture,
///     TimeSlot::new(1, start, end).unwrap(), Language::Catalan,
/// );
/// let (early, late) = (monday(8, 10), monday(13, 15));
/// assert_eq!(dead_hours(&[&late, &early]), 3);
/// ```
pub fn dead_hours(sessions: &[&Session]) -> u32 {
    let mut days: BTreeMap<u8, Vec<(u32, u32)>> = BTreeMap::new();
    for session in sessions {
        days.entry(session.weekday())
            .or_default()
            .push((session.start_hour(), session.end_hour()));
    }

    days.values_mut()
        .map(|day| {
            day.sort_unstable();
            day.windows(2)
                .map(|pair| pair[1].0.saturating_sub(pair[0].1))
                .sum::<u32>()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use classgrid_core::Assignment;
    use classgrid_test::lecture;

    #[test]
    fn test_gaps_sum_across_days() {
        let sessions = [
            lecture("A", 10, 11, (1, 8, 9)),
            lecture("A", 10, 11, (1, 11, 12)),
            lecture("B", 10, 11, (1, 14, 15)),
            lecture("B", 10, 11, (3, 9, 10)),
            lecture("C", 10, 11, (3, 12, 14)),
        ];
        let refs: Vec<&Session> = sessions.iter().collect();
        assert_eq!(dead_hours(&refs), 2 + 2 + 2);
    }

    #[test]
    fn test_back_to_back_has_no_dead_hours() {
        let sessions = [
            lecture("A", 10, 11, (2, 8, 10)),
            lecture("B", 10, 11, (2, 10, 12)),
        ];
        let refs: Vec<&Session> = sessions.iter().collect();
        assert_eq!(dead_hours(&refs), 0);
    }

    #[test]
    fn test_distinct_counts_and_days() {
        let sessions = [
            lecture("A", 10, 11, (1, 8, 10)),
            lecture("B", 10, 12, (2, 8, 10)),
            lecture("C", 20, 21, (2, 10, 12)),
        ];
        let candidate = Candidate::new(
            0,
            vec![
                Assignment { subject: "A", group: 10, subgroup: 11 },
                Assignment { subject: "B", group: 10, subgroup: 12 },
                Assignment { subject: "C", group: 20, subgroup: 21 },
            ],
            sessions.iter().collect(),
        );

        let metrics = compute_metrics(&candidate);
        assert_eq!(metrics.group_count, 2);
        assert_eq!(metrics.subgroup_count, 3);
        assert_eq!(metrics.day_count(), 2);
        assert_eq!(metrics.weekdays.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(metrics.dead_hours, 0);
    }
}
