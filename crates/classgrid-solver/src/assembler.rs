//! Conversion of ranked candidates into presentable schedules.

use classgrid_core::{Assignment, GroupId, LinkFormat, RatedCandidate, Session, SubgroupId};
use serde::Serialize;

/// Group and subgroup chosen for a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectChoice {
    pub subject: String,
    pub group: GroupId,
    pub subgroup: SubgroupId,
}

/// A ranked, validated timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    /// Choices in subject request order.
    pub subjects: Vec<SubjectChoice>,
    pub dead_hours: u32,
    pub day_count: usize,
    /// Sessions ordered by weekday, start hour and subject.
    pub sessions: Vec<Session>,
    pub link: String,
}

impl Schedule {
    /// Returns the (group, subgroup) chosen for a subject.
    pub fn choice(&self, subject: &str) -> Option<(GroupId, SubgroupId)> {
        self.subjects
            .iter()
            .find(|c| c.subject == subject)
            .map(|c| (c.group, c.subgroup))
    }
}

/// Packages a rated candidate.
pub fn assemble(rated: &RatedCandidate<'_>, link: &LinkFormat) -> Schedule {
    let candidate = rated.candidate();
    let metrics = rated.metrics();

    let mut sessions: Vec<&Session> = candidate.sessions().to_vec();
    sessions.sort_by(|a, b| {
        (a.weekday(), a.start_hour(), a.subject()).cmp(&(b.weekday(), b.start_hour(), b.subject()))
    });

    Schedule {
        subjects: candidate
            .assignments()
            .iter()
            .map(|a| SubjectChoice {
                subject: a.subject.to_string(),
                group: a.group,
                subgroup: a.subgroup,
            })
            .collect(),
        dead_hours: metrics.dead_hours,
        day_count: metrics.day_count(),
        sessions: sessions.into_iter().cloned().collect(),
        link: schedule_link(candidate.assignments(), link),
    }
}

/// Formats the deep link of a set of assignments.
///
/// ```
/// use classgrid_core::{Assignment, LinkFormat};
/// use classgrid_solver::assembler::schedule_link;
///
/// let assignments = [
///     Assignment { subject: "IES", group: 10, subgroup: 11 },
///     Assignment { subject: "XC", group: 20, subgroup: 23 },
/// ];
///
/// assert_eq!(
///     schedule_link(&assignments, &LinkFormat::query("https://example.org")),
///     "https://example.org/schedule/?subjects=IES,XC&groups=10,20&subgroups=11,23",
/// );
/// ```
pub fn schedule_link(assignments: &[Assignment<'_>], format: &LinkFormat) -> String {
    match format {
        LinkFormat::Query { base_url } => {
            let subjects: Vec<&str> = assignments.iter().map(|a| a.subject).collect();
            let groups: Vec<String> = assignments.iter().map(|a| a.group.to_string()).collect();
            let subgroups: Vec<String> =
                assignments.iter().map(|a| a.subgroup.to_string()).collect();
            format!(
                "{}/schedule/?subjects={}&groups={}&subgroups={}",
                base_url.trim_end_matches('/'),
                subjects.join(","),
                groups.join(","),
                subgroups.join(",")
            )
        }
        LinkFormat::Timetable {
            base_url,
            quadrimester,
        } => {
            let mut link = format!("{}?&class=true&lang=true&quad={}", base_url, quadrimester);
            for a in assignments {
                link.push_str(&format!("&a={}_{}&a={}_{}", a.subject, a.group, a.subject, a.subgroup));
            }
            link
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classgrid_core::{Candidate, ScheduleMetrics};
    use classgrid_test::lecture;

    #[test]
    fn test_sessions_sorted_by_day_start_subject() {
        let sessions = [
            lecture("B", 10, 11, (2, 8, 10)),
            lecture("B", 10, 11, (1, 10, 12)),
            lecture("A", 20, 21, (1, 12, 13)),
            lecture("A", 20, 21, (2, 10, 11)),
        ];
        let candidate = Candidate::new(
            4,
            vec![
                Assignment { subject: "B", group: 10, subgroup: 11 },
                Assignment { subject: "A", group: 20, subgroup: 21 },
            ],
            sessions.iter().collect(),
        );
        let metrics = ScheduleMetrics {
            weekdays: [1, 2].into_iter().collect(),
            dead_hours: 0,
            group_count: 2,
            subgroup_count: 2,
        };

        let schedule = assemble(&RatedCandidate::new(candidate, metrics), &LinkFormat::default());

        let order: Vec<(u8, u32, &str)> = schedule
            .sessions
            .iter()
            .map(|s| (s.weekday(), s.start_hour(), s.subject()))
            .collect();
        assert_eq!(order, vec![(1, 10, "B"), (1, 12, "A"), (2, 8, "B"), (2, 10, "A")]);
        assert_eq!(schedule.day_count, 2);
        assert_eq!(schedule.subjects[0].subject, "B");
        assert_eq!(schedule.choice("A"), Some((20, 21)));
        assert_eq!(schedule.link, "/schedule/?subjects=B,A&groups=10,20&subgroups=11,21");
    }

    #[test]
    fn test_timetable_link() {
        let assignments = [
            Assignment { subject: "IES", group: 10, subgroup: 11 },
            Assignment { subject: "PAR", group: 40, subgroup: 42 },
        ];
        let link = schedule_link(&assignments, &LinkFormat::timetable("2024Q1"));
        assert!(link.ends_with(
            "/timetables?&class=true&lang=true&quad=2024Q1&a=IES_10&a=IES_11&a=PAR_40&a=PAR_42"
        ));
    }

    #[test]
    fn test_schedule_serializes() {
        let session = lecture("IES", 10, 11, (1, 8, 10));
        let candidate = Candidate::new(
            0,
            vec![Assignment { subject: "IES", group: 10, subgroup: 11 }],
            vec![&session],
        );
        let schedule = assemble(
            &RatedCandidate::new(candidate, ScheduleMetrics::default()),
            &LinkFormat::query("https://example.org/"),
        );

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["subjects"][0]["group"], 10);
        assert_eq!(json["sessions"][0]["weekday"], 1);
        assert_eq!(json["sessions"][0]["kind"], "lecture");
        assert_eq!(json["sessions"][0]["language"], "ca");
        assert_eq!(
            json["link"],
            "https://example.org/schedule/?subjects=IES&groups=10&subgroups=11"
        );
    }
}
