//! Candidate timetables and their derived metrics.
//!
//! A [`Candidate`] borrows its sessions from the catalog it was generated
//! from. It is never modified: metrics are attached by wrapping it into a
//! [`RatedCandidate`].

use std::collections::BTreeSet;

use serde::Serialize;

use crate::session::{GroupId, Session, SubgroupId};

/// The (group, subgroup) chosen for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Assignment<'a> {
    pub subject: &'a str,
    pub group: GroupId,
    pub subgroup: SubgroupId,
}

/// One complete assignment of group and subgroup per requested subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    ordinal: u64,
    assignments: Vec<Assignment<'a>>,
    sessions: Vec<&'a Session>,
}

impl<'a> Candidate<'a> {
    /// Creates a candidate.
    ///
    /// `ordinal` is the position of the combination in generation order.
    pub fn new(ordinal: u64, assignments: Vec<Assignment<'a>>, sessions: Vec<&'a Session>) -> Self {
        Self {
            ordinal,
            assignments,
            sessions,
        }
    }

    /// Position in the base iteration order.
    #[inline]
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    /// Assignments in subject request order.
    #[inline]
    pub fn assignments(&self) -> &[Assignment<'a>] {
        &self.assignments
    }

    /// Flattened sessions of every assignment.
    #[inline]
    pub fn sessions(&self) -> &[&'a Session] {
        &self.sessions
    }

    /// Returns true if `subject` is assigned to `group`.
    pub fn contains(&self, subject: &str, group: GroupId) -> bool {
        self.assignments
            .iter()
            .any(|a| a.group == group && a.subject == subject)
    }

    /// Assignment of a subject.
    pub fn assignment(&self, subject: &str) -> Option<&Assignment<'a>> {
        self.assignments.iter().find(|a| a.subject == subject)
    }
}

/// Metrics of a conflict-free candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleMetrics {
    /// Distinct weekdays with at least one class.
    pub weekdays: BTreeSet<u8>,
    /// Idle hours between classes of the same day, summed over the week.
    pub dead_hours: u32,
    /// Distinct group ids across subjects.
    pub group_count: usize,
    /// Distinct subgroup ids across subjects.
    pub subgroup_count: usize,
}

impl ScheduleMetrics {
    /// Number of distinct weekdays.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.weekdays.len()
    }
}

/// A candidate together with its metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatedCandidate<'a> {
    candidate: Candidate<'a>,
    metrics: ScheduleMetrics,
}

impl<'a> RatedCandidate<'a> {
    pub fn new(candidate: Candidate<'a>, metrics: ScheduleMetrics) -> Self {
        Self { candidate, metrics }
    }

    #[inline]
    pub fn candidate(&self) -> &Candidate<'a> {
        &self.candidate
    }

    #[inline]
    pub fn metrics(&self) -> &ScheduleMetrics {
        &self.metrics
    }

    #[inline]
    pub fn ordinal(&self) -> u64 {
        self.candidate.ordinal
    }
}
