//! Day-count and dead-hour limits on rated candidates.

use classgrid_core::{Constraints, ScheduleMetrics};
use serde::Serialize;

use crate::stats::SearchStats;

/// Limits a conflict-free candidate must respect to be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnforcementLimits {
    pub max_days: usize,
    pub max_dead_hours: Option<u32>,
}

impl EnforcementLimits {
    pub fn from_constraints(constraints: &Constraints) -> Self {
        Self {
            max_days: usize::from(constraints.max_days),
            max_dead_hours: constraints.max_dead_hours,
        }
    }

    /// Evaluates both limits.
    ///
    /// ```
    /// use classgrid_core::ScheduleMetrics;
    /// use classgrid_solver::enforcement::EnforcementLimits;
    ///
    /// let limits = EnforcementLimits { max_days: 1, max_dead_hours: Some(0) };
    /// let metrics = ScheduleMetrics {
    ///     weekdays: [1, 2].into_iter().collect(),
    ///     dead_hours: 2,
    ///     ..ScheduleMetrics::default()
    /// };
    ///
    /// let verdict = limits.check(&metrics);
    /// assert!(verdict.day_limit_exceeded && verdict.dead_hours_exceeded);
    /// assert!(!verdict.passed());
    /// ```
    pub fn check(&self, metrics: &ScheduleMetrics) -> Verdict {
        Verdict {
            day_limit_exceeded: metrics.day_count() > self.max_days,
            dead_hours_exceeded: self
                .max_dead_hours
                .is_some_and(|limit| metrics.dead_hours > limit),
        }
    }
}

impl From<&Constraints> for EnforcementLimits {
    fn from(constraints: &Constraints) -> Self {
        Self::from_constraints(constraints)
    }
}

/// Outcome of checking one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verdict {
    pub day_limit_exceeded: bool,
    pub dead_hours_exceeded: bool,
}

impl Verdict {
    #[inline]
    pub fn passed(&self) -> bool {
        !self.day_limit_exceeded && !self.dead_hours_exceeded
    }
}

/// Enforcement stage that eliminated candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionStage {
    DayLimit,
    DeadHourLimit,
}

/// Per-limit rejection counts, read from [`SearchStats`]. A candidate
/// violating both limits is counted under both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnforcementTally {
    pub day_limit: u64,
    pub dead_hour_limit: u64,
}

impl EnforcementTally {
    /// Stage with the most rejections; the day limit wins ties. `None` when
    /// nothing was rejected.
    pub fn dominant(&self) -> Option<RejectionStage> {
        if self.day_limit == 0 && self.dead_hour_limit == 0 {
            None
        } else if self.day_limit >= self.dead_hour_limit {
            Some(RejectionStage::DayLimit)
        } else {
            Some(RejectionStage::DeadHourLimit)
        }
    }
}

impl From<&SearchStats> for EnforcementTally {
    fn from(stats: &SearchStats) -> Self {
        Self {
            day_limit: stats.day_limit_rejected,
            dead_hour_limit: stats.dead_hour_rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(days: &[u8], dead_hours: u32) -> ScheduleMetrics {
        ScheduleMetrics {
            weekdays: days.iter().copied().collect(),
            dead_hours,
            group_count: 1,
            subgroup_count: 1,
        }
    }

    #[test]
    fn test_limits_are_inclusive() {
        let limits = EnforcementLimits {
            max_days: 2,
            max_dead_hours: Some(3),
        };
        assert!(limits.check(&metrics(&[1, 2], 3)).passed());
        assert!(limits.check(&metrics(&[1, 2, 3], 3)).day_limit_exceeded);
        assert!(limits.check(&metrics(&[1], 4)).dead_hours_exceeded);
    }

    #[test]
    fn test_unlimited_dead_hours() {
        let limits = EnforcementLimits::from(&Constraints::default());
        assert_eq!(limits.max_days, 5);
        assert!(limits.check(&metrics(&[1, 2, 3, 4, 5], 40)).passed());
    }

    #[test]
    fn test_tally_counts_each_limit() {
        let mut stats = SearchStats::default();
        stats.record_verdict(Verdict {
            day_limit_exceeded: true,
            dead_hours_exceeded: true,
        });
        stats.record_verdict(Verdict {
            day_limit_exceeded: false,
            dead_hours_exceeded: true,
        });
        stats.record_verdict(Verdict::default());

        let tally = EnforcementTally::from(&stats);
        assert_eq!(tally.day_limit, 1);
        assert_eq!(tally.dead_hour_limit, 2);
        assert_eq!(tally.dominant(), Some(RejectionStage::DeadHourLimit));
    }

    #[test]
    fn test_dominant_ties_go_to_day_limit() {
        let tally = EnforcementTally {
            day_limit: 4,
            dead_hour_limit: 4,
        };
        assert_eq!(tally.dominant(), Some(RejectionStage::DayLimit));
        assert_eq!(EnforcementTally::default().dominant(), None);
    }
}
