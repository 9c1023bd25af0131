//! Search statistics.
//!
//! Counters for one search run, filled in as candidates flow through the
//! pipeline.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::enforcement::{EnforcementTally, Verdict};

/// Search-level statistics.
///
/// # Example
///
/// ```
/// use classgrid_solver::enforcement::Verdict;
/// use classgrid_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_conflict();
/// stats.record_verdict(Verdict { day_limit_exceeded: true, dead_hours_exceeded: false });
/// stats.record_verdict(Verdict::default());
///
/// assert_eq!(stats.conflict_rejected, 1);
/// assert_eq!(stats.day_limit_rejected, 1);
/// assert_eq!(stats.survivors, 1);
/// assert_eq!(stats.pre_enforcement(), 2);
/// assert_eq!(stats.tally().day_limit, 1);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    #[serde(skip)]
    start_time: Option<Instant>,
    /// Combinations produced by the generator, whitelist rejections included.
    pub combinations_generated: u64,
    /// Combinations missing a whitelisted group.
    pub whitelist_rejected: u64,
    /// Candidates with overlapping sessions.
    pub conflict_rejected: u64,
    /// Conflict-free candidates handed to enforcement.
    pub conflict_free: u64,
    /// Candidates on too many days.
    pub day_limit_rejected: u64,
    /// Candidates with too many dead hours.
    pub dead_hour_rejected: u64,
    /// Candidates that passed every check.
    pub survivors: u64,
    /// Wall time of the search, set by [`finish`](Self::finish).
    pub elapsed: Duration,
}

impl SearchStats {
    /// Marks the start of the search.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed = start.elapsed();
        }
    }

    /// Returns the elapsed time, live while the search runs.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or(self.elapsed)
    }

    pub fn record_conflict(&mut self) {
        self.conflict_rejected += 1;
    }

    /// Records the enforcement verdict of a conflict-free candidate.
    pub fn record_verdict(&mut self, verdict: Verdict) {
        self.conflict_free += 1;
        if verdict.day_limit_exceeded {
            self.day_limit_rejected += 1;
        }
        if verdict.dead_hours_exceeded {
            self.dead_hour_rejected += 1;
        }
        if verdict.passed() {
            self.survivors += 1;
        }
    }

    /// Rejections per enforcement limit.
    pub fn tally(&self) -> EnforcementTally {
        EnforcementTally::from(self)
    }

    /// Conflict-free candidates seen by enforcement.
    #[inline]
    pub fn pre_enforcement(&self) -> u64 {
        self.conflict_free
    }

    /// Returns the combinations per second rate.
    pub fn combinations_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.combinations_generated as f64 / secs
        } else {
            0.0
        }
    }
}
