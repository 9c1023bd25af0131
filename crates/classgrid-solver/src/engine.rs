//! Search pipeline: filter, generate, validate, rate, enforce, rank,
//! assemble.
//!
//! A search is prepared once per catalog. Preparation performs every check
//! that can fail a request before any combination is generated; the
//! prepared search then streams surviving candidates lazily.

use std::sync::atomic::{AtomicBool, Ordering};

use classgrid_config::SearchConfig;
use classgrid_core::{
    ClassgridError, Constraints, LinkFormat, RatedCandidate, Result, SubjectCatalog,
};
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::assembler::{assemble, Schedule};
use crate::conflict::find_conflict;
use crate::enforcement::{EnforcementLimits, EnforcementTally, RejectionStage};
use crate::filter::filter_catalog;
use crate::generator::{enumerate_options, CombinationGenerator, Combinations, SubjectOptions};
use crate::metrics::compute_metrics;
use crate::ranking::rank;
use crate::stats::SearchStats;

/// Result of a search.
///
/// An empty `schedules` list is a normal outcome; `pre_enforcement_count`
/// and `dominant_rejection` then tell why.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Schedules, best first.
    pub schedules: Vec<Schedule>,
    /// Conflict-free candidates before the day and dead-hour limits.
    pub pre_enforcement_count: u64,
    pub rejections: EnforcementTally,
    /// Limit that eliminated the most candidates, if any did.
    pub dominant_rejection: Option<RejectionStage>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    /// Best schedule.
    pub fn best(&self) -> Option<&Schedule> {
        self.schedules.first()
    }
}

/// A configured search over any catalog.
///
/// # Examples
///
/// ```
/// use classgrid_core::{ClassKind, Constraints, Language, Session, SubjectCatalog, TimeSlot};
/// use classgrid_solver::SearchEngine;
///
/// let lecture = |subject: &str, group, day, start, end| Session::new(
///     subject, group, group + 1, ClassKind::Lecture,
///     TimeSlot::new(day, start, end).unwrap(), Language::Catalan,
/// );
/// let catalog: SubjectCatalog = [
///     lecture("IES", 10, 1, 8, 10),
///     lecture("IES", 20, 1, 12, 14),
///     lecture("XC", 10, 1, 10, 12),
/// ]
/// .into_iter()
/// .collect();
///
/// let outcome = SearchEngine::new(["IES", "XC"], Constraints::default())
///     .search(&catalog)
///     .unwrap();
///
/// assert_eq!(outcome.len(), 2);
/// assert_eq!(outcome.best().unwrap().dead_hours, 0);
/// ```
#[derive(Debug, Clone)]
pub struct SearchEngine {
    subjects: Vec<String>,
    constraints: Constraints,
    link: LinkFormat,
    limit: Option<usize>,
}

impl SearchEngine {
    /// Creates an engine for `subjects`, in request order.
    pub fn new<I, S>(subjects: I, constraints: Constraints) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subjects: subjects.into_iter().map(Into::into).collect(),
            constraints,
            link: LinkFormat::default(),
            limit: None,
        }
    }

    /// Creates an engine from a search configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClassgridError::Configuration`] if the configuration cannot
    /// be turned into constraints.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let constraints = config
            .to_constraints()
            .map_err(|err| ClassgridError::configuration(err.to_string()))?;
        let mut engine = Self::new(config.subject_codes(), constraints)
            .with_link_format(config.link.clone());
        engine.limit = config.limit;
        Ok(engine)
    }

    pub fn with_link_format(mut self, link: LinkFormat) -> Self {
        self.link = link;
        self
    }

    /// Keeps only the `limit` best schedules.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Validates the request against `catalog` and builds the per-subject
    /// options.
    ///
    /// # Errors
    ///
    /// - [`ClassgridError::Configuration`] for inconsistent constraints or a
    ///   whitelisted group (or its whole subject) the catalog does not offer.
    /// - [`ClassgridError::UnsatisfiableSubjects`] for subjects without any
    ///   valid pair.
    pub fn prepare(&self, catalog: &SubjectCatalog) -> Result<PreparedSearch<'_>> {
        self.constraints.validate(&self.subjects)?;

        for entry in &self.constraints.whitelist {
            if catalog.subject(&entry.subject).is_none() {
                return Err(ClassgridError::configuration(format!(
                    "whitelisted group {} belongs to a subject the catalog does not offer",
                    entry
                )));
            }
            if !catalog.contains_group(&entry.subject, entry.group) {
                return Err(ClassgridError::configuration(format!(
                    "whitelisted group {} is not offered",
                    entry
                )));
            }
        }

        let filtered = filter_catalog(catalog, &self.subjects, &self.constraints)?;
        debug!(
            event = "filter_end",
            subjects = filtered.len(),
            sessions = filtered.session_count(),
            removed_sessions = catalog.session_count().saturating_sub(filtered.session_count()),
        );

        let options = enumerate_options(&filtered, &self.subjects, &self.constraints)?;
        Ok(PreparedSearch {
            engine: self,
            catalog: filtered,
            options,
        })
    }

    /// Runs the full search.
    pub fn search(&self, catalog: &SubjectCatalog) -> Result<SearchOutcome> {
        self.search_with_flag(catalog, None)
    }

    /// Runs the full search, stopping with [`ClassgridError::Cancelled`] as
    /// soon as `terminate` is raised.
    pub fn search_with_flag(
        &self,
        catalog: &SubjectCatalog,
        terminate: Option<&AtomicBool>,
    ) -> Result<SearchOutcome> {
        info!(
            event = "search_start",
            subjects = %self.subjects.join(","),
            start_hour = self.constraints.start_hour,
            end_hour = self.constraints.end_hour,
            max_days = self.constraints.max_days,
            sort_mode = %self.constraints.sort_mode,
        );
        self.prepare(catalog)?.run(terminate)
    }
}

/// A validated request bound to its filtered catalog.
#[derive(Debug)]
pub struct PreparedSearch<'e> {
    engine: &'e SearchEngine,
    catalog: SubjectCatalog,
    options: Vec<SubjectOptions>,
}

impl<'e> PreparedSearch<'e> {
    /// Catalog after window and language filtering.
    pub fn catalog(&self) -> &SubjectCatalog {
        &self.catalog
    }

    pub fn options(&self) -> &[SubjectOptions] {
        &self.options
    }

    pub fn generator(&self) -> CombinationGenerator<'_> {
        CombinationGenerator::new(&self.catalog, &self.options, &self.engine.constraints)
    }

    /// Streams the candidates that pass every check, in generation order.
    pub fn survivors(&self) -> Survivors<'_> {
        self.survivors_with_flag(None)
    }

    /// Like [`survivors`](Self::survivors), stopping once `terminate` is
    /// raised.
    pub fn survivors_with_flag<'a>(&'a self, terminate: Option<&'a AtomicBool>) -> Survivors<'a> {
        let generator = self.generator();
        debug!(
            event = "generation_start",
            combinations = generator.combination_count(),
        );
        let mut stats = SearchStats::default();
        stats.start();
        Survivors {
            combinations: generator.iter(),
            limits: EnforcementLimits::from_constraints(&self.engine.constraints),
            stats,
            terminate,
            cancelled: false,
        }
    }

    /// Collects, ranks, truncates and assembles the survivors.
    pub fn run(&self, terminate: Option<&AtomicBool>) -> Result<SearchOutcome> {
        let engine = self.engine;
        let mut survivors = self.survivors_with_flag(terminate);
        let mut rated: Vec<RatedCandidate<'_>> = survivors.by_ref().collect();

        if survivors.is_cancelled() {
            info!(
                event = "search_cancelled",
                combinations = survivors.combinations.generated(),
            );
            return Err(ClassgridError::Cancelled);
        }
        let stats = survivors.finish();
        let tally = stats.tally();

        rank(&mut rated, engine.constraints.sort_mode);
        if let Some(limit) = engine.limit {
            rated.truncate(limit);
        }
        let schedules: Vec<Schedule> = rated.iter().map(|r| assemble(r, &engine.link)).collect();

        info!(
            event = "search_end",
            combinations = stats.combinations_generated,
            conflicts = stats.conflict_rejected,
            day_limit_rejected = stats.day_limit_rejected,
            dead_hour_rejected = stats.dead_hour_rejected,
            survivors = stats.survivors,
            schedules = schedules.len(),
            duration_ms = stats.elapsed.as_millis() as u64,
        );

        Ok(SearchOutcome {
            schedules,
            pre_enforcement_count: stats.pre_enforcement(),
            rejections: tally,
            dominant_rejection: tally.dominant(),
            stats,
        })
    }
}

/// Lazy stream of candidates that are conflict-free and within the day and
/// dead-hour limits.
#[derive(Debug)]
pub struct Survivors<'a> {
    combinations: Combinations<'a>,
    limits: EnforcementLimits,
    stats: SearchStats,
    terminate: Option<&'a AtomicBool>,
    cancelled: bool,
}

impl<'a> Survivors<'a> {
    /// Returns true if the walk stopped on the termination flag.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Per-limit rejections so far.
    pub fn tally(&self) -> EnforcementTally {
        self.stats.tally()
    }

    /// Statistics so far.
    pub fn stats(&self) -> SearchStats {
        let mut stats = self.stats.clone();
        stats.combinations_generated = self.combinations.generated();
        stats.whitelist_rejected = self.combinations.whitelist_rejected();
        stats
    }

    /// Stops the clock and returns the final counters.
    pub fn finish(self) -> SearchStats {
        let mut stats = self.stats();
        stats.finish();
        stats
    }

    fn should_terminate(&self) -> bool {
        self.terminate
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

impl<'a> Iterator for Survivors<'a> {
    type Item = RatedCandidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cancelled {
                return None;
            }
            if self.should_terminate() {
                self.cancelled = true;
                return None;
            }

            let candidate = self.combinations.next()?;

            if let Some((first, second)) = find_conflict(candidate.sessions()) {
                trace!(
                    event = "conflict",
                    ordinal = candidate.ordinal(),
                    first = %first,
                    second = %second,
                );
                self.stats.record_conflict();
                continue;
            }

            let metrics = compute_metrics(&candidate);
            let verdict = self.limits.check(&metrics);
            self.stats.record_verdict(verdict);
            if !verdict.passed() {
                trace!(
                    event = "enforcement",
                    ordinal = candidate.ordinal(),
                    days = metrics.day_count(),
                    dead_hours = metrics.dead_hours,
                );
                continue;
            }

            return Some(RatedCandidate::new(candidate, metrics));
        }
    }
}
