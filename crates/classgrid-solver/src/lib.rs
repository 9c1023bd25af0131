//! classgrid Solver - Combination search engine
//!
//! This crate provides the search pipeline:
//! - Catalog filtering by hour window and language
//! - Lazy combination generation with blacklist, whitelist and family rules
//! - Conflict validation and schedule metrics
//! - Day and dead-hour enforcement with rejection diagnostics
//! - Ranking and schedule assembly
//! - Search statistics

pub mod assembler;
pub mod conflict;
pub mod engine;
pub mod enforcement;
pub mod filter;
pub mod generator;
pub mod metrics;
pub mod ranking;
pub mod stats;

pub use assembler::{assemble, schedule_link, Schedule, SubjectChoice};
pub use conflict::{find_conflict, has_conflict};
pub use engine::{PreparedSearch, SearchEngine, SearchOutcome, Survivors};
pub use enforcement::{EnforcementLimits, EnforcementTally, RejectionStage, Verdict};
pub use filter::filter_catalog;
pub use generator::{
    enumerate_options, same_family, Choice, CombinationGenerator, Combinations, SubjectOptions,
};
pub use metrics::{compute_metrics, dead_hours};
pub use ranking::{compare, rank};
pub use stats::SearchStats;
