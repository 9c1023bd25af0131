//! classgrid - Conflict-free timetable combinations in Rust
//!
//! Pick one group and one subgroup per subject, keep the combinations that
//! do not overlap and respect your constraints, and get them ranked.
//!
//! # Example
//!
//! ```rust
//! use classgrid::prelude::*;
//!
//! let catalog = classgrid::ingest::catalog_from_json(r#"{"results": [
//!     {"codi_assig": "IES", "grup": "10", "inici": "08:00", "durada": 2,
//!      "tipus": "T", "idioma": "Català", "dia_setmana": 1},
//!     {"codi_assig": "XC", "grup": "20", "inici": "10:00", "durada": 2,
//!      "tipus": "T", "idioma": "Anglès", "dia_setmana": 1}
//! ]}"#).unwrap();
//!
//! let config = SearchConfig::new().with_subject("IES").with_subject("XC");
//! let outcome = classgrid::run_search(&config, &catalog).unwrap();
//!
//! assert_eq!(outcome.schedules.len(), 1);
//! assert_eq!(outcome.schedules[0].choice("XC"), Some((20, 21)));
//! ```

// Domain types
pub use classgrid_core::{
    Assignment, Candidate, ClassKind, ClassgridError, Constraints, GroupId, GroupRef, Language,
    LanguageSet, LinkFormat, RatedCandidate, Result, ScheduleMetrics, Session, SortMode,
    SubgroupId, SubjectCatalog, TimeSlot,
};

// Raw class payload normalization
pub use classgrid_core::ingest;

// Configuration
pub use classgrid_config::{ConfigError, SearchConfig};

// Search engine
pub use classgrid_solver::{
    EnforcementTally, PreparedSearch, RejectionStage, Schedule, SearchEngine, SearchOutcome,
    SearchStats, SubjectChoice,
};

/// Building blocks of the search pipeline.
pub mod pipeline {
    pub use classgrid_solver::{
        assembler, conflict, enforcement, filter, generator, metrics, ranking,
    };
}

#[cfg(feature = "console")]
pub use classgrid_console as console;

mod batch;
mod search;

pub use batch::{search_batch, search_batch_with_flag, SearchRequest};
pub use search::{run_search, run_search_with_flag};

pub mod prelude {
    pub use super::{
        ClassKind, Constraints, GroupRef, Language, LanguageSet, LinkFormat, SortMode,
        SubjectCatalog,
    };
    pub use super::{Schedule, SearchConfig, SearchEngine, SearchOutcome};
    pub use super::{ClassgridError, Result};
}
