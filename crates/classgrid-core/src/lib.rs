//! classgrid Core - Core types for timetable combination search
//!
//! This crate provides the fundamental data of a search:
//! - Session and time-slot records
//! - The subject catalog (subject -> group -> subgroup -> sessions)
//! - User constraints and ranking modes
//! - Candidate timetables and their metrics
//! - Normalization of raw class entries

pub mod candidate;
pub mod catalog;
pub mod constraints;
pub mod error;
pub mod ingest;
pub mod link;
pub mod session;

pub use candidate::{Assignment, Candidate, RatedCandidate, ScheduleMetrics};
pub use catalog::{GroupOffer, SessionList, SubjectCatalog, SubjectOffer};
pub use constraints::{Constraints, GroupRef, LanguageSet, SortMode};
pub use error::{ClassgridError, Result};
pub use link::LinkFormat;
pub use session::{
    ClassKind, GroupId, Language, Session, SubgroupId, TimeSlot, FIRST_WEEKDAY, LAST_WEEKDAY,
};
