//! Session helpers and a pair-oriented catalog builder.
//!
//! # Example
//!
//! ```
//! use classgrid_test::CatalogBuilder;
//!
//! let catalog = CatalogBuilder::new()
//!     .pair("X", 10, 11, &[(1, 8, 10)])
//!     .pair("X", 20, 21, &[(1, 8, 10)])
//!     .build();
//! assert_eq!(catalog.subject("X").map(|offer| offer.group_count()), Some(2));
//! ```

use classgrid_core::{
    ClassKind, GroupId, Language, Session, SubgroupId, SubjectCatalog, TimeSlot,
};

/// A weekday plus a half-open hour range, `(weekday, start, end)`.
pub type Slot = (u8, u32, u32);

/// Creates a Catalan lecture session.
///
/// # Panics
///
/// Panics if the slot is invalid.
pub fn lecture(subject: &str, group: GroupId, subgroup: SubgroupId, slot: Slot) -> Session {
    session(subject, group, subgroup, ClassKind::Lecture, slot, Language::Catalan)
}

/// Creates a session of any kind and language.
///
/// # Panics
///
/// Panics if the slot is invalid.
pub fn session(
    subject: &str,
    group: GroupId,
    subgroup: SubgroupId,
    kind: ClassKind,
    (weekday, start, end): Slot,
    language: Language,
) -> Session {
    let slot = TimeSlot::new(weekday, start, end).expect("fixture slot must be valid");
    Session::new(subject, group, subgroup, kind, slot, language)
}

/// Builds catalogs one (group, subgroup) pair at a time.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    catalog: SubjectCatalog,
    language: Language,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    /// Creates an empty builder; pairs are taught in Catalan.
    pub fn new() -> Self {
        Self {
            catalog: SubjectCatalog::new(),
            language: Language::Catalan,
        }
    }

    /// Language of the pairs added next.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Adds one lecture per slot to the pair.
    pub fn pair(mut self, subject: &str, group: GroupId, subgroup: SubgroupId, slots: &[Slot]) -> Self {
        for &slot in slots {
            self.catalog.insert_session(session(
                subject,
                group,
                subgroup,
                ClassKind::Lecture,
                slot,
                self.language,
            ));
        }
        self
    }

    /// Adds a fully specified session.
    pub fn session(mut self, session: Session) -> Self {
        self.catalog.insert_session(session);
        self
    }

    pub fn build(self) -> SubjectCatalog {
        self.catalog
    }
}
