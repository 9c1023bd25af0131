//! Constraints value object for a timetable search.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ClassgridError, Result};
use crate::session::{GroupId, Language, LAST_WEEKDAY};

/// A (subject, group) pair, as used by blacklists and whitelists.
///
/// Parses from the `SUBJECT-GROUP` notation; the subject is upper-cased.
///
/// ```
/// use classgrid_core::GroupRef;
///
/// let r: GroupRef = "ies-20".parse().unwrap();
/// assert_eq!(r.subject, "IES");
/// assert_eq!(r.group, 20);
/// assert_eq!(r.to_string(), "IES-20");
/// assert!("IES20".parse::<GroupRef>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupRef {
    pub subject: String,
    pub group: GroupId,
}

impl GroupRef {
    pub fn new(subject: impl Into<String>, group: GroupId) -> Self {
        Self {
            subject: subject.into(),
            group,
        }
    }
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.subject, self.group)
    }
}

impl FromStr for GroupRef {
    type Err = ClassgridError;

    fn from_str(s: &str) -> Result<Self> {
        let (subject, group) = s.trim().rsplit_once('-').ok_or_else(|| {
            ClassgridError::configuration(format!("expected SUBJECT-GROUP, got '{}'", s))
        })?;
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(ClassgridError::configuration(format!(
                "missing subject in '{}'",
                s
            )));
        }
        let group = group.trim().parse::<GroupId>().map_err(|_| {
            ClassgridError::configuration(format!("group in '{}' is not a number", s))
        })?;
        Ok(GroupRef::new(subject.to_uppercase(), group))
    }
}

/// Set of accepted teaching languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageSet {
    /// Every language is accepted.
    #[default]
    All,
    /// Only these languages (plus undetermined ones).
    Only(BTreeSet<Language>),
}

impl LanguageSet {
    /// Builds a set from explicit languages. An empty list accepts all.
    pub fn of(languages: impl IntoIterator<Item = Language>) -> Self {
        let set: BTreeSet<Language> = languages.into_iter().collect();
        if set.is_empty() {
            LanguageSet::All
        } else {
            LanguageSet::Only(set)
        }
    }

    /// Returns true if a session taught in `language` is acceptable.
    pub fn accepts(&self, language: Language) -> bool {
        match self {
            LanguageSet::All => true,
            LanguageSet::Only(set) => language == Language::Undetermined || set.contains(&language),
        }
    }
}

/// How surviving schedules are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Fewest distinct groups, then subgroups, then dead hours.
    #[default]
    GroupCount,
    /// Fewest dead hours, then distinct groups.
    DeadHours,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::GroupCount => write!(f, "group_count"),
            SortMode::DeadHours => write!(f, "dead_hours"),
        }
    }
}

impl FromStr for SortMode {
    type Err = ClassgridError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "group_count" | "groups" => Ok(SortMode::GroupCount),
            "dead_hours" | "dead-hours" => Ok(SortMode::DeadHours),
            other => Err(ClassgridError::configuration(format!(
                "unknown sort mode '{}'",
                other
            ))),
        }
    }
}

/// Fully populated constraints of one search request.
///
/// # Examples
///
/// ```
/// use classgrid_core::{Constraints, GroupRef, SortMode};
///
/// let constraints = Constraints::new()
///     .with_window(9, 14)
///     .with_max_days(4)
///     .with_blacklisted(GroupRef::new("IES", 20))
///     .with_sort_mode(SortMode::DeadHours);
///
/// let subjects = vec!["IES".to_string()];
/// assert!(constraints.validate(&subjects).is_ok());
/// assert!(constraints.is_blacklisted("IES", 20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    /// First hour a class may start at.
    pub start_hour: u32,
    /// Hour by which every class must have ended (exclusive bound).
    pub end_hour: u32,
    /// Accepted teaching languages.
    pub languages: LanguageSet,
    /// Restrict subgroups to the family of the chosen group.
    pub require_matching_subgroup: bool,
    /// Maximum number of distinct weekdays with classes.
    pub max_days: u8,
    /// Groups that must never be chosen.
    pub blacklist: BTreeSet<GroupRef>,
    /// Groups that must be part of every result.
    pub whitelist: BTreeSet<GroupRef>,
    /// Maximum dead hours per week (`None` = unlimited).
    pub max_dead_hours: Option<u32>,
    /// Ranking of the results.
    pub sort_mode: SortMode,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 21,
            languages: LanguageSet::All,
            require_matching_subgroup: false,
            max_days: LAST_WEEKDAY,
            blacklist: BTreeSet::new(),
            whitelist: BTreeSet::new(),
            max_dead_hours: None,
            sort_mode: SortMode::GroupCount,
        }
    }
}

impl Constraints {
    /// Creates the default constraints: 8h-21h, every language, five days.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        self
    }

    pub fn with_languages(mut self, languages: LanguageSet) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_matching_subgroup(mut self, required: bool) -> Self {
        self.require_matching_subgroup = required;
        self
    }

    pub fn with_max_days(mut self, max_days: u8) -> Self {
        self.max_days = max_days;
        self
    }

    pub fn with_blacklisted(mut self, group: GroupRef) -> Self {
        self.blacklist.insert(group);
        self
    }

    pub fn with_whitelisted(mut self, group: GroupRef) -> Self {
        self.whitelist.insert(group);
        self
    }

    pub fn with_max_dead_hours(mut self, max_dead_hours: Option<u32>) -> Self {
        self.max_dead_hours = max_dead_hours;
        self
    }

    pub fn with_sort_mode(mut self, sort_mode: SortMode) -> Self {
        self.sort_mode = sort_mode;
        self
    }

    /// Returns true if (subject, group) may not be chosen.
    pub fn is_blacklisted(&self, subject: &str, group: GroupId) -> bool {
        self.blacklist
            .iter()
            .any(|r| r.group == group && r.subject == subject)
    }

    /// Whitelisted group of a subject, if any.
    pub fn whitelisted_group(&self, subject: &str) -> Option<GroupId> {
        self.whitelist
            .iter()
            .find(|r| r.subject == subject)
            .map(|r| r.group)
    }

    /// Checks the constraints against the requested subjects.
    ///
    /// Catalog-dependent checks (does a whitelisted group exist at all) are
    /// left to the search engine.
    pub fn validate(&self, subjects: &[String]) -> Result<()> {
        if subjects.is_empty() {
            return Err(ClassgridError::configuration("no subjects requested"));
        }
        let mut seen = HashSet::new();
        for subject in subjects {
            if !seen.insert(subject.as_str()) {
                return Err(ClassgridError::configuration(format!(
                    "subject {} requested more than once",
                    subject
                )));
            }
        }
        if self.start_hour >= self.end_hour {
            return Err(ClassgridError::configuration(format!(
                "start hour {} must be before end hour {}",
                self.start_hour, self.end_hour
            )));
        }
        if self.max_days < 1 {
            return Err(ClassgridError::configuration(
                "maximum number of days must be at least 1",
            ));
        }

        let mut whitelisted: BTreeMap<&str, GroupId> = BTreeMap::new();
        for entry in &self.whitelist {
            if !seen.contains(entry.subject.as_str()) {
                return Err(ClassgridError::configuration(format!(
                    "whitelisted group {} belongs to a subject that was not requested",
                    entry
                )));
            }
            if self.blacklist.contains(entry) {
                return Err(ClassgridError::configuration(format!(
                    "group {} is both whitelisted and blacklisted",
                    entry
                )));
            }
            if let Some(previous) = whitelisted.insert(&entry.subject, entry.group) {
                return Err(ClassgridError::configuration(format!(
                    "subject {} has two whitelisted groups ({} and {})",
                    entry.subject, previous, entry.group
                )));
            }
        }
        Ok(())
    }
}
