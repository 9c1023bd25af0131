//! Normalized class-session records.
//!
//! A [`Session`] is one weekly class meeting: which subject, group and
//! subgroup it belongs to, what kind of class it is, when it takes place and
//! in which language it is taught. Sessions are immutable once built and
//! validate their invariants on construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ClassgridError, Result};

/// Identifier of a lecture group (e.g. `10`, `20`).
pub type GroupId = u32;

/// Identifier of a practical subgroup (e.g. `11`, `12`).
pub type SubgroupId = u32;

/// First teaching day of the week (Monday).
pub const FIRST_WEEKDAY: u8 = 1;

/// Last teaching day of the week (Friday).
pub const LAST_WEEKDAY: u8 = 5;

/// Kind of class a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    /// Theory class taught to the whole group.
    Lecture,
    /// Laboratory session of a subgroup.
    Lab,
    /// Problem-solving seminar of a subgroup.
    Seminar,
}

impl ClassKind {
    /// Maps the scheduling service's single-letter class type.
    ///
    /// `T` is theory, `L` laboratory and `P` problems. Anything else is
    /// treated as a lecture.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "L" => ClassKind::Lab,
            "P" => ClassKind::Seminar,
            _ => ClassKind::Lecture,
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassKind::Lecture => write!(f, "Lecture"),
            ClassKind::Lab => write!(f, "Lab"),
            ClassKind::Seminar => write!(f, "Seminar"),
        }
    }
}

/// Teaching language of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "ca")]
    Catalan,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "en")]
    English,
    /// Not decided yet. Accepted by every language set.
    #[serde(rename = "undetermined")]
    Undetermined,
}

impl Language {
    /// Two-letter code of the language.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Catalan => "ca",
            Language::Spanish => "es",
            Language::English => "en",
            Language::Undetermined => "undetermined",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Catalan => write!(f, "Catalan"),
            Language::Spanish => write!(f, "Spanish"),
            Language::English => write!(f, "English"),
            Language::Undetermined => write!(f, "Undetermined"),
        }
    }
}

impl FromStr for Language {
    type Err = ClassgridError;

    /// Accepts codes and common spellings in Catalan, Spanish and English.
    ///
    /// ```
    /// use classgrid_core::Language;
    ///
    /// assert_eq!("català".parse::<Language>().unwrap(), Language::Catalan);
    /// assert_eq!("Castellano".parse::<Language>().unwrap(), Language::Spanish);
    /// assert_eq!("en".parse::<Language>().unwrap(), Language::English);
    /// assert!("klingon".parse::<Language>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        let language = match normalized.as_str() {
            "ca" | "cat" | "catala" | "català" | "catalan" | "catalán" => Language::Catalan,
            "es" | "esp" | "castella" | "castellà" | "castellano" | "espanol" | "español"
            | "spanish" => Language::Spanish,
            "en" | "eng" | "english" | "angles" | "anglès" | "anglés" | "ingles" | "inglés" => {
                Language::English
            }
            "" | "per determinar" | "por determinar" | "undetermined" | "tbd" => {
                Language::Undetermined
            }
            _ => {
                return Err(ClassgridError::configuration(format!(
                    "unknown language '{}'",
                    s.trim()
                )))
            }
        };
        Ok(language)
    }
}

/// A weekday plus a half-open hour interval `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeSlot {
    weekday: u8,
    start_hour: u32,
    end_hour: u32,
}

impl TimeSlot {
    /// Creates a slot, checking `1 <= weekday <= 5` and `start < end`.
    ///
    /// ```
    /// use classgrid_core::TimeSlot;
    ///
    /// let monday_morning = TimeSlot::new(1, 8, 10).unwrap();
    /// assert_eq!(monday_morning.duration(), 2);
    /// assert!(TimeSlot::new(6, 8, 10).is_err());
    /// assert!(TimeSlot::new(1, 10, 10).is_err());
    /// ```
    pub fn new(weekday: u8, start_hour: u32, end_hour: u32) -> Result<Self> {
        if !(FIRST_WEEKDAY..=LAST_WEEKDAY).contains(&weekday) {
            return Err(ClassgridError::InvalidSession(format!(
                "weekday {} outside {}..={}",
                weekday, FIRST_WEEKDAY, LAST_WEEKDAY
            )));
        }
        if start_hour >= end_hour {
            return Err(ClassgridError::InvalidSession(format!(
                "start hour {} is not before end hour {}",
                start_hour, end_hour
            )));
        }
        Ok(Self {
            weekday,
            start_hour,
            end_hour,
        })
    }

    #[inline]
    pub fn weekday(&self) -> u8 {
        self.weekday
    }

    #[inline]
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    #[inline]
    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Length of the slot in hours.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.end_hour - self.start_hour
    }

    /// Returns true if both slots fall on the same day and their hour
    /// intervals intersect.
    #[inline]
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.weekday == other.weekday
            && self.start_hour.max(other.start_hour) < self.end_hour.min(other.end_hour)
    }

    /// Returns true if the slot lies entirely inside `[start_hour, end_hour)`.
    #[inline]
    pub fn within(&self, start_hour: u32, end_hour: u32) -> bool {
        self.start_hour >= start_hour && self.end_hour <= end_hour
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {} {:02}:00-{:02}:00",
            self.weekday, self.start_hour, self.end_hour
        )
    }
}

/// One weekly class meeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Session {
    subject: String,
    group: GroupId,
    subgroup: SubgroupId,
    kind: ClassKind,
    #[serde(flatten)]
    slot: TimeSlot,
    language: Language,
}

impl Session {
    /// Creates a session. The slot has already been validated.
    pub fn new(
        subject: impl Into<String>,
        group: GroupId,
        subgroup: SubgroupId,
        kind: ClassKind,
        slot: TimeSlot,
        language: Language,
    ) -> Self {
        Self {
            subject: subject.into(),
            group,
            subgroup,
            kind,
            slot,
            language,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn subgroup(&self) -> SubgroupId {
        self.subgroup
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    pub fn weekday(&self) -> u8 {
        self.slot.weekday
    }

    pub fn start_hour(&self) -> u32 {
        self.slot.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.slot.end_hour
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Copy of this session attributed to another (group, subgroup) pair.
    pub fn reassigned(&self, group: GroupId, subgroup: SubgroupId) -> Self {
        Self {
            group,
            subgroup,
            ..self.clone()
        }
    }

    /// Key used to keep session lists ordered.
    pub(crate) fn order_key(&self) -> (u8, u32, u32, ClassKind, Language) {
        (
            self.slot.weekday,
            self.slot.start_hour,
            self.slot.end_hour,
            self.kind,
            self.language,
        )
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{} {} {} ({})",
            self.subject,
            self.group,
            self.subgroup,
            self.kind,
            self.slot,
            self.language.code()
        )
    }
}
