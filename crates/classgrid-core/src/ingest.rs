//! Normalization of raw class entries into a [`SubjectCatalog`].
//!
//! The scheduling service delivers one entry per class meeting, keyed by a
//! single `grup` number: multiples of ten are lecture groups, everything
//! else is a practical subgroup. A catalog pair (group, subgroup) attends
//! the group's lectures and the subgroup's practical sessions, so entries
//! are first split by id and then merged per pair.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use tracing::debug;

use crate::catalog::SubjectCatalog;
use crate::error::Result;
use crate::session::{ClassKind, GroupId, Language, Session, SubgroupId, TimeSlot};

/// One class meeting as published by the scheduling service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawClassEntry {
    #[serde(rename = "codi_assig", default)]
    pub subject: Option<String>,
    #[serde(rename = "grup", default)]
    pub group: Option<RawGroup>,
    /// Start time, `"HH:MM"`.
    #[serde(rename = "inici", default)]
    pub start: Option<String>,
    /// Duration in hours.
    #[serde(rename = "durada", default)]
    pub duration: u32,
    #[serde(rename = "tipus", default)]
    pub kind: String,
    #[serde(rename = "idioma", default)]
    pub language: String,
    #[serde(rename = "dia_setmana", default)]
    pub weekday: u8,
}

/// The `grup` field, sent either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawGroup {
    Number(u32),
    Text(String),
}

impl RawGroup {
    fn id(&self) -> Option<u32> {
        match self {
            RawGroup::Number(id) => Some(*id),
            RawGroup::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// One page of the service's class listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClassPage {
    #[serde(default)]
    pub results: Vec<RawClassEntry>,
}

/// A valid entry, not yet attributed to a (group, subgroup) pair.
struct Meeting {
    id: u32,
    kind: ClassKind,
    slot: TimeSlot,
    language: Language,
}

impl RawClassEntry {
    fn meeting(&self) -> Option<(&str, Meeting)> {
        let subject = self.subject.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let id = self.group.as_ref().and_then(RawGroup::id)?;
        let start_hour = parse_start_hour(self.start.as_deref()?)?;
        if self.duration == 0 {
            return None;
        }
        let end_hour = start_hour
            .checked_add(self.duration)
            .filter(|&end| end <= HOURS_PER_DAY)?;
        let slot = TimeSlot::new(self.weekday, start_hour, end_hour).ok()?;
        let language = self.language.parse().ok()?;
        Some((
            subject,
            Meeting {
                id,
                kind: ClassKind::from_code(&self.kind),
                slot,
                language,
            },
        ))
    }
}

const HOURS_PER_DAY: u32 = 24;

fn parse_start_hour(start: &str) -> Option<u32> {
    let (hour, minutes) = start.trim().split_once(':')?;
    minutes.trim().parse::<u32>().ok()?;
    hour.trim()
        .parse()
        .ok()
        .filter(|&hour| hour < HOURS_PER_DAY)
}

#[inline]
fn is_group_id(id: u32) -> bool {
    id % 10 == 0
}

#[derive(Default)]
struct SubjectMeetings {
    groups: BTreeMap<GroupId, Vec<Meeting>>,
    subgroups: BTreeMap<SubgroupId, Vec<Meeting>>,
}

impl SubjectMeetings {
    /// Adds the implicit subgroup `g + 1` to groups without a subgroup of
    /// their family, and the implicit group `sg - sg % 10` to orphan
    /// subgroups.
    fn complete(&mut self) {
        let families: BTreeSet<u32> = self.subgroups.keys().map(|sg| sg / 10).collect();
        let lonely: Vec<GroupId> = self
            .groups
            .keys()
            .copied()
            .filter(|g| !families.contains(&(g / 10)))
            .collect();
        for group in lonely {
            self.subgroups.entry(group + 1).or_default();
        }

        let orphans: Vec<GroupId> = self
            .subgroups
            .keys()
            .map(|sg| sg - sg % 10)
            .filter(|g| !self.groups.contains_key(g))
            .collect();
        for group in orphans {
            self.groups.entry(group).or_default();
        }
    }
}

/// Builds a catalog from raw entries, skipping the malformed ones.
///
/// # Examples
///
/// ```
/// use classgrid_core::ingest::catalog_from_json;
///
/// let payload = r#"{"results": [
///     {"codi_assig": "IES", "grup": "10", "inici": "08:00", "durada": 2,
///      "tipus": "T", "idioma": "Català", "dia_setmana": 1},
///     {"codi_assig": "IES", "grup": 11, "inici": "10:00", "durada": 2,
///      "tipus": "L", "idioma": "Català", "dia_setmana": 1}
/// ]}"#;
///
/// let catalog = catalog_from_json(payload).unwrap();
/// assert_eq!(catalog.sessions("IES", 10, 11).map(|s| s.len()), Some(2));
/// ```
pub fn catalog_from_entries<'e, I>(entries: I) -> SubjectCatalog
where
    I: IntoIterator<Item = &'e RawClassEntry>,
{
    let mut subjects: BTreeMap<String, SubjectMeetings> = BTreeMap::new();
    let mut skipped = 0usize;

    for entry in entries {
        let Some((subject, meeting)) = entry.meeting() else {
            debug!(?entry, "Skipping malformed class entry");
            skipped += 1;
            continue;
        };
        let meetings = subjects.entry(subject.to_string()).or_default();
        let bucket = if is_group_id(meeting.id) {
            meetings.groups.entry(meeting.id)
        } else {
            meetings.subgroups.entry(meeting.id)
        };
        bucket.or_default().push(meeting);
    }

    let mut catalog = SubjectCatalog::new();
    for (subject, mut meetings) in subjects {
        meetings.complete();
        for (&group, lectures) in &meetings.groups {
            for (&subgroup, practicals) in &meetings.subgroups {
                for meeting in lectures.iter().chain(practicals) {
                    catalog.insert_session(Session::new(
                        subject.as_str(),
                        group,
                        subgroup,
                        meeting.kind,
                        meeting.slot,
                        meeting.language,
                    ));
                }
            }
        }
    }

    debug!(
        subjects = catalog.len(),
        sessions = catalog.session_count(),
        skipped,
        "Normalized class entries"
    );
    catalog
}

/// Decodes a `{"results": [...]}` page and normalizes it.
pub fn catalog_from_json(payload: &str) -> Result<SubjectCatalog> {
    let page: RawClassPage = serde_json::from_str(payload)?;
    Ok(catalog_from_entries(&page.results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(subject: &str, group: serde_json::Value, day: u8, start: &str, hours: u32) -> RawClassEntry {
        serde_json::from_value(json!({
            "codi_assig": subject,
            "grup": group,
            "inici": start,
            "durada": hours,
            "tipus": "T",
            "idioma": "Anglès",
            "dia_setmana": day,
        }))
        .unwrap()
    }

    #[test]
    fn test_pair_holds_group_and_subgroup_sessions() {
        let entries = vec![
            entry("PAR", json!(10), 1, "08:00", 2),
            entry("PAR", json!("11"), 2, "10:00", 2),
            entry("PAR", json!(12), 3, "10:00", 2),
        ];
        let catalog = catalog_from_entries(&entries);

        let sessions = catalog.sessions("PAR", 10, 11).unwrap();
        assert_eq!(sessions.len(), 2);
        assert!(sessions.iter().all(|s| s.group() == 10 && s.subgroup() == 11));
        assert_eq!(sessions[0].weekday(), 1);
        assert_eq!(sessions[1].weekday(), 2);
        assert_eq!(catalog.sessions("PAR", 10, 12).unwrap()[1].weekday(), 3);
    }

    #[test]
    fn test_lonely_group_gets_implicit_subgroup() {
        let catalog = catalog_from_entries(&[entry("XC", json!(20), 4, "12:00", 2)]);
        let sessions = catalog.sessions("XC", 20, 21).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].start_hour(), 12);
        assert_eq!(sessions[0].end_hour(), 14);
    }

    #[test]
    fn test_orphan_subgroup_gets_implicit_group() {
        let catalog = catalog_from_entries(&[entry("XC", json!(33), 2, "09:00", 1)]);
        assert!(catalog.contains_group("XC", 30));
        assert_eq!(catalog.sessions("XC", 30, 33).unwrap().len(), 1);
    }

    #[test]
    fn test_pairs_span_families() {
        let entries = vec![
            entry("PAR", json!(10), 1, "08:00", 2),
            entry("PAR", json!(20), 1, "10:00", 2),
            entry("PAR", json!(11), 2, "08:00", 2),
            entry("PAR", json!(21), 2, "10:00", 2),
        ];
        let catalog = catalog_from_entries(&entries);
        assert!(catalog.sessions("PAR", 10, 21).is_some());
        assert!(catalog.sessions("PAR", 20, 11).is_some());
        assert_eq!(catalog.subject("PAR").unwrap().group(10).unwrap().subgroup_count(), 2);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let entries = vec![
            entry("PAR", json!("A"), 1, "08:00", 2),
            entry("PAR", json!(10), 1, "8h", 2),
            entry("PAR", json!(10), 1, "08:00", 0),
            entry("PAR", json!(10), 7, "08:00", 2),
            entry("", json!(10), 1, "08:00", 2),
        ];
        assert!(catalog_from_entries(&entries).is_empty());
    }

    #[test]
    fn test_out_of_range_hours_are_skipped() {
        let entries = vec![
            entry("PAR", json!(10), 1, "08:00", u32::MAX),
            entry("PAR", json!(10), 1, "4294967295:00", 2),
            entry("PAR", json!(10), 1, "24:00", 1),
            entry("PAR", json!(10), 1, "22:00", 3),
        ];
        assert!(catalog_from_entries(&entries).is_empty());

        let late = catalog_from_entries(&[entry("PAR", json!(10), 1, "22:00", 2)]);
        assert_eq!(late.sessions("PAR", 10, 11).unwrap()[0].end_hour(), 24);
    }

    #[test]
    fn test_catalog_from_json_reports_payload_errors() {
        let err = catalog_from_json("{\"results\": 3}").unwrap_err();
        assert!(matches!(err, crate::error::ClassgridError::Payload(_)));

        let empty = catalog_from_json("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_kind_and_language_are_mapped() {
        let raw: RawClassEntry = serde_json::from_value(json!({
            "codi_assig": "IES", "grup": 11, "inici": "15:00", "durada": 2,
            "tipus": "L", "idioma": "Per determinar", "dia_setmana": 5,
        }))
        .unwrap();
        let catalog = catalog_from_entries(&[raw]);
        let session = &catalog.sessions("IES", 10, 11).unwrap()[0];
        assert_eq!(session.kind(), ClassKind::Lab);
        assert_eq!(session.language(), Language::Undetermined);
    }
}
