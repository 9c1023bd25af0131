//! Subject catalog: subject -> group -> subgroup -> sessions.
//!
//! The catalog is built once per request and then only read. Groups and
//! subgroups are kept in ascending numeric order, which is the order the
//! combination generator walks them in.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::session::{GroupId, Session, SubgroupId};

/// All sessions attended when a given (group, subgroup) pair is chosen.
pub type SessionList = Vec<Session>;

/// Offer of a single subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubjectOffer {
    groups: BTreeMap<GroupId, GroupOffer>,
}

/// Subgroups reachable from one lecture group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupOffer {
    subgroups: BTreeMap<SubgroupId, SessionList>,
}

/// Mapping subject code -> group -> subgroup -> ordered sessions.
///
/// Every stored subgroup holds at least one session: entries only come into
/// existence through [`SubjectCatalog::insert_session`].
///
/// # Examples
///
/// ```
/// use classgrid_core::{ClassKind, Language, Session, SubjectCatalog, TimeSlot};
///
/// let mut catalog = SubjectCatalog::new();
/// catalog.insert_session(Session::new(
///     "IES", 10, 11, ClassKind::Lecture,
///     TimeSlot::new(1, 8, 10).unwrap(), Language::English,
/// ));
///
/// assert!(catalog.contains_group("IES", 10));
/// assert_eq!(catalog.sessions("IES", 10, 11).map(|s| s.len()), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubjectCatalog {
    subjects: BTreeMap<String, SubjectOffer>,
}

impl SubjectCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a session under its subject, group and subgroup.
    ///
    /// Session lists stay ordered by (weekday, start, end); duplicates are
    /// dropped.
    pub fn insert_session(&mut self, session: Session) {
        let list = self
            .subjects
            .entry(session.subject().to_string())
            .or_default()
            .groups
            .entry(session.group())
            .or_default()
            .subgroups
            .entry(session.subgroup())
            .or_default();

        let key = session.order_key();
        match list.binary_search_by(|probe| probe.order_key().cmp(&key)) {
            Ok(_) => {}
            Err(pos) => list.insert(pos, session),
        }
    }

    /// Returns the offer of a subject.
    pub fn subject(&self, code: &str) -> Option<&SubjectOffer> {
        self.subjects.get(code)
    }

    /// Returns true if the subject offers the given group.
    pub fn contains_group(&self, subject: &str, group: GroupId) -> bool {
        self.subject(subject)
            .is_some_and(|offer| offer.groups.contains_key(&group))
    }

    /// Returns the sessions of a (group, subgroup) pair.
    pub fn sessions(
        &self,
        subject: &str,
        group: GroupId,
        subgroup: SubgroupId,
    ) -> Option<&[Session]> {
        self.subject(subject)?
            .group(group)?
            .subgroups
            .get(&subgroup)
            .map(Vec::as_slice)
    }

    /// Iterates over subject codes in ascending order.
    pub fn subject_codes(&self) -> impl Iterator<Item = &str> {
        self.subjects.keys().map(String::as_str)
    }

    /// Iterates over subjects and their offers.
    pub fn iter(&self) -> btree_map::Iter<'_, String, SubjectOffer> {
        self.subjects.iter()
    }

    /// Number of subjects.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Total number of sessions stored, over all pairs.
    pub fn session_count(&self) -> usize {
        self.subjects
            .values()
            .flat_map(|offer| offer.groups.values())
            .flat_map(|group| group.subgroups.values())
            .map(Vec::len)
            .sum()
    }
}

impl FromIterator<Session> for SubjectCatalog {
    fn from_iter<I: IntoIterator<Item = Session>>(iter: I) -> Self {
        let mut catalog = SubjectCatalog::new();
        for session in iter {
            catalog.insert_session(session);
        }
        catalog
    }
}

impl SubjectOffer {
    /// Returns a group of this subject.
    pub fn group(&self, group: GroupId) -> Option<&GroupOffer> {
        self.groups.get(&group)
    }

    /// Iterates over groups in ascending id order.
    pub fn groups(&self) -> btree_map::Iter<'_, GroupId, GroupOffer> {
        self.groups.iter()
    }

    /// Ascending group ids.
    pub fn group_ids(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.groups.keys().copied()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl GroupOffer {
    /// Iterates over subgroups in ascending id order.
    pub fn subgroups(&self) -> btree_map::Iter<'_, SubgroupId, SessionList> {
        self.subgroups.iter()
    }

    pub fn subgroup_count(&self) -> usize {
        self.subgroups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ClassKind, Language, TimeSlot};

    fn session(subject: &str, group: u32, subgroup: u32, day: u8, start: u32, end: u32) -> Session {
        Session::new(
            subject,
            group,
            subgroup,
            ClassKind::Lecture,
            TimeSlot::new(day, start, end).unwrap(),
            Language::Catalan,
        )
    }

    #[test]
    fn test_sessions_are_ordered_and_deduplicated() {
        let catalog: SubjectCatalog = vec![
            session("PAR", 10, 11, 3, 12, 14),
            session("PAR", 10, 11, 1, 8, 10),
            session("PAR", 10, 11, 3, 12, 14),
        ]
        .into_iter()
        .collect();

        let sessions = catalog.sessions("PAR", 10, 11).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].weekday(), 1);
        assert_eq!(sessions[1].weekday(), 3);
        assert_eq!(catalog.session_count(), 2);
    }

    #[test]
    fn test_groups_iterate_ascending() {
        let catalog: SubjectCatalog = vec![
            session("PAR", 30, 31, 1, 8, 9),
            session("PAR", 10, 12, 1, 8, 9),
            session("PAR", 10, 11, 1, 8, 9),
            session("PAR", 20, 21, 1, 8, 9),
        ]
        .into_iter()
        .collect();

        let offer = catalog.subject("PAR").unwrap();
        assert_eq!(offer.group_ids().collect::<Vec<_>>(), vec![10, 20, 30]);
        let subgroups: Vec<_> = offer
            .group(10)
            .unwrap()
            .subgroups()
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(subgroups, vec![11, 12]);
    }

    #[test]
    fn test_lookups_on_missing_entries() {
        let catalog: SubjectCatalog = std::iter::once(session("PAR", 10, 11, 1, 8, 9)).collect();
        assert!(catalog.sessions("PAR", 10, 12).is_none());
        assert!(catalog.sessions("IES", 10, 11).is_none());
        assert!(!catalog.contains_group("PAR", 20));
        assert_eq!(catalog.subject_codes().collect::<Vec<_>>(), vec!["PAR"]);
    }
}
