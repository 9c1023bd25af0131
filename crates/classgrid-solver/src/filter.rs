//! Pruning of the catalog by hour window and language.
//!
//! A subgroup entry is atomic: it survives only if every one of its sessions
//! lies inside the window and is taught in an accepted language.

use classgrid_core::{ClassgridError, Constraints, Result, Session, SubjectCatalog};

/// Restricts the catalog to `subjects`, keeping only the (group, subgroup)
/// pairs whose sessions all satisfy the hour window and language set of
/// `constraints`.
///
/// Groups left without subgroups disappear. Requested subjects left without
/// groups, including subjects missing from the catalog, are reported
/// together in request order.
///
/// # Errors
///
/// Returns [`ClassgridError::UnsatisfiableSubjects`] if any requested subject
/// has no pair left.
///
/// # Examples
///
/// ```
/// use classgrid_core::{ClassKind, Constraints, Language, Session, SubjectCatalog, TimeSlot};
/// use classgrid_solver::filter::filter_catalog;
///
/// let catalog: SubjectCatalog = [
///     Session::new("IES", 10, 11, ClassKind::Lecture, TimeSlot::new(1, 8, 10).unwrap(), Language::Catalan),
///     Session::new("IES", 20, 21, ClassKind::Lecture, TimeSlot::new(1, 18, 20).unwrap(), Language::Catalan),
/// ]
/// .into_iter()
/// .collect();
///
/// let constraints = Constraints::new().with_window(8, 14);
/// let filtered = filter_catalog(&catalog, &["IES".to_string()], &constraints).unwrap();
/// assert!(filtered.contains_group("IES", 10));
/// assert!(!filtered.contains_group("IES", 20));
/// ```
pub fn filter_catalog(
    catalog: &SubjectCatalog,
    subjects: &[String],
    constraints: &Constraints,
) -> Result<SubjectCatalog> {
    let mut filtered = SubjectCatalog::new();
    let mut unsatisfiable = Vec::new();

    for subject in subjects {
        let mut kept = 0usize;
        if let Some(offer) = catalog.subject(subject) {
            for (_, group) in offer.groups() {
                for (_, sessions) in group.subgroups() {
                    if sessions.iter().all(|s| admits(s, constraints)) {
                        for session in sessions {
                            filtered.insert_session(session.clone());
                        }
                        kept += 1;
                    }
                }
            }
        }
        if kept == 0 {
            unsatisfiable.push(subject.clone());
        }
    }

    if unsatisfiable.is_empty() {
        Ok(filtered)
    } else {
        Err(ClassgridError::UnsatisfiableSubjects(unsatisfiable))
    }
}

#[inline]
fn admits(session: &Session, constraints: &Constraints) -> bool {
    session
        .slot()
        .within(constraints.start_hour, constraints.end_hour)
        && constraints.languages.accepts(session.language())
}

#[cfg(test)]
mod tests {
    use super::*;
    use classgrid_core::{ClassKind, Language, LanguageSet};
    use classgrid_test::catalog::session;
    use classgrid_test::{campus_catalog, CatalogBuilder};

    fn subjects(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_subgroup_is_dropped_whole() {
        let catalog = CatalogBuilder::new()
            .pair("A", 10, 11, &[(1, 8, 10), (2, 19, 21)])
            .pair("A", 10, 12, &[(1, 8, 10), (2, 12, 14)])
            .build();
        let constraints = Constraints::new().with_window(8, 20);

        let filtered = filter_catalog(&catalog, &subjects(&["A"]), &constraints).unwrap();
        assert!(filtered.sessions("A", 10, 11).is_none());
        assert_eq!(filtered.sessions("A", 10, 12).unwrap().len(), 2);
    }

    #[test]
    fn test_window_end_is_exclusive_bound_on_start() {
        let catalog = CatalogBuilder::new().pair("A", 10, 11, &[(1, 12, 14)]).build();

        let fits = Constraints::new().with_window(12, 14);
        assert!(filter_catalog(&catalog, &subjects(&["A"]), &fits).is_ok());

        let too_short = Constraints::new().with_window(12, 13);
        assert!(filter_catalog(&catalog, &subjects(&["A"]), &too_short).is_err());
    }

    #[test]
    fn test_language_filter_accepts_undetermined() {
        let catalog = CatalogBuilder::new()
            .session(session("A", 10, 11, ClassKind::Lab, (1, 8, 10), Language::Undetermined))
            .session(session("A", 20, 21, ClassKind::Lab, (1, 8, 10), Language::Spanish))
            .build();
        let constraints =
            Constraints::new().with_languages(LanguageSet::of([Language::English]));

        let filtered = filter_catalog(&catalog, &subjects(&["A"]), &constraints).unwrap();
        assert!(filtered.contains_group("A", 10));
        assert!(!filtered.contains_group("A", 20));
        assert_eq!(catalog.subject("A").map(|offer| offer.group_count()), Some(2));
        assert_eq!(filtered.subject("A").map(|offer| offer.group_count()), Some(1));
    }

    #[test]
    fn test_unrequested_subjects_are_dropped() {
        let catalog = campus_catalog();
        let filtered =
            filter_catalog(&catalog, &subjects(&["PAR"]), &Constraints::default()).unwrap();
        assert_eq!(filtered.subject_codes().collect::<Vec<_>>(), vec!["PAR"]);
    }

    #[test]
    fn test_all_unsatisfiable_subjects_reported_in_request_order() {
        let catalog = campus_catalog();
        let constraints = Constraints::new().with_window(8, 9);

        let err = filter_catalog(&catalog, &subjects(&["XC", "NOPE", "IES"]), &constraints)
            .unwrap_err();
        assert_eq!(err.unsatisfiable_subjects(), ["XC", "NOPE", "IES"]);
    }
}
