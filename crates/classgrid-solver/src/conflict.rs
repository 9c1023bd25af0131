//! Pairwise overlap check over a candidate's sessions.

use classgrid_core::Session;

/// Returns the first overlapping pair, scanning pairs in list order.
///
/// Sessions of the same subject are checked exactly like sessions of
/// different subjects.
pub fn find_conflict<'a>(sessions: &[&'a Session]) -> Option<(&'a Session, &'a Session)> {
    for (i, first) in sessions.iter().enumerate() {
        for second in &sessions[i + 1..] {
            if first.slot().overlaps(second.slot()) {
                return Some((*first, *second));
            }
        }
    }
    None
}

/// Returns true if any two sessions overlap.
///
/// # Examples
///
/// ```
/// use classgrid_core::{ClassKind, Language, Session, TimeSlot};
/// use classgrid_solver::conflict::has_conflict;
///
/// let lecture = |start, end| Session::new(
///     "IES", 10, 11, ClassKind::Lecture,
///     TimeSlot::new(1, start, end).unwrap(), Language::Catalan,
/// );
/// let (a, b, c) = (lecture(8, 10), lecture(10, 12), lecture(9, 11));
///
/// assert!(!has_conflict(&[&a, &b]));
/// assert!(has_conflict(&[&a, &b, &c]));
/// ```
#[inline]
pub fn has_conflict(sessions: &[&Session]) -> bool {
    find_conflict(sessions).is_some()
}
