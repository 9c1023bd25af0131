//! Lazy enumeration of group/subgroup combinations.
//!
//! Options are enumerated per subject first; the Cartesian product across
//! subjects is then walked by an odometer: the last subject varies fastest,
//! groups and subgroups in ascending order. Nothing is materialized beyond
//! the current combination.

use std::iter::FusedIterator;

use classgrid_core::{
    Assignment, Candidate, ClassgridError, Constraints, GroupId, Result, Session, SubgroupId,
    SubjectCatalog,
};

/// One (group, subgroup) pair available for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Choice {
    pub group: GroupId,
    pub subgroup: SubgroupId,
}

/// Pairs available for one subject, in ascending (group, subgroup) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectOptions {
    pub subject: String,
    pub choices: Vec<Choice>,
}

/// Returns true if the subgroup belongs to the group's family (`21` and
/// `20`, `33` and `30`).
///
/// ```
/// use classgrid_solver::generator::same_family;
///
/// assert!(same_family(20, 21));
/// assert!(!same_family(10, 21));
/// ```
#[inline]
pub fn same_family(group: GroupId, subgroup: SubgroupId) -> bool {
    group / 10 == subgroup / 10
}

/// Lists the pairs of each requested subject that survive the blacklist and,
/// when required, the family rule.
///
/// # Errors
///
/// Returns [`ClassgridError::UnsatisfiableSubjects`] naming every subject
/// left without pairs or whose whitelisted group has no pair left.
pub fn enumerate_options(
    catalog: &SubjectCatalog,
    subjects: &[String],
    constraints: &Constraints,
) -> Result<Vec<SubjectOptions>> {
    let mut options = Vec::with_capacity(subjects.len());
    let mut unsatisfiable = Vec::new();

    for subject in subjects {
        let mut choices = Vec::new();
        if let Some(offer) = catalog.subject(subject) {
            for (&group, group_offer) in offer.groups() {
                if constraints.is_blacklisted(subject, group) {
                    continue;
                }
                for (&subgroup, _) in group_offer.subgroups() {
                    if constraints.require_matching_subgroup && !same_family(group, subgroup) {
                        continue;
                    }
                    choices.push(Choice { group, subgroup });
                }
            }
        }

        let whitelist_reachable = constraints
            .whitelisted_group(subject)
            .map_or(true, |group| choices.iter().any(|c| c.group == group));

        if choices.is_empty() || !whitelist_reachable {
            unsatisfiable.push(subject.clone());
        } else {
            options.push(SubjectOptions {
                subject: subject.clone(),
                choices,
            });
        }
    }

    if unsatisfiable.is_empty() {
        Ok(options)
    } else {
        Err(ClassgridError::UnsatisfiableSubjects(unsatisfiable))
    }
}

/// Restartable source of candidates.
///
/// Every call to [`iter`](Self::iter) starts a fresh walk from the first
/// combination.
#[derive(Debug, Clone)]
pub struct CombinationGenerator<'a> {
    catalog: &'a SubjectCatalog,
    options: &'a [SubjectOptions],
    required: Vec<Option<GroupId>>,
}

impl<'a> CombinationGenerator<'a> {
    /// Creates a generator over `options`, whose pairs must exist in
    /// `catalog`. Combinations missing a whitelisted group of `constraints`
    /// are skipped.
    pub fn new(
        catalog: &'a SubjectCatalog,
        options: &'a [SubjectOptions],
        constraints: &Constraints,
    ) -> Self {
        let required = options
            .iter()
            .map(|o| constraints.whitelisted_group(&o.subject))
            .collect();
        Self {
            catalog,
            options,
            required,
        }
    }

    /// Size of the full Cartesian product, before the whitelist check.
    pub fn combination_count(&self) -> u64 {
        if self.options.is_empty() {
            return 0;
        }
        self.options
            .iter()
            .fold(1u64, |acc, o| acc.saturating_mul(o.choices.len() as u64))
    }

    /// Starts a new walk.
    pub fn iter(&self) -> Combinations<'a> {
        let exhausted = self.options.is_empty() || self.options.iter().any(|o| o.choices.is_empty());
        Combinations {
            catalog: self.catalog,
            options: self.options,
            required: self.required.clone(),
            cursor: vec![0; self.options.len()],
            exhausted,
            generated: 0,
            whitelist_rejected: 0,
        }
    }
}

impl<'a> IntoIterator for &CombinationGenerator<'a> {
    type Item = Candidate<'a>;
    type IntoIter = Combinations<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Odometer over the combinations of a [`CombinationGenerator`].
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    catalog: &'a SubjectCatalog,
    options: &'a [SubjectOptions],
    required: Vec<Option<GroupId>>,
    cursor: Vec<usize>,
    exhausted: bool,
    generated: u64,
    whitelist_rejected: u64,
}

impl<'a> Combinations<'a> {
    /// Combinations visited so far, including whitelist rejections.
    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Combinations skipped for missing a whitelisted group.
    pub fn whitelist_rejected(&self) -> u64 {
        self.whitelist_rejected
    }

    fn advance(&mut self) {
        for position in (0..self.cursor.len()).rev() {
            self.cursor[position] += 1;
            if self.cursor[position] < self.options[position].choices.len() {
                return;
            }
            self.cursor[position] = 0;
        }
        self.exhausted = true;
    }

    fn satisfies_whitelist(&self) -> bool {
        self.required
            .iter()
            .zip(&self.cursor)
            .zip(self.options)
            .all(|((required, &index), options)| {
                required.map_or(true, |group| options.choices[index].group == group)
            })
    }

    fn build(&self, ordinal: u64) -> Candidate<'a> {
        let catalog: &'a SubjectCatalog = self.catalog;
        let all_options: &'a [SubjectOptions] = self.options;
        let mut assignments = Vec::with_capacity(all_options.len());
        let mut sessions: Vec<&'a Session> = Vec::new();
        for (options, &index) in all_options.iter().zip(&self.cursor) {
            let choice = options.choices[index];
            assignments.push(Assignment {
                subject: options.subject.as_str(),
                group: choice.group,
                subgroup: choice.subgroup,
            });
            sessions.extend(
                catalog
                    .sessions(&options.subject, choice.group, choice.subgroup)
                    .unwrap_or_default(),
            );
        }
        Candidate::new(ordinal, assignments, sessions)
    }
}

impl<'a> Iterator for Combinations<'a> {
    type Item = Candidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            let ordinal = self.generated;
            self.generated += 1;
            let candidate = self.satisfies_whitelist().then(|| self.build(ordinal));
            self.advance();
            match candidate {
                Some(candidate) => return Some(candidate),
                None => self.whitelist_rejected += 1,
            }
        }
        None
    }
}

impl FusedIterator for Combinations<'_> {}
