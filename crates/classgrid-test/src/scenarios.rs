//! Reference catalogs with known search results.

use classgrid_core::{ClassKind, GroupId, Language, SubgroupId, SubjectCatalog};

use crate::catalog::{session, CatalogBuilder, Slot};

/// Subject `X` with pairs 10/11 and 20/21 (both Monday 8-10) and subject
/// `Y` with pair 30/31 (Tuesday 9-11).
///
/// Requesting `X, Y` yields X10/Y30 and X20/Y30, both on two days with no
/// dead hours.
pub fn scenario_a_catalog() -> SubjectCatalog {
    CatalogBuilder::new()
        .pair("X", 10, 11, &[(1, 8, 10)])
        .pair("X", 20, 21, &[(1, 8, 10)])
        .pair("Y", 30, 31, &[(2, 9, 11)])
        .build()
}

/// Subject `Z` with a single pair meeting Monday 8-10 and Monday 13-15:
/// three dead hours.
pub fn scenario_c_catalog() -> SubjectCatalog {
    CatalogBuilder::new()
        .pair("Z", 10, 11, &[(1, 8, 10), (1, 13, 15)])
        .build()
}

struct Offer {
    subject: &'static str,
    groups: &'static [(GroupId, Language, &'static [Slot])],
    subgroups: &'static [(SubgroupId, ClassKind, Language, &'static [Slot])],
}

const CAMPUS: &[Offer] = &[
    Offer {
        subject: "IES",
        groups: &[
            (10, Language::Catalan, &[(1, 8, 10)]),
            (20, Language::Spanish, &[(2, 10, 12)]),
        ],
        subgroups: &[
            (11, ClassKind::Lab, Language::Catalan, &[(3, 8, 10)]),
            (12, ClassKind::Lab, Language::Catalan, &[(3, 10, 12)]),
            (21, ClassKind::Seminar, Language::English, &[(4, 10, 12)]),
            (22, ClassKind::Lab, Language::Spanish, &[(4, 12, 14)]),
        ],
    },
    Offer {
        subject: "XC",
        groups: &[
            (10, Language::Catalan, &[(1, 10, 12)]),
            (20, Language::English, &[(1, 8, 10)]),
        ],
        subgroups: &[
            (11, ClassKind::Lab, Language::Catalan, &[(2, 8, 10)]),
            (21, ClassKind::Lab, Language::English, &[(5, 12, 14)]),
            (22, ClassKind::Lab, Language::Undetermined, &[(3, 8, 10)]),
        ],
    },
    Offer {
        subject: "PAR",
        groups: &[
            (10, Language::English, &[(4, 15, 17)]),
            (40, Language::Catalan, &[(5, 8, 10)]),
        ],
        subgroups: &[
            (11, ClassKind::Seminar, Language::English, &[(5, 10, 12)]),
            (41, ClassKind::Lab, Language::Catalan, &[(1, 12, 14)]),
            (42, ClassKind::Lab, Language::Spanish, &[(1, 17, 19)]),
        ],
    },
];

/// Three subjects with several families, mixed languages, overlapping
/// sessions and evening classes.
///
/// Every group is paired with every subgroup of its subject: the pair holds
/// the group's lectures plus the subgroup's practical sessions.
pub fn campus_catalog() -> SubjectCatalog {
    let mut builder = CatalogBuilder::new();
    for offer in CAMPUS {
        for &(group, group_language, lectures) in offer.groups {
            for &(subgroup, kind, subgroup_language, practicals) in offer.subgroups {
                for &slot in lectures {
                    builder = builder.session(session(
                        offer.subject,
                        group,
                        subgroup,
                        ClassKind::Lecture,
                        slot,
                        group_language,
                    ));
                }
                for &slot in practicals {
                    builder = builder.session(session(
                        offer.subject,
                        group,
                        subgroup,
                        kind,
                        slot,
                        subgroup_language,
                    ));
                }
            }
        }
    }
    builder.build()
}
