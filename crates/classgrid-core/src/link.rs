//! Deep-link formats for assembled schedules.

use serde::{Deserialize, Serialize};

/// Base path of the default query-style link. Empty yields a
/// site-relative link (`/schedule/?...`).
pub const DEFAULT_BASE_URL: &str = "";

/// Base path of the public timetable viewer.
pub const TIMETABLE_BASE_URL: &str = "https://www.fib.upc.edu/en/studies/bachelors-degrees/bachelor-degree-informatics-engineering/timetables";

/// How the deep link of a schedule is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkFormat {
    /// `{base}/schedule/?subjects=A,B&groups=g1,g2&subgroups=s1,s2`
    Query {
        #[serde(default = "default_base_url")]
        base_url: String,
    },

    /// `{base}?&class=true&lang=true&quad={q}&a=A_g1&a=A_s1...`
    Timetable {
        #[serde(default = "timetable_base_url")]
        base_url: String,
        quadrimester: String,
    },
}

impl Default for LinkFormat {
    fn default() -> Self {
        LinkFormat::Query {
            base_url: default_base_url(),
        }
    }
}

impl LinkFormat {
    /// Query-style link rooted at `base_url`.
    pub fn query(base_url: impl Into<String>) -> Self {
        LinkFormat::Query {
            base_url: base_url.into(),
        }
    }

    /// Timetable-viewer link for a quadrimester such as `2024Q1`.
    pub fn timetable(quadrimester: impl Into<String>) -> Self {
        LinkFormat::Timetable {
            base_url: timetable_base_url(),
            quadrimester: quadrimester.into(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn timetable_base_url() -> String {
    TIMETABLE_BASE_URL.to_string()
}
