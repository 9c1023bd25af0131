//! Configuration system for classgrid.
//!
//! Describe a timetable search in a TOML or YAML file: which subjects to
//! take, the hour window, languages, group preferences and how to rank the
//! results.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use classgrid_config::SearchConfig;
//! use classgrid_core::SortMode;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     subjects = ["ies", "xc"]
//!     start_hour = 9
//!     end_hour = 14
//!     languages = ["català", "en"]
//!     relax_days = 1
//!     blacklist = ["IES-20"]
//!     sort_mode = "dead_hours"
//! "#).unwrap();
//!
//! assert_eq!(config.subject_codes(), vec!["IES", "XC"]);
//! let constraints = config.to_constraints().unwrap();
//! assert_eq!(constraints.max_days, 4);
//! assert_eq!(constraints.sort_mode, SortMode::DeadHours);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use classgrid_config::SearchConfig;
//!
//! let config = SearchConfig::load("search.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use classgrid_core::{
    Constraints, GroupRef, Language, LanguageSet, LinkFormat, SortMode, LAST_WEEKDAY,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// One timetable search request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Subject codes in request order.
    #[serde(default)]
    pub subjects: Vec<String>,

    /// First hour a class may start at.
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,

    /// Hour every class must have ended by.
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,

    /// Accepted languages, by code or name. Empty accepts all.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Only pair groups with subgroups of their own family (`21` with `20`).
    #[serde(default)]
    pub require_matching_subgroup: bool,

    /// Maximum number of days with classes.
    #[serde(default)]
    pub max_days: Option<u8>,

    /// Number of weekdays that may be left free; the day limit becomes
    /// `5 - relax_days`.
    #[serde(default)]
    pub relax_days: Option<u8>,

    /// Excluded groups, as `SUBJECT-GROUP`.
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Mandatory groups, as `SUBJECT-GROUP`.
    #[serde(default)]
    pub whitelist: Vec<String>,

    /// Maximum idle hours between classes over the week.
    #[serde(default)]
    pub max_dead_hours: Option<u32>,

    #[serde(default)]
    pub sort_mode: SortMode,

    /// Maximum number of schedules returned.
    #[serde(default)]
    pub limit: Option<usize>,

    #[serde(default)]
    pub link: LinkFormat,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            subjects: Vec::new(),
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            languages: Vec::new(),
            require_matching_subgroup: false,
            max_days: None,
            relax_days: None,
            blacklist: Vec::new(),
            whitelist: Vec::new(),
            max_dead_hours: None,
            sort_mode: SortMode::default(),
            limit: None,
            link: LinkFormat::default(),
        }
    }
}

fn default_start_hour() -> u32 {
    8
}

fn default_end_hour() -> u32 {
    21
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Adds a subject to the request.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    /// Sets the hour window.
    pub fn with_window(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        self
    }

    /// Adds an accepted language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.push(language.into());
        self
    }

    pub fn with_matching_subgroup(mut self, required: bool) -> Self {
        self.require_matching_subgroup = required;
        self
    }

    /// Sets the maximum number of days with classes.
    pub fn with_max_days(mut self, max_days: u8) -> Self {
        self.max_days = Some(max_days);
        self
    }

    /// Adds an excluded `SUBJECT-GROUP`.
    pub fn with_blacklisted(mut self, group: impl Into<String>) -> Self {
        self.blacklist.push(group.into());
        self
    }

    /// Adds a mandatory `SUBJECT-GROUP`.
    pub fn with_whitelisted(mut self, group: impl Into<String>) -> Self {
        self.whitelist.push(group.into());
        self
    }

    pub fn with_max_dead_hours(mut self, hours: u32) -> Self {
        self.max_dead_hours = Some(hours);
        self
    }

    pub fn with_sort_mode(mut self, sort_mode: SortMode) -> Self {
        self.sort_mode = sort_mode;
        self
    }

    /// Limits the number of schedules returned.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_link(mut self, link: LinkFormat) -> Self {
        self.link = link;
        self
    }

    /// Subject codes, trimmed and upper-cased, in request order.
    pub fn subject_codes(&self) -> Vec<String> {
        self.subjects
            .iter()
            .map(|subject| subject.trim().to_uppercase())
            .collect()
    }

    /// Effective day limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if both `max_days` and `relax_days`
    /// are set.
    pub fn day_limit(&self) -> Result<u8, ConfigError> {
        match (self.max_days, self.relax_days) {
            (Some(_), Some(_)) => Err(ConfigError::Invalid(
                "set either max_days or relax_days, not both".to_string(),
            )),
            (Some(max_days), None) => Ok(max_days),
            (None, Some(relax)) => Ok(LAST_WEEKDAY.saturating_sub(relax)),
            (None, None) => Ok(LAST_WEEKDAY),
        }
    }

    /// Converts into the constraints of a search.
    ///
    /// Parses language names and `SUBJECT-GROUP` entries. Consistency
    /// between constraints and subjects is checked by the search itself.
    pub fn to_constraints(&self) -> Result<Constraints, ConfigError> {
        let languages = self
            .languages
            .iter()
            .map(|name| name.parse::<Language>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;

        let mut constraints = Constraints::new()
            .with_window(self.start_hour, self.end_hour)
            .with_languages(LanguageSet::of(languages))
            .with_matching_subgroup(self.require_matching_subgroup)
            .with_max_days(self.day_limit()?)
            .with_max_dead_hours(self.max_dead_hours)
            .with_sort_mode(self.sort_mode);

        for entry in &self.blacklist {
            constraints = constraints.with_blacklisted(parse_group(entry)?);
        }
        for entry in &self.whitelist {
            constraints = constraints.with_whitelisted(parse_group(entry)?);
        }
        Ok(constraints)
    }
}

fn parse_group(entry: &str) -> Result<GroupRef, ConfigError> {
    entry.parse().map_err(invalid)
}

fn invalid(err: classgrid_core::ClassgridError) -> ConfigError {
    ConfigError::Invalid(err.to_string())
}

#[cfg(test)]
mod tests;
