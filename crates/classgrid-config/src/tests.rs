//! Tests for search configuration.

use std::io::Write;

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        subjects = ["PAR", "ies"]
        start_hour = 9
        end_hour = 15
        languages = ["Castellano"]
        require_matching_subgroup = true
        max_days = 3
        whitelist = ["par-10"]
        max_dead_hours = 2
        limit = 20

        [link]
        type = "timetable"
        quadrimester = "2024Q1"
    "#;

    let config = SearchConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.subject_codes(), vec!["PAR", "IES"]);
    assert_eq!(config.limit, Some(20));
    assert!(matches!(
        config.link,
        LinkFormat::Timetable { ref quadrimester, .. } if quadrimester == "2024Q1"
    ));

    let constraints = config.to_constraints().unwrap();
    assert_eq!((constraints.start_hour, constraints.end_hour), (9, 15));
    assert_eq!(constraints.languages, LanguageSet::of([Language::Spanish]));
    assert!(constraints.require_matching_subgroup);
    assert_eq!(constraints.max_days, 3);
    assert_eq!(constraints.whitelisted_group("PAR"), Some(10));
    assert_eq!(constraints.max_dead_hours, Some(2));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        subjects: [IES, XC]
        relax_days: 2
        blacklist:
          - IES-20
          - XC-10
        sort_mode: dead_hours
        link:
          type: query
          base_url: https://timetables.example.org
    "#;

    let config = SearchConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.sort_mode, SortMode::DeadHours);
    assert_eq!(config.link, LinkFormat::query("https://timetables.example.org"));

    let constraints = config.to_constraints().unwrap();
    assert_eq!(constraints.max_days, 3);
    assert!(constraints.blacklist.contains(&GroupRef::new("IES", 20)));
    assert!(constraints.blacklist.contains(&GroupRef::new("XC", 10)));
}

#[test]
fn test_defaults() {
    let config = SearchConfig::from_toml_str("subjects = [\"IES\"]").unwrap();
    let constraints = config.to_constraints().unwrap();
    assert_eq!(constraints, Constraints::default());
    assert_eq!(config.link, LinkFormat::default());
    assert_eq!(config.limit, None);
}

#[test]
fn test_builder() {
    let config = SearchConfig::new()
        .with_subject("IES")
        .with_subject("XC")
        .with_window(10, 18)
        .with_language("en")
        .with_blacklisted("XC-30")
        .with_whitelisted("IES-10")
        .with_max_dead_hours(1)
        .with_limit(5);

    let constraints = config.to_constraints().unwrap();
    assert_eq!(config.subjects.len(), 2);
    assert!(constraints.languages.accepts(Language::English));
    assert!(!constraints.languages.accepts(Language::Catalan));
    assert!(constraints.is_blacklisted("XC", 30));
    assert_eq!(constraints.whitelisted_group("IES"), Some(10));
    assert!(constraints.validate(&config.subject_codes()).is_ok());
}

#[test]
fn test_relax_days_saturates() {
    let mut config = SearchConfig::new();
    config.relax_days = Some(9);
    assert_eq!(config.day_limit().unwrap(), 0);
}

#[test]
fn test_both_day_limits_rejected() {
    let config = SearchConfig::from_toml_str("max_days = 3\nrelax_days = 1").unwrap();
    assert!(matches!(config.to_constraints(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_malformed_entries_rejected() {
    let bad_group = SearchConfig::new().with_blacklisted("IES20");
    assert!(matches!(bad_group.to_constraints(), Err(ConfigError::Invalid(_))));

    let bad_number = SearchConfig::new().with_whitelisted("IES-x");
    assert!(matches!(bad_number.to_constraints(), Err(ConfigError::Invalid(_))));

    let bad_language = SearchConfig::new().with_language("latin");
    assert!(matches!(bad_language.to_constraints(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_toml_type_errors() {
    let err = SearchConfig::from_toml_str("start_hour = \"nine\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_load_from_files() {
    let mut toml_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(toml_file, "subjects = [\"PAR\"]\nend_hour = 14").unwrap();
    let config = SearchConfig::load(toml_file.path()).unwrap();
    assert_eq!(config.end_hour, 14);

    let mut yaml_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(yaml_file, "subjects: [PAR]\nstart_hour: 10").unwrap();
    let config = SearchConfig::from_yaml_file(yaml_file.path()).unwrap();
    assert_eq!(config.start_hour, 10);

    let dir = tempfile::tempdir().unwrap();
    let missing = SearchConfig::load(dir.path().join("missing.toml"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));
}
