//! Integration tests from raw class payloads to ranked schedules.

use classgrid::ingest::catalog_from_json;
use classgrid::prelude::*;

const PAYLOAD: &str = r#"{"results": [
    {"codi_assig": "IES", "grup": "10", "inici": "08:00", "durada": 2,
     "tipus": "T", "idioma": "Català", "dia_setmana": 1},
    {"codi_assig": "IES", "grup": 11, "inici": "08:00", "durada": 2,
     "tipus": "L", "idioma": "Català", "dia_setmana": 3},
    {"codi_assig": "IES", "grup": "12", "inici": "11:00", "durada": 2,
     "tipus": "L", "idioma": "Castellà", "dia_setmana": 1},
    {"codi_assig": "XC", "grup": "20", "inici": "12:00", "durada": 2,
     "tipus": "T", "idioma": "Anglès", "dia_setmana": 3},
    {"codi_assig": "XC", "grup": "20", "inici": "09:00", "durada": 1,
     "tipus": "T", "idioma": "Anglès", "dia_setmana": 2},
    {"codi_assig": null, "grup": "30", "inici": "09:00", "durada": 1,
     "tipus": "T", "idioma": "Català", "dia_setmana": 2}
]}"#;

fn catalog() -> SubjectCatalog {
    catalog_from_json(PAYLOAD).unwrap()
}

#[test]
fn test_payload_normalized() {
    let catalog = catalog();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.sessions("IES", 10, 11).map(|s| s.len()), Some(2));
    assert_eq!(catalog.sessions("IES", 10, 12).map(|s| s.len()), Some(2));
    assert_eq!(catalog.sessions("XC", 20, 21).map(|s| s.len()), Some(2));
}

#[test]
fn test_payload_search_ranked() {
    let config = SearchConfig::new()
        .with_subject("ies")
        .with_subject("xc")
        .with_sort_mode(SortMode::DeadHours);
    let outcome = classgrid::run_search(&config, &catalog()).unwrap();

    assert_eq!(outcome.len(), 2);
    let best = outcome.best().unwrap();
    assert_eq!(best.choice("IES"), Some((10, 12)));
    assert_eq!(best.dead_hours, 1);
    assert_eq!(best.day_count, 3);
    assert_eq!(outcome.schedules[1].choice("IES"), Some((10, 11)));
    assert_eq!(outcome.schedules[1].dead_hours, 2);
}

#[test]
fn test_payload_language_filter() {
    let config = SearchConfig::new()
        .with_subject("IES")
        .with_language("Català");
    let outcome = classgrid::run_search(&config, &catalog()).unwrap();

    assert_eq!(outcome.len(), 1);
    assert_eq!(outcome.schedules[0].choice("IES"), Some((10, 11)));
    assert_eq!(outcome.schedules[0].link, "/schedule/?subjects=IES&groups=10&subgroups=11");
}

#[test]
fn test_malformed_payload_rejected() {
    assert!(catalog_from_json("{\"results\": 3}").is_err());
}
