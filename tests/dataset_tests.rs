//! End-to-end checks over the bundled survey fixture.

use salary_explorer::analysis::{
    aggregate, filter_options, has_data, list_countries, list_languages, stats_for, summarize,
};
use salary_explorer::error::LoadError;
use salary_explorer::loader::{load_dataset, LoadOptions};
use salary_explorer::models::{BracketStats, Dataset, ExperienceBracket, Selection};
use std::path::Path;

fn fixture_path() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/survey_sample.json"))
}

fn load_fixture() -> Dataset {
    load_dataset(fixture_path(), &LoadOptions::default()).expect("fixture should load")
}

#[test]
fn test_fixture_skips_misplaced_record() {
    let dataset = load_fixture();
    // the Austria record filed under Germany/Rust is dropped
    assert_eq!(dataset.records("Germany", "Rust").map(<[_]>::len), Some(9));
    assert_eq!(dataset.record_count(), 9 + 5 + 2);
}

#[test]
fn test_fixture_strict_mode_rejects_misplaced_record() {
    let err = load_dataset(fixture_path(), &LoadOptions { strict: true }).unwrap_err();
    assert!(matches!(err, LoadError::MisplacedRecord { .. }));
}

#[test]
fn test_discovery() {
    let dataset = load_fixture();
    assert_eq!(list_countries(&dataset), vec!["Brazil", "Germany", "Poland"]);
    assert_eq!(
        list_languages(&dataset, None),
        vec!["Go", "Java", "Python", "Rust"]
    );
    assert_eq!(list_languages(&dataset, Some("Germany")), vec!["Python", "Rust"]);
    assert!(list_languages(&dataset, Some("Peru")).is_empty());

    let options = filter_options(&dataset);
    assert_eq!(options.experience_levels, ExperienceBracket::ALL.to_vec());
}

#[test]
fn test_germany_rust_brackets() {
    let dataset = load_fixture();
    let rows = aggregate(&dataset, "Germany", "Rust");
    assert_eq!(rows.len(), 6);

    let mid = stats_for(&rows, ExperienceBracket::ThreeToFive);
    assert_eq!(mid.count, 2);
    assert_eq!((mid.min, mid.median, mid.max), (80.0, 90.0, 100.0));

    // inserted out of order: 10, 40, 30, 20
    let senior = stats_for(&rows, ExperienceBracket::SixToTen);
    assert_eq!(senior.count, 4);
    assert_eq!(senior.min, 10.0);
    assert_eq!(senior.percentile25, 17.5);
    assert_eq!(senior.median, 25.0);
    assert_eq!(senior.percentile75, 32.5);
    assert_eq!(senior.max, 40.0);

    let veteran = stats_for(&rows, ExperienceBracket::SixteenPlus);
    assert_eq!(veteran.count, 1);
    assert_eq!(veteran.percentile25, 42.0);
    assert_eq!(veteran.percentile75, 42.0);

    assert_eq!(
        stats_for(&rows, ExperienceBracket::LessThanOne),
        BracketStats::default()
    );

    // the "never programmed" response has no canonical bracket
    let counted: usize = rows.iter().map(|r| r.stats.count).sum();
    assert_eq!(counted, 8);
}

#[test]
fn test_every_selection_yields_six_monotonic_rows() {
    let dataset = load_fixture();
    let mut countries = list_countries(&dataset);
    countries.push("Atlantis".to_string());
    let mut languages = list_languages(&dataset, None);
    languages.push("Brainfuck".to_string());

    for country in &countries {
        for language in &languages {
            let rows = aggregate(&dataset, country, language);
            assert_eq!(rows.len(), 6);

            for (row, bracket) in rows.iter().zip(ExperienceBracket::ALL) {
                assert_eq!(row.bracket, bracket);
                let s = row.stats;
                assert!(s.min <= s.percentile25 && s.percentile25 <= s.median);
                assert!(s.median <= s.percentile75 && s.percentile75 <= s.max);
            }

            if !has_data(&dataset, country, language) {
                assert!(rows.iter().all(|r| r.stats == BracketStats::default()));
            }
            assert_eq!(rows, aggregate(&dataset, country, language));
        }
    }
}

#[test]
fn test_empty_language_block() {
    let dataset = load_fixture();
    assert!(!has_data(&dataset, "Poland", "Go"));
    assert_eq!(summarize(&aggregate(&dataset, "Poland", "Go")).total_responses, 0);
}

#[test]
fn test_default_selection() {
    let dataset = load_fixture();
    assert_eq!(Selection::default_for(&dataset), Selection::new("Brazil", "Go"));
}
