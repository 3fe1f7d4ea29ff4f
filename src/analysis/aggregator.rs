//! Salary aggregation by experience bracket.
//!
//! This module answers the questions a selection UI asks of a dataset:
//! which countries and languages exist, and what the salary distribution
//! looks like per experience bracket for one (country, language) pair.
//! None of these functions fail; missing data degrades to empty output.

use crate::analysis::stats::compute_stats;
use crate::models::{
    BracketStats, BracketSummary, Dataset, ExperienceBracket, FilterOptions, SalaryRecord,
    SelectionOverview,
};
use std::collections::BTreeSet;
use tracing::debug;

/// List every country in the dataset, ascending.
pub fn list_countries(dataset: &Dataset) -> Vec<String> {
    dataset.countries().map(String::from).collect()
}

/// List languages, ascending and without duplicates.
///
/// With no country this is the union over all countries. An unknown
/// country yields an empty list.
pub fn list_languages(dataset: &Dataset, country: Option<&str>) -> Vec<String> {
    match country {
        Some(country) => dataset
            .languages_in(country)
            .map(|languages| languages.map(String::from).collect())
            .unwrap_or_default(),
        None => dataset
            .all_languages()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect(),
    }
}

/// Whether a (country, language) pair has at least one record.
pub fn has_data(dataset: &Dataset, country: &str, language: &str) -> bool {
    dataset
        .records(country, language)
        .is_some_and(|records| !records.is_empty())
}

/// Option lists for a selection UI.
pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    FilterOptions {
        countries: list_countries(dataset),
        languages: list_languages(dataset, None),
        experience_levels: ExperienceBracket::ALL.to_vec(),
    }
}

/// Group salary values by canonical bracket.
///
/// Records with an unknown bracket label are dropped.
fn group_by_bracket(records: &[SalaryRecord]) -> [Vec<f64>; 6] {
    let mut grouped: [Vec<f64>; 6] = Default::default();
    let mut dropped = 0usize;

    for record in records {
        match record.bracket() {
            Some(bracket) => grouped[bracket.index()].push(record.value),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!("Dropped {} records with unknown experience bracket", dropped);
    }

    grouped
}

/// Aggregate one (country, language) pair into per-bracket statistics.
///
/// Always returns one entry per [`ExperienceBracket`], in canonical order.
/// Brackets without records, and pairs missing from the dataset, produce
/// zero-valued stats.
pub fn aggregate(dataset: &Dataset, country: &str, language: &str) -> Vec<BracketSummary> {
    let records = dataset.records(country, language).unwrap_or_default();
    let grouped = group_by_bracket(records);

    ExperienceBracket::ALL
        .into_iter()
        .zip(grouped.iter())
        .map(|(bracket, values)| BracketSummary {
            bracket,
            stats: compute_stats(values),
        })
        .collect()
}

/// Headline figures over aggregated rows.
pub fn summarize(rows: &[BracketSummary]) -> SelectionOverview {
    let total_responses = rows.iter().map(|r| r.stats.count).sum();

    let populated: Vec<&BracketSummary> = rows.iter().filter(|r| !r.stats.is_empty()).collect();

    let average_median = if populated.is_empty() {
        0.0
    } else {
        populated.iter().map(|r| r.stats.median).sum::<f64>() / populated.len() as f64
    };

    let top_percentile75 = populated
        .iter()
        .map(|r| r.stats.percentile75)
        .fold(0.0_f64, f64::max);

    // First bracket wins on equal medians
    let highest_paying = populated
        .iter()
        .copied()
        .fold(None::<&BracketSummary>, |best, row| match best {
            Some(b) if b.stats.median >= row.stats.median => Some(b),
            _ => Some(row),
        })
        .copied();

    SelectionOverview {
        total_responses,
        average_median,
        top_percentile75,
        highest_paying,
    }
}

/// Stats for a single bracket out of an aggregation.
pub fn stats_for(rows: &[BracketSummary], bracket: ExperienceBracket) -> BracketStats {
    rows.iter()
        .find(|r| r.bracket == bracket)
        .map(|r| r.stats)
        .unwrap_or_default()
}
