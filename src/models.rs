//! Data models for the salary explorer.
//!
//! This module contains the core data structures shared by the loader,
//! the aggregator and the report generator: salary records, the nested
//! dataset, experience brackets and the derived statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Experience bracket a survey response falls into.
///
/// Variants are declared in canonical display order, so the derived
/// `Ord` matches the order brackets appear in every aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExperienceBracket {
    #[serde(rename = "Less than 1 year")]
    LessThanOne,
    #[serde(rename = "1–2 years")]
    OneToTwo,
    #[serde(rename = "3–5 years")]
    ThreeToFive,
    #[serde(rename = "6–10 years")]
    SixToTen,
    #[serde(rename = "11–15 years")]
    ElevenToFifteen,
    #[serde(rename = "More than 16 years")]
    SixteenPlus,
}

impl ExperienceBracket {
    /// All brackets in canonical order.
    pub const ALL: [ExperienceBracket; 6] = [
        ExperienceBracket::LessThanOne,
        ExperienceBracket::OneToTwo,
        ExperienceBracket::ThreeToFive,
        ExperienceBracket::SixToTen,
        ExperienceBracket::ElevenToFifteen,
        ExperienceBracket::SixteenPlus,
    ];

    /// The exact label used for this bracket in the survey dataset.
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceBracket::LessThanOne => "Less than 1 year",
            ExperienceBracket::OneToTwo => "1–2 years",
            ExperienceBracket::ThreeToFive => "3–5 years",
            ExperienceBracket::SixToTen => "6–10 years",
            ExperienceBracket::ElevenToFifteen => "11–15 years",
            ExperienceBracket::SixteenPlus => "More than 16 years",
        }
    }

    /// Short axis label, e.g. `<1y`, `3-5y`, `16+y`.
    pub fn short_label(&self) -> &'static str {
        match self {
            ExperienceBracket::LessThanOne => "<1y",
            ExperienceBracket::OneToTwo => "1-2y",
            ExperienceBracket::ThreeToFive => "3-5y",
            ExperienceBracket::SixToTen => "6-10y",
            ExperienceBracket::ElevenToFifteen => "11-15y",
            ExperienceBracket::SixteenPlus => "16+y",
        }
    }

    /// Map a dataset label onto a canonical bracket.
    ///
    /// Matching is exact; anything else returns `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }

    /// Position of this bracket in the canonical order.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ExperienceBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unit the dataset's salary values are expressed in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SalaryUnit {
    /// Values are already in thousands of USD (default)
    #[default]
    Thousands,
    /// Values are raw USD amounts
    Usd,
}

/// A single salary response from the survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Annual gross salary, in the dataset's unit.
    pub value: f64,
    /// Country the respondent works in.
    pub country: String,
    /// Primary programming language.
    pub language: String,
    /// Raw experience label as found in the dataset.
    pub experience_bracket: String,
}

impl SalaryRecord {
    pub fn new(
        value: f64,
        country: impl Into<String>,
        language: impl Into<String>,
        experience_bracket: impl Into<String>,
    ) -> Self {
        Self {
            value,
            country: country.into(),
            language: language.into(),
            experience_bracket: experience_bracket.into(),
        }
    }

    /// The canonical bracket for this record, if its label is known.
    pub fn bracket(&self) -> Option<ExperienceBracket> {
        ExperienceBracket::from_label(&self.experience_bracket)
    }
}

type LanguageMap = BTreeMap<String, Vec<SalaryRecord>>;

/// All salary records, indexed by country and then by language.
///
/// Records can only enter through [`Dataset::insert`], which files each
/// record under its own `country` and `language`, so the index always
/// agrees with the records it holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    countries: BTreeMap<String, LanguageMap>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record under its own country and language.
    pub fn insert(&mut self, record: SalaryRecord) {
        self.countries
            .entry(record.country.clone())
            .or_default()
            .entry(record.language.clone())
            .or_default()
            .push(record);
    }

    /// Registers a (country, language) pair even if it ends up with no records.
    pub fn insert_pair(&mut self, country: &str, language: &str) {
        self.countries
            .entry(country.to_string())
            .or_default()
            .entry(language.to_string())
            .or_default();
    }

    /// Records for a (country, language) pair, if the pair exists.
    pub fn records(&self, country: &str, language: &str) -> Option<&[SalaryRecord]> {
        self.countries
            .get(country)
            .and_then(|languages| languages.get(language))
            .map(Vec::as_slice)
    }

    /// Country names in ascending order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    /// Language names for one country in ascending order.
    pub fn languages_in(&self, country: &str) -> Option<impl Iterator<Item = &str>> {
        self.countries
            .get(country)
            .map(|languages| languages.keys().map(String::as_str))
    }

    /// Language names across every country (may repeat between countries).
    pub fn all_languages(&self) -> impl Iterator<Item = &str> {
        self.countries
            .values()
            .flat_map(|languages| languages.keys().map(String::as_str))
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    /// Total number of records across all pairs.
    pub fn record_count(&self) -> usize {
        self.countries
            .values()
            .flat_map(|languages| languages.values())
            .map(Vec::len)
            .sum()
    }
}

impl FromIterator<SalaryRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = SalaryRecord>>(iter: I) -> Self {
        let mut dataset = Dataset::new();
        for record in iter {
            dataset.insert(record);
        }
        dataset
    }
}

/// Descriptive statistics for one experience bracket.
///
/// All values share the unit of [`SalaryRecord::value`]. An empty bracket
/// is the all-zero value returned by `Default`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BracketStats {
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub percentile25: f64,
    pub percentile75: f64,
    pub count: usize,
}

impl BracketStats {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// One row of an aggregation: a bracket and its statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketSummary {
    pub bracket: ExperienceBracket,
    pub stats: BracketStats,
}

/// The option lists offered to a user picking a selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub languages: Vec<String>,
    pub experience_levels: Vec<ExperienceBracket>,
}

/// The (country, language) pair a query runs against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub country: String,
    pub language: String,
}

impl Selection {
    pub fn new(country: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            language: language.into(),
        }
    }

    /// Initial selection for a freshly loaded dataset: the first country
    /// and the first language of the global language list. Either part is
    /// empty when the dataset has nothing to offer.
    pub fn default_for(dataset: &Dataset) -> Self {
        let options = crate::analysis::filter_options(dataset);
        Self {
            country: options.countries.into_iter().next().unwrap_or_default(),
            language: options.languages.into_iter().next().unwrap_or_default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.country.is_empty() && !self.language.is_empty()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} developers in {}", self.language, self.country)
    }
}

/// Headline figures across all brackets of one selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionOverview {
    /// Sum of responses over every bracket.
    pub total_responses: usize,
    /// Mean of the medians of non-empty brackets.
    pub average_median: f64,
    /// Highest 75th percentile among non-empty brackets.
    pub top_percentile75: f64,
    /// Non-empty bracket with the highest median.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_paying: Option<BracketSummary>,
}
