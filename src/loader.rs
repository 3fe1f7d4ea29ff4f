//! Dataset loading.
//!
//! Reads the survey export (country → language → `{ entries: [...] }`)
//! and coerces it into a strictly typed [`Dataset`]. All validation of the
//! loosely structured JSON happens here so the aggregator can trust its
//! input.

use crate::error::{LoadError, LoadResult};
use crate::models::{Dataset, SalaryRecord};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Options controlling how strictly the export is validated.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Fail on the first invalid record instead of skipping it.
    pub strict: bool,
}

impl From<&crate::config::DataConfig> for LoadOptions {
    fn from(config: &crate::config::DataConfig) -> Self {
        Self {
            strict: config.strict,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    #[serde(rename = "Country", default)]
    country: Option<String>,
    #[serde(rename = "Language", default)]
    language: Option<String>,
    #[serde(rename = "Experience", default)]
    experience: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    value: f64,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    bracket: Option<String>,
    #[serde(default)]
    metadata: Option<RawMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLanguage {
    #[serde(default)]
    entries: Vec<RawEntry>,
}

type RawDataset = BTreeMap<String, BTreeMap<String, RawLanguage>>;

/// Load a dataset from a JSON file.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> LoadResult<Dataset> {
    debug!("Reading dataset from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_dataset(&content, options)
}

/// Parse a dataset from JSON text.
pub fn parse_dataset(json: &str, options: &LoadOptions) -> LoadResult<Dataset> {
    let raw: RawDataset = serde_json::from_str(json)?;

    let mut dataset = Dataset::new();
    let mut skipped = 0usize;

    for (country, languages) in raw {
        for (language, block) in languages {
            dataset.insert_pair(&country, &language);

            for (index, entry) in block.entries.into_iter().enumerate() {
                match convert_entry(&country, &language, index, entry) {
                    Ok(record) => dataset.insert(record),
                    Err(e) if options.strict => return Err(e),
                    Err(e) => {
                        warn!("Skipping record: {}", e);
                        skipped += 1;
                    }
                }
            }
        }
    }

    info!(
        "Loaded {} records across {} countries",
        dataset.record_count(),
        dataset.country_count()
    );
    if skipped > 0 {
        warn!("Skipped {} invalid records", skipped);
    }

    Ok(dataset)
}

/// Validate one raw entry against the keys it was found under.
fn convert_entry(
    country: &str,
    language: &str,
    index: usize,
    entry: RawEntry,
) -> LoadResult<SalaryRecord> {
    if !entry.value.is_finite() || entry.value < 0.0 {
        return Err(LoadError::InvalidValue {
            country: country.to_string(),
            language: language.to_string(),
            index,
            value: entry.value,
        });
    }

    let (claimed_country, claimed_language, experience) = match entry.metadata {
        Some(meta) => (meta.country, meta.language, meta.experience),
        None => (None, None, None),
    };

    let claimed_country = non_empty(claimed_country).unwrap_or_else(|| country.to_string());
    let claimed_language = non_empty(claimed_language).unwrap_or_else(|| language.to_string());

    if claimed_country != country || claimed_language != language {
        return Err(LoadError::MisplacedRecord {
            country: country.to_string(),
            language: language.to_string(),
            index,
            claimed_country,
            claimed_language,
        });
    }

    // `category` is the grouping label; `bracket` is its short-form alias
    // and older exports only carry metadata
    let bracket = non_empty(entry.category)
        .or_else(|| non_empty(entry.bracket))
        .or_else(|| non_empty(experience))
        .unwrap_or_default();

    Ok(SalaryRecord::new(entry.value, country, language, bracket))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
