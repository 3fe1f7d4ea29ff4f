//! Errors raised while loading a salary dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a survey export into a [`Dataset`](crate::models::Dataset).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record's metadata names a different country or language than the
    /// keys it is stored under.
    #[error(
        "record {index} under {country}/{language} claims to be {claimed_country}/{claimed_language}"
    )]
    MisplacedRecord {
        country: String,
        language: String,
        index: usize,
        claimed_country: String,
        claimed_language: String,
    },

    #[error("record {index} under {country}/{language} has invalid salary value {value}")]
    InvalidValue {
        country: String,
        language: String,
        index: usize,
        value: f64,
    },
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
