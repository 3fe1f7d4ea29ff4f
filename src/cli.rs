//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::SalaryUnit;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Salary Explorer - developer salaries by country, language and experience
///
/// Loads a developer survey export and shows the salary distribution
/// (min, quartiles, median, max) for each experience bracket.
///
/// Examples:
///   salary-explorer --data calculatorData.json --country Germany --language Rust
///   salary-explorer --list-countries
///   salary-explorer --list-languages --country Brazil
///   salary-explorer --country Germany --language Rust --format json -o report.json
///   salary-explorer --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the survey dataset (JSON)
    ///
    /// Defaults to the path in .salary-explorer.toml, then calculatorData.json.
    #[arg(short, long, value_name = "FILE", env = "SALARY_EXPLORER_DATA")]
    pub data: Option<PathBuf>,

    /// Country to report on
    ///
    /// If not specified, the first country in the dataset is used.
    #[arg(long, value_name = "NAME")]
    pub country: Option<String>,

    /// Programming language to report on
    ///
    /// If not specified, the first language in the dataset is used.
    #[arg(short, long, value_name = "NAME")]
    pub language: Option<String>,

    /// Print the countries present in the dataset and exit
    #[arg(long, conflicts_with = "list_languages")]
    pub list_countries: bool,

    /// Print the languages present in the dataset and exit
    ///
    /// Scoped to --country when given.
    #[arg(long)]
    pub list_languages: bool,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Unit of the salary values in the dataset (thousands, usd)
    #[arg(long, value_name = "UNIT")]
    pub unit: Option<SalaryUnit>,

    /// Leave brackets without responses out of the table
    #[arg(long)]
    pub hide_empty: bool,

    /// Fail on invalid dataset records instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Exit with code 2 when the selection has no responses
    #[arg(long)]
    pub fail_on_empty: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .salary-explorer.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .salary-explorer.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether this run only lists options instead of producing a report.
    pub fn is_listing(&self) -> bool {
        self.list_countries || self.list_languages
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if matches!(self.country.as_deref(), Some(c) if c.trim().is_empty()) {
            return Err("Country must not be empty".to_string());
        }
        if matches!(self.language.as_deref(), Some(l) if l.trim().is_empty()) {
            return Err("Language must not be empty".to_string());
        }

        if let Some(ref path) = self.data {
            if !path.exists() {
                return Err(format!("Dataset file does not exist: {}", path.display()));
            }
            if !path.is_file() {
                return Err(format!("Dataset path is not a file: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data: None,
            country: Some("Germany".to_string()),
            language: Some("Rust".to_string()),
            list_countries: false,
            list_languages: false,
            format: None,
            output: None,
            unit: None,
            hide_empty: false,
            strict: false,
            fail_on_empty: false,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_selection() {
        let args = Args::parse_from([
            "salary-explorer",
            "--country",
            "Germany",
            "-l",
            "Rust",
            "--unit",
            "usd",
            "--format",
            "json",
        ]);
        assert_eq!(args.country.as_deref(), Some("Germany"));
        assert_eq!(args.language.as_deref(), Some("Rust"));
        assert_eq!(args.unit, Some(SalaryUnit::Usd));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(!args.is_listing());
    }

    #[test]
    fn test_list_flags_conflict() {
        let result = Args::try_parse_from([
            "salary-explorer",
            "--list-countries",
            "--list-languages",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_listing() {
        let args = Args::try_parse_from(["salary-explorer", "--list-countries"]).unwrap();
        assert!(args.is_listing());

        let args =
            Args::try_parse_from(["salary-explorer", "--list-languages", "--country", "Germany"])
                .unwrap();
        assert!(args.is_listing());
        assert_eq!(args.country.as_deref(), Some("Germany"));
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_empty_selection() {
        let mut args = make_args();
        args.country = Some("  ".to_string());
        assert!(args.validate().is_err());

        let mut args = make_args();
        args.language = Some(String::new());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = make_args();
        args.data = Some(dir.path().join("missing.json"));
        assert!(args.validate().is_err());

        // a directory is not a dataset
        args.data = Some(dir.path().to_path_buf());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_skipped_for_init_config() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
