//! Salary Explorer - developer survey salaries by experience bracket.
//!
//! Load a survey export with [`loader::load_dataset`], pick a country and
//! language, and call [`analysis::aggregate`] to get min, quartiles, median
//! and max for each of the six canonical experience brackets.
//!
//! ```no_run
//! use salary_explorer::analysis::aggregate;
//! use salary_explorer::loader::{load_dataset, LoadOptions};
//! use std::path::Path;
//!
//! let dataset = load_dataset(Path::new("calculatorData.json"), &LoadOptions::default())?;
//! for row in aggregate(&dataset, "Germany", "Rust") {
//!     println!("{}: median {}", row.bracket, row.stats.median);
//! }
//! # Ok::<(), salary_explorer::error::LoadError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
