//! Analysis modules.
//!
//! Selection queries over a loaded dataset and the statistics they produce.

pub mod aggregator;
pub mod stats;

pub use aggregator::*;
pub use stats::{compute_stats, percentile};
