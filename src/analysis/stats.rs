//! Percentile and per-bracket statistics.
//!
//! Percentiles use linear interpolation between closest ranks, the same
//! definition for the median and both quartiles.

use crate::models::BracketStats;

/// Percentile `p` (0-100) of an ascending slice.
///
/// Returns 0 for an empty slice. `p` outside 0-100 is clamped.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let p = p.clamp(0.0, 100.0);
    let index = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        return sorted[lower];
    }

    let weight = index - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// Compute bracket statistics over unsorted salary values.
pub fn compute_stats(values: &[f64]) -> BracketStats {
    if values.is_empty() {
        return BracketStats::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let count = sorted.len();

    BracketStats {
        min: sorted[0],
        max: sorted[count - 1],
        median: percentile(&sorted, 50.0),
        percentile25: percentile(&sorted, 25.0),
        percentile75: percentile(&sorted, 75.0),
        count,
    }
}
