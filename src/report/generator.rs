//! Report generation.
//!
//! Renders an aggregated selection as a Markdown document (a bracket
//! table, a median bar chart and the key statistics) or as JSON.

use crate::analysis::summarize;
use crate::config::ReportConfig;
use crate::models::{BracketSummary, SalaryUnit, Selection, SelectionOverview};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Width of the longest bar in the median chart, in characters.
const CHART_WIDTH: usize = 40;

/// Metadata about the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Dataset the report was computed from.
    pub dataset: String,
    /// Country and language queried.
    pub selection: Selection,
    /// Unit of every salary figure.
    pub unit: SalaryUnit,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Records in the whole dataset.
    pub records_loaded: usize,
}

/// A complete salary report for one selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryReport {
    pub metadata: ReportMetadata,
    /// One row per experience bracket, canonical order.
    pub brackets: Vec<BracketSummary>,
    pub overview: SelectionOverview,
}

impl SalaryReport {
    /// Build a report from aggregated rows.
    pub fn new(metadata: ReportMetadata, brackets: Vec<BracketSummary>) -> Self {
        let overview = summarize(&brackets);
        Self {
            metadata,
            brackets,
            overview,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.overview.total_responses == 0
    }
}

/// Rendering switches for the Markdown report.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub include_empty_brackets: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_empty_brackets: true,
        }
    }
}

impl From<&ReportConfig> for RenderOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            include_empty_brackets: config.include_empty_brackets,
        }
    }
}

/// Format a salary rounded to the nearest thousand, e.g. `$85k`.
pub fn format_salary(value: f64, unit: SalaryUnit) -> String {
    let thousands = match unit {
        SalaryUnit::Thousands => value,
        SalaryUnit::Usd => value / 1000.0,
    };
    format!("${}k", thousands.round() as i64)
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &SalaryReport, options: &RenderOptions) -> String {
    let mut output = String::new();

    output.push_str("# Salary Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));

    if report.is_empty() {
        output.push_str(&generate_empty_notice(&report.metadata.selection));
    } else {
        output.push_str(&generate_bracket_table(report, options));
        output.push_str(&generate_median_chart(report));
        output.push_str(&generate_key_statistics(&report.overview, report.metadata.unit));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Dataset:** `{}`\n", metadata.dataset));
    section.push_str(&format!("- **Country:** {}\n", metadata.selection.country));
    section.push_str(&format!("- **Language:** {}\n", metadata.selection.language));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Records Loaded:** {}\n", metadata.records_loaded));
    section.push('\n');

    section
}

fn generate_empty_notice(selection: &Selection) -> String {
    format!(
        "## No Data Available\n\nNo salary data found for {}.\nTry selecting a different combination.\n\n",
        selection
    )
}

/// Generate the per-bracket statistics table.
fn generate_bracket_table(report: &SalaryReport, options: &RenderOptions) -> String {
    let unit = report.metadata.unit;
    let mut section = String::new();

    section.push_str("## Salaries by Experience\n\n");
    section.push_str("| Experience | Responses | Min | 25th | Median | 75th | Max |\n");
    section.push_str("|:---|:---:|---:|---:|---:|---:|---:|\n");

    for row in &report.brackets {
        let stats = &row.stats;
        if stats.is_empty() {
            if options.include_empty_brackets {
                section.push_str(&format!("| {} | 0 | - | - | - | - | - |\n", row.bracket));
            }
            continue;
        }

        section.push_str(&format!(
            "| {} | {} | {} | {} | **{}** | {} | {} |\n",
            row.bracket,
            stats.count,
            format_salary(stats.min, unit),
            format_salary(stats.percentile25, unit),
            format_salary(stats.median, unit),
            format_salary(stats.percentile75, unit),
            format_salary(stats.max, unit),
        ));
    }
    section.push('\n');

    section
}

/// Bar length for `value` scaled against `max`.
fn bar_length(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * CHART_WIDTH as f64).round().max(1.0) as usize
}

/// Generate a text bar chart of medians.
fn generate_median_chart(report: &SalaryReport) -> String {
    let unit = report.metadata.unit;
    let max_median = report
        .brackets
        .iter()
        .map(|r| r.stats.median)
        .fold(0.0_f64, f64::max);

    let mut section = String::new();
    section.push_str("### Median by Experience\n\n```\n");

    for row in &report.brackets {
        let label = row.bracket.short_label();
        if row.stats.is_empty() {
            section.push_str(&format!("{:>6} | (no responses)\n", label));
            continue;
        }
        section.push_str(&format!(
            "{:>6} | {} {}\n",
            label,
            "█".repeat(bar_length(row.stats.median, max_median)),
            format_salary(row.stats.median, unit)
        ));
    }

    section.push_str("```\n\n");
    section
}

/// Generate the key statistics section.
fn generate_key_statistics(overview: &SelectionOverview, unit: SalaryUnit) -> String {
    let mut section = String::new();

    section.push_str("## Key Statistics\n\n");
    section.push_str(&format!(
        "- **Average Median Salary:** {}\n",
        format_salary(overview.average_median, unit)
    ));
    section.push_str(&format!(
        "- **Total Responses:** {}\n",
        overview.total_responses
    ));
    section.push_str(&format!(
        "- **75th Percentile:** {}\n",
        format_salary(overview.top_percentile75, unit)
    ));
    if let Some(ref top) = overview.highest_paying {
        section.push_str(&format!(
            "- **Highest Median:** {} ({})\n",
            format_salary(top.stats.median, unit),
            top.bracket.short_label()
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(
        "*Figures are annual gross salaries in USD, grouped by years of professional \
         programming experience.*\n",
    );

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &SalaryReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// One option per line, for `--list-countries` / `--list-languages`.
pub fn generate_options_listing(options: &[String]) -> String {
    let mut listing = options.join("\n");
    if !listing.is_empty() {
        listing.push('\n');
    }
    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate;
    use crate::models::{Dataset, ExperienceBracket, SalaryRecord};

    fn create_test_report(dataset: &Dataset, country: &str, language: &str) -> SalaryReport {
        let metadata = ReportMetadata {
            dataset: "calculatorData.json".to_string(),
            selection: Selection::new(country, language),
            unit: SalaryUnit::Thousands,
            generated_at: Utc::now(),
            records_loaded: dataset.record_count(),
        };
        SalaryReport::new(metadata, aggregate(dataset, country, language))
    }

    fn test_dataset() -> Dataset {
        vec![
            SalaryRecord::new(80.0, "Germany", "Rust", "3–5 years"),
            SalaryRecord::new(100.0, "Germany", "Rust", "3–5 years"),
            SalaryRecord::new(60.0, "Germany", "Rust", "1–2 years"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(85.4, SalaryUnit::Thousands), "$85k");
        assert_eq!(format_salary(85_400.0, SalaryUnit::Usd), "$85k");
        assert_eq!(format_salary(85_600.0, SalaryUnit::Usd), "$86k");
        assert_eq!(format_salary(0.0, SalaryUnit::Usd), "$0k");
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report(&test_dataset(), "Germany", "Rust");
        let markdown = generate_markdown_report(&report, &RenderOptions::default());

        assert!(markdown.contains("# Salary Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Salaries by Experience"));
        assert!(markdown.contains("| 3–5 years | 2 | $80k | $85k | **$90k** | $95k | $100k |"));
        assert!(markdown.contains("| Less than 1 year | 0 | - | - | - | - | - |"));
        assert!(markdown.contains("## Key Statistics"));
        assert!(markdown.contains("- **Total Responses:** 3"));
        assert!(markdown.contains("- **75th Percentile:** $95k"));
        assert!(markdown.contains("- **Highest Median:** $90k (3-5y)"));
    }

    #[test]
    fn test_hide_empty_brackets() {
        let report = create_test_report(&test_dataset(), "Germany", "Rust");
        let options = RenderOptions {
            include_empty_brackets: false,
        };
        let markdown = generate_markdown_report(&report, &options);

        assert!(!markdown.contains("| Less than 1 year |"));
        assert!(markdown.contains("| 1–2 years | 1 |"));
    }

    #[test]
    fn test_empty_selection_notice() {
        let report = create_test_report(&test_dataset(), "Germany", "Haskell");
        let markdown = generate_markdown_report(&report, &RenderOptions::default());

        assert!(report.is_empty());
        assert!(markdown.contains("No salary data found for Haskell developers in Germany."));
        assert!(!markdown.contains("## Salaries by Experience"));
    }

    #[test]
    fn test_median_chart_scales_to_longest_bar() {
        let report = create_test_report(&test_dataset(), "Germany", "Rust");
        let chart = generate_median_chart(&report);

        let longest = "█".repeat(CHART_WIDTH);
        assert!(chart.contains(&format!("  3-5y | {} $90k", longest)));
        assert!(chart.contains("   <1y | (no responses)"));
    }

    #[test]
    fn test_bar_length() {
        assert_eq!(bar_length(90.0, 90.0), CHART_WIDTH);
        assert_eq!(bar_length(45.0, 90.0), CHART_WIDTH / 2);
        assert_eq!(bar_length(0.1, 1000.0), 1);
        assert_eq!(bar_length(0.0, 90.0), 0);
        assert_eq!(bar_length(10.0, 0.0), 0);
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report(&test_dataset(), "Germany", "Rust");
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"brackets\""));
        assert!(json.contains("\"percentile25\""));
        assert!(json.contains("\"3–5 years\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["brackets"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["overview"]["total_responses"], 3);
        assert_eq!(value["overview"]["top_percentile75"], 95.0);
        assert_eq!(
            value["brackets"][ExperienceBracket::ThreeToFive.index()]["stats"]["median"],
            90.0
        );
    }

    #[test]
    fn test_generate_options_listing() {
        let listing = generate_options_listing(&["Brazil".to_string(), "Germany".to_string()]);
        assert_eq!(listing, "Brazil\nGermany\n");
        assert_eq!(generate_options_listing(&[]), "");
    }
}
