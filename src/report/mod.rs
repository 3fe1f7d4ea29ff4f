//! Report generation for aggregated selections.

pub mod generator;

pub use generator::{
    format_salary, generate_json_report, generate_markdown_report, generate_options_listing,
    RenderOptions, ReportMetadata, SalaryReport,
};
