//! Salary Explorer - developer salaries by country, language and experience
//!
//! A CLI tool that loads a developer survey export and reports the
//! salary distribution per experience bracket for one country and
//! programming language.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (dataset unavailable, bad config, write failure, etc.)
//!   2 - Selection has no responses and --fail-on-empty was set

use anyhow::{bail, Context, Result};
use chrono::Utc;
use salary_explorer::analysis::{aggregate, has_data, list_countries, list_languages};
use salary_explorer::cli::{Args, OutputFormat};
use salary_explorer::config::{Config, DEFAULT_CONFIG_FILE};
use salary_explorer::loader::{load_dataset, LoadOptions};
use salary_explorer::models::{Dataset, Selection};
use salary_explorer::report::{self, RenderOptions, ReportMetadata, SalaryReport};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config decides the default verbosity, so it is read before logging starts
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(effective_log_level(&args, &config));

    info!("Salary Explorer v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Config: {:?}", config);

    match run(&args, &config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .salary-explorer.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to set the dataset path, output format and salary unit.");
    Ok(())
}

/// CLI flags win; otherwise the config file may turn on debug output.
fn effective_log_level(args: &Args, config: &Config) -> tracing::Level {
    if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    }
}

/// Initialize logging. Logs go to stderr so stdout only carries the report.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load the dataset, answer the query and write the output. Returns the exit code.
fn run(args: &Args, config: &Config) -> Result<i32> {
    let data_path = &config.data.path;
    let dataset = load_dataset(data_path, &LoadOptions::from(&config.data))
        .with_context(|| format!("Failed to load salary data from {}", data_path.display()))?;

    if args.is_listing() {
        let options = if args.list_countries {
            list_countries(&dataset)
        } else {
            let languages = list_languages(&dataset, args.country.as_deref());
            if languages.is_empty() {
                if let Some(ref country) = args.country {
                    warn!("No languages recorded for {}", country);
                }
            }
            languages
        };
        write_output(args.output.as_deref(), &report::generate_options_listing(&options))?;
        return Ok(0);
    }

    let selection = resolve_selection(args, &dataset);
    if !selection.is_complete() {
        bail!("Dataset {} contains no salary data", data_path.display());
    }

    if !has_data(&dataset, &selection.country, &selection.language) {
        warn!("No salary data for {}", selection);
    }
    info!("Aggregating salaries for {}", selection);

    let brackets = aggregate(&dataset, &selection.country, &selection.language);

    let metadata = ReportMetadata {
        dataset: data_path.display().to_string(),
        selection,
        unit: config.report.unit,
        generated_at: Utc::now(),
        records_loaded: dataset.record_count(),
    };
    let salary_report = SalaryReport::new(metadata, brackets);

    let output = match config.report.format {
        OutputFormat::Json => report::generate_json_report(&salary_report)?,
        OutputFormat::Markdown => report::generate_markdown_report(
            &salary_report,
            &RenderOptions::from(&config.report),
        ),
    };

    write_output(args.output.as_deref(), &output)?;
    info!(
        "Reported {} responses",
        salary_report.overview.total_responses
    );

    if args.fail_on_empty && salary_report.is_empty() {
        eprintln!("\n⛔ No responses for the selected country and language (exit code 2).");
        return Ok(2);
    }

    Ok(0)
}

/// Fill in whatever part of the selection was not given on the command line.
///
/// A missing language defaults to the first one recorded for the chosen
/// country, falling back to the first language overall.
fn resolve_selection(args: &Args, dataset: &Dataset) -> Selection {
    let defaults = Selection::default_for(dataset);

    let country = args.country.clone().unwrap_or(defaults.country);
    let language = args.language.clone().unwrap_or_else(|| {
        list_languages(dataset, Some(&country))
            .into_iter()
            .next()
            .unwrap_or(defaults.language)
    });

    Selection::new(country, language)
}

/// Write to the output file, or stdout when none is given.
fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    Ok(Config::load_default()?.unwrap_or_default())
}
