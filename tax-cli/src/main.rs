mod logging;
mod output;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tax_core::{FinancialSnapshot, PlanningPolicy, TaxEngine, TaxYearTables, validate_snapshot};
use tracing::debug;

use crate::output::{TextReport, render_json};

/// Estimate a household's yearly tax bill from a financial snapshot.
///
/// The snapshot is a JSON document with the household profile, income
/// streams, expenses, deductions, legal entities, depreciation, and gain
/// events. Tables default to the built-in set for `--year`; pass both
/// `--brackets` and `--config` to load them from files instead.
#[derive(Parser, Debug)]
#[command(name = "tax-estimate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the snapshot JSON, or `-` to read stdin
    #[arg(short, long)]
    snapshot: String,

    /// CSV of bracket schedules (tax_year,schedule,min_income,max_income,rate)
    #[arg(short, long, requires = "config")]
    brackets: Option<PathBuf>,

    /// TOML of yearly constants and state rates
    #[arg(short, long, requires = "brackets")]
    config: Option<PathBuf>,

    /// Tax year to compute
    #[arg(short, long, default_value_t = 2025)]
    year: i32,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also report suspicious snapshot contents
    #[arg(long, default_value_t = false)]
    validate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn read_snapshot(source: &str) -> Result<FinancialSnapshot> {
    let contents = if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read snapshot from stdin")?;
        buf
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to open: {source}"))?
    };

    serde_json::from_str(&contents).with_context(|| format!("Failed to parse snapshot: {source}"))
}

fn load_tables(args: &Args) -> Result<TaxYearTables> {
    let (Some(brackets), Some(config)) = (&args.brackets, &args.config) else {
        return TaxYearTables::builtin(args.year)
            .with_context(|| format!("No built-in tables for tax year {}", args.year));
    };

    let tables = tax_data::load_tax_year(brackets, config).with_context(|| {
        format!(
            "Failed to load tables from {} and {}",
            brackets.display(),
            config.display()
        )
    })?;
    if tables.tax_year() != args.year {
        bail!(
            "{} holds tax year {}, but tax year {} was requested",
            config.display(),
            tables.tax_year(),
            args.year
        );
    }
    Ok(tables)
}

fn main() -> Result<()> {
    logging::init_logging();
    let args = Args::parse();
    debug!(?args, "Starting estimate");

    let tables = load_tables(&args)?;
    let engine =
        TaxEngine::new(tables, PlanningPolicy::default()).context("Tax tables failed validation")?;
    let snapshot = read_snapshot(&args.snapshot)?;

    let warnings = args.validate.then(|| validate_snapshot(&snapshot));
    if let Some(warnings) = &warnings {
        debug!(count = warnings.len(), "Validated snapshot");
    }

    let report = engine.compute(&snapshot);

    match args.format {
        OutputFormat::Text => print!(
            "{}",
            TextReport {
                report: &report,
                warnings: warnings.as_deref(),
            }
        ),
        OutputFormat::Json => println!(
            "{}",
            render_json(&report, warnings.as_deref()).context("Failed to serialize report")?
        ),
    }

    Ok(())
}
