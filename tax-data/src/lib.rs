//! File-based loaders for yearly tax tables.
//!
//! Bracket schedules come from a CSV keyed by IRS schedule code; statutory
//! constants and state rates come from a TOML file. [`load_tax_year`] joins
//! the two into validated [`TaxYearTables`].

mod config;
mod loader;

use std::path::Path;

use tax_core::{TaxTablesError, TaxYearTables};
use thiserror::Error;
use tracing::info;

pub use config::{ConfigLoaderError, YearConfig, load_year_config, parse_year_config};
pub use loader::{BracketLoader, BracketLoaderError, BracketRecord};

#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Brackets(#[from] BracketLoaderError),

    #[error(transparent)]
    Config(#[from] ConfigLoaderError),

    #[error(transparent)]
    Tables(#[from] TaxTablesError),
}

/// Loads the tables for the tax year named in `config_toml`.
///
/// Brackets for other years in the CSV are ignored. The joined tables are
/// validated before they are returned.
pub fn load_tax_year(
    brackets_csv: &Path,
    config_toml: &Path,
) -> Result<TaxYearTables, DataError> {
    let YearConfig {
        config,
        state_rates,
    } = load_year_config(config_toml)?;
    let brackets = BracketLoader::from_path(brackets_csv, config.tax_year)?;

    let tables = TaxYearTables {
        config,
        brackets,
        state_rates,
    };
    tables.validate()?;

    info!(
        tax_year = tables.tax_year(),
        brackets = %brackets_csv.display(),
        config = %config_toml.display(),
        "Loaded tax tables"
    );
    Ok(tables)
}
