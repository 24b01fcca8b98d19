//! TOML loading for yearly statutory constants and state rates.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::TaxYearConfig;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigLoaderError {
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct StateRatesSection {
    #[serde(default)]
    state_rates: BTreeMap<String, Decimal>,
}

/// Constants and state rates parsed from one tax-year TOML file.
#[derive(Debug, Clone, PartialEq)]
pub struct YearConfig {
    pub config: TaxYearConfig,
    pub state_rates: BTreeMap<String, Decimal>,
}

/// Parses a tax-year TOML document.
///
/// Top-level keys map onto [`TaxYearConfig`]; status-specific amounts are
/// tables keyed by `single`, `married_filing_jointly`,
/// `married_filing_separately`, and `head_of_household`. An optional
/// `[state_rates]` table maps jurisdiction codes to rates. Codes are
/// upper-cased. Rates are best written as quoted strings so they are not
/// routed through a float.
pub fn parse_year_config(contents: &str) -> Result<YearConfig, ConfigLoaderError> {
    let config: TaxYearConfig = toml::from_str(contents)?;
    let section: StateRatesSection = toml::from_str(contents)?;

    let state_rates: BTreeMap<String, Decimal> = section
        .state_rates
        .into_iter()
        .map(|(code, rate)| (code.trim().to_ascii_uppercase(), rate))
        .collect();

    debug!(
        tax_year = config.tax_year,
        states = state_rates.len(),
        "Parsed tax year config"
    );
    Ok(YearConfig {
        config,
        state_rates,
    })
}

/// Reads and parses the TOML file at `path`.
pub fn load_year_config(path: &Path) -> Result<YearConfig, ConfigLoaderError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigLoaderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_year_config(&contents)
}
