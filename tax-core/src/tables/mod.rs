//! Versioned yearly tax tables.
//!
//! The engine never hard-codes a statutory constant; everything year-specific
//! arrives through [`TaxYearTables`], either the built-in set for a supported
//! year or one loaded from data files. Tables are validated once, when the
//! engine is built.

mod y2025;

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ByFilingStatus, FilingStatusCode, TaxBracket, TaxYearConfig};

/// Errors found while validating a set of yearly tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxTablesError {
    /// A rate or factor outside `[0, 1]`.
    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    /// A cap, base, or width that must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: Decimal },

    /// A status-specific amount below zero.
    #[error("{field} for {status} must be non-negative, got {value}")]
    NegativeAmount {
        field: &'static str,
        status: FilingStatusCode,
        value: Decimal,
    },

    #[error("no tax brackets for {0}")]
    NoTaxBrackets(FilingStatusCode),

    #[error("first bracket for {status} must start at zero, got {min}")]
    BracketsDoNotStartAtZero {
        status: FilingStatusCode,
        min: Decimal,
    },

    #[error("bracket {index} for {status} overlaps the previous bracket")]
    OverlappingBracket {
        status: FilingStatusCode,
        index: usize,
    },

    #[error("bracket {index} for {status} has an upper bound at or below its lower bound")]
    EmptyBracket {
        status: FilingStatusCode,
        index: usize,
    },

    #[error("only the last bracket for {0} may be unbounded")]
    UnboundedBracketNotLast(FilingStatusCode),

    #[error("bracket rate for {status} must be between 0 and 1, got {rate}")]
    InvalidBracketRate {
        status: FilingStatusCode,
        rate: Decimal,
    },

    #[error("state rate for {code} must be between 0 and 1, got {rate}")]
    InvalidStateRate { code: String, rate: Decimal },
}

fn is_fraction(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}

/// Complete configuration for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearTables {
    pub config: TaxYearConfig,
    pub brackets: ByFilingStatus<Vec<TaxBracket>>,
    /// Two-letter jurisdiction code to approximate effective rate.
    pub state_rates: BTreeMap<String, Decimal>,
}

impl TaxYearTables {
    /// Built-in tables for the 2025 tax year.
    pub fn tax_year_2025() -> Self {
        y2025::tables()
    }

    /// Built-in tables for `year`, if that year ships with the crate.
    pub fn builtin(year: i32) -> Option<Self> {
        match year {
            2025 => Some(Self::tax_year_2025()),
            _ => None,
        }
    }

    pub fn tax_year(&self) -> i32 {
        self.config.tax_year
    }

    pub fn brackets_for(
        &self,
        status: FilingStatusCode,
    ) -> &[TaxBracket] {
        self.brackets.get(status)
    }

    /// Checks every rate, amount, and schedule.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxTablesError`] found.
    pub fn validate(&self) -> Result<(), TaxTablesError> {
        self.validate_config()?;
        for (status, schedule) in self.brackets.iter() {
            validate_schedule(status, schedule)?;
        }
        for (code, rate) in &self.state_rates {
            if !is_fraction(*rate) {
                return Err(TaxTablesError::InvalidStateRate {
                    code: code.clone(),
                    rate: *rate,
                });
            }
        }
        Ok(())
    }

    fn validate_config(&self) -> Result<(), TaxTablesError> {
        let config = &self.config;
        for (field, value) in config.rates() {
            if !is_fraction(value) {
                return Err(TaxTablesError::RateOutOfRange { field, value });
            }
        }
        if config.se_net_earnings_factor.is_zero() {
            return Err(TaxTablesError::NonPositive {
                field: "se_net_earnings_factor",
                value: config.se_net_earnings_factor,
            });
        }

        let positives = [
            ("ss_wage_max", config.ss_wage_max),
            ("qbi_phase_in_range", config.qbi_phase_in_range),
            ("amt_rate_threshold", config.amt_rate_threshold),
        ];
        for (field, value) in positives {
            if value <= Decimal::ZERO {
                return Err(TaxTablesError::NonPositive { field, value });
            }
        }

        let per_status = [
            ("standard_deduction", &config.standard_deduction),
            ("qbi_threshold", &config.qbi_threshold),
            ("amt_exemption", &config.amt_exemption),
            ("amt_phaseout_start", &config.amt_phaseout_start),
            ("niit_threshold", &config.niit_threshold),
        ];
        for (field, amounts) in per_status {
            for (status, value) in amounts.iter() {
                if *value < Decimal::ZERO {
                    return Err(TaxTablesError::NegativeAmount {
                        field,
                        status,
                        value: *value,
                    });
                }
            }
        }
        Ok(())
    }
}

fn validate_schedule(
    status: FilingStatusCode,
    schedule: &[TaxBracket],
) -> Result<(), TaxTablesError> {
    let first = schedule
        .first()
        .ok_or(TaxTablesError::NoTaxBrackets(status))?;
    if !first.min_income.is_zero() {
        return Err(TaxTablesError::BracketsDoNotStartAtZero {
            status,
            min: first.min_income,
        });
    }

    let last_index = schedule.len() - 1;
    for (index, bracket) in schedule.iter().enumerate() {
        if !is_fraction(bracket.tax_rate) {
            return Err(TaxTablesError::InvalidBracketRate {
                status,
                rate: bracket.tax_rate,
            });
        }
        match bracket.max_income {
            Some(max) if max <= bracket.min_income => {
                return Err(TaxTablesError::EmptyBracket { status, index });
            }
            None if index != last_index => {
                return Err(TaxTablesError::UnboundedBracketNotLast(status));
            }
            _ => {}
        }
        if index > 0 {
            let previous_max = schedule[index - 1].max_income.unwrap_or(Decimal::MAX);
            if bracket.min_income < previous_max {
                return Err(TaxTablesError::OverlappingBracket { status, index });
            }
        }
    }
    Ok(())
}
