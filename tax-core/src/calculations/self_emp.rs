//! Self-employment tax calculations.
//!
//! Self-employment income carries both halves of payroll tax. The
//! calculation follows the Schedule SE short method:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Net self-employment income (negative treated as zero) |
//! | 2    | Net earnings: Step 1 × 92.35% (net earnings factor) |
//! | 3    | Social security tax: min(Step 2, wage base) × 12.4% |
//! | 4    | Medicare tax: Step 2 × 2.9% |
//! | 5    | Additional Medicare tax: (Step 2 − threshold) × 0.9%, if positive |
//! | 6    | Self-employment tax: Steps 3 + 4 + 5 |
//! | 7    | Deductible half: Step 6 × 50% |
//!
//! The additional-Medicare threshold is the single-filer amount for every
//! filing status, and wages do not reduce the social security wage base.
//! Every step is rounded to whole units.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxYearTables;
//! use tax_core::calculations::{SeTaxConfig, SelfEmploymentTax};
//!
//! let tables = TaxYearTables::tax_year_2025();
//! let calculator = SelfEmploymentTax::new(SeTaxConfig::from_tax_year_config(&tables.config));
//!
//! let result = calculator.calculate(dec!(80000));
//!
//! assert_eq!(result.net_earnings, dec!(73880));
//! assert_eq!(result.total, dec!(11304));
//! assert_eq!(result.deductible_half, dec!(5652));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{non_negative, round_currency};
use crate::{SelfEmploymentTaxLines, TaxYearConfig};

/// Rates and limits for self-employment tax, taken from [`TaxYearConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeTaxConfig {
    /// Portion of net profit subject to SE tax (Step 2 multiplier).
    pub net_earnings_factor: Decimal,

    /// Combined employer and employee social security rate, typically 12.4%.
    pub ss_tax_rate: Decimal,

    /// Combined employer and employee Medicare rate, typically 2.9%.
    pub medicare_tax_rate: Decimal,

    /// Maximum earnings subject to social security tax.
    pub ss_wage_max: Decimal,

    /// Additional Medicare surtax rate, typically 0.9%.
    pub additional_medicare_rate: Decimal,

    /// Net earnings above which the additional Medicare surtax applies.
    pub additional_medicare_threshold: Decimal,

    /// Portion of SE tax deductible as an adjustment, typically 50%.
    pub deduction_factor: Decimal,
}

impl SeTaxConfig {
    pub fn from_tax_year_config(config: &TaxYearConfig) -> Self {
        Self {
            net_earnings_factor: config.se_net_earnings_factor,
            ss_tax_rate: config.ss_tax_rate,
            medicare_tax_rate: config.medicare_tax_rate,
            ss_wage_max: config.ss_wage_max,
            additional_medicare_rate: config.additional_medicare_rate,
            additional_medicare_threshold: config.additional_medicare_threshold,
            deduction_factor: config.se_deduction_factor,
        }
    }
}

/// Calculator for self-employment tax.
#[derive(Debug, Clone)]
pub struct SelfEmploymentTax {
    config: SeTaxConfig,
}

impl SelfEmploymentTax {
    pub fn new(config: SeTaxConfig) -> Self {
        Self { config }
    }

    /// Calculates SE tax on `se_income` and returns every intermediate line.
    ///
    /// Negative income is treated as zero and yields an all-zero result.
    pub fn calculate(
        &self,
        se_income: Decimal,
    ) -> SelfEmploymentTaxLines {
        if se_income < Decimal::ZERO {
            warn!(
                se_income = %se_income,
                "Self-employment income is negative; SE tax will be zero"
            );
        }
        let se_income = non_negative(se_income);
        if se_income.is_zero() {
            return SelfEmploymentTaxLines::default();
        }

        let net_earnings = self.net_earnings(se_income);
        let social_security_tax = self.social_security_tax(net_earnings);
        let medicare_tax = self.medicare_tax(net_earnings);
        let additional_medicare_tax = self.additional_medicare_tax(net_earnings);
        let total = social_security_tax + medicare_tax + additional_medicare_tax;
        let deductible_half = round_currency(total * self.config.deduction_factor);

        debug!(
            se_income = %se_income,
            net_earnings = %net_earnings,
            total = %total,
            "Computed self-employment tax"
        );

        SelfEmploymentTaxLines {
            net_earnings: round_currency(net_earnings),
            social_security_tax,
            medicare_tax,
            additional_medicare_tax,
            total,
            deductible_half,
        }
    }

    /// Employer plus employee payroll tax on a W-2 salary.
    ///
    /// Used to compare self-employment tax against payroll treatment; the
    /// additional Medicare surtax is left out because it applies either way.
    pub fn payroll_tax(
        &self,
        salary: Decimal,
    ) -> Decimal {
        let salary = non_negative(salary);
        self.social_security_tax(salary) + self.medicare_tax(salary)
    }

    /// Step 2. Left unrounded so later steps see the exact base.
    fn net_earnings(
        &self,
        se_income: Decimal,
    ) -> Decimal {
        se_income * self.config.net_earnings_factor
    }

    /// Step 3.
    fn social_security_tax(
        &self,
        net_earnings: Decimal,
    ) -> Decimal {
        let taxable = net_earnings.min(self.config.ss_wage_max);
        if taxable < net_earnings {
            debug!(
                net_earnings = %net_earnings,
                ss_wage_max = %self.config.ss_wage_max,
                "Net earnings exceed the social security wage base"
            );
        }
        round_currency(taxable * self.config.ss_tax_rate)
    }

    /// Step 4.
    fn medicare_tax(
        &self,
        net_earnings: Decimal,
    ) -> Decimal {
        round_currency(net_earnings * self.config.medicare_tax_rate)
    }

    /// Step 5.
    fn additional_medicare_tax(
        &self,
        net_earnings: Decimal,
    ) -> Decimal {
        let excess = non_negative(net_earnings - self.config.additional_medicare_threshold);
        round_currency(excess * self.config.additional_medicare_rate)
    }
}
