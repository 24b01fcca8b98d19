//! Qualified business income (pass-through) deduction.
//!
//! The deduction is 20% of qualified business income, limited once taxable
//! income passes a status-specific threshold:
//!
//! | Taxable income | Service business | Other business |
//! |---|---|---|
//! | at or below threshold | 20% of QBI | 20% of QBI |
//! | inside the phase-in band | QBI, wages, and property scaled by the applicable percentage, then wage-limited | blend from 20% of QBI toward the wage-limited amount |
//! | at or above threshold + band | zero | lesser of 20% of QBI and the wage limit |
//!
//! The wage limit is the greater of 50% of W-2 wages or 25% of W-2 wages
//! plus 2.5% of qualified property. A business that reports neither wages
//! nor property keeps the full 20%.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{FilingStatusCode, TaxYearTables};
//! use tax_core::calculations::{QbiDeduction, QbiInput};
//!
//! let tables = TaxYearTables::tax_year_2025();
//! let calculator = QbiDeduction::new(&tables.config);
//!
//! let deduction = calculator.calculate(&QbiInput {
//!     qualified_income: dec!(100000),
//!     taxable_income: dec!(150000),
//!     filing_status: FilingStatusCode::Single,
//!     is_service_business: true,
//!     w2_wages: dec!(0),
//!     qualified_property: dec!(0),
//! });
//!
//! assert_eq!(deduction, dec!(20000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, round_currency};
use crate::{FilingStatusCode, TaxYearConfig};

/// Inputs for one pool of qualified business income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QbiInput {
    pub qualified_income: Decimal,
    /// Taxable income before the QBI deduction.
    pub taxable_income: Decimal,
    pub filing_status: FilingStatusCode,
    pub is_service_business: bool,
    pub w2_wages: Decimal,
    pub qualified_property: Decimal,
}

/// Calculator for the qualified business income deduction.
#[derive(Debug, Clone, Copy)]
pub struct QbiDeduction<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> QbiDeduction<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Returns the rounded, non-negative deduction for one pool.
    pub fn calculate(
        &self,
        input: &QbiInput,
    ) -> Decimal {
        let qualified_income = non_negative(input.qualified_income);
        if qualified_income.is_zero() {
            return Decimal::ZERO;
        }

        let rate = self.config.qbi_rate;
        let threshold = *self.config.qbi_threshold.get(input.filing_status);
        let range = self.config.qbi_phase_in_range;
        let tentative = qualified_income * rate;

        if input.taxable_income <= threshold {
            return round_currency(tentative);
        }

        let excess = input.taxable_income - threshold;
        let fully_phased_in = excess >= range;
        let w2_wages = non_negative(input.w2_wages);
        let property = non_negative(input.qualified_property);

        let deduction = if input.is_service_business {
            if fully_phased_in {
                debug!(
                    taxable_income = %input.taxable_income,
                    threshold = %threshold,
                    "Service business above phase-in range; no QBI deduction"
                );
                Decimal::ZERO
            } else {
                let applicable = Decimal::ONE - excess / range;
                self.limited(
                    qualified_income * applicable * rate,
                    w2_wages * applicable,
                    property * applicable,
                )
            }
        } else {
            let limited = self.limited(tentative, w2_wages, property);
            if fully_phased_in {
                limited
            } else {
                let phase_in = excess / range;
                tentative - (tentative - limited) * phase_in
            }
        };

        round_currency(non_negative(deduction))
    }

    /// Lesser of `tentative` and the wage limit; `tentative` when the
    /// business reports neither wages nor property.
    fn limited(
        &self,
        tentative: Decimal,
        w2_wages: Decimal,
        property: Decimal,
    ) -> Decimal {
        if w2_wages.is_zero() && property.is_zero() {
            return tentative;
        }
        tentative.min(self.wage_limit(w2_wages, property))
    }

    /// Greater of 50% of wages, or 25% of wages plus 2.5% of property.
    pub fn wage_limit(
        &self,
        w2_wages: Decimal,
        property: Decimal,
    ) -> Decimal {
        let wages_only = w2_wages * self.config.qbi_wage_limit_rate;
        let wages_and_property = w2_wages * self.config.qbi_alt_wage_limit_rate
            + property * self.config.qbi_property_rate;
        wages_only.max(wages_and_property)
    }
}
