//! Alternative minimum tax.
//!
//! A simplified Form 6251 pass:
//!
//! 1. AMTI = regular taxable income + itemized-deduction add-back
//! 2. Exemption, reduced by 25% of AMTI above the phase-out start
//! 3. Tentative minimum tax: 26% up to the rate threshold, 28% above
//! 4. AMT = tentative minimum tax − regular tax, if positive
//!
//! The add-back approximates the preference items itemizers lose (mostly
//! state and local taxes) as half of itemized deductions, capped.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, round_currency};
use crate::{DeductionMethod, FilingStatusCode, TaxYearConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmtInput {
    pub taxable_income: Decimal,
    pub regular_tax: Decimal,
    pub filing_status: FilingStatusCode,
    pub deduction_method: DeductionMethod,
    pub itemized_deductions: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmtResult {
    pub alternative_minimum_taxable_income: Decimal,
    pub exemption: Decimal,
    pub tentative_minimum_tax: Decimal,
    /// Excess of tentative minimum tax over regular tax; never negative.
    pub amt: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct AlternativeMinimumTax<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> AlternativeMinimumTax<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    pub fn calculate(
        &self,
        input: &AmtInput,
    ) -> AmtResult {
        let amti = non_negative(input.taxable_income + self.addback(input));
        let exemption = self.exemption(amti, input.filing_status);
        let base = non_negative(amti - exemption);

        let threshold = self.config.amt_rate_threshold;
        let lower = base.min(threshold) * self.config.amt_lower_rate;
        let upper = non_negative(base - threshold) * self.config.amt_upper_rate;
        let tentative_minimum_tax = round_currency(lower + upper);
        let amt = non_negative(tentative_minimum_tax - input.regular_tax);

        if amt > Decimal::ZERO {
            debug!(
                amti = %amti,
                tentative_minimum_tax = %tentative_minimum_tax,
                regular_tax = %input.regular_tax,
                amt = %amt,
                "Alternative minimum tax applies"
            );
        }

        AmtResult {
            alternative_minimum_taxable_income: round_currency(amti),
            exemption: round_currency(exemption),
            tentative_minimum_tax,
            amt,
        }
    }

    /// Add-back for itemizers only.
    fn addback(
        &self,
        input: &AmtInput,
    ) -> Decimal {
        match input.deduction_method {
            DeductionMethod::Standard => Decimal::ZERO,
            DeductionMethod::Itemized => (non_negative(input.itemized_deductions)
                * self.config.amt_itemized_addback_rate)
                .min(self.config.amt_itemized_addback_cap),
        }
    }

    fn exemption(
        &self,
        amti: Decimal,
        status: FilingStatusCode,
    ) -> Decimal {
        let full = *self.config.amt_exemption.get(status);
        let start = *self.config.amt_phaseout_start.get(status);
        let reduction = non_negative(amti - start) * self.config.amt_phaseout_rate;
        non_negative(full - reduction)
    }
}
