//! Net investment income tax.
//!
//! 3.8% of the lesser of net investment income and the amount by which
//! adjusted gross income exceeds the status threshold.

use rust_decimal::Decimal;

use crate::calculations::common::round_currency;
use crate::{FilingStatusCode, TaxYearConfig};

#[derive(Debug, Clone, Copy)]
pub struct NetInvestmentIncomeTax<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> NetInvestmentIncomeTax<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    pub fn calculate(
        &self,
        adjusted_gross_income: Decimal,
        net_investment_income: Decimal,
        status: FilingStatusCode,
    ) -> Decimal {
        let threshold = *self.config.niit_threshold.get(status);
        if adjusted_gross_income <= threshold || net_investment_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let base = net_investment_income.min(adjusted_gross_income - threshold);
        round_currency(base * self.config.niit_rate)
    }
}
