//! Flat-rate state income tax approximation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{non_negative, round_currency};

/// Applies a single effective rate per jurisdiction to taxable income.
///
/// Jurisdiction codes are matched case-insensitively after trimming.
/// Unknown or empty codes approximate to zero.
#[derive(Debug, Clone, Copy)]
pub struct StateTaxApproximator<'a> {
    rates: &'a BTreeMap<String, Decimal>,
}

impl<'a> StateTaxApproximator<'a> {
    pub fn new(rates: &'a BTreeMap<String, Decimal>) -> Self {
        Self { rates }
    }

    pub fn rate(
        &self,
        state: &str,
    ) -> Option<Decimal> {
        let code = state.trim().to_ascii_uppercase();
        self.rates.get(&code).copied()
    }

    pub fn tax(
        &self,
        state: &str,
        taxable_income: Decimal,
    ) -> Decimal {
        let Some(rate) = self.rate(state) else {
            if !state.trim().is_empty() {
                debug!(state = %state, "No rate for jurisdiction; state tax is zero");
            }
            return Decimal::ZERO;
        };
        round_currency(non_negative(taxable_income) * rate)
    }
}
