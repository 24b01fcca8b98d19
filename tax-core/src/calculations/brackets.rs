//! Progressive bracket integration.
//!
//! Tax owed is the sum, over every segment whose lower bound is below the
//! income, of `rate × (min(income, max) − min)`. Crossing a boundary only
//! changes the rate applied to the incremental dollar.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::BracketEvaluator;
//! use tax_core::{FilingStatusCode, TaxYearTables};
//!
//! let tables = TaxYearTables::tax_year_2025();
//! let evaluator = BracketEvaluator::new(tables.brackets_for(FilingStatusCode::Single));
//!
//! assert_eq!(evaluator.tax(dec!(85000)), dec!(13614));
//! assert_eq!(evaluator.marginal_rate(dec!(85000)), dec!(0.22));
//! ```

use rust_decimal::Decimal;

use crate::TaxBracket;
use crate::calculations::common::round_currency;

/// Integrates a marginal-rate schedule over a taxable amount.
///
/// Schedules are expected to be sorted by `min_income` and non-overlapping,
/// which [`TaxYearTables::validate`](crate::TaxYearTables::validate) enforces.
#[derive(Debug, Clone, Copy)]
pub struct BracketEvaluator<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> BracketEvaluator<'a> {
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Tax owed on `taxable_income`, rounded to whole units. Zero for income ≤ 0.
    pub fn tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let tax: Decimal = self
            .brackets
            .iter()
            .filter(|b| b.min_income < taxable_income)
            .map(|b| {
                let upper = b
                    .max_income
                    .map_or(taxable_income, |max| max.min(taxable_income));
                (upper - b.min_income) * b.tax_rate
            })
            .sum();

        round_currency(tax)
    }

    /// Rate of the bracket containing `taxable_income`.
    ///
    /// Income of zero or less reports the first bracket's rate, since that is
    /// the rate the next dollar would pay.
    pub fn marginal_rate(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.brackets
            .iter()
            .find(|b| b.contains(taxable_income))
            .or_else(|| self.brackets.first())
            .map_or(Decimal::ZERO, |b| b.tax_rate)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{FilingStatusCode, TaxYearTables};

    fn single() -> Vec<TaxBracket> {
        TaxYearTables::tax_year_2025()
            .brackets_for(FilingStatusCode::Single)
            .to_vec()
    }

    // =========================================================================
    // tax tests
    // =========================================================================

    #[test]
    fn tax_is_zero_for_zero_income() {
        let brackets = single();

        assert_eq!(BracketEvaluator::new(&brackets).tax(Decimal::ZERO), dec!(0));
    }

    #[test]
    fn tax_is_zero_for_negative_income() {
        let brackets = single();

        assert_eq!(BracketEvaluator::new(&brackets).tax(dec!(-5000)), dec!(0));
    }

    #[test]
    fn tax_within_first_bracket() {
        let brackets = single();

        assert_eq!(BracketEvaluator::new(&brackets).tax(dec!(10000)), dec!(1000));
    }

    #[test]
    fn tax_at_bracket_boundary() {
        let brackets = single();

        // 1,192.50 + 36,550 × 12% = 5,578.50
        assert_eq!(BracketEvaluator::new(&brackets).tax(dec!(48475)), dec!(5579));
    }

    #[test]
    fn tax_on_full_hundred_thousand() {
        let brackets = single();

        // 5,578.50 + 51,525 × 22% = 16,914
        assert_eq!(BracketEvaluator::new(&brackets).tax(dec!(100000)), dec!(16914));
    }

    #[test]
    fn tax_in_top_bracket() {
        let brackets = single();

        // 188,769.75 + 373,650 × 37% = 327,020.25
        assert_eq!(BracketEvaluator::new(&brackets).tax(dec!(1000000)), dec!(327020));
    }

    #[test]
    fn tax_is_non_decreasing_across_boundaries() {
        let brackets = single();
        let evaluator = BracketEvaluator::new(&brackets);

        let mut previous = Decimal::ZERO;
        let mut income = Decimal::ZERO;
        while income <= dec!(700000) {
            let tax = evaluator.tax(income);
            assert!(tax >= previous, "tax fell at {income}");
            previous = tax;
            income += dec!(2500);
        }
    }

    #[test]
    fn crossing_a_boundary_only_taxes_the_next_dollar_higher() {
        let brackets = single();
        let evaluator = BracketEvaluator::new(&brackets);

        let below = evaluator.tax(dec!(103350));
        let above = evaluator.tax(dec!(103450));

        assert_eq!(above - below, dec!(24));
    }

    #[test]
    fn tax_with_empty_schedule_is_zero() {
        assert_eq!(BracketEvaluator::new(&[]).tax(dec!(50000)), dec!(0));
    }

    // =========================================================================
    // marginal_rate tests
    // =========================================================================

    #[test]
    fn marginal_rate_finds_containing_bracket() {
        let brackets = single();

        assert_eq!(
            BracketEvaluator::new(&brackets).marginal_rate(dec!(150000)),
            dec!(0.24)
        );
    }

    #[test]
    fn marginal_rate_at_upper_edge_stays_in_lower_bracket() {
        let brackets = single();

        assert_eq!(
            BracketEvaluator::new(&brackets).marginal_rate(dec!(11925)),
            dec!(0.10)
        );
    }

    #[test]
    fn marginal_rate_for_zero_income_is_first_rate() {
        let brackets = single();

        assert_eq!(
            BracketEvaluator::new(&brackets).marginal_rate(Decimal::ZERO),
            dec!(0.10)
        );
    }

    #[test]
    fn marginal_rate_in_unbounded_bracket() {
        let brackets = single();

        assert_eq!(
            BracketEvaluator::new(&brackets).marginal_rate(dec!(5000000)),
            dec!(0.37)
        );
    }
}
