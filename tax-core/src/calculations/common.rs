//! Common utility functions for tax calculations.
//!
//! This module provides the rounding and clamping rules shared by every
//! calculator in the engine.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a value to whole currency units using half-up rounding.
///
/// Values at exactly .5 round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_currency;
///
/// assert_eq!(round_currency(dec!(123.49)), dec!(123));
/// assert_eq!(round_currency(dec!(123.50)), dec!(124));
/// assert_eq!(round_currency(dec!(-123.50)), dec!(-124)); // Away from zero
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a rate to four decimal places (hundredths of a percent).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_rate;
///
/// assert_eq!(round_rate(dec!(0.136145)), dec!(0.1361));
/// assert_eq!(round_rate(dec!(0.13615)), dec!(0.1362));
/// ```
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value at zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-5)), dec!(0));
/// assert_eq!(non_negative(dec!(5)), dec!(5));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
