//! Lenient deserialization for monetary and rate fields.
//!
//! Snapshots come from interactive editors where a field may be blank, hold
//! text, or hold a number that is not finite. None of that is allowed to
//! stop a computation, so every amount resolves to a finite [`Decimal`] and
//! anything unusable becomes zero (or `None` for optional fields). Amounts
//! beyond [`MAX_AMOUNT`] in either direction are capped so that summing a
//! snapshot can never overflow.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserializer;
use serde::de::{self, Visitor};
use tracing::warn;

/// Largest magnitude any single amount may carry (one quadrillion).
pub(crate) const MAX_AMOUNT: Decimal = dec!(1000000000000000);

fn capped(value: Decimal) -> Decimal {
    if value.abs() > MAX_AMOUNT {
        warn!(amount = %value, cap = %MAX_AMOUNT, "Amount out of range; capping");
        value.clamp(-MAX_AMOUNT, MAX_AMOUNT)
    } else {
        value
    }
}

fn parse_text(s: &str) -> Option<Decimal> {
    let trimmed = s.trim().trim_start_matches('$').replace(',', "");
    Decimal::from_str(&trimmed)
        .or_else(|_| Decimal::from_scientific(&trimmed))
        .ok()
        .map(capped)
}

struct OptionalAmountVisitor;

impl<'de> Visitor<'de> for OptionalAmountVisitor {
    type Value = Option<Decimal>;

    fn expecting(
        &self,
        formatter: &mut fmt::Formatter,
    ) -> fmt::Result {
        formatter.write_str("a number, a numeric string, or null")
    }

    fn visit_bool<E: de::Error>(
        self,
        _: bool,
    ) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(
        self,
        v: i64,
    ) -> Result<Self::Value, E> {
        Ok(Some(capped(Decimal::from(v))))
    }

    fn visit_u64<E: de::Error>(
        self,
        v: u64,
    ) -> Result<Self::Value, E> {
        Ok(Some(capped(Decimal::from(v))))
    }

    fn visit_f64<E: de::Error>(
        self,
        v: f64,
    ) -> Result<Self::Value, E> {
        // Shortest round-trip text keeps 0.9235 as 0.9235; NaN and
        // infinities fail to parse and fall through to None.
        Ok(parse_text(&v.to_string()))
    }

    fn visit_str<E: de::Error>(
        self,
        v: &str,
    ) -> Result<Self::Value, E> {
        Ok(parse_text(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

/// Deserializes an amount, resolving blank or non-numeric input to zero.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer
        .deserialize_any(OptionalAmountVisitor)?
        .unwrap_or(Decimal::ZERO))
}

/// Deserializes an optional amount, resolving blank or non-numeric input to `None`.
pub(crate) fn lenient_optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(OptionalAmountVisitor)
}

/// Deserializes a fraction that defaults to 1 (fully applicable) when blank.
pub(crate) fn lenient_full_rate<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer
        .deserialize_any(OptionalAmountVisitor)?
        .unwrap_or(Decimal::ONE))
}

pub(crate) fn full_rate() -> Decimal {
    Decimal::ONE
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "lenient_amount")]
        amount: Decimal,
        #[serde(default, deserialize_with = "lenient_optional_amount")]
        optional: Option<Decimal>,
        #[serde(default = "full_rate", deserialize_with = "lenient_full_rate")]
        rate: Decimal,
    }

    fn parse_fields(json: &str) -> Fields {
        serde_json::from_str(json).expect("lenient fields always deserialize")
    }

    #[test]
    fn accepts_integer_and_float_numbers() {
        let p = parse_fields(r#"{"amount": 1500, "optional": 12.5, "rate": 0.5}"#);

        assert_eq!(p.amount, dec!(1500));
        assert_eq!(p.optional, Some(dec!(12.5)));
        assert_eq!(p.rate, dec!(0.5));
    }

    #[test]
    fn parses_numeric_strings_with_currency_formatting() {
        let p = parse_fields(r#"{"amount": "$12,500.75", "optional": " 300 "}"#);

        assert_eq!(p.amount, dec!(12500.75));
        assert_eq!(p.optional, Some(dec!(300)));
    }

    #[test]
    fn non_numeric_text_resolves_to_zero() {
        let p = parse_fields(r#"{"amount": "n/a", "optional": "unknown", "rate": "?"}"#);

        assert_eq!(p.amount, Decimal::ZERO);
        assert_eq!(p.optional, None);
        assert_eq!(p.rate, Decimal::ONE);
    }

    #[test]
    fn null_and_missing_fields_use_defaults() {
        let p = parse_fields(r#"{"amount": null}"#);

        assert_eq!(p.amount, Decimal::ZERO);
        assert_eq!(p.optional, None);
        assert_eq!(p.rate, Decimal::ONE);
    }

    #[test]
    fn booleans_resolve_to_zero() {
        let p = parse_fields(r#"{"amount": true}"#);

        assert_eq!(p.amount, Decimal::ZERO);
    }

    #[test]
    fn negative_amounts_are_preserved_for_later_clamping() {
        let p = parse_fields(r#"{"amount": -250}"#);

        assert_eq!(p.amount, dec!(-250));
    }

    #[test]
    fn out_of_range_amounts_are_capped() {
        let p = parse_fields(
            r#"{"amount": "50000000000000000000000000000", "optional": -18446744073709551615}"#,
        );

        assert_eq!(p.amount, MAX_AMOUNT);
        assert_eq!(p.optional, Some(-MAX_AMOUNT));
    }
}
