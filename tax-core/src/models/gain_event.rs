use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::lenient_amount;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GainStatus {
    Realized,
    #[default]
    #[serde(other)]
    Unrealized,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingTerm {
    #[serde(alias = "short")]
    ShortTerm,
    #[default]
    #[serde(other)]
    LongTerm,
}

/// A gain or loss computed by the portfolio tracker.
///
/// `estimated_gain` is negative for a loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealizedGainEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: GainStatus,
    pub tax_year: i32,
    #[serde(default, alias = "amount", deserialize_with = "lenient_amount")]
    pub estimated_gain: Decimal,
    #[serde(default)]
    pub term: HoldingTerm,
}
