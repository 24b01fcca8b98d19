use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::lenient_amount;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    #[serde(alias = "w2", alias = "salary")]
    Wage,
    Business,
    #[serde(alias = "1099", alias = "contract")]
    Freelance,
    #[serde(alias = "dividends", alias = "interest")]
    Investment,
    Rental,
    Passive,
    #[default]
    #[serde(other)]
    Other,
}

/// Payroll details carried by wage streams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageDetails {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub withholding: Decimal,
    /// Elective deferrals and other pre-tax payroll deductions.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub pre_tax_deductions: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub employer_match: Decimal,
}

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStream {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: IncomeCategory,
    #[serde(default, alias = "amount", deserialize_with = "lenient_amount")]
    pub annual_amount: Decimal,
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub wage: Option<WageDetails>,
}
