use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::{full_rate, lenient_amount, lenient_full_rate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Advertising,
    Vehicle,
    Contractors,
    Insurance,
    Office,
    HomeOffice,
    Rent,
    Supplies,
    Software,
    Travel,
    Meals,
    Utilities,
    ProfessionalServices,
    #[default]
    #[serde(other)]
    Other,
}

/// A recurring cost, deductible at `deductible_pct` against its entity's revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    #[serde(default)]
    pub category: ExpenseCategory,
    #[serde(default, alias = "amount", deserialize_with = "lenient_amount")]
    pub annual_amount: Decimal,
    #[serde(default = "full_rate", deserialize_with = "lenient_full_rate")]
    pub deductible_pct: Decimal,
    #[serde(default)]
    pub entity_id: Option<String>,
}

impl Expense {
    /// The deductible part of the expense, never negative.
    pub fn deductible_amount(&self) -> Decimal {
        let pct = self.deductible_pct.clamp(Decimal::ZERO, Decimal::ONE);
        (self.annual_amount * pct).max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionCategory {
    #[serde(alias = "retirement", alias = "ira", alias = "401k")]
    RetirementContribution,
    #[serde(alias = "hsa")]
    HealthSavings,
    StudentLoanInterest,
    #[serde(alias = "mortgage")]
    MortgageInterest,
    #[serde(alias = "salt")]
    StateAndLocalTax,
    Charitable,
    Medical,
    #[default]
    #[serde(other)]
    Other,
}

impl DeductionCategory {
    /// Adjustments taken before AGI regardless of the itemized flag.
    pub fn is_above_the_line(&self) -> bool {
        match self {
            Self::RetirementContribution | Self::HealthSavings | Self::StudentLoanInterest => true,
            Self::MortgageInterest
            | Self::StateAndLocalTax
            | Self::Charitable
            | Self::Medical
            | Self::Other => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub id: String,
    #[serde(default)]
    pub category: DeductionCategory,
    #[serde(default, alias = "amount", deserialize_with = "lenient_amount")]
    pub annual_amount: Decimal,
    #[serde(default = "full_rate", deserialize_with = "lenient_full_rate")]
    pub deductible_pct: Decimal,
    #[serde(default)]
    pub itemized: bool,
    /// Owning entity, if any. Deductions are taken on the owner's return
    /// either way; the reference is only checked for validity.
    #[serde(default)]
    pub entity_id: Option<String>,
}

impl Deduction {
    pub fn deductible_amount(&self) -> Decimal {
        let pct = self.deductible_pct.clamp(Decimal::ZERO, Decimal::ONE);
        (self.annual_amount * pct).max(Decimal::ZERO)
    }
}

/// Only the annual depreciation estimate is consumed; schedules live elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationAsset {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub annual_depreciation: Decimal,
}
