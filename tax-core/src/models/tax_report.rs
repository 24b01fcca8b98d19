use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EntityPnL, FilingStatusCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionMethod {
    Standard,
    Itemized,
}

/// Income totals by source.
///
/// `gross_income` counts entity revenue before entity-level expenses, so
/// `gross_income - business_expenses` equals the sum of the net sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    /// Wage streams net of pre-tax deductions plus officer salaries.
    pub wage_income: Decimal,
    pub self_employment_income: Decimal,
    pub distribution_income: Decimal,
    pub investment_income: Decimal,
    /// Net realized short-term result; negative for a net loss.
    pub short_term_gains: Decimal,
    /// Net realized long-term result; negative for a net loss.
    pub long_term_gains: Decimal,
    /// Short plus long term, floored at zero.
    pub net_portfolio_gains: Decimal,
    pub other_income: Decimal,
    pub business_revenue: Decimal,
    pub business_expenses: Decimal,
    pub gross_income: Decimal,
}

/// Above-the-line adjustments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustments {
    pub se_tax_deduction: Decimal,
    pub retirement_contributions: Decimal,
    pub other_adjustments: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentTaxLines {
    pub net_earnings: Decimal,
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    pub additional_medicare_tax: Decimal,
    pub total: Decimal,
    pub deductible_half: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingReconciliation {
    pub total_withholding: Decimal,
    pub balance_due: Decimal,
    pub expected_refund: Decimal,
}

/// Planning projections derived from the report.
///
/// These are estimates built on policy assumptions, not statutory figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationHints {
    pub max_retirement_contribution: Decimal,
    pub retirement_contributed: Decimal,
    pub retirement_headroom: Decimal,
    pub payroll_election_savings: Decimal,
    /// Officer salary / net income per salary-distribution entity.
    pub entity_salary_ratios: BTreeMap<String, Decimal>,
}

/// Consolidated output of one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReport {
    pub tax_year: i32,
    pub filing_status: FilingStatusCode,
    pub state: String,

    pub income: IncomeBreakdown,
    pub adjustments: Adjustments,
    pub adjusted_gross_income: Decimal,

    pub deduction_method: DeductionMethod,
    pub standard_deduction: Decimal,
    pub itemized_deductions: Decimal,
    pub deduction_amount: Decimal,
    pub qbi_deduction: Decimal,
    pub taxable_income: Decimal,

    pub federal_tax: Decimal,
    pub self_employment: SelfEmploymentTaxLines,
    pub self_employment_tax: Decimal,
    pub state_tax: Decimal,
    pub alternative_minimum_taxable_income: Decimal,
    pub amt: Decimal,
    pub niit: Decimal,
    pub total_tax: Decimal,

    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    pub after_tax_income: Decimal,
    pub withholding: WithholdingReconciliation,

    pub entities: BTreeMap<String, EntityPnL>,

    pub hints: OptimizationHints,
}
