//! Rendering of a [`TaxReport`] for the terminal or for other programs.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::calculations::common::round_currency;
use tax_core::{DeductionMethod, SnapshotWarning, TaxReport};

const LABEL_WIDTH: usize = 34;
const VALUE_WIDTH: usize = 14;

/// Formats a currency amount as whole dollars with thousands separators.
pub fn money(value: Decimal) -> String {
    let rounded = round_currency(value);
    let digits = rounded.abs().normalize().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < Decimal::ZERO {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Formats a fractional rate as a percentage with two decimals.
pub fn percent(rate: Decimal) -> String {
    format!("{:.2}%", rate * Decimal::ONE_HUNDRED)
}

/// Plain-text summary: statutory lines, then entities, then planning hints.
pub struct TextReport<'a> {
    pub report: &'a TaxReport,
    pub warnings: Option<&'a [SnapshotWarning]>,
}

fn line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: impl fmt::Display,
) -> fmt::Result {
    writeln!(f, "  {label:<LABEL_WIDTH$}{value:>VALUE_WIDTH$}")
}

impl fmt::Display for TextReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.report;
        let state = if r.state.is_empty() { "no state" } else { &r.state };
        writeln!(f, "Tax estimate for {} ({}, {})", r.tax_year, r.filing_status, state)?;

        writeln!(f)?;
        writeln!(f, "Income")?;
        line(f, "Wages", money(r.income.wage_income))?;
        line(f, "Self-employment", money(r.income.self_employment_income))?;
        line(f, "Distributions", money(r.income.distribution_income))?;
        line(f, "Investment", money(r.income.investment_income))?;
        line(f, "Net portfolio gains", money(r.income.net_portfolio_gains))?;
        line(f, "Other", money(r.income.other_income))?;
        line(f, "Business expenses", money(r.income.business_expenses))?;
        line(f, "Gross income", money(r.income.gross_income))?;

        writeln!(f)?;
        writeln!(f, "Adjustments and deductions")?;
        line(f, "Half of SE tax", money(r.adjustments.se_tax_deduction))?;
        line(f, "Retirement contributions", money(r.adjustments.retirement_contributions))?;
        line(f, "Other adjustments", money(r.adjustments.other_adjustments))?;
        line(f, "Adjusted gross income", money(r.adjusted_gross_income))?;
        let method = match r.deduction_method {
            DeductionMethod::Standard => "Standard deduction",
            DeductionMethod::Itemized => "Itemized deductions",
        };
        line(f, method, money(r.deduction_amount))?;
        line(f, "QBI deduction", money(r.qbi_deduction))?;
        line(f, "Taxable income", money(r.taxable_income))?;

        writeln!(f)?;
        writeln!(f, "Taxes")?;
        line(f, "Federal income tax", money(r.federal_tax))?;
        line(f, "Self-employment tax", money(r.self_employment_tax))?;
        line(f, "State tax", money(r.state_tax))?;
        line(f, "Alternative minimum tax", money(r.amt))?;
        line(f, "Net investment income tax", money(r.niit))?;
        line(f, "Total tax", money(r.total_tax))?;
        line(f, "Effective rate", percent(r.effective_rate))?;
        line(f, "Marginal rate", percent(r.marginal_rate))?;
        line(f, "After-tax income", money(r.after_tax_income))?;

        writeln!(f)?;
        writeln!(f, "Withholding")?;
        line(f, "Withheld", money(r.withholding.total_withholding))?;
        if r.withholding.expected_refund > Decimal::ZERO {
            line(f, "Expected refund", money(r.withholding.expected_refund))?;
        } else {
            line(f, "Balance due", money(r.withholding.balance_due))?;
        }

        writeln!(f)?;
        writeln!(f, "Entities")?;
        for (id, pnl) in &r.entities {
            writeln!(
                f,
                "  {:<20}{:<22}{:>14}{:>14}",
                id,
                format!("{:?}", pnl.kind),
                money(pnl.net_income),
                money(pnl.owner_income),
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Planning hints (estimates)")?;
        let hints = &r.hints;
        line(f, "Retirement limit", money(hints.max_retirement_contribution))?;
        line(f, "Retirement contributed", money(hints.retirement_contributed))?;
        line(f, "Retirement headroom", money(hints.retirement_headroom))?;
        line(f, "Payroll election savings", money(hints.payroll_election_savings))?;
        for (id, ratio) in &hints.entity_salary_ratios {
            line(f, &format!("Salary ratio ({id})"), percent(*ratio))?;
        }

        if let Some(warnings) = self.warnings {
            writeln!(f)?;
            writeln!(f, "Warnings")?;
            if warnings.is_empty() {
                writeln!(f, "  none")?;
            }
            for warning in warnings {
                writeln!(f, "  - {warning}")?;
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a TaxReport,
    warnings: &'a [SnapshotWarning],
}

/// Pretty JSON of the report, wrapped with the warnings when they were requested.
pub fn render_json(
    report: &TaxReport,
    warnings: Option<&[SnapshotWarning]>,
) -> serde_json::Result<String> {
    match warnings {
        Some(warnings) => serde_json::to_string_pretty(&JsonOutput { report, warnings }),
        None => serde_json::to_string_pretty(report),
    }
}
