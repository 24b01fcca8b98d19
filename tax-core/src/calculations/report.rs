//! Report assembly.
//!
//! [`TaxEngine::compute`] runs every calculator over one snapshot in a fixed
//! order:
//!
//! 1. Per-entity ledger ([`EntityClassifier`])
//! 2. Income totals by source, including realized gains for the table year
//! 3. Adjustments (deductible half of SE tax, above-the-line deductions) and AGI
//! 4. Standard versus itemized deduction
//! 5. QBI deduction per service and non-service pool, capped at 20% of
//!    taxable income before the deduction
//! 6. Federal, self-employment, state, AMT, and NIIT lines
//! 7. Rates, after-tax income, withholding reconciliation
//! 8. Advisory hints
//!
//! Each line is rounded to whole units as it is produced.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{non_negative, round_currency, round_rate};
use crate::calculations::entity_flow::{EntityClassifier, StreamRoute, route_stream};
use crate::calculations::hints::{HintCalculator, HintInputs};
use crate::calculations::{
    AlternativeMinimumTax, AmtInput, BracketEvaluator, NetInvestmentIncomeTax, PlanningPolicy,
    QbiDeduction, QbiInput, SeTaxConfig, SelfEmploymentTax, StateTaxApproximator,
};
use crate::{
    Adjustments, DeductionCategory, DeductionMethod, EntityPnL, FilingStatusCode,
    FinancialSnapshot, GainStatus, HoldingTerm, IncomeBreakdown,
    PERSONAL_ENTITY_ID, TaxReport, TaxTablesError, TaxYearTables, WithholdingReconciliation,
};

/// The tax computation engine.
///
/// Holds validated tables and policy; [`compute`](Self::compute) is a pure
/// function of the snapshot.
#[derive(Debug, Clone)]
pub struct TaxEngine {
    tables: TaxYearTables,
    policy: PlanningPolicy,
    se_tax: SelfEmploymentTax,
}

/// Wage-stream totals that feed income, reconciliation, and hints.
#[derive(Debug, Default)]
struct WageTotals {
    net_wages: Decimal,
    withholding: Decimal,
    deferrals: Decimal,
    employer_match: Decimal,
}

#[derive(Debug, Default)]
struct GainTotals {
    short_term: Decimal,
    long_term: Decimal,
}

struct DeductionChoice {
    method: DeductionMethod,
    standard: Decimal,
    itemized: Decimal,
    amount: Decimal,
}

impl TaxEngine {
    /// Builds an engine after validating the tables and policy.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxTablesError`] found.
    pub fn new(
        tables: TaxYearTables,
        policy: PlanningPolicy,
    ) -> Result<Self, TaxTablesError> {
        tables.validate()?;
        policy.validate()?;
        let se_tax = SelfEmploymentTax::new(SeTaxConfig::from_tax_year_config(&tables.config));
        Ok(Self {
            tables,
            policy,
            se_tax,
        })
    }

    /// Engine over the built-in 2025 tables and default policy.
    pub fn tax_year_2025() -> Self {
        let tables = TaxYearTables::tax_year_2025();
        let se_tax = SelfEmploymentTax::new(SeTaxConfig::from_tax_year_config(&tables.config));
        Self {
            tables,
            policy: PlanningPolicy::default(),
            se_tax,
        }
    }

    pub fn tables(&self) -> &TaxYearTables {
        &self.tables
    }

    pub fn policy(&self) -> &PlanningPolicy {
        &self.policy
    }

    pub fn compute(
        &self,
        snapshot: &FinancialSnapshot,
    ) -> TaxReport {
        let config = &self.tables.config;
        let profile = &snapshot.profile;
        let status = profile.filing_status;

        let entities = EntityClassifier::new(&self.policy).classify(snapshot);
        let wages = self.wage_totals(snapshot, &entities);
        let income = self.income_breakdown(snapshot, &entities, &wages);

        let self_employment = self.se_tax.calculate(income.self_employment_income);
        let adjustments = self.adjustments(snapshot, self_employment.deductible_half);
        let adjusted_gross_income = non_negative(
            income.gross_income - income.business_expenses - adjustments.total,
        );

        let deduction = self.deduction(snapshot, status);
        let taxable_before_qbi = non_negative(adjusted_gross_income - deduction.amount);
        let qbi_deduction = self.qbi_deduction(&entities, taxable_before_qbi, status);
        let taxable_income = non_negative(taxable_before_qbi - qbi_deduction);

        let evaluator = BracketEvaluator::new(self.tables.brackets_for(status));
        let federal_tax = evaluator.tax(taxable_income);
        let state_tax =
            StateTaxApproximator::new(&self.tables.state_rates).tax(&profile.state, taxable_income);
        let amt = AlternativeMinimumTax::new(config).calculate(&AmtInput {
            taxable_income,
            regular_tax: federal_tax,
            filing_status: status,
            deduction_method: deduction.method,
            itemized_deductions: deduction.itemized,
        });
        let niit = NetInvestmentIncomeTax::new(config).calculate(
            adjusted_gross_income,
            income.investment_income + income.net_portfolio_gains,
            status,
        );

        let total_tax = federal_tax + self_employment.total + state_tax + amt.amt + niit;
        let effective_rate = if income.gross_income > Decimal::ZERO {
            round_rate(total_tax / income.gross_income)
        } else {
            Decimal::ZERO
        };
        let marginal_rate = evaluator.marginal_rate(taxable_income);
        let after_tax_income = income.gross_income - income.business_expenses - total_tax;

        let withholding = WithholdingReconciliation {
            total_withholding: wages.withholding,
            balance_due: non_negative(total_tax - wages.withholding),
            expected_refund: non_negative(wages.withholding - total_tax),
        };

        let hints = HintCalculator::new(config, &self.policy, &self.se_tax).calculate(&HintInputs {
            age: profile.age,
            self_employment_income: income.self_employment_income,
            se_tax_deductible_half: self_employment.deductible_half,
            retirement_deductions: adjustments.retirement_contributions,
            wage_deferrals: wages.deferrals,
            employer_match: wages.employer_match,
            entities: &entities,
        });

        debug!(
            gross_income = %income.gross_income,
            agi = %adjusted_gross_income,
            taxable_income = %taxable_income,
            total_tax = %total_tax,
            "Computed tax report"
        );

        TaxReport {
            tax_year: self.tables.tax_year(),
            filing_status: status,
            state: profile.state.trim().to_ascii_uppercase(),
            income,
            adjustments,
            adjusted_gross_income,
            deduction_method: deduction.method,
            standard_deduction: deduction.standard,
            itemized_deductions: deduction.itemized,
            deduction_amount: deduction.amount,
            qbi_deduction,
            taxable_income,
            federal_tax,
            self_employment_tax: self_employment.total,
            self_employment,
            state_tax,
            alternative_minimum_taxable_income: amt.alternative_minimum_taxable_income,
            amt: amt.amt,
            niit,
            total_tax,
            effective_rate,
            marginal_rate,
            after_tax_income,
            withholding,
            entities,
            hints,
        }
    }

    fn wage_totals(
        &self,
        snapshot: &FinancialSnapshot,
        entities: &BTreeMap<String, EntityPnL>,
    ) -> WageTotals {
        let mut totals = WageTotals::default();
        for stream in snapshot.active_income() {
            if route_stream(stream, |id| is_entity(entities, id)) != StreamRoute::Wage {
                continue;
            }
            let details = stream.wage.clone().unwrap_or_default();
            let deferrals = non_negative(details.pre_tax_deductions);
            totals.net_wages += non_negative(stream.annual_amount - deferrals);
            totals.withholding += non_negative(details.withholding);
            totals.deferrals += deferrals;
            totals.employer_match += non_negative(details.employer_match);
        }
        WageTotals {
            net_wages: round_currency(totals.net_wages),
            withholding: round_currency(totals.withholding),
            deferrals: round_currency(totals.deferrals),
            employer_match: round_currency(totals.employer_match),
        }
    }

    fn income_breakdown(
        &self,
        snapshot: &FinancialSnapshot,
        entities: &BTreeMap<String, EntityPnL>,
        wages: &WageTotals,
    ) -> IncomeBreakdown {
        let mut investment_income = Decimal::ZERO;
        let mut other_income = Decimal::ZERO;
        for stream in snapshot.active_income() {
            match route_stream(stream, |id| is_entity(entities, id)) {
                StreamRoute::Investment => investment_income += non_negative(stream.annual_amount),
                StreamRoute::OtherIncome => other_income += non_negative(stream.annual_amount),
                StreamRoute::Wage | StreamRoute::EntityRevenue(_) => {}
            }
        }

        let gains = self.gain_totals(snapshot);
        let short_term_gains = round_currency(gains.short_term);
        let long_term_gains = round_currency(gains.long_term);
        let net_portfolio_gains = non_negative(short_term_gains + long_term_gains);

        let officer_salaries: Decimal = entities.values().map(|e| e.officer_salary).sum();
        let self_employment_income = entities.values().map(|e| e.se_taxable).sum();
        let distribution_income = entities.values().map(|e| e.distribution).sum();
        let business_revenue: Decimal = entities.values().map(|e| e.owner_revenue).sum();
        let business_expenses = entities.values().map(EntityPnL::owner_expenses).sum();

        let investment_income = round_currency(investment_income);
        let other_income = round_currency(other_income);
        let gross_income = wages.net_wages
            + business_revenue
            + investment_income
            + net_portfolio_gains
            + other_income;

        IncomeBreakdown {
            wage_income: wages.net_wages + officer_salaries,
            self_employment_income,
            distribution_income,
            investment_income,
            short_term_gains,
            long_term_gains,
            net_portfolio_gains,
            other_income,
            business_revenue,
            business_expenses,
            gross_income,
        }
    }

    /// Realized events for the table year, netted within each term.
    fn gain_totals(
        &self,
        snapshot: &FinancialSnapshot,
    ) -> GainTotals {
        let year = self.tables.tax_year();
        let mut totals = GainTotals::default();
        for event in &snapshot.gain_events {
            if event.status != GainStatus::Realized || event.tax_year != year {
                continue;
            }
            match event.term {
                HoldingTerm::ShortTerm => totals.short_term += event.estimated_gain,
                HoldingTerm::LongTerm => totals.long_term += event.estimated_gain,
            }
        }
        totals
    }

    fn adjustments(
        &self,
        snapshot: &FinancialSnapshot,
        se_tax_deduction: Decimal,
    ) -> Adjustments {
        let mut retirement_contributions = Decimal::ZERO;
        let mut other_adjustments = Decimal::ZERO;
        for deduction in &snapshot.deductions {
            match deduction.category {
                DeductionCategory::RetirementContribution => {
                    retirement_contributions += deduction.deductible_amount();
                }
                category if category.is_above_the_line() => {
                    other_adjustments += deduction.deductible_amount();
                }
                _ => {}
            }
        }

        let retirement_contributions = round_currency(retirement_contributions);
        let other_adjustments = round_currency(other_adjustments);
        Adjustments {
            se_tax_deduction,
            retirement_contributions,
            other_adjustments,
            total: se_tax_deduction + retirement_contributions + other_adjustments,
        }
    }

    /// The larger of the standard deduction and itemized entries.
    fn deduction(
        &self,
        snapshot: &FinancialSnapshot,
        status: FilingStatusCode,
    ) -> DeductionChoice {
        let standard = *self.tables.config.standard_deduction.get(status);
        let itemized = round_currency(
            snapshot
                .deductions
                .iter()
                .filter(|d| d.itemized && !d.category.is_above_the_line())
                .map(|d| d.deductible_amount())
                .sum(),
        );

        if itemized > standard {
            DeductionChoice {
                method: DeductionMethod::Itemized,
                standard,
                itemized,
                amount: itemized,
            }
        } else {
            DeductionChoice {
                method: DeductionMethod::Standard,
                standard,
                itemized,
                amount: standard,
            }
        }
    }

    /// QBI deduction over the service and non-service pools.
    fn qbi_deduction(
        &self,
        entities: &BTreeMap<String, EntityPnL>,
        taxable_before_qbi: Decimal,
        status: FilingStatusCode,
    ) -> Decimal {
        let calculator = QbiDeduction::new(&self.tables.config);
        let pool = |service: bool| {
            let members = entities
                .values()
                .filter(|e| e.is_service_business == service && e.qbi_eligible > Decimal::ZERO);
            let mut input = QbiInput {
                qualified_income: Decimal::ZERO,
                taxable_income: taxable_before_qbi,
                filing_status: status,
                is_service_business: service,
                w2_wages: Decimal::ZERO,
                qualified_property: Decimal::ZERO,
            };
            for entity in members {
                input.qualified_income += entity.qbi_eligible;
                input.w2_wages += entity.w2_wages_paid;
                input.qualified_property += entity.qualified_property;
            }
            calculator.calculate(&input)
        };

        let combined = pool(true) + pool(false);
        let cap = round_currency(taxable_before_qbi * self.tables.config.qbi_rate);
        if combined > cap {
            debug!(
                combined = %combined,
                cap = %cap,
                "QBI deduction limited to 20% of taxable income"
            );
        }
        combined.min(cap)
    }
}

impl Default for TaxEngine {
    fn default() -> Self {
        Self::tax_year_2025()
    }
}

/// Whether `id` names an entity in the ledger other than `personal`.
fn is_entity(
    entities: &BTreeMap<String, EntityPnL>,
    id: &str,
) -> bool {
    id != PERSONAL_ENTITY_ID && entities.contains_key(id)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        Deduction, EntityKind, Expense, ExpenseCategory, IncomeCategory, IncomeStream,
        LegalEntity, RealizedGainEvent, WageDetails,
    };

    fn engine() -> TaxEngine {
        TaxEngine::default()
    }

    fn stream(
        id: &str,
        category: IncomeCategory,
        amount: Decimal,
    ) -> IncomeStream {
        IncomeStream {
            id: id.into(),
            name: id.into(),
            category,
            annual_amount: amount,
            active: true,
            entity_id: None,
            wage: None,
        }
    }

    fn deduction(
        category: DeductionCategory,
        amount: Decimal,
        itemized: bool,
    ) -> Deduction {
        Deduction {
            id: format!("{category:?}"),
            category,
            annual_amount: amount,
            deductible_pct: dec!(1),
            itemized,
            entity_id: None,
        }
    }

    fn gain(
        amount: Decimal,
        term: HoldingTerm,
        status: GainStatus,
        tax_year: i32,
    ) -> RealizedGainEvent {
        RealizedGainEvent {
            id: "g".into(),
            status,
            tax_year,
            estimated_gain: amount,
            term,
        }
    }

    // =========================================================================
    // construction
    // =========================================================================

    #[test]
    fn new_rejects_invalid_policy() {
        let policy = PlanningPolicy {
            s_corp_default_salary_ratio: dec!(-0.1),
            ..PlanningPolicy::default()
        };

        let result = TaxEngine::new(TaxYearTables::tax_year_2025(), policy);

        assert!(matches!(result, Err(TaxTablesError::RateOutOfRange { .. })));
    }

    #[test]
    fn new_rejects_invalid_tables() {
        let mut tables = TaxYearTables::tax_year_2025();
        tables.config.qbi_phase_in_range = dec!(0);

        let result = TaxEngine::new(tables, PlanningPolicy::default());

        assert!(matches!(result, Err(TaxTablesError::NonPositive { .. })));
    }

    // =========================================================================
    // income and deductions
    // =========================================================================

    #[test]
    fn wage_pre_tax_deductions_reduce_wages() {
        let mut job = stream("job", IncomeCategory::Wage, dec!(100000));
        job.wage = Some(WageDetails {
            withholding: dec!(15000),
            pre_tax_deductions: dec!(10000),
            employer_match: dec!(4000),
        });
        let snapshot = FinancialSnapshot {
            income_streams: vec![job],
            ..FinancialSnapshot::default()
        };

        let report = engine().compute(&snapshot);

        assert_eq!(report.income.wage_income, dec!(90000));
        assert_eq!(report.taxable_income, dec!(75000));
        assert_eq!(report.withholding.total_withholding, dec!(15000));
        assert_eq!(report.hints.retirement_contributed, dec!(14000));
        assert_eq!(report.hints.retirement_headroom, dec!(9500));
    }

    #[test]
    fn itemizes_when_itemized_exceeds_standard() {
        let snapshot = FinancialSnapshot {
            income_streams: vec![stream("job", IncomeCategory::Wage, dec!(200000))],
            deductions: vec![
                deduction(DeductionCategory::MortgageInterest, dec!(18000), true),
                deduction(DeductionCategory::StateAndLocalTax, dec!(10000), true),
                deduction(DeductionCategory::Charitable, dec!(2000), false),
            ],
            ..FinancialSnapshot::default()
        };

        let report = engine().compute(&snapshot);

        assert_eq!(report.deduction_method, DeductionMethod::Itemized);
        assert_eq!(report.itemized_deductions, dec!(28000));
        assert_eq!(report.deduction_amount, dec!(28000));
        assert_eq!(report.taxable_income, dec!(172000));
        // 172,000 + min(14,000, 10,000)
        assert_eq!(report.alternative_minimum_taxable_income, dec!(182000));
    }

    #[test]
    fn above_the_line_deductions_reduce_agi() {
        let snapshot = FinancialSnapshot {
            income_streams: vec![stream("job", IncomeCategory::Wage, dec!(100000))],
            deductions: vec![
                deduction(DeductionCategory::RetirementContribution, dec!(7000), false),
                deduction(DeductionCategory::HealthSavings, dec!(4000), false),
            ],
            ..FinancialSnapshot::default()
        };

        let report = engine().compute(&snapshot);

        assert_eq!(report.adjustments.retirement_contributions, dec!(7000));
        assert_eq!(report.adjustments.other_adjustments, dec!(4000));
        assert_eq!(report.adjusted_gross_income, dec!(89000));
    }

    #[test]
    fn gains_use_realized_events_for_table_year() {
        let snapshot = FinancialSnapshot {
            income_streams: vec![stream("job", IncomeCategory::Wage, dec!(50000))],
            gain_events: vec![
                gain(dec!(8000), HoldingTerm::LongTerm, GainStatus::Realized, 2025),
                gain(dec!(-3000), HoldingTerm::ShortTerm, GainStatus::Realized, 2025),
                gain(dec!(50000), HoldingTerm::LongTerm, GainStatus::Unrealized, 2025),
                gain(dec!(9000), HoldingTerm::ShortTerm, GainStatus::Realized, 2024),
            ],
            ..FinancialSnapshot::default()
        };

        let report = engine().compute(&snapshot);

        assert_eq!(report.income.long_term_gains, dec!(8000));
        assert_eq!(report.income.short_term_gains, dec!(-3000));
        assert_eq!(report.income.net_portfolio_gains, dec!(5000));
        assert_eq!(report.income.gross_income, dec!(55000));
    }

    #[test]
    fn net_portfolio_loss_is_floored_at_zero() {
        let snapshot = FinancialSnapshot {
            gain_events: vec![gain(dec!(-20000), HoldingTerm::LongTerm, GainStatus::Realized, 2025)],
            ..FinancialSnapshot::default()
        };

        let report = engine().compute(&snapshot);

        assert_eq!(report.income.net_portfolio_gains, dec!(0));
        assert_eq!(report.total_tax, dec!(0));
    }

    #[test]
    fn unowned_rental_income_is_other_income() {
        let snapshot = FinancialSnapshot {
            income_streams: vec![stream("rent", IncomeCategory::Rental, dec!(24000))],
            ..FinancialSnapshot::default()
        };

        let report = engine().compute(&snapshot);

        assert_eq!(report.income.other_income, dec!(24000));
        assert_eq!(report.self_employment_tax, dec!(0));
    }

    // =========================================================================
    // entities
    // =========================================================================

    #[test]
    fn s_corp_salary_is_wage_income_and_distribution_is_qbi() {
        let mut biz = stream("biz", IncomeCategory::Business, dec!(100000));
        biz.entity_id = Some("s".into());
        let snapshot = FinancialSnapshot {
            income_streams: vec![biz],
            entities: vec![LegalEntity {
                id: "s".into(),
                name: "S Co".into(),
                kind: EntityKind::SCorporation,
                formation_state: "DE".into(),
                active: true,
                officer_salary: Some(dec!(50000)),
                ownership_pct: None,
                is_service_business: false,
                w2_wages_paid: None,
                qualified_property: None,
            }],
            ..FinancialSnapshot::default()
        };

        let report = engine().compute(&snapshot);

        assert_eq!(report.income.wage_income, dec!(50000));
        assert_eq!(report.income.distribution_income, dec!(50000));
        assert_eq!(report.income.gross_income, dec!(100000));
        assert_eq!(report.self_employment_tax, dec!(0));
        // 20% × 50,000 distribution
        assert_eq!(report.qbi_deduction, dec!(10000));
        assert_eq!(report.taxable_income, dec!(75000));
        assert_eq!(report.hints.entity_salary_ratios.get("s"), Some(&dec!(0.5)));
    }

    #[test]
    fn partner_qbi_wage_limit_uses_allocable_wages() {
        let mut biz = stream("biz", IncomeCategory::Business, dec!(400000));
        biz.entity_id = Some("p".into());
        let snapshot = FinancialSnapshot {
            income_streams: vec![stream("job", IncomeCategory::Wage, dec!(400000)), biz],
            entities: vec![LegalEntity {
                id: "p".into(),
                name: "Partners".into(),
                kind: EntityKind::Partnership,
                formation_state: "DE".into(),
                active: true,
                officer_salary: None,
                ownership_pct: Some(dec!(0.10)),
                is_service_business: false,
                w2_wages_paid: Some(dec!(100000)),
                qualified_property: None,
            }],
            ..FinancialSnapshot::default()
        };

        let report = engine().compute(&snapshot);

        assert_eq!(report.entities["p"].qbi_eligible, dec!(40000));
        assert!(report.taxable_income > dec!(247300));
        // 50% × (10% of 100,000 wages), below 20% × 40,000
        assert_eq!(report.qbi_deduction, dec!(5000));
    }

    #[test]
    fn c_corp_expenses_stay_inside_the_corporation() {
        let mut biz = stream("biz", IncomeCategory::Business, dec!(300000));
        biz.entity_id = Some("c".into());
        let snapshot = FinancialSnapshot {
            income_streams: vec![biz],
            expenses: vec![Expense {
                id: "rent".into(),
                category: ExpenseCategory::Rent,
                annual_amount: dec!(100000),
                deductible_pct: dec!(1),
                entity_id: Some("c".into()),
            }],
            entities: vec![LegalEntity {
                id: "c".into(),
                name: "C Co".into(),
                kind: EntityKind::CCorporation,
                formation_state: "DE".into(),
                active: true,
                officer_salary: None,
                ownership_pct: None,
                is_service_business: false,
                w2_wages_paid: None,
                qualified_property: None,
            }],
            ..FinancialSnapshot::default()
        };

        let report = engine().compute(&snapshot);

        assert_eq!(report.income.wage_income, dec!(100000));
        assert_eq!(report.income.gross_income, dec!(100000));
        assert_eq!(report.income.business_expenses, dec!(0));
        assert_eq!(report.entities["c"].retained_earnings, dec!(100000));
        assert_eq!(report.qbi_deduction, dec!(0));
    }

    #[test]
    fn qbi_total_is_capped_at_twenty_percent_of_taxable_income() {
        let snapshot = FinancialSnapshot {
            income_streams: vec![stream("gig", IncomeCategory::Freelance, dec!(40000))],
            deductions: vec![deduction(
                DeductionCategory::RetirementContribution,
                dec!(20000),
                false,
            )],
            ..FinancialSnapshot::default()
        };

        let report = engine().compute(&snapshot);

        // SE tax 5,652 → half 2,826; AGI 40,000 − 2,826 − 20,000 = 17,174
        assert_eq!(report.adjusted_gross_income, dec!(17174));
        // Before QBI 2,174; cap round(434.8) below 20% × 40,000
        assert_eq!(report.qbi_deduction, dec!(435));
        assert_eq!(report.taxable_income, dec!(1739));
    }

    // =========================================================================
    // summary figures
    // =========================================================================

    #[test]
    fn withholding_above_tax_is_a_refund() {
        let mut job = stream("job", IncomeCategory::Wage, dec!(40000));
        job.wage = Some(WageDetails {
            withholding: dec!(6000),
            ..WageDetails::default()
        });
        let snapshot = FinancialSnapshot {
            income_streams: vec![job],
            ..FinancialSnapshot::default()
        };

        let report = engine().compute(&snapshot);

        // Taxable 25,000 → 1,192.50 + 1,569 = 2,761.50
        assert_eq!(report.federal_tax, dec!(2762));
        assert_eq!(report.withholding.balance_due, dec!(0));
        assert_eq!(report.withholding.expected_refund, dec!(3238));
    }

    #[test]
    fn state_tax_follows_profile_state() {
        let mut snapshot = FinancialSnapshot {
            income_streams: vec![stream("job", IncomeCategory::Wage, dec!(115000))],
            ..FinancialSnapshot::default()
        };
        snapshot.profile.state = "ca".into();

        let report = engine().compute(&snapshot);

        assert_eq!(report.state, "CA");
        assert_eq!(report.state_tax, dec!(7250));
    }

    #[test]
    fn rates_are_zero_without_income() {
        let report = engine().compute(&FinancialSnapshot::default());

        assert_eq!(report.effective_rate, dec!(0));
        assert_eq!(report.marginal_rate, dec!(0.10));
        assert_eq!(report.after_tax_income, dec!(0));
        assert!(report.entities.contains_key(PERSONAL_ENTITY_ID));
    }
}
