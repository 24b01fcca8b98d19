//! Advisory planning projections.
//!
//! Nothing here feeds back into the statutory figures. The numbers rest on
//! [`PlanningPolicy`] assumptions and are reported in their own section.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{non_negative, round_currency, round_rate};
use crate::calculations::{PlanningPolicy, SelfEmploymentTax};
use crate::{EntityPnL, OptimizationHints, TaxYearConfig};

/// Report figures the projections read.
#[derive(Debug, Clone)]
pub struct HintInputs<'a> {
    pub age: u32,
    pub self_employment_income: Decimal,
    pub se_tax_deductible_half: Decimal,
    /// Deductions in the retirement-contribution category.
    pub retirement_deductions: Decimal,
    /// Pre-tax payroll deductions on wage streams.
    pub wage_deferrals: Decimal,
    pub employer_match: Decimal,
    pub entities: &'a BTreeMap<String, EntityPnL>,
}

#[derive(Debug, Clone, Copy)]
pub struct HintCalculator<'a> {
    config: &'a TaxYearConfig,
    policy: &'a PlanningPolicy,
    se_tax: &'a SelfEmploymentTax,
}

impl<'a> HintCalculator<'a> {
    pub fn new(
        config: &'a TaxYearConfig,
        policy: &'a PlanningPolicy,
        se_tax: &'a SelfEmploymentTax,
    ) -> Self {
        Self {
            config,
            policy,
            se_tax,
        }
    }

    pub fn calculate(
        &self,
        inputs: &HintInputs<'_>,
    ) -> OptimizationHints {
        let max_retirement_contribution = self.max_retirement_contribution(inputs);
        let retirement_contributed = round_currency(
            non_negative(inputs.retirement_deductions)
                + non_negative(inputs.wage_deferrals)
                + non_negative(inputs.employer_match),
        );
        let retirement_headroom = non_negative(max_retirement_contribution - retirement_contributed);

        let payroll_election_savings = self.payroll_election_savings(inputs.entities);

        let entity_salary_ratios = inputs
            .entities
            .iter()
            .filter_map(|(id, pnl)| pnl.salary_ratio().map(|ratio| (id.clone(), round_rate(ratio))))
            .collect();

        OptimizationHints {
            max_retirement_contribution,
            retirement_contributed,
            retirement_headroom,
            payroll_election_savings,
            entity_salary_ratios,
        }
    }

    /// Elective deferral limit plus catch-up, plus the employer-side
    /// contribution a self-employed filer can make on their own earnings,
    /// capped at the annual additions limit.
    fn max_retirement_contribution(
        &self,
        inputs: &HintInputs<'_>,
    ) -> Decimal {
        let catch_up = if inputs.age >= self.config.catch_up_age {
            self.config.catch_up_contribution
        } else {
            Decimal::ZERO
        };
        let deferral = self.config.elective_deferral_limit + catch_up;

        if inputs.self_employment_income <= Decimal::ZERO {
            return deferral;
        }

        let earned = non_negative(inputs.self_employment_income - inputs.se_tax_deductible_half);
        let employer = round_currency(earned * self.config.se_retirement_contribution_rate);
        (deferral + employer).min(self.config.annual_additions_limit + catch_up)
    }

    /// SE tax saved by paying a policy-ratio salary through payroll instead,
    /// summed over entities that could make the election.
    fn payroll_election_savings(
        &self,
        entities: &BTreeMap<String, EntityPnL>,
    ) -> Decimal {
        entities
            .values()
            .filter(|pnl| pnl.kind.can_elect_payroll() && pnl.net_income > Decimal::ZERO)
            .map(|pnl| {
                let current = self.se_tax.calculate(pnl.net_income).total;
                let salary =
                    round_currency(pnl.net_income * self.policy.payroll_election_salary_ratio);
                let elected = self.se_tax.payroll_tax(salary);
                let savings = non_negative(current - elected);
                debug!(
                    entity_id = %pnl.entity_id,
                    current = %current,
                    elected = %elected,
                    "Estimated payroll election savings"
                );
                savings
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::{EntityClassifier, SeTaxConfig};
    use crate::{
        EntityKind, FinancialSnapshot, IncomeCategory, IncomeStream, LegalEntity, TaxYearTables,
    };

    fn empty_inputs(entities: &BTreeMap<String, EntityPnL>) -> HintInputs<'_> {
        HintInputs {
            age: 40,
            self_employment_income: dec!(0),
            se_tax_deductible_half: dec!(0),
            retirement_deductions: dec!(0),
            wage_deferrals: dec!(0),
            employer_match: dec!(0),
            entities,
        }
    }

    fn hints(inputs: &HintInputs<'_>) -> OptimizationHints {
        let tables = TaxYearTables::tax_year_2025();
        let policy = PlanningPolicy::default();
        let se_tax = SelfEmploymentTax::new(SeTaxConfig::from_tax_year_config(&tables.config));
        HintCalculator::new(&tables.config, &policy, &se_tax).calculate(inputs)
    }

    fn ledger_with(kind: EntityKind, revenue: Decimal) -> BTreeMap<String, EntityPnL> {
        let snapshot = FinancialSnapshot {
            income_streams: vec![IncomeStream {
                id: "biz".into(),
                name: "Business".into(),
                category: IncomeCategory::Business,
                annual_amount: revenue,
                active: true,
                entity_id: Some("e".into()),
                wage: None,
            }],
            entities: vec![LegalEntity {
                id: "e".into(),
                name: "Entity".into(),
                kind,
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
        EntityClassifier::new(&PlanningPolicy::default()).classify(&snapshot)
    }

    // =========================================================================
    // retirement limits
    // =========================================================================

    #[test]
    fn employee_limit_is_elective_deferral() {
        let entities = BTreeMap::new();

        let result = hints(&empty_inputs(&entities));

        assert_eq!(result.max_retirement_contribution, dec!(23500));
        assert_eq!(result.retirement_headroom, dec!(23500));
    }

    #[test]
    fn catch_up_applies_at_fifty() {
        let entities = BTreeMap::new();
        let mut inputs = empty_inputs(&entities);
        inputs.age = 50;

        assert_eq!(hints(&inputs).max_retirement_contribution, dec!(31000));
    }

    #[test]
    fn self_employed_adds_employer_contribution() {
        let entities = BTreeMap::new();
        let mut inputs = empty_inputs(&entities);
        inputs.self_employment_income = dec!(80000);
        inputs.se_tax_deductible_half = dec!(5652);

        // 23,500 + 20% × 74,348
        assert_eq!(hints(&inputs).max_retirement_contribution, dec!(38370));
    }

    #[test]
    fn self_employed_limit_is_capped_at_annual_additions() {
        let entities = BTreeMap::new();
        let mut inputs = empty_inputs(&entities);
        inputs.self_employment_income = dec!(400000);
        inputs.se_tax_deductible_half = dec!(20000);

        assert_eq!(hints(&inputs).max_retirement_contribution, dec!(70000));
    }

    #[test]
    fn headroom_subtracts_all_contributions_and_floors_at_zero() {
        let entities = BTreeMap::new();
        let mut inputs = empty_inputs(&entities);
        inputs.retirement_deductions = dec!(5000);
        inputs.wage_deferrals = dec!(10000);
        inputs.employer_match = dec!(3000);

        let result = hints(&inputs);

        assert_eq!(result.retirement_contributed, dec!(18000));
        assert_eq!(result.retirement_headroom, dec!(5500));

        inputs.wage_deferrals = dec!(30000);

        assert_eq!(hints(&inputs).retirement_headroom, dec!(0));
    }

    // =========================================================================
    // payroll election
    // =========================================================================

    #[test]
    fn sole_proprietor_shows_payroll_election_savings() {
        let entities = ledger_with(EntityKind::SoleProprietor, dec!(100000));

        let result = hints(&empty_inputs(&entities));

        // SE tax on 100,000 is 14,129; payroll on 60,000 is 9,180
        assert_eq!(result.payroll_election_savings, dec!(4949));
    }

    #[test]
    fn corporations_have_no_payroll_election_estimate() {
        let entities = ledger_with(EntityKind::SCorporation, dec!(100000));

        let result = hints(&empty_inputs(&entities));

        assert_eq!(result.payroll_election_savings, dec!(0));
        assert_eq!(result.entity_salary_ratios.get("e"), Some(&dec!(0.6)));
    }
}
