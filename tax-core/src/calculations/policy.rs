use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::TaxTablesError;

/// Planning assumptions that are not tax law.
///
/// These drive default officer salaries when an entity does not state one,
/// and the hypothetical salary used for the payroll-election estimate.
/// They are ratios of entity net income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningPolicy {
    pub s_corp_default_salary_ratio: Decimal,
    pub c_corp_default_salary_ratio: Decimal,
    pub payroll_election_salary_ratio: Decimal,
}

impl Default for PlanningPolicy {
    fn default() -> Self {
        Self {
            s_corp_default_salary_ratio: dec!(0.60),
            c_corp_default_salary_ratio: dec!(0.50),
            payroll_election_salary_ratio: dec!(0.60),
        }
    }
}

impl PlanningPolicy {
    pub fn validate(&self) -> Result<(), TaxTablesError> {
        let ratios = [
            ("s_corp_default_salary_ratio", self.s_corp_default_salary_ratio),
            ("c_corp_default_salary_ratio", self.c_corp_default_salary_ratio),
            ("payroll_election_salary_ratio", self.payroll_election_salary_ratio),
        ];
        for (field, value) in ratios {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(TaxTablesError::RateOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_policy_is_valid() {
        assert_eq!(PlanningPolicy::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_ratio_above_one() {
        let policy = PlanningPolicy {
            c_corp_default_salary_ratio: dec!(1.2),
            ..PlanningPolicy::default()
        };

        assert_eq!(
            policy.validate(),
            Err(TaxTablesError::RateOutOfRange {
                field: "c_corp_default_salary_ratio",
                value: dec!(1.2),
            })
        );
    }

    #[test]
    fn partial_policy_fills_defaults() {
        let policy: PlanningPolicy =
            serde_json::from_str(r#"{"s_corp_default_salary_ratio": "0.4"}"#).unwrap();

        assert_eq!(policy.s_corp_default_salary_ratio, dec!(0.4));
        assert_eq!(policy.c_corp_default_salary_ratio, dec!(0.50));
    }
}
