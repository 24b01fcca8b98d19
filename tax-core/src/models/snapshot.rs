use serde::{Deserialize, Serialize};

use super::{
    Deduction, DepreciationAsset, Expense, FilingStatusCode, IncomeStream, LegalEntity,
    RealizedGainEvent,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialProfile {
    #[serde(default)]
    pub filing_status: FilingStatusCode,
    /// Two-letter jurisdiction code of residence.
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub dependents: u32,
}

/// Everything the engine reads for one computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    #[serde(default)]
    pub profile: FinancialProfile,
    #[serde(default)]
    pub income_streams: Vec<IncomeStream>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub deductions: Vec<Deduction>,
    #[serde(default)]
    pub entities: Vec<LegalEntity>,
    #[serde(default)]
    pub depreciation_assets: Vec<DepreciationAsset>,
    #[serde(default)]
    pub gain_events: Vec<RealizedGainEvent>,
}

impl FinancialSnapshot {
    pub fn active_income(&self) -> impl Iterator<Item = &IncomeStream> {
        self.income_streams.iter().filter(|s| s.active)
    }

    pub fn active_entities(&self) -> impl Iterator<Item = &LegalEntity> {
        self.entities.iter().filter(|e| e.active)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{EntityKind, IncomeCategory};

    #[test]
    fn deserializes_minimal_snapshot() {
        let snapshot: FinancialSnapshot = serde_json::from_str("{}").unwrap();

        assert_eq!(snapshot, FinancialSnapshot::default());
    }

    #[test]
    fn deserializes_editor_payload() {
        let json = r#"{
            "profile": {"filing_status": "married_joint", "state": "CA", "age": 52},
            "income_streams": [
                {"id": "job", "category": "w2", "amount": "95000",
                 "wage": {"withholding": 12000, "pre_tax_deductions": "10000"}},
                {"id": "side", "category": "freelance", "amount": 20000, "entity_id": "llc"},
                {"id": "old", "category": "business", "amount": 5000, "active": false}
            ],
            "entities": [{"id": "llc", "type": "llc_single", "name": "Side LLC"}]
        }"#;

        let snapshot: FinancialSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.profile.filing_status, FilingStatusCode::MarriedFilingJointly);
        assert_eq!(snapshot.income_streams[0].category, IncomeCategory::Wage);
        assert_eq!(snapshot.income_streams[0].annual_amount, dec!(95000));
        assert_eq!(
            snapshot.income_streams[0].wage.as_ref().map(|w| w.pre_tax_deductions),
            Some(dec!(10000))
        );
        assert_eq!(snapshot.active_income().count(), 2);
        assert_eq!(snapshot.entities[0].kind, EntityKind::SingleMemberLlc);
    }
}
