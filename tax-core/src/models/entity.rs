use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::lenient_optional_amount;

/// Legal form of an entity that owns income.
///
/// Unrecognized kinds deserialize to [`EntityKind::Unknown`] and are taxed
/// like non-entity income.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// The implicit entity that holds all non-entity income.
    Personal,
    #[serde(alias = "sole_prop")]
    SoleProprietor,
    #[serde(alias = "llc_single", alias = "smllc")]
    SingleMemberLlc,
    #[serde(alias = "llc_scorp", alias = "llc_s_corp")]
    LlcSCorpElection,
    #[serde(alias = "s_corp", alias = "scorp")]
    SCorporation,
    #[serde(alias = "c_corp", alias = "ccorp")]
    CCorporation,
    #[serde(alias = "llc_partnership")]
    Partnership,
    Trust,
    #[default]
    #[serde(other)]
    Unknown,
}

/// How an entity's net income reaches the owner's return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowThroughKind {
    /// All net income is self-employment income of the owner.
    Direct,
    /// Net income splits into officer salary (payroll) and a distribution.
    SalaryDistribution,
    /// Income stays in the corporation; only officer salary reaches the owner.
    Corporate,
    /// The owner's ownership share of net income is self-employment income.
    PartnershipShare,
}

impl EntityKind {
    pub fn flow_through(&self) -> FlowThroughKind {
        match self {
            Self::Personal
            | Self::SoleProprietor
            | Self::SingleMemberLlc
            | Self::Trust
            | Self::Unknown => FlowThroughKind::Direct,
            Self::LlcSCorpElection | Self::SCorporation => FlowThroughKind::SalaryDistribution,
            Self::CCorporation => FlowThroughKind::Corporate,
            Self::Partnership => FlowThroughKind::PartnershipShare,
        }
    }

    /// Whether the entity could elect S-corporation payroll treatment.
    pub fn can_elect_payroll(&self) -> bool {
        matches!(self, Self::SoleProprietor | Self::SingleMemberLlc)
    }
}

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalEntity {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "type")]
    pub kind: EntityKind,
    #[serde(default)]
    pub formation_state: String,
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub officer_salary: Option<Decimal>,
    /// Owner's share as a fraction; `None` means sole ownership.
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub ownership_pct: Option<Decimal>,
    #[serde(default)]
    pub is_service_business: bool,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub w2_wages_paid: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub qualified_property: Option<Decimal>,
}
