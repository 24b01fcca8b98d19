use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EntityKind, FlowThroughKind};

/// Ledger key reserved for income that no entity owns.
pub const PERSONAL_ENTITY_ID: &str = "personal";

/// Per-entity profit and loss, derived fresh on every computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPnL {
    pub entity_id: String,
    pub name: String,
    pub kind: EntityKind,
    pub flow_through: FlowThroughKind,
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub depreciation: Decimal,
    /// `max(0, revenue - expenses - depreciation)`.
    pub net_income: Decimal,
    pub se_taxable: Decimal,
    pub qbi_eligible: Decimal,
    pub officer_salary: Decimal,
    pub distribution: Decimal,
    /// Net income left inside a C-style corporation after officer salary.
    pub retained_earnings: Decimal,
    /// The part of revenue attributable to the owner's return.
    pub owner_revenue: Decimal,
    /// The part of net income that reaches the owner's return.
    pub owner_income: Decimal,
    pub is_service_business: bool,
    pub w2_wages_paid: Decimal,
    pub qualified_property: Decimal,
}

impl EntityPnL {
    /// Entity-level expenses that reduce the owner's gross income.
    pub fn owner_expenses(&self) -> Decimal {
        (self.owner_revenue - self.owner_income).max(Decimal::ZERO)
    }

    /// Officer salary as a fraction of net income, for salary/distribution entities.
    pub fn salary_ratio(&self) -> Option<Decimal> {
        match self.flow_through {
            FlowThroughKind::SalaryDistribution if self.net_income > Decimal::ZERO => {
                Some(self.officer_salary / self.net_income)
            }
            _ => None,
        }
    }
}
