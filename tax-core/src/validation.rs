//! Non-fatal checks on snapshot contents.
//!
//! The engine computes a report from any snapshot, defaulting or clamping
//! whatever it cannot use. [`validate_snapshot`] reports the cases where that
//! defaulting probably hides a data-entry mistake, so a caller can surface
//! them next to the estimate.

use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::{EntityKind, FinancialSnapshot, PERSONAL_ENTITY_ID};

/// Deductible expenses above this share of gross income look like a typo.
const SUSPICIOUS_EXPENSE_RATIO: Decimal = dec!(0.9);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotWarning {
    NegativeIncome {
        stream_id: String,
        amount: Decimal,
    },
    NegativeGrossIncome {
        total: Decimal,
    },
    ExpenseRatio {
        expenses: Decimal,
        gross_income: Decimal,
    },
    ExpensesWithoutIncome {
        expenses: Decimal,
    },
    UnknownEntityReference {
        item_id: String,
        entity_id: String,
    },
    UnknownEntityKind {
        entity_id: String,
    },
    OwnershipOutOfRange {
        entity_id: String,
        ownership_pct: Decimal,
    },
    ReservedEntityId,
}

impl fmt::Display for SnapshotWarning {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::NegativeIncome { stream_id, amount } => {
                write!(f, "income stream '{stream_id}' has a negative amount ({amount}); treated as zero")
            }
            Self::NegativeGrossIncome { total } => {
                write!(f, "gross income is negative ({total})")
            }
            Self::ExpenseRatio {
                expenses,
                gross_income,
            } => write!(
                f,
                "deductible expenses ({expenses}) exceed 90% of gross income ({gross_income})"
            ),
            Self::ExpensesWithoutIncome { expenses } => {
                write!(f, "deductible expenses ({expenses}) with no income")
            }
            Self::UnknownEntityReference { item_id, entity_id } => write!(
                f,
                "'{item_id}' references unknown or inactive entity '{entity_id}'; treated as personal"
            ),
            Self::UnknownEntityKind { entity_id } => {
                write!(f, "entity '{entity_id}' has an unrecognized type; taxed like personal income")
            }
            Self::OwnershipOutOfRange {
                entity_id,
                ownership_pct,
            } => write!(
                f,
                "entity '{entity_id}' ownership {ownership_pct} is outside 0 to 1; clamped"
            ),
            Self::ReservedEntityId => write!(
                f,
                "an entity uses the reserved id '{PERSONAL_ENTITY_ID}' and is ignored"
            ),
        }
    }
}

/// Returns every warning for `snapshot`, in input order.
pub fn validate_snapshot(snapshot: &FinancialSnapshot) -> Vec<SnapshotWarning> {
    let mut warnings = Vec::new();

    let known: BTreeSet<&str> = snapshot
        .active_entities()
        .map(|e| e.id.as_str())
        .filter(|id| *id != PERSONAL_ENTITY_ID)
        .collect();

    for entity in &snapshot.entities {
        if entity.id == PERSONAL_ENTITY_ID {
            warnings.push(SnapshotWarning::ReservedEntityId);
            continue;
        }
        if entity.kind == EntityKind::Unknown {
            warnings.push(SnapshotWarning::UnknownEntityKind {
                entity_id: entity.id.clone(),
            });
        }
        if let Some(pct) = entity.ownership_pct {
            if pct < Decimal::ZERO || pct > Decimal::ONE {
                warnings.push(SnapshotWarning::OwnershipOutOfRange {
                    entity_id: entity.id.clone(),
                    ownership_pct: pct,
                });
            }
        }
    }

    let mut check_reference = |item_id: &str, entity_id: Option<&str>| {
        if let Some(entity_id) = entity_id {
            if !known.contains(entity_id) {
                warnings.push(SnapshotWarning::UnknownEntityReference {
                    item_id: item_id.to_string(),
                    entity_id: entity_id.to_string(),
                });
            }
        }
    };
    for stream in snapshot.active_income() {
        check_reference(&stream.id, stream.entity_id.as_deref());
    }
    for expense in &snapshot.expenses {
        check_reference(&expense.id, expense.entity_id.as_deref());
    }
    for asset in &snapshot.depreciation_assets {
        check_reference(&asset.id, asset.entity_id.as_deref());
    }
    for deduction in &snapshot.deductions {
        check_reference(&deduction.id, deduction.entity_id.as_deref());
    }

    let mut gross_income = Decimal::ZERO;
    for stream in snapshot.active_income() {
        if stream.annual_amount < Decimal::ZERO {
            warnings.push(SnapshotWarning::NegativeIncome {
                stream_id: stream.id.clone(),
                amount: stream.annual_amount,
            });
        }
        gross_income += stream.annual_amount;
    }

    let expenses: Decimal = snapshot
        .expenses
        .iter()
        .map(|e| e.deductible_amount())
        .sum();

    if gross_income < Decimal::ZERO {
        warnings.push(SnapshotWarning::NegativeGrossIncome {
            total: gross_income,
        });
    } else if gross_income.is_zero() {
        if expenses > Decimal::ZERO {
            warnings.push(SnapshotWarning::ExpensesWithoutIncome { expenses });
        }
    } else if expenses > gross_income * SUSPICIOUS_EXPENSE_RATIO {
        warnings.push(SnapshotWarning::ExpenseRatio {
            expenses,
            gross_income,
        });
    }

    warnings
}
