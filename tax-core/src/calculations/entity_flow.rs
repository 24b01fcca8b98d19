//! Per-entity profit and loss, and how each entity's income reaches the owner.
//!
//! Every computation builds a fresh ledger keyed by entity id. The ledger
//! always holds [`PERSONAL_ENTITY_ID`], which collects business income,
//! expenses, and depreciation that no active entity owns.
//!
//! | Flow-through | Owner income | SE taxable | QBI eligible |
//! |---|---|---|---|
//! | Direct | net income | net income | net income |
//! | SalaryDistribution | salary + distribution | 0 | distribution |
//! | Corporate | officer salary | 0 | 0 |
//! | PartnershipShare | net × ownership | share | share |

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::PlanningPolicy;
use crate::calculations::common::{non_negative, round_currency};
use crate::{
    EntityKind, EntityPnL, FinancialSnapshot, FlowThroughKind, IncomeCategory, IncomeStream,
    LegalEntity, PERSONAL_ENTITY_ID,
};

/// Where an active income stream lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamRoute<'a> {
    Wage,
    /// Revenue of the entity with this id (possibly `personal`).
    EntityRevenue(&'a str),
    Investment,
    OtherIncome,
}

/// Routes a stream by category and owner.
///
/// `is_entity` answers whether an id names an active entity. Business and
/// freelance income always lands in a ledger, falling back to `personal`;
/// rental, passive, and other income only does when an entity owns it.
pub fn route_stream<'a>(
    stream: &'a IncomeStream,
    is_entity: impl Fn(&str) -> bool,
) -> StreamRoute<'a> {
    let owner = stream
        .entity_id
        .as_deref()
        .filter(|id| is_entity(id));

    match stream.category {
        IncomeCategory::Wage => StreamRoute::Wage,
        IncomeCategory::Investment => StreamRoute::Investment,
        IncomeCategory::Business | IncomeCategory::Freelance => {
            StreamRoute::EntityRevenue(owner.unwrap_or(PERSONAL_ENTITY_ID))
        }
        IncomeCategory::Rental | IncomeCategory::Passive | IncomeCategory::Other => {
            owner.map_or(StreamRoute::OtherIncome, StreamRoute::EntityRevenue)
        }
    }
}

#[derive(Debug, Default)]
struct Accumulated {
    revenue: Decimal,
    expenses: Decimal,
    depreciation: Decimal,
}

/// Builds the per-entity ledger for a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct EntityClassifier<'a> {
    policy: &'a PlanningPolicy,
}

impl<'a> EntityClassifier<'a> {
    pub fn new(policy: &'a PlanningPolicy) -> Self {
        Self { policy }
    }

    /// Active entities by id, excluding any that claim the reserved id.
    ///
    /// When two active entities share an id the first one wins.
    pub fn active_entities<'s>(
        &self,
        snapshot: &'s FinancialSnapshot,
    ) -> BTreeMap<&'s str, &'s LegalEntity> {
        let mut entities = BTreeMap::new();
        for entity in snapshot.active_entities() {
            if entity.id == PERSONAL_ENTITY_ID {
                warn!(entity_id = %entity.id, "Entity uses the reserved id; ignoring it");
                continue;
            }
            entities.entry(entity.id.as_str()).or_insert(entity);
        }
        entities
    }

    pub fn classify(
        &self,
        snapshot: &FinancialSnapshot,
    ) -> BTreeMap<String, EntityPnL> {
        let entities = self.active_entities(snapshot);

        let mut totals: BTreeMap<&str, Accumulated> = BTreeMap::new();
        totals.insert(PERSONAL_ENTITY_ID, Accumulated::default());
        for id in entities.keys() {
            totals.insert(*id, Accumulated::default());
        }

        for stream in snapshot.active_income() {
            if let StreamRoute::EntityRevenue(id) =
                route_stream(stream, |id| entities.contains_key(id))
            {
                if let Some(entry) = totals.get_mut(id) {
                    entry.revenue += non_negative(stream.annual_amount);
                }
            }
        }

        for expense in &snapshot.expenses {
            let owner = owner_of(&entities, expense.entity_id.as_deref(), &expense.id);
            if let Some(entry) = totals.get_mut(owner) {
                entry.expenses += expense.deductible_amount();
            }
        }

        for asset in &snapshot.depreciation_assets {
            let owner = owner_of(&entities, asset.entity_id.as_deref(), &asset.id);
            if let Some(entry) = totals.get_mut(owner) {
                entry.depreciation += non_negative(asset.annual_depreciation);
            }
        }

        totals
            .into_iter()
            .map(|(id, accumulated)| {
                let pnl = self.entity_pnl(id, entities.get(id).copied(), &accumulated);
                (id.to_string(), pnl)
            })
            .collect()
    }

    fn entity_pnl(
        &self,
        id: &str,
        entity: Option<&LegalEntity>,
        accumulated: &Accumulated,
    ) -> EntityPnL {
        let kind = entity.map_or(EntityKind::Personal, |e| e.kind);
        let flow_through = kind.flow_through();

        let revenue = round_currency(accumulated.revenue);
        let expenses = round_currency(accumulated.expenses);
        let depreciation = round_currency(accumulated.depreciation);
        let raw_net = revenue - expenses - depreciation;
        if raw_net < Decimal::ZERO {
            warn!(
                entity_id = %id,
                revenue = %revenue,
                expenses = %expenses,
                depreciation = %depreciation,
                "Expenses exceed revenue; clamping net income to zero"
            );
        }
        let net_income = non_negative(raw_net);

        let mut pnl = EntityPnL {
            entity_id: id.to_string(),
            name: entity.map_or_else(|| "Personal".to_string(), |e| e.name.clone()),
            kind,
            flow_through,
            revenue,
            expenses,
            depreciation,
            net_income,
            se_taxable: Decimal::ZERO,
            qbi_eligible: Decimal::ZERO,
            officer_salary: Decimal::ZERO,
            distribution: Decimal::ZERO,
            retained_earnings: Decimal::ZERO,
            owner_revenue: revenue,
            owner_income: net_income,
            is_service_business: entity.is_some_and(|e| e.is_service_business),
            w2_wages_paid: non_negative(entity.and_then(|e| e.w2_wages_paid).unwrap_or_default()),
            qualified_property: non_negative(
                entity.and_then(|e| e.qualified_property).unwrap_or_default(),
            ),
        };

        match flow_through {
            FlowThroughKind::Direct => {
                pnl.se_taxable = net_income;
                pnl.qbi_eligible = net_income;
            }
            FlowThroughKind::SalaryDistribution => {
                let salary = officer_salary(
                    entity.and_then(|e| e.officer_salary),
                    net_income,
                    self.policy.s_corp_default_salary_ratio,
                );
                pnl.officer_salary = salary;
                pnl.distribution = net_income - salary;
                pnl.qbi_eligible = pnl.distribution;
                pnl.w2_wages_paid += salary;
            }
            FlowThroughKind::Corporate => {
                let salary = officer_salary(
                    entity.and_then(|e| e.officer_salary),
                    net_income,
                    self.policy.c_corp_default_salary_ratio,
                );
                pnl.officer_salary = salary;
                pnl.retained_earnings = net_income - salary;
                pnl.owner_revenue = salary;
                pnl.owner_income = salary;
            }
            FlowThroughKind::PartnershipShare => {
                let pct = ownership_share(entity.and_then(|e| e.ownership_pct));
                let share = round_currency(net_income * pct);
                pnl.se_taxable = share;
                pnl.qbi_eligible = share;
                pnl.owner_revenue = round_currency(revenue * pct);
                pnl.owner_income = share;
                // The partner's QBI wage limit uses the allocable share only.
                pnl.w2_wages_paid = round_currency(pnl.w2_wages_paid * pct);
                pnl.qualified_property = round_currency(pnl.qualified_property * pct);
            }
        }

        debug!(
            entity_id = %id,
            kind = ?kind,
            net_income = %net_income,
            owner_income = %pnl.owner_income,
            "Classified entity"
        );

        pnl
    }
}

/// Resolves an expense or asset owner, falling back to `personal`.
fn owner_of<'s>(
    entities: &BTreeMap<&'s str, &'s LegalEntity>,
    entity_id: Option<&'s str>,
    item: &str,
) -> &'s str {
    match entity_id {
        Some(id) if entities.contains_key(id) => id,
        Some(id) => {
            warn!(
                item = %item,
                entity_id = %id,
                "Reference to unknown or inactive entity; treating as personal"
            );
            PERSONAL_ENTITY_ID
        }
        None => PERSONAL_ENTITY_ID,
    }
}

/// Explicit salary, or the policy ratio of net income, kept within `[0, net]`.
fn officer_salary(
    explicit: Option<Decimal>,
    net_income: Decimal,
    default_ratio: Decimal,
) -> Decimal {
    let salary = explicit.unwrap_or_else(|| net_income * default_ratio);
    round_currency(salary).clamp(Decimal::ZERO, net_income)
}

/// Ownership fraction clamped to `[0, 1]`; missing means sole ownership.
fn ownership_share(pct: Option<Decimal>) -> Decimal {
    pct.unwrap_or(Decimal::ONE)
        .clamp(Decimal::ZERO, Decimal::ONE)
}
