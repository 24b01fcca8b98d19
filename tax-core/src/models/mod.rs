mod amount;
mod entity;
mod entity_pnl;
mod expense;
mod filing_status;
mod gain_event;
mod income_stream;
mod snapshot;
mod tax_bracket;
mod tax_report;
mod tax_year_config;

pub use entity::{EntityKind, FlowThroughKind, LegalEntity};
pub use entity_pnl::{EntityPnL, PERSONAL_ENTITY_ID};
pub use expense::{Deduction, DeductionCategory, DepreciationAsset, Expense, ExpenseCategory};
pub use filing_status::{ByFilingStatus, FilingStatusCode};
pub use gain_event::{GainStatus, HoldingTerm, RealizedGainEvent};
pub use income_stream::{IncomeCategory, IncomeStream, WageDetails};
pub use snapshot::{FinancialProfile, FinancialSnapshot};
pub use tax_bracket::TaxBracket;
pub use tax_report::{
    Adjustments, DeductionMethod, IncomeBreakdown, OptimizationHints, SelfEmploymentTaxLines,
    TaxReport, WithholdingReconciliation,
};
pub use tax_year_config::TaxYearConfig;
