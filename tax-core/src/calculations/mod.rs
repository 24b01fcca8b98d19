//! Tax calculators and the engine that assembles them into a report.
//!
//! Each calculator is a small struct over borrowed yearly constants, so the
//! pieces can be exercised on their own; [`TaxEngine`] wires them together.

pub mod amt;
pub mod brackets;
pub mod common;
pub mod entity_flow;
pub mod hints;
pub mod niit;
pub mod policy;
pub mod qbi;
pub mod report;
pub mod self_emp;
pub mod state_tax;

pub use amt::{AlternativeMinimumTax, AmtInput, AmtResult};
pub use brackets::BracketEvaluator;
pub use entity_flow::{EntityClassifier, StreamRoute, route_stream};
pub use hints::{HintCalculator, HintInputs};
pub use niit::NetInvestmentIncomeTax;
pub use policy::PlanningPolicy;
pub use qbi::{QbiDeduction, QbiInput};
pub use report::TaxEngine;
pub use self_emp::{SeTaxConfig, SelfEmploymentTax};
pub use state_tax::StateTaxApproximator;
