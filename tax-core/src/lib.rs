pub mod calculations;
pub mod models;
pub mod tables;
pub mod validation;

pub use calculations::{PlanningPolicy, TaxEngine};
pub use models::*;
pub use tables::{TaxTablesError, TaxYearTables};
pub use validation::{SnapshotWarning, validate_snapshot};
