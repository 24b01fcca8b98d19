use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ByFilingStatus;

/// Statutory constants for one tax year.
///
/// Bracket schedules and state rates live next to this in
/// [`TaxYearTables`](crate::TaxYearTables).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub standard_deduction: ByFilingStatus<Decimal>,

    // Self-employment tax
    pub se_net_earnings_factor: Decimal,
    pub ss_tax_rate: Decimal,
    pub medicare_tax_rate: Decimal,
    pub ss_wage_max: Decimal,
    pub additional_medicare_rate: Decimal,
    /// Single-filer threshold, applied to every status.
    pub additional_medicare_threshold: Decimal,
    pub se_deduction_factor: Decimal,

    // Qualified business income deduction
    pub qbi_rate: Decimal,
    pub qbi_threshold: ByFilingStatus<Decimal>,
    pub qbi_phase_in_range: Decimal,
    pub qbi_wage_limit_rate: Decimal,
    pub qbi_alt_wage_limit_rate: Decimal,
    pub qbi_property_rate: Decimal,

    // Alternative minimum tax
    pub amt_exemption: ByFilingStatus<Decimal>,
    pub amt_phaseout_start: ByFilingStatus<Decimal>,
    pub amt_phaseout_rate: Decimal,
    pub amt_lower_rate: Decimal,
    pub amt_upper_rate: Decimal,
    pub amt_rate_threshold: Decimal,
    pub amt_itemized_addback_rate: Decimal,
    pub amt_itemized_addback_cap: Decimal,

    // Net investment income tax
    pub niit_rate: Decimal,
    pub niit_threshold: ByFilingStatus<Decimal>,

    // Retirement contribution limits
    pub elective_deferral_limit: Decimal,
    pub catch_up_contribution: Decimal,
    pub catch_up_age: u32,
    pub annual_additions_limit: Decimal,
    pub se_retirement_contribution_rate: Decimal,
}

impl TaxYearConfig {
    /// Every fractional rate in the config, labelled for validation messages.
    pub fn rates(&self) -> [(&'static str, Decimal); 15] {
        [
            ("se_net_earnings_factor", self.se_net_earnings_factor),
            ("ss_tax_rate", self.ss_tax_rate),
            ("medicare_tax_rate", self.medicare_tax_rate),
            ("additional_medicare_rate", self.additional_medicare_rate),
            ("se_deduction_factor", self.se_deduction_factor),
            ("qbi_rate", self.qbi_rate),
            ("qbi_wage_limit_rate", self.qbi_wage_limit_rate),
            ("qbi_alt_wage_limit_rate", self.qbi_alt_wage_limit_rate),
            ("qbi_property_rate", self.qbi_property_rate),
            ("amt_phaseout_rate", self.amt_phaseout_rate),
            ("amt_lower_rate", self.amt_lower_rate),
            ("amt_upper_rate", self.amt_upper_rate),
            ("amt_itemized_addback_rate", self.amt_itemized_addback_rate),
            ("niit_rate", self.niit_rate),
            ("se_retirement_contribution_rate", self.se_retirement_contribution_rate),
        ]
    }
}
