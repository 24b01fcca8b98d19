use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::TaxYearTables;
use crate::models::{ByFilingStatus, TaxBracket, TaxYearConfig};

fn schedule(rows: &[(Decimal, Option<Decimal>, Decimal)]) -> Vec<TaxBracket> {
    rows.iter()
        .map(|&(min, max, rate)| TaxBracket::new(min, max, rate))
        .collect()
}

fn brackets() -> ByFilingStatus<Vec<TaxBracket>> {
    ByFilingStatus {
        // Schedule X
        single: schedule(&[
            (dec!(0), Some(dec!(11925)), dec!(0.10)),
            (dec!(11925), Some(dec!(48475)), dec!(0.12)),
            (dec!(48475), Some(dec!(103350)), dec!(0.22)),
            (dec!(103350), Some(dec!(197300)), dec!(0.24)),
            (dec!(197300), Some(dec!(250525)), dec!(0.32)),
            (dec!(250525), Some(dec!(626350)), dec!(0.35)),
            (dec!(626350), None, dec!(0.37)),
        ]),
        // Schedule Y-1
        married_filing_jointly: schedule(&[
            (dec!(0), Some(dec!(23850)), dec!(0.10)),
            (dec!(23850), Some(dec!(96950)), dec!(0.12)),
            (dec!(96950), Some(dec!(206700)), dec!(0.22)),
            (dec!(206700), Some(dec!(394600)), dec!(0.24)),
            (dec!(394600), Some(dec!(501050)), dec!(0.32)),
            (dec!(501050), Some(dec!(751600)), dec!(0.35)),
            (dec!(751600), None, dec!(0.37)),
        ]),
        // Schedule Y-2
        married_filing_separately: schedule(&[
            (dec!(0), Some(dec!(11925)), dec!(0.10)),
            (dec!(11925), Some(dec!(48475)), dec!(0.12)),
            (dec!(48475), Some(dec!(103350)), dec!(0.22)),
            (dec!(103350), Some(dec!(197300)), dec!(0.24)),
            (dec!(197300), Some(dec!(250525)), dec!(0.32)),
            (dec!(250525), Some(dec!(375800)), dec!(0.35)),
            (dec!(375800), None, dec!(0.37)),
        ]),
        // Schedule Z
        head_of_household: schedule(&[
            (dec!(0), Some(dec!(17000)), dec!(0.10)),
            (dec!(17000), Some(dec!(64850)), dec!(0.12)),
            (dec!(64850), Some(dec!(103350)), dec!(0.22)),
            (dec!(103350), Some(dec!(197300)), dec!(0.24)),
            (dec!(197300), Some(dec!(250500)), dec!(0.32)),
            (dec!(250500), Some(dec!(626350)), dec!(0.35)),
            (dec!(626350), None, dec!(0.37)),
        ]),
    }
}

fn config() -> TaxYearConfig {
    TaxYearConfig {
        tax_year: 2025,
        standard_deduction: ByFilingStatus {
            single: dec!(15000),
            married_filing_jointly: dec!(30000),
            married_filing_separately: dec!(15000),
            head_of_household: dec!(22500),
        },

        se_net_earnings_factor: dec!(0.9235),
        ss_tax_rate: dec!(0.124),
        medicare_tax_rate: dec!(0.029),
        ss_wage_max: dec!(176100),
        additional_medicare_rate: dec!(0.009),
        additional_medicare_threshold: dec!(200000),
        se_deduction_factor: dec!(0.50),

        qbi_rate: dec!(0.20),
        qbi_threshold: ByFilingStatus {
            single: dec!(197300),
            married_filing_jointly: dec!(394600),
            married_filing_separately: dec!(197300),
            head_of_household: dec!(197300),
        },
        qbi_phase_in_range: dec!(50000),
        qbi_wage_limit_rate: dec!(0.50),
        qbi_alt_wage_limit_rate: dec!(0.25),
        qbi_property_rate: dec!(0.025),

        amt_exemption: ByFilingStatus {
            single: dec!(88100),
            married_filing_jointly: dec!(137000),
            married_filing_separately: dec!(68500),
            head_of_household: dec!(88100),
        },
        amt_phaseout_start: ByFilingStatus {
            single: dec!(626350),
            married_filing_jointly: dec!(1252700),
            married_filing_separately: dec!(626350),
            head_of_household: dec!(626350),
        },
        amt_phaseout_rate: dec!(0.25),
        amt_lower_rate: dec!(0.26),
        amt_upper_rate: dec!(0.28),
        amt_rate_threshold: dec!(239100),
        amt_itemized_addback_rate: dec!(0.50),
        amt_itemized_addback_cap: dec!(10000),

        niit_rate: dec!(0.038),
        niit_threshold: ByFilingStatus {
            single: dec!(200000),
            married_filing_jointly: dec!(250000),
            married_filing_separately: dec!(125000),
            head_of_household: dec!(200000),
        },

        elective_deferral_limit: dec!(23500),
        catch_up_contribution: dec!(7500),
        catch_up_age: 50,
        annual_additions_limit: dec!(70000),
        se_retirement_contribution_rate: dec!(0.20),
    }
}

/// Approximate effective rates; progressive states are flattened to a
/// typical middle-income rate.
fn state_rates() -> BTreeMap<String, Decimal> {
    [
        ("AK", dec!(0)),
        ("AL", dec!(0.05)),
        ("AR", dec!(0.039)),
        ("AZ", dec!(0.025)),
        ("CA", dec!(0.0725)),
        ("CO", dec!(0.044)),
        ("CT", dec!(0.055)),
        ("DC", dec!(0.065)),
        ("DE", dec!(0.055)),
        ("FL", dec!(0)),
        ("GA", dec!(0.0539)),
        ("HI", dec!(0.0725)),
        ("IA", dec!(0.038)),
        ("ID", dec!(0.05695)),
        ("IL", dec!(0.0495)),
        ("IN", dec!(0.03)),
        ("KS", dec!(0.052)),
        ("KY", dec!(0.04)),
        ("LA", dec!(0.03)),
        ("MA", dec!(0.05)),
        ("MD", dec!(0.0475)),
        ("ME", dec!(0.0675)),
        ("MI", dec!(0.0425)),
        ("MN", dec!(0.068)),
        ("MO", dec!(0.047)),
        ("MS", dec!(0.044)),
        ("MT", dec!(0.059)),
        ("NC", dec!(0.0425)),
        ("ND", dec!(0.0195)),
        ("NE", dec!(0.052)),
        ("NH", dec!(0)),
        ("NJ", dec!(0.0637)),
        ("NM", dec!(0.049)),
        ("NV", dec!(0)),
        ("NY", dec!(0.0625)),
        ("OH", dec!(0.035)),
        ("OK", dec!(0.0475)),
        ("OR", dec!(0.0875)),
        ("PA", dec!(0.0307)),
        ("RI", dec!(0.0475)),
        ("SC", dec!(0.062)),
        ("SD", dec!(0)),
        ("TN", dec!(0)),
        ("TX", dec!(0)),
        ("UT", dec!(0.0455)),
        ("VA", dec!(0.0575)),
        ("VT", dec!(0.066)),
        ("WA", dec!(0)),
        ("WI", dec!(0.053)),
        ("WV", dec!(0.0482)),
        ("WY", dec!(0)),
    ]
    .into_iter()
    .map(|(code, rate)| (code.to_string(), rate))
    .collect()
}

pub(super) fn tables() -> TaxYearTables {
    TaxYearTables {
        config: config(),
        brackets: brackets(),
        state_rates: state_rates(),
    }
}
