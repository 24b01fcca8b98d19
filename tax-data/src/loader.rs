use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{ByFilingStatus, FilingStatusCode, TaxBracket};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("No brackets for schedule {schedule} in tax year {tax_year}")]
    MissingSchedule { tax_year: i32, schedule: &'static str },

    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// Maps an IRS schedule code to the filing status it covers.
///
/// - Schedule X → Single (S)
/// - Schedule Y-1 → Married Filing Jointly (MFJ)
/// - Schedule Y-2 → Married Filing Separately (MFS)
/// - Schedule Z → Head of Household (HOH)
fn schedule_to_filing_status(schedule: &str) -> Result<FilingStatusCode, BracketLoaderError> {
    match schedule.trim() {
        "X" => Ok(FilingStatusCode::Single),
        "Y-1" => Ok(FilingStatusCode::MarriedFilingJointly),
        "Y-2" => Ok(FilingStatusCode::MarriedFilingSeparately),
        "Z" => Ok(FilingStatusCode::HeadOfHousehold),
        _ => Err(BracketLoaderError::InvalidSchedule(schedule.to_string())),
    }
}

fn schedule_code(status: FilingStatusCode) -> &'static str {
    match status {
        FilingStatusCode::Single => "X",
        FilingStatusCode::MarriedFilingJointly => "Y-1",
        FilingStatusCode::MarriedFilingSeparately => "Y-2",
        FilingStatusCode::HeadOfHousehold => "Z",
    }
}

/// A single record from the tax brackets CSV file.
///
/// - `tax_year`: The tax year (e.g., 2025)
/// - `schedule`: The IRS schedule code (X, Y-1, Y-2, Z)
/// - `min_income`: The minimum income for this bracket
/// - `max_income`: The maximum income for this bracket (empty for unlimited)
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket schedules from CSV files.
///
/// The CSV uses IRS schedule codes (X, Y-1, Y-2, Z) which are mapped to
/// filing statuses. Files may hold several tax years; only the requested
/// year is kept.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Groups the records for `tax_year` into one schedule per filing status.
    ///
    /// Each schedule is sorted by `min_income`. Every filing status must have
    /// at least one bracket; overlaps and gaps are left for
    /// [`TaxYearTables::validate`](tax_core::TaxYearTables::validate).
    pub fn schedules(
        records: &[BracketRecord],
        tax_year: i32,
    ) -> Result<ByFilingStatus<Vec<TaxBracket>>, BracketLoaderError> {
        let mut schedules = ByFilingStatus {
            single: Vec::new(),
            married_filing_jointly: Vec::new(),
            married_filing_separately: Vec::new(),
            head_of_household: Vec::new(),
        };

        for record in records.iter().filter(|r| r.tax_year == tax_year) {
            let bracket = TaxBracket::new(record.min_income, record.max_income, record.rate);
            match schedule_to_filing_status(&record.schedule)? {
                FilingStatusCode::Single => schedules.single.push(bracket),
                FilingStatusCode::MarriedFilingJointly => {
                    schedules.married_filing_jointly.push(bracket)
                }
                FilingStatusCode::MarriedFilingSeparately => {
                    schedules.married_filing_separately.push(bracket)
                }
                FilingStatusCode::HeadOfHousehold => schedules.head_of_household.push(bracket),
            }
        }

        for schedule in [
            &mut schedules.single,
            &mut schedules.married_filing_jointly,
            &mut schedules.married_filing_separately,
            &mut schedules.head_of_household,
        ] {
            schedule.sort_by(|a, b| a.min_income.cmp(&b.min_income));
        }

        for (status, schedule) in schedules.iter() {
            if schedule.is_empty() {
                return Err(BracketLoaderError::MissingSchedule {
                    tax_year,
                    schedule: schedule_code(status),
                });
            }
        }

        debug!(tax_year, "Loaded bracket schedules");
        Ok(schedules)
    }

    /// Reads `path` and returns the schedules for `tax_year`.
    pub fn from_path(
        path: &Path,
        tax_year: i32,
    ) -> Result<ByFilingStatus<Vec<TaxBracket>>, BracketLoaderError> {
        let file = File::open(path).map_err(|source| BracketLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let records = Self::parse(file)?;
        Self::schedules(&records, tax_year)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"tax_year,schedule,min_income,max_income,rate
2025,X,11925,48475,0.12
2025,X,0,11925,0.10
2025,Y-1,0,23850,0.10
2025,Y-1,23850,,0.12
2025,Y-2,0,11925,0.10
2025,Y-2,11925,,0.12
2025,Z,0,17000,0.10
2025,Z,17000,,0.12
2024,X,0,11600,0.10
"#;

    // =========================================================================
    // parse tests
    // =========================================================================

    #[test]
    fn test_parse_csv_single_bracket() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n2025,X,0,11925,0.10";

        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![BracketRecord {
                tax_year: 2025,
                schedule: "X".to_string(),
                min_income: dec!(0),
                max_income: Some(dec!(11925)),
                rate: dec!(0.10),
            }]
        );
    }

    #[test]
    fn test_parse_csv_unlimited_max_income() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n2025,X,626350,,0.37";

        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].max_income, None);
        assert_eq!(records[0].rate, dec!(0.37));
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "tax_year,schedule,min_income\n2025,X,0";

        let err = BracketLoader::parse(csv.as_bytes()).expect_err("Should fail for missing column");

        let BracketLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n2025,X,abc,11925,0.10";

        let err = BracketLoader::parse(csv.as_bytes()).expect_err("Should fail for bad decimal");

        assert!(matches!(err, BracketLoaderError::CsvParse(_)));
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n";

        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    // =========================================================================
    // schedules tests
    // =========================================================================

    #[test]
    fn test_schedules_group_by_status_and_sort() {
        let records = BracketLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        let schedules = BracketLoader::schedules(&records, 2025).expect("Should group");

        assert_eq!(
            schedules.single,
            vec![
                TaxBracket::new(dec!(0), Some(dec!(11925)), dec!(0.10)),
                TaxBracket::new(dec!(11925), Some(dec!(48475)), dec!(0.12)),
            ]
        );
        assert_eq!(schedules.married_filing_jointly.len(), 2);
        assert_eq!(schedules.head_of_household[1].min_income, dec!(17000));
    }

    #[test]
    fn test_schedules_ignore_other_years() {
        let records = BracketLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        let schedules = BracketLoader::schedules(&records, 2025).expect("Should group");

        assert!(schedules.single.iter().all(|b| b.max_income != Some(dec!(11600))));
    }

    #[test]
    fn test_schedules_require_every_status() {
        let records = BracketLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        let err = BracketLoader::schedules(&records, 2024).expect_err("Y-1 is missing for 2024");

        match err {
            BracketLoaderError::MissingSchedule { tax_year, schedule } => {
                assert_eq!(tax_year, 2024);
                assert_eq!(schedule, "Y-1");
            }
            other => panic!("expected MissingSchedule, got {other:?}"),
        }
    }

    #[test]
    fn test_schedules_reject_unknown_schedule() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n2025,QSS,0,,0.10";
        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        let err = BracketLoader::schedules(&records, 2025).expect_err("QSS is not a schedule");

        match err {
            BracketLoaderError::InvalidSchedule(ref schedule) => assert_eq!(schedule, "QSS"),
            other => panic!("expected InvalidSchedule, got {other:?}"),
        }
    }

    // =========================================================================
    // schedule_to_filing_status tests
    // =========================================================================

    #[test]
    fn test_schedule_to_filing_status_codes() {
        let cases = [
            ("X", FilingStatusCode::Single),
            ("Y-1", FilingStatusCode::MarriedFilingJointly),
            ("Y-2", FilingStatusCode::MarriedFilingSeparately),
            ("Z", FilingStatusCode::HeadOfHousehold),
        ];

        for (schedule, expected) in cases {
            assert_eq!(schedule_to_filing_status(schedule).expect("maps"), expected);
            assert_eq!(schedule_code(expected), schedule);
        }
    }
}
