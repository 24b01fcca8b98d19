use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FilingStatusCode {
    #[default]
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
}

impl FilingStatusCode {
    pub const ALL: [Self; 4] = [
        Self::Single,
        Self::MarriedFilingJointly,
        Self::MarriedFilingSeparately,
        Self::HeadOfHousehold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
        }
    }

    /// Parses a status code or one of the long-form names editors emit
    /// (`single`, `married_joint`, `head_of_household`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "s" | "single" => Some(Self::Single),
            "mfj" | "married_joint" | "married_filing_jointly" | "marriedfilingjointly" => {
                Some(Self::MarriedFilingJointly)
            }
            "mfs" | "married_separate" | "married_filing_separately"
            | "marriedfilingseparately" => Some(Self::MarriedFilingSeparately),
            "hoh" | "head_of_household" | "headofhousehold" => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }
}

impl fmt::Display for FilingStatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
        };
        f.write_str(name)
    }
}

impl<'de> Deserialize<'de> for FilingStatusCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(Self::default());
        };
        Ok(Self::parse(&raw).unwrap_or_else(|| {
            warn!(filing_status = %raw, "Unrecognized filing status; assuming Single");
            Self::default()
        }))
    }
}

/// One value per filing status, used for every status-specific constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByFilingStatus<T> {
    pub single: T,
    pub married_filing_jointly: T,
    pub married_filing_separately: T,
    pub head_of_household: T,
}

impl<T> ByFilingStatus<T> {
    pub fn get(
        &self,
        status: FilingStatusCode,
    ) -> &T {
        match status {
            FilingStatusCode::Single => &self.single,
            FilingStatusCode::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatusCode::MarriedFilingSeparately => &self.married_filing_separately,
            FilingStatusCode::HeadOfHousehold => &self.head_of_household,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilingStatusCode, &T)> {
        FilingStatusCode::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }
}
