use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// An academic quarter.
///
/// Variants are declared in calendar order within a year, so the derived
/// ordering is chronological: winter first, fall last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// Winter quarter (`WI`).
    Winter,
    /// Spring quarter (`SP`).
    Spring,
    /// First summer session (`S1`).
    Summer1,
    /// Second summer session (`S2`).
    Summer2,
    /// Medical school summer (`SU`).
    Summer,
    /// Special summer session (`S3`).
    SpecialSummer,
    /// Fall quarter (`FA`).
    Fall,
}

impl Quarter {
    /// The two-character quarter abbreviation.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Winter => "WI",
            Self::Spring => "SP",
            Self::Summer1 => "S1",
            Self::Summer2 => "S2",
            Self::Summer => "SU",
            Self::SpecialSummer => "S3",
            Self::Fall => "FA",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for Quarter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WI" => Ok(Self::Winter),
            "SP" => Ok(Self::Spring),
            "S1" => Ok(Self::Summer1),
            "S2" => Ok(Self::Summer2),
            "SU" => Ok(Self::Summer),
            "S3" => Ok(Self::SpecialSummer),
            "FA" => Ok(Self::Fall),
            _ => Err(Error::Quarter(s.to_string())),
        }
    }
}

/// An academic term: a quarter in a specific year.
///
/// Terms are totally ordered chronologically. The display form is the quarter
/// abbreviation followed by the two-digit year, e.g. `FA21` for fall 2021.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TermCode {
    year: u16,
    quarter: Quarter,
}

impl TermCode {
    /// Create a term code from a quarter and a full year (e.g. 2021).
    #[must_use]
    pub const fn new(quarter: Quarter, year: u16) -> Self {
        Self { year, quarter }
    }

    /// The quarter component.
    #[must_use]
    pub const fn quarter(self) -> Quarter {
        self.quarter
    }

    /// The full year (e.g. 2021).
    #[must_use]
    pub const fn year(self) -> u16 {
        self.year
    }
}

impl fmt::Display for TermCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{:02}", self.quarter, self.year % 100)
    }
}

/// Errors that can occur when parsing a term code.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The string is not a quarter abbreviation plus a two-digit year.
    #[error("Invalid term code '{0}'")]
    Syntax(String),

    /// The quarter abbreviation is unknown.
    #[error("Unknown quarter '{0}'")]
    Quarter(String),

    /// The year component is not a two-digit number.
    #[error("Invalid year in term code '{0}'")]
    Year(String),
}

impl FromStr for TermCode {
    type Err = Error;

    /// Parses the short form, e.g. `"FA21"`. Two-digit years map to 20xx.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(Error::Syntax(s.to_string()));
        }

        let (quarter, year) = s.split_at(2);
        let quarter = Quarter::from_str(quarter)?;
        if !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Year(s.to_string()));
        }
        let year: u16 = year.parse().map_err(|_| Error::Year(s.to_string()))?;

        Ok(Self::new(quarter, 2000 + year))
    }
}

impl TryFrom<&str> for TermCode {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl TryFrom<String> for TermCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<TermCode> for String {
    fn from(term: TermCode) -> Self {
        term.to_string()
    }
}
