use std::{cmp::Ordering, fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// A validated course subject: 2-4 uppercase ASCII letters (e.g. `MATH`,
/// `PHYS`, `BICD`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subject(NonEmptyString);

impl std::hash::Hash for Subject {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.as_str().hash(state);
    }
}

impl Subject {
    /// Creates a new `Subject` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSubjectError` if the string is not 2-4 uppercase
    /// ASCII letters.
    pub fn new(s: String) -> Result<Self, InvalidSubjectError> {
        if !(2..=4).contains(&s.len()) || !s.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(InvalidSubjectError(s));
        }

        let non_empty = NonEmptyString::new(s.clone()).map_err(|_| InvalidSubjectError(s))?;
        Ok(Self(non_empty))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Subject {
    type Error = InvalidSubjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Subject {
    type Error = InvalidSubjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        subject.0.as_str().to_string()
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Subject {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Subject {
    type Err = InvalidSubjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

/// Error returned when a string is not a valid course subject.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid subject '{0}': must be 2-4 uppercase letters (A-Z)")]
pub struct InvalidSubjectError(String);

/// A course identifier: subject plus catalog number.
///
/// The number keeps a leading digit run plus an optional trailing letter
/// suffix (e.g. `20B`, `2BL`). A few special courses have purely alphabetic
/// numbers (e.g. `WARR CULTD`); these sort after all numbered courses.
///
/// Ordering is `(subject, numeric value of the leading digits, suffix)`, so
/// `MATH 20B` sorts before `MATH 100A` even though `"100A" < "20B"`
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseCode {
    subject: Subject,
    number: String,
}

impl CourseCode {
    /// Create a course code from a validated subject and a raw number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Number`] if the number is empty or contains
    /// characters other than uppercase letters and digits.
    pub fn new(subject: Subject, number: String) -> Result<Self, Error> {
        if number.is_empty()
            || !number
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        {
            return Err(Error::Number(number));
        }

        Ok(Self { subject, number })
    }

    /// The subject component.
    #[must_use]
    pub const fn subject(&self) -> &Subject {
        &self.subject
    }

    /// The catalog number component.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Splits the number into its leading digit run and the remaining letter
    /// suffix.
    ///
    /// `"20B"` yields `(Some(20), "B")`; a purely alphabetic number yields
    /// `(None, number)`.
    #[must_use]
    pub fn number_parts(&self) -> (Option<u32>, &str) {
        let split = self
            .number
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.number.len());
        let (digits, suffix) = self.number.split_at(split);
        (digits.parse().ok(), suffix)
    }

    /// Whether this is an upper-division course (number 100-199).
    #[must_use]
    pub fn is_upper_division(&self) -> bool {
        matches!(self.number_parts().0, Some(100..=199))
    }

    fn sort_key(&self) -> (u32, &str) {
        let (value, suffix) = self.number_parts();
        // Non-numeric codes rank after every numbered course.
        (value.unwrap_or(u32::MAX), suffix)
    }
}

impl Ord for CourseCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.subject
            .cmp(&other.subject)
            .then_with(|| self.sort_key().cmp(&other.sort_key()))
            // Distinguish e.g. "020B" from "20B" so ordering stays consistent
            // with equality.
            .then_with(|| self.number.cmp(&other.number))
    }
}

impl PartialOrd for CourseCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.number)
    }
}

/// Errors that can occur when parsing or constructing a course code.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The string does not split into a subject and a number.
    #[error("Invalid course code '{0}'")]
    Syntax(String),

    /// The subject component is malformed.
    #[error(transparent)]
    Subject(#[from] InvalidSubjectError),

    /// The number component is malformed.
    #[error("Invalid course number '{0}': must be uppercase letters and digits")]
    Number(String),
}

impl FromStr for CourseCode {
    type Err = Error;

    /// Parses `"MATH 20C"` or `"MATH20C"` forms: a leading uppercase letter
    /// run is the subject, the remainder (after an optional single space) is
    /// the number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| !c.is_ascii_uppercase())
            .ok_or_else(|| Error::Syntax(s.to_string()))?;
        if split == 0 {
            return Err(Error::Syntax(s.to_string()));
        }

        let (subject, rest) = s.split_at(split);
        let number = rest.strip_prefix(' ').unwrap_or(rest);

        let subject = Subject::new(subject.to_string())?;
        Self::new(subject, number.to_string())
    }
}

impl TryFrom<&str> for CourseCode {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl TryFrom<String> for CourseCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<CourseCode> for String {
    fn from(code: CourseCode) -> Self {
        code.to_string()
    }
}
