//! The catalog: prerequisite requirements for every course, term by term.
//!
//! A [`Catalog`] is the repository the analyses run against. It owns one
//! requirements table per term and answers point lookups ("what did MATH 20C
//! require in FA21?") as well as whole-catalog queries (every course code ever
//! offered, the list of terms eligible for history analysis).

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::domain::{CourseCode, Quarter, RequirementSet, TermCode};

/// Errors returned by catalog lookups.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The requested term is not in the catalog.
    #[error("No catalog data for term '{0}'")]
    UnknownTerm(TermCode),

    /// The requested course appears in no term of the catalog.
    #[error("Course '{0}' is not offered in any term")]
    UnknownCourse(CourseCode),
}

/// Per-term prerequisite data for a whole institution.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Terms with data, kept sorted chronologically.
    terms: Vec<TermCode>,
    requirements: HashMap<TermCode, BTreeMap<CourseCode, RequirementSet>>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the requirements table for a term.
    pub fn insert_term(
        &mut self,
        term: TermCode,
        requirements: BTreeMap<CourseCode, RequirementSet>,
    ) {
        if self.requirements.insert(term, requirements).is_none() {
            let position = self.terms.partition_point(|t| t < &term);
            self.terms.insert(position, term);
        }
    }

    /// Every term with data, in chronological order.
    #[must_use]
    pub fn terms(&self) -> &[TermCode] {
        &self.terms
    }

    /// The terms used for course histories, in chronological order.
    ///
    /// Medical-school summer terms (`SU`) and special summer sessions (`S3`)
    /// cover a sparse, non-representative slice of the catalog and are left
    /// out of history analysis.
    #[must_use]
    pub fn history_terms(&self) -> Vec<TermCode> {
        self.terms
            .iter()
            .copied()
            .filter(|term| {
                !matches!(term.quarter(), Quarter::Summer | Quarter::SpecialSummer)
            })
            .collect()
    }

    /// The full requirements table for a term.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTerm`] if the term has no data.
    pub fn requirements_for(
        &self,
        term: TermCode,
    ) -> Result<&BTreeMap<CourseCode, RequirementSet>, Error> {
        self.requirements
            .get(&term)
            .ok_or(Error::UnknownTerm(term))
    }

    /// The requirements of one course in one term.
    ///
    /// Returns `None` when the course is not offered that term. An offered
    /// course with no prerequisites is `Some` of an empty set; the
    /// distinction matters to the history analysis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTerm`] if the term has no data.
    pub fn snapshot(
        &self,
        term: TermCode,
        course_code: &CourseCode,
    ) -> Result<Option<&RequirementSet>, Error> {
        Ok(self.requirements_for(term)?.get(course_code))
    }

    /// Every course code offered in at least one term, sorted.
    #[must_use]
    pub fn course_codes(&self) -> BTreeSet<&CourseCode> {
        self.requirements.values().flat_map(BTreeMap::keys).collect()
    }

    /// Whether the course is offered in any term.
    #[must_use]
    pub fn contains_course(&self, course_code: &CourseCode) -> bool {
        self.requirements
            .values()
            .any(|table| table.contains_key(course_code))
    }
}
