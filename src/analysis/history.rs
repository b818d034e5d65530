//! Per-course requirement histories across the whole catalog.
//!
//! A [`CourseHistory`] strings together one course's requirement snapshots
//! over every history term and the [`Diff`] of each term-to-term transition.
//! [`build_histories`] produces them for every course in the catalog in
//! parallel.

use rayon::prelude::*;
use serde::Serialize;
use tracing::instrument;

use crate::{
    analysis::diff::{diff, Diff},
    catalog::{self, Catalog},
    domain::{CourseCode, RequirementSet, TermCode},
};

/// One course's requirements over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseHistory {
    course_code: CourseCode,
    has_changed: bool,
    snapshots: Vec<(TermCode, Option<RequirementSet>)>,
    diffs: Vec<Diff>,
    still_exists: bool,
}

impl CourseHistory {
    /// The course this history describes.
    #[must_use]
    pub const fn course_code(&self) -> &CourseCode {
        &self.course_code
    }

    /// Whether the requirements ever changed after the course first appeared.
    ///
    /// The course's first appearance is itself a transition, but a course
    /// that appeared once and then kept its requirements has not "changed".
    #[must_use]
    pub const fn has_changed(&self) -> bool {
        self.has_changed
    }

    /// The requirement snapshot in each history term, chronologically.
    /// `None` means the course was not offered that term.
    #[must_use]
    pub fn snapshots(&self) -> &[(TermCode, Option<RequirementSet>)] {
        &self.snapshots
    }

    /// One diff per term-to-term transition, chronologically: entry `i`
    /// compares term `i` with term `i + 1`. The transition into the first
    /// history term is not recorded.
    #[must_use]
    pub fn diffs(&self) -> &[Diff] {
        &self.diffs
    }

    /// Whether the course is offered in the most recent history term.
    #[must_use]
    pub const fn still_exists(&self) -> bool {
        self.still_exists
    }
}

fn history_of(
    course_code: &CourseCode,
    terms: &[TermCode],
    catalog: &Catalog,
) -> Result<CourseHistory, catalog::Error> {
    let mut snapshots = Vec::with_capacity(terms.len());
    for &term in terms {
        snapshots.push((term, catalog.snapshot(term, course_code)?.cloned()));
    }

    if snapshots.iter().all(|(_, snapshot)| snapshot.is_none()) {
        return Err(catalog::Error::UnknownCourse(course_code.clone()));
    }

    let mut transitions = 0;
    let mut diffs = Vec::with_capacity(snapshots.len().saturating_sub(1));
    let mut previous: Option<&RequirementSet> = None;
    for (index, (term, snapshot)) in snapshots.iter().enumerate() {
        let transition = diff(*term, previous, snapshot.as_ref());
        if !transition.is_unchanged() {
            transitions += 1;
        }
        if index > 0 {
            diffs.push(transition);
        }
        previous = snapshot.as_ref();
    }

    let still_exists = snapshots
        .last()
        .is_some_and(|(_, snapshot)| snapshot.is_some());

    Ok(CourseHistory {
        course_code: course_code.clone(),
        // The first appearance counts as a transition, so a course needs a
        // second one to have changed.
        has_changed: transitions > 1,
        snapshots,
        diffs,
        still_exists,
    })
}

/// Build the history of a single course over the catalog's history terms.
///
/// # Errors
///
/// Returns [`catalog::Error::UnknownCourse`] if the course is offered in no
/// history term.
pub fn build_history(
    catalog: &Catalog,
    course_code: &CourseCode,
) -> Result<CourseHistory, catalog::Error> {
    history_of(course_code, &catalog.history_terms(), catalog)
}

/// Build histories for every course in the catalog, sorted by course code.
///
/// Courses offered only in terms outside the history window are skipped.
#[must_use]
#[instrument(skip(catalog))]
pub fn build_histories(catalog: &Catalog) -> Vec<CourseHistory> {
    let terms = catalog.history_terms();
    let course_codes: Vec<&CourseCode> = catalog.course_codes().into_iter().collect();

    course_codes
        .par_iter()
        .filter_map(|course_code| history_of(course_code, &terms, catalog).ok())
        .collect()
}
