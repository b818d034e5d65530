//! Which prerequisites are common to most courses of a subject.
//!
//! For curriculum planning it is useful to know that, say, most upper
//! division MATH courses require MATH 18: a student missing it is locked out
//! of the bulk of the subject. [`common_prereqs`] tallies, per subject, how
//! many of the subject's courses mention each prerequisite, and keeps the
//! prerequisites whose share exceeds a threshold.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::domain::{CourseCode, RequirementSet, Subject};

/// The common prerequisites of one slice of a subject's courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectSummary {
    /// The subject the slice belongs to.
    pub subject: Subject,
    /// Whether the slice is restricted to upper-division courses.
    pub upper_division_only: bool,
    /// The number of courses in the slice.
    pub course_count: usize,
    /// Prerequisites mentioned by more than the threshold share of the
    /// slice, with their mention counts, most common first.
    pub prereqs: Vec<(CourseCode, usize)>,
}

fn summarize(
    subject: &Subject,
    slice: &[&CourseCode],
    upper_division_only: bool,
    requirements: &BTreeMap<CourseCode, RequirementSet>,
    threshold: f64,
) -> SubjectSummary {
    let mut counts: HashMap<&CourseCode, usize> = HashMap::new();
    for course in slice {
        if let Some(set) = requirements.get(*course) {
            for prereq in set.mentioned_courses() {
                *counts.entry(prereq).or_default() += 1;
            }
        }
    }

    let course_count = slice.len();
    let mut prereqs: Vec<(CourseCode, usize)> = counts
        .into_iter()
        .filter(|&(_, count)| {
            #[allow(clippy::cast_precision_loss)]
            let share = count as f64 / course_count as f64;
            share > threshold
        })
        .map(|(prereq, count)| (prereq.clone(), count))
        .collect();
    prereqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    SubjectSummary {
        subject: subject.clone(),
        upper_division_only,
        course_count,
        prereqs,
    }
}

/// Tally the common prerequisites of every subject in a term.
///
/// A subject's courses are every code of that subject appearing in the term,
/// offered or merely referenced. Each subject yields a summary over all of
/// its courses and, when the subject has more than one upper-division
/// course, a second summary restricted to those. Slices with a single course
/// are skipped, as are upper-division slices identical to the full one.
///
/// A prerequisite is kept when strictly more than `threshold` of the slice's
/// courses mention it. Output is sorted by subject.
#[must_use]
pub fn common_prereqs(
    requirements: &BTreeMap<CourseCode, RequirementSet>,
    threshold: f64,
) -> Vec<SubjectSummary> {
    let mut by_subject: BTreeMap<Subject, BTreeSet<&CourseCode>> = BTreeMap::new();
    for (course, set) in requirements {
        by_subject
            .entry(course.subject().clone())
            .or_default()
            .insert(course);
        for mentioned in set.mentioned_courses() {
            by_subject
                .entry(mentioned.subject().clone())
                .or_default()
                .insert(mentioned);
        }
    }

    let mut summaries = Vec::new();
    for (subject, courses) in &by_subject {
        for upper_division_only in [false, true] {
            let slice: Vec<&CourseCode> = courses
                .iter()
                .copied()
                .filter(|course| !upper_division_only || course.is_upper_division())
                .collect();
            if slice.len() <= 1 {
                continue;
            }
            if upper_division_only && slice.len() == courses.len() {
                continue;
            }
            summaries.push(summarize(
                subject,
                &slice,
                upper_division_only,
                requirements,
                threshold,
            ));
        }
    }
    summaries
}

#[cfg(test)]
mod tests {
    use crate::domain::{Prerequisite, Requirement};

    use super::*;

    fn code(s: &str) -> CourseCode {
        s.try_into().unwrap()
    }

    fn prereqs(codes: &[&str]) -> RequirementSet {
        codes
            .iter()
            .map(|c| Requirement::new(vec![Prerequisite::new(code(c), false)]))
            .collect()
    }

    fn table(courses: &[(&str, &[&str])]) -> BTreeMap<CourseCode, RequirementSet> {
        courses
            .iter()
            .map(|(course, required)| (code(course), prereqs(required)))
            .collect()
    }

    #[test]
    fn shared_prereq_above_threshold_is_reported() {
        let requirements = table(&[
            ("MATH 20C", &["MATH 18"]),
            ("MATH 31AH", &["MATH 18"]),
            ("MATH 18", &[]),
        ]);

        let summaries = common_prereqs(&requirements, 0.5);

        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.subject.as_str(), "MATH");
        assert!(!summary.upper_division_only);
        assert_eq!(summary.course_count, 3);
        assert_eq!(summary.prereqs, [(code("MATH 18"), 2)]);
    }

    #[test]
    fn rare_prereqs_fall_below_the_threshold() {
        let requirements = table(&[
            ("MATH 20B", &["MATH 20A"]),
            ("MATH 20C", &["MATH 20A"]),
            ("MATH 20D", &["MATH 20A"]),
            ("MATH 20E", &["MATH 4C"]),
            ("MATH 20A", &[]),
        ]);

        let summaries = common_prereqs(&requirements, 0.5);
        let summary = &summaries[0];

        // 3 of 6 courses mention MATH 20A, which does not exceed 0.5; with a
        // lower threshold it appears.
        assert!(summary.prereqs.is_empty());
        let summaries = common_prereqs(&requirements, 0.25);
        assert_eq!(summaries[0].prereqs, [(code("MATH 20A"), 3)]);
    }

    #[test]
    fn upper_division_slice_gets_its_own_summary() {
        let requirements = table(&[
            ("CHEM 140A", &["CHEM 6C"]),
            ("CHEM 140B", &["CHEM 6C"]),
            ("CHEM 6C", &[]),
        ]);

        let summaries = common_prereqs(&requirements, 0.5);

        assert_eq!(summaries.len(), 2);
        assert!(!summaries[0].upper_division_only);
        assert_eq!(summaries[0].course_count, 3);

        let upper = &summaries[1];
        assert!(upper.upper_division_only);
        assert_eq!(upper.course_count, 2);
        assert_eq!(upper.prereqs, [(code("CHEM 6C"), 2)]);
    }

    #[test]
    fn single_course_subjects_are_skipped() {
        let requirements = table(&[("ANTH 101", &[])]);
        assert!(common_prereqs(&requirements, 0.5).is_empty());
    }

    #[test]
    fn referenced_but_unoffered_courses_count_toward_the_subject() {
        // PHYS 2A is never offered here but still belongs to the PHYS slice.
        let requirements = table(&[("PHYS 2B", &["PHYS 2A"]), ("PHYS 2C", &["PHYS 2A"])]);

        let summaries = common_prereqs(&requirements, 0.5);
        assert_eq!(summaries[0].course_count, 3);
        assert_eq!(summaries[0].prereqs, [(code("PHYS 2A"), 2)]);
    }

    #[test]
    fn prereqs_sort_by_count_then_code() {
        let requirements = table(&[
            ("MATH 20C", &["MATH 18", "MATH 20B"]),
            ("MATH 20D", &["MATH 18", "MATH 20B"]),
            ("MATH 20E", &["MATH 18"]),
        ]);

        let summaries = common_prereqs(&requirements, 0.1);
        let prereqs = &summaries[0].prereqs;

        assert_eq!(prereqs[0], (code("MATH 18"), 3));
        assert_eq!(prereqs[1], (code("MATH 20B"), 2));
    }
}
