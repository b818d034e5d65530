//! The AND-of-OR structure describing what must be true to enroll in a
//! course.
//!
//! A [`RequirementSet`] is the conjunction of [`Requirement`] OR-groups: every
//! group must be satisfied, and a group is satisfied by holding any one of its
//! [`Prerequisite`] alternatives.

use serde::{Deserialize, Serialize};

use crate::domain::CourseCode;

/// A single prerequisite course, optionally satisfiable by concurrent
/// enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prerequisite {
    /// The prerequisite course.
    pub course_code: CourseCode,
    /// Whether the prerequisite may be taken in the same term as the course
    /// requiring it.
    pub allow_concurrent: bool,
}

impl Prerequisite {
    /// Create a prerequisite.
    #[must_use]
    pub const fn new(course_code: CourseCode, allow_concurrent: bool) -> Self {
        Self {
            course_code,
            allow_concurrent,
        }
    }
}

/// An OR-group of prerequisite alternatives: satisfied by holding any one.
///
/// Alternatives are ordered, and course codes within a group are distinct:
/// constructing a group collapses duplicate codes, keeping the most
/// permissive `allow_concurrent` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "Vec<Prerequisite>", into = "Vec<Prerequisite>")]
pub struct Requirement {
    alternatives: Vec<Prerequisite>,
}

impl Requirement {
    /// Create an OR-group from a list of alternatives, collapsing duplicate
    /// course codes.
    #[must_use]
    pub fn new(alternatives: Vec<Prerequisite>) -> Self {
        let mut deduped: Vec<Prerequisite> = Vec::with_capacity(alternatives.len());
        for prereq in alternatives {
            if let Some(existing) = deduped
                .iter_mut()
                .find(|p| p.course_code == prereq.course_code)
            {
                // Concurrent enrollment is the more permissive option.
                existing.allow_concurrent |= prereq.allow_concurrent;
            } else {
                deduped.push(prereq);
            }
        }
        Self {
            alternatives: deduped,
        }
    }

    /// The alternatives in this group, in order.
    #[must_use]
    pub fn alternatives(&self) -> &[Prerequisite] {
        &self.alternatives
    }

    /// The number of alternatives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// Whether the group has no alternatives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Whether any alternative references the given course.
    #[must_use]
    pub fn mentions(&self, course_code: &CourseCode) -> bool {
        self.alternatives
            .iter()
            .any(|p| &p.course_code == course_code)
    }
}

impl From<Vec<Prerequisite>> for Requirement {
    fn from(alternatives: Vec<Prerequisite>) -> Self {
        Self::new(alternatives)
    }
}

impl From<Requirement> for Vec<Prerequisite> {
    fn from(requirement: Requirement) -> Self {
        requirement.alternatives
    }
}

impl FromIterator<Prerequisite> for Requirement {
    fn from_iter<I: IntoIterator<Item = Prerequisite>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Requirement {
    type Item = &'a Prerequisite;
    type IntoIter = std::slice::Iter<'a, Prerequisite>;

    fn into_iter(self) -> Self::IntoIter {
        self.alternatives.iter()
    }
}

/// The full prerequisite structure for one course in one term: the AND of
/// its OR-groups.
///
/// An *empty* set is a course with no prerequisites; a course that is not
/// offered in a term has no set at all (`Option<RequirementSet>::None`
/// upstream). Constructing a set drops empty groups and collapses duplicate
/// groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "Vec<Requirement>", into = "Vec<Requirement>")]
pub struct RequirementSet {
    groups: Vec<Requirement>,
}

impl RequirementSet {
    /// Create a requirement set, dropping empty groups and duplicate groups.
    #[must_use]
    pub fn new(groups: Vec<Requirement>) -> Self {
        let mut deduped: Vec<Requirement> = Vec::with_capacity(groups.len());
        for group in groups {
            if !group.is_empty() && !deduped.contains(&group) {
                deduped.push(group);
            }
        }
        Self { groups: deduped }
    }

    /// The OR-groups in this set, in order.
    #[must_use]
    pub fn groups(&self) -> &[Requirement] {
        &self.groups
    }

    /// The number of OR-groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the course has no prerequisites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over the OR-groups.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.groups.iter()
    }

    /// Every course code mentioned anywhere in the set, in order of first
    /// appearance, without duplicates.
    #[must_use]
    pub fn mentioned_courses(&self) -> Vec<&CourseCode> {
        let mut seen = Vec::new();
        for group in &self.groups {
            for prereq in group {
                if !seen.contains(&&prereq.course_code) {
                    seen.push(&prereq.course_code);
                }
            }
        }
        seen
    }
}

impl From<Vec<Requirement>> for RequirementSet {
    fn from(groups: Vec<Requirement>) -> Self {
        Self::new(groups)
    }
}

impl From<RequirementSet> for Vec<Requirement> {
    fn from(set: RequirementSet) -> Self {
        set.groups
    }
}

impl FromIterator<Requirement> for RequirementSet {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RequirementSet {
    type Item = &'a Requirement;
    type IntoIter = std::slice::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prereq(code: &str, concurrent: bool) -> Prerequisite {
        Prerequisite::new(code.try_into().unwrap(), concurrent)
    }

    #[test]
    fn duplicate_codes_collapse_keeping_most_permissive() {
        let group = Requirement::new(vec![
            prereq("MATH 20B", false),
            prereq("MATH 10B", false),
            prereq("MATH 20B", true),
        ]);

        assert_eq!(
            group.alternatives(),
            [prereq("MATH 20B", true), prereq("MATH 10B", false)]
        );
    }

    #[test]
    fn concurrency_is_not_revoked_by_later_duplicate() {
        let group = Requirement::new(vec![prereq("MATH 20B", true), prereq("MATH 20B", false)]);

        assert_eq!(group.alternatives(), [prereq("MATH 20B", true)]);
    }

    #[test]
    fn empty_groups_are_dropped() {
        let set = RequirementSet::new(vec![
            Requirement::new(vec![prereq("MATH 3C", false)]),
            Requirement::default(),
        ]);

        assert_eq!(set.len(), 1);
    }

    #[test]
    fn duplicate_groups_collapse() {
        let group = Requirement::new(vec![prereq("MATH 3C", false)]);
        let set = RequirementSet::new(vec![group.clone(), group.clone()]);

        assert_eq!(set.groups(), [group]);
    }

    #[test]
    fn empty_set_has_no_prereqs() {
        let set = RequirementSet::default();
        assert!(set.is_empty());
        assert!(set.mentioned_courses().is_empty());
    }

    #[test]
    fn mentioned_courses_deduplicates_across_groups() {
        let set = RequirementSet::new(vec![
            Requirement::new(vec![prereq("MATH 10B", false), prereq("MATH 20B", false)]),
            Requirement::new(vec![prereq("MATH 20B", true), prereq("MATH 31BH", false)]),
        ]);

        let codes: Vec<String> = set
            .mentioned_courses()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(codes, ["MATH 10B", "MATH 20B", "MATH 31BH"]);
    }

    #[test]
    fn deserialization_preserves_invariants() {
        let json = r#"[
            [
                {"course_code": "MATH 20B", "allow_concurrent": false},
                {"course_code": "MATH 20B", "allow_concurrent": true}
            ],
            []
        ]"#;
        let set: RequirementSet = serde_json::from_str(json).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.groups()[0].alternatives(), [prereq("MATH 20B", true)]);
    }
}
