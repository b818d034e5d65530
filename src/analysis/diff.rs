//! Term-over-term comparison of a course's prerequisites.
//!
//! [`diff`] compares two requirement snapshots of the same course in adjacent
//! terms and classifies the transition. When both snapshots exist but differ,
//! OR-groups that merely evolved are paired up greedily and reported as
//! [`Change`]s rather than as a wholesale remove-and-add, which keeps the
//! output readable for the common case of one course swapped inside a group.

use serde::Serialize;

use crate::domain::{Prerequisite, Requirement, RequirementSet, TermCode};

/// How one OR-group evolved between two terms.
///
/// Every alternative of the paired groups appears in exactly one field, so
/// the new group can be reconstructed from `unchanged`, `flipped_concurrent`
/// and `added`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    /// Alternatives present in both terms with the same concurrency.
    pub unchanged: Vec<Prerequisite>,
    /// Alternatives present in both terms whose concurrency flipped; carries
    /// the new value.
    pub flipped_concurrent: Vec<Prerequisite>,
    /// Alternatives dropped from the group.
    pub removed: Vec<Prerequisite>,
    /// Alternatives added to the group.
    pub added: Vec<Prerequisite>,
}

impl Change {
    fn between(old_group: &Requirement, new_group: &Requirement) -> Self {
        let mut unchanged = Vec::new();
        let mut flipped_concurrent = Vec::new();
        let mut removed = Vec::new();

        for prereq in old_group {
            match new_group
                .alternatives()
                .iter()
                .find(|p| p.course_code == prereq.course_code)
            {
                Some(counterpart) if counterpart.allow_concurrent == prereq.allow_concurrent => {
                    unchanged.push(prereq.clone());
                }
                Some(counterpart) => flipped_concurrent.push(counterpart.clone()),
                None => removed.push(prereq.clone()),
            }
        }

        let added = new_group
            .alternatives()
            .iter()
            .filter(|p| !old_group.mentions(&p.course_code))
            .cloned()
            .collect();

        Self {
            unchanged,
            flipped_concurrent,
            removed,
            added,
        }
    }
}

/// The transition of one course's prerequisites between two adjacent terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Diff {
    /// The course is offered in the new term but was not in the old one.
    NewCourse {
        /// The term the course appeared in.
        term: TermCode,
        /// Its requirements in that term.
        requirements: RequirementSet,
    },
    /// The course was offered in the old term but is not in the new one.
    RemovedCourse {
        /// The term the course disappeared in.
        term: TermCode,
    },
    /// Requirements are identical in both terms (or the course is offered in
    /// neither).
    Unchanged,
    /// Requirements differ between the terms.
    Changed {
        /// The term the change took effect in.
        term: TermCode,
        /// OR-groups new in this term that pair with no old group.
        added: RequirementSet,
        /// OR-groups from the old term that pair with no new group.
        removed: RequirementSet,
        /// Paired groups that evolved in place.
        changes: Vec<Change>,
    },
}

impl Diff {
    /// Whether this transition left the requirements untouched.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Compare two snapshots of a course taken in adjacent terms.
///
/// `term` is the newer of the two terms; `None` means the course was not
/// offered. Groups present verbatim in both snapshots are ignored. Each
/// remaining old group is paired with the first remaining new group that
/// mentions any of its alternatives, scanning the old group's alternatives in
/// order; the first hit wins and both groups leave the pool. Pairing order
/// therefore follows the old snapshot's group order.
#[must_use]
pub fn diff(term: TermCode, old: Option<&RequirementSet>, new: Option<&RequirementSet>) -> Diff {
    let (old, new) = match (old, new) {
        (None, None) => return Diff::Unchanged,
        (None, Some(new)) => {
            return Diff::NewCourse {
                term,
                requirements: new.clone(),
            };
        }
        (Some(_), None) => return Diff::RemovedCourse { term },
        (Some(old), Some(new)) => (old, new),
    };

    let mut old_only: Vec<&Requirement> =
        old.iter().filter(|g| !new.groups().contains(g)).collect();
    let mut new_only: Vec<&Requirement> =
        new.iter().filter(|g| !old.groups().contains(g)).collect();

    if old_only.is_empty() && new_only.is_empty() {
        return Diff::Unchanged;
    }

    let mut changes = Vec::new();
    let mut index = 0;
    while index < old_only.len() {
        let old_group = old_only[index];
        let paired = old_group
            .alternatives()
            .iter()
            .find_map(|alt| new_only.iter().position(|g| g.mentions(&alt.course_code)));

        if let Some(position) = paired {
            let new_group = new_only.remove(position);
            old_only.remove(index);
            changes.push(Change::between(old_group, new_group));
        } else {
            index += 1;
        }
    }

    Diff::Changed {
        term,
        added: new_only.into_iter().cloned().collect(),
        removed: old_only.into_iter().cloned().collect(),
        changes,
    }
}
