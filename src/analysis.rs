//! Analyses over the catalog: term-over-term diffs, course histories,
//! redundancy checks, and prerequisite frequency.

/// Term-over-term requirement diffs.
pub mod diff;
pub use diff::{diff, Change, Diff};

/// Per-course requirement histories.
pub mod history;
pub use history::{build_histories, build_history, CourseHistory};

/// Redundant, nonexistent, and cyclic prerequisites.
pub mod redundancy;
pub use redundancy::{
    analyze, unsatisfiable_requirements, PrereqChain, PrereqGraph, RedundancyReport,
};

/// Common prerequisites per subject.
pub mod frequency;
pub use frequency::{common_prereqs, SubjectSummary};
