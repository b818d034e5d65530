//! Domain models for prerequisite analysis.
//!
//! This module contains the core value types: course codes, term codes, and
//! the requirement structures built from them.

/// Course identifier types and parsing.
pub mod course_code;
pub use course_code::{CourseCode, Subject};

/// Academic term types and parsing.
pub mod term_code;
pub use term_code::{Quarter, TermCode};

/// Prerequisite requirement structures.
pub mod requirement;
pub use requirement::{Prerequisite, Requirement, RequirementSet};
