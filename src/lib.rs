//! Analysis of university course prerequisites over time.
//!
//! The crate models an institution's catalog as per-term requirement tables
//! and answers three kinds of question about it:
//!
//! - how did a course's prerequisites evolve term over term
//!   ([`analysis::history`])?
//! - which listed prerequisites are redundant, impossible to satisfy, or
//!   cyclic within a term ([`analysis::redundancy`])?
//! - which prerequisites gate most of a subject's courses
//!   ([`analysis::frequency`])?
//!
//! [`title`] parses the noisy free-text course titles that academic plans
//! use, turning them into the validated [`domain`] types everything else is
//! built on. Loading catalog data from its upstream formats and rendering
//! reports are left to callers.

pub mod analysis;
pub mod catalog;
pub mod domain;
pub mod title;

pub use catalog::Catalog;
pub use domain::{CourseCode, Prerequisite, Quarter, Requirement, RequirementSet, Subject, TermCode};
