//! Parsing of free-text course titles from academic plans.
//!
//! Plan spreadsheets describe courses with noisy human-entered titles
//! ("MATH 20C", "PHYS 2B / 2BL*", "TECH ELECT (SEE NOTE 2)"). [`clean_title`]
//! normalizes a raw title; [`parse_title`] then extracts structured course
//! codes from the cleaned form, splitting a combined lecture/lab listing into
//! two entries with apportioned credit units.
//!
//! Titles that name no real course ("NOT TAKEN", placeholder electives) are
//! not errors: they parse to an entry with no course code, which downstream
//! analysis filters out.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::{CourseCode, Subject};

/// Units carried by the lab section of a split physics-style listing.
const LAB_SECTION_UNITS: f64 = 2.0;

/// Units carried by the analysis section of a split language listing.
const ANALYSIS_SECTION_UNITS: f64 = 2.5;

/// Tokens that look like subjects but never are ("IE 1" is a placeholder,
/// not a course).
const NON_SUBJECTS: [&str; 5] = ["IE", "RR", "OR", "TE", "DEPT"];

/// Course code with an optional lecture/lab tail: `MATH 20C`, `PHYS 2B/2BL`,
/// `LTSP 2A & 2AX`.
static COURSE_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{2,4}) ?(\d+[A-Z]{0,2})(?: ?[&/] ?\d*[A-Z]([LX]))?\b")
        .expect("hardcoded regex is valid")
});

/// `DF-n - ` disclaimer prefixes on some plan rows.
static DISCLAIMER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"DF-?\d - ").expect("hardcoded regex is valid"));

/// Stray marker glyphs, control characters, and `<..>` footnote tags.
static STRAY_MARKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[*^~.#+=¹\x00-\x1F\x7F-\x{9F}]+|<..?>").expect("hardcoded regex is valid")
});

/// Placement-exam suffixes appended to course alternatives.
static PLACEMENT_EXAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*/\s*(AWPE?|A?ELWR|SDCC)").expect("hardcoded regex is valid"));

/// `OR` and slash separators between alternatives.
static OR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+OR\s+|\s*/\s*").expect("hardcoded regex is valid"));

static DASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("hardcoded regex is valid"));

static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +").expect("hardcoded regex is valid"));

/// Parenthetical administrative notes, e.g. `(SEE NOTE 2)`.
static ADMIN_NOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" ?\( ?(GE SEE|NOTE|FOR|SEE|REQUIRES|ONLY|OFFERED)[^)]*\)")
        .expect("hardcoded regex is valid")
});

/// Leading course counts, e.g. `2 ELECTIVES`.
static LEADING_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+ ").expect("hardcoded regex is valid"));

static ELECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ELECT?\b").expect("hardcoded regex is valid"));

/// Known abbreviation expansions, applied left to right.
static ABBREVIATIONS: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        (Regex::new(r"TECH\b").expect("hardcoded regex is valid"), "TECHNICAL"),
        (Regex::new(r"REQUIRE\b").expect("hardcoded regex is valid"), "REQUIREMENT"),
        (Regex::new(r"BIO\b").expect("hardcoded regex is valid"), "BIOLOGY"),
        (Regex::new(r"BIOPHYS\b").expect("hardcoded regex is valid"), "BIOPHYSICS"),
    ]
});

/// Normalize a raw course title before parsing.
///
/// An order-sensitive sequence of substitutions: strips stray glyphs and
/// control characters, collapses `OR`/slash separators into a single `" / "`
/// token, removes parenthetical administrative notes, expands known
/// abbreviations, and upper-cases the result. The substitution list is a
/// product policy table, not an algorithmic contract.
#[must_use]
pub fn clean_title(title: &str) -> String {
    let mut title = STRAY_MARKS.replace_all(title, "").into_owned();
    title = title.trim().to_string();
    title = PLACEMENT_EXAM.replace_all(&title, "").into_owned();
    title = title.to_uppercase();
    title = OR_SEPARATOR.replace_all(&title, " / ").into_owned();
    title = DASHES.replace_all(&title, " - ").into_owned();
    title = SPACES.replace_all(&title, " ").into_owned();
    title = ADMIN_NOTE.replace_all(&title, "").into_owned();
    title = LEADING_COUNT.replace_all(&title, "").into_owned();
    title = ELECTIVE.replace_all(&title, "ELECTIVE").into_owned();
    title = title.replace(" (VIS)", "");
    if title.starts_with("NE ELECTIVE ") {
        title.retain(|c| c != '(' && c != ')');
    }
    for (pattern, replacement) in &*ABBREVIATIONS {
        title = pattern.replace_all(&title, *replacement).into_owned();
    }
    title
}

/// A course identified in a title, with the credit units attributed to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedCourse {
    /// The parsed course, or `None` when the title names no real course.
    pub code: Option<CourseCode>,
    /// Credit units attributed to this entry.
    pub units: f64,
}

impl ParsedCourse {
    const fn unattributed(units: f64) -> Self {
        Self { code: None, units }
    }
}

/// Parse a cleaned course title into one or two course codes with units.
///
/// A title with a lab/analysis tail that is not already part of the primary
/// number (`PHYS 2B / 2BL`) splits into a lecture entry and a lab entry, with
/// a fixed share of the units going to the lab (`L` sections 2.0, `X`
/// sections 2.5). A title ending in the tail itself (`PHYS 2BL / 2CL`) is not
/// split, which avoids fabricating codes like `2BLL`.
///
/// Unparseable titles yield a single entry with no course code.
#[must_use]
pub fn parse_title(title: &str, units: f64) -> Vec<ParsedCourse> {
    if title.contains("NOT TAKEN") || title.starts_with("ADV CHEM") {
        return vec![ParsedCourse::unattributed(units)];
    }

    let title = DISCLAIMER.replace_all(title, "");
    let Some(captures) = COURSE_CODE_PATTERN.captures(&title) else {
        return vec![ParsedCourse::unattributed(units)];
    };

    let subject = &captures[1];
    let number = &captures[2];
    let lab = captures.get(3).map(|m| m.as_str());

    // There are no real course codes ending in XX; those are placeholders
    // like "TDHT 1XX".
    if NON_SUBJECTS.contains(&subject) || number.ends_with("XX") {
        return vec![ParsedCourse::unattributed(units)];
    }

    let number = number.trim_start_matches('0');
    let Ok(subject) = Subject::new(subject.to_string()) else {
        return vec![ParsedCourse::unattributed(units)];
    };
    let Ok(lecture) = CourseCode::new(subject.clone(), number.to_string()) else {
        return vec![ParsedCourse::unattributed(units)];
    };

    match lab {
        // A tail already present on the number ("PHYS 2BL / 2CL") must not be
        // appended again.
        Some(lab) if !number.ends_with(lab) => {
            let lab_units = if lab == "L" {
                LAB_SECTION_UNITS
            } else {
                ANALYSIS_SECTION_UNITS
            };
            CourseCode::new(subject, format!("{number}{lab}")).map_or_else(
                |_| {
                    vec![ParsedCourse {
                        code: Some(lecture.clone()),
                        units,
                    }]
                },
                |lab_course| {
                    vec![
                        ParsedCourse {
                            code: Some(lecture.clone()),
                            units: units - lab_units,
                        },
                        ParsedCourse {
                            code: Some(lab_course),
                            units: lab_units,
                        },
                    ]
                },
            )
        }
        _ => vec![ParsedCourse {
            code: Some(lecture),
            units,
        }],
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use test_case::test_case;

    use super::*;

    fn code(s: &str) -> CourseCode {
        CourseCode::try_from(s).unwrap()
    }

    #[test_case("Math 20C*", "MATH 20C"; "strips marks and uppercases")]
    #[test_case("CHEM 6A or 6AH", "CHEM 6A / 6AH"; "or becomes slash")]
    #[test_case("MCWP 40/50", "MCWP 40 / 50"; "slash is padded")]
    #[test_case("TECH ELECT (SEE NOTE 2)", "TECHNICAL ELECTIVE"; "note removed and abbreviations expanded")]
    #[test_case("2 ELECTIVES", "ELECTIVES"; "leading count removed")]
    #[test_case("BIO 181", "BIOLOGY 181"; "bio expanded")]
    #[test_case("UD BIOPHYS COURSE", "UD BIOPHYSICS COURSE"; "biophys expanded")]
    #[test_case("PHYS 2A<1>", "PHYS 2A"; "footnote tag removed")]
    #[test_case("MATH   18", "MATH 18"; "spaces collapse")]
    #[test_case("SOCI--UD", "SOCI - UD"; "dashes normalized")]
    fn cleaning(raw: &str, expected: &str) {
        assert_eq!(clean_title(raw), expected);
    }

    #[test]
    fn cleaning_strips_control_characters() {
        assert_eq!(clean_title("PHYS 2A\u{1}\u{7f}"), "PHYS 2A");
    }

    #[test]
    fn cleaning_strips_placement_exam_markers() {
        assert_eq!(clean_title("WCWP 10A / AWPE"), "WCWP 10A");
    }

    #[test]
    fn simple_course() {
        assert_eq!(
            parse_title("MATH 20C", 4.0),
            [ParsedCourse {
                code: Some(code("MATH 20C")),
                units: 4.0
            }]
        );
    }

    #[test]
    fn lab_listing_splits_units() {
        assert_eq!(
            parse_title("PHYS 2B / 2BL", 4.0),
            [
                ParsedCourse {
                    code: Some(code("PHYS 2B")),
                    units: 2.0
                },
                ParsedCourse {
                    code: Some(code("PHYS 2BL")),
                    units: 2.0
                },
            ]
        );
    }

    #[test]
    fn analysis_listing_splits_units() {
        assert_eq!(
            parse_title("LTSP 2A / 2AX", 5.0),
            [
                ParsedCourse {
                    code: Some(code("LTSP 2A")),
                    units: 2.5
                },
                ParsedCourse {
                    code: Some(code("LTSP 2AX")),
                    units: 2.5
                },
            ]
        );
    }

    #[test]
    fn lab_suffix_already_present_does_not_split() {
        // "PHYS 2BL / 2CL" must not produce PHYS 2BL and PHYS 2BLL.
        assert_eq!(
            parse_title("PHYS 2BL / 2CL", 4.0),
            [ParsedCourse {
                code: Some(code("PHYS 2BL")),
                units: 4.0
            }]
        );
    }

    #[test_case("NOT TAKEN"; "not taken marker")]
    #[test_case("ADV CHEM PLACEMENT"; "advanced placement marker")]
    #[test_case("IE 1"; "non subject token")]
    #[test_case("TDHT 1XX"; "double letter placeholder")]
    #[test_case("TECHNICAL ELECTIVE"; "no course code at all")]
    fn unparseable(title: &str) {
        assert_eq!(parse_title(title, 4.0), [ParsedCourse::unattributed(4.0)]);
    }

    #[test]
    fn disclaimer_prefix_is_stripped() {
        assert_eq!(
            parse_title("DF-1 - MATH 10A", 4.0),
            [ParsedCourse {
                code: Some(code("MATH 10A")),
                units: 4.0
            }]
        );
    }

    #[test]
    fn leading_zeros_are_stripped() {
        assert_eq!(
            parse_title("MATH 020C", 4.0),
            [ParsedCourse {
                code: Some(code("MATH 20C")),
                units: 4.0
            }]
        );
    }

    #[test]
    fn first_code_wins_in_multi_course_titles() {
        assert_eq!(
            parse_title("BENG 1 / MAE 3", 4.0),
            [ParsedCourse {
                code: Some(code("BENG 1")),
                units: 4.0
            }]
        );
    }

    #[test]
    fn unparseable_keeps_units() {
        let parsed = parse_title("NOT TAKEN", 4.0);
        assert_eq!(parsed[0].units, 4.0);
        assert!(parsed[0].code.is_none());
    }
}
