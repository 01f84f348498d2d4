// src/model.rs
//! Records produced by the extractors and read by the analysis.
//!
//! JSON shapes (kept compatible with files written by earlier tooling):
//! ```text
//! grades.json            { programme: { code: { "name", "status", "grade" } } }
//! <code>-programme.json  { block label: [ { "name": code, "level" } ] }
//! ```
//! Maps are `IndexMap`s so traversal order survives a save/load cycle.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Completion status, derived from the badge shown on a course page.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CourseStatus {
    Completed,
    Registered,
    Ongoing,
    /// Any other badge; carries the badge text as shown.
    OtherBadgeState(String),
    /// Transferred or recognized. Also what a page without any badge means.
    Credited,
}

impl CourseStatus {
    /// Statuses that can satisfy a requirement (given an acceptable grade).
    pub fn is_final(&self) -> bool {
        matches!(self, CourseStatus::Completed | CourseStatus::Credited)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CourseStatus::Completed => "Completed",
            CourseStatus::Registered => "Registered",
            CourseStatus::Ongoing => "Ongoing",
            CourseStatus::OtherBadgeState(text) => text,
            CourseStatus::Credited => "Credited",
        }
    }
}

impl From<String> for CourseStatus {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "completed" => CourseStatus::Completed,
            "registered" => CourseStatus::Registered,
            "ongoing" => CourseStatus::Ongoing,
            "credited" => CourseStatus::Credited,
            _ => CourseStatus::OtherBadgeState(s),
        }
    }
}

impl From<CourseStatus> for String {
    fn from(s: CourseStatus) -> Self {
        s!(s.as_str())
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade alphabet `3, 4, 5, G, U` plus `Credited`. Tokens outside it are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Grade {
    Three,
    Four,
    Five,
    /// `G`, pass on a pass/fail course.
    Pass,
    /// `U`, fail. Also the placeholder for courses that are not finished.
    Fail,
    Credited,
    Other(String),
}

impl Grade {
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "3" => Grade::Three,
            "4" => Grade::Four,
            "5" => Grade::Five,
            "G" => Grade::Pass,
            "U" => Grade::Fail,
            t if t.eq_ignore_ascii_case("credited") => Grade::Credited,
            t => Grade::Other(s!(t)),
        }
    }

    /// `3`, `4`, `5`, `G` or `Credited`.
    pub fn is_passing(&self) -> bool {
        matches!(
            self,
            Grade::Three | Grade::Four | Grade::Five | Grade::Pass | Grade::Credited
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            Grade::Three => "3",
            Grade::Four => "4",
            Grade::Five => "5",
            Grade::Pass => "G",
            Grade::Fail => "U",
            Grade::Credited => "Credited",
            Grade::Other(t) => t,
        }
    }
}

impl From<String> for Grade {
    fn from(s: String) -> Self { Grade::parse(&s) }
}

impl From<Grade> for String {
    fn from(g: Grade) -> Self { s!(g.as_str()) }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One course as the student portal reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Map key in the JSON file; filled back in on load.
    #[serde(skip)]
    pub code: String,
    /// Course title as displayed.
    pub name: String,
    pub status: CourseStatus,
    /// `None` when unknown; never defaulted.
    #[serde(default)]
    pub grade: Option<Grade>,
}

/// Course level in a programme plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Advanced (second cycle)
    A,
    /// First cycle, basic
    G1,
    /// First cycle, intermediate
    G2,
}

impl Level {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "A" => Some(Level::A),
            "G1" => Some(Level::G1),
            "G2" => Some(Level::G2),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::A => "A",
            Level::G1 => "G1",
            Level::G2 => "G2",
        })
    }
}

/// One course in a programme plan block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumEntry {
    #[serde(rename = "name")]
    pub code: String,
    pub level: Level,
}

impl CurriculumEntry {
    pub fn new(code: impl Into<String>, level: Level) -> Self {
        Self { code: code.into(), level }
    }
}

/// Course code → record, for one programme.
pub type ProgrammeGrades = IndexMap<String, CourseRecord>;

/// Programme name → its course records, in portal order.
pub type ProgrammeGradeSet = IndexMap<String, ProgrammeGrades>;

/// Block label (study year or category) → courses in that block.
pub type Curriculum = IndexMap<String, Vec<CurriculumEntry>>;

/// Programme name → course page links, in portal order.
pub type ProgrammeLinks = IndexMap<String, Vec<String>>;

/// Programme codes are typed by hand (`d`, ` BME `); the portal and the
/// file names use the trimmed uppercase form.
pub fn normalize_programme_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_round_trips_through_strings() {
        assert_eq!(CourseStatus::from(s!("credited")), CourseStatus::Credited);
        assert_eq!(CourseStatus::from(s!("Completed")), CourseStatus::Completed);
        assert_eq!(
            CourseStatus::from(s!("Avbrott")),
            CourseStatus::OtherBadgeState(s!("Avbrott"))
        );
        assert_eq!(String::from(CourseStatus::OtherBadgeState(s!("Avbrott"))), "Avbrott");
    }

    #[test]
    fn grade_alphabet() {
        assert!(Grade::parse("4").is_passing());
        assert!(Grade::parse("G").is_passing());
        assert!(Grade::parse("credited").is_passing());
        assert!(!Grade::parse("U").is_passing());
        assert_eq!(Grade::parse("VG"), Grade::Other(s!("VG")));
        assert!(!Grade::parse("VG").is_passing());
    }

    #[test]
    fn record_json_uses_null_for_unknown_grade() {
        let rec = CourseRecord {
            code: s!("EDAF75"),
            name: s!("Database Technology EDAF75"),
            status: CourseStatus::Completed,
            grade: None,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"name":"Database Technology EDAF75","status":"Completed","grade":null}"#);
    }

    #[test]
    fn programme_codes_are_trimmed_and_uppercased() {
        assert_eq!(normalize_programme_code(" bme\n"), "BME");
    }

    #[test]
    fn curriculum_entry_keeps_name_field() {
        let e: CurriculumEntry = serde_json::from_str(r#"{"name":"FMAB20","level":"G1"}"#).unwrap();
        assert_eq!(e, CurriculumEntry::new("FMAB20", Level::G1));
    }
}
