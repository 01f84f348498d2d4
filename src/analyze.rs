// src/analyze.rs
//! Reconciliation of portal grades against a programme plan.
//!
//! Everything here is pure: same inputs, same answer, nothing cached.
//!
//! A programme's degree requirements (for the record; none of this is summed here):
//! ```text
//! 300 hp in total
//! 180 hp from the first three study years
//!  75 hp at advanced level, thesis included
//!  45 hp from one specialization, 30 of them at level A
//!  45 hp from within the programme
//!  15 hp from anywhere
//! ```
//! Only the compulsory-course question is answered, plus a per-track view
//! when a specialization is chosen.

use std::fmt;

use tracing::{debug, warn};

use crate::config::Requirements;
use crate::error::{Error, Result};
use crate::model::{CourseRecord, CourseStatus, Curriculum, CurriculumEntry, ProgrammeGradeSet, ProgrammeGrades};

/// Flatten programme → code → record into one lookup.
/// A code that appears under several programmes keeps the later record.
pub fn merge_programme_grades(grades: &ProgrammeGradeSet) -> ProgrammeGrades {
    let mut merged = ProgrammeGrades::new();
    for courses in grades.values() {
        for (code, record) in courses {
            merged.insert(code.clone(), record.clone());
        }
    }
    merged
}

/// Courses of the compulsory blocks, block by block in `requirements` order.
pub fn compulsory_entries(curriculum: &Curriculum, requirements: &Requirements) -> Vec<CurriculumEntry> {
    let mut out = Vec::new();
    for label in &requirements.compulsory_blocks {
        match curriculum.get(label) {
            Some(entries) => out.extend(entries.iter().cloned()),
            None => warn!("programme plan has no block {label:?}"),
        }
    }
    out
}

/// Completed with a passing grade, or credited.
pub fn is_satisfied(record: &CourseRecord) -> bool {
    match record.status {
        CourseStatus::Credited => true,
        CourseStatus::Completed => record.grade.as_ref().is_some_and(|g| g.is_passing()),
        _ => false,
    }
}

fn outstanding<'a>(
    entries: impl IntoIterator<Item = &'a CurriculumEntry>,
    taken: &ProgrammeGrades,
) -> Vec<CurriculumEntry> {
    entries
        .into_iter()
        .filter(|entry| !taken.get(&entry.code).is_some_and(is_satisfied))
        .cloned()
        .collect()
}

/// Compulsory courses not yet satisfied, in plan order.
pub fn missing_compulsories(
    curriculum: &Curriculum,
    grades: &ProgrammeGradeSet,
    requirements: &Requirements,
) -> Vec<CurriculumEntry> {
    let taken = merge_programme_grades(grades);
    let required = compulsory_entries(curriculum, requirements);
    debug!("{} compulsory courses, {} course records", required.len(), taken.len());
    outstanding(&required, &taken)
}

/// Labels of the blocks that are specialization tracks, in plan order.
pub fn specialization_tracks<'a>(curriculum: &'a Curriculum, requirements: &Requirements) -> Vec<&'a str> {
    curriculum
        .keys()
        .filter(|label| label.contains(requirements.specialization_marker.as_str()))
        .map(String::as_str)
        .collect()
}

/// How far one specialization track has come.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackProgress {
    pub label: String,
    pub completed: Vec<CurriculumEntry>,
    pub outstanding: Vec<CurriculumEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    pub compulsories_left: Vec<CurriculumEntry>,
    /// Only when a track was chosen.
    pub track: Option<TrackProgress>,
}

/// Compulsory courses left and, if `specialization` names a track, that
/// track's completed and outstanding courses.
pub fn analyze(
    curriculum: &Curriculum,
    grades: &ProgrammeGradeSet,
    specialization: Option<&str>,
    requirements: &Requirements,
) -> Result<Analysis> {
    let compulsories_left = missing_compulsories(curriculum, grades, requirements);

    let track = match specialization {
        None => None,
        Some(label) => {
            let entries = curriculum
                .get(label)
                .filter(|_| label.contains(requirements.specialization_marker.as_str()))
                .ok_or_else(|| Error::UnknownTrack(s!(label)))?;
            let taken = merge_programme_grades(grades);
            let (completed, outstanding): (Vec<_>, Vec<_>) = entries
                .iter()
                .cloned()
                .partition(|entry| taken.get(&entry.code).is_some_and(is_satisfied));
            Some(TrackProgress { label: s!(label), completed, outstanding })
        }
    };

    Ok(Analysis { compulsories_left, track })
}

fn write_entries(f: &mut fmt::Formatter<'_>, entries: &[CurriculumEntry]) -> fmt::Result {
    for e in entries {
        writeln!(f, "  {} ({})", e.code, e.level)?;
    }
    Ok(())
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.compulsories_left.is_empty() {
            writeln!(f, "All compulsory courses are completed.")?;
        } else {
            writeln!(f, "Compulsory courses left ({}):", self.compulsories_left.len())?;
            write_entries(f, &self.compulsories_left)?;
        }

        if let Some(track) = &self.track {
            writeln!(
                f,
                "{}: {} of {} courses completed",
                track.label,
                track.completed.len(),
                track.completed.len() + track.outstanding.len()
            )?;
            if !track.outstanding.is_empty() {
                writeln!(f, "Not yet completed:")?;
                write_entries(f, &track.outstanding)?;
            }
        }
        Ok(())
    }
}
