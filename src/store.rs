// src/store.rs
//! Persisted data files under the data directory.
//!
//! ```text
//! <data_dir>/grades.json
//! <data_dir>/<CODE>-programme.json
//! ```
//! Each save replaces the whole file. Loading a file that is not there is
//! `Error::MissingFile`, with a hint naming the menu step that produces it.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::consts::{GRADES_FILE, PROGRAMME_FILE_SUFFIX};
use crate::core::sanitize::sanitize_file_stem;
use crate::error::{Error, Result};
use crate::file::{read_json, write_json};
use crate::model::{Curriculum, ProgrammeGradeSet, normalize_programme_code};

const GRADES_HINT: &str = "run option 1 to retrieve your grades first";
const CURRICULUM_HINT: &str = "run option 2 to retrieve the programme plan first";

pub fn grades_path(data_dir: &Path) -> PathBuf {
    data_dir.join(GRADES_FILE)
}

/// `D` → `D-programme.json`
pub fn programme_file_name(programme: &str) -> String {
    let stem = sanitize_file_stem(&normalize_programme_code(programme));
    join!(&stem, PROGRAMME_FILE_SUFFIX)
}

pub fn curriculum_path(data_dir: &Path, programme: &str) -> PathBuf {
    data_dir.join(programme_file_name(programme))
}

fn load_or_hint<T: serde::de::DeserializeOwned>(path: PathBuf, hint: &'static str) -> Result<T> {
    match read_json(&path) {
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Err(Error::MissingFile { path, hint }),
        other => other,
    }
}

pub fn save_grades(data_dir: &Path, grades: &ProgrammeGradeSet) -> Result<PathBuf> {
    let path = grades_path(data_dir);
    write_json(&path, grades)?;
    info!("wrote {}", path.display());
    Ok(path)
}

/// Course codes are map keys in the file; they are copied back into the records.
pub fn load_grades(data_dir: &Path) -> Result<ProgrammeGradeSet> {
    let mut grades: ProgrammeGradeSet = load_or_hint(grades_path(data_dir), GRADES_HINT)?;
    for courses in grades.values_mut() {
        for (code, record) in courses.iter_mut() {
            record.code.clone_from(code);
        }
    }
    Ok(grades)
}

pub fn save_curriculum(data_dir: &Path, programme: &str, curriculum: &Curriculum) -> Result<PathBuf> {
    let path = curriculum_path(data_dir, programme);
    write_json(&path, curriculum)?;
    info!("wrote {}", path.display());
    Ok(path)
}

/// Falls back to the code as typed (`d-programme.json`), the name earlier
/// tooling used, when the uppercase file is not there.
pub fn load_curriculum(data_dir: &Path, programme: &str) -> Result<Curriculum> {
    match load_or_hint(curriculum_path(data_dir, programme), CURRICULUM_HINT) {
        Err(missing @ Error::MissingFile { .. }) => {
            let typed = programme.trim();
            if typed.is_empty() || sanitize_file_stem(typed) != typed {
                return Err(missing);
            }
            let legacy = data_dir.join(join!(typed, PROGRAMME_FILE_SUFFIX));
            match read_json(&legacy) {
                Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Err(missing),
                other => other,
            }
        }
        other => other,
    }
}
