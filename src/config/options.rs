// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::badges::BadgeTable;
use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub portals: PortalOptions,
    /// Where `grades.json` and `<code>-programme.json` live.
    pub data_dir: PathBuf,
    /// Wait window for page lookups that expect an element to appear.
    pub timeout: Duration,
    pub badges: BadgeTable,
    pub requirements: Requirements,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            portals: PortalOptions::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            badges: BadgeTable::default(),
            requirements: Requirements::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalOptions {
    /// Student portal page listing every programme and its courses.
    pub courses_url: String,
    /// Programme plan page; queried with `ay` and `programme`.
    pub plan_url: String,
    /// Academic year as the plan portal writes it, e.g. `22_23`.
    pub academic_year: String,
}

impl Default for PortalOptions {
    fn default() -> Self {
        Self {
            courses_url: s!(LADOK_COURSES_URL),
            plan_url: s!(LTH_PLAN_URL),
            academic_year: s!(DEFAULT_ACADEMIC_YEAR),
        }
    }
}

/// What counts as a requirement when reconciling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requirements {
    /// Block labels whose courses are all compulsory, in report order.
    pub compulsory_blocks: Vec<String>,
    /// Token that marks a block label as a specialization track.
    pub specialization_marker: String,
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            compulsory_blocks: COMPULSORY_BLOCKS.iter().map(|s| s!(*s)).collect(),
            specialization_marker: s!(SPECIALIZATION_MARKER),
        }
    }
}
