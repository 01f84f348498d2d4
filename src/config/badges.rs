// src/config/badges.rs
//! Badge → status classification table.
//!
//! A course page shows at most one badge. The extractor probes the markers
//! in table order and the first present one decides the status; a page
//! with none of them is `Credited`. The table is plain data so a portal
//! restyle only needs a new JSON file:
//!
//! ```json
//! [ { "marker": "badge-success", "status": "completed" },
//!   { "marker": "badge-danger",  "status": "other" } ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::consts::{BADGE_COMPLETED, BADGE_ONGOING, BADGE_OTHER, BADGE_REGISTERED};
use crate::error::Result;
use crate::model::CourseStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeStatus {
    Completed,
    Registered,
    Ongoing,
    /// Keep whatever the badge says.
    Other,
}

impl BadgeStatus {
    pub fn to_status(self, badge_text: &str) -> CourseStatus {
        match self {
            BadgeStatus::Completed => CourseStatus::Completed,
            BadgeStatus::Registered => CourseStatus::Registered,
            BadgeStatus::Ongoing => CourseStatus::Ongoing,
            BadgeStatus::Other => CourseStatus::OtherBadgeState(s!(badge_text)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeRule {
    /// Class name of the badge element.
    pub marker: String,
    pub status: BadgeStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeTable {
    rules: Vec<BadgeRule>,
}

impl Default for BadgeTable {
    fn default() -> Self {
        let rule = |marker: &str, status| BadgeRule { marker: s!(marker), status };
        Self {
            rules: vec![
                rule(BADGE_REGISTERED, BadgeStatus::Registered),
                rule(BADGE_COMPLETED, BadgeStatus::Completed),
                rule(BADGE_ONGOING, BadgeStatus::Ongoing),
                rule(BADGE_OTHER, BadgeStatus::Other),
            ],
        }
    }
}

impl BadgeTable {
    pub fn new(rules: Vec<BadgeRule>) -> Self { Self { rules } }

    pub fn rules(&self) -> &[BadgeRule] { &self.rules }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
