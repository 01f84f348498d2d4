// src/specs/grades.rs
//! Scraping *spec* for the student portal (Ladok).
//!
//! Purpose:
//! - Read the course overview (`min-utbildning/alla`) into programme → course page links.
//! - Read one course page into a `CourseRecord`: title, badge status, final grade.
//!
//! Page shape (as rendered):
//! ```text
//! <ladok-paketering>                      one per programme
//!   <h2>Programme name</h2>
//!   <div class="ladok-accordian">         one per term / group
//!     <div class="ladok-list-kort">       one per course
//!       <a class="card-link" href="…">
//!
//! course page:
//!   <h1>Course title EDAF75</h1>
//!   <span class="badge badge-success">Completed</span>
//!   <div class="ladok-list-kort-header-rubrik">Final grade: Pass with credit (4)</div>
//! ```
//!
//! Non-Responsibilities: navigation, skip policy, persistence.

use std::fmt;
use std::time::Duration;

use crate::config::BadgeTable;
use crate::model::{CourseRecord, CourseStatus, Grade, ProgrammeLinks};
use crate::page::{Locator, PageAccessor};

const PROGRAMME_CONTAINER_TAG: &str = "ladok-paketering";
const PROGRAMME_HEADING_TAG: &str = "h2";
const COURSE_LIST_CLASS: &str = "ladok-accordian";
const COURSE_CARD_CLASS: &str = "ladok-list-kort";
const COURSE_LINK_CLASS: &str = "card-link";
const COURSE_TITLE_TAG: &str = "h1";
const GRADE_HEADER_CLASS: &str = "ladok-list-kort-header-rubrik";

/// Tokens that look like codes in a title but never are.
const NOT_A_CODE: &[&str] = &["-", "EXCHANGED"];

/// Why a course page did not produce a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CourseSkip {
    /// No title within the wait window.
    NoTitle,
    /// Completed, but the grade header is absent.
    MissingGrade { name: String },
    /// Completed, but the grade header does not end in `(<grade>)`.
    MalformedGrade { name: String, header: String },
}

impl fmt::Display for CourseSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseSkip::NoTitle => write!(f, "course page has no title"),
            CourseSkip::MissingGrade { name } => {
                write!(f, "missing grade for {name}, please add it to grades.json by hand")
            }
            CourseSkip::MalformedGrade { name, header } => {
                write!(f, "unreadable grade for {name} ({header:?}), please add it to grades.json by hand")
            }
        }
    }
}

/// Programme name → course links, from the overview page.
/// Containers without a heading and cards without a link are left out.
pub fn programme_course_links<P>(page: &P, timeout: Duration) -> ProgrammeLinks
where
    P: PageAccessor + ?Sized,
{
    let mut out = ProgrammeLinks::new();
    let containers = page
        .find_many(&Locator::tag(PROGRAMME_CONTAINER_TAG), timeout)
        .unwrap_or_default();

    for container in &containers {
        let Some(name) = container
            .find(&Locator::tag(PROGRAMME_HEADING_TAG))
            .map(|h| h.text())
            .filter(|t| !t.is_empty())
        else {
            tracing::warn!("programme container without a heading, skipped");
            continue;
        };

        let links = out.entry(name).or_default();
        for list in container.find_all(&Locator::class(COURSE_LIST_CLASS)) {
            for card in list.find_all(&Locator::class(COURSE_CARD_CLASS)) {
                if let Some(href) = card
                    .find(&Locator::class(COURSE_LINK_CLASS))
                    .and_then(|a| a.attr("href"))
                    .filter(|h| !h.trim().is_empty())
                {
                    links.push(s!(href.trim()));
                }
            }
        }
    }
    out
}

/// Read the course page currently loaded.
pub fn read_course_page<P>(page: &P, badges: &BadgeTable, timeout: Duration) -> Result<CourseRecord, CourseSkip>
where
    P: PageAccessor + ?Sized,
{
    let name = page
        .find_one(&Locator::tag(COURSE_TITLE_TAG), timeout)
        .map(|h| h.text())
        .filter(|t| !t.is_empty())
        .ok_or(CourseSkip::NoTitle)?;

    let status = course_status(page, badges);
    let grade = match status {
        CourseStatus::Completed => {
            let header = page
                .find_one(&Locator::class(GRADE_HEADER_CLASS), Duration::ZERO)
                .map(|e| e.text())
                .ok_or_else(|| CourseSkip::MissingGrade { name: name.clone() })?;
            parse_grade_token(&header).ok_or(CourseSkip::MalformedGrade { name: name.clone(), header })?
        }
        CourseStatus::Credited => Grade::Credited,
        _ => Grade::Fail,
    };

    Ok(CourseRecord {
        code: course_code(&name),
        name,
        status,
        grade: Some(grade),
    })
}

/// First badge from `badges` present on the page; `Credited` when there is none.
/// Badges are probed without waiting: the title lookup already waited for the page.
pub fn course_status<P>(page: &P, badges: &BadgeTable) -> CourseStatus
where
    P: PageAccessor + ?Sized,
{
    badges
        .rules()
        .iter()
        .find_map(|rule| {
            page.find_one(&Locator::class(&rule.marker), Duration::ZERO)
                .map(|badge| rule.status.to_status(&badge.text()))
        })
        .unwrap_or(CourseStatus::Credited)
}

/// Grade from a header such as `Final grade: Pass with credit (4)`:
/// the second-to-last character, provided the text ends in `(<grade>)`.
pub fn parse_grade_token(header: &str) -> Option<Grade> {
    let chars: Vec<char> = header.trim().chars().collect();
    let n = chars.len();
    if n < 3 || chars[n - 1] != ')' || chars[n - 3] != '(' {
        return None;
    }
    let token = chars[n - 2];
    if token.is_whitespace() {
        return None;
    }
    Some(Grade::parse(&token.to_string()))
}

/// Course code from a course title: the first whitespace-separated token
/// that is all uppercase, longer than 3 characters and not a placeholder.
/// Falls back to the whole title.
pub fn course_code(title: &str) -> String {
    title
        .split_whitespace()
        .find(|word| {
            *word == word.to_uppercase() && word.chars().count() > 3 && !NOT_A_CODE.contains(word)
        })
        .map(|word| s!(word))
        .unwrap_or_else(|| s!(title))
}
