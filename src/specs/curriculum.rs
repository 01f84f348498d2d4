// src/specs/curriculum.rs
//! Scraping *spec* for programme plans (kurser.lth.se).
//!
//! Page shape:
//! ```text
//! <h2>Årskurs 1 - Obligatoriska kurser</h2>      block label
//! <table><tbody>                                  that block's courses
//!   <tr><td class="app-course-code-col"><a>EDAA01</a></td> … <span>G1</span> …
//! ```
//! Labels and tables carry no link to each other; the page lists them in
//! the same order, so they are paired by position. Codes and levels within
//! a table are paired the same way. Both pairings are checked for equal
//! length first and a mismatch is reported rather than guessed around.
//!
//! A programme the portal does not know renders a single
//! `<div class="p-3 text-center">Inget att visa</div>`.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::model::{CurriculumEntry, Level};
use crate::page::{Element, Locator, PageAccessor};

const NOTHING_TO_SHOW_CLASS: &str = "p-3 text-center";
const NOTHING_TO_SHOW_TEXT: &str = "Inget att visa";
const BLOCK_HEADING_TAG: &str = "h2";
const COURSE_TABLE_TAG: &str = "tbody";
const COURSE_CODE_CELL_CLASS: &str = "app-course-code-col";
const LEVEL_TAG: &str = "span";

/// False when the portal says it has nothing to show for this programme.
pub fn plan_exists<P>(page: &P) -> bool
where
    P: PageAccessor + ?Sized,
{
    match page.find_one(&Locator::class(NOTHING_TO_SHOW_CLASS), Duration::ZERO) {
        Some(el) => {
            let text = el.text();
            !(text.is_empty() || text == NOTHING_TO_SHOW_TEXT)
        }
        None => true,
    }
}

/// Block labels paired with their tables. Zero tables yields an empty list.
pub fn blocks<P>(page: &P, timeout: Duration) -> Result<Vec<(String, Element)>>
where
    P: PageAccessor + ?Sized,
{
    let tables = page
        .find_many(&Locator::tag(COURSE_TABLE_TAG), timeout)
        .unwrap_or_default();
    if tables.is_empty() {
        return Ok(Vec::new());
    }
    let labels: Vec<String> = page
        .find_many(&Locator::tag(BLOCK_HEADING_TAG), Duration::ZERO)
        .unwrap_or_default()
        .iter()
        .map(Element::text)
        .collect();

    if labels.len() != tables.len() {
        return Err(Error::Misaligned {
            what: "block labels / course tables",
            context: s!("programme plan"),
            left: labels.len(),
            right: tables.len(),
        });
    }
    Ok(labels.into_iter().zip(tables).collect())
}

/// Courses of one table: codes from the code column, levels from the
/// level badges (`A`, `G1`, `G2`; other span texts are ignored).
pub fn read_table(label: &str, table: &Element) -> Result<Vec<CurriculumEntry>> {
    let codes: Vec<String> = table
        .find_all(&Locator::class(COURSE_CODE_CELL_CLASS))
        .into_iter()
        .filter_map(|cell| cell.find(&Locator::tag("a")).map(Element::text))
        .collect();
    let levels: Vec<Level> = table
        .find_all(&Locator::tag(LEVEL_TAG))
        .into_iter()
        .filter_map(|span| Level::parse(&span.text()))
        .collect();

    if codes.len() != levels.len() {
        return Err(Error::Misaligned {
            what: "course codes / levels",
            context: s!(label),
            left: codes.len(),
            right: levels.len(),
        });
    }
    Ok(codes
        .into_iter()
        .zip(levels)
        .map(|(code, level)| CurriculumEntry::new(code, level))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom;

    fn row(code: &str, level: &str) -> String {
        format!(
            r#"<tr><td class="app-course-code-col"><a href="/k/{code}">{code}</a></td><td>Kursnamn</td><td>7,5</td><td><span class="badge">{level}</span></td><td><span>O</span></td></tr>"#
        )
    }

    #[test]
    fn table_pairs_codes_with_levels() {
        let html = format!("<table><tbody>{}{}</tbody></table>", row("EDAA01", "G1"), row("EDAN20", "A"));
        let doc = dom::parse(&html);
        let table = doc.find(&Locator::tag("tbody")).unwrap();
        let entries = read_table("Årskurs 1", table).unwrap();
        assert_eq!(
            entries,
            vec![CurriculumEntry::new("EDAA01", Level::G1), CurriculumEntry::new("EDAN20", Level::A)]
        );
    }

    #[test]
    fn missing_level_is_reported_not_shifted() {
        let html = format!(
            "<table><tbody>{}<tr><td class=\"app-course-code-col\"><a>FMAA05</a></td></tr></tbody></table>",
            row("EDAA01", "G1")
        );
        let doc = dom::parse(&html);
        let err = read_table("Årskurs 2", doc.find(&Locator::tag("tbody")).unwrap()).unwrap_err();
        match err {
            Error::Misaligned { context, left, right, .. } => {
                assert_eq!(context, "Årskurs 2");
                assert_eq!((left, right), (2, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
