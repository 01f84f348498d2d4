// src/scrape/curriculum.rs
use tracing::{info, warn};

use crate::config::{AppOptions, PortalOptions};
use crate::core::net::parse_url;
use crate::error::Result;
use crate::model::{Curriculum, normalize_programme_code};
use crate::page::Session;
use crate::progress::Progress;
use crate::specs::curriculum as spec;

/// `<plan_url>?ay=<year>&programme=<code>`
pub fn plan_url(portals: &PortalOptions, programme: &str) -> Result<String> {
    let mut url = parse_url(&portals.plan_url)?;
    url.query_pairs_mut()
        .append_pair("ay", &portals.academic_year)
        .append_pair("programme", &normalize_programme_code(programme));
    Ok(url.to_string())
}

/// Read a programme plan into block label → courses.
///
/// `Ok(None)`: the portal has no such programme.
/// `Ok(Some(empty))`: the programme exists but its plan lists no course tables.
///
/// Headings and tables that differ in count fail the whole plan. A single
/// table that cannot be read is skipped and reported through `progress`.
pub fn extract_curriculum(
    session: &mut dyn Session,
    programme: &str,
    options: &AppOptions,
    progress: &mut dyn Progress,
) -> Result<Option<Curriculum>> {
    let code = normalize_programme_code(programme);
    session.goto(&plan_url(&options.portals, &code)?)?;

    if !spec::plan_exists(&*session) {
        info!("programme {code} has no plan for {}", options.portals.academic_year);
        return Ok(None);
    }

    let blocks = spec::blocks(&*session, options.timeout)?;
    progress.log(&format!("Collecting courses from {} study years...", blocks.len()));
    progress.begin("Study years", blocks.len());

    let mut curriculum = Curriculum::new();
    for (label, table) in &blocks {
        // A table whose codes and levels disagree is dropped on its own.
        let entries = match spec::read_table(label, table) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("{code}: {e}, block left out");
                progress.item_skipped(label, &e.to_string());
                continue;
            }
        };
        progress.item_done(label);
        if curriculum.insert(label.clone(), entries).is_some() {
            warn!("{code}: block {label:?} listed twice, keeping the later table");
        }
    }
    progress.finish();

    info!("{code}: {} blocks, {} courses", curriculum.len(), curriculum.values().map(Vec::len).sum::<usize>());
    Ok(Some(curriculum))
}
