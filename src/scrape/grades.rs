// src/scrape/grades.rs
use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::AppOptions;
use crate::error::{Error, Result};
use crate::model::{ProgrammeGradeSet, ProgrammeGrades, ProgrammeLinks};
use crate::page::{Locator, Session};
use crate::progress::Progress;
use crate::specs::grades::{self as spec, CourseSkip};

const LOGIN_FORM_TAG: &str = "form";
const LOGIN_USERNAME_ID: &str = "username";
const LOGIN_PASSWORD_ID: &str = "password";

/// Portal login. Held only for the duration of a run.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    pub fn password(&self) -> &str { &self.password }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Log in through the identity provider form the portal redirects to,
/// then return to the course overview.
///
/// Expects the login form itself on the first page: the first `<form>`
/// with `username`/`password` inputs is filled and posted. An institution
/// picker in front of it (search box, provider list) is not driven here.
pub fn login(session: &mut dyn Session, credentials: &Credentials, options: &AppOptions) -> Result<()> {
    session.goto(&options.portals.courses_url)?;

    let form = session
        .find_one(&Locator::tag(LOGIN_FORM_TAG), options.timeout)
        .ok_or_else(|| Error::Login(s!("no login form on the portal start page")))?;
    let action = form
        .attr("action")
        .map(str::to_owned)
        .or_else(|| session.current_url().map(str::to_owned))
        .ok_or_else(|| Error::Login(s!("login form has no target")))?;

    let mut fields = Vec::new();
    let mut filled = 0usize;
    for input in form.find_all(&Locator::tag("input")) {
        let Some(name) = input.attr("name") else { continue };
        let value = match input.attr("id") {
            Some(LOGIN_USERNAME_ID) => {
                filled += 1;
                credentials.username.clone()
            }
            Some(LOGIN_PASSWORD_ID) => {
                filled += 1;
                s!(credentials.password())
            }
            _ => s!(input.attr("value").unwrap_or_default()),
        };
        fields.push((s!(name), value));
    }
    if filled < 2 {
        return Err(Error::Login(s!("login form lacks username/password fields")));
    }

    debug!("submitting login form to {action}");
    session.submit_form(&action, &fields)?;

    // Still looking at a password field means the provider sent us back.
    if session.find_one(&Locator::id(LOGIN_PASSWORD_ID), Duration::ZERO).is_some() {
        return Err(Error::Login(s!("credentials were not accepted")));
    }

    session.goto(&options.portals.courses_url)?;
    info!("logged in as {}", credentials.username);
    Ok(())
}

/// Programme → course links from the overview page.
pub fn collect_programme_links(session: &mut dyn Session, options: &AppOptions) -> Result<ProgrammeLinks> {
    if session.current_url() != Some(options.portals.courses_url.as_str()) {
        session.goto(&options.portals.courses_url)?;
    }
    let links = spec::programme_course_links(&*session, options.timeout);
    info!(
        "found {} programmes, {} course links",
        links.len(),
        links.values().map(Vec::len).sum::<usize>()
    );
    Ok(links)
}

/// Visit every course page and record its status and grade.
///
/// A course that cannot be loaded or read is left out; the loop always
/// carries on with its siblings. Pages without a title are skipped
/// quietly, completed courses without a readable grade are skipped with a
/// message naming the course.
pub fn extract_grades(
    session: &mut dyn Session,
    programmes: &ProgrammeLinks,
    options: &AppOptions,
    progress: &mut dyn Progress,
) -> ProgrammeGradeSet {
    let mut all = ProgrammeGradeSet::new();
    progress.log(&format!("Collecting grades from {} programmes...", programmes.len()));

    for (programme, links) in programmes {
        progress.begin(programme, links.len());
        let mut results = ProgrammeGrades::new();

        for link in links {
            if let Err(e) = session.goto(link) {
                warn!("{programme}: could not open {link}: {e}");
                progress.item_skipped(link, &e.to_string());
                continue;
            }
            match spec::read_course_page(&*session, &options.badges, options.timeout) {
                Ok(record) => {
                    progress.item_done(&record.name);
                    results.insert(record.code.clone(), record);
                }
                Err(CourseSkip::NoTitle) => {
                    debug!("{programme}: no course title at {link}, skipped");
                }
                Err(skip) => {
                    warn!("{programme}: {skip}");
                    progress.item_skipped(link, &skip.to_string());
                }
            }
        }

        progress.log(&format!("{programme}: {} courses", results.len()));
        progress.finish();
        all.insert(programme.clone(), results);
    }
    all
}

/// Login, overview, every course page.
pub fn retrieve_grades(
    session: &mut dyn Session,
    credentials: &Credentials,
    options: &AppOptions,
    progress: &mut dyn Progress,
) -> Result<ProgrammeGradeSet> {
    login(session, credentials, options)?;
    let links = collect_programme_links(session, options)?;
    Ok(extract_grades(session, &links, options, progress))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_password() {
        let c = Credentials::new("abc123", "hunter2");
        let dbg = format!("{c:?}");
        assert!(dbg.contains("abc123"));
        assert!(!dbg.contains("hunter2"));
    }
}
