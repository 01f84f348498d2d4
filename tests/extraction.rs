// tests/extraction.rs
// Offline runs of both extractors against captured portal pages.

mod common;

use ladok_scrape::config::AppOptions;
use ladok_scrape::core::net::StaticFetcher;
use ladok_scrape::model::{CourseStatus, CurriculumEntry, Grade, Level};
use ladok_scrape::page::Session;
use ladok_scrape::progress::RecordingProgress;
use ladok_scrape::scrape::{Credentials, extract_curriculum, retrieve_grades};
use ladok_scrape::session::HtmlSession;
use ladok_scrape::Error;

use common::*;

fn opts() -> AppOptions {
    options(std::path::Path::new("unused"))
}

#[test]
fn grades_are_collected_per_programme() {
    let mut session = HtmlSession::new(portal());
    let mut progress = RecordingProgress::default();
    let creds = Credentials::new("ab1234cd-s", "s3cret");

    let grades = retrieve_grades(&mut session, &creds, &opts(), &mut progress).unwrap();

    let names: Vec<&str> = grades.keys().map(String::as_str).collect();
    assert_eq!(names, ["Civilingenjörsutbildning i datateknik", "Fristående kurser"]);

    let d = &grades["Civilingenjörsutbildning i datateknik"];
    let codes: Vec<&str> = d.keys().map(String::as_str).collect();
    assert_eq!(codes, ["EDAF75", "EDAA01", "MMVA01"]);

    assert_eq!(d["EDAF75"].status, CourseStatus::Completed);
    assert_eq!(d["EDAF75"].grade, Some(Grade::Four));
    assert_eq!(d["EDAA01"].status, CourseStatus::Registered);
    assert_eq!(d["EDAA01"].grade, Some(Grade::Fail));
    assert_eq!(d["MMVA01"].status, CourseStatus::Credited);
    assert_eq!(d["MMVA01"].grade, Some(Grade::Credited));

    let other = &grades["Fristående kurser"];
    assert_eq!(other["EDAF75"].status, CourseStatus::Ongoing);

    // FAFA05 has no grade header, /kurs/gone does not load; neither stops the run.
    assert!(progress.events.iter().any(|e| e.starts_with("skipped") && e.contains("Fysik FAFA05")));
    assert!(progress.events.iter().any(|e| e.starts_with("skipped") && e.contains("/kurs/gone")));
    assert!(progress.events.contains(&"log Civilingenjörsutbildning i datateknik: 3 courses".to_string()));
}

#[test]
fn login_posts_credentials_and_hidden_fields() {
    let mut session = HtmlSession::new(portal());
    let creds = Credentials::new("ab1234cd-s", "s3cret");
    ladok_scrape::scrape::login(&mut session, &creds, &opts()).unwrap();

    let posts = session.fetcher().posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, IDP_URL);
    let fields = &posts[0].1;
    assert!(fields.contains(&("csrf".to_string(), "tok-1".to_string())));
    assert!(fields.contains(&("j_username".to_string(), "ab1234cd-s".to_string())));
    assert!(fields.contains(&("j_password".to_string(), "s3cret".to_string())));
    assert_eq!(session.current_url(), Some(COURSES_URL));
}

#[test]
fn rejected_login_is_an_error() {
    let fetcher = portal().with_page(
        IDP_URL,
        r#"<form action="/login"><input id="password" name="j_password" type="password"></form><p>Wrong password</p>"#,
    );
    let mut session = HtmlSession::new(fetcher);
    let err = ladok_scrape::scrape::login(&mut session, &Credentials::new("a", "b"), &opts()).unwrap_err();
    assert!(matches!(err, Error::Login(_)));
}

#[test]
fn institution_picker_is_not_a_login_form() {
    let picker = r#"<button class="btn-primary">Logga in</button>
        <form action="/discovery"><input id="searchinput" name="q"></form>
        <ul><li class="identityprovider">Lund University</li></ul>"#;
    let fetcher = StaticFetcher::new().with_page(COURSES_URL, picker);
    let mut session = HtmlSession::new(fetcher);

    let err = ladok_scrape::scrape::login(&mut session, &Credentials::new("a", "b"), &opts()).unwrap_err();
    assert!(matches!(err, Error::Login(_)));
    assert!(session.fetcher().posts().is_empty());
}

#[test]
fn curriculum_blocks_pair_with_tables() {
    let mut session = HtmlSession::new(plans());
    let mut progress = RecordingProgress::default();

    let plan = extract_curriculum(&mut session, " d ", &opts(), &mut progress).unwrap().unwrap();

    assert_eq!(plan.len(), 4);
    assert_eq!(
        plan["Årskurs 1 - Obligatoriska kurser"],
        vec![CurriculumEntry::new("EDAA01", Level::G1), CurriculumEntry::new("EDAF75", Level::G2)]
    );
    assert_eq!(plan.get_index(3).unwrap().0, "Specialisering - Programvara");
    assert_eq!(progress.events.iter().filter(|e| e.starts_with("done")).count(), 4);
}

#[test]
fn unknown_programme_differs_from_empty_plan() {
    let mut session = HtmlSession::new(plans());
    let mut progress = RecordingProgress::default();

    assert_eq!(extract_curriculum(&mut session, "X", &opts(), &mut progress).unwrap(), None);

    let empty = extract_curriculum(&mut session, "E", &opts(), &mut progress).unwrap();
    assert_eq!(empty.map(|c| c.len()), Some(0));
}

#[test]
fn heading_without_table_is_reported() {
    let page = r#"<h2>Årskurs 1 - Obligatoriska kurser</h2><h2>Valfria kurser</h2>
        <table><tbody><tr><td class="app-course-code-col"><a>EDAA01</a></td><td><span>G1</span></td></tr></tbody></table>"#;
    let fetcher = StaticFetcher::new().with_page(&plan_url("F"), page);
    let mut session = HtmlSession::new(fetcher);

    let err = extract_curriculum(&mut session, "F", &opts(), &mut RecordingProgress::default()).unwrap_err();
    match err {
        Error::Misaligned { left, right, .. } => assert_eq!((left, right), (2, 1)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unreadable_table_drops_only_its_block() {
    let page = format!(
        "{}<h2>Valfria kurser</h2><table><tbody>\
         <tr><td class=\"app-course-code-col\"><a>EDAN20</a></td><td><span>A</span></td></tr>\
         <tr><td class=\"app-course-code-col\"><a>ETSN05</a></td><td>saknar nivå</td></tr>\
         </tbody></table>",
        plan_page(&[("Årskurs 1 - Obligatoriska kurser", &[("EDAA01", "G1")])])
    );
    let fetcher = StaticFetcher::new().with_page(&plan_url("Q"), page);
    let mut session = HtmlSession::new(fetcher);
    let mut progress = RecordingProgress::default();

    let plan = extract_curriculum(&mut session, "Q", &opts(), &mut progress).unwrap().unwrap();

    assert_eq!(plan.len(), 1);
    assert_eq!(plan["Årskurs 1 - Obligatoriska kurser"], vec![CurriculumEntry::new("EDAA01", Level::G1)]);
    assert!(progress.events.iter().any(|e| e.starts_with("skipped Valfria kurser:") && e.contains("2 vs 1")));
}
