// tests/common/mod.rs
#![allow(dead_code)]

use ladok_scrape::config::AppOptions;
use ladok_scrape::core::net::StaticFetcher;

pub const COURSES_URL: &str = "https://ladok.test/min-utbildning/alla";
pub const IDP_URL: &str = "https://idp.test/login";
pub const PLAN_URL: &str = "https://lth.test/lot/programme";

pub fn options(data_dir: &std::path::Path) -> AppOptions {
    let mut o = AppOptions::default();
    o.portals.courses_url = COURSES_URL.into();
    o.portals.plan_url = PLAN_URL.into();
    o.data_dir = data_dir.to_path_buf();
    o
}

/// Captured pages are served regardless of login state, so the overview
/// carries the identity provider form as well.
pub const OVERVIEW: &str = r#"
<html><body>
  <form action="https://idp.test/login" method="post">
    <input type="hidden" name="csrf" value="tok-1">
    <input id="username" name="j_username" type="text">
    <input id="password" name="j_password" type="password">
    <button type="submit">Log in</button>
  </form>
  <ladok-paketering>
    <h2>Civilingenjörsutbildning i datateknik</h2>
    <div class="ladok-accordian">
      <div class="ladok-list-kort"><a class="card-link" href="/kurs/edaf75">Databasteknik</a></div>
      <div class="ladok-list-kort"><a class="card-link" href="/kurs/fafa05">Fysik</a></div>
      <div class="ladok-list-kort"><a class="card-link" href="/kurs/gone">Borttagen</a></div>
    </div>
    <div class="ladok-accordian">
      <div class="ladok-list-kort"><a class="card-link" href="/kurs/edaa01">Programmering</a></div>
      <div class="ladok-list-kort"><a class="card-link" href="/kurs/mmva01">Termodynamik</a></div>
    </div>
  </ladok-paketering>
  <ladok-paketering>
    <h2>Fristående kurser</h2>
    <div class="ladok-accordian">
      <div class="ladok-list-kort"><a class="card-link" href="/kurs/edaf75-ht">Databasteknik igen</a></div>
    </div>
  </ladok-paketering>
</body></html>"#;

pub fn course_page(title: &str, badge: Option<(&str, &str)>, grade_header: Option<&str>) -> String {
    let badge = badge
        .map(|(class, text)| format!(r#"<span class="badge {class}">{text}</span>"#))
        .unwrap_or_default();
    let header = grade_header
        .map(|h| format!(r#"<div class="ladok-list-kort-header-rubrik">{h}</div>"#))
        .unwrap_or_default();
    format!("<main><h1>{title}</h1>{badge}<div class=\"card\">{header}</div></main>")
}

pub fn portal() -> StaticFetcher {
    StaticFetcher::new()
        .with_page(COURSES_URL, OVERVIEW)
        .with_page(IDP_URL, "<p>Signed in, redirecting</p>")
        .with_page(
            "https://ladok.test/kurs/edaf75",
            course_page(
                "Databasteknik EDAF75",
                Some(("badge-success", "Avklarad")),
                Some("Slutbetyg: Godkänd, 4 (4)"),
            ),
        )
        .with_page(
            "https://ladok.test/kurs/fafa05",
            course_page("Fysik FAFA05", Some(("badge-success", "Avklarad")), None),
        )
        .with_page(
            "https://ladok.test/kurs/edaa01",
            course_page("Programmering EDAA01", Some(("badge-light", "Registrerad")), None),
        )
        .with_page("https://ladok.test/kurs/mmva01", course_page("EXCHANGED - Termodynamik MMVA01", None, None))
        .with_page(
            "https://ladok.test/kurs/edaf75-ht",
            course_page("Databasteknik EDAF75", Some(("badge-primary", "Pågående")), None),
        )
}

fn row(code: &str, level: &str) -> String {
    format!(
        r#"<tr><td class="app-course-code-col"><a href="/kurs/{code}">{code}</a></td><td>Kurs {code}</td><td>7,5</td><td><span class="badge">{level}</span></td></tr>"#
    )
}

pub fn plan_page(blocks: &[(&str, &[(&str, &str)])]) -> String {
    let mut html = String::from("<html><body><h1>Läsordning</h1>");
    for (label, rows) in blocks {
        html.push_str(&format!("<h2>{label}</h2><table><thead><tr><th>Kod</th></tr></thead><tbody>"));
        for (code, level) in *rows {
            html.push_str(&row(code, level));
        }
        html.push_str("</tbody></table>");
    }
    html.push_str("</body></html>");
    html
}

pub fn plan_url(code: &str) -> String {
    format!("{PLAN_URL}?ay=22_23&programme={code}")
}

pub fn plans() -> StaticFetcher {
    with_plans(StaticFetcher::new())
}

pub fn with_plans(fetcher: StaticFetcher) -> StaticFetcher {
    fetcher
        .with_page(
            &plan_url("D"),
            plan_page(&[
                ("Årskurs 1 - Obligatoriska kurser", &[("EDAA01", "G1"), ("EDAF75", "G2")]),
                ("Årskurs 2 - Obligatoriska kurser", &[("FAFA05", "G1")]),
                ("Årskurs 3 - Obligatoriska kurser", &[("MMVA01", "G2")]),
                ("Specialisering - Programvara", &[("EDAN20", "A"), ("ETSN05", "A")]),
            ]),
        )
        .with_page(&plan_url("X"), r#"<div class="p-3 text-center">Inget att visa</div>"#)
        .with_page(&plan_url("E"), "<html><body><h1>Läsordning</h1><p>Planen publiceras senare</p></body></html>")
}
