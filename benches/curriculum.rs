// benches/curriculum.rs
use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ladok_scrape::core::dom;
use ladok_scrape::core::net::StaticFetcher;
use ladok_scrape::page::{Locator, Session};
use ladok_scrape::session::HtmlSession;
use ladok_scrape::specs::curriculum;

const PLAN: &str = "https://lth.test/lot/programme?ay=22_23&programme=D";

/// A plan about the size of a real one: five years, a dozen tracks.
fn synthetic_plan() -> String {
    let mut html = String::from("<html><head><script>var x = '<h2>';</script></head><body>");
    for block in 0..17 {
        html.push_str(&format!("<h2>Block {block}</h2><table><tbody>"));
        for course in 0..14 {
            let level = ["G1", "G2", "A"][course % 3];
            html.push_str(&format!(
                "<tr><td class=\"app-course-code-col\"><a href=\"/k\">EDA{block:02}{course:02}</a></td>\
                 <td>Kurs &amp; labb</td><td>7,5</td><td><span class=\"badge\">{level}</span></td><td><span>O</span></td></tr>"
            ));
        }
        html.push_str("</tbody></table>");
    }
    html.push_str("</body></html>");
    html
}

fn bench_curriculum(c: &mut Criterion) {
    let doc = synthetic_plan();

    c.bench_function("plan_parse", |b| {
        b.iter(|| {
            let root = dom::parse(black_box(&doc));
            black_box(root.find_all(&Locator::tag("tbody")).len())
        })
    });

    let mut session = HtmlSession::new(StaticFetcher::new().with_page(PLAN, doc.as_str()));
    if session.goto(PLAN).is_err() {
        return;
    }
    c.bench_function("plan_blocks_and_tables", |b| {
        b.iter(|| {
            let blocks = curriculum::blocks(&session, Duration::ZERO).unwrap_or_default();
            let courses: usize = blocks
                .iter()
                .filter_map(|(label, table)| curriculum::read_table(label, table).ok())
                .map(|entries| entries.len())
                .sum();
            black_box(courses)
        })
    });
}

criterion_group!(benches, bench_curriculum);
criterion_main!(benches);
