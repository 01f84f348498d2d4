// src/scrape/mod.rs
mod curriculum;
mod grades;

pub use curriculum::{extract_curriculum, plan_url};
pub use grades::{Credentials, collect_programme_links, extract_grades, login, retrieve_grades};
