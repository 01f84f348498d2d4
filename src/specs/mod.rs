// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific reading. Each spec knows *where the ground truth lives* on
//! one portal page and turns it into model values through the
//! [`PageAccessor`](crate::page::PageAccessor) contract.
//!
//! ## What lives here
//! - Locators (tags, classes) for each page, as private constants.
//! - Tolerant reading: absent elements are `None`/empty, never panics.
//! - Light shaping into `model` types.
//!
//! ## What does **not** live here
//! - Navigation order, login, skip policy, progress: `scrape::*`.
//! - Persistence: `store`.
//! - Reconciliation: `analyze`.
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::extract_* → session.goto(..) → specs::<page>::read_*()
//!                           ↘ store::save_*
//! ```
//!
//! Specs are tested offline against captured markup (`StaticFetcher`).
pub mod curriculum;
pub mod grades;
