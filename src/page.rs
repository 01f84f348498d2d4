// src/page.rs
//! Page accessor contract consumed by the extractors.
//!
//! A lookup either yields elements or it does not; absence is an ordinary
//! outcome (`None`) and callers decide what it means for the record at hand.
//! Implementations may block for up to `timeout` waiting for the condition
//! (one element visible / at least one element present) to hold, and must
//! never retry beyond that window.

use std::time::Duration;

pub use crate::core::dom::{Element, Locator};
use crate::error::Result;

pub trait PageAccessor {
    /// First element matching `locator`, or `None` once `timeout` has passed.
    fn find_one(&self, locator: &Locator, timeout: Duration) -> Option<Element>;

    /// Every element matching `locator` in document order.
    /// `None` when nothing matches within `timeout`; never `Some(vec![])`.
    fn find_many(&self, locator: &Locator, timeout: Duration) -> Option<Vec<Element>>;
}

/// A navigable browsing session. Exactly one extractor drives it at a time.
pub trait Session: PageAccessor {
    /// Load `url` (absolute, or relative to the current page).
    fn goto(&mut self, url: &str) -> Result<()>;

    fn current_url(&self) -> Option<&str>;

    /// Post form `fields` to `action` (resolved like `goto`) and load the response.
    fn submit_form(&mut self, action: &str, fields: &[(String, String)]) -> Result<()>;
}
