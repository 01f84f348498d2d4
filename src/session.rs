// src/session.rs
use std::time::Duration;

use tracing::debug;

use crate::core::dom::{self, Element, Locator};
use crate::core::net::{Fetch, Fetched, resolve_url};
use crate::error::Result;
use crate::page::{PageAccessor, Session};

/// Session over fetched documents.
///
/// A document is complete once `goto` returns, so lookups are answered
/// straight away and the timeout never has to be spent; the bound that
/// matters here is the fetcher's request timeout.
pub struct HtmlSession<F: Fetch> {
    fetcher: F,
    url: Option<String>,
    doc: Element,
}

impl<F: Fetch> HtmlSession<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher, url: None, doc: dom::parse("") }
    }

    pub fn fetcher(&self) -> &F { &self.fetcher }

    /// Root of the current document.
    pub fn document(&self) -> &Element { &self.doc }

    fn load(&mut self, page: Fetched) {
        debug!("loaded {}", page.url);
        self.doc = dom::parse(&page.body);
        self.url = Some(page.url);
    }
}

impl<F: Fetch> PageAccessor for HtmlSession<F> {
    fn find_one(&self, locator: &Locator, _timeout: Duration) -> Option<Element> {
        self.doc.find(locator).cloned()
    }

    fn find_many(&self, locator: &Locator, _timeout: Duration) -> Option<Vec<Element>> {
        let hits = self.doc.find_all(locator);
        if hits.is_empty() {
            None
        } else {
            Some(hits.into_iter().cloned().collect())
        }
    }
}

impl<F: Fetch> Session for HtmlSession<F> {
    fn goto(&mut self, url: &str) -> Result<()> {
        let target = resolve_url(self.url.as_deref(), url)?;
        let page = self.fetcher.get(&target)?;
        self.load(page);
        Ok(())
    }

    fn current_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn submit_form(&mut self, action: &str, fields: &[(String, String)]) -> Result<()> {
        let target = resolve_url(self.url.as_deref(), action)?;
        let page = self.fetcher.post_form(&target, fields)?;
        self.load(page);
        Ok(())
    }
}
