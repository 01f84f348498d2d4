// src/core/net.rs
// Document fetching. `HttpFetcher` talks to the portals; `StaticFetcher`
// serves captured pages from memory so specs can run offline.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use tracing::debug;

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

/// A fetched page: the final URL (after redirects) and its body.
#[derive(Clone, Debug)]
pub struct Fetched {
    pub url: String,
    pub body: String,
}

pub trait Fetch {
    fn get(&mut self, url: &Url) -> Result<Fetched>;
    fn post_form(&mut self, url: &Url, fields: &[(String, String)]) -> Result<Fetched>;
}

pub fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))
}

/// Resolve `raw` against `base` when it is relative.
pub fn resolve_url(base: Option<&str>, raw: &str) -> Result<Url> {
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(_) => {
            let base = base.ok_or_else(|| Error::InvalidUrl(format!("{raw}: relative URL without a current page")))?;
            parse_url(base)?
                .join(raw)
                .map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))
        }
    }
}

/* ---------------- HTTP ---------------- */

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    fn finish(resp: reqwest::blocking::Response) -> Result<Fetched> {
        let status = resp.status();
        let url = resp.url().to_string();
        if !status.is_success() {
            return Err(Error::PageUnavailable { url, reason: status.to_string() });
        }
        let body = resp.text()?;
        debug!("fetched {} ({} bytes)", url, body.len());
        Ok(Fetched { url, body })
    }
}

impl Fetch for HttpFetcher {
    fn get(&mut self, url: &Url) -> Result<Fetched> {
        let resp = self.client.get(url.clone()).send()?;
        Self::finish(resp)
    }

    fn post_form(&mut self, url: &Url, fields: &[(String, String)]) -> Result<Fetched> {
        let resp = self.client.post(url.clone()).form(fields).send()?;
        Self::finish(resp)
    }
}

/* ---------------- Offline ---------------- */

/// Serves pages from memory, keyed by normalized URL.
/// Form posts answer with the page registered for the action URL.
#[derive(Clone, Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    posts: Vec<(String, Vec<(String, String)>)>,
}

impl StaticFetcher {
    pub fn new() -> Self { Self::default() }

    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.insert(url, html);
        self
    }

    pub fn insert(&mut self, url: &str, html: impl Into<String>) {
        let key = Url::parse(url).map(|u| u.to_string()).unwrap_or_else(|_| s!(url));
        self.pages.insert(key, html.into());
    }

    /// Every form submission seen so far, as (action URL, fields).
    pub fn posts(&self) -> &[(String, Vec<(String, String)>)] { &self.posts }

    fn lookup(&self, url: &Url) -> Result<Fetched> {
        let key = url.to_string();
        match self.pages.get(&key) {
            Some(body) => Ok(Fetched { url: key, body: body.clone() }),
            None => Err(Error::PageUnavailable { url: key, reason: s!("404 Not Found") }),
        }
    }
}

impl Fetch for StaticFetcher {
    fn get(&mut self, url: &Url) -> Result<Fetched> {
        self.lookup(url)
    }

    fn post_form(&mut self, url: &Url, fields: &[(String, String)]) -> Result<Fetched> {
        self.posts.push((url.to_string(), fields.to_vec()));
        self.lookup(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_links_resolve_against_current_page() {
        let u = resolve_url(Some("https://portal.test/app/courses/all"), "../course/42").unwrap();
        assert_eq!(u.as_str(), "https://portal.test/app/course/42");
        let abs = resolve_url(None, "https://other.test/x").unwrap();
        assert_eq!(abs.as_str(), "https://other.test/x");
        assert!(resolve_url(None, "/relative").is_err());
    }

    #[test]
    fn static_pages_normalize_keys() {
        let mut f = StaticFetcher::new().with_page("https://portal.test", "<h1>root</h1>");
        let page = f.get(&parse_url("https://portal.test/").unwrap()).unwrap();
        assert_eq!(page.body, "<h1>root</h1>");
        assert!(f.get(&parse_url("https://portal.test/missing").unwrap()).is_err());
    }
}
