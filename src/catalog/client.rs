//! Blocking HTTP access to the remote script store.
//!
//! Requests are deliberately simple: one GET per document, no retries, no
//! timeout. A hung remote hangs the launcher, which is accepted behavior for
//! an interactive tool the user can interrupt.

use crate::catalog::index::Catalog;
use crate::{resolve_base_url, resolve_catalog_url};
use anyhow::{Context, Result};

/// Some upstream hosts answer tool User-Agents with an error page, so the
/// client presents a browser-like one.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/103.0.0.0 Safari/537.36";

/// Where the catalog document and script bodies live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub base_url: String,
    pub catalog_url: String,
}

impl Endpoints {
    /// Resolve endpoints from the environment (see `resolve_base_url`).
    pub fn from_env() -> Self {
        let base_url = resolve_base_url();
        let catalog_url = resolve_catalog_url(&base_url);
        Endpoints {
            base_url,
            catalog_url,
        }
    }

    pub fn script_url(&self, filename: &str) -> String {
        format!("{}/{}", self.base_url, filename)
    }
}

/// Seam between the runner and the remote store.
///
/// The HTTP implementation below is the production one; tests substitute an
/// in-memory store so resolution and execution can be exercised offline.
pub trait ScriptStore {
    /// The ordered catalog of available script filenames.
    fn catalog(&self) -> Result<Catalog>;

    /// The raw body of one script, treated as opaque text.
    fn script(&self, filename: &str) -> Result<String>;
}

pub struct HttpStore {
    endpoints: Endpoints,
    client: reqwest::blocking::Client,
}

impl HttpStore {
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Unable to construct HTTP client")?;
        Ok(HttpStore { endpoints, client })
    }

    pub fn from_env() -> Result<Self> {
        HttpStore::new(Endpoints::from_env())
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {url} returned an error status"))?;
        response
            .text()
            .with_context(|| format!("Unable to read response body from {url}"))
    }
}

impl ScriptStore for HttpStore {
    fn catalog(&self) -> Result<Catalog> {
        let body = self.get(&self.endpoints.catalog_url)?;
        Catalog::from_json(&body)
    }

    fn script(&self, filename: &str) -> Result<String> {
        self.get(&self.endpoints.script_url(filename))
    }
}
