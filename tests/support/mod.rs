use anyhow::{Result, bail};
use fetchrun::{Catalog, ScriptStore};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory stand-in for the remote store so the suite runs offline.
pub struct MemoryStore {
    catalog: Vec<String>,
    scripts: BTreeMap<String, String>,
    script_fetches: AtomicUsize,
}

impl MemoryStore {
    pub fn new(catalog: &[&str]) -> Self {
        MemoryStore {
            catalog: catalog.iter().map(|s| s.to_string()).collect(),
            scripts: BTreeMap::new(),
            script_fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_script(mut self, name: &str, body: impl Into<String>) -> Self {
        self.scripts.insert(name.to_string(), body.into());
        self
    }

    /// How many script bodies have been requested so far.
    pub fn script_fetches(&self) -> usize {
        self.script_fetches.load(Ordering::SeqCst)
    }
}

impl ScriptStore for MemoryStore {
    fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog::new(self.catalog.clone()))
    }

    fn script(&self, filename: &str) -> Result<String> {
        self.script_fetches.fetch_add(1, Ordering::SeqCst);
        match self.scripts.get(filename) {
            Some(body) => Ok(body.clone()),
            None => bail!("no such script: {filename}"),
        }
    }
}

/// A store whose catalog endpoint is down; by-name runs must not touch it.
pub struct CatalogDownStore(pub MemoryStore);

impl ScriptStore for CatalogDownStore {
    fn catalog(&self) -> Result<Catalog> {
        bail!("catalog endpoint unreachable")
    }

    fn script(&self, filename: &str) -> Result<String> {
        self.0.script(filename)
    }
}
