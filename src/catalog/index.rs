//! Deserializable catalog document and ordinal resolution.
//!
//! The catalog mirrors the remote store's wire format (a bare JSON array of
//! filenames) so callers can reason about ordinals without ad-hoc JSON
//! handling. Ordinals are 1-based and always index the raw catalog order;
//! grouping for display keeps each entry's true ordinal so the numbers shown
//! by `list` are the numbers `fetchrun N` accepts.

use crate::interpreter::Language;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Ordered list of script filenames as published by the remote store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<String>,
}

/// One catalog row with its 1-based ordinal preserved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub ordinal: usize,
    pub name: String,
}

impl Catalog {
    pub fn new(entries: Vec<String>) -> Self {
        Catalog { entries }
    }

    /// Parse the remote catalog document.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Unable to parse catalog document as a JSON array")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Resolve a 1-based ordinal to its filename.
    ///
    /// Out-of-range ordinals (including 0) are an error, never clamped.
    pub fn by_ordinal(&self, ordinal: usize) -> Result<&str> {
        if ordinal == 0 || ordinal > self.entries.len() {
            bail!(
                "Script index {ordinal} out of range (catalog has {} entries)",
                self.entries.len()
            );
        }
        Ok(&self.entries[ordinal - 1])
    }

    /// Group entries by language bucket for display, keeping true ordinals.
    pub fn grouped(&self) -> BTreeMap<Language, Vec<CatalogEntry>> {
        let mut groups: BTreeMap<Language, Vec<CatalogEntry>> = BTreeMap::new();
        for (idx, name) in self.entries.iter().enumerate() {
            groups
                .entry(Language::of_filename(name))
                .or_default()
                .push(CatalogEntry {
                    ordinal: idx + 1,
                    name: name.clone(),
                });
        }
        groups
    }
}
