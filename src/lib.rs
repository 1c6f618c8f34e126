//! Shared library for the fetchrun launcher.
//!
//! The crate exposes the pieces the `fetchrun` binary composes: remote store
//! access (catalog and script bodies), interpreter resolution, PATH probing,
//! and the runner that materializes a script and hands control to the chosen
//! interpreter. Public functions here form the contract the binary depends
//! on; the resolution rules are documented in README.md.

use std::env;

pub mod catalog;
pub mod interpreter;
pub mod runner;
pub mod runtime;

pub use catalog::{Catalog, CatalogEntry, Endpoints, HttpStore, ScriptStore};
pub use interpreter::{
    INTERPRETERS, LANGUAGE_FAMILIES, Language, SHEBANG_TOKENS, file_extension, resolve_interpreter,
    resolve_interpreter_with, shebang_hint,
};
pub use runner::{DebugReport, EXIT_FAILURE, EXIT_USAGE, debug_script, run_script};

/// How the caller identified the script to run.
///
/// Ordinals are 1-based positions in the remote catalog; names are taken
/// verbatim and fetched without consulting the catalog at all. The variant is
/// fixed at argument-parse time so every later stage knows which lookup rules
/// apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptReference {
    ByOrdinal(usize),
    ByName(String),
}

impl ScriptReference {
    /// Classify a raw CLI argument as a script reference.
    ///
    /// All-digit arguments are ordinals. Anything carrying a known script
    /// extension is a by-name reference. Everything else is not a script
    /// reference and should be treated as an unknown command by the caller.
    pub fn parse(raw: &str) -> Option<Self> {
        if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
            return raw.parse().ok().map(ScriptReference::ByOrdinal);
        }
        if interpreter::is_script_name(raw) {
            return Some(ScriptReference::ByName(raw.to_string()));
        }
        None
    }

    /// The argument as the user originally wrote it.
    pub fn locator(&self) -> String {
        match self {
            ScriptReference::ByOrdinal(ordinal) => ordinal.to_string(),
            ScriptReference::ByName(name) => name.clone(),
        }
    }
}

const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/fetchrun/scripts/main/lib";
const CATALOG_FILENAME: &str = "catalog.json";

fn env_url(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the script-store base URL.
///
/// Search order matches README expectations: honor `FETCHRUN_BASE_URL` when
/// set, fall back to the build-time hint, then use the built-in default.
pub fn resolve_base_url() -> String {
    if let Some(url) = env_url("FETCHRUN_BASE_URL") {
        return url;
    }
    if let Some(hint) = option_env!("FETCHRUN_BASE_HINT") {
        if !hint.trim().is_empty() {
            return hint.trim_end_matches('/').to_string();
        }
    }
    DEFAULT_BASE_URL.to_string()
}

/// Resolve the catalog document URL; defaults to `catalog.json` next to the
/// script base unless `FETCHRUN_CATALOG_URL` overrides it.
pub fn resolve_catalog_url(base_url: &str) -> String {
    env_url("FETCHRUN_CATALOG_URL").unwrap_or_else(|| format!("{base_url}/{CATALOG_FILENAME}"))
}
