//! Remote script catalog: wire types, ordinal lookup, and the HTTP client.
//!
//! The catalog is an ordered JSON array of filenames; its insertion order is
//! the ordinal numbering the CLI accepts. `ScriptStore` is the seam between
//! the runner and the network so tests can substitute an in-memory store.

pub mod client;
pub mod index;

pub use client::{Endpoints, HttpStore, ScriptStore};
pub use index::{Catalog, CatalogEntry};
