//! Host-environment probing.
//!
//! Centralizes executable detection and PATH resolution so the resolver and
//! the CLI subscribe to the same behavior instead of re-implementing it.
//! Probing only inspects the filesystem; it never launches a candidate.

use std::env;
use std::path::{Path, PathBuf};

/// Returns true when a file exists and has any execute bit set.
pub fn is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(meta) = std::fs::metadata(path) {
            return meta.permissions().mode() & 0o111 != 0;
        }
        false
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Find an executable by name somewhere on PATH.
pub fn find_on_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    for dir in env::split_paths(&paths) {
        let candidate = dir.join(name);
        if is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Whether an interpreter binary is resolvable on PATH.
///
/// Lookup failures of any kind read as "not installed"; this never errors.
pub fn interpreter_available(name: &str) -> bool {
    find_on_path(name).is_some()
}
