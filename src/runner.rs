//! Fetch-resolve-execute pipeline.
//!
//! The runner turns a script reference into a child process: it resolves the
//! reference against the catalog, fetches the body, picks an interpreter,
//! materializes the body to a transient file, and blocks on the child with
//! the caller's stdio attached. The transient file lives exactly as long as
//! one invocation; the `NamedTempFile` guard removes it on every exit path.

use crate::catalog::ScriptStore;
use crate::{ScriptReference, interpreter};
use anyhow::{Context, Result, bail};
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Exit code for arguments the CLI could not make sense of (EX_USAGE).
pub const EXIT_USAGE: i32 = 64;

/// Exit code for launcher-internal failures: fetch errors, unresolved
/// interpreters, transient-file I/O, spawn failures (EX_SOFTWARE). Distinct
/// from the usage code so callers can tell "my script failed" from "the
/// launcher failed".
pub const EXIT_FAILURE: i32 = 70;

#[derive(Debug)]
struct FetchedScript {
    filename: String,
    content: String,
}

/// Resolve a reference to a filename, then fetch the body.
///
/// Ordinal range checking happens before any script fetch so an out-of-range
/// index never costs a second request.
fn fetch(store: &dyn ScriptStore, reference: &ScriptReference) -> Result<FetchedScript> {
    let filename = match reference {
        ScriptReference::ByOrdinal(ordinal) => {
            let catalog = store
                .catalog()
                .context("Unable to fetch the script catalog")?;
            catalog.by_ordinal(*ordinal)?.to_string()
        }
        ScriptReference::ByName(name) => {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                bail!("Empty script identifier requested");
            }
            trimmed.to_string()
        }
    };

    let content = store
        .script(&filename)
        .with_context(|| format!("Unable to fetch script {filename}"))?;
    Ok(FetchedScript { filename, content })
}

/// Fetch a script, resolve its interpreter, and run it.
///
/// Returns the launcher's exit code: the child's code verbatim on a normal
/// exit, 128+signal when the child was killed (unix). Everything up to and
/// including the spawn reports through `Err` instead.
pub fn run_script(store: &dyn ScriptStore, reference: &ScriptReference) -> Result<i32> {
    let script = fetch(store, reference)?;
    let Some(chosen) = interpreter::resolve_interpreter(&script.filename, &script.content) else {
        bail!("Cannot determine interpreter for {}", script.filename);
    };
    execute(&script.filename, &script.content, chosen)
}

/// Side-effect-free variant of `run_script`: same fetch and resolution, but
/// the result is an introspection report instead of a child process. No
/// transient file is created.
pub fn debug_script(store: &dyn ScriptStore, reference: &ScriptReference) -> Result<DebugReport> {
    let script = fetch(store, reference)?;
    let extension = interpreter::file_extension(&script.filename);
    let resolved = interpreter::resolve_interpreter(&script.filename, &script.content);
    let shebang = interpreter::shebang_hint(&script.content);
    Ok(DebugReport {
        filename: script.filename,
        locator: reference.locator(),
        extension,
        interpreter: resolved,
        shebang,
        content: script.content,
    })
}

/// Everything the debug mode reports about one resolved script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugReport {
    pub filename: String,
    pub locator: String,
    pub extension: String,
    pub interpreter: Option<&'static str>,
    pub shebang: Option<&'static str>,
    pub content: String,
}

impl DebugReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Script Debug Information ===");
        let _ = writeln!(out, "Filename: {}", self.filename);
        let _ = writeln!(out, "Requested: {}", self.locator);
        let _ = writeln!(out, "File extension: {}", self.extension);
        let _ = writeln!(
            out,
            "Resolved interpreter: {}",
            self.interpreter.unwrap_or("(none)")
        );
        if let Some(token) = self.shebang {
            let _ = writeln!(out, "Shebang interpreter: {token}");
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "=== Script Content ===");
        out.push_str(&self.content);
        if !self.content.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

/// Materialize the body to a transient file and hand control to the
/// interpreter. The file keeps the original extension as its suffix so
/// interpreters that inspect their argument's suffix behave correctly.
fn execute(filename: &str, content: &str, chosen: &str) -> Result<i32> {
    let extension = interpreter::file_extension(filename);
    let mut transient = tempfile::Builder::new()
        .prefix("fetchrun-")
        .suffix(&extension)
        .tempfile()
        .context("Unable to create transient script file")?;
    transient
        .write_all(content.as_bytes())
        .context("Unable to write transient script file")?;
    transient
        .flush()
        .context("Unable to flush transient script file")?;
    make_executable(transient.path())?;

    eprintln!("Executing {filename} with {chosen}...");
    let status = Command::new(chosen)
        .arg(transient.path())
        .status()
        .with_context(|| format!("Failed to execute {chosen}"))?;
    Ok(exit_code_for(status))
}

fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)
            .with_context(|| format!("Unable to stat {}", path.display()))?
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("Unable to mark {} executable", path.display()))?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

/// Translate a child's termination into the launcher's exit code: the code
/// itself on a normal exit, the shell convention 128+signal on unix kills.
fn exit_code_for(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    EXIT_FAILURE
}
