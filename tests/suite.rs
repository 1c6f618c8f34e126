#![cfg(unix)]

// Centralized integration suite for the launcher; exercises the full
// fetch-resolve-execute pipeline against an in-memory store and real child
// processes so resolution rules, exit-code propagation, and transient-file
// cleanup surface in one place.
mod support;

use anyhow::Result;
use fetchrun::runner::{debug_script, run_script};
use fetchrun::runtime::interpreter_available;
use fetchrun::{ScriptReference, resolve_interpreter_with};
use std::fs;
use std::path::Path;
use support::{CatalogDownStore, MemoryStore};
use tempfile::TempDir;

fn by_name(name: &str) -> ScriptReference {
    ScriptReference::ByName(name.to_string())
}

#[test]
fn child_exit_code_propagates_verbatim() -> Result<()> {
    let store = MemoryStore::new(&["exit-seven.sh"]).with_script("exit-seven.sh", "exit 7\n");
    let code = run_script(&store, &ScriptReference::ByOrdinal(1))?;
    assert_eq!(code, 7);
    Ok(())
}

#[test]
fn successful_scripts_exit_zero() -> Result<()> {
    let store = MemoryStore::new(&[]).with_script("greet.sh", "#!/usr/bin/env bash\necho hi\n");
    let code = run_script(&store, &by_name("greet.sh"))?;
    assert_eq!(code, 0);
    Ok(())
}

// The transient file must be gone whether the child succeeded, failed, or the
// launcher bailed after creating it. The script records its own $0 so the
// test can check the exact path afterwards.
#[test]
fn transient_file_is_removed_after_success() -> Result<()> {
    let scratch = TempDir::new()?;
    let record = scratch.path().join("observed-path");
    let body = format!("echo -n \"$0\" > {}\n", record.display());
    let store = MemoryStore::new(&[]).with_script("observe.sh", body);

    let code = run_script(&store, &by_name("observe.sh"))?;
    assert_eq!(code, 0);

    let observed = fs::read_to_string(&record)?;
    assert!(!observed.is_empty(), "script never ran");
    let transient = Path::new(observed.trim());
    let name = transient.file_name().unwrap().to_string_lossy();
    assert!(name.starts_with("fetchrun-"), "unexpected name {name}");
    assert!(name.ends_with(".sh"), "suffix should match the extension");
    assert!(!transient.exists(), "transient file left behind");
    Ok(())
}

#[test]
fn transient_file_is_removed_after_child_failure() -> Result<()> {
    let scratch = TempDir::new()?;
    let record = scratch.path().join("observed-path");
    let body = format!("echo -n \"$0\" > {}\nexit 9\n", record.display());
    let store = MemoryStore::new(&[]).with_script("fail.sh", body);

    let code = run_script(&store, &by_name("fail.sh"))?;
    assert_eq!(code, 9);

    let observed = fs::read_to_string(&record)?;
    assert!(!Path::new(observed.trim()).exists(), "transient file left behind");
    Ok(())
}

#[test]
fn signal_termination_maps_to_shell_convention() -> Result<()> {
    let store = MemoryStore::new(&[]).with_script("selfterm.sh", "kill -TERM $$\n");
    let code = run_script(&store, &by_name("selfterm.sh"))?;
    assert_eq!(code, 128 + 15);
    Ok(())
}

#[test]
fn out_of_range_ordinal_fails_before_any_script_fetch() {
    let store = MemoryStore::new(&["a.py", "b.rb"]);
    for ordinal in [0usize, 3] {
        let err = run_script(&store, &ScriptReference::ByOrdinal(ordinal)).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err:#}");
    }
    assert_eq!(store.script_fetches(), 0);
}

#[test]
fn by_name_references_never_consult_the_catalog() -> Result<()> {
    let inner = MemoryStore::new(&[]).with_script("direct.sh", "exit 0\n");
    let store = CatalogDownStore(inner);
    let code = run_script(&store, &by_name("direct.sh"))?;
    assert_eq!(code, 0);
    Ok(())
}

#[test]
fn unknown_extension_reports_resolution_error_without_spawning() {
    let scratch = TempDir::new().expect("scratch dir");
    let marker = scratch.path().join("ran");
    let body = format!("touch {}\n", marker.display());
    let store = MemoryStore::new(&[]).with_script("x.unknownext", body);

    let err = run_script(&store, &by_name("x.unknownext")).unwrap_err();
    assert!(
        err.to_string()
            .contains("Cannot determine interpreter for x.unknownext"),
        "{err:#}"
    );
    assert!(!marker.exists(), "script must not have been executed");
}

// The distilled end-to-end property: catalog ["a.py","b.rb"], reference 1,
// python3 installed. Resolution is checked with a stubbed probe so the
// assertion holds everywhere; the execution half runs only where a real
// python3 exists.
#[test]
fn ordinal_python_script_resolves_to_python3() -> Result<()> {
    assert_eq!(
        resolve_interpreter_with("a.py", "print('hi')", |name: &str| {
            name == "python3"
        }),
        Some("python3")
    );

    if !interpreter_available("python3") {
        eprintln!("python3 not installed; skipping execution half");
        return Ok(());
    }
    let store = MemoryStore::new(&["a.py", "b.rb"]).with_script("a.py", "print('hi')\n");
    let code = run_script(&store, &ScriptReference::ByOrdinal(1))?;
    assert_eq!(code, 0);
    Ok(())
}

#[test]
fn debug_mode_inspects_without_creating_anything() -> Result<()> {
    let scratch = TempDir::new()?;
    let marker = scratch.path().join("ran");
    let body = format!("#!/usr/bin/env bash\ntouch {}\n", marker.display());
    let store = MemoryStore::new(&["inspect.sh"]).with_script("inspect.sh", body.clone());

    let report = debug_script(&store, &ScriptReference::ByOrdinal(1))?;
    assert_eq!(report.filename, "inspect.sh");
    assert_eq!(report.locator, "1");
    assert_eq!(report.extension, ".sh");
    assert_eq!(report.interpreter, Some("bash"));
    assert_eq!(report.shebang, Some("bash"));
    assert_eq!(report.content, body);
    assert!(!marker.exists(), "debug mode must not execute the script");
    Ok(())
}

#[test]
fn empty_script_identifier_is_a_reference_error() {
    let store = MemoryStore::new(&[]);
    let err = run_script(&store, &by_name("")).unwrap_err();
    assert!(err.to_string().contains("Empty script identifier"));
    assert_eq!(store.script_fetches(), 0);
}
