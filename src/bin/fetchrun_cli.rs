//! Command-line entry point for the fetchrun launcher.
//!
//! Dispatches the catalog commands (`list`, `status`, `languages`, `version`,
//! `help`) and the execution path (`fetchrun <number|script> [--debug]`).
//! Exit codes: the child's own code for executed scripts, 0 for catalog
//! commands, 64 for unusable arguments, 70 for launcher-internal failures.

use anyhow::Result;
use fetchrun::interpreter::candidates_for;
use fetchrun::{
    Catalog, HttpStore, INTERPRETERS, LANGUAGE_FAMILIES, ScriptReference, ScriptStore, runner,
    runtime,
};
use std::env;
use std::process;

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            process::exit(runner::EXIT_FAILURE);
        }
    }
}

fn run() -> Result<i32> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_help();
        return Ok(0);
    };
    let debug = args.next().as_deref() == Some("--debug");

    match command.as_str() {
        "list" => {
            print_list(&store()?)?;
            Ok(0)
        }
        "status" => {
            print_status();
            Ok(0)
        }
        "languages" => {
            print_languages();
            Ok(0)
        }
        "version" => {
            print_version();
            Ok(0)
        }
        "help" | "-h" | "--help" => {
            print_help();
            Ok(0)
        }
        other => dispatch_script(other, debug),
    }
}

fn store() -> Result<HttpStore> {
    HttpStore::from_env()
}

/// Run (or debug) a script argument; unknown arguments fall out here.
fn dispatch_script(raw: &str, debug: bool) -> Result<i32> {
    let Some(reference) = ScriptReference::parse(raw) else {
        eprintln!("Error: Unknown command '{raw}'");
        eprintln!();
        print_help();
        return Ok(runner::EXIT_USAGE);
    };

    let store = store()?;
    if debug {
        let report = runner::debug_script(&store, &reference)?;
        print!("{}", report.render());
        return Ok(0);
    }
    runner::run_script(&store, &reference)
}

/// Catalog listing grouped by language, labeled with true catalog ordinals so
/// the numbers shown are the numbers `fetchrun N` accepts.
fn print_list(store: &dyn ScriptStore) -> Result<()> {
    let catalog: Catalog = store.catalog()?;
    println!("Script catalog ({} scripts)", catalog.len());

    for (language, entries) in catalog.grouped() {
        println!();
        println!("{} ({} files)", language.as_str().to_uppercase(), entries.len());
        println!("----------------------------------------");
        for entry in entries {
            println!("  [{:>3}] {}", entry.ordinal, entry.name);
        }
    }

    println!();
    println!("Usage: fetchrun <number> or fetchrun <script_name>");
    println!("Debug: fetchrun <number> --debug");
    Ok(())
}

/// Per-extension report of which candidate interpreters are installed.
fn print_status() {
    println!("fetchrun ready.");
    println!("Installed interpreters by extension:");
    for spec in INTERPRETERS {
        let available: Vec<&str> = spec
            .candidates
            .iter()
            .copied()
            .filter(|name| runtime::interpreter_available(name))
            .collect();
        if !available.is_empty() {
            println!("  {}: {}", spec.extension, available.join(", "));
        }
    }
}

/// Per-language-family table of extensions and interpreter availability.
fn print_languages() {
    println!("Supported script languages and extensions:");
    println!();
    for family in LANGUAGE_FAMILIES {
        let mut available = Vec::new();
        for ext in family.extensions {
            let Some(candidates) = candidates_for(ext) else {
                continue;
            };
            if let Some(found) = candidates
                .iter()
                .copied()
                .find(|name| runtime::interpreter_available(name))
            {
                if !available.contains(&found) {
                    available.push(found);
                }
            }
        }

        let (mark, runtimes) = if available.is_empty() {
            ('x', "Not available".to_string())
        } else {
            ('+', available.join(", "))
        };
        println!(
            "  {mark} {}: {} ({runtimes})",
            family.name,
            family.extensions.join(", ")
        );
    }
}

fn print_version() {
    println!("fetchrun {}", env!("CARGO_PKG_VERSION"));
    println!("Remote-script launcher");
}

fn print_help() {
    println!("fetchrun - remote-script launcher");
    println!();
    println!("Usage:");
    println!("  fetchrun list                    - List all available scripts");
    println!("  fetchrun <number>                - Execute script by catalog number");
    println!("  fetchrun <script_name>           - Execute script by name");
    println!("  fetchrun <number|script> --debug - Show script content and debug info");
    println!("  fetchrun status                  - Show installed interpreters");
    println!("  fetchrun languages               - Show supported languages");
    println!("  fetchrun version                 - Show version information");
    println!("  fetchrun help                    - Show this help message");
    println!();
    println!("Examples:");
    println!("  fetchrun 1                       - Execute the first catalog script");
    println!("  fetchrun hello-world.sh          - Execute hello-world.sh");
    println!("  fetchrun 5 --debug               - Inspect script #5 without running it");
    println!();
    println!("Environment:");
    println!("  FETCHRUN_BASE_URL                - Override the script store base URL");
    println!("  FETCHRUN_CATALOG_URL             - Override the catalog document URL");
}
