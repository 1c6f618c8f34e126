//! Interpreter resolution rules.
//!
//! This module centralizes how script filenames and bodies map to interpreter
//! binaries: the extension table, the shebang token list, and the fallback
//! ordering. Callers should rely on this registry instead of hard-coding
//! interpreter names so new languages can be added in one place without
//! changing the runner or the CLI surface.

use crate::runtime;

/// One extension row: candidate binaries in preference order plus the
/// language bucket used for catalog grouping.
pub struct InterpreterSpec {
    pub extension: &'static str,
    pub candidates: &'static [&'static str],
    pub language: Language,
}

/// Extension-to-interpreter table, keyed by lowercase extension including the
/// leading dot. Candidate order within a row is the preference order; the
/// first installed candidate wins.
pub const INTERPRETERS: &[InterpreterSpec] = &[
    InterpreterSpec {
        extension: ".sh",
        candidates: &["bash"],
        language: Language::Shell,
    },
    InterpreterSpec {
        extension: ".bash",
        candidates: &["bash"],
        language: Language::Shell,
    },
    InterpreterSpec {
        extension: ".zsh",
        candidates: &["zsh"],
        language: Language::Shell,
    },
    InterpreterSpec {
        extension: ".py",
        candidates: &["python3", "python"],
        language: Language::Python,
    },
    InterpreterSpec {
        extension: ".python",
        candidates: &["python3", "python"],
        language: Language::Python,
    },
    InterpreterSpec {
        extension: ".rb",
        candidates: &["ruby"],
        language: Language::Ruby,
    },
    InterpreterSpec {
        extension: ".ruby",
        candidates: &["ruby"],
        language: Language::Ruby,
    },
    InterpreterSpec {
        extension: ".pl",
        candidates: &["perl"],
        language: Language::Perl,
    },
    InterpreterSpec {
        extension: ".perl",
        candidates: &["perl"],
        language: Language::Perl,
    },
    InterpreterSpec {
        extension: ".js",
        candidates: &["node"],
        language: Language::JavaScript,
    },
    InterpreterSpec {
        extension: ".javascript",
        candidates: &["node"],
        language: Language::JavaScript,
    },
    InterpreterSpec {
        extension: ".lua",
        candidates: &["lua"],
        language: Language::Other,
    },
    InterpreterSpec {
        extension: ".r",
        candidates: &["Rscript"],
        language: Language::Other,
    },
    InterpreterSpec {
        extension: ".php",
        candidates: &["php"],
        language: Language::Other,
    },
    InterpreterSpec {
        extension: ".swift",
        candidates: &["swift"],
        language: Language::Other,
    },
    InterpreterSpec {
        extension: ".groovy",
        candidates: &["groovy"],
        language: Language::Other,
    },
    InterpreterSpec {
        extension: ".scala",
        candidates: &["scala"],
        language: Language::Other,
    },
    InterpreterSpec {
        extension: ".ps1",
        candidates: &["powershell", "pwsh"],
        language: Language::Other,
    },
    InterpreterSpec {
        extension: ".fish",
        candidates: &["fish"],
        language: Language::Other,
    },
];

/// Shebang tokens in match order. Ordering is load-bearing: matching is a
/// substring test, so `python3` must be probed before `python`.
pub const SHEBANG_TOKENS: &[&str] = &[
    "python3", "python", "ruby", "perl", "node", "bash", "zsh", "fish", "lua", "php",
];

/// Coarse language bucket used when grouping a catalog for display.
///
/// Declaration order is display order; `Other` collects everything without a
/// dedicated section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Language {
    Shell,
    Python,
    Ruby,
    Perl,
    JavaScript,
    Other,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Shell => "shell",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Perl => "perl",
            Language::JavaScript => "javascript",
            Language::Other => "other",
        }
    }

    /// Bucket for a filename, via its lowercase extension.
    pub fn of_filename(filename: &str) -> Language {
        let ext = file_extension(filename);
        INTERPRETERS
            .iter()
            .find(|spec| spec.extension == ext)
            .map(|spec| spec.language)
            .unwrap_or(Language::Other)
    }
}

/// Language families reported by the `languages` command. Separate from the
/// grouping buckets because the report lists every supported runtime while
/// the catalog view only keeps the common ones as sections.
pub struct LanguageFamily {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

pub const LANGUAGE_FAMILIES: &[LanguageFamily] = &[
    LanguageFamily {
        name: "Shell/Bash",
        extensions: &[".sh", ".bash", ".zsh", ".fish"],
    },
    LanguageFamily {
        name: "Python",
        extensions: &[".py", ".python"],
    },
    LanguageFamily {
        name: "Ruby",
        extensions: &[".rb", ".ruby"],
    },
    LanguageFamily {
        name: "Perl",
        extensions: &[".pl", ".perl"],
    },
    LanguageFamily {
        name: "JavaScript (Node.js)",
        extensions: &[".js", ".javascript"],
    },
    LanguageFamily {
        name: "Lua",
        extensions: &[".lua"],
    },
    LanguageFamily {
        name: "R",
        extensions: &[".r"],
    },
    LanguageFamily {
        name: "PHP",
        extensions: &[".php"],
    },
    LanguageFamily {
        name: "Swift",
        extensions: &[".swift"],
    },
    LanguageFamily {
        name: "Groovy",
        extensions: &[".groovy"],
    },
    LanguageFamily {
        name: "Scala",
        extensions: &[".scala"],
    },
    LanguageFamily {
        name: "PowerShell",
        extensions: &[".ps1"],
    },
];

/// Lowercase extension of `filename`, leading dot included; empty when the
/// name carries no dot.
pub fn file_extension(filename: &str) -> String {
    match filename.rfind('.') {
        Some(idx) => filename[idx..].to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Candidate binaries for a lowercase extension, in preference order.
pub fn candidates_for(extension: &str) -> Option<&'static [&'static str]> {
    INTERPRETERS
        .iter()
        .find(|spec| spec.extension == extension)
        .map(|spec| spec.candidates)
}

/// Whether an argument looks like a script filename (its extension appears in
/// the interpreter table).
pub fn is_script_name(name: &str) -> bool {
    let ext = file_extension(name);
    !ext.is_empty() && candidates_for(&ext).is_some()
}

/// Interpreter token named by the script's shebang line, if any.
///
/// Only the first line is consulted, and only when it starts with `#!`. The
/// remainder of that line is tested for containment against the token list,
/// case-sensitively, in list order. A shebang naming an unknown runtime
/// yields no hint.
pub fn shebang_hint(content: &str) -> Option<&'static str> {
    let first_line = content.lines().next()?;
    let rest = first_line.strip_prefix("#!")?.trim();
    SHEBANG_TOKENS
        .iter()
        .find(|token| rest.contains(**token))
        .copied()
}

/// Resolve the interpreter for a script, with an injected availability probe.
///
/// Strict order, first success wins:
/// 1. extension table, first installed candidate;
/// 2. shebang hint, when installed;
/// 3. `bash` unconditionally for extension-less, `.sh`, and `.bash` names;
/// 4. none.
pub fn resolve_interpreter_with<F>(filename: &str, content: &str, available: F) -> Option<&'static str>
where
    F: Fn(&str) -> bool,
{
    let extension = file_extension(filename);

    if let Some(candidates) = candidates_for(&extension) {
        for candidate in candidates.iter().copied() {
            if available(candidate) {
                return Some(candidate);
            }
        }
    }

    if let Some(token) = shebang_hint(content) {
        if available(token) {
            return Some(token);
        }
    }

    // Shell scripts run under bash even when the probe cannot see it; a
    // missing bash surfaces as a launch failure rather than a resolution one.
    if matches!(extension.as_str(), "" | ".sh" | ".bash") {
        return Some("bash");
    }

    None
}

/// Resolve against the real PATH.
pub fn resolve_interpreter(filename: &str, content: &str) -> Option<&'static str> {
    resolve_interpreter_with(filename, content, runtime::interpreter_available)
}
