use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::resolver::AmbiguityWarning;

/// ANSI bold, used for markdown headings on a terminal.
const BOLD: &str = "\x1b[1m";
/// ANSI attribute reset.
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    print_markdown(&render_error(e));
}

/// Render an ambiguity warning and print it to stderr.
pub fn print_warning(w: &AmbiguityWarning) {
    print_markdown(&render_warning(w));
}

/// Print markdown to stderr, headings in bold.
fn print_markdown(md: &str) {
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic: what happened, and how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::AmbiguousSocket { candidates } => render_ambiguous_socket(candidates),
        Error::LocationsNotFound { file_name, searched_from } => {
            render_locations_not_found(file_name, searched_from)
        },
        Error::SendFailed { action, detail } => render_send_failed(action, detail),
        Error::SocketNotFound { file_name, root } => render_socket_not_found(file_name, root),
        _ => render_generic(e),
    }
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::ConfigInvalid { path, reason } => format!("\
# Error: Invalid Config

{reason}

## Fix

Edit `{}`.
", path.display()),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::Json(e) => format!("\
# Error: JSON Output

{e}

## Fix

Use `list` or `list --quickfix` for paths that are not valid UTF-8.
"),
        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}
"),
        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    }
}

fn render_ambiguous_socket(candidates: &[PathBuf]) -> String {
    let mut out = "\
# Error: Ambiguous Socket

Several bacon instances are listening under this project:

"
    .to_string();
    for c in candidates {
        let _ = writeln!(out, "- `{}`", c.display());
    }
    out.push_str("\
\n## Fix

Stop the extra instances, or run from inside the project whose bacon you want to drive.
");
    out
}

fn render_locations_not_found(file_name: &str, searched_from: &Path) -> String {
    format!("\
# Error: No Locations

No `{file_name}` found below the project root or above `{}`.

## Fix

Enable the locations export in bacon's config and run bacon:

    [exports.locations]
    auto = true
", searched_from.display())
}

fn render_send_failed(action: &str, detail: &str) -> String {
    let mut out = format!("\
# Error: Send Failed

bacon rejected `{action}`.
");
    if !detail.is_empty() {
        let _ = write!(out, "\n## Output\n\n{detail}\n");
    }
    out
}

fn render_socket_not_found(file_name: &str, root: &Path) -> String {
    format!("\
# Error: No Socket

No `{file_name}` found under `{}`.

## Fix

Start bacon with its socket enabled:

    listen = true
", root.display())
}

/// Render the non-fatal notice shown when several locations files matched.
pub fn render_warning(w: &AmbiguityWarning) -> String {
    let kind = if w.socket_backed { "with a running bacon " } else { "" };
    let mut out = format!("\
# Warning: Several Locations Files

Found {} files {kind}and picked the first:

", w.candidates.len());
    for c in &w.candidates {
        let marker = if *c == w.selected { " (selected)" } else { "" };
        let _ = writeln!(out, "- `{}`{marker}", c.display());
    }
    out
}
