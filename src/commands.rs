//! One-shot CLI commands: locate, socket, list, send.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::context::Context;
use crate::diagnostics;
use crate::error;
use crate::resolver;
use crate::socket;
use crate::store::LocationStore;
use crate::types::Location;

/// How `list` prints the loaded locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// JSON array of location objects.
    Json,
    /// Numbered, human-readable lines with the selection marked.
    Plain,
    /// `path:line:column: category: text`, one per line, for an editor's quickfix list.
    Quickfix,
}

/// Open a context for the process working directory.
///
/// # Errors
///
/// Returns `Error::Io` if the working directory is unavailable, or config errors.
fn open_context() -> Result<Context, error::Error> {
    let cwd = std::env::current_dir()?;
    return Context::open(cwd);
}

/// The line a host jumps from: `path:line:column`.
pub fn jump_target(location: &Location) -> String {
    return format!("{}:{}:{}", location.filename.display(), location.line, location.column);
}

/// Load the locations and print them in the requested format.
///
/// # Errors
///
/// Returns resolution or read errors.
pub fn list(format: ListFormat) -> Result<ExitCode, error::Error> {
    let mut ctx = open_context()?;
    let report = ctx.load_locations()?;
    if let Some(w) = &report.warning {
        diagnostics::print_warning(w);
    }

    match format {
        ListFormat::Json => {
            println!("{}", render_json(ctx.store.locations())?);
        },
        ListFormat::Plain => print!("{}", render_list(&ctx.store)),
        ListFormat::Quickfix => {
            for location in ctx.store.locations() {
                println!("{}", location.quickfix_line());
            }
        },
    }
    return Ok(ExitCode::SUCCESS);
}

/// Pretty JSON array of `locations`.
///
/// # Errors
///
/// Returns `Error::Json` if a path is not valid UTF-8.
fn render_json(locations: &[Location]) -> Result<String, error::Error> {
    return Ok(serde_json::to_string_pretty(locations)?);
}

/// Print the path of the locations file that would be loaded.
///
/// # Errors
///
/// Returns `Error::LocationsNotFound` if there is none.
pub fn locate() -> Result<ExitCode, error::Error> {
    let mut ctx = open_context()?;
    let resolution = resolver::resolve(&mut ctx)?;
    if let Some(w) = &resolution.warning {
        diagnostics::print_warning(w);
    }
    println!("{}", resolution.file.display());
    return Ok(ExitCode::SUCCESS);
}

/// Numbered listing with the current selection marked by `>`.
/// An empty store renders a single explanatory line.
pub fn render_list(store: &LocationStore) -> String {
    if store.is_empty() {
        return "No location\n".to_string();
    }
    let mut out = String::new();
    for (idx, location) in store.locations().iter().enumerate() {
        let number = idx.saturating_add(1);
        let marker = if number == store.current_index() { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker}{number:>3} {:<8} {} {}",
            location.category,
            jump_target(location),
            location.text
        );
    }
    return out;
}

/// Send an action to the running bacon and echo any output it returns.
///
/// # Errors
///
/// Returns socket resolution errors or `Error::SendFailed`.
pub fn send(action: &str) -> Result<ExitCode, error::Error> {
    let mut ctx = open_context()?;
    let output = socket::send_command(&mut ctx, action)?;
    if !output.is_empty() {
        println!("{output}");
    }
    return Ok(ExitCode::SUCCESS);
}

/// Print the directory of the running bacon's socket.
///
/// # Errors
///
/// Returns `Error::SocketNotFound` or `Error::AmbiguousSocket`.
pub fn socket() -> Result<ExitCode, error::Error> {
    let mut ctx = open_context()?;
    let dir: PathBuf = socket::resolve_socket_dir(&mut ctx)?;
    println!("{}", dir.display());
    return Ok(ExitCode::SUCCESS);
}

/// Run an interactive session on stdin/stdout against one context.
///
/// # Errors
///
/// Returns context setup errors or `Error::Io` if stdin/stdout fail.
pub fn session() -> Result<ExitCode, error::Error> {
    let mut ctx = open_context()?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    crate::session::run(&mut ctx, stdin.lock(), stdout.lock())?;
    return Ok(ExitCode::SUCCESS);
}
