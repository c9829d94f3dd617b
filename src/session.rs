//! Line-oriented session: a host feeds one command per line and reads the
//! replies, so caches and the selection persist between commands.
//!
//! Navigation replies are `<index>/<count> <path>:<line>:<column>`, which a
//! host turns into a cursor jump. Failures are reported as `error: ...`
//! lines and never end the session.

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use crate::commands;
use crate::context::Context;
use crate::error::Error;
use crate::resolver::{self, AmbiguityWarning};
use crate::socket;
use crate::types::{Direction, Location};

/// A parsed session command.
#[derive(Debug, PartialEq, Eq)]
enum Request<'a> {
    /// Show the selected location.
    Current,
    /// Reload and print the numbered list.
    List,
    /// Reload and report how many locations were read.
    Load,
    /// Print the resolved locations file.
    Locate,
    /// Reload, then step by one in the given direction.
    Move(Direction),
    /// End the session.
    Quit,
    /// Select by 1-based number without reloading.
    Select(usize),
    /// Send an action to the running bacon.
    Send(&'a str),
    /// Print the resolved socket directory.
    Socket,
    /// Anything unrecognised, kept for the error message.
    Unknown(&'a str),
}

/// Serve commands from `input` until `quit` or end of input.
///
/// # Errors
///
/// Returns `Error::Io` only when reading input or writing output fails.
pub fn run<R: BufRead, W: Write>(ctx: &mut Context, input: R, mut out: W) -> Result<(), Error> {
    for line in input.lines() {
        let line = line?;
        let request = parse_request(&line);
        if request == Request::Quit {
            break;
        }
        if let Some(reply) = handle(ctx, &request) {
            writeln!(out, "{reply}")?;
            out.flush()?;
        }
    }
    return Ok(());
}

/// Split a raw line into a request. Blank lines are ignored by the caller.
fn parse_request(line: &str) -> Request<'_> {
    let trimmed = line.trim();
    let (word, rest) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));
    let rest = rest.trim();

    return match word {
        "current" => Request::Current,
        "list" => Request::List,
        "load" => Request::Load,
        "locate" => Request::Locate,
        "next" => Request::Move(Direction::Next),
        "prev" | "previous" => Request::Move(Direction::Previous),
        "quit" | "exit" => Request::Quit,
        "select" => rest.parse().map_or(Request::Unknown(trimmed), Request::Select),
        "send" if !rest.is_empty() => Request::Send(rest),
        "socket" => Request::Socket,
        // Bare digits select, like the number keys in an editor's location list.
        _ => trimmed.parse().map_or(Request::Unknown(trimmed), Request::Select),
    };
}

/// Execute one request. `None` means no reply is due (blank line, ignored selection).
fn handle(ctx: &mut Context, request: &Request<'_>) -> Option<String> {
    return match request {
        Request::Current => Some(match ctx.store.current() {
            Some(location) => jump_reply(ctx.store.current_index(), ctx.store.len(), location),
            None => "no selection".to_string(),
        }),
        Request::List => Some(match ctx.load_locations() {
            Ok(report) => {
                let list = commands::render_list(&ctx.store);
                format!("{}{}", warning_lines(report.warning.as_ref()), list.trim_end())
            },
            Err(e) => error_reply(&e),
        }),
        Request::Load => Some(match ctx.load_locations() {
            Ok(report) => format!(
                "{}{} locations from {}",
                warning_lines(report.warning.as_ref()),
                ctx.store.len(),
                report.file.display()
            ),
            Err(e) => error_reply(&e),
        }),
        Request::Locate => Some(match resolver::resolve(ctx) {
            Ok(resolution) => format!(
                "{}{}",
                warning_lines(resolution.warning.as_ref()),
                resolution.file.display()
            ),
            Err(e) => error_reply(&e),
        }),
        Request::Move(direction) => Some(navigate(ctx, *direction)),
        Request::Quit => None,
        Request::Select(index) => {
            let len = ctx.store.len();
            let location = ctx.store.select(*index)?;
            Some(jump_reply(*index, len, location))
        },
        Request::Send(action) => Some(match socket::send_command(ctx, action) {
            Ok(output) if output.is_empty() => "ok".to_string(),
            Ok(output) => output,
            Err(e) => error_reply(&e),
        }),
        Request::Socket => Some(match socket::resolve_socket_dir(ctx) {
            Ok(dir) => dir.display().to_string(),
            Err(e) => error_reply(&e),
        }),
        Request::Unknown("") => None,
        Request::Unknown(other) => Some(format!("error: unknown command `{other}`")),
    };
}

/// Reload so the step sees bacon's latest output, then move.
fn navigate(ctx: &mut Context, direction: Direction) -> String {
    if let Err(e) = ctx.load_locations() {
        return error_reply(&e);
    }
    let len = ctx.store.len();
    let Some(location) = ctx.store.advance(direction) else {
        return "no locations".to_string();
    };
    let location = location.clone();
    return jump_reply(ctx.store.current_index(), len, &location);
}

/// `error: <message>` reply.
fn error_reply(e: &Error) -> String {
    return format!("error: {e}");
}

/// `<index>/<count> <path>:<line>:<column>`.
fn jump_reply(index: usize, len: usize, location: &Location) -> String {
    return format!("{index}/{len} {}", commands::jump_target(location));
}

/// `warning: ...` lines to prepend when the file choice was arbitrary:
/// the pick, then one `warning: candidate <path>` line per candidate.
fn warning_lines(warning: Option<&AmbiguityWarning>) -> String {
    let Some(w) = warning else {
        return String::new();
    };
    let mut out = format!(
        "warning: picked {} among {} candidates\n",
        w.selected.display(),
        w.candidates.len()
    );
    for candidate in &w.candidates {
        let _ = writeln!(out, "warning: candidate {}", candidate.display());
    }
    return out;
}
