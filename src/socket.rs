//! Finding bacon's control socket and sending it actions.

use std::path::PathBuf;
use std::process::Command;

use crate::context::Context;
use crate::error::Error;
use crate::ignore::IgnoreFilter;
use crate::paths;
use crate::search;

/// Directory holding the one socket marker under the project root.
/// A cached directory is returned without searching while it still holds the marker.
///
/// # Errors
///
/// Returns `Error::SocketNotFound` when no marker exists,
/// or `Error::AmbiguousSocket` listing every directory when several do.
pub fn resolve_socket_dir(ctx: &mut Context) -> Result<PathBuf, Error> {
    let socket_file = ctx.config.socket_file.clone();
    if let Some(cached) = ctx
        .socket_cache
        .as_ref()
        .filter(|dir| return paths::exists(&dir.join(&socket_file)))
    {
        tracing::debug!(dir = %cached.display(), "socket cache hit");
        return Ok(cached.clone());
    }

    let root = ctx.project_root();
    let filter = IgnoreFilter::new(ctx.evaluator(), &root);
    let mut dirs: Vec<PathBuf> = search::find_all(&root, &socket_file, &filter)
        .iter()
        .map(|marker| return paths::split(marker).0)
        .collect();

    if dirs.len() > 1 {
        ctx.socket_cache = None;
        return Err(Error::AmbiguousSocket { candidates: dirs });
    }
    let Some(dir) = dirs.pop() else {
        ctx.socket_cache = None;
        return Err(Error::SocketNotFound {
            file_name: socket_file,
            root,
        });
    };

    ctx.socket_cache = Some(dir.clone());
    return Ok(dir);
}

/// Ask the running bacon to perform `action`, e.g. `job:clippy` or `scroll-lines(-2)`.
/// The client runs inside the socket directory so it connects to that instance.
/// Returns the client's trimmed standard output.
///
/// # Errors
///
/// Returns socket resolution errors, `Error::Io` if the client cannot be
/// spawned, or `Error::SendFailed` with its trimmed output if it exits non-zero.
pub fn send_command(ctx: &mut Context, action: &str) -> Result<String, Error> {
    let dir = resolve_socket_dir(ctx)?;
    tracing::debug!(dir = %dir.display(), action, "sending action");

    let output = Command::new(&ctx.config.bacon_command)
        .current_dir(&dir)
        .arg("--send")
        .arg(action)
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if output.status.success() {
        return Ok(stdout.trim().to_string());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = format!("{}\n{}", stdout.trim(), stderr.trim()).trim().to_string();
    return Err(Error::SendFailed {
        action: action.to_string(),
        detail,
    });
}
