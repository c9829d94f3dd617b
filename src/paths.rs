//! Small filesystem helpers shared by the resolvers and the parser.

use std::path::{Path, PathBuf};

use crate::error::Error;

/// Whether anything (file, directory, socket) exists at `path`.
/// Broken symlinks count as absent.
pub fn exists(path: &Path) -> bool {
    return path.exists();
}

/// Read a text file into its lines, without trailing newline characters.
/// Invalid UTF-8 is replaced rather than rejected, since diagnostics may quote arbitrary bytes.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read.
pub fn read_lines(path: &Path) -> Result<Vec<String>, Error> {
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    return Ok(content.lines().map(String::from).collect());
}

/// Split a path into its containing directory and final segment.
/// A bare name has an empty directory; a root path has an empty name.
pub fn split(path: &Path) -> (PathBuf, String) {
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let name = path
        .file_name()
        .map(|n| return n.to_string_lossy().into_owned())
        .unwrap_or_default();
    return (dir, name);
}
