//! Project root detection.

use std::path::{Path, PathBuf};

use crate::paths;

/// Name of the version-control marker whose presence identifies a project root.
pub const VCS_MARKER: &str = ".git";

/// Walk upward from `cwd` and return the first directory holding a `.git`
/// entry (file or directory, so worktrees and submodules count).
/// Falls back to `cwd` itself when the filesystem root is reached.
pub fn find_project_root(cwd: &Path) -> PathBuf {
    let found = cwd
        .ancestors()
        .find(|dir| return paths::exists(&dir.join(VCS_MARKER)));
    return match found {
        Some(dir) => {
            tracing::debug!(root = %dir.display(), "project root found");
            dir.to_path_buf()
        },
        None => cwd.to_path_buf(),
    };
}
