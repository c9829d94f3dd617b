//! Depth-first search for every occurrence of a file name under a root.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::ignore::IgnoreFilter;
use crate::paths;

/// Collect every `dir/file_name` that exists under `root`, in depth-first
/// pre-order. Each directory is tested before its children; siblings are
/// visited in file-name order so the first result is reproducible.
///
/// Hidden directories and directories the filter ignores are never entered.
/// The root itself is always searched. Unreadable directories are skipped.
pub fn find_all(root: &Path, file_name: &str, filter: &IgnoreFilter<'_>) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| return e.depth() == 0 || is_searchable_dir(e, filter))
        .filter_map(Result::ok)
    {
        let candidate = entry.path().join(file_name);
        if paths::exists(&candidate) {
            found.push(candidate);
        }
    }

    tracing::debug!(
        root = %root.display(),
        file_name,
        in_repo = filter.in_repo(),
        matches = found.len(),
        "search done"
    );
    return found;
}

/// A child worth descending into: a real directory, not hidden, not ignored.
fn is_searchable_dir(entry: &DirEntry, filter: &IgnoreFilter<'_>) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    if entry.file_name().to_string_lossy().starts_with('.') {
        return false;
    }
    return !filter.is_ignored(entry.path());
}
