//! Ignore rules for the recursive search.
//!
//! The repository's own ignore evaluator is authoritative. When it cannot be
//! consulted (no git binary, not a repository, unexpected status) the path is
//! treated as not ignored so a missing tool never hides a file.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::root::VCS_MARKER;

/// Capability to answer ignore questions about paths under a search root.
pub trait IgnoreEvaluator {
    /// Whether `root` lies inside a version-controlled working tree.
    fn in_repo(&self, root: &Path) -> bool;

    /// Whether `path` is excluded by the repository's ignore rules.
    /// Only consulted after `in_repo` returned true for the same search.
    fn is_ignored(&self, root: &Path, path: &Path) -> bool;
}

/// Evaluator backed by `git rev-parse` and `git check-ignore`.
#[derive(Debug, Clone)]
pub struct GitIgnoreEvaluator {
    /// Program name or path used to invoke git.
    git: String,
}

impl GitIgnoreEvaluator {
    /// Use the given git executable.
    pub const fn new(git: String) -> Self {
        return Self { git };
    }
}

impl IgnoreEvaluator for GitIgnoreEvaluator {
    fn in_repo(&self, root: &Path) -> bool {
        let output = Command::new(&self.git)
            .arg("-C")
            .arg(root)
            .args(["rev-parse", "--is-inside-work-tree"])
            .output();
        return match output {
            Ok(o) => o.status.success() && String::from_utf8_lossy(&o.stdout).trim() == "true",
            Err(e) => {
                tracing::debug!(error = %e, "git unavailable, ignore rules disabled");
                false
            },
        };
    }

    fn is_ignored(&self, root: &Path, path: &Path) -> bool {
        let status = Command::new(&self.git)
            .arg("-C")
            .arg(root)
            .args(["check-ignore", "-q"])
            .arg(path)
            .status();
        return match status.map(|s| return s.code()) {
            Ok(Some(0)) => true,
            Ok(Some(1)) => false,
            Ok(code) => {
                tracing::debug!(path = %path.display(), ?code, "check-ignore inconclusive, not ignoring");
                false
            },
            Err(e) => {
                tracing::debug!(error = %e, "check-ignore failed to run, not ignoring");
                false
            },
        };
    }
}

/// Evaluator that never reports a repository, so nothing is ever VCS-ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullIgnoreEvaluator;

impl IgnoreEvaluator for NullIgnoreEvaluator {
    fn in_repo(&self, _root: &Path) -> bool {
        return false;
    }

    fn is_ignored(&self, _root: &Path, _path: &Path) -> bool {
        return false;
    }
}

/// Per-search ignore filter. The repository probe runs once at construction.
pub struct IgnoreFilter<'a> {
    /// Evaluator consulted for non-internal paths.
    evaluator: &'a dyn IgnoreEvaluator,
    /// Cached result of the repository probe for `root`.
    in_repo: bool,
    /// Root of the search this filter serves.
    root: PathBuf,
}

impl<'a> IgnoreFilter<'a> {
    /// Probe `root` once and build a filter for one search.
    pub fn new(evaluator: &'a dyn IgnoreEvaluator, root: &Path) -> Self {
        let in_repo = evaluator.in_repo(root);
        tracing::debug!(root = %root.display(), in_repo, "ignore filter ready");
        return Self {
            evaluator,
            in_repo,
            root: root.to_path_buf(),
        };
    }

    /// Whether the search root is inside a repository.
    pub const fn in_repo(&self) -> bool {
        return self.in_repo;
    }

    /// The VCS-internal directory is always ignored; anything else defers to
    /// the evaluator, and only inside a repository.
    pub fn is_ignored(&self, path: &Path) -> bool {
        if path.file_name().is_some_and(|n| return n == VCS_MARKER) {
            return true;
        }
        if !self.in_repo {
            return false;
        }
        return self.evaluator.is_ignored(&self.root, path);
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "test code")]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Pretends to be a repository that ignores every `target` directory.
    struct IgnoresTarget {
        /// Number of times the repository probe ran.
        probes: Cell<u32>,
    }

    impl IgnoreEvaluator for IgnoresTarget {
        fn in_repo(&self, _root: &Path) -> bool {
            self.probes.set(self.probes.get().saturating_add(1));
            return true;
        }

        fn is_ignored(&self, _root: &Path, path: &Path) -> bool {
            return path.file_name().is_some_and(|n| return n == "target");
        }
    }

    #[test]
    fn vcs_directory_ignored_without_evaluator() {
        let filter = IgnoreFilter::new(&NullIgnoreEvaluator, Path::new("/proj"));
        assert!(!filter.in_repo());
        assert!(filter.is_ignored(Path::new("/proj/.git")));
        assert!(filter.is_ignored(Path::new("/proj/sub/.git")));
        assert!(!filter.is_ignored(Path::new("/proj/target")));
    }

    #[test]
    fn evaluator_consulted_inside_repo() {
        let evaluator = IgnoresTarget { probes: Cell::new(0) };
        let filter = IgnoreFilter::new(&evaluator, Path::new("/proj"));
        assert!(filter.is_ignored(Path::new("/proj/target")));
        assert!(!filter.is_ignored(Path::new("/proj/src")));
        assert!(!filter.is_ignored(Path::new("/proj/crates/a")));
        assert_eq!(evaluator.probes.get(), 1);
    }

    #[test]
    fn missing_git_binary_fails_open() {
        let tmp = tempfile::tempdir().unwrap();
        let evaluator = GitIgnoreEvaluator::new("definitely-not-a-git-binary".to_string());
        assert!(!evaluator.in_repo(tmp.path()));
        assert!(!evaluator.is_ignored(tmp.path(), &tmp.path().join("target")));
    }

    /// Whether a working `git` is on the PATH.
    fn git_available() -> bool {
        return Command::new("git").arg("--version").output().is_ok_and(|o| return o.status.success());
    }

    /// A fresh repository ignoring `target/`, with `target` and `src` present.
    fn repo_ignoring_target() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let status = Command::new("git").arg("-C").arg(tmp.path()).args(["init", "-q"]).status().unwrap();
        assert!(status.success());
        std::fs::write(tmp.path().join(".gitignore"), "target/\n").unwrap();
        std::fs::create_dir_all(tmp.path().join("target/debug")).unwrap();
        std::fs::create_dir_all(tmp.path().join("src")).unwrap();
        return tmp;
    }

    #[test]
    fn git_evaluator_follows_gitignore() {
        if !git_available() {
            return;
        }
        let tmp = repo_ignoring_target();
        let evaluator = GitIgnoreEvaluator::new("git".to_string());
        let filter = IgnoreFilter::new(&evaluator, tmp.path());
        assert!(filter.in_repo());
        assert!(filter.is_ignored(&tmp.path().join("target")));
        assert!(!filter.is_ignored(&tmp.path().join("src")));
    }

    #[test]
    fn git_evaluator_outside_repo_ignores_nothing() {
        if !git_available() {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("target")).unwrap();
        let evaluator = GitIgnoreEvaluator::new("git".to_string());
        assert!(!evaluator.in_repo(tmp.path()));
        // check-ignore exits 128 here; an inconclusive answer means not ignored.
        assert!(!evaluator.is_ignored(tmp.path(), &tmp.path().join("target")));
    }
}
