//! Locating the locations file bacon writes.
//!
//! A working tree can hold several sub-projects, each with its own bacon
//! output. Resolution order: a still-valid cached path, then a downward
//! search from the project root that prefers files sitting next to a live
//! socket, then an upward walk from the working directory.

use std::path::{Path, PathBuf};

use crate::context::Context;
use crate::error::Error;
use crate::ignore::IgnoreFilter;
use crate::paths;
use crate::search;

/// Several candidate files matched and one was picked by search order.
/// Not an error: the caller shows it and carries on with `selected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguityWarning {
    /// Every file that was equally eligible, in search order.
    pub candidates: Vec<PathBuf>,
    /// The file that was chosen (always the first candidate).
    pub selected: PathBuf,
    /// Whether the candidates all had a socket beside them.
    pub socket_backed: bool,
}

/// A resolved locations file.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Directory relative diagnostic paths resolve against.
    pub base_dir: PathBuf,
    /// Path of the locations file.
    pub file: PathBuf,
    /// Present when the choice among several files was arbitrary.
    pub warning: Option<AmbiguityWarning>,
}

impl Resolution {
    /// Derive the base directory from the file's location.
    fn new(file: PathBuf, warning: Option<AmbiguityWarning>) -> Self {
        let (base_dir, _) = paths::split(&file);
        return Self { base_dir, file, warning };
    }
}

/// Find the locations file for this session. Idempotent: repeated calls
/// return the cached path for as long as that file exists.
///
/// # Errors
///
/// Returns `Error::LocationsNotFound` if neither search finds a file.
pub fn resolve(ctx: &mut Context) -> Result<Resolution, Error> {
    if let Some(cached) = ctx.locations_cache.as_ref().filter(|p| return paths::exists(p)) {
        tracing::debug!(file = %cached.display(), "locations cache hit");
        return Ok(Resolution::new(cached.clone(), None));
    }
    ctx.locations_cache = None;

    let file_name = ctx.config.locations_file.clone();
    let root = ctx.project_root();
    let filter = IgnoreFilter::new(ctx.evaluator(), &root);
    let matches = search::find_all(&root, &file_name, &filter);

    let selected = match choose_candidate(matches, &ctx.config.socket_file) {
        Some(choice) => choice,
        None => match search_upward(ctx.cwd(), &file_name) {
            Some(file) => (file, None),
            None => {
                return Err(Error::LocationsNotFound {
                    file_name,
                    searched_from: ctx.cwd().to_path_buf(),
                });
            },
        },
    };

    let (file, warning) = selected;
    if let Some(w) = &warning {
        tracing::debug!(selected = %w.selected.display(), candidates = w.candidates.len(), "several locations files");
    }
    ctx.locations_cache = Some(file.clone());
    return Ok(Resolution::new(file, warning));
}

/// Pick one of the downward matches. A file beside a socket belongs to a
/// running bacon and wins; ties fall back to the first in search order.
fn choose_candidate(
    matches: Vec<PathBuf>,
    socket_file: &str,
) -> Option<(PathBuf, Option<AmbiguityWarning>)> {
    let with_socket: Vec<PathBuf> = matches
        .iter()
        .filter(|file| return has_socket_sibling(file, socket_file))
        .cloned()
        .collect();

    let (pool, socket_backed) = if with_socket.is_empty() {
        (matches, false)
    } else {
        (with_socket, true)
    };

    let first = pool.first()?.clone();
    if pool.len() == 1 {
        return Some((first, None));
    }
    let warning = AmbiguityWarning {
        candidates: pool,
        selected: first.clone(),
        socket_backed,
    };
    return Some((first, Some(warning)));
}

/// Whether the directory containing `file` also holds a socket marker.
fn has_socket_sibling(file: &Path, socket_file: &str) -> bool {
    return file
        .parent()
        .is_some_and(|dir| return paths::exists(&dir.join(socket_file)));
}

/// Test `cwd` and each of its ancestors for the file; nearest wins.
fn search_upward(cwd: &Path, file_name: &str) -> Option<PathBuf> {
    return cwd
        .ancestors()
        .map(|dir| return dir.join(file_name))
        .find(|candidate| return paths::exists(candidate));
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "test code")]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ignore::NullIgnoreEvaluator;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "").unwrap();
    }

    /// A temporary project root (it has a `.git`) and a context opened in it.
    fn project() -> (tempfile::TempDir, Context) {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let ctx = Context::new(tmp.path().to_path_buf(), Config::default(), Box::new(NullIgnoreEvaluator));
        return (tmp, ctx);
    }

    #[test]
    fn socket_sibling_beats_plain_match() {
        let (tmp, mut ctx) = project();
        touch(&tmp.path().join("a/.bacon-locations"));
        touch(&tmp.path().join("b/.bacon-locations"));
        touch(&tmp.path().join("b/.bacon.socket"));

        let res = resolve(&mut ctx).unwrap();
        assert_eq!(res.file, tmp.path().join("b/.bacon-locations"));
        assert_eq!(res.base_dir, tmp.path().join("b"));
        assert!(res.warning.is_none());
    }

    #[test]
    fn single_match_without_socket_is_selected() {
        let (tmp, mut ctx) = project();
        touch(&tmp.path().join("sub/.bacon-locations"));

        let res = resolve(&mut ctx).unwrap();
        assert_eq!(res.file, tmp.path().join("sub/.bacon-locations"));
        assert!(res.warning.is_none());
    }

    #[test]
    fn several_plain_matches_pick_first_and_warn() {
        let (tmp, mut ctx) = project();
        touch(&tmp.path().join("z/.bacon-locations"));
        touch(&tmp.path().join("m/.bacon-locations"));

        let res = resolve(&mut ctx).unwrap();
        assert_eq!(res.file, tmp.path().join("m/.bacon-locations"));
        let warning = res.warning.unwrap();
        assert!(!warning.socket_backed);
        assert_eq!(
            warning.candidates,
            vec![tmp.path().join("m/.bacon-locations"), tmp.path().join("z/.bacon-locations")]
        );
    }

    #[test]
    fn several_socket_matches_pick_first_and_warn() {
        let (tmp, mut ctx) = project();
        for dir in ["a", "b", "c"] {
            touch(&tmp.path().join(dir).join(".bacon-locations"));
        }
        touch(&tmp.path().join("b/.bacon.socket"));
        touch(&tmp.path().join("c/.bacon.socket"));

        let res = resolve(&mut ctx).unwrap();
        assert_eq!(res.file, tmp.path().join("b/.bacon-locations"));
        let warning = res.warning.unwrap();
        assert!(warning.socket_backed);
        assert_eq!(warning.candidates.len(), 2);
    }

    #[test]
    fn falls_back_to_upward_search() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join(".bacon-locations"));
        let nested = tmp.path().join("nested");
        std::fs::create_dir_all(nested.join(".git")).unwrap();
        let cwd = nested.join("src");
        std::fs::create_dir(&cwd).unwrap();

        let mut ctx = Context::new(cwd, Config::default(), Box::new(NullIgnoreEvaluator));
        let res = resolve(&mut ctx).unwrap();
        assert_eq!(res.file, tmp.path().join(".bacon-locations"));
        assert_eq!(res.base_dir, tmp.path());
    }

    #[test]
    fn cached_path_reused_while_it_exists() {
        let (tmp, mut ctx) = project();
        touch(&tmp.path().join("a/.bacon-locations"));
        let first = resolve(&mut ctx).unwrap();

        touch(&tmp.path().join("b/.bacon-locations"));
        touch(&tmp.path().join("b/.bacon.socket"));
        assert_eq!(resolve(&mut ctx).unwrap().file, first.file);

        std::fs::remove_file(&first.file).unwrap();
        assert_eq!(resolve(&mut ctx).unwrap().file, tmp.path().join("b/.bacon-locations"));
    }

    #[test]
    fn nothing_found_leaves_cache_empty() {
        let (_tmp, mut ctx) = project();
        let err = resolve(&mut ctx).unwrap_err();
        assert!(matches!(err, Error::LocationsNotFound { .. }));
        assert!(ctx.locations_cache.is_none());
    }

    #[test]
    fn files_inside_vcs_directory_are_never_candidates() {
        let (tmp, mut ctx) = project();
        touch(&tmp.path().join(".git/.bacon-locations"));
        touch(&tmp.path().join("real/.bacon-locations"));

        let res = resolve(&mut ctx).unwrap();
        assert_eq!(res.file, tmp.path().join("real/.bacon-locations"));
        assert!(res.warning.is_none());
    }

    #[test]
    fn git_ignored_build_output_is_skipped() {
        let git_works = std::process::Command::new("git")
            .arg("--version")
            .output()
            .is_ok_and(|o| return o.status.success());
        if !git_works {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        let status = std::process::Command::new("git")
            .arg("-C")
            .arg(tmp.path())
            .args(["init", "-q"])
            .status()
            .unwrap();
        assert!(status.success());
        std::fs::write(tmp.path().join(".gitignore"), "target/\n").unwrap();
        touch(&tmp.path().join("target/debug/.bacon-locations"));
        touch(&tmp.path().join("app/.bacon-locations"));

        let evaluator = crate::ignore::GitIgnoreEvaluator::new("git".to_string());
        let mut ctx = Context::new(tmp.path().to_path_buf(), Config::default(), Box::new(evaluator));
        let res = resolve(&mut ctx).unwrap();
        assert_eq!(res.file, tmp.path().join("app/.bacon-locations"));
        assert!(res.warning.is_none());
    }
}
