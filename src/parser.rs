//! Parsing of bacon's locations file, one diagnostic per line.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::Error;
use crate::paths;
use crate::types::{Location, Platform};

/// `<category> <path>:<line>:<column> <message>` with a colon-free path.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static UNIX_LINE: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^(\S*)\s+([^:\s][^:]*):(\d+):(\d+)\s*(.*)$").expect("valid regex");
});

/// Same shape, but the path may open with a drive letter whose colon is not a separator.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static WINDOWS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^(\S*)\s+((?:[A-Za-z]:)?[^:\s][^:]*):(\d+):(\d+)\s*(.*)$")
        .expect("valid regex");
});

/// Read a locations file and parse every line that looks like a location.
/// Relative paths resolve against `base_dir`, normally the file's own directory.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read.
pub fn parse_file(path: &Path, base_dir: &Path, platform: Platform) -> Result<Vec<Location>, Error> {
    let lines = paths::read_lines(path)?;
    let locations: Vec<Location> = lines
        .iter()
        .filter_map(|line| return parse_line(line, base_dir, platform))
        .collect();
    tracing::debug!(
        path = %path.display(),
        lines = lines.len(),
        locations = locations.len(),
        "locations parsed"
    );
    return Ok(locations);
}

/// Parse one line. Anything that is not a location (blank lines, headers,
/// an empty category, a zero line or column) yields `None` and is skipped.
pub fn parse_line(raw: &str, base_dir: &Path, platform: Platform) -> Option<Location> {
    let normalized;
    let (line, pattern) = match platform {
        Platform::Unix => (raw, &*UNIX_LINE),
        Platform::Windows => {
            normalized = raw.replace('\\', "/");
            (normalized.as_str(), &*WINDOWS_LINE)
        },
    };
    let cap = pattern.captures(line)?;
    return location_from_capture(&cap, base_dir, platform);
}

/// Build a `Location` from a matched line, validating the numeric fields.
fn location_from_capture(cap: &Captures<'_>, base_dir: &Path, platform: Platform) -> Option<Location> {
    let category = cap.get(1)?.as_str();
    if category.is_empty() {
        return None;
    }
    let raw_path = cap.get(2)?.as_str().trim_end();
    let line: u32 = cap.get(3)?.as_str().parse().ok().filter(|n| return *n > 0)?;
    let column: u32 = cap.get(4)?.as_str().parse().ok().filter(|n| return *n > 0)?;
    let text = cap.get(5).map_or("", |m| return m.as_str());

    return Some(Location {
        category: category.to_string(),
        column,
        filename: resolve_path(raw_path, base_dir, platform),
        line,
        text: text.to_string(),
    });
}

/// Keep absolute paths, anchor relative ones on the locations file's directory.
fn resolve_path(raw: &str, base_dir: &Path, platform: Platform) -> PathBuf {
    let is_absolute = raw.starts_with('/') || (platform == Platform::Windows && has_drive_letter(raw));
    if is_absolute {
        return PathBuf::from(raw);
    }
    return base_dir.join(raw);
}

/// `C:` style prefix.
fn has_drive_letter(raw: &str) -> bool {
    let mut chars = raw.chars();
    return chars.next().is_some_and(|c| return c.is_ascii_alphabetic()) && chars.next() == Some(':');
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "test code")]
mod tests {
    use super::*;

    fn unix(raw: &str) -> Option<Location> {
        return parse_line(raw, Path::new("/proj/out"), Platform::Unix);
    }

    #[test]
    fn parses_relative_path_against_base_dir() {
        let loc = unix("error src/x.rs:10:2 bad thing").unwrap();
        assert_eq!(loc.category, "error");
        assert_eq!(loc.filename, PathBuf::from("/proj/out/src/x.rs"));
        assert_eq!(loc.line, 10);
        assert_eq!(loc.column, 2);
        assert_eq!(loc.text, "bad thing");
    }

    #[test]
    fn keeps_absolute_path() {
        let loc = unix("warning /abs/lib.rs:61:15 the faucet is leaking").unwrap();
        assert_eq!(loc.filename, PathBuf::from("/abs/lib.rs"));
        assert_eq!(loc.text, "the faucet is leaking");
    }

    #[test]
    fn message_defaults_to_empty() {
        let loc = unix("error src/main.rs:1:1").unwrap();
        assert_eq!(loc.text, "");
    }

    #[test]
    fn message_may_contain_colons() {
        let loc = unix("error src/main.rs:3:4 expected `a::B`, found `c::D`").unwrap();
        assert_eq!(loc.text, "expected `a::B`, found `c::D`");
    }

    #[test]
    fn rejects_non_location_lines() {
        assert!(unix("").is_none());
        assert!(unix("just some text").is_none());
        assert!(unix("error src/main.rs:x:1 nope").is_none());
        assert!(unix("error src/main.rs:0:1 zero line").is_none());
        assert!(unix("error src/main.rs:1:0 zero column").is_none());
    }

    #[test]
    fn rejects_empty_category() {
        assert!(unix(" src/main.rs:1:2 no category").is_none());
    }

    #[test]
    fn windows_drive_letter_is_not_a_separator() {
        let loc = parse_line(
            r"error C:\work\proj\src\lib.rs:7:3 oops",
            Path::new("C:/work/proj"),
            Platform::Windows,
        )
        .unwrap();
        assert_eq!(loc.filename, PathBuf::from("C:/work/proj/src/lib.rs"));
        assert_eq!(loc.line, 7);
        assert_eq!(loc.column, 3);
        assert_eq!(loc.text, "oops");
    }

    #[test]
    fn windows_relative_path_uses_forward_slashes() {
        let loc = parse_line(r"warning src\lib.rs:2:9", Path::new("/proj"), Platform::Windows).unwrap();
        assert_eq!(loc.filename, PathBuf::from("/proj/src/lib.rs"));
    }

    #[test]
    fn drive_letter_is_a_separator_on_unix() {
        assert!(unix(r"error C:\x.rs:1:2 oops").is_none());
    }

    #[test]
    fn display_reparses_to_equal_location() {
        for raw in ["error /a/b.rs:3:4 msg with: colons", "warning /c.rs:1:1", "test-fail /d e/f.rs:9:12 x"] {
            let loc = unix(raw).unwrap();
            assert_eq!(loc.to_string(), raw);
            assert_eq!(unix(&loc.to_string()).unwrap(), loc);
        }
    }

    #[test]
    fn parse_file_skips_noise_and_keeps_order() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".bacon-locations");
        std::fs::write(
            &path,
            "error src/b.rs:2:1 second file first\n\nsummary: 2 errors\nwarning src/a.rs:1:1\n",
        )
        .unwrap();

        let locations = parse_file(&path, tmp.path(), Platform::Unix).unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations.first().unwrap().filename, tmp.path().join("src/b.rs"));
        assert_eq!(locations.get(1).unwrap().category, "warning");
    }
}
