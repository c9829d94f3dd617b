/// Core domain types: diagnostic locations, platform path syntax, navigation direction.
use std::fmt;
use std::path::PathBuf;

/// Direction of a relative navigation step through the location list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Move to the following entry, wrapping to the first.
    Next,
    /// Move to the preceding entry, wrapping to the last.
    Previous,
}

/// One diagnostic entry parsed from the locations file.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Location {
    /// Free-form kind token such as `error` or `warning`. Never empty.
    pub category: String,
    /// One-based column number.
    pub column: u32,
    /// Absolute path of the referenced source file.
    pub filename: PathBuf,
    /// One-based line number.
    pub line: u32,
    /// Diagnostic message, possibly empty.
    pub text: String,
}

impl Location {
    /// Two locations point at the same place when file, line and column agree.
    /// Category and message are ignored so a reworded diagnostic keeps its selection.
    pub fn same_position(&self, other: &Self) -> bool {
        return self.filename == other.filename
            && self.line == other.line
            && self.column == other.column;
    }

    /// Render as a vim `errorformat`-compatible line for a host diagnostics list.
    pub fn quickfix_line(&self) -> String {
        return format!(
            "{}:{}:{}: {}: {}",
            self.filename.display(),
            self.line,
            self.column,
            self.category,
            self.text
        );
    }
}

impl fmt::Display for Location {
    /// Same shape as a locations file line, so parsing the output yields an equal record.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{}:{}",
            self.category,
            self.filename.display(),
            self.line,
            self.column
        )?;
        if !self.text.is_empty() {
            write!(f, " {}", self.text)?;
        }
        return Ok(());
    }
}

/// Path syntax used by the producer of the locations file.
/// Chosen once at startup, never sniffed per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Forward-slash paths, no drive letters.
    Unix,
    /// Backslash or forward-slash paths that may start with a drive letter.
    Windows,
}

impl Platform {
    /// The path syntax of the platform this binary was built for.
    pub const fn current() -> Self {
        if cfg!(windows) {
            return Self::Windows;
        }
        return Self::Unix;
    }
}
