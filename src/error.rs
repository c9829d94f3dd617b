/// Crate-level error types for bacon-nav diagnostics.
use std::path::PathBuf;

/// Every failure names the file, directory, or candidates involved so the
/// rendered message is actionable without a debugger.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// More than one control socket was found and none can be preferred.
    #[error(
        "ambiguous socket: {} candidates found: {}",
        candidates.len(),
        candidates.iter().map(|p| return p.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    AmbiguousSocket {
        /// Every directory holding a socket marker, in search order.
        candidates: Vec<PathBuf>,
    },

    /// The config file parsed but holds a value we cannot use.
    #[error("invalid config {}: {reason}", path.display())]
    ConfigInvalid {
        /// Path to the offending config file.
        path: PathBuf,
        /// Description of the invalid value.
        reason: String,
    },

    /// Underlying I/O error from the filesystem or a spawned process.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of command output failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// Neither the downward nor the upward search found a locations file.
    #[error("no {file_name} file found from {}", searched_from.display())]
    LocationsNotFound {
        /// Name of the locations file that was searched for.
        file_name: String,
        /// Working directory the search started from.
        searched_from: PathBuf,
    },

    /// The remote command sender exited with a failure status.
    #[error("sending `{action}` failed: {detail}")]
    SendFailed {
        /// Action string passed to the external client.
        action: String,
        /// Trimmed stdout and stderr of the failing process.
        detail: String,
    },

    /// No control socket exists anywhere under the project root.
    #[error("no {file_name} found under {}", root.display())]
    SocketNotFound {
        /// Name of the socket marker file.
        file_name: String,
        /// Project root the search started from.
        root: PathBuf,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}

impl Error {
    /// Whether this failure is an expected "nothing to act on" outcome
    /// rather than a runtime fault. Drives the process exit code.
    pub const fn is_resolution_failure(&self) -> bool {
        return matches!(
            self,
            Self::AmbiguousSocket { .. }
                | Self::LocationsNotFound { .. }
                | Self::SendFailed { .. }
                | Self::SocketNotFound { .. }
        );
    }
}
