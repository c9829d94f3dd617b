use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::Platform;

/// Name of the optional per-project config file.
pub const CONFIG_FILE: &str = ".bacon-nav.toml";

/// Project configuration loaded from `.bacon-nav.toml`.
/// Every key is optional; defaults match a stock bacon setup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Program used as the remote command sender.
    pub bacon_command: String,
    /// Program used for repository detection and ignore checks.
    pub git_command: String,
    /// Whether the repository's ignore rules prune the search.
    pub git_ignore: bool,
    /// File name bacon writes diagnostics to.
    pub locations_file: String,
    /// Path syntax of the locations file.
    pub platform: Platform,
    /// File name whose presence marks a listening bacon instance.
    pub socket_file: String,
}

/// Raw TOML structure for `.bacon-nav.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct BaconNavTomlConfig {
    /// Override for `Config::bacon_command`.
    bacon_command: Option<String>,
    /// Override for `Config::git_command`.
    git_command: Option<String>,
    /// Override for `Config::git_ignore`.
    git_ignore: Option<bool>,
    /// Override for `Config::locations_file`.
    locations_file: Option<String>,
    /// Override for `Config::platform`.
    platform: Option<Platform>,
    /// Override for `Config::socket_file`.
    socket_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            bacon_command: "bacon".to_string(),
            git_command: "git".to_string(),
            git_ignore: true,
            locations_file: ".bacon-locations".to_string(),
            platform: Platform::current(),
            socket_file: ".bacon.socket".to_string(),
        };
    }
}

impl Config {
    /// Load config from `.bacon-nav.toml` in the given root directory.
    /// Returns defaults if the file doesn't exist. A file that exists but is
    /// malformed is an error; it never silently falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::TomlDe` if the TOML is malformed,
    /// or `Error::ConfigInvalid` if a file name is empty or contains a separator.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let raw: BaconNavTomlConfig = toml::from_str(&content)?;
        let defaults = Self::default();
        let config = Self {
            bacon_command: raw.bacon_command.unwrap_or(defaults.bacon_command),
            git_command: raw.git_command.unwrap_or(defaults.git_command),
            git_ignore: raw.git_ignore.unwrap_or(defaults.git_ignore),
            locations_file: raw.locations_file.unwrap_or(defaults.locations_file),
            platform: raw.platform.unwrap_or(defaults.platform),
            socket_file: raw.socket_file.unwrap_or(defaults.socket_file),
        };
        validate_file_name(&path, "locations_file", &config.locations_file)?;
        validate_file_name(&path, "socket_file", &config.socket_file)?;
        tracing::debug!(path = %path.display(), "config loaded");
        return Ok(config);
    }
}

/// Marker names are joined onto directories, so they must be a single non-empty segment.
///
/// # Errors
///
/// Returns `Error::ConfigInvalid` naming the offending key.
fn validate_file_name(path: &Path, key: &str, value: &str) -> Result<(), Error> {
    if value.is_empty() || value.contains(['/', '\\']) {
        return Err(Error::ConfigInvalid {
            path: PathBuf::from(path),
            reason: format!("`{key}` must be a plain file name, got `{value}`"),
        });
    }
    return Ok(());
}
