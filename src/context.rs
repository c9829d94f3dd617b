//! Session state shared by every operation, and the reload pipeline.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Error;
use crate::ignore::{GitIgnoreEvaluator, IgnoreEvaluator, NullIgnoreEvaluator};
use crate::parser;
use crate::resolver::{self, AmbiguityWarning};
use crate::root;
use crate::store::LocationStore;

/// Everything that lives for one host session: configuration, the two
/// single-entry resolution caches, and the loaded locations.
/// Operations take it by `&mut`, so only one runs at a time.
pub struct Context {
    /// Effective configuration.
    pub config: Config,
    /// Working directory every search starts from.
    cwd: PathBuf,
    /// Ignore rule evaluator used by recursive searches.
    evaluator: Box<dyn IgnoreEvaluator>,
    /// Last resolved locations file. Trusted only while it still exists.
    pub(crate) locations_cache: Option<PathBuf>,
    /// Last resolved socket directory. Trusted only while it still holds the marker.
    pub(crate) socket_cache: Option<PathBuf>,
    /// Loaded locations and the navigation cursor.
    pub store: LocationStore,
}

/// Outcome of a successful reload.
#[derive(Debug)]
pub struct LoadReport {
    /// Locations file that was read.
    pub file: PathBuf,
    /// Non-fatal notice that another candidate file could have been chosen.
    pub warning: Option<AmbiguityWarning>,
}

impl Context {
    /// Build a context for `cwd` with an explicit config and evaluator.
    pub fn new(cwd: PathBuf, config: Config, evaluator: Box<dyn IgnoreEvaluator>) -> Self {
        return Self {
            config,
            cwd,
            evaluator,
            locations_cache: None,
            socket_cache: None,
            store: LocationStore::new(),
        };
    }

    /// Build a context for `cwd`, reading `.bacon-nav.toml` from the project
    /// root. Git decides ignore rules unless the config turns them off.
    ///
    /// # Errors
    ///
    /// Returns config loading errors.
    pub fn open(cwd: PathBuf) -> Result<Self, Error> {
        let config = Config::load(&root::find_project_root(&cwd))?;
        let evaluator: Box<dyn IgnoreEvaluator> = if config.git_ignore {
            Box::new(GitIgnoreEvaluator::new(config.git_command.clone()))
        } else {
            Box::new(NullIgnoreEvaluator)
        };
        return Ok(Self::new(cwd, config, evaluator));
    }

    /// Working directory the session was opened in.
    pub fn cwd(&self) -> &Path {
        return &self.cwd;
    }

    /// Ignore evaluator for recursive searches.
    pub fn evaluator(&self) -> &dyn IgnoreEvaluator {
        return self.evaluator.as_ref();
    }

    /// Re-resolve the locations file, parse it, and hand the result to the
    /// store, which keeps the previous selection when it still exists.
    ///
    /// # Errors
    ///
    /// Returns `Error::LocationsNotFound` if no file can be found,
    /// or `Error::Io` if it cannot be read.
    pub fn load_locations(&mut self) -> Result<LoadReport, Error> {
        let resolution = resolver::resolve(self)?;
        let locations = parser::parse_file(&resolution.file, &resolution.base_dir, self.config.platform)?;
        self.store.reload(locations);
        return Ok(LoadReport {
            file: resolution.file,
            warning: resolution.warning,
        });
    }

    /// Project root for searches started from the working directory.
    pub fn project_root(&self) -> PathBuf {
        return root::find_project_root(&self.cwd);
    }
}
