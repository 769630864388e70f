//! Configuration handling for webfs
//!
//! `webfs.yaml` names the source and destination directories and the files
//! to compress:
//!
//! ```yaml
//! source: frontend
//! dest: data
//! compress:
//!   - js/app.js
//!   - css/uPlot.min.css
//! ```
//!
//! Every key is optional. Built-in defaults apply first, then the file, then
//! command-line flags and their environment variables. Relative directories
//! in the file are resolved against the file's own directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, config as config_error};
use crate::path_utils;
use crate::policy::PolicySet;

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "webfs.yaml";

/// Web asset source directory
pub const DEFAULT_SOURCE_DIR: &str = "frontend";

/// Filesystem image staging directory
pub const DEFAULT_DEST_DIR: &str = "data";

/// Assets served gzip-encoded by the firmware web server
pub const DEFAULT_COMPRESS: &[&str] = &[
    "css/bootstrap-5.2.3.min.css",
    "css/fontawesome-6.2.1.min.css",
    "css/uPlot.min.css",
    "js/app.js",
    "js/vue.3.2.47.min.js",
    "js/bootstrap.bundle.5.2.3.min.js",
    "js/uPlot.1.6.28.min.js",
    "js/vue-number-input.min.js",
    "js/temp.js",
    "webfonts/fa-solid-900.woff2",
    "webfonts/fa-regular-400.woff2",
];

/// Resolved build configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Source directory of the web assets
    pub source: PathBuf,

    /// Destination directory of the filesystem image tree
    pub dest: PathBuf,

    /// Source-relative paths to gzip, separated by `/`
    pub compress: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE_DIR),
            dest: PathBuf::from(DEFAULT_DEST_DIR),
            compress: DEFAULT_COMPRESS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source: Option<PathBuf>,
    pub dest: Option<PathBuf>,
    /// Replaces the configured list when non-empty
    pub compress: Vec<String>,
}

impl BuildConfig {
    /// Parse configuration from a YAML string. `origin` names the document
    /// in parse errors.
    pub fn from_yaml(yaml: &str, origin: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| config_error::parse_failed(origin, e.to_string()))
    }

    /// Load a configuration file, resolving its directories against the
    /// file's parent directory
    pub fn load(path: &Path) -> Result<Self> {
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                config_error::not_found(shown.clone())
            } else {
                config_error::read_failed(shown.clone(), e.to_string())
            }
        })?;

        let mut config = Self::from_yaml(&content, &shown)?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.source = rebase(base, &config.source);
            config.dest = rebase(base, &config.dest);
        }
        tracing::debug!(path = %shown, "loaded configuration");
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Without one, `webfs.yaml` in `cwd` is used
    /// when present, and the built-in defaults otherwise.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let implicit = cwd.join(DEFAULT_CONFIG_FILE);
        if implicit.is_file() {
            Self::load(&implicit)
        } else {
            tracing::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply command-line values on top of this configuration
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(source) = overrides.source {
            self.source = source;
        }
        if let Some(dest) = overrides.dest {
            self.dest = dest;
        }
        if !overrides.compress.is_empty() {
            self.compress = overrides.compress;
        }
        self
    }

    /// Check that every compress entry can match a source-relative path
    pub fn validate(&self) -> Result<()> {
        for entry in &self.compress {
            if !path_utils::is_clean_relative(entry) {
                return Err(config_error::invalid(format!(
                    "compress entry '{entry}' must be a '/'-separated path relative to the source directory"
                )));
            }
        }
        if self.source.as_os_str().is_empty() {
            return Err(config_error::invalid("source directory must not be empty"));
        }
        if self.dest.as_os_str().is_empty() {
            return Err(config_error::invalid("dest directory must not be empty"));
        }
        Ok(())
    }

    /// Compression policy built from the configured entries
    pub fn policy(&self) -> PolicySet {
        PolicySet::from_entries(self.compress.iter().cloned())
    }
}

fn rebase(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
