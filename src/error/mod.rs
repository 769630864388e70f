//! Error types and handling for webfs
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostic codes
//! and help texts.
//!
//! Errors fall into three groups:
//! - fatal preconditions (source root missing or unreadable, destination root
//!   not creatable), which end the run
//! - per-file errors, which the bundler records in the run report and never
//!   propagates
//! - configuration errors, raised before a run starts
//!
//! Sub-modules hold convenience constructors:
//! - [`fs`]: file system errors
//! - [`config`]: configuration errors

pub mod config;
pub mod fs;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for webfs operations
#[derive(Error, Diagnostic, Debug)]
pub enum WebfsError {
    // Precondition errors
    #[error("Source directory not found: {path}")]
    #[diagnostic(
        code(webfs::source::not_found),
        help("Pass --source or set `source` in webfs.yaml to the web asset directory")
    )]
    SourceRootNotFound { path: String },

    #[error("Source path is not a directory: {path}")]
    #[diagnostic(code(webfs::source::not_directory))]
    SourceRootNotDirectory { path: String },

    #[error("Source directory is not readable: {path}: {reason}")]
    #[diagnostic(code(webfs::source::unreadable))]
    SourceRootUnreadable { path: String, reason: String },

    #[error("Cannot create destination directory: {path}: {reason}")]
    #[diagnostic(
        code(webfs::dest::unwritable),
        help("Check that the destination is on a writable file system with free space")
    )]
    DestinationUnwritable { path: String, reason: String },

    #[error("Destination {dest} overlaps source {source_root}")]
    #[diagnostic(
        code(webfs::dest::overlaps_source),
        help("The source tree is never modified; choose a destination outside of it")
    )]
    DestinationOverlapsSource { source_root: String, dest: String },

    // Per-file errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(webfs::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(webfs::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to create directory: {path}: {reason}")]
    #[diagnostic(code(webfs::fs::create_dir_failed))]
    DirectoryCreateFailed { path: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(webfs::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(webfs::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(webfs::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(webfs::config::invalid),
        help("Compress entries are paths relative to the source directory, separated by '/'")
    )]
    ConfigInvalid { message: String },

    // Run outcome
    #[error("Build incomplete: {failed} file(s) failed, {missing} configured file(s) missing")]
    #[diagnostic(
        code(webfs::build::incomplete),
        help("Drop --strict to treat failures and missing files as warnings")
    )]
    BuildIncomplete { failed: usize, missing: usize },

    #[error("IO error: {message}")]
    #[diagnostic(code(webfs::fs::io_error))]
    IoError { message: String },
}

impl From<serde_json::Error> for WebfsError {
    fn from(err: serde_json::Error) -> Self {
        WebfsError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, WebfsError>;
