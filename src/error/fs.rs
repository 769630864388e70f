//! File system errors

use std::path::Path;

use super::WebfsError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> WebfsError {
    WebfsError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> WebfsError {
    WebfsError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a directory creation failed error
pub fn create_dir_failed(path: impl Into<String>, reason: impl Into<String>) -> WebfsError {
    WebfsError::DirectoryCreateFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub(crate) fn read_error(path: &Path, e: &std::io::Error) -> WebfsError {
    read_failed(path.display().to_string(), e.to_string())
}

pub(crate) fn write_error(path: &Path, e: &std::io::Error) -> WebfsError {
    write_failed(path.display().to_string(), e.to_string())
}
