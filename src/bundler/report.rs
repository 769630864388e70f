//! Run report returned by [`super::Bundler::run`]

use serde::Serialize;

/// What the bundler does with a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Compress,
    Copy,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Compress => "compress",
            Action::Copy => "copy",
        }
    }
}

/// A file that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    /// Source-relative path, or the traversal path when no relative path exists
    pub path: String,
    /// Intended action; `None` for traversal errors
    pub action: Option<Action>,
    pub reason: String,
}

/// Outcome of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub compressed: usize,
    pub copied: usize,
    pub failed: usize,
    pub failures: Vec<FailedFile>,
    /// Configured compress entries never found in the source tree
    pub missing: Vec<String>,
    pub dry_run: bool,
}

impl RunReport {
    pub(crate) fn record_success(&mut self, action: Action) {
        match action {
            Action::Compress => self.compressed += 1,
            Action::Copy => self.copied += 1,
        }
    }

    pub(crate) fn record_failure(&mut self, failure: FailedFile) {
        self.failed += 1;
        self.failures.push(failure);
    }

    /// Total number of files written (or planned, in a dry run)
    pub fn processed(&self) -> usize {
        self.compressed + self.copied
    }

    /// No failures and no missing policy entries
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.missing.is_empty()
    }
}
