//! Asset bundler
//!
//! Mirrors a source tree of web assets into a destination tree. Files named
//! by the [`PolicySet`] are written gzip-compressed as `<path>.gz`; every
//! other file is copied unchanged. After the walk, policy entries that never
//! showed up are reported as missing.
//!
//! A run is a full rebuild: existing outputs are overwritten, stale outputs
//! are left alone. Errors on a single file are recorded in the
//! [`RunReport`] and the run continues; only an unusable source or
//! destination root ends it early.
//!
//! ## Module Organization
//!
//! - `walk`: source tree traversal
//! - `ops`: per-file compress and copy
//! - `report`: run results

mod ops;
mod report;
mod walk;


use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, WebfsError};
use crate::path_utils;
use crate::policy::{FoundSet, PolicySet};
use crate::ui::RunReporter;

pub use report::{Action, FailedFile, RunReport};

use walk::{FileRecord, WalkItem};

/// Suffix appended to compressed outputs
pub const GZIP_SUFFIX: &str = ".gz";

/// Transforms a source tree into a destination tree according to a policy
#[derive(Debug, Clone)]
pub struct Bundler {
    source_root: PathBuf,
    dest_root: PathBuf,
    policy: PolicySet,
    dry_run: bool,
}

impl Bundler {
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>, policy: PolicySet) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            policy,
            dry_run: false,
        }
    }

    /// Classify and report without creating or writing anything
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn policy(&self) -> &PolicySet {
        &self.policy
    }

    /// Process the whole source tree.
    ///
    /// Fails only when the source root is unusable, the destination root
    /// cannot be created, or the two overlap. Per-file failures end up in the
    /// returned report.
    pub fn run(&self, reporter: &mut dyn RunReporter) -> Result<RunReport> {
        let source_root = self.check_source_root()?;
        let dest_root = self.prepare_dest_root(&source_root)?;

        tracing::debug!(
            source = %source_root.display(),
            dest = %dest_root.display(),
            policy_entries = self.policy.len(),
            dry_run = self.dry_run,
            "starting run"
        );

        let items: Vec<WalkItem> = walk::walk(&source_root).collect();
        Ok(self.process_items(items, &dest_root, reporter))
    }

    /// Process traversal results in order: files are compressed or copied,
    /// traversal errors are recorded, then the policy is reconciled
    fn process_items(
        &self,
        items: Vec<WalkItem>,
        dest_root: &Path,
        reporter: &mut dyn RunReporter,
    ) -> RunReport {
        let total = items
            .iter()
            .filter(|item| matches!(item, WalkItem::File(_)))
            .count();
        reporter.start(total, self.dry_run);

        let mut found = FoundSet::new();
        let mut report = RunReport {
            dry_run: self.dry_run,
            ..RunReport::default()
        };

        for item in items {
            match item {
                WalkItem::File(record) => {
                    found.insert(record.rel.clone());
                    self.process(&record, dest_root, reporter, &mut report);
                }
                WalkItem::Error { path, reason } => {
                    tracing::debug!(%path, %reason, "skipping unreadable entry");
                    reporter.failed(&path, &reason);
                    report.record_failure(FailedFile {
                        path,
                        action: None,
                        reason,
                    });
                }
            }
        }

        report.missing = self.policy.missing(&found);
        if !report.missing.is_empty() {
            tracing::debug!(missing = ?report.missing, "policy entries not found");
        }
        reporter.finish(&report);
        report
    }

    /// Classify a relative path
    pub fn action_for(&self, rel: &str) -> Action {
        if self.policy.contains(rel) {
            Action::Compress
        } else {
            Action::Copy
        }
    }

    fn process(
        &self,
        record: &FileRecord,
        dest_root: &Path,
        reporter: &mut dyn RunReporter,
        report: &mut RunReport,
    ) {
        let action = self.action_for(&record.rel);
        let (dest_rel, dest) = match action {
            Action::Compress => (
                format!("{}{GZIP_SUFFIX}", record.rel),
                dest_root.join(with_gzip_suffix(&record.rel_native)),
            ),
            Action::Copy => (record.rel.clone(), dest_root.join(&record.rel_native)),
        };

        reporter.file(&record.rel, action, &dest_rel);
        if self.dry_run {
            report.record_success(action);
            return;
        }

        let result = ops::ensure_parent_dir(&dest).and_then(|()| match action {
            Action::Compress => ops::compress_file(&record.source, &dest),
            Action::Copy => ops::copy_file(&record.source, &dest),
        });

        match result {
            Ok(()) => {
                tracing::trace!(rel = %record.rel, dest = %dest.display(), "written");
                report.record_success(action);
            }
            Err(err) => {
                let reason = err.to_string();
                tracing::debug!(rel = %record.rel, action = action.as_str(), error = %reason, "file failed");
                reporter.failed(&record.rel, &reason);
                report.record_failure(FailedFile {
                    path: record.rel.clone(),
                    action: Some(action),
                    reason,
                });
            }
        }
    }

    /// Source root must exist, be a directory and be listable
    fn check_source_root(&self) -> Result<PathBuf> {
        let display = self.source_root.display().to_string();
        let metadata = fs::metadata(&self.source_root).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                WebfsError::SourceRootNotFound {
                    path: display.clone(),
                }
            } else {
                WebfsError::SourceRootUnreadable {
                    path: display.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        if !metadata.is_dir() {
            return Err(WebfsError::SourceRootNotDirectory { path: display });
        }

        let unreadable = |e: io::Error| WebfsError::SourceRootUnreadable {
            path: display.clone(),
            reason: e.to_string(),
        };
        fs::read_dir(&self.source_root).map_err(unreadable)?;
        self.source_root.canonicalize().map_err(unreadable)
    }

    /// Reject overlapping roots, then create the destination root unless this
    /// is a dry run
    fn prepare_dest_root(&self, source_root: &Path) -> Result<PathBuf> {
        let display = self.dest_root.display().to_string();
        let unwritable = |e: io::Error| WebfsError::DestinationUnwritable {
            path: display.clone(),
            reason: e.to_string(),
        };

        let resolved = path_utils::resolve(&self.dest_root).map_err(unwritable)?;
        if path_utils::overlaps(source_root, &resolved) {
            return Err(WebfsError::DestinationOverlapsSource {
                source_root: source_root.display().to_string(),
                dest: resolved.display().to_string(),
            });
        }

        if self.dry_run {
            return Ok(resolved);
        }

        if fs::symlink_metadata(&resolved).is_ok_and(|m| !m.is_dir()) {
            return Err(WebfsError::DestinationUnwritable {
                path: display.clone(),
                reason: "exists and is not a directory".to_string(),
            });
        }
        fs::create_dir_all(&resolved).map_err(unwritable)?;
        Ok(resolved)
    }
}

/// `app.js` -> `app.js.gz`: a suffix, never an extension replacement
fn with_gzip_suffix(rel: &Path) -> PathBuf {
    let mut name = OsString::from(rel.as_os_str());
    name.push(GZIP_SUFFIX);
    PathBuf::from(name)
}
