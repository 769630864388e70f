//! Source tree traversal
//!
//! Yields every regular file under the source root in file-name order, with
//! its relative path normalized to `/` separators. Directory entries that
//! cannot be read are yielded as errors so the caller can record them and
//! keep going.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::path_utils;

/// A regular file discovered under the source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Relative path with `/` separators, used for policy lookup and reporting
    pub rel: String,
    /// Relative path in native form, used to build the destination path
    pub rel_native: PathBuf,
    /// Absolute path of the source file
    pub source: PathBuf,
}

/// One traversal step
#[derive(Debug)]
pub enum WalkItem {
    File(FileRecord),
    Error { path: String, reason: String },
}

/// Walk `root` without descending into symlinked directories.
///
/// Regular files become records, and so do symlinks that do not point at a
/// directory: a link to a file is read through, a dangling link fails when
/// it is opened and is reported like any other unreadable file.
pub fn walk(root: &Path) -> impl Iterator<Item = WalkItem> + '_ {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                if !is_file_like(&entry) {
                    return None;
                }
                let source = entry.path().to_path_buf();
                let rel_native = source.strip_prefix(root).ok()?.to_path_buf();
                let rel = path_utils::relative_forward(root, &source)?;
                Some(WalkItem::File(FileRecord {
                    rel,
                    rel_native,
                    source,
                }))
            }
            Err(err) => {
                let path = err
                    .path()
                    .and_then(|p| path_utils::relative_forward(root, p))
                    .or_else(|| err.path().map(|p| p.display().to_string()))
                    .unwrap_or_else(|| root.display().to_string());
                tracing::debug!(%path, error = %err, "traversal error");
                Some(WalkItem::Error {
                    path,
                    reason: err.to_string(),
                })
            }
        })
}

fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}
