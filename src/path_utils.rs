//! Cross-platform path utilities for webfs
//!
//! Compress entries are authored with `/` separators, so every relative path
//! the bundler compares against them has to be rendered the same way on all
//! hosts.

use std::path::{Component, Path, PathBuf};

/// Convert a path to a forward-slash string.
///
/// Backslashes are only separators on Windows; elsewhere they are legal file
/// name characters and are kept.
///
/// ```ignore
/// assert_eq!(to_forward_slashes(Path::new("css/sub/x.css")), "css/sub/x.css");
/// ```
pub fn to_forward_slashes(path: &Path) -> String {
    let parts: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

/// Path of `path` relative to `root`, rendered with `/` separators.
///
/// Returns `None` when `path` is not below `root` or equals it.
pub fn relative_forward(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rendered = to_forward_slashes(rel);
    if rendered.is_empty() {
        None
    } else {
        Some(rendered)
    }
}

/// Whether `rel` is usable as a source-relative entry: non-empty, relative,
/// no `..` or `.` segments, no backslashes.
pub fn is_clean_relative(rel: &str) -> bool {
    if rel.is_empty() || rel.starts_with('/') || rel.contains('\\') {
        return false;
    }
    // Windows drive prefixes such as `C:` are absolute too
    if rel.len() >= 2 && rel.as_bytes()[1] == b':' {
        return false;
    }
    rel.split('/')
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

/// Resolve `path` to an absolute, symlink-free form, even if it does not
/// exist yet.
///
/// The longest existing ancestor is canonicalized and the remaining
/// components are appended, so `/var/x` and `/private/var/x` compare equal on
/// macOS whether or not `x` has been created.
pub fn resolve(path: &Path) -> std::io::Result<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Ok(canonical);
    }

    let absolute = std::path::absolute(path)?;
    let mut current = absolute.as_path();
    let mut tail = Vec::new();

    while !current.exists() {
        match (current.file_name(), current.parent()) {
            (Some(name), Some(parent)) => {
                tail.push(name.to_os_string());
                current = parent;
            }
            _ => return Ok(absolute.clone()),
        }
    }

    let mut resolved = current.canonicalize()?;
    for component in tail.iter().rev() {
        resolved.push(component);
    }
    Ok(resolved)
}

/// Whether two resolved roots overlap: equal, or one nested in the other
pub fn overlaps(a: &Path, b: &Path) -> bool {
    a.starts_with(b) || b.starts_with(a)
}
