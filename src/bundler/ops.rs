//! Per-file operations
//!
//! Each operation opens its handles inside one scope, so both files are
//! closed on every exit path before any cleanup runs. On failure the partial
//! destination is removed (best-effort) and the error is returned.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::error::{Result, WebfsError, fs as fs_error};

/// Create the parent directory of `path` if needed
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            fs_error::create_dir_failed(parent.display().to_string(), e.to_string())
        })?;
    }
    Ok(())
}

/// Gzip `source` into `dest` with default compression parameters.
///
/// The gzip header carries no mtime or file name, so the output depends on
/// the input bytes only.
pub fn compress_file(source: &Path, dest: &Path) -> Result<()> {
    with_cleanup(dest, || {
        let mut reader = BufReader::new(File::open(source).map_err(|e| fs_error::read_error(source, &e))?);
        remove_existing(dest)?;
        let writer = BufWriter::new(File::create(dest).map_err(|e| fs_error::write_error(dest, &e))?);

        let mut encoder = GzEncoder::new(writer, Compression::default());
        copy_stream(&mut reader, &mut encoder, source, dest)?;
        let mut writer = encoder
            .finish()
            .map_err(|e| fs_error::write_error(dest, &e))?;
        writer.flush().map_err(|e| fs_error::write_error(dest, &e))?;
        Ok(())
    })
}

/// Copy `source` to `dest`, keeping the modification time and permission bits
pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    with_cleanup(dest, || {
        let mut reader = File::open(source).map_err(|e| fs_error::read_error(source, &e))?;
        let metadata = reader
            .metadata()
            .map_err(|e| fs_error::read_error(source, &e))?;
        remove_existing(dest)?;
        let mut writer = File::create(dest).map_err(|e| fs_error::write_error(dest, &e))?;

        copy_stream(&mut reader, &mut writer, source, dest)?;
        if let Ok(modified) = metadata.modified() {
            writer
                .set_modified(modified)
                .map_err(|e| fs_error::write_error(dest, &e))?;
        }
        drop(writer);

        // Applied last: read-only bits would block the mtime update above
        fs::set_permissions(dest, metadata.permissions())
            .map_err(|e| fs_error::write_error(dest, &e))?;
        Ok(())
    })
}

fn with_cleanup<F>(dest: &Path, op: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    let result = op();
    if result.is_err() {
        remove_partial(dest);
    }
    result
}

/// Stream `reader` into `writer`, attributing errors to the side that failed
fn copy_stream<R, W>(reader: &mut R, writer: &mut W, source: &Path, dest: &Path) -> Result<u64>
where
    R: io::Read,
    W: io::Write,
{
    let mut buffer = [0u8; 8192];
    let mut total = 0u64;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(fs_error::read_error(source, &e)),
        };
        writer
            .write_all(&buffer[..read])
            .map_err(|e| fs_error::write_error(dest, &e))?;
        total += read as u64;
    }
}

/// Unconditional overwrite: drop whatever is at `dest`, read-only or not
fn remove_existing(dest: &Path) -> Result<()> {
    match fs::symlink_metadata(dest) {
        Ok(meta) if meta.is_dir() => Err(WebfsError::FileWriteFailed {
            path: dest.display().to_string(),
            reason: "destination is a directory".to_string(),
        }),
        Ok(_) => fs::remove_file(dest).map_err(|e| fs_error::write_error(dest, &e)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(fs_error::write_error(dest, &e)),
    }
}

fn remove_partial(dest: &Path) {
    let Ok(meta) = fs::symlink_metadata(dest) else {
        return;
    };
    if meta.is_dir() {
        return;
    }
    if let Err(e) = fs::remove_file(dest) {
        tracing::debug!(path = %dest.display(), error = %e, "could not remove partial output");
    }
}
