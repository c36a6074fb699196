//! Path utilities
//!
//! Root resolution, output path derivation and the textual form used in
//! section headers.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::model::{ConcatError, Result};

/// Resolve the root to an absolute path, failing if it is not a directory.
///
/// Symlinks are kept as spelled by the caller, so headers show the path the
/// root was reached through rather than its canonical target.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(ConcatError::root_not_found(root, None)),
        Err(e) => return Err(ConcatError::root_not_found(root, Some(e))),
    }

    std::path::absolute(root).map_err(|e| ConcatError::root_not_found(root, Some(e)))
}

/// Output file path: the file name joined onto the root.
///
/// An absolute file name replaces the root entirely.
pub fn output_path(root: &Path, file_name: &Path) -> PathBuf {
    root.join(file_name)
}

/// Text written between the header markers for an entry
pub fn header_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Make a path relative to the root directory, using '/' as separator
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root)
        .ok()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
}

/// Check whether two paths name the same file.
///
/// Equal paths are the same file; otherwise both are canonicalized, so a
/// path that does not exist never matches.
pub fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
