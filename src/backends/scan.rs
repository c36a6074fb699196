//! Directory walk
//!
//! Uses walkdir for depth-first traversal. Entries are yielded in the order
//! the filesystem enumerates them, except that inside each directory files
//! come before subdirectories. Nothing is sorted by name.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::extensions::ExtensionSet;
use crate::core::model::{ConcatError, Result};
use crate::core::paths::same_file;

/// A discovered file eligible for output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
}

/// Outcome of inspecting one walk item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    Entry(Entry),
    /// The output file was reached and left out
    SkippedOutput,
}

/// Lazily walks a root and yields matching entries.
pub struct Scanner<'a> {
    walker: walkdir::IntoIter,
    extensions: &'a ExtensionSet,
    exclude: Option<PathBuf>,
}

impl<'a> Scanner<'a> {
    /// `root` should already be absolute; entry paths are built from it.
    pub fn new(root: &Path, extensions: &'a ExtensionSet) -> Self {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()))
            .into_iter();

        Self {
            walker,
            extensions,
            exclude: None,
        }
    }

    /// Never yield this path, even if its name matches.
    pub fn exclude(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude = Some(path.into());
        self
    }

    fn visit(&self, entry: &DirEntry) -> Option<Visit> {
        if !is_file_like(entry) {
            return None;
        }

        let name = entry.file_name().to_string_lossy();
        if !self.extensions.matches(&name) {
            return None;
        }

        if let Some(exclude) = &self.exclude {
            if same_file(entry.path(), exclude) {
                return Some(Visit::SkippedOutput);
            }
        }

        Some(Visit::Entry(Entry {
            path: entry.path().to_path_buf(),
        }))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Visit>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(e) => e,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    let io = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                    return Some(Err(ConcatError::unreadable_entry(path, io)));
                }
            };

            if let Some(visit) = self.visit(&entry) {
                return Some(Ok(visit));
            }
        }
    }
}

/// Regular files, plus symlinks that do not point at a directory
fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    file_type.is_symlink() && !entry.path().is_dir()
}

/// Collect all matching entries under a root
pub fn scan_entries(root: &Path, extensions: &ExtensionSet) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for visit in Scanner::new(root, extensions) {
        if let Visit::Entry(entry) = visit? {
            entries.push(entry);
        }
    }
    Ok(entries)
}
