//! Concatenation backend
//!
//! Streams every matching file under a root into one output file, each
//! section laid out as:
//!
//! ```text
//! ---- <absolute-path> ----
//! <raw contents>
//! <blank line>
//! ```
//!
//! Content is copied byte for byte after validating that it is UTF-8. Any
//! error aborts the run; the output keeps whatever was flushed before it.

use chrono::Utc;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::backends::lock;
use crate::backends::scan::{Scanner, Visit};
use crate::core::extensions::ExtensionSet;
use crate::core::model::{ConcatError, ConcatSummary, Result};
use crate::core::paths::{header_path, output_path, resolve_root};

/// Marker placed on both sides of the path in a header line
pub const HEADER_MARKER: &str = "----";

/// Separator written after each file's contents
pub const SECTION_TRAILER: &[u8] = b"\n\n";

/// Settings for a concatenation run
#[derive(Debug, Clone)]
pub struct ConcatConfig {
    /// Directory to scan
    pub root: PathBuf,

    /// Output file name, joined onto the root
    pub output: PathBuf,

    /// Accepted file-name suffixes
    pub extensions: ExtensionSet,
}

impl ConcatConfig {
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            extensions: ExtensionSet::default(),
        }
    }

    pub fn with_extensions(mut self, extensions: ExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }
}

/// Writes header/content sections to any writer
pub struct SectionWriter<W: Write> {
    inner: W,
    sections: usize,
    content_bytes: u64,
}

impl<W: Write> SectionWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            sections: 0,
            content_bytes: 0,
        }
    }

    /// Write one section: header line, contents, trailer
    pub fn write_section(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        writeln!(
            self.inner,
            "{} {} {}",
            HEADER_MARKER,
            header_path(path),
            HEADER_MARKER
        )?;
        self.inner.write_all(contents)?;
        self.inner.write_all(SECTION_TRAILER)?;

        self.sections += 1;
        self.content_bytes += contents.len() as u64;
        Ok(())
    }

    pub fn sections(&self) -> usize {
        self.sections
    }

    pub fn content_bytes(&self) -> u64 {
        self.content_bytes
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Read a file and check that it decodes as UTF-8, returning the raw bytes
pub fn read_text(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).map_err(|e| ConcatError::unreadable_entry(path, e))?;
    if let Err(e) = std::str::from_utf8(&bytes) {
        return Err(ConcatError::encoding(path, e));
    }
    Ok(bytes)
}

/// Reusable concatenation service
#[derive(Debug, Clone)]
pub struct Concatenator {
    config: ConcatConfig,
}

impl Concatenator {
    pub fn new(config: ConcatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConcatConfig {
        &self.config
    }

    /// Run the concatenation
    pub fn run(&self) -> Result<ConcatSummary> {
        self.run_with_progress(|_, _| {})
    }

    /// Run the concatenation, calling `on_section` after each section is
    /// written with the entry path and its content length.
    pub fn run_with_progress<F>(&self, mut on_section: F) -> Result<ConcatSummary>
    where
        F: FnMut(&Path, usize),
    {
        let root = resolve_root(&self.config.root)?;
        let output = output_path(&root, &self.config.output);

        let lease = lock::lease(&lock_key(&output));
        let _guard = lease.acquire();

        let file =
            File::create(&output).map_err(|e| ConcatError::cannot_write_output(&output, e))?;
        let mut writer = SectionWriter::new(BufWriter::new(file));
        let mut skipped_output = false;

        for visit in Scanner::new(&root, &self.config.extensions).exclude(&output) {
            let entry = match visit? {
                Visit::Entry(entry) => entry,
                Visit::SkippedOutput => {
                    skipped_output = true;
                    continue;
                }
            };

            let contents = read_text(&entry.path)?;
            writer
                .write_section(&entry.path, &contents)
                .map_err(|e| ConcatError::cannot_write_output(&output, e))?;
            on_section(&entry.path, contents.len());
        }

        writer
            .flush()
            .map_err(|e| ConcatError::cannot_write_output(&output, e))?;

        Ok(ConcatSummary {
            root: header_path(&root),
            output: header_path(&output),
            extensions: self.config.extensions.suffixes().to_vec(),
            files: writer.sections(),
            bytes: writer.content_bytes(),
            skipped_output,
            generated_at: Utc::now(),
        })
    }
}

/// Concatenate matching files under `root` into `root/output_file_name`
pub fn concatenate(
    root: &Path,
    output_file_name: &Path,
    extensions: &ExtensionSet,
) -> Result<ConcatSummary> {
    let config = ConcatConfig::new(root, output_file_name).with_extensions(extensions.clone());
    Concatenator::new(config).run()
}

/// Key under which runs on the same output are serialized.
///
/// The output may not exist yet, so only its parent is canonicalized.
fn lock_key(output: &Path) -> PathBuf {
    match (output.parent(), output.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|p| p.join(name))
            .unwrap_or_else(|_| output.to_path_buf()),
        _ => output.to_path_buf(),
    }
}
