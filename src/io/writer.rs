//! PDF writing and saving operations.
//!
//! Writes are atomic: the document is serialized to a sibling
//! temporary file which is renamed over the target only once complete. A
//! failed write removes the temporary file, so a previous output is never
//! replaced by a truncated one.

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::CompressionLevel;
use crate::error::{PdfWatchError, Result};

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Compress streams before writing.
    pub compress: bool,

    /// Drop objects no longer reachable from the trailer.
    pub prune: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compress: true,
            prune: false,
            buffer_size: 8192,
        }
    }
}

impl From<CompressionLevel> for WriteOptions {
    fn from(level: CompressionLevel) -> Self {
        match level {
            CompressionLevel::None => Self {
                compress: false,
                ..Self::default()
            },
            CompressionLevel::Standard => Self::default(),
            CompressionLevel::Maximum => Self {
                prune: true,
                ..Self::default()
            },
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        super::format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Save `doc` to `path` and report what was written.
    ///
    /// The document is consumed because compression and renumbering mutate
    /// it in place.
    ///
    /// # Errors
    ///
    /// Returns [`PdfWatchError::FailedToCreateOutput`] when the file cannot be
    /// created and [`PdfWatchError::FailedToWrite`] when serialization,
    /// flushing or the final rename fails.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        task::spawn_blocking(move || Self::save_blocking(doc, path_buf, &options))
            .await
            .map_err(|e| PdfWatchError::other(format!("Write task failed: {e}")))?
    }

    fn save_blocking(
        mut doc: Document,
        path: PathBuf,
        options: &WriteOptions,
    ) -> Result<WriteStatistics> {
        let start = Instant::now();

        if options.prune {
            doc.prune_objects();
        }
        if options.compress {
            doc.compress();
        }
        doc.renumber_objects();

        let write_path = temp_path_for(&path);
        let written = Self::write_file(&mut doc, &write_path, options.buffer_size).and_then(|()| {
            std::fs::rename(&write_path, &path).map_err(|e| PdfWatchError::FailedToWrite {
                path: path.clone(),
                source: e,
            })
        });

        if let Err(err) = written {
            let _ = std::fs::remove_file(&write_path);
            return Err(err);
        }

        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path,
            compressed: options.compress,
        })
    }

    fn write_file(doc: &mut Document, path: &Path, buffer_size: usize) -> Result<()> {
        let file =
            std::fs::File::create(path).map_err(|e| PdfWatchError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);

        doc.save_to(&mut writer)
            .map_err(|e| PdfWatchError::FailedToWrite {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;

        writer.flush().map_err(|e| PdfWatchError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Sibling temporary path, e.g. `Output_Merge.pdf` -> `.Output_Merge.pdf.part`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.part"))
}
