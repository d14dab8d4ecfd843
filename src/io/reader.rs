//! PDF reading and loading operations.
//!
//! Documents are parsed on the blocking thread pool so the application loop
//! stays responsive. Batches are loaded concurrently but always returned in
//! input order, because input order is merge order.

use futures::stream::{self, StreamExt, TryStreamExt};
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfWatchError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// PDF reader. Documents without pages are rejected.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || Self::load_blocking(path_buf))
            .await
            .map_err(|e| PdfWatchError::other(format!("Load task failed: {e}")))?
    }

    fn load_blocking(path: PathBuf) -> Result<LoadedPdf> {
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PdfWatchError::file_not_found(path));
            }
            Err(e) => return Err(PdfWatchError::failed_to_load_pdf(path, e.to_string())),
        };

        let start = Instant::now();
        let document = Document::load(&path).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfWatchError::encrypted_pdf(path.clone())
            } else {
                PdfWatchError::failed_to_load_pdf(path.clone(), err_msg)
            }
        })?;

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(PdfWatchError::corrupted_pdf(path, "PDF has no pages"));
        }

        Ok(LoadedPdf {
            document,
            path,
            page_count,
            load_time: start.elapsed(),
            file_size: metadata.len(),
        })
    }

    /// Load PDFs with at most `workers` loads in flight.
    ///
    /// Results come back in the order of `paths`. The first failure aborts
    /// the batch.
    pub async fn load_ordered(&self, paths: &[PathBuf], workers: usize) -> Result<Vec<LoadedPdf>> {
        let workers = workers.max(1);

        stream::iter(paths.iter().map(|path| self.load(path)))
            .buffered(workers)
            .try_collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::tests::write_test_pdf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_single_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let pdf_path = write_test_pdf(&temp_dir, "test.pdf", &[200]);

        let loaded = PdfReader::new().load(&pdf_path).await.unwrap();
        assert_eq!(loaded.page_count, 1);
        assert_eq!(loaded.path, pdf_path);
        assert!(loaded.file_size > 0);
    }

    #[tokio::test]
    async fn test_load_nonexistent_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let result = PdfReader::new()
            .load(&temp_dir.path().join("nonexistent.pdf"))
            .await;

        assert!(matches!(result, Err(PdfWatchError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_load_invalid_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invalid.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let result = PdfReader::new().load(&path).await;
        assert!(matches!(result, Err(PdfWatchError::FailedToLoadPdf { .. })));
    }

    #[tokio::test]
    async fn test_load_ordered_keeps_input_order() {
        let temp_dir = TempDir::new().unwrap();
        let paths = vec![
            write_test_pdf(&temp_dir, "a.pdf", &[100, 101]),
            write_test_pdf(&temp_dir, "b.pdf", &[200]),
            write_test_pdf(&temp_dir, "c.pdf", &[300, 301, 302]),
        ];

        let loaded = PdfReader::new().load_ordered(&paths, 3).await.unwrap();
        let pages: Vec<_> = loaded.iter().map(|l| l.page_count).collect();
        assert_eq!(pages, [2, 1, 3]);
        let order: Vec<_> = loaded.iter().map(|l| l.path.clone()).collect();
        assert_eq!(order, paths);
    }

    #[tokio::test]
    async fn test_load_ordered_fails_on_bad_input() {
        let temp_dir = TempDir::new().unwrap();
        let bad = temp_dir.path().join("bad.pdf");
        std::fs::write(&bad, b"garbage").unwrap();
        let paths = vec![write_test_pdf(&temp_dir, "a.pdf", &[100]), bad];

        assert!(PdfReader::new().load_ordered(&paths, 2).await.is_err());
    }
}
