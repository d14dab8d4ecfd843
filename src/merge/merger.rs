//! Page concatenation.
//!
//! The first document is the base; every following document is renumbered
//! past the highest object id in use, its objects are moved over, and its
//! pages are appended to the base's page tree in order.

use lopdf::{Document, Object, ObjectId};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::{PdfWatchError, Result};
use crate::io::{LoadedPdf, PdfReader};

/// Page attributes a page may inherit from its page tree ancestors.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Time taken to load all PDFs.
    pub load_time: Duration,

    /// Total time taken for load and merge.
    pub merge_time: Duration,

    /// Total size of input files.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        crate::io::format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged, in merge order.
    pub merged_files: Vec<PathBuf>,
}

/// PDF merger that combines multiple documents.
#[derive(Debug, Clone)]
pub struct Merger {
    reader: PdfReader,
    jobs: usize,
}

impl Merger {
    /// Create a merger loading up to `jobs` documents concurrently.
    pub fn new(jobs: usize) -> Self {
        Self {
            reader: PdfReader::new(),
            jobs: jobs.max(1),
        }
    }

    /// Load `inputs` and concatenate their pages in order.
    ///
    /// # Errors
    ///
    /// Returns [`PdfWatchError::NoFilesToMerge`] for an empty input, the load
    /// error of the first input that cannot be read, or
    /// [`PdfWatchError::MergeFailed`] when a page tree is malformed.
    pub async fn merge(&self, inputs: &[PathBuf]) -> Result<MergeResult> {
        if inputs.is_empty() {
            return Err(PdfWatchError::NoFilesToMerge);
        }

        let merge_start = Instant::now();
        let loaded = self.reader.load_ordered(inputs, self.jobs).await?;
        let load_time = merge_start.elapsed();

        let input_size = loaded.iter().map(|pdf| pdf.file_size).sum();
        let merged_files = loaded.iter().map(|pdf| pdf.path.clone()).collect();

        let document = tokio::task::spawn_blocking(move || Self::concatenate(loaded))
            .await
            .map_err(|e| PdfWatchError::other(format!("Merge task failed: {e}")))??;

        let statistics = MergeStatistics {
            files_merged: inputs.len(),
            total_pages: document.get_pages().len(),
            load_time,
            merge_time: merge_start.elapsed(),
            input_size,
        };

        Ok(MergeResult {
            document,
            statistics,
            merged_files,
        })
    }

    /// Concatenate already loaded documents.
    pub fn concatenate(loaded: Vec<LoadedPdf>) -> Result<Document> {
        let mut documents = loaded.into_iter();
        let mut merged = documents
            .next()
            .ok_or(PdfWatchError::NoFilesToMerge)?
            .document;

        let pages_id = Self::root_pages_id(&merged)?;
        let mut max_id = merged.max_id;

        for LoadedPdf { mut document, path, .. } in documents {
            document.renumber_objects_with(max_id + 1);
            max_id = document.max_id;

            let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
            for &page_id in &page_ids {
                Self::inline_inherited(&mut document, page_id);
            }
            tracing::debug!(
                "[merge] appending {} page(s) from {}",
                page_ids.len(),
                path.display()
            );

            merged.objects.extend(document.objects);
            Self::append_pages(&mut merged, pages_id, &page_ids)?;
        }

        merged.max_id = max_id;
        Ok(merged)
    }

    /// Copy inheritable attributes from the page's ancestors onto the page,
    /// since it is about to be moved under a different parent.
    fn inline_inherited(doc: &mut Document, page_id: ObjectId) {
        let Ok(page) = doc.get_dictionary(page_id) else {
            return;
        };

        let mut wanted: Vec<&[u8]> = INHERITABLE
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
        let mut found = Vec::new();

        for _ in 0..MAX_TREE_DEPTH {
            let Some(id) = parent else { break };
            if wanted.is_empty() {
                break;
            }
            let Ok(node) = doc.get_dictionary(id) else {
                break;
            };
            wanted.retain(|key| match node.get(key) {
                Ok(value) => {
                    found.push((*key, value.clone()));
                    false
                }
                Err(_) => true,
            });
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        }

        if let Ok(page) = doc.get_dictionary_mut(page_id) {
            for (key, value) in found {
                page.set(key, value);
            }
        }
    }

    fn root_pages_id(doc: &Document) -> Result<ObjectId> {
        doc.catalog()
            .and_then(|catalog| catalog.get(b"Pages"))
            .and_then(Object::as_reference)
            .map_err(|e| PdfWatchError::merge_failed(format!("Failed to get pages reference: {e}")))
    }

    /// Hang `page_ids` under the root page tree node and update its count.
    fn append_pages(merged: &mut Document, pages_id: ObjectId, page_ids: &[ObjectId]) -> Result<()> {
        for &page_id in page_ids {
            if let Ok(Object::Dictionary(page)) = merged.get_object_mut(page_id) {
                page.set("Parent", Object::Reference(pages_id));
            }
        }

        let pages = merged
            .get_object_mut(pages_id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| PdfWatchError::merge_failed(format!("Failed to get pages object: {e}")))?;

        match pages.get_mut(b"Kids") {
            Ok(Object::Array(kids)) => {
                kids.extend(page_ids.iter().copied().map(Object::Reference));
            }
            Ok(_) => return Err(PdfWatchError::merge_failed("Kids is not an array")),
            Err(_) => {
                return Err(PdfWatchError::merge_failed(
                    "Pages dictionary missing Kids array",
                ));
            }
        }

        let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
        pages.set("Count", Object::Integer(count + page_ids.len() as i64));

        Ok(())
    }
}
