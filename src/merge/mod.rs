//! PDF merging operations.
//!
//! A [`MergeRequest`] is a snapshot of the file list taken when the user
//! asks for a merge. [`merge_to_file`] loads the listed documents,
//! concatenates their pages in list order and writes the result.

pub mod merger;

pub use merger::{MergeResult, MergeStatistics, Merger};

use std::path::PathBuf;

use crate::error::Result;
use crate::io::{PdfWriter, WriteStatistics};

/// What to merge, where to, and what to do with the sources afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Source files in merge order.
    pub inputs: Vec<PathBuf>,

    /// Path of the merged document.
    pub output: PathBuf,

    /// Delete the sources once the output is written.
    pub delete_after_merge: bool,
}

/// Outcome of [`merge_to_file`].
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Statistics of the page concatenation.
    pub merge: MergeStatistics,

    /// Statistics of the output write.
    pub write: WriteStatistics,
}

/// Merge the request's inputs and write the result to its output path.
///
/// # Errors
///
/// Any load, merge or write error aborts the whole operation; the output
/// path is left as it was before the call.
pub async fn merge_to_file(
    request: &MergeRequest,
    merger: &Merger,
    writer: &PdfWriter,
) -> Result<MergeReport> {
    let result = merger.merge(&request.inputs).await?;
    tracing::info!(
        "[merge] merged {} file(s) into {} page(s) in {:.2}s",
        result.statistics.files_merged,
        result.statistics.total_pages,
        result.statistics.merge_time.as_secs_f64()
    );

    let write = writer.save(result.document, &request.output).await?;
    tracing::info!(
        "[merge] wrote {} ({})",
        write.output_path.display(),
        write.format_file_size()
    );

    Ok(MergeReport {
        merge: result.statistics,
        write,
    })
}
