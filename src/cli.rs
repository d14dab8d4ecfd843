//! CLI argument parsing for pdfwatch.
//!
//! Everything here is start-up configuration; the interactive commands
//! typed while the program runs are parsed by [`crate::app::command`].

use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_EXTENSION, DEFAULT_OUTPUT};

/// Watch a directory for PDF files, arrange them and merge them.
///
/// pdfwatch keeps an ordered list of the PDF files found in a watched
/// directory. Files appearing or disappearing on disk update the list.
/// Reorder or remove entries, then merge them into a single document.
#[derive(Parser, Debug)]
#[command(name = "pdfwatch")]
#[command(version)]
#[command(about = "Watch a directory for PDF files and merge them", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Directory to watch right away
    ///
    /// Can also be chosen later with the `watch` command.
    #[arg(value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Output PDF file path
    ///
    /// Relative paths are resolved against the current working directory.
    /// The file is overwritten by every merge.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Delete the source files after a successful merge
    ///
    /// Can be toggled at runtime with `delete on` / `delete off`.
    #[arg(short, long)]
    pub delete_after_merge: bool,

    /// Extension of the files to collect (case-sensitive)
    #[arg(long, value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Compression level for output PDF
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Number of PDFs loaded concurrently during a merge
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Verbose output - show diagnostics and merge details
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
