//! pdfwatch - Watch a directory for PDF files and merge them.
//!
//! The library keeps an ordered list of the PDF files in one watched
//! directory. Files created or deleted on disk are added to or removed from
//! the list as they appear. The user reorders and prunes the list, then
//! merges it into a single document, optionally deleting the sources.
//!
//! # Examples
//!
//! ## Driving the controller
//!
//! ```no_run
//! use pdfwatch::config::Config;
//! use pdfwatch::controller::Controller;
//! use pdfwatch::surface::RecordingSurface;
//! use std::path::Path;
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (sender, mut receiver) = mpsc::channel(64);
//! let mut controller = Controller::new(&Config::default(), sender)?;
//! let mut surface = RecordingSurface::new();
//!
//! controller.start_watch(Path::new("scans")).await?;
//! if let Some(message) = receiver.recv().await {
//!     controller.handle_watch_message(&mut surface, message);
//! }
//! controller.merge(&mut surface).await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Merging without a session
//!
//! ```no_run
//! use pdfwatch::io::PdfWriter;
//! use pdfwatch::merge::{MergeRequest, Merger, merge_to_file};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = MergeRequest {
//!     inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!     output: PathBuf::from("Output_Merge.pdf"),
//!     delete_after_merge: false,
//! };
//! let report = merge_to_file(&request, &Merger::new(2), &PdfWriter::new()).await?;
//! println!("Created {} page document", report.merge.total_pages);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod io;
pub mod logging;
pub mod merge;
pub mod output;
pub mod session;
pub mod surface;
pub mod watch;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfWatchError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
