//! Error types for pdfwatch.
//!
//! Errors are grouped roughly as:
//!
//! - **Watch errors**: the chosen directory is missing or cannot be observed
//! - **PDF errors**: an input could not be loaded or is unusable
//! - **Output errors**: the merged file could not be created or written
//! - **Cleanup errors**: a source file could not be deleted after a merge

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfwatch operations.
pub type Result<T> = std::result::Result<T, PdfWatchError>;

/// Main error type for pdfwatch operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfWatchError {
    /// The directory chosen for watching does not exist.
    #[error("Directory not found: {}", .path.display())]
    DirectoryNotFound {
        /// Path that was chosen.
        path: PathBuf,
    },

    /// The path chosen for watching is not a directory.
    #[error("Not a directory: {}", .path.display())]
    NotADirectory {
        /// Path that was chosen.
        path: PathBuf,
    },

    /// The filesystem watcher could not be set up for a directory.
    #[error("Cannot watch directory: {}\n  Reason: {source}", .path.display())]
    WatchFailed {
        /// Directory that should have been watched.
        path: PathBuf,
        /// Underlying watcher error.
        source: notify::Error,
    },

    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Failed to load a PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        .path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// PDF file has an unusable structure.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", .path.display())]
    CorruptedPdf {
        /// Path to the PDF.
        path: PathBuf,
        /// Details about the problem.
        details: String,
    },

    /// Merge was requested without any inputs.
    #[error("No PDF files to merge")]
    NoFilesToMerge,

    /// Failed to create the output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write the output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to delete a source file after merging.
    #[error("Failed to delete file {}: {source}", .path.display())]
    FailedToDelete {
        /// File that could not be removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Merge operation failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl PdfWatchError {
    /// Create a DirectoryNotFound error.
    pub fn directory_not_found(path: PathBuf) -> Self {
        Self::DirectoryNotFound { path }
    }

    /// Create a NotADirectory error.
    pub fn not_a_directory(path: PathBuf) -> Self {
        Self::NotADirectory { path }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DirectoryNotFound { .. } => 2,
            Self::NotADirectory { .. } => 2,
            Self::FileNotFound { .. } => 2,
            Self::WatchFailed { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::NoFilesToMerge => 1,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::FailedToDelete { .. } => 5,
            Self::Io(_) => 5,
            Self::MergeFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Other { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_directory_not_found_display() {
        let err = PdfWatchError::directory_not_found(PathBuf::from("/tmp/missing"));
        let msg = err.to_string();
        assert!(msg.contains("Directory not found"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_failed_to_delete_names_file_and_reason() {
        let err = PdfWatchError::FailedToDelete {
            path: PathBuf::from("b.pdf"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("b.pdf"));
        assert!(msg.contains("denied"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_encrypted_pdf_display() {
        let err = PdfWatchError::encrypted_pdf(PathBuf::from("secret.pdf"));
        let msg = err.to_string();
        assert!(msg.contains("encrypted"));
        assert!(msg.contains("Decrypt"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            PdfWatchError::directory_not_found(PathBuf::from("x")).exit_code(),
            2
        );
        assert_eq!(
            PdfWatchError::failed_to_load_pdf(PathBuf::from("x"), "error").exit_code(),
            3
        );
        assert_eq!(PdfWatchError::invalid_config("x").exit_code(), 1);
        assert_eq!(PdfWatchError::merge_failed("x").exit_code(), 6);
    }

    #[test]
    fn test_from_io_error() {
        let err: PdfWatchError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, PdfWatchError::Io(_)));
    }
}
