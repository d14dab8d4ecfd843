//! Configuration module for pdfwatch.
//!
//! Turns CLI arguments into a validated configuration that drives the
//! session: which directory to watch first, which files count as PDFs,
//! where the merged document goes and what happens to the sources.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cli::Cli;
use crate::error::{PdfWatchError, Result};

/// File name of the merged document.
pub const DEFAULT_OUTPUT: &str = "Output_Merge.pdf";

/// Extension of the files that are collected from the watched directory.
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - preserves exact quality and structure.
    None,
    /// Balanced compression.
    #[default]
    Standard,
    /// Maximum compression - also prunes unreachable objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfWatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfWatchError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory to start watching immediately, if any.
    pub watch_dir: Option<PathBuf>,

    /// Output PDF path, relative paths resolve against the working directory.
    pub output: PathBuf,

    /// Initial state of the delete-after-merge switch.
    pub delete_after_merge: bool,

    /// Extension (without the dot) of the files to collect.
    pub extension: String,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Number of parallel loads (None = auto-detect).
    pub jobs: Option<usize>,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watch_dir: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            delete_after_merge: false,
            extension: DEFAULT_EXTENSION.to_string(),
            compression: CompressionLevel::Standard,
            jobs: None,
            verbose: false,
            quiet: false,
        }
    }
}

impl TryFrom<&Cli> for Config {
    type Error = PdfWatchError;

    fn try_from(cli: &Cli) -> Result<Self> {
        let compression = CompressionLevel::from_str(&cli.compression)?;

        let config = Self {
            watch_dir: cli.directory.clone(),
            output: cli.output.clone(),
            delete_after_merge: cli.delete_after_merge,
            extension: cli.extension.trim_start_matches('.').to_string(),
            compression,
            jobs: cli.jobs,
            verbose: cli.verbose,
            quiet: cli.quiet,
        };

        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Check the configuration for values that cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`PdfWatchError::InvalidConfig`] when the extension is empty or
    /// contains a path separator, when `jobs` is zero, or when the output path
    /// does not name a file.
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            return Err(PdfWatchError::invalid_config("Extension must not be empty"));
        }

        if self.extension.contains(['/', '\\']) {
            return Err(PdfWatchError::invalid_config(format!(
                "Extension must not contain path separators: {}",
                self.extension
            )));
        }

        if self.jobs == Some(0) {
            return Err(PdfWatchError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        if self.output.file_name().is_none() {
            return Err(PdfWatchError::invalid_config(format!(
                "Output path must name a file: {}",
                self.output.display()
            )));
        }

        Ok(())
    }

    /// Resolve the output path against `base` when it is relative.
    pub fn output_path_in(&self, base: &Path) -> PathBuf {
        if self.output.is_absolute() {
            self.output.clone()
        } else {
            base.join(&self.output)
        }
    }

    /// Resolve the output path against the current working directory.
    pub fn output_path(&self) -> Result<PathBuf> {
        Ok(self.output_path_in(&std::env::current_dir()?))
    }

    /// Get the effective number of parallel jobs.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
