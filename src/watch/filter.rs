use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;

use crate::error::{PdfWatchError, Result};

/// Case-sensitive file name suffix match, e.g. `*.pdf`.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extension: String,
    matcher: GlobMatcher,
}

impl ExtensionFilter {
    /// Build a filter for `extension` (given without the leading dot).
    pub fn new(extension: &str) -> Result<Self> {
        let pattern = format!("*.{}", globset::escape(extension));
        let glob = GlobBuilder::new(&pattern)
            .literal_separator(true)
            .build()
            .map_err(|err| PdfWatchError::invalid_config(err.to_string()))?;

        Ok(Self {
            extension: extension.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// The extension this filter accepts.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether the file name of `path` ends with the extension.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matcher.is_match(Path::new(name)))
    }
}
