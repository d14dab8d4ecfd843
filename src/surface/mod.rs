//! The presentation surface: whatever shows the file list to the user.
//!
//! The controller never draws anything itself. It pushes the list's display
//! names and user-facing notices through [`Surface`] and reads the current
//! selection back from it.

mod recording;
mod terminal;

pub use recording::RecordingSurface;
pub use terminal::TerminalSurface;

use std::fmt;
use std::path::PathBuf;

use crate::merge::MergeReport;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Neutral information.
    Info,
    /// An operation completed.
    Success,
    /// An operation was refused.
    Warning,
    /// An operation failed.
    Error,
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Short heading, e.g. "No PDFs".
    pub title: String,
    /// Full message.
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Informational notice.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, message)
    }

    /// Success notice.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, title, message)
    }

    /// Warning notice.
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, title, message)
    }

    /// Error notice.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, message)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// A view of the ordered file list.
pub trait Surface {
    /// Show `names` as the current list, in order.
    fn refresh(&mut self, names: &[String]);

    /// Currently selected rows (0-based), in ascending order.
    fn selection(&self) -> Vec<usize>;

    /// Replace the selection.
    fn set_selection(&mut self, indices: &[usize]);

    /// Show a notice.
    fn notify(&mut self, notice: Notice);

    /// Ask the user for a directory to watch; `None` means cancelled.
    fn choose_directory(&mut self) -> Option<PathBuf>;

    /// Show details of a finished merge.
    fn report(&mut self, _report: &MergeReport) {}
}

/// Sorted, de-duplicated copy of `indices` with entries `>= len` dropped.
pub(crate) fn normalize_selection(indices: &[usize], len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = indices.iter().copied().filter(|&i| i < len).collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}
