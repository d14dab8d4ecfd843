use std::collections::VecDeque;
use std::path::PathBuf;

use super::{Notice, NoticeKind, Surface, normalize_selection};

/// A headless surface that records what it was told to show.
///
/// Directory choices are answered from a queue filled with
/// [`RecordingSurface::queue_directory`]; an empty queue answers "cancelled".
#[derive(Debug, Default)]
pub struct RecordingSurface {
    names: Vec<String>,
    selection: Vec<usize>,
    notices: Vec<Notice>,
    refreshes: usize,
    directories: VecDeque<Option<PathBuf>>,
}

impl RecordingSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next directory prompt with `directory` (`None` = cancel).
    pub fn queue_directory(&mut self, directory: Option<PathBuf>) {
        self.directories.push_back(directory);
    }

    /// Names shown by the last refresh.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Every notice received so far.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Notices of one kind.
    pub fn notices_of(&self, kind: NoticeKind) -> Vec<&Notice> {
        self.notices.iter().filter(|n| n.kind == kind).collect()
    }

    /// Number of refreshes so far.
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }
}

impl Surface for RecordingSurface {
    fn refresh(&mut self, names: &[String]) {
        self.names = names.to_vec();
        self.selection = normalize_selection(&self.selection, names.len());
        self.refreshes += 1;
    }

    fn selection(&self) -> Vec<usize> {
        self.selection.clone()
    }

    fn set_selection(&mut self, indices: &[usize]) {
        let mut indices = indices.to_vec();
        indices.sort_unstable();
        indices.dedup();
        self.selection = indices;
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn choose_directory(&mut self) -> Option<PathBuf> {
        self.directories.pop_front().flatten()
    }
}
