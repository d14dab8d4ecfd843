use std::path::PathBuf;

use super::{Notice, NoticeKind, Surface, normalize_selection};
use crate::merge::MergeReport;
use crate::output::{OutputFormatter, display_merge_report};

/// Line-oriented terminal rendering of the file list.
///
/// The directory "dialog" is the argument of the `watch` command, handed
/// over with [`TerminalSurface::set_pending_directory`] just before the
/// controller asks for it.
#[derive(Debug)]
pub struct TerminalSurface {
    formatter: OutputFormatter,
    names: Vec<String>,
    selection: Vec<usize>,
    pending_directory: Option<PathBuf>,
}

impl TerminalSurface {
    /// Create a surface printing through `formatter`.
    pub fn new(formatter: OutputFormatter) -> Self {
        Self {
            formatter,
            names: Vec::new(),
            selection: Vec::new(),
            pending_directory: None,
        }
    }

    /// The formatter used for all output.
    pub fn formatter(&self) -> &OutputFormatter {
        &self.formatter
    }

    /// Set the answer for the next directory prompt.
    pub fn set_pending_directory(&mut self, directory: Option<PathBuf>) {
        self.pending_directory = directory;
    }

    /// Number of rows currently shown.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Print the list with the selected rows marked.
    pub fn render(&self) {
        if self.names.is_empty() {
            self.formatter.info("(no PDF files)");
            return;
        }

        self.formatter.section(&format!("Files ({})", self.names.len()));
        for (index, name) in self.names.iter().enumerate() {
            let selected = self.selection.binary_search(&index).is_ok();
            self.formatter.list_item(index + 1, name, selected);
        }
    }
}

impl Surface for TerminalSurface {
    fn refresh(&mut self, names: &[String]) {
        self.names = names.to_vec();
        self.selection = normalize_selection(&self.selection, self.names.len());
        self.render();
    }

    fn selection(&self) -> Vec<usize> {
        self.selection.clone()
    }

    fn set_selection(&mut self, indices: &[usize]) {
        // Indices may point past the current rows until the next refresh.
        let mut indices = indices.to_vec();
        indices.sort_unstable();
        indices.dedup();
        self.selection = indices;
    }

    fn notify(&mut self, notice: Notice) {
        let text = notice.to_string();
        match notice.kind {
            NoticeKind::Info => self.formatter.info(&text),
            NoticeKind::Success => self.formatter.success(&text),
            NoticeKind::Warning => self.formatter.warning(&text),
            NoticeKind::Error => self.formatter.error(&text),
        }
    }

    fn choose_directory(&mut self) -> Option<PathBuf> {
        self.pending_directory.take()
    }

    fn report(&mut self, report: &MergeReport) {
        display_merge_report(&self.formatter, report);
    }
}
