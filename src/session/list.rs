//! The ordered, de-duplicated list of files that make up the merge plan.

use std::path::{Path, PathBuf};

/// Ordered collection of file paths without duplicates.
///
/// The position of an entry is both its display position and its position
/// in the merged document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    entries: Vec<PathBuf>,
}

impl FileList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` unless it is already listed.
    ///
    /// Returns `true` if the list changed.
    pub fn add(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.entries.push(path);
        true
    }

    /// Remove `path` if it is listed.
    ///
    /// Returns `true` if the list changed.
    pub fn remove(&mut self, path: &Path) -> bool {
        match self.entries.iter().position(|entry| entry == path) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the entries at `indices`.
    ///
    /// Indices may come in any order and may repeat; they are applied from
    /// the highest down so each removal leaves the remaining indices valid.
    /// Out-of-range indices are ignored. Returns the removed paths in list
    /// order.
    pub fn remove_at(&mut self, indices: &[usize]) -> Vec<PathBuf> {
        let mut indices = indices.to_vec();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();

        // Descending order keeps every remaining index valid.
        let len = self.entries.len();
        let mut removed: Vec<PathBuf> = indices
            .into_iter()
            .filter(|&index| index < len)
            .map(|index| self.entries.remove(index))
            .collect();
        removed.reverse();
        removed
    }

    /// Exchange the entries at `i` and `j`.
    ///
    /// Returns `false` without touching the list if either index is out of
    /// range.
    pub fn swap(&mut self, i: usize, j: usize) -> bool {
        if i >= self.entries.len() || j >= self.entries.len() {
            return false;
        }
        self.entries.swap(i, j);
        true
    }

    /// Move the entry at `index` one position towards the front.
    ///
    /// Returns the new index, or `None` if the entry is already first or
    /// `index` is out of range.
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        let target = index.checked_sub(1)?;
        self.swap(index, target).then_some(target)
    }

    /// Move the entry at `index` one position towards the back.
    ///
    /// Returns the new index, or `None` if the entry is already last or
    /// `index` is out of range.
    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        let target = index.checked_add(1)?;
        self.swap(index, target).then_some(target)
    }

    /// Replace the whole list with `paths`, dropping duplicates.
    pub fn reset<I>(&mut self, paths: I)
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        self.entries.clear();
        for path in paths {
            self.add(path);
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Check whether `path` is listed.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|entry| entry == path)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The listed paths in order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Display names (final path component) in list order.
    pub fn snapshot_basenames(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            })
            .collect()
    }
}
