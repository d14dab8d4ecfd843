//! Session state: the file list, the watched directory and the settings the
//! user can change while the program runs.

mod list;

pub use list::FileList;

use std::path::{Path, PathBuf};

use crate::watch::{DirectoryEvent, DirectoryWatcher, WatchMessage};

/// Coarse state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// No directory selected yet; only explicit adds change the list.
    Unwatched,
    /// A directory is being observed.
    Watching,
}

/// Everything the controller mutates, in one place.
#[derive(Debug)]
pub struct Session {
    files: FileList,
    watcher: Option<DirectoryWatcher>,
    generation: u64,
    last_allocated: u64,
    delete_after_merge: bool,
    output_path: PathBuf,
}

impl Session {
    /// Create an unwatched session with an empty list.
    pub fn new(output_path: PathBuf, delete_after_merge: bool) -> Self {
        Self {
            files: FileList::new(),
            watcher: None,
            generation: 0,
            last_allocated: 0,
            delete_after_merge,
            output_path,
        }
    }

    /// The ordered file list.
    pub fn files(&self) -> &FileList {
        &self.files
    }

    /// Mutable access to the ordered file list.
    pub fn files_mut(&mut self) -> &mut FileList {
        &mut self.files
    }

    /// Current watch state.
    pub fn state(&self) -> WatchState {
        if self.watcher.is_some() {
            WatchState::Watching
        } else {
            WatchState::Unwatched
        }
    }

    /// The watched directory, if any.
    pub fn watched_directory(&self) -> Option<&Path> {
        self.watcher.as_ref().map(DirectoryWatcher::directory)
    }

    /// Generation of the active watch (0 before the first one).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Reserve a fresh generation number for a watcher about to start.
    ///
    /// Numbers are never handed out twice, even when the watcher they were
    /// reserved for is discarded before [`Self::replace_watch`].
    pub fn allocate_generation(&mut self) -> u64 {
        self.last_allocated += 1;
        self.last_allocated
    }

    /// Install `watcher` as the only active watch and load `paths` as the
    /// new list.
    ///
    /// The previous watcher, if any, is dropped and so stops delivering
    /// events; messages it already queued are rejected by [`Self::apply`].
    /// The merge output is never listed, even when it lives in the watched
    /// directory.
    pub fn replace_watch(&mut self, watcher: DirectoryWatcher, paths: Vec<PathBuf>) {
        self.generation = watcher.generation();
        self.watcher = Some(watcher);
        let output = self.output_path.as_path();
        self.files
            .reset(paths.into_iter().filter(|path| path.as_path() != output));
    }

    /// Whether source files are deleted after a merge.
    pub fn delete_after_merge(&self) -> bool {
        self.delete_after_merge
    }

    /// Switch deletion of source files after a merge on or off.
    pub fn set_delete_after_merge(&mut self, enabled: bool) {
        self.delete_after_merge = enabled;
    }

    /// Path the merged document is written to.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Apply a directory event to the list.
    ///
    /// Messages from an older watch and events about the merge output
    /// itself are ignored. Returns `true` if the list changed.
    pub fn apply(&mut self, message: WatchMessage) -> bool {
        if self.watcher.is_none() || message.generation != self.generation {
            tracing::debug!(
                "[session] dropping stale event from generation {}",
                message.generation
            );
            return false;
        }

        if message.event.path() == self.output_path.as_path() {
            return false;
        }

        let changed = match message.event {
            DirectoryEvent::Created(path) => self.files.add(path),
            DirectoryEvent::Deleted(path) => self.files.remove(&path),
        };
        if changed {
            tracing::debug!("[session] list now has {} file(s)", self.files.len());
        }
        changed
    }
}
