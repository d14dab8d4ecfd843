use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use super::{ExtensionFilter, WatchMessage, translate};
use crate::error::{PdfWatchError, Result};

/// A live, non-recursive watch on one directory.
///
/// Dropping the watcher stops the notifications.
pub struct DirectoryWatcher {
    directory: PathBuf,
    generation: u64,
    _watcher: RecommendedWatcher,
}

impl DirectoryWatcher {
    /// Start watching `directory`.
    ///
    /// The callback runs on the watcher's own thread; it translates each
    /// event and forwards the matching ones to `sender` tagged with
    /// `generation`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfWatchError::WatchFailed`] if the platform watcher cannot
    /// be created or cannot observe `directory`.
    pub fn start(
        directory: &Path,
        generation: u64,
        filter: ExtensionFilter,
        sender: mpsc::Sender<WatchMessage>,
    ) -> Result<Self> {
        let watch_failed = |source| PdfWatchError::WatchFailed {
            path: directory.to_path_buf(),
            source,
        };

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!("[watch] file watch error: {e}");
                    return;
                }
            };

            for event in translate(&event, &filter) {
                tracing::debug!("[watch] {event:?}");
                let message = WatchMessage { generation, event };
                if sender.blocking_send(message).is_err() {
                    // Receiver gone: the application is shutting down.
                    return;
                }
            }
        })
        .map_err(watch_failed)?;

        watcher
            .watch(directory, RecursiveMode::NonRecursive)
            .map_err(watch_failed)?;

        tracing::info!(
            "[watch] watching {} (generation {generation})",
            directory.display()
        );

        Ok(Self {
            directory: directory.to_path_buf(),
            generation,
            _watcher: watcher,
        })
    }

    /// The watched directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Generation number of this watch.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for DirectoryWatcher {
    fn drop(&mut self) {
        tracing::debug!(
            "[watch] stopped watching {} (generation {})",
            self.directory.display(),
            self.generation
        );
    }
}

impl std::fmt::Debug for DirectoryWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryWatcher")
            .field("directory", &self.directory)
            .field("generation", &self.generation)
            .finish()
    }
}
