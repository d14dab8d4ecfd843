//! Directory watching.
//!
//! Raw `notify` events are translated on the watcher thread into
//! [`DirectoryEvent`]s and sent over a channel to the application loop,
//! which owns the file list and applies them one at a time.
//!
//! ```text
//! notify thread ──WatchMessage──▶ mpsc ──▶ App loop ──▶ Session::apply
//! ```

mod filter;
mod watcher;

pub use filter::ExtensionFilter;
pub use watcher::DirectoryWatcher;

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind};
use std::path::{Path, PathBuf};

use crate::error::{PdfWatchError, Result};

/// A file appearing in or disappearing from the watched directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    /// A matching file was created.
    Created(PathBuf),
    /// A matching file was deleted.
    Deleted(PathBuf),
}

impl DirectoryEvent {
    /// Path carried by the event.
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(path) | Self::Deleted(path) => path,
        }
    }
}

/// An event tagged with the watch it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchMessage {
    /// Generation of the watch that produced the event.
    pub generation: u64,
    /// The translated event.
    pub event: DirectoryEvent,
}

/// Translate a raw `notify` event into directory events.
///
/// Creations and files moved into the directory become
/// [`DirectoryEvent::Created`]; deletions and files moved out become
/// [`DirectoryEvent::Deleted`]. A rename within the directory is a deletion
/// of the old name plus a creation of the new one. Only non-directory
/// entries whose name matches `filter` are kept.
pub fn translate(event: &Event, filter: &ExtensionFilter) -> Vec<DirectoryEvent> {
    let created = |path: &PathBuf| DirectoryEvent::Created(path.clone());
    let deleted = |path: &PathBuf| DirectoryEvent::Deleted(path.clone());

    let events: Vec<DirectoryEvent> = match event.kind {
        EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder) => {
            return Vec::new();
        }
        EventKind::Create(_) | EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            event.paths.iter().map(created).collect()
        }
        EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            event.paths.iter().map(deleted).collect()
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => match event.paths.as_slice() {
            [from, to] => vec![deleted(from), created(to)],
            _ => Vec::new(),
        },
        // Backends that cannot tell the direction of a move report the
        // path once; whether it still exists decides.
        EventKind::Modify(ModifyKind::Name(_)) => event
            .paths
            .iter()
            .map(|path| if path.exists() { created(path) } else { deleted(path) })
            .collect(),
        _ => return Vec::new(),
    };

    events
        .into_iter()
        .filter(|event| filter.matches(event.path()))
        // `CreateKind::Any` and moves do not say whether a folder arrived.
        .filter(|event| !matches!(event, DirectoryEvent::Created(path) if path.is_dir()))
        .collect()
}

/// List the files in `dir` (non-recursive) that match `filter`.
///
/// Entries are sorted by file name so the initial order does not depend on
/// the platform's directory enumeration order.
pub async fn scan_directory(dir: &Path, filter: &ExtensionFilter) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => PdfWatchError::directory_not_found(dir.to_path_buf()),
        _ => PdfWatchError::Io(err),
    })?;

    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !filter.matches(&path) {
            continue;
        }
        // Follows symlinks, so a link to a PDF counts as a file.
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => paths.push(path),
            Ok(_) => {}
            Err(err) => {
                tracing::debug!("[watch] skipping {}: {err}", path.display());
            }
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}
