//! The interaction controller.
//!
//! Every user action and every directory event ends up here. The controller
//! owns the [`Session`], mutates it, and tells the [`Surface`] what to show.
//! It is driven from a single task, so list mutations never interleave.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use crate::config::Config;
use crate::error::{PdfWatchError, Result};
use crate::io::PdfWriter;
use crate::merge::{MergeReport, MergeRequest, Merger, merge_to_file};
use crate::session::Session;
use crate::surface::{Notice, Surface};
use crate::watch::{DirectoryWatcher, ExtensionFilter, WatchMessage, scan_directory};

/// Routes user commands and watch messages to the session.
#[derive(Debug)]
pub struct Controller {
    session: Session,
    merger: Merger,
    writer: PdfWriter,
    filter: ExtensionFilter,
    sender: mpsc::Sender<WatchMessage>,
}

impl Controller {
    /// Create a controller from `config`.
    ///
    /// Watchers started later send their messages through `sender`; the
    /// caller owns the matching receiver and feeds the messages back into
    /// [`Controller::handle_watch_message`].
    ///
    /// # Errors
    ///
    /// Fails if the extension filter cannot be built or the output path
    /// cannot be resolved.
    pub fn new(config: &Config, sender: mpsc::Sender<WatchMessage>) -> Result<Self> {
        let filter = ExtensionFilter::new(&config.extension)?;
        let output = canonical_output(config.output_path()?);

        Ok(Self {
            session: Session::new(output, config.delete_after_merge),
            merger: Merger::new(config.effective_jobs()),
            writer: PdfWriter::with_options(config.compression.into()),
            filter,
            sender,
        })
    }

    /// The session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Redraw the surface from the current list.
    pub fn refresh<S: Surface>(&self, surface: &mut S) {
        surface.refresh(&self.session.files().snapshot_basenames());
    }

    /// Ask the surface for a directory and start watching it.
    ///
    /// A cancelled choice changes nothing. Failures are shown as error
    /// notices and leave the previous watch and list in place.
    pub async fn watch_directory<S: Surface>(&mut self, surface: &mut S) {
        let Some(directory) = surface.choose_directory() else {
            tracing::debug!("[session] directory selection cancelled");
            return;
        };

        if let Err(err) = self.start_watch(&directory).await {
            tracing::warn!("[watch] {err}");
            surface.notify(Notice::error("Cannot watch directory", err.to_string()));
            return;
        }

        self.refresh(surface);
        if let Some(watched) = self.session.watched_directory() {
            surface.notify(Notice::info(
                "Watching",
                format!(
                    "Watching {} ({} file(s))",
                    watched.display(),
                    self.session.files().len()
                ),
            ));
        }
    }

    /// Start watching `directory` and load its current contents.
    ///
    /// The new watcher is installed only after the initial scan succeeded,
    /// so on error the session is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PdfWatchError::DirectoryNotFound`],
    /// [`PdfWatchError::NotADirectory`] or [`PdfWatchError::WatchFailed`].
    pub async fn start_watch(&mut self, directory: &Path) -> Result<()> {
        let directory = resolve_directory(directory).await?;

        let watcher = DirectoryWatcher::start(
            &directory,
            self.session.allocate_generation(),
            self.filter.clone(),
            self.sender.clone(),
        )?;
        let paths = scan_directory(&directory, &self.filter).await?;

        self.session.replace_watch(watcher, paths);
        tracing::info!(
            "[session] watching {} for *.{} with {} file(s)",
            directory.display(),
            self.filter.extension(),
            self.session.files().len()
        );
        Ok(())
    }

    /// Append a file chosen explicitly by the user.
    pub async fn add_file<S: Surface>(&mut self, surface: &mut S, path: &Path) {
        let path = match resolve_file(path).await {
            Ok(path) => path,
            Err(err) => {
                surface.notify(Notice::error("Cannot add file", err.to_string()));
                return;
            }
        };

        if self.session.files_mut().add(path.clone()) {
            tracing::debug!("[session] added {}", path.display());
            self.refresh(surface);
        } else {
            surface.notify(Notice::info(
                "Already listed",
                format!("{} is already in the list", path.display()),
            ));
        }
    }

    /// Remove the selected entries.
    pub fn remove_selected<S: Surface>(&mut self, surface: &mut S) {
        let selection = surface.selection();
        if selection.is_empty() {
            return;
        }

        let removed = self.session.files_mut().remove_at(&selection);
        tracing::debug!("[session] removed {} file(s)", removed.len());
        surface.set_selection(&[]);
        self.refresh(surface);
    }

    /// Move the first selected entry one position up.
    pub fn move_up<S: Surface>(&mut self, surface: &mut S) {
        self.move_selected(surface, Direction::Up);
    }

    /// Move the first selected entry one position down.
    pub fn move_down<S: Surface>(&mut self, surface: &mut S) {
        self.move_selected(surface, Direction::Down);
    }

    fn move_selected<S: Surface>(&mut self, surface: &mut S, direction: Direction) {
        let Some(&index) = surface.selection().first() else {
            return;
        };

        let files = self.session.files_mut();
        let moved = match direction {
            Direction::Up => files.move_up(index),
            Direction::Down => files.move_down(index),
        };

        if let Some(target) = moved {
            tracing::debug!("[session] moved entry {index} to {target}");
            surface.set_selection(&[target]);
            self.refresh(surface);
        }
    }

    /// Switch deletion of the sources after a merge.
    pub fn set_delete_after_merge<S: Surface>(&mut self, surface: &mut S, enabled: bool) {
        self.session.set_delete_after_merge(enabled);
        let state = if enabled { "on" } else { "off" };
        tracing::debug!("[session] delete after merge {state}");
        surface.notify(Notice::info(
            "Delete after merge",
            format!("Delete after merge is {state}"),
        ));
    }

    /// Merge the listed files, in list order, into the output file.
    ///
    /// With delete-after-merge set, a successful merge is followed by
    /// [`Controller::delete_files`]. A failed merge leaves the list and the
    /// sources untouched. Returns the report of a successful merge.
    pub async fn merge<S: Surface>(&mut self, surface: &mut S) -> Option<MergeReport> {
        if self.session.files().is_empty() {
            surface.notify(Notice::warning("No PDFs", "No PDFs to merge."));
            return None;
        }

        let request = MergeRequest {
            inputs: self.session.files().paths().to_vec(),
            output: self.session.output_path().to_path_buf(),
            delete_after_merge: self.session.delete_after_merge(),
        };

        let report = match merge_to_file(&request, &self.merger, &self.writer).await {
            Ok(report) => report,
            Err(err) => {
                tracing::error!("[merge] {err}");
                surface.notify(Notice::error("Merge failed", err.to_string()));
                return None;
            }
        };

        surface.notify(Notice::success(
            "Merged",
            format!("Merged PDF saved to {}", request.output.display()),
        ));
        surface.report(&report);

        if request.delete_after_merge {
            self.delete_files(surface).await;
        }
        Some(report)
    }

    /// Delete every listed file, then clear the list.
    ///
    /// A file that cannot be deleted produces an error notice; the pass
    /// continues with the next file. Returns the number of deleted files.
    pub async fn delete_files<S: Surface>(&mut self, surface: &mut S) -> usize {
        let paths: Vec<PathBuf> = self.session.files().paths().to_vec();
        let mut deleted = 0;

        for path in paths {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::debug!("[session] deleted {}", path.display());
                    deleted += 1;
                }
                Err(source) => {
                    let err = PdfWatchError::FailedToDelete { path, source };
                    tracing::warn!("[session] {err}");
                    surface.notify(Notice::error("Delete failed", err.to_string()));
                }
            }
        }

        tracing::info!("[session] deleted {deleted} file(s)");
        self.session.files_mut().clear();
        surface.set_selection(&[]);
        self.refresh(surface);
        deleted
    }

    /// Apply a message from the watcher and redraw if the list changed.
    pub fn handle_watch_message<S: Surface>(&mut self, surface: &mut S, message: WatchMessage) {
        if self.session.apply(message) {
            self.refresh(surface);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Up,
    Down,
}

/// Canonicalize the output's directory so the path compares equal to the
/// paths reported for the watched directory.
fn canonical_output(path: PathBuf) -> PathBuf {
    let resolved = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => std::fs::canonicalize(parent)
            .ok()
            .map(|dir| dir.join(name)),
        _ => None,
    };
    resolved.unwrap_or(path)
}

async fn resolve_directory(path: &Path) -> Result<PathBuf> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(PdfWatchError::directory_not_found(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };
    if !metadata.is_dir() {
        return Err(PdfWatchError::not_a_directory(path.to_path_buf()));
    }
    Ok(tokio::fs::canonicalize(path).await?)
}

async fn resolve_file(path: &Path) -> Result<PathBuf> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(PdfWatchError::file_not_found(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };
    if !metadata.is_file() {
        return Err(PdfWatchError::other(format!(
            "Not a file: {}",
            path.display()
        )));
    }
    Ok(tokio::fs::canonicalize(path).await?)
}
