//! The interactive terminal front end.
//!
//! [`App::run`] is the application loop: it waits on the input lines and on
//! the watcher channel at the same time and hands whichever arrives first to
//! the [`Controller`]. Nothing else mutates the session.

pub mod command;

pub use command::{Command, CommandError, HELP};

use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::controller::Controller;
use crate::error::Result;
use crate::output::OutputFormatter;
use crate::surface::{Notice, Surface, TerminalSurface};
use crate::watch::WatchMessage;

/// Capacity of the watcher channel.
const CHANNEL_CAPACITY: usize = 256;

/// Whether the loop keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The application: controller, terminal surface and watcher channel.
#[derive(Debug)]
pub struct App {
    controller: Controller,
    surface: TerminalSurface,
    receiver: mpsc::Receiver<WatchMessage>,
    awaiting_directory: bool,
}

impl App {
    /// Build the application from `config`.
    ///
    /// # Errors
    ///
    /// Fails when the controller cannot be built from the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        Ok(Self {
            controller: Controller::new(config, sender)?,
            surface: TerminalSurface::new(OutputFormatter::from_config(config)),
            receiver,
            awaiting_directory: false,
        })
    }

    /// The controller.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// The terminal surface.
    pub fn surface(&self) -> &TerminalSurface {
        &self.surface
    }

    /// Start watching `directory` before the loop runs.
    ///
    /// # Errors
    ///
    /// Propagates the watch error so start-up can fail with it.
    pub async fn watch(&mut self, directory: PathBuf) -> Result<()> {
        self.controller.start_watch(&directory).await?;
        self.controller.refresh(&mut self.surface);
        Ok(())
    }

    /// Run until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Fails only when reading the input fails.
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        self.prompt();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::debug!("[app] end of input");
                        break;
                    };
                    if self.handle_line(&line).await == Flow::Quit {
                        break;
                    }
                    self.prompt();
                }
                Some(message) = self.receiver.recv() => {
                    self.controller.handle_watch_message(&mut self.surface, message);
                }
            }
        }

        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> Flow {
        if self.awaiting_directory {
            self.awaiting_directory = false;
            let line = line.trim();
            let directory = (!line.is_empty()).then(|| PathBuf::from(line));
            self.choose_directory(directory).await;
            return Flow::Continue;
        }

        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Flow::Continue,
            Err(err) => {
                self.surface.notify(Notice::warning("Invalid command", err.to_string()));
                Flow::Continue
            }
        }
    }

    async fn execute(&mut self, command: Command) -> Flow {
        tracing::debug!("[app] {command:?}");
        let controller = &mut self.controller;
        let surface = &mut self.surface;

        match command {
            Command::Watch(Some(directory)) => {
                surface.set_pending_directory(Some(directory));
                controller.watch_directory(surface).await;
            }
            Command::Watch(None) => self.awaiting_directory = true,
            Command::Add(path) => controller.add_file(surface, &path).await,
            Command::Select(indices) => {
                surface.set_selection(&indices);
                controller.refresh(surface);
            }
            Command::Remove(indices) => {
                if !indices.is_empty() {
                    surface.set_selection(&indices);
                }
                controller.remove_selected(surface);
            }
            Command::Up(index) => {
                if let Some(index) = index {
                    surface.set_selection(&[index]);
                }
                controller.move_up(surface);
            }
            Command::Down(index) => {
                if let Some(index) = index {
                    surface.set_selection(&[index]);
                }
                controller.move_down(surface);
            }
            Command::Merge => {
                controller.merge(surface).await;
            }
            Command::Delete(enabled) => controller.set_delete_after_merge(surface, enabled),
            Command::List => controller.refresh(surface),
            Command::Help => surface.formatter().info(HELP),
            Command::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    async fn choose_directory(&mut self, directory: Option<PathBuf>) {
        self.surface.set_pending_directory(directory);
        self.controller.watch_directory(&mut self.surface).await;
    }

    fn prompt(&self) {
        let formatter = self.surface.formatter();
        if formatter.is_quiet() {
            return;
        }
        if self.awaiting_directory {
            formatter.prompt("Directory (empty to cancel): ");
        } else {
            formatter.prompt("> ");
        }
    }
}
