//! Parsing of the interactive commands typed at the prompt.
//!
//! Positions are typed 1-based, as shown in the list, and converted to
//! 0-based indices here.

use std::path::PathBuf;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Watch a directory; without an argument the next line is the directory.
    Watch(Option<PathBuf>),
    /// Add one file to the list.
    Add(PathBuf),
    /// Replace the selection.
    Select(Vec<usize>),
    /// Remove the given positions, or the selection when empty.
    Remove(Vec<usize>),
    /// Move an entry (or the selected one) up.
    Up(Option<usize>),
    /// Move an entry (or the selected one) down.
    Down(Option<usize>),
    /// Merge the list.
    Merge,
    /// Switch delete-after-merge.
    Delete(bool),
    /// Redraw the list.
    List,
    /// Show the command summary.
    Help,
    /// Leave the program.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("Unknown command: {0} (type 'help' for a list)")]
    Unknown(String),

    /// A required argument is missing.
    #[error("Missing argument for '{command}': {argument}")]
    MissingArgument {
        /// Command that was typed.
        command: &'static str,
        /// What should have followed it.
        argument: &'static str,
    },

    /// A position is not a number from 1 upwards.
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    /// The delete switch is neither `on` nor `off`.
    #[error("Expected 'on' or 'off', got: {0}")]
    InvalidSwitch(String),
}

/// Summary printed by `help`.
pub const HELP: &str = "\
Commands:
  watch [DIR]     watch a directory (asks for it when DIR is omitted)
  add PATH        add a file to the end of the list
  select N...     select entries by position
  remove [N...]   remove the given or the selected entries
  up [N]          move an entry (default: the selected one) up
  down [N]        move an entry (default: the selected one) down
  merge           merge the list into the output file
  delete on|off   delete the sources after a merge
  list            show the list
  help            show this summary
  quit            exit";

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "watch" | "w" => Self::Watch((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "add" | "a" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "add",
                        argument: "PATH",
                    });
                }
                Self::Add(PathBuf::from(rest))
            }
            "select" | "s" => Self::Select(parse_positions(rest)?),
            "remove" | "rm" => Self::Remove(parse_positions(rest)?),
            "up" | "u" => Self::Up(parse_optional_position(rest)?),
            "down" | "d" => Self::Down(parse_optional_position(rest)?),
            "merge" | "m" => Self::Merge,
            "delete" => match rest.to_lowercase().as_str() {
                "on" => Self::Delete(true),
                "off" => Self::Delete(false),
                "" => {
                    return Err(CommandError::MissingArgument {
                        command: "delete",
                        argument: "on|off",
                    });
                }
                _ => return Err(CommandError::InvalidSwitch(rest.to_string())),
            },
            "list" | "ls" => Self::List,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_position(token: &str) -> Result<usize, CommandError> {
    match token.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::InvalidPosition(token.to_string())),
    }
}

fn parse_positions(rest: &str) -> Result<Vec<usize>, CommandError> {
    rest.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(parse_position)
        .collect()
}

fn parse_optional_position(rest: &str) -> Result<Option<usize>, CommandError> {
    match parse_positions(rest)?.as_slice() {
        [] => Ok(None),
        [index] => Ok(Some(*index)),
        _ => Err(CommandError::InvalidPosition(rest.to_string())),
    }
}
