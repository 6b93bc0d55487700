//! Command system for scripted editing.
//!
//! ## The Command Pattern
//!
//! Each editing action is a value. Front ends build them from key presses
//! or, as the CLI does, parse them from text:
//!
//! ```text
//! # comments and blank lines are skipped
//! insert Hello, World!
//! move -13 0
//! select
//! move 5 0
//! replace Greetings
//! ```
//!
//! Text arguments take everything after the first space and understand the
//! escapes `\n`, `\t` and `\\`.

use quill_buffer::Position;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// Built-in editing commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Editing
    Insert(String),
    NewLine,
    Delete,
    Replace(String),

    // Cursor movement
    Move { column: isize, row: isize },
    Goto(Position),

    // Selection
    Select,
    Unselect,
    SelectAll,

    // Clipboard
    Copy,
    Cut,
    Paste,

    // Output and files
    Print,
    Save,
    SaveAs(PathBuf),
}

impl Command {
    /// Returns true if the command may change buffer content.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Command::Insert(_)
                | Command::NewLine
                | Command::Delete
                | Command::Replace(_)
                | Command::Cut
                | Command::Paste
        )
    }
}

impl FromStr for Command {
    type Err = CoreError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (name, rest) = line.split_once(' ').unwrap_or((line.trim_end(), ""));

        let command = match name {
            "insert" => {
                if rest.is_empty() {
                    return Err(invalid(name, "missing text"));
                }
                Command::Insert(unescape(rest))
            }
            "newline" => Command::NewLine,
            "delete" => Command::Delete,
            "replace" => Command::Replace(unescape(rest)),
            "move" => {
                let (column, row) = two_numbers::<isize>(name, rest)?;
                Command::Move { column, row }
            }
            "goto" => {
                let (column, row) = two_numbers::<usize>(name, rest)?;
                Command::Goto(Position::new(column, row))
            }
            "select" => Command::Select,
            "unselect" => Command::Unselect,
            "select-all" => Command::SelectAll,
            "copy" => Command::Copy,
            "cut" => Command::Cut,
            "paste" => Command::Paste,
            "print" => Command::Print,
            "save" => Command::Save,
            "save-as" => {
                let path = rest.trim();
                if path.is_empty() {
                    return Err(invalid(name, "missing path"));
                }
                Command::SaveAs(PathBuf::from(path))
            }
            other => return Err(CoreError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

/// Parses a script, skipping blank lines and `#` comments.
pub fn parse_script(script: &str) -> CoreResult<Vec<Command>> {
    script
        .lines()
        .filter(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(str::parse)
        .collect()
}

fn invalid(command: &str, reason: impl Into<String>) -> CoreError {
    CoreError::InvalidArgument {
        command: command.to_string(),
        reason: reason.into(),
    }
}

fn two_numbers<T: FromStr>(command: &str, args: &str) -> CoreResult<(T, T)> {
    let mut parts = args.split_whitespace().map(str::parse::<T>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(first)), Some(Ok(second)), None) => Ok((first, second)),
        _ => Err(invalid(command, format!("expected two numbers, got `{args}`"))),
    }
}

fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            // Unknown escapes stay literal
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}
