//! Edit session: one document, a clipboard register and an event bus.
//!
//! ## The Facade Pattern
//!
//! Front ends talk to `Session` only. It turns `Command`s into buffer
//! calls, owns the clipboard the cut/copy/paste commands share, and tells
//! subscribers what changed.

use crate::command::Command;
use crate::config::Config;
use crate::document::Document;
use crate::event::{EditorEvent, EventBus, EventHandler};
use crate::CoreResult;

/// The editing state behind a single editor window.
///
/// Owned by one thread; nothing here locks.
pub struct Session {
    /// The document being edited
    document: Document,

    /// Text held by copy/cut for paste
    clipboard: String,

    /// Event bus for notifications
    events: EventBus,
}

impl Session {
    /// Creates a session around a document with default settings.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            clipboard: String::new(),
            events: EventBus::new(),
        }
    }

    /// Creates a session and applies the file-level config to the document.
    pub fn with_config(mut document: Document, config: &Config) -> Self {
        if let Some(line_ending) = config.editor.line_ending.forced() {
            document.set_line_ending(line_ending);
        }
        if config.editor.trailing_newline {
            document.set_trailing_newline(true);
        }
        Self {
            document,
            clipboard: String::new(),
            events: EventBus::with_capacity(config.session.event_capacity),
        }
    }

    /// Returns the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consumes the session and returns its document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Returns the clipboard contents.
    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    /// Subscribes to session events.
    pub fn subscribe(&self) -> EventHandler {
        self.events.subscribe()
    }

    /// Runs one command.
    ///
    /// Returns text for commands that produce output (`copy`, `print`).
    pub fn execute(&mut self, command: &Command) -> CoreResult<Option<String>> {
        tracing::debug!("Executing {:?}", command);

        let cursor = self.document.buffer().cursor();
        let selection = self.document.buffer().selection_bounds();

        let output = self.apply(command)?;

        let buffer = self.document.buffer();
        if command.is_edit() {
            self.events.emit(EditorEvent::DocumentChanged);
        }
        if buffer.cursor() != cursor {
            self.events.emit(EditorEvent::CursorMoved(buffer.cursor()));
        }
        if buffer.selection_bounds() != selection {
            self.events
                .emit(EditorEvent::SelectionChanged(buffer.selection_bounds()));
        }
        Ok(output)
    }

    /// Runs commands in order and collects their output.
    ///
    /// With `keep_going`, a failing command is logged and skipped; otherwise
    /// the first error stops the run.
    pub fn execute_all(&mut self, commands: &[Command], keep_going: bool) -> CoreResult<Vec<String>> {
        let mut outputs = Vec::new();
        for command in commands {
            match self.execute(command) {
                Ok(Some(output)) => outputs.push(output),
                Ok(None) => {}
                Err(err) if keep_going => {
                    tracing::warn!("{:?} failed: {}", command, err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(outputs)
    }

    fn apply(&mut self, command: &Command) -> CoreResult<Option<String>> {
        let buffer = self.document.buffer_mut();
        match command {
            Command::Insert(text) => buffer.insert_str(text)?,
            Command::NewLine => buffer.new_line()?,
            Command::Delete => {
                buffer.delete_selection()?;
            }
            Command::Replace(text) => {
                buffer.replace_selection(text)?;
            }
            Command::Move { column, row } => buffer.move_cursor(*column, *row)?,
            Command::Goto(pos) => buffer.set_cursor(*pos)?,
            Command::Select => buffer.start_selection(),
            Command::Unselect => buffer.end_selection(),
            Command::SelectAll => buffer.select_all(),
            Command::Copy => {
                self.clipboard = buffer.selection_text()?;
                self.events.emit(EditorEvent::ClipboardChanged);
                return Ok(Some(self.clipboard.clone()));
            }
            Command::Cut => {
                self.clipboard = buffer.delete_selection()?;
                self.events.emit(EditorEvent::ClipboardChanged);
            }
            Command::Paste => {
                if buffer.has_selection() {
                    buffer.replace_selection(&self.clipboard)?;
                } else {
                    buffer.insert_str(&self.clipboard)?;
                }
            }
            Command::Print => return Ok(Some(buffer.text())),
            Command::Save => {
                self.document.save()?;
                self.emit_saved();
            }
            Command::SaveAs(path) => {
                self.document.save_as(path)?;
                self.emit_saved();
            }
        }
        Ok(None)
    }

    fn emit_saved(&self) {
        if let Some(path) = self.document.path() {
            self.events
                .emit(EditorEvent::DocumentSaved(path.to_path_buf()));
        }
    }
}
