//! Documents: a text buffer tied to a file.
//!
//! ## Composition over Inheritance
//!
//! `Document` composes a `TextBuffer` and adds what only matters at the
//! file boundary: the path, the line ending the file used, and whether it
//! ended with one. The buffer itself always works in `\n`-separated lines
//! and never sees `\r`.

use quill_buffer::{BufferConfig, TextBuffer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{CoreError, CoreResult};

/// Line ending style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Unix-style: \n
    #[default]
    Lf,
    /// Windows-style: \r\n
    CrLf,
    /// Classic Mac: \r
    Cr,
}

impl LineEnding {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }

    /// Detects line ending from text.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else if text.contains('\r') {
            LineEnding::Cr
        } else {
            LineEnding::Lf
        }
    }

    /// Rewrites every line ending in `text` as `\n`.
    pub fn normalize(text: &str) -> String {
        text.replace("\r\n", "\n").replace('\r', "\n")
    }
}

/// A single file (or untitled text) being edited.
#[derive(Debug, Clone)]
pub struct Document {
    /// The underlying text buffer
    buffer: TextBuffer,

    /// File path (None for untitled documents)
    path: Option<PathBuf>,

    /// Line ending written on save
    line_ending: LineEnding,

    /// Whether the saved text ends with a line ending
    trailing_newline: bool,
}

impl Document {
    /// Creates a new untitled document.
    pub fn new() -> Self {
        Self::with_buffer_config(BufferConfig::default())
    }

    /// Creates an untitled document with custom buffer settings.
    pub fn with_buffer_config(config: BufferConfig) -> Self {
        Self {
            buffer: TextBuffer::with_config(config),
            path: None,
            line_ending: LineEnding::default(),
            trailing_newline: false,
        }
    }

    /// Creates an untitled document holding `text`.
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.replace_contents(text);
        doc
    }

    /// Opens a document from a file.
    pub fn open(path: impl AsRef<Path>, config: BufferConfig) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let mut doc = Self::with_buffer_config(config);
        doc.replace_contents(&content);
        doc.set_path(path);

        tracing::info!(
            "Opened {} ({} lines, {:?})",
            path.display(),
            doc.buffer.line_count(),
            doc.line_ending
        );
        Ok(doc)
    }

    /// Replaces the contents with raw file text, detecting its line ending.
    pub fn replace_contents(&mut self, content: &str) {
        self.line_ending = LineEnding::detect(content);

        let normalized = LineEnding::normalize(content);
        let body = match normalized.strip_suffix('\n') {
            Some(body) => {
                self.trailing_newline = true;
                body
            }
            None => {
                self.trailing_newline = false;
                normalized.as_str()
            }
        };
        self.buffer.load(body);
    }

    /// Returns the text as it would be written to disk.
    pub fn contents(&self) -> String {
        let ending = self.line_ending.as_str();
        let mut text = self.buffer.lines().join(ending);
        if self.trailing_newline {
            text.push_str(ending);
        }
        text
    }

    // ==================== Getters ====================

    /// Returns the file path.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        self.buffer.source_name().unwrap_or("Untitled")
    }

    /// Returns true if the document has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    /// Returns the line ending used on save.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Overrides the line ending used on save.
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Returns true if the saved text ends with a line ending.
    pub fn trailing_newline(&self) -> bool {
        self.trailing_newline
    }

    /// Sets whether the saved text ends with a line ending.
    pub fn set_trailing_newline(&mut self, trailing_newline: bool) {
        self.trailing_newline = trailing_newline;
    }

    /// Returns the text buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Returns a mutable reference to the buffer.
    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    // ==================== File Operations ====================

    /// Saves the document to its path.
    pub fn save(&mut self) -> CoreResult<()> {
        let path = self.path.clone().ok_or(CoreError::NoPath)?;
        self.write_to(&path)
    }

    /// Saves the document to a new path and adopts it.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        self.write_to(path)?;
        self.set_path(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> CoreResult<()> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document");

        // Write to a temporary sibling first, then rename (atomic write)
        let temp_path = path.with_file_name(format!(".{file_name}.tmp"));
        std::fs::write(&temp_path, self.contents())?;
        if let Err(err) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(err.into());
        }

        self.buffer.mark_saved();
        tracing::info!("Saved {}", path.display());
        Ok(())
    }

    fn set_path(&mut self, path: &Path) {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from);
        self.buffer.set_source_name(name);
        self.path = Some(path.to_path_buf());
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
