//! Core text buffer: an owned vector of lines plus cursor and selection.
//!
//! ## Why a `Vec<String>`?
//!
//! The editor works a line at a time: the cursor addresses `(column, row)`,
//! a new line is a split of one `String` and a multi-row delete is one
//! `Vec::splice`. Lines never contain the line separator.
//!
//! ## Invariants
//!
//! After every public method returns:
//! - `lines` holds at least one line
//! - `cursor.row < lines.len()` and `cursor.column <= line length`
//! - an active selection's `anchor` and `head` obey the same bounds
//!
//! Methods validate before they mutate, so an `Err` leaves the buffer
//! untouched.

use serde::{Deserialize, Serialize};

use crate::text;
use crate::{BufferError, BufferResult, LINE_SEPARATOR, MovePolicy, Position, Selection};

/// An editable document model: lines, one cursor and one selection.
///
/// # Thread Safety
///
/// `TextBuffer` is plain owned data. It is `Send`, and every mutation takes
/// `&mut self`, so callers serialize edits through ownership.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// Text content, one entry per line, never empty
    lines: Vec<String>,

    /// Caret location
    cursor: Position,

    /// The single selection; inert while `active` is false
    selection: Selection,

    /// Name of the backing source (file name, etc.); metadata only
    source_name: Option<String>,

    /// Whether the content changed since load or the last `mark_saved`
    modified: bool,

    /// Buffer-specific settings
    config: BufferConfig,
}

/// Configuration for buffer behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferConfig {
    /// Edge behavior of `move_cursor`, fixed for the buffer's lifetime
    pub move_policy: MovePolicy,
}

/// Read-only view of the buffer state for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferSnapshot {
    pub source_name: Option<String>,
    pub lines: Vec<String>,
    pub cursor: Position,
    /// Normalized `(start, end)` of the active selection
    pub selection: Option<(Position, Position)>,
    pub modified: bool,
}

impl TextBuffer {
    /// Creates a buffer holding a single empty line.
    ///
    /// # Example
    /// ```
    /// use quill_buffer::{Position, TextBuffer};
    ///
    /// let buffer = TextBuffer::new();
    /// assert_eq!(buffer.lines(), [""]);
    /// assert_eq!(buffer.cursor(), Position::ZERO);
    /// ```
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Creates an empty buffer with custom configuration.
    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::ZERO,
            selection: Selection::default(),
            source_name: None,
            modified: false,
            config,
        }
    }

    /// Replaces the whole content with `text`, split on the line separator.
    ///
    /// The cursor returns to `(0, 0)`, any selection is dropped and the
    /// buffer counts as unmodified. Empty text yields one empty line.
    pub fn load(&mut self, text: &str) {
        self.lines = text.split(LINE_SEPARATOR).map(String::from).collect();
        self.cursor = Position::ZERO;
        self.selection = Selection::default();
        self.modified = false;
    }

    // ==================== Text Access ====================

    /// Joins all lines with the line separator, without a trailing one.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns all lines.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns one line, or `None` past the last row.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Returns the number of lines (always at least 1).
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the length of a line in code points.
    pub fn line_len(&self, row: usize) -> Option<usize> {
        self.line(row).map(text::char_len)
    }

    /// Returns the cursor position.
    #[inline]
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Returns the selection, active or not.
    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns true if a selection is active.
    #[inline]
    pub fn has_selection(&self) -> bool {
        self.selection.active
    }

    /// Normalized `(start, end)` of the active selection.
    pub fn selection_bounds(&self) -> Option<(Position, Position)> {
        self.selection.active.then(|| self.selection.normalized())
    }

    /// Returns true if `pos` lies inside the active selection's `[start, end)`.
    pub fn contains_position(&self, pos: Position) -> bool {
        self.selection.contains(pos)
    }

    /// Terminal cell offset of a position, for drawing the caret.
    pub fn display_column(&self, pos: Position) -> BufferResult<usize> {
        self.validate(pos)?;
        Ok(text::display_width(&self.lines[pos.row], pos.column))
    }

    /// Captures the state a renderer needs.
    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            source_name: self.source_name.clone(),
            lines: self.lines.clone(),
            cursor: self.cursor,
            selection: self.selection_bounds(),
            modified: self.modified,
        }
    }

    // ==================== Metadata ====================

    /// Returns the source name, if any.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Sets the source name. Buffer logic never reads it.
    pub fn set_source_name(&mut self, name: Option<String>) {
        self.source_name = name;
    }

    /// Returns true if the content changed since load or the last save.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clears the modified flag after the content was persisted.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    // ==================== Editing ====================

    /// Inserts one character at the cursor and advances it by one column.
    ///
    /// A line separator is treated as `new_line`, so lines never contain one.
    pub fn insert_char(&mut self, c: char) -> BufferResult<()> {
        if c == LINE_SEPARATOR {
            return self.new_line();
        }

        let idx = self.cursor_byte_index()?;
        self.lines[self.cursor.row].insert(idx, c);
        self.cursor.column += 1;
        self.after_edit();
        Ok(())
    }

    /// Inserts text at the cursor; embedded separators start new lines.
    ///
    /// The cursor ends right after the inserted text.
    pub fn insert_str(&mut self, text: &str) -> BufferResult<()> {
        let idx = self.cursor_byte_index()?;
        if text.is_empty() {
            return Ok(());
        }

        let row = self.cursor.row;
        let suffix = self.lines[row].split_off(idx);
        let mut fragments = text.split(LINE_SEPARATOR);

        // `split` always yields at least one fragment
        let first = fragments.next().unwrap_or_default();
        self.lines[row].push_str(first);

        let mut new_lines: Vec<String> = fragments.map(String::from).collect();
        let cursor = match new_lines.last() {
            Some(last) => Position::new(text::char_len(last), row + new_lines.len()),
            None => Position::new(self.cursor.column + text::char_len(first), row),
        };

        match new_lines.last_mut() {
            Some(last) => last.push_str(&suffix),
            None => self.lines[row].push_str(&suffix),
        }
        self.lines.splice(row + 1..row + 1, new_lines);

        self.cursor = cursor;
        self.after_edit();
        Ok(())
    }

    /// Splits the cursor line at the cursor; the cursor moves to the start
    /// of the new line.
    pub fn new_line(&mut self) -> BufferResult<()> {
        let idx = self.cursor_byte_index()?;
        let row = self.cursor.row;

        let suffix = self.lines[row].split_off(idx);
        self.lines.insert(row + 1, suffix);

        self.cursor = Position::new(0, row + 1);
        self.after_edit();
        Ok(())
    }

    // ==================== Cursor Movement ====================

    /// Moves the cursor by a relative offset under the buffer's move policy.
    ///
    /// An active selection's head follows the cursor.
    pub fn move_cursor(&mut self, delta_column: isize, delta_row: isize) -> BufferResult<()> {
        let target = match self.config.move_policy {
            MovePolicy::Wrap => self.wrapped_target(delta_column, delta_row),
            MovePolicy::Strict => self.strict_target(delta_column, delta_row)?,
        };
        self.cursor = target;
        self.sync_selection_head();
        Ok(())
    }

    /// Moves the cursor to an absolute position, rejecting invalid ones.
    pub fn set_cursor(&mut self, pos: Position) -> BufferResult<()> {
        self.validate(pos)?;
        self.cursor = pos;
        self.sync_selection_head();
        Ok(())
    }

    fn wrapped_target(&self, delta_column: isize, delta_row: isize) -> Position {
        let last_row = self.lines.len() - 1;
        let row = (self.cursor.row as isize)
            .saturating_add(delta_row)
            .clamp(0, last_row as isize) as usize;
        let row_len = text::char_len(&self.lines[row]);
        let column = (self.cursor.column as isize).saturating_add(delta_column);

        if column < 0 {
            if row > 0 {
                Position::new(text::char_len(&self.lines[row - 1]), row - 1)
            } else {
                Position::ZERO
            }
        } else if column as usize > row_len {
            if row < last_row {
                Position::new(0, row + 1)
            } else {
                Position::new(row_len, row)
            }
        } else {
            Position::new(column as usize, row)
        }
    }

    fn strict_target(&self, delta_column: isize, delta_row: isize) -> BufferResult<Position> {
        let row = (self.cursor.row as isize).saturating_add(delta_row);
        let column = (self.cursor.column as isize).saturating_add(delta_column);
        let invalid = BufferError::InvalidPosition {
            row: row.max(0) as usize,
            column: column.max(0) as usize,
        };

        if row < 0 || column < 0 {
            return Err(invalid);
        }
        let pos = Position::new(column as usize, row as usize);
        self.validate(pos).map_err(|_| invalid)?;
        Ok(pos)
    }

    // ==================== Selection ====================

    /// Starts a selection at the cursor, replacing any previous one.
    pub fn start_selection(&mut self) {
        self.selection = Selection::at(self.cursor);
    }

    /// Deactivates the selection. Anchor and head are kept but inert.
    pub fn end_selection(&mut self) {
        self.selection.active = false;
    }

    /// Selects the whole buffer, leaving the cursor at the end.
    pub fn select_all(&mut self) {
        let last_row = self.lines.len() - 1;
        let end = Position::new(text::char_len(&self.lines[last_row]), last_row);
        self.selection = Selection {
            anchor: Position::ZERO,
            head: end,
            active: true,
        };
        self.cursor = end;
    }

    /// Returns the selected text, rows joined by the line separator.
    pub fn selection_text(&self) -> BufferResult<String> {
        let (start, end) = self
            .selection_bounds()
            .ok_or(BufferError::NoActiveSelection)?;
        self.text_between(start, end)
    }

    /// Removes the selected text and returns it.
    ///
    /// The cursor moves to the selection start and the selection ends.
    pub fn delete_selection(&mut self) -> BufferResult<String> {
        let (start, end) = self
            .selection_bounds()
            .ok_or(BufferError::NoActiveSelection)?;

        if self.selection.is_empty() {
            self.cursor = start;
            self.selection.active = false;
            return Ok(String::new());
        }

        let removed = self.text_between(start, end)?;
        let (prefix, _) = self.split_line(start)?;
        let (_, suffix) = self.split_line(end)?;
        let merged = format!("{prefix}{suffix}");

        self.lines.splice(start.row..=end.row, std::iter::once(merged));
        self.cursor = start;
        self.selection.active = false;
        self.after_edit();
        Ok(removed)
    }

    /// Replaces the selected text with `text` and returns what was removed.
    ///
    /// The cursor ends right after the inserted text.
    pub fn replace_selection(&mut self, text: &str) -> BufferResult<String> {
        let removed = self.delete_selection()?;
        self.insert_str(text)?;
        Ok(removed)
    }

    // ==================== Helpers ====================

    /// Checks a position against the current lines.
    fn validate(&self, pos: Position) -> BufferResult<()> {
        match self.line_len(pos.row) {
            Some(len) if pos.column <= len => Ok(()),
            _ => Err(BufferError::InvalidPosition {
                row: pos.row,
                column: pos.column,
            }),
        }
    }

    fn cursor_byte_index(&self) -> BufferResult<usize> {
        let invalid = BufferError::InvalidPosition {
            row: self.cursor.row,
            column: self.cursor.column,
        };
        let line = self.line(self.cursor.row).ok_or(invalid.clone())?;
        text::byte_index(line, self.cursor.column).ok_or(invalid)
    }

    fn split_line(&self, pos: Position) -> BufferResult<(&str, &str)> {
        self.line(pos.row)
            .and_then(|line| text::split_at_column(line, pos.column))
            .ok_or(BufferError::InvalidPosition {
                row: pos.row,
                column: pos.column,
            })
    }

    /// Text in `[start, end)`, `start <= end`.
    fn text_between(&self, start: Position, end: Position) -> BufferResult<String> {
        if start.row == end.row {
            let (_, tail) = self.split_line(start)?;
            return text::slice_columns(tail, 0, end.column - start.column)
                .map(String::from)
                .ok_or(BufferError::InvalidPosition {
                    row: end.row,
                    column: end.column,
                });
        }

        let (_, first) = self.split_line(start)?;
        let (last, _) = self.split_line(end)?;

        let mut result = String::from(first);
        result.push(LINE_SEPARATOR);
        for line in &self.lines[start.row + 1..end.row] {
            result.push_str(line);
            result.push(LINE_SEPARATOR);
        }
        result.push_str(last);
        Ok(result)
    }

    fn sync_selection_head(&mut self) {
        if self.selection.active {
            self.selection.head = self.cursor;
        }
    }

    /// Bookkeeping shared by every content mutation.
    fn after_edit(&mut self) {
        self.modified = true;
        self.sync_selection_head();
        self.clamp_selection();
    }

    /// Pulls a stale anchor/head back inside the buffer after lines shrank.
    ///
    /// Coordinates are clamped, not shifted: an edit before the anchor on
    /// the same row leaves the anchor column where it was.
    fn clamp_selection(&mut self) {
        if !self.selection.active {
            return;
        }
        self.selection.anchor = self.clamp(self.selection.anchor);
        self.selection.head = self.clamp(self.selection.head);
    }

    fn clamp(&self, pos: Position) -> Position {
        let row = pos.row.min(self.lines.len() - 1);
        let column = pos.column.min(text::char_len(&self.lines[row]));
        Position::new(column, row)
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        let mut buffer = Self::new();
        buffer.load(s);
        buffer
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(buffer: &mut TextBuffer, text: &str) {
        for c in text.chars() {
            buffer.insert_char(c).unwrap();
        }
    }

    fn strict() -> TextBuffer {
        TextBuffer::with_config(BufferConfig {
            move_policy: MovePolicy::Strict,
        })
    }

    #[test]
    fn test_greeting_walkthrough() {
        let mut buffer = TextBuffer::new();
        type_text(&mut buffer, "Hello, World!");
        assert_eq!(buffer.lines(), ["Hello, World!"]);
        assert_eq!(buffer.cursor(), Position::new(13, 0));

        buffer.move_cursor(-13, 0).unwrap();
        assert_eq!(buffer.cursor(), Position::ZERO);
        buffer.start_selection();
        buffer.move_cursor(5, 0).unwrap();
        assert_eq!(buffer.selection_text().unwrap(), "Hello");

        buffer.delete_selection().unwrap();
        assert_eq!(buffer.lines(), [", World!"]);
        assert_eq!(buffer.cursor(), Position::ZERO);
        assert!(!buffer.has_selection());

        type_text(&mut buffer, "Greetings");
        assert_eq!(buffer.lines(), ["Greetings, World!"]);
    }

    #[test]
    fn test_new_line_at_end_of_row() {
        let mut buffer = TextBuffer::from("abc\ndef");
        buffer.set_cursor(Position::new(3, 0)).unwrap();
        buffer.new_line().unwrap();
        assert_eq!(buffer.lines(), ["abc", "", "def"]);
        assert_eq!(buffer.cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_new_line_mid_row() {
        let mut buffer = TextBuffer::from("hello");
        buffer.set_cursor(Position::new(2, 0)).unwrap();
        buffer.new_line().unwrap();
        assert_eq!(buffer.lines(), ["he", "llo"]);
    }

    #[test]
    fn test_multirow_selection() {
        let mut buffer = TextBuffer::from("abc\ndef");
        buffer.set_cursor(Position::new(1, 0)).unwrap();
        buffer.start_selection();
        buffer.set_cursor(Position::new(1, 1)).unwrap();
        assert_eq!(buffer.selection_text().unwrap(), "bc\nd");

        // The removed span includes the separator, so the rows merge
        buffer.delete_selection().unwrap();
        assert_eq!(buffer.lines(), ["aef"]);
        assert_eq!(buffer.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_selection_text_with_middle_rows() {
        let mut buffer = TextBuffer::from("one\ntwo\nthree\nfour");
        buffer.set_cursor(Position::new(2, 3)).unwrap();
        buffer.start_selection();
        buffer.set_cursor(Position::new(1, 0)).unwrap();
        assert_eq!(buffer.selection_text().unwrap(), "ne\ntwo\nthree\nfo");

        buffer.delete_selection().unwrap();
        assert_eq!(buffer.lines(), ["our"]);
        assert_eq!(buffer.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_backward_selection_normalizes() {
        let mut buffer = TextBuffer::from("Hello");
        buffer.set_cursor(Position::new(5, 0)).unwrap();
        buffer.start_selection();
        buffer.move_cursor(-3, 0).unwrap();
        assert_eq!(buffer.selection().anchor, Position::new(5, 0));
        assert_eq!(buffer.selection_text().unwrap(), "llo");
        assert_eq!(
            buffer.selection_bounds(),
            Some((Position::new(2, 0), Position::new(5, 0)))
        );
    }

    #[test]
    fn test_no_active_selection_errors() {
        let mut buffer = TextBuffer::from("abc");
        assert_eq!(buffer.selection_text(), Err(BufferError::NoActiveSelection));
        assert_eq!(buffer.delete_selection(), Err(BufferError::NoActiveSelection));
        assert_eq!(
            buffer.replace_selection("x"),
            Err(BufferError::NoActiveSelection)
        );
        assert_eq!(buffer.lines(), ["abc"]);
        assert!(!buffer.contains_position(Position::ZERO));
    }

    #[test]
    fn test_end_selection_idempotent() {
        let mut buffer = TextBuffer::from("abc");
        buffer.start_selection();
        buffer.move_cursor(2, 0).unwrap();
        buffer.end_selection();
        let once = *buffer.selection();
        buffer.end_selection();
        assert_eq!(*buffer.selection(), once);
        assert!(!once.active);
        assert_eq!(once.head, Position::new(2, 0));
    }

    #[test]
    fn test_start_selection_restarts_anchor() {
        let mut buffer = TextBuffer::from("abcdef");
        buffer.start_selection();
        buffer.move_cursor(2, 0).unwrap();
        buffer.start_selection();
        buffer.move_cursor(2, 0).unwrap();
        assert_eq!(buffer.selection_text().unwrap(), "cd");
    }

    #[test]
    fn test_insert_extends_selection_head() {
        let mut buffer = TextBuffer::new();
        buffer.start_selection();
        type_text(&mut buffer, "ab");
        assert_eq!(buffer.selection().head, Position::new(2, 0));
        assert_eq!(buffer.selection_text().unwrap(), "ab");
    }

    #[test]
    fn test_insert_then_delete_restores_line() {
        let mut buffer = TextBuffer::from("héllo");
        buffer.set_cursor(Position::new(2, 0)).unwrap();
        buffer.insert_char('ß').unwrap();
        assert_eq!(buffer.lines(), ["héßllo"]);

        buffer.move_cursor(-1, 0).unwrap();
        buffer.start_selection();
        buffer.move_cursor(1, 0).unwrap();
        buffer.delete_selection().unwrap();
        assert_eq!(buffer.lines(), ["héllo"]);
    }

    #[test]
    fn test_multibyte_columns() {
        let mut buffer = TextBuffer::new();
        type_text(&mut buffer, "日本語");
        assert_eq!(buffer.cursor(), Position::new(3, 0));
        buffer.move_cursor(-1, 0).unwrap();
        buffer.new_line().unwrap();
        assert_eq!(buffer.lines(), ["日本", "語"]);
        assert_eq!(buffer.display_column(Position::new(2, 0)).unwrap(), 4);
    }

    #[test]
    fn test_insert_char_separator_splits_line() {
        let mut buffer = TextBuffer::from("ab");
        buffer.set_cursor(Position::new(1, 0)).unwrap();
        buffer.insert_char('\n').unwrap();
        assert_eq!(buffer.lines(), ["a", "b"]);
        assert_eq!(buffer.cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_insert_str_multiline() {
        let mut buffer = TextBuffer::from("[]");
        buffer.set_cursor(Position::new(1, 0)).unwrap();
        buffer.insert_str("one\ntwo\nthree").unwrap();
        assert_eq!(buffer.lines(), ["[one", "two", "three]"]);
        assert_eq!(buffer.cursor(), Position::new(5, 2));

        buffer.insert_str("").unwrap();
        assert_eq!(buffer.cursor(), Position::new(5, 2));
    }

    #[test]
    fn test_replace_selection() {
        let mut buffer = TextBuffer::from("Hello, World!");
        buffer.start_selection();
        buffer.move_cursor(5, 0).unwrap();
        let removed = buffer.replace_selection("Goodbye\ncruel").unwrap();
        assert_eq!(removed, "Hello");
        assert_eq!(buffer.lines(), ["Goodbye", "cruel, World!"]);
        assert_eq!(buffer.cursor(), Position::new(5, 1));
        assert!(!buffer.has_selection());
    }

    #[test]
    fn test_wrap_movement() {
        let mut buffer = TextBuffer::from("abc\nde\nfghi");
        buffer.set_cursor(Position::new(0, 1)).unwrap();

        // Left from column 0 lands at the end of the previous row
        buffer.move_cursor(-1, 0).unwrap();
        assert_eq!(buffer.cursor(), Position::new(3, 0));

        // Right past the end lands at the start of the next row
        buffer.move_cursor(1, 0).unwrap();
        assert_eq!(buffer.cursor(), Position::new(0, 1));

        // Rows clamp
        buffer.move_cursor(0, 10).unwrap();
        assert_eq!(buffer.cursor(), Position::new(0, 2));
        buffer.move_cursor(0, -10).unwrap();
        assert_eq!(buffer.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_wrap_movement_at_edges() {
        let mut buffer = TextBuffer::from("ab\ncd");
        buffer.move_cursor(-1, 0).unwrap();
        assert_eq!(buffer.cursor(), Position::ZERO);

        buffer.set_cursor(Position::new(2, 1)).unwrap();
        buffer.move_cursor(5, 0).unwrap();
        assert_eq!(buffer.cursor(), Position::new(2, 1));
    }

    #[test]
    fn test_vertical_move_wraps_past_short_line() {
        let mut buffer = TextBuffer::from("long line\nab\nlong line");
        buffer.set_cursor(Position::new(7, 0)).unwrap();
        buffer.move_cursor(0, 1).unwrap();
        assert_eq!(buffer.cursor(), Position::new(0, 2));

        // On the last row the column clamps instead
        let mut buffer = TextBuffer::from("long line\nab");
        buffer.set_cursor(Position::new(7, 0)).unwrap();
        buffer.move_cursor(0, 1).unwrap();
        assert_eq!(buffer.cursor(), Position::new(2, 1));
    }

    #[test]
    fn test_empty_selection_edits_keep_unmodified() {
        let mut buffer = TextBuffer::from("abc");
        buffer.set_cursor(Position::new(1, 0)).unwrap();
        buffer.start_selection();
        assert_eq!(buffer.delete_selection().unwrap(), "");
        assert_eq!(buffer.cursor(), Position::new(1, 0));
        assert!(!buffer.has_selection());
        assert!(!buffer.is_modified());

        buffer.start_selection();
        buffer.replace_selection("").unwrap();
        assert_eq!(buffer.lines(), ["abc"]);
        assert!(!buffer.is_modified());

        buffer.start_selection();
        buffer.move_cursor(1, 0).unwrap();
        buffer.replace_selection("").unwrap();
        assert_eq!(buffer.lines(), ["ac"]);
        assert!(buffer.is_modified());
    }

    #[test]
    fn test_strict_movement_rejects() {
        let mut buffer = strict();
        buffer.load("abc\nde");
        assert_eq!(
            buffer.move_cursor(-1, 0),
            Err(BufferError::InvalidPosition { row: 0, column: 0 })
        );
        assert_eq!(
            buffer.move_cursor(0, 2),
            Err(BufferError::InvalidPosition { row: 2, column: 0 })
        );
        assert_eq!(buffer.cursor(), Position::ZERO);

        buffer.move_cursor(3, 0).unwrap();
        assert!(buffer.move_cursor(0, 1).is_err());
        assert_eq!(buffer.cursor(), Position::new(3, 0));
        buffer.move_cursor(-1, 1).unwrap();
        assert_eq!(buffer.cursor(), Position::new(2, 1));
    }

    #[test]
    fn test_set_cursor_rejects_out_of_bounds() {
        let mut buffer = TextBuffer::from("abc");
        assert!(buffer.set_cursor(Position::new(4, 0)).is_err());
        assert!(buffer.set_cursor(Position::new(0, 1)).is_err());
        assert_eq!(buffer.cursor(), Position::ZERO);
    }

    #[test]
    fn test_stale_anchor_is_clamped_after_new_line() {
        let mut buffer = TextBuffer::from("abcdef");
        buffer.set_cursor(Position::new(5, 0)).unwrap();
        buffer.start_selection();
        buffer.move_cursor(-3, 0).unwrap();

        // Splitting before the anchor shortens row 0 to two characters
        buffer.new_line().unwrap();
        assert_eq!(buffer.lines(), ["ab", "cdef"]);
        assert_eq!(buffer.selection().anchor, Position::new(2, 0));
        assert_eq!(buffer.selection().head, Position::new(0, 1));
        assert_eq!(buffer.selection_text().unwrap(), "\n");
    }

    #[test]
    fn test_anchor_not_shifted_by_insert() {
        let mut buffer = TextBuffer::from("abcdef");
        buffer.set_cursor(Position::new(4, 0)).unwrap();
        buffer.start_selection();
        buffer.set_cursor(Position::new(1, 0)).unwrap();
        buffer.insert_char('X').unwrap();
        assert_eq!(buffer.lines(), ["aXbcdef"]);
        assert_eq!(buffer.selection().anchor, Position::new(4, 0));
        assert_eq!(buffer.selection_text().unwrap(), "bc");
    }

    #[test]
    fn test_select_all() {
        let mut buffer = TextBuffer::from("ab\ncd");
        buffer.select_all();
        assert_eq!(buffer.selection_text().unwrap(), "ab\ncd");
        assert_eq!(buffer.cursor(), Position::new(2, 1));
        buffer.delete_selection().unwrap();
        assert_eq!(buffer.lines(), [""]);
    }

    #[test]
    fn test_load_and_text() {
        let mut buffer = TextBuffer::new();
        buffer.insert_str("dirty").unwrap();
        buffer.start_selection();
        buffer.load("");
        assert_eq!(buffer.lines(), [""]);
        assert!(!buffer.has_selection());
        assert!(!buffer.is_modified());

        buffer.load("a\n\nb\n");
        assert_eq!(buffer.lines(), ["a", "", "b", ""]);
        assert_eq!(buffer.text(), "a\n\nb\n");
    }

    #[test]
    fn test_modified_flag() {
        let mut buffer = TextBuffer::from("abc");
        assert!(!buffer.is_modified());
        buffer.move_cursor(1, 0).unwrap();
        assert!(!buffer.is_modified());
        buffer.insert_char('x').unwrap();
        assert!(buffer.is_modified());
        buffer.mark_saved();
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_snapshot() {
        let mut buffer = TextBuffer::from("abc");
        buffer.set_source_name(Some("notes.txt".into()));
        buffer.start_selection();
        buffer.move_cursor(2, 0).unwrap();

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.source_name.as_deref(), Some("notes.txt"));
        assert_eq!(snapshot.cursor, Position::new(2, 0));
        assert_eq!(
            snapshot.selection,
            Some((Position::ZERO, Position::new(2, 0)))
        );
        assert!(!snapshot.modified);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["cursor"], serde_json::json!({ "column": 2, "row": 0 }));
        assert_eq!(json["lines"], serde_json::json!(["abc"]));
    }
}
