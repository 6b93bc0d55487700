//! Cursor position and movement policy.
//!
//! ## Newtype over a tuple
//!
//! `Position` names its coordinates instead of passing `(usize, usize)`
//! around, so a row can never be mistaken for a column.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A caret location in the buffer.
///
/// `row` indexes a line; `column` is a code-point offset into that line.
/// `column == line length` is valid and means "after the last character".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Column (0-indexed, in code points not bytes)
    pub column: usize,
    /// Row (0-indexed line number)
    pub row: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Position at the start of the buffer.
    pub const ZERO: Position = Position { column: 0, row: 0 };

    /// Returns true if this position is before another in row-major order.
    pub fn is_before(&self, other: &Position) -> bool {
        self.row < other.row || (self.row == other.row && self.column < other.column)
    }

    /// Returns true if this position is after another.
    pub fn is_after(&self, other: &Position) -> bool {
        other.is_before(self)
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.row.cmp(&other.row) {
            Ordering::Equal => self.column.cmp(&other.column),
            other => other,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Same (column, row) order the buffer API uses
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// How `move_cursor` treats a candidate position outside the buffer.
///
/// A buffer picks one policy at construction and keeps it for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePolicy {
    /// Clamp the row; wrap the column across line boundaries.
    ///
    /// Moving left of column 0 lands at the end of the previous line and
    /// moving right past the end lands at the start of the next one. At
    /// the first and last rows the column clamps instead.
    #[default]
    Wrap,
    /// Reject any out-of-bounds candidate with `InvalidPosition`.
    Strict,
}
