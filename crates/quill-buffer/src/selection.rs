//! Text selection handling.
//!
//! ## Stored vs. normalized
//!
//! A selection is stored in interaction order: `anchor` is where the user
//! started, `head` follows the cursor. Edits and queries work on the
//! normalized `(start, end)` pair, which is computed on demand and uses an
//! exclusive end, like Rust's `Range<T>`.

use crate::Position;
use serde::{Deserialize, Serialize};

/// The buffer's single selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Where the selection began
    pub anchor: Position,
    /// Live end of the selection, kept in sync with the cursor
    pub head: Position,
    /// Whether the selection is in effect
    pub active: bool,
}

impl Selection {
    /// Creates an active, zero-length selection at a position.
    pub fn at(position: Position) -> Self {
        Self {
            anchor: position,
            head: position,
            active: true,
        }
    }

    /// Returns `(start, end)` with `start <= end`, regardless of direction.
    pub fn normalized(&self) -> (Position, Position) {
        if self.anchor.is_after(&self.head) {
            (self.head, self.anchor)
        } else {
            (self.anchor, self.head)
        }
    }

    /// Returns true if anchor and head coincide.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Returns true if an active selection covers `pos`.
    ///
    /// The span is `[start, end)`: the end column on the last row is excluded.
    pub fn contains(&self, pos: Position) -> bool {
        if !self.active {
            return false;
        }
        let (start, end) = self.normalized();
        pos >= start && pos < end
    }
}
