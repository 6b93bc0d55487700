//! # Quill Buffer
//!
//! Line-oriented text buffer with a single cursor and an optional selection.
//!
//! ## Key Concepts
//!
//! ### Ownership & Borrowing
//! - `TextBuffer` owns its lines as a `Vec<String>`
//! - Accessors like `lines()` and `line()` hand out borrowed `&str`s
//! - Mutations require `&mut self`, so only one editor touches a buffer at a time
//!
//! ### Columns are code points
//! Every column in this crate counts `char`s, never bytes. Multi-byte
//! characters are a single column and are never split.

mod buffer;
mod cursor;
mod selection;
mod text;

pub use buffer::{BufferConfig, BufferSnapshot, TextBuffer};
pub use cursor::{MovePolicy, Position};
pub use selection::Selection;

/// Line separator used inside the buffer for load, save and selection text.
pub const LINE_SEPARATOR: char = '\n';

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations.
///
/// Both are recoverable: the buffer is left exactly as it was before the
/// failing call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("Position {column},{row} is out of bounds")]
    InvalidPosition { row: usize, column: usize },

    #[error("No active selection")]
    NoActiveSelection,
}
