//! Code-point arithmetic on `&str`.
//!
//! Rust strings are UTF-8 and index by byte. These helpers translate a
//! column (code points) into a byte offset so slicing never lands inside a
//! multi-byte character.

use unicode_width::UnicodeWidthStr;

/// Number of code points in `s`.
#[inline]
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of `column` in `s`, or `None` if the column is past the end.
///
/// `column == char_len(s)` maps to `s.len()`.
pub(crate) fn byte_index(s: &str, column: usize) -> Option<usize> {
    s.char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(s.len()))
        .nth(column)
}

/// Splits `s` at a column.
pub(crate) fn split_at_column(s: &str, column: usize) -> Option<(&str, &str)> {
    byte_index(s, column).map(|idx| s.split_at(idx))
}

/// Sub-slice between two columns, `start <= end`.
pub(crate) fn slice_columns(s: &str, start: usize, end: usize) -> Option<&str> {
    let from = byte_index(s, start)?;
    let to = byte_index(s, end)?;
    s.get(from..to)
}

/// Terminal cell width of the first `column` code points of `s`.
pub(crate) fn display_width(s: &str, column: usize) -> usize {
    match split_at_column(s, column) {
        Some((prefix, _)) => prefix.width(),
        None => s.width(),
    }
}
