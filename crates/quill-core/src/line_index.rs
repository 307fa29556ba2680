//! Position Index
//!
//! Conversions between a flat character offset and `(line, column)` pairs, computed from a
//! line-split view of the buffer. The free functions are pure and O(lines) per call; [`LineIndex`]
//! is the derived line view a buffer caches between writes.

use crate::text::{char_len, split_lines};

/// Line/column coordinates (both zero-based, column counted in chars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct LineColumn {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the line.
    pub column: usize,
}

impl LineColumn {
    /// Create a new line/column pair.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Convert a character offset to line/column.
///
/// Lines are consumed (length + 1 for the newline) until the running total would pass `pos`.
/// Offsets beyond the buffer clamp to the end of the last line.
pub fn line_column_of(line_lengths: &[usize], pos: usize) -> LineColumn {
    let mut consumed = 0usize;
    for (line, &len) in line_lengths.iter().enumerate() {
        if pos <= consumed + len {
            return LineColumn::new(line, pos - consumed);
        }
        consumed += len + 1;
    }

    match line_lengths.last() {
        Some(&len) => LineColumn::new(line_lengths.len() - 1, len),
        None => LineColumn::default(),
    }
}

/// Convert line/column to a character offset: the lengths (+1) of all preceding lines plus
/// `column`.
pub fn offset_of(line_lengths: &[usize], column: usize, line: usize) -> usize {
    line_lengths
        .iter()
        .take(line)
        .map(|len| len + 1)
        .sum::<usize>()
        + column
}

/// Line-split view of a buffer (derived data; never the source of truth).
#[derive(Debug, Clone)]
pub struct LineIndex {
    lines: Vec<String>,
    lengths: Vec<usize>,
    char_count: usize,
}

impl LineIndex {
    /// Build the line view of `text` (split on `'\n'`).
    pub fn from_text(text: &str) -> Self {
        let lines = split_lines(text);
        let lengths: Vec<usize> = lines.iter().map(|line| char_len(line)).collect();
        let char_count = lengths.iter().sum::<usize>() + lengths.len().saturating_sub(1);
        Self {
            lines,
            lengths,
            char_count,
        }
    }

    /// Number of lines (an empty buffer has one empty line).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total character count, newlines included.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Text of a line, without its newline.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    /// Length of a line in chars (0 for lines past the end).
    pub fn line_len(&self, line: usize) -> usize {
        self.lengths.get(line).copied().unwrap_or(0)
    }

    /// Per-line char lengths.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// See [`line_column_of`].
    pub fn line_column_of(&self, pos: usize) -> LineColumn {
        line_column_of(&self.lengths, pos)
    }

    /// See [`offset_of`].
    pub fn offset_of(&self, column: usize, line: usize) -> usize {
        offset_of(&self.lengths, column, line)
    }
}
