//! Literal text search.
//!
//! All inputs and outputs are **character offsets**. The query is escaped and compiled into a
//! regex, and matches may overlap: after a rejected candidate the scan resumes one character past
//! its start, not past its end.

use regex::Regex;

/// A half-open character range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl SearchMatch {
    /// Length of the match in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the match is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns `true` if the two ranges share at least one character.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }
}

/// Byte offset of every character start, plus one trailing entry for `text.len()`, so search
/// results can be reported in characters while the regex works on bytes.
#[derive(Debug)]
pub(crate) struct CharIndex {
    starts: Vec<usize>,
}

impl CharIndex {
    pub(crate) fn new(text: &str) -> Self {
        let starts = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { starts }
    }

    fn end_byte(&self) -> usize {
        self.starts.last().copied().unwrap_or(0)
    }

    pub(crate) fn char_count(&self) -> usize {
        self.starts.len().saturating_sub(1)
    }

    /// Offsets past the end land on the end of the text.
    pub(crate) fn char_to_byte(&self, char_offset: usize) -> usize {
        self.starts
            .get(char_offset)
            .copied()
            .unwrap_or_else(|| self.end_byte())
    }

    /// A byte inside a multi-byte character rounds up to the next character.
    pub(crate) fn byte_to_char(&self, byte_offset: usize) -> usize {
        let byte = byte_offset.min(self.end_byte());
        self.starts.partition_point(|&start| start < byte)
    }
}

fn compile_literal(query: &str) -> Option<Regex> {
    match Regex::new(&regex::escape(query)) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(%err, "literal search query rejected");
            None
        }
    }
}

/// Scan `[from, limit)` for match starts, returning the first accepted occurrence.
fn scan(
    text: &str,
    re: &Regex,
    index: &CharIndex,
    from: usize,
    limit: usize,
    accept: &mut impl FnMut(SearchMatch) -> bool,
) -> Option<SearchMatch> {
    let mut start_char = from.min(index.char_count());
    while start_char < limit {
        let m = re.find_at(text, index.char_to_byte(start_char))?;
        let candidate = SearchMatch {
            start: index.byte_to_char(m.start()),
            end: index.byte_to_char(m.end()),
        };
        if candidate.start >= limit || candidate.is_empty() {
            return None;
        }
        if accept(candidate) {
            return Some(candidate);
        }
        start_char = candidate.start + 1;
    }
    None
}

/// Find the next occurrence of `query` at or after `from`.
///
/// Returns `None` if there is none, or if `query` is empty.
pub fn find_next(text: &str, query: &str, from: usize) -> Option<SearchMatch> {
    find_next_wrapping(text, query, from, |_| true)
        .filter(|m| m.start >= from.min(text.chars().count()))
}

/// Find the first occurrence of `query` accepted by `accept`, scanning forward from `from` and
/// then wrapping around to the start of the text.
///
/// The wrapped pass stops at the first match starting at or after `from`, so each occurrence is
/// offered to `accept` at most once.
pub fn find_next_wrapping(
    text: &str,
    query: &str,
    from: usize,
    mut accept: impl FnMut(SearchMatch) -> bool,
) -> Option<SearchMatch> {
    if query.is_empty() {
        return None;
    }
    let re = compile_literal(query)?;
    let index = CharIndex::new(text);
    let from = from.min(index.char_count());

    scan(text, &re, &index, from, usize::MAX, &mut accept)
        .or_else(|| scan(text, &re, &index, 0, from, &mut accept))
}

/// All occurrences of `query`, overlapping ones included, in ascending order.
pub fn find_all(text: &str, query: &str) -> Vec<SearchMatch> {
    let mut matches = Vec::new();
    find_next_wrapping(text, query, 0, |m| {
        matches.push(m);
        false
    });
    matches
}
