//! Text buffer.
//!
//! [`FileState`] owns the canonical text, a lazily rebuilt line view, and the ordered cursor list.
//! Every splice remaps every cursor, so callers never shift positions by hand.

use crate::cursor::Cursor;
use crate::line_index::{LineColumn, LineIndex};
use crate::options::{BracketPair, EditorOptions};
use crate::search::find_next_wrapping;
use crate::selection_set::normalize_cursors;
use crate::text::{Splice, char_len, char_to_byte};
use std::cell::OnceCell;

/// A text buffer with multiple cursors.
#[derive(Debug, Clone)]
pub struct FileState {
    code: String,
    lines: OnceCell<LineIndex>,
    pub(crate) cursors: Vec<Cursor>,
    pub(crate) active: usize,
    pub(crate) main: usize,
    options: EditorOptions,
}

impl Default for FileState {
    fn default() -> Self {
        Self::new("")
    }
}

impl FileState {
    /// Create a buffer with default options and a single caret at offset 0.
    pub fn new(text: &str) -> Self {
        Self::with_options(text, EditorOptions::default())
    }

    /// Create a buffer with explicit options.
    pub fn with_options(text: &str, options: EditorOptions) -> Self {
        Self {
            code: text.to_string(),
            lines: OnceCell::new(),
            cursors: vec![Cursor::caret(0)],
            active: 0,
            main: 0,
            options,
        }
    }

    /// The full text.
    pub fn text(&self) -> &str {
        &self.code
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.line_index().char_count()
    }

    /// Returns `true` if the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Editing options.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Replace the editing options.
    pub fn set_options(&mut self, options: EditorOptions) {
        self.options = options;
    }

    /// The derived line view, rebuilt on first read after a write.
    pub fn line_index(&self) -> &LineIndex {
        self.lines.get_or_init(|| LineIndex::from_text(&self.code))
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.line_index().line_count()
    }

    /// Text of a line without its newline.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.line_index().line(line)
    }

    /// Length of a line in characters.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_index().line_len(line)
    }

    /// Line/column of a character offset.
    pub fn line_column_of(&self, pos: usize) -> LineColumn {
        self.line_index().line_column_of(pos)
    }

    /// Character offset of a line/column pair.
    pub fn offset_of(&self, column: usize, line: usize) -> usize {
        self.line_index().offset_of(column, line)
    }

    /// Text between two character offsets (order-insensitive, clamped).
    pub fn slice(&self, a: usize, b: usize) -> &str {
        let start = char_to_byte(&self.code, a.min(b));
        let end = char_to_byte(&self.code, a.max(b));
        &self.code[start..end]
    }

    pub(crate) fn char_at(&self, pos: usize) -> Option<char> {
        self.code[char_to_byte(&self.code, pos)..].chars().next()
    }

    pub(crate) fn clamp(&self, pos: usize) -> usize {
        pos.min(self.len())
    }

    // --- cursors ---

    /// All cursors, ascending by position after every sanitized operation.
    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    /// Index of the cursor that receives external selection updates.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Index of the cursor that survives [`FileState::clear_secondary_cursors`].
    pub fn main_index(&self) -> usize {
        self.main
    }

    /// The active cursor.
    pub fn active_cursor(&self) -> Cursor {
        self.cursors[self.active]
    }

    /// The main cursor.
    pub fn main_cursor(&self) -> Cursor {
        self.cursors[self.main]
    }

    /// Replace the cursor list (e.g. when restoring host state).
    ///
    /// Positions are clamped, sticky columns recomputed, and the list sanitized. `active` also
    /// becomes the main cursor; out-of-range values fall back to the last cursor.
    pub fn set_cursors(&mut self, cursors: impl IntoIterator<Item = Cursor>, active: usize) {
        let len = self.len();
        self.cursors = cursors
            .into_iter()
            .map(|cursor| {
                let mut cursor = Cursor {
                    pos: cursor.pos.min(len),
                    sel: cursor.sel.map(|sel| sel.min(len)),
                    saved_x: 0,
                };
                cursor.collapse();
                cursor
            })
            .collect();
        let last = self.cursors.len().saturating_sub(1);
        self.active = active.min(last);
        self.main = self.active;
        for idx in 0..self.cursors.len() {
            self.refresh_saved_x(idx);
        }
        self.sanitize();
    }

    /// Add a caret at `pos` and make it active.
    pub fn add_cursor(&mut self, pos: usize) {
        let pos = self.clamp(pos);
        self.cursors.push(Cursor::caret(pos));
        self.active = self.cursors.len() - 1;
        self.refresh_saved_x(self.active);
        self.sanitize();
    }

    /// Drop every cursor except the main one.
    pub fn clear_secondary_cursors(&mut self) {
        let main = self.main_cursor();
        self.cursors = vec![main];
        self.active = 0;
        self.main = 0;
    }

    /// Select the whole buffer with a single cursor.
    pub fn select_all(&mut self) {
        let len = self.len();
        self.cursors = vec![Cursor::selection(0, len)];
        self.active = 0;
        self.main = 0;
        self.refresh_saved_x(0);
    }

    /// Apply an externally normalized focus/anchor pair to the active cursor, then re-sanitize.
    pub fn set_active_selection(&mut self, focus: usize, anchor: usize) {
        let focus = self.clamp(focus);
        let anchor = self.clamp(anchor);
        let idx = self.active;
        self.move_cursor(idx, focus, true);
        let cursor = &mut self.cursors[idx];
        cursor.sel = Some(anchor);
        cursor.collapse();
        self.sanitize();
    }

    /// Move one cursor to `pos` (clamped) and recompute its sticky column.
    ///
    /// The selection is cleared unless `unselect` is `false`.
    pub fn move_cursor(&mut self, idx: usize, pos: usize, unselect: bool) {
        let pos = self.clamp(pos);
        let Some(cursor) = self.cursors.get_mut(idx) else {
            return;
        };
        cursor.pos = pos;
        if unselect {
            cursor.unselect();
        }
        cursor.collapse();
        self.refresh_saved_x(idx);
    }

    pub(crate) fn refresh_saved_x(&mut self, idx: usize) {
        let Some(pos) = self.cursors.get(idx).map(Cursor::pos) else {
            return;
        };
        let column = self.line_column_of(pos).column;
        self.cursors[idx].saved_x = column;
    }

    /// Sort and merge cursors, repairing the active/main references.
    pub fn sanitize(&mut self) {
        let merged = normalize_cursors(&mut self.cursors, &mut self.active, &mut self.main);
        if merged > 0 {
            tracing::debug!(merged, remaining = self.cursors.len(), "merged cursors");
        }
    }

    // --- editing primitives ---

    /// Replace `[start, end)` with `text` and remap every cursor.
    ///
    /// A cursor sitting exactly on a pure insertion point moves past the inserted text only if it
    /// is `owner` or comes after it in the list. Returns the length delta.
    pub(crate) fn splice(&mut self, owner: usize, start: usize, end: usize, text: &str) -> isize {
        let start = self.clamp(start);
        let end = self.clamp(end).max(start);
        let splice = Splice {
            start,
            removed: end - start,
            inserted: char_len(text),
        };

        let start_byte = char_to_byte(&self.code, start);
        let end_byte = char_to_byte(&self.code, end);
        self.code.replace_range(start_byte..end_byte, text);
        self.lines = OnceCell::new();

        for (idx, cursor) in self.cursors.iter_mut().enumerate() {
            cursor.remap(&splice, idx >= owner);
            cursor.collapse();
        }
        splice.delta()
    }

    /// Run `edit` once per cursor in list order, then sanitize unless `sanitize` is `false`.
    pub(crate) fn for_each_cursor(
        &mut self,
        op: &'static str,
        sanitize: bool,
        mut edit: impl FnMut(&mut Self, usize) -> isize,
    ) {
        let mut delta = 0isize;
        for idx in 0..self.cursors.len() {
            delta += edit(self, idx);
        }
        tracing::trace!(op, cursors = self.cursors.len(), delta, "edit");
        if sanitize {
            self.sanitize();
        }
    }

    /// Delete the cursor's selection, leaving a caret at its start. Returns the length delta.
    pub(crate) fn delete_selection(&mut self, idx: usize) -> isize {
        let Some(range) = self.cursors[idx].selection_range() else {
            return 0;
        };
        let delta = self.splice(idx, range.start, range.end, "");
        self.move_cursor(idx, range.start, true);
        delta
    }

    /// The configured pair whose open char precedes `pos` and whose close char follows it.
    pub(crate) fn pair_around(&self, pos: usize) -> Option<BracketPair> {
        if pos == 0 {
            return None;
        }
        let before = self.char_at(pos - 1)?;
        let after = self.char_at(pos)?;
        self.options.pair_for(before, after).copied()
    }

    // --- read-outs ---

    /// Selected text of every cursor in list order (empty for bare carets).
    pub fn selected_texts(&self) -> Vec<String> {
        self.cursors
            .iter()
            .map(|cursor| {
                let (start, end) = cursor.span();
                self.slice(start, end).to_string()
            })
            .collect()
    }

    /// Non-empty selections joined by `'\n'`.
    pub fn selection_text(&self) -> String {
        self.selected_texts()
            .into_iter()
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Add a cursor selecting the next occurrence of the shared selected text.
    ///
    /// Every cursor must select the same non-empty text. The search starts at the end of the
    /// active cursor's selection and wraps; occurrences overlapping an existing cursor are
    /// skipped. Returns `true` if a cursor was added.
    pub fn find_next(&mut self) -> bool {
        let Some(first) = self.cursors.first().and_then(Cursor::selection_range) else {
            return false;
        };
        let needle = self.slice(first.start, first.end).to_string();
        let shared = self.cursors.iter().all(|cursor| {
            cursor
                .selection_range()
                .is_some_and(|range| self.slice(range.start, range.end) == needle)
        });
        if !shared {
            return false;
        }

        let spans: Vec<(usize, usize)> = self.cursors.iter().map(Cursor::span).collect();
        let from = self.active_cursor().span().1;
        let Some(found) = find_next_wrapping(&self.code, &needle, from, |candidate| {
            !spans
                .iter()
                .any(|&(start, end)| candidate.overlaps(start, end))
        }) else {
            tracing::debug!(needle = %needle, "find_next: no further occurrence");
            return false;
        };

        self.cursors.push(Cursor {
            pos: found.end,
            sel: Some(found.start),
            saved_x: 0,
        });
        self.active = self.cursors.len() - 1;
        self.refresh_saved_x(self.active);
        self.sanitize();
        tracing::debug!(start = found.start, end = found.end, "find_next: added cursor");
        true
    }
}
