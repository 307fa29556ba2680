//! Cursor motion.
//!
//! Extending motions seed the anchor from the caret when there is no selection yet and then move
//! only the caret. Vertical motion keeps the sticky column; every other motion recomputes it.

use crate::buffer::FileState;
use crate::line_index::LineColumn;
use crate::text::first_non_blank;

impl FileState {
    /// Move every cursor one line up.
    pub fn cursor_up(&mut self, extend: bool) {
        self.vertical("cursor_up", true, extend);
    }

    /// Move every cursor one line down.
    pub fn cursor_down(&mut self, extend: bool) {
        self.vertical("cursor_down", false, extend);
    }

    /// Move every cursor one character left.
    pub fn cursor_left(&mut self, extend: bool) {
        self.horizontal("cursor_left", true, extend);
    }

    /// Move every cursor one character right.
    pub fn cursor_right(&mut self, extend: bool) {
        self.horizontal("cursor_right", false, extend);
    }

    /// Toggle between the first non-blank column and column 0.
    pub fn home(&mut self, extend: bool) {
        self.for_each_cursor("home", true, |state, idx| {
            let LineColumn { line, column } = state.line_column_of(state.cursors[idx].pos());
            let first = state.line(line).map_or(0, first_non_blank);
            let target = if column == first { 0 } else { first };
            let pos = state.offset_of(target, line);
            state.jump(idx, pos, extend);
            0
        });
    }

    /// Move to the end of the line.
    pub fn end(&mut self, extend: bool) {
        self.for_each_cursor("end", true, |state, idx| {
            let line = state.line_column_of(state.cursors[idx].pos()).line;
            let pos = state.offset_of(state.line_len(line), line);
            state.jump(idx, pos, extend);
            0
        });
    }

    fn seed_anchor(&mut self, idx: usize) {
        let cursor = &mut self.cursors[idx];
        if cursor.sel.is_none() {
            cursor.sel = Some(cursor.pos);
        }
    }

    fn jump(&mut self, idx: usize, pos: usize, extend: bool) {
        if extend {
            self.seed_anchor(idx);
        }
        self.move_cursor(idx, pos, !extend);
    }

    fn vertical(&mut self, op: &'static str, up: bool, extend: bool) {
        self.for_each_cursor(op, true, |state, idx| {
            if extend {
                state.seed_anchor(idx);
            } else if state.cursors[idx].has_selection() {
                let swapped = state.cursors[idx].sort_selection(!up);
                state.cursors[idx].unselect();
                if swapped {
                    state.refresh_saved_x(idx);
                }
            }

            let cursor = state.cursors[idx];
            let line = state.line_column_of(cursor.pos()).line;
            let target = if up {
                line.checked_sub(1)
            } else {
                Some(line + 1).filter(|&next| next < state.line_count())
            };
            if let Some(target) = target {
                let column = cursor.saved_x().min(state.line_len(target));
                state.cursors[idx].pos = state.offset_of(column, target);
            }
            state.cursors[idx].collapse();
            0
        });
    }

    fn horizontal(&mut self, op: &'static str, left: bool, extend: bool) {
        self.for_each_cursor(op, true, |state, idx| {
            let cursor = state.cursors[idx];
            if !extend && cursor.has_selection() {
                let (start, end) = cursor.span();
                state.move_cursor(idx, if left { start } else { end }, true);
                return 0;
            }

            let pos = if left {
                cursor.pos().saturating_sub(1)
            } else {
                cursor.pos() + 1
            };
            state.jump(idx, pos, extend);
            0
        });
    }
}
