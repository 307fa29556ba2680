//! Edit operations.
//!
//! Each operation runs once per cursor in list order and sanitizes the cursor list afterwards.
//! Indentation arithmetic works in multiples of [`EditorOptions::indent_width`].
//!
//! [`EditorOptions::indent_width`]: crate::options::EditorOptions::indent_width

use crate::buffer::FileState;
use crate::line_index::LineColumn;
use crate::text::{char_len, leading_spaces};

impl FileState {
    /// Replace each selection (or insert at each caret) with `text`.
    pub fn write(&mut self, text: &str) {
        self.for_each_cursor("write", true, |state, idx| {
            let delta = state.delete_selection(idx);
            let pos = state.cursors[idx].pos();
            let inserted = state.splice(idx, pos, pos, text);
            state.refresh_saved_x(idx);
            delta + inserted
        });
    }

    /// Delete backwards: the selection, a soft tab, an empty pair, or one character.
    pub fn backspace(&mut self) {
        let width = self.options().indent();
        self.for_each_cursor("backspace", true, |state, idx| {
            if state.cursors[idx].has_selection() {
                return state.delete_selection(idx);
            }
            let pos = state.cursors[idx].pos();
            if pos == 0 {
                return 0;
            }

            let LineColumn { line, column } = state.line_column_of(pos);
            let blank_prefix = state
                .line(line)
                .is_some_and(|text| leading_spaces(text) >= column);

            let (start, end) = if column > 0 && blank_prefix {
                (pos - ((column - 1) % width + 1), pos)
            } else if state.pair_around(pos).is_some() {
                (pos - 1, pos + 1)
            } else {
                (pos - 1, pos)
            };
            let delta = state.splice(idx, start, end, "");
            state.refresh_saved_x(idx);
            delta
        });
    }

    /// Delete forwards: the selection or the character after the caret.
    pub fn delete(&mut self) {
        self.for_each_cursor("delete", true, |state, idx| {
            if state.cursors[idx].has_selection() {
                return state.delete_selection(idx);
            }
            let pos = state.cursors[idx].pos();
            if pos >= state.len() {
                return 0;
            }
            let delta = state.splice(idx, pos, pos + 1, "");
            state.refresh_saved_x(idx);
            delta
        });
    }

    /// Indent every line spanned by a cursor up to the next indent stop.
    pub fn shift_line(&mut self) {
        self.reindent("shift_line", true);
    }

    /// Outdent every line spanned by a cursor down to the previous indent stop.
    pub fn unshift_line(&mut self) {
        self.reindent("unshift_line", false);
    }

    /// Tab key: with any selection, indent the spanned lines; otherwise pad each caret with
    /// spaces up to the next indent stop.
    pub fn tab(&mut self) {
        if self.cursors.iter().any(|cursor| cursor.has_selection()) {
            self.shift_line();
            return;
        }
        let width = self.options().indent();
        self.for_each_cursor("tab", true, |state, idx| {
            let pos = state.cursors[idx].pos();
            let LineColumn { column, .. } = state.line_column_of(pos);
            let fill = " ".repeat(width - column % width);
            let delta = state.splice(idx, pos, pos, &fill);
            state.refresh_saved_x(idx);
            delta
        });
    }

    fn reindent(&mut self, op: &'static str, indent: bool) {
        let width = self.options().indent();
        // Lines only ever grow downwards in list order, so one high-water mark suffices.
        let mut done: Option<usize> = None;
        self.for_each_cursor(op, true, |state, idx| {
            let (start, end) = state.cursors[idx].span();
            let first = state.line_column_of(start).line;
            let last = state.line_column_of(end).line;
            let mut delta = 0;

            for line in first..=last {
                if done.is_some_and(|done| done >= line) {
                    continue;
                }
                done = Some(line);

                let spaces = state.line(line).map_or(0, leading_spaces);
                let line_start = state.offset_of(0, line);
                delta += if indent {
                    let fill = " ".repeat(width - spaces % width);
                    state.splice(idx, line_start, line_start, &fill)
                } else if spaces > 0 {
                    let amount = (spaces - 1) % width + 1;
                    state.splice(idx, line_start, line_start + amount, "")
                } else {
                    0
                };
            }
            state.refresh_saved_x(idx);
            delta
        });
    }

    /// Insert a newline keeping the current indent (snapped down to an indent stop).
    ///
    /// Between an empty bracket pair the pair is split over three lines with the caret on the
    /// indented middle one.
    pub fn enter(&mut self) {
        let width = self.options().indent();
        self.for_each_cursor("enter", true, |state, idx| {
            let mut delta = state.delete_selection(idx);
            let pos = state.cursors[idx].pos();
            let line = state.line_column_of(pos).line;
            let indent = state.line(line).map_or(0, leading_spaces) / width * width;

            let between_brackets = state
                .pair_around(pos)
                .is_some_and(|pair| pair.is_bracket());
            if between_brackets {
                let inner = format!("\n{}", " ".repeat(indent + width));
                let outer = format!("\n{}", " ".repeat(indent));
                delta += state.splice(idx, pos, pos, &format!("{inner}{outer}"));
                state.move_cursor(idx, pos + char_len(&inner), true);
            } else {
                delta += state.splice(idx, pos, pos, &format!("\n{}", " ".repeat(indent)));
                state.refresh_saved_x(idx);
            }
            delta
        });
    }

    /// Insert `open` and `close` around each selection, or as an empty pair at each caret.
    ///
    /// A wrapped selection stays selected: anchor after `open`, caret after the inner text.
    pub fn write_wrap(&mut self, open: &str, close: &str) {
        let open_len = char_len(open);
        self.for_each_cursor("write_wrap", true, |state, idx| {
            match state.cursors[idx].selection_range() {
                Some(range) => {
                    let inner = state.slice(range.start, range.end).to_string();
                    let wrapped = format!("{open}{inner}{close}");
                    let delta = state.splice(idx, range.start, range.end, &wrapped);
                    let anchor = range.start + open_len;
                    state.move_cursor(idx, anchor + char_len(&inner), true);
                    state.cursors[idx].sel = Some(anchor);
                    delta
                }
                None => {
                    let pos = state.cursors[idx].pos();
                    let delta = state.splice(idx, pos, pos, &format!("{open}{close}"));
                    state.move_cursor(idx, pos + open_len, true);
                    delta
                }
            }
        });
    }

    /// Type a closing token: step over it if it already follows the caret, otherwise insert it.
    pub fn write_or_pass(&mut self, text: &str) {
        let len = char_len(text);
        self.for_each_cursor("write_or_pass", true, |state, idx| {
            let mut delta = state.delete_selection(idx);
            let pos = state.cursors[idx].pos();
            if delta == 0 && len > 0 && state.slice(pos, pos + len) == text {
                state.move_cursor(idx, pos + len, true);
                return 0;
            }
            delta += state.splice(idx, pos, pos, text);
            state.refresh_saved_x(idx);
            delta
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::FileState;
    use crate::cursor::Cursor;
    use pretty_assertions::assert_eq;

    fn state_at(text: &str, pos: usize) -> FileState {
        let mut state = FileState::new(text);
        state.set_cursors([Cursor::caret(pos)], 0);
        state
    }

    fn caret(state: &FileState) -> usize {
        state.active_cursor().pos()
    }

    #[test]
    fn test_write_replaces_selection() {
        let mut state = FileState::new("hello world");
        state.set_cursors([Cursor::selection(6, 11)], 0);
        state.write("there");
        assert_eq!(state.text(), "hello there");
        assert_eq!(caret(&state), 11);
        assert_eq!(state.active_cursor().sel(), None);
    }

    #[test]
    fn test_backspace_pair() {
        let mut state = state_at("f()", 2);
        state.backspace();
        assert_eq!(state.text(), "f");
        assert_eq!(caret(&state), 1);
    }

    #[test]
    fn test_backspace_quote_pair() {
        let mut state = state_at("x = \"\"", 5);
        state.backspace();
        assert_eq!(state.text(), "x = ");
    }

    #[test]
    fn test_backspace_soft_tab() {
        let mut state = state_at("    x", 4);
        state.backspace();
        assert_eq!(state.text(), "x");
        assert_eq!(caret(&state), 0);

        let mut state = state_at("      x", 6);
        state.backspace();
        assert_eq!(state.text(), "    x");
    }

    #[test]
    fn test_backspace_at_column_zero_joins_lines() {
        let mut state = state_at("ab\n    c", 3);
        state.backspace();
        assert_eq!(state.text(), "ab    c");
        assert_eq!(caret(&state), 2);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut state = state_at("abc", 0);
        state.backspace();
        assert_eq!(state.text(), "abc");
    }

    #[test]
    fn test_delete_forward() {
        let mut state = state_at("abc", 1);
        state.delete();
        assert_eq!(state.text(), "ac");
        assert_eq!(caret(&state), 1);

        let mut state = state_at("abc", 3);
        state.delete();
        assert_eq!(state.text(), "abc");
    }

    #[test]
    fn test_delete_removes_selection_only() {
        let mut state = FileState::new("abcd");
        state.set_cursors([Cursor::selection(1, 3)], 0);
        state.delete();
        assert_eq!(state.text(), "ad");
        assert_eq!(caret(&state), 1);
        assert_eq!(state.active_cursor().sel(), None);
    }

    #[test]
    fn test_tab_pads_carets_to_next_stop() {
        let mut state = FileState::new("ab\nabcde");
        state.set_cursors([Cursor::caret(1), Cursor::caret(8)], 0);
        state.tab();
        assert_eq!(state.text(), "a   b\nabcde   ");
        let positions: Vec<usize> = state.cursors().iter().map(Cursor::pos).collect();
        assert_eq!(positions, vec![4, 14]);
    }

    #[test]
    fn test_tab_with_selection_indents_lines() {
        let mut state = FileState::new("ab\ncd");
        state.set_cursors([Cursor::selection(1, 4)], 0);
        state.tab();
        assert_eq!(state.text(), "    ab\n    cd");
    }

    #[test]
    fn test_outdent_rounds_to_previous_stop() {
        let mut state = state_at("     x", 6);
        state.unshift_line();
        assert_eq!(state.text(), "    x");
        assert_eq!(caret(&state), 5);
    }

    #[test]
    fn test_indent_rounds_to_next_stop() {
        let mut state = state_at("     x", 6);
        state.shift_line();
        assert_eq!(state.text(), "        x");
        assert_eq!(caret(&state), 9);
    }

    #[test]
    fn test_indent_selection_over_lines() {
        let mut state = FileState::new("a\nb\nc");
        state.set_cursors([Cursor::selection(0, 3)], 0);
        state.shift_line();
        assert_eq!(state.text(), "    a\n    b\nc");
        assert_eq!(state.active_cursor().span(), (4, 11));
    }

    #[test]
    fn test_indent_touches_shared_line_once() {
        let mut state = FileState::new("ab");
        state.set_cursors([Cursor::caret(1), Cursor::caret(2)], 0);
        state.shift_line();
        assert_eq!(state.text(), "    ab");
    }

    #[test]
    fn test_enter_keeps_snapped_indent() {
        let mut state = state_at("      x", 7);
        state.enter();
        assert_eq!(state.text(), "      x\n    ");
        assert_eq!(caret(&state), 12);
    }

    #[test]
    fn test_enter_between_brackets() {
        let mut state = state_at("fn f() {}", 8);
        state.enter();
        assert_eq!(state.text(), "fn f() {\n    \n}");
        assert_eq!(caret(&state), 13);
        assert_eq!(state.line_column_of(caret(&state)).line, 1);
    }

    #[test]
    fn test_enter_between_quotes_is_plain() {
        let mut state = state_at("\"\"", 1);
        state.enter();
        assert_eq!(state.text(), "\"\n\"");
    }

    #[test]
    fn test_write_wrap() {
        let mut state = state_at("ab", 1);
        state.write_wrap("(", ")");
        assert_eq!(state.text(), "a()b");
        assert_eq!(caret(&state), 2);

        let mut state = FileState::new("let x");
        state.set_cursors([Cursor::selection(4, 5)], 0);
        state.write_wrap("[", "]");
        assert_eq!(state.text(), "let [x]");
        assert_eq!(state.active_cursor().pos(), 6);
        assert_eq!(state.active_cursor().sel(), Some(5));
    }

    #[test]
    fn test_write_or_pass() {
        let mut state = state_at("f()", 2);
        state.write_or_pass(")");
        assert_eq!(state.text(), "f()");
        assert_eq!(caret(&state), 3);

        let mut state = state_at("f(x", 3);
        state.write_or_pass(")");
        assert_eq!(state.text(), "f(x)");
        assert_eq!(caret(&state), 4);
    }

    #[test]
    fn test_write_or_pass_replaces_selection_without_stepping() {
        let mut state = FileState::new("(ab)");
        state.set_cursors([Cursor::selection(1, 3)], 0);
        state.write_or_pass(")");
        assert_eq!(state.text(), "())");
        assert_eq!(caret(&state), 2);
        assert_eq!(state.active_cursor().sel(), None);
    }

    #[test]
    fn test_multi_cursor_write_shifts_later_cursors() {
        let mut state = FileState::new("a\nb\nc");
        state.set_cursors([Cursor::caret(1), Cursor::caret(3), Cursor::caret(5)], 0);
        state.write(";");
        assert_eq!(state.text(), "a;\nb;\nc;");
        let positions: Vec<usize> = state.cursors().iter().map(Cursor::pos).collect();
        assert_eq!(positions, vec![2, 5, 8]);
    }
}
