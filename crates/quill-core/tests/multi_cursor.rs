use pretty_assertions::assert_eq;
use quill_core::{Cursor, CursorCommand, FileState, Modifiers, command_for_key};

fn spans(state: &FileState) -> Vec<(usize, usize)> {
    state.cursors().iter().map(Cursor::span).collect()
}

#[test]
fn test_find_next_builds_a_multi_cursor_rename() {
    let mut state = FileState::new("let foo = foo + bar(foo);");
    state.set_cursors([Cursor::selection(4, 7)], 0);

    let ctrl_d = command_for_key("d", Modifiers::CTRL).unwrap();
    state.execute(ctrl_d.clone());
    state.execute(ctrl_d.clone());
    assert_eq!(spans(&state), vec![(4, 7), (10, 13), (20, 23)]);

    // No fourth occurrence: nothing changes.
    state.execute(ctrl_d);
    assert_eq!(state.cursors().len(), 3);

    state.write("baz");
    assert_eq!(state.text(), "let baz = baz + bar(baz);");
    assert_eq!(
        state.cursors().iter().map(Cursor::pos).collect::<Vec<_>>(),
        vec![7, 13, 23]
    );
}

#[test]
fn test_find_next_never_duplicates_spans() {
    let mut state = FileState::new("ab ab");
    state.set_cursors([Cursor::selection(0, 2)], 0);
    for _ in 0..5 {
        state.find_next();
    }
    let spans = spans(&state);
    assert_eq!(spans, vec![(0, 2), (3, 5)]);
}

#[test]
fn test_multi_cursor_backspace_merges_touching_carets() {
    let mut state = FileState::new("abc");
    state.set_cursors([Cursor::caret(1), Cursor::caret(2)], 1);
    state.backspace();
    assert_eq!(state.text(), "c");
    assert_eq!(state.cursors(), &[Cursor::caret(0)]);
    assert_eq!(state.active_index(), 0);
}

#[test]
fn test_multi_cursor_enter_and_indent() {
    let mut state = FileState::new("a\nb");
    state.set_cursors([Cursor::caret(1), Cursor::caret(3)], 0);
    state.enter();
    assert_eq!(state.text(), "a\n\nb\n");

    state.shift_line();
    assert_eq!(state.text(), "a\n    \nb\n    ");
}

#[test]
fn test_selections_touching_stay_separate_but_carets_merge() {
    let mut state = FileState::new("abcdef");
    state.set_cursors([Cursor::selection(0, 3), Cursor::selection(3, 6)], 0);
    assert_eq!(state.cursors().len(), 2);

    state.set_cursors([Cursor::selection(0, 3), Cursor::caret(3)], 1);
    assert_eq!(state.cursors().len(), 1);
    assert_eq!(state.active_index(), 0);
}

#[test]
fn test_escape_keeps_main_cursor() {
    let mut state = FileState::new("one two three");
    state.set_cursors([Cursor::caret(4)], 0);
    state.add_cursor(0);
    state.add_cursor(8);
    assert_eq!(state.main_cursor().pos(), 4);

    state.execute(CursorCommand::CollapseToMain.into());
    assert_eq!(spans(&state), vec![(4, 4)]);
    assert_eq!(state.active_cursor().saved_x(), 4);
}

#[test]
fn test_active_selection_sync_merges_into_neighbor() {
    let mut state = FileState::new("0123456789");
    state.set_cursors([Cursor::caret(2), Cursor::caret(8)], 1);
    state.set_active_selection(1, 9);
    assert_eq!(spans(&state), vec![(1, 9)]);
    assert_eq!(state.active_cursor().pos(), 1);
    assert_eq!(state.active_cursor().sel(), Some(9));
}

#[test]
fn test_selected_texts_for_copy() {
    let mut state = FileState::new("alpha beta gamma");
    state.set_cursors(
        [
            Cursor::selection(11, 16),
            Cursor::caret(6),
            Cursor::selection(5, 0),
        ],
        0,
    );
    assert_eq!(
        state.selected_texts(),
        vec!["alpha".to_string(), String::new(), "gamma".to_string()]
    );
    assert_eq!(state.selection_text(), "alpha\ngamma");
}

#[test]
fn test_vertical_motion_across_cursors() {
    let mut state = FileState::new("abc\ndef\nghi");
    state.set_cursors([Cursor::caret(1), Cursor::caret(5)], 0);
    state.cursor_down(false);
    assert_eq!(
        state.cursors().iter().map(Cursor::pos).collect::<Vec<_>>(),
        vec![5, 9]
    );
    state.cursor_up(false);
    state.cursor_up(false);
    assert_eq!(spans(&state), vec![(1, 1)]);
}
