//! Command Interface Layer
//!
//! Names every buffer operation as data so hosts can route input events through one entry point.
//!
//! # Overview
//!
//! - **Text Editing**: write, delete, indent, auto-pairing
//! - **Cursor Operations**: arrow/Home/End motion, collapsing to the main cursor, find-next, select-all
//! - **Key Table**: [`command_for_key`] maps key names to commands
//!
//! Each command maps to exactly one [`FileState`] method.
//!
//! # Example
//!
//! ```rust
//! use quill_core::{EditorCommand, FileState, Modifiers, command_for_key};
//!
//! let mut state = FileState::new("f");
//! state.move_cursor(0, 1, true);
//!
//! for key in ["(", "x", ")"] {
//!     if let Some(command) = command_for_key(key, Modifiers::default()) {
//!         state.execute(command);
//!     }
//! }
//! assert_eq!(state.text(), "f(x)");
//! ```

use crate::buffer::FileState;

/// Text editing commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert text at every caret (replacing selections)
    Write(String),
    /// Delete backwards
    Backspace,
    /// Delete forwards
    Delete,
    /// Newline with indentation
    Enter,
    /// Soft tab at carets; indents spanned lines when anything is selected
    Tab,
    /// Indent spanned lines
    Indent,
    /// Outdent spanned lines
    Outdent,
    /// Insert a pair, or wrap each selection in it
    WriteWrap {
        /// Opening token
        open: String,
        /// Closing token
        close: String,
    },
    /// Type a closing token, stepping over an identical one
    WriteOrPass(String),
}

/// Cursor commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorCommand {
    /// One line up
    Up {
        /// Extend the selection instead of moving the caret alone
        extend: bool,
    },
    /// One line down
    Down {
        /// Extend the selection
        extend: bool,
    },
    /// One character left
    Left {
        /// Extend the selection
        extend: bool,
    },
    /// One character right
    Right {
        /// Extend the selection
        extend: bool,
    },
    /// Toggle between first non-blank column and column 0
    Home {
        /// Extend the selection
        extend: bool,
    },
    /// End of line
    End {
        /// Extend the selection
        extend: bool,
    },
    /// Keep only the main cursor
    CollapseToMain,
    /// Add a cursor at the next occurrence of the shared selection
    FindNext,
    /// Select the whole buffer
    SelectAll,
}

/// Unified command enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Text editing commands
    Edit(EditCommand),
    /// Cursor commands
    Cursor(CursorCommand),
}

impl From<EditCommand> for EditorCommand {
    fn from(command: EditCommand) -> Self {
        Self::Edit(command)
    }
}

impl From<CursorCommand> for EditorCommand {
    fn from(command: CursorCommand) -> Self {
        Self::Cursor(command)
    }
}

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift
    pub shift: bool,
    /// Control
    pub ctrl: bool,
    /// Alt / Option
    pub alt: bool,
    /// Meta / Command
    pub meta: bool,
}

impl Modifiers {
    /// Only Shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only Control held.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Map a key name (DOM `KeyboardEvent.key` style) to a command.
///
/// Returns `None` for keys with no binding, including printable keys typed with Ctrl/Meta held.
pub fn command_for_key(key: &str, modifiers: Modifiers) -> Option<EditorCommand> {
    let extend = modifiers.shift;
    let wrap = |open: &str, close: &str| {
        Some(EditorCommand::Edit(EditCommand::WriteWrap {
            open: open.to_string(),
            close: close.to_string(),
        }))
    };

    if modifiers.command() {
        return match key {
            "d" | "D" => Some(CursorCommand::FindNext.into()),
            "a" | "A" => Some(CursorCommand::SelectAll.into()),
            _ => None,
        };
    }

    let command: EditorCommand = match key {
        "Backspace" => EditCommand::Backspace.into(),
        "Delete" => EditCommand::Delete.into(),
        "Enter" => EditCommand::Enter.into(),
        "Tab" if extend => EditCommand::Outdent.into(),
        "Tab" => EditCommand::Tab.into(),
        "ArrowUp" => CursorCommand::Up { extend }.into(),
        "ArrowDown" => CursorCommand::Down { extend }.into(),
        "ArrowLeft" => CursorCommand::Left { extend }.into(),
        "ArrowRight" => CursorCommand::Right { extend }.into(),
        "Home" => CursorCommand::Home { extend }.into(),
        "End" => CursorCommand::End { extend }.into(),
        "Escape" => CursorCommand::CollapseToMain.into(),
        "(" => return wrap("(", ")"),
        "[" => return wrap("[", "]"),
        "{" => return wrap("{", "}"),
        "\"" => return wrap("\"", "\""),
        ")" | "]" | "}" => EditCommand::WriteOrPass(key.to_string()).into(),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if !ch.is_control() => EditCommand::Write(key.to_string()).into(),
                _ => return None,
            }
        }
    };
    Some(command)
}

impl FileState {
    /// Execute one command.
    pub fn execute(&mut self, command: EditorCommand) {
        tracing::trace!(?command, "execute");
        match command {
            EditorCommand::Edit(edit) => match edit {
                EditCommand::Write(text) => self.write(&text),
                EditCommand::Backspace => self.backspace(),
                EditCommand::Delete => self.delete(),
                EditCommand::Enter => self.enter(),
                EditCommand::Tab => self.tab(),
                EditCommand::Indent => self.shift_line(),
                EditCommand::Outdent => self.unshift_line(),
                EditCommand::WriteWrap { open, close } => self.write_wrap(&open, &close),
                EditCommand::WriteOrPass(text) => self.write_or_pass(&text),
            },
            EditorCommand::Cursor(cursor) => match cursor {
                CursorCommand::Up { extend } => self.cursor_up(extend),
                CursorCommand::Down { extend } => self.cursor_down(extend),
                CursorCommand::Left { extend } => self.cursor_left(extend),
                CursorCommand::Right { extend } => self.cursor_right(extend),
                CursorCommand::Home { extend } => self.home(extend),
                CursorCommand::End { extend } => self.end(extend),
                CursorCommand::CollapseToMain => self.clear_secondary_cursors(),
                CursorCommand::FindNext => {
                    self.find_next();
                }
                CursorCommand::SelectAll => self.select_all(),
            },
        }
    }

    /// Execute commands in order.
    pub fn execute_batch(&mut self, commands: impl IntoIterator<Item = EditorCommand>) {
        for command in commands {
            self.execute(command);
        }
    }
}
