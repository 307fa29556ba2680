#![warn(missing_docs)]
//! Quill Core - Headless Multi-Cursor Editing Engine
//!
//! # Overview
//!
//! `quill-core` owns a text buffer and an ordered list of cursors, and implements editor-grade
//! edit operations over them. It does not render: a host reads the text, the cursors and (through
//! a pluggable [`TextMeasurer`]) pixel positions, and routes input back in as commands.
//!
//! # Core Features
//!
//! - **Single Source of Truth**: the buffer is one flat `String`; the line view is a cache
//!   rebuilt lazily after writes
//! - **Multiple Cursors**: every edit remaps every cursor; overlapping cursors are merged
//! - **Editor Behaviors**: bracket auto-closing and type-through, soft-tab backspace,
//!   indent snapping, multi-cursor find-next
//! - **Character Offsets**: all positions count Unicode scalar values, never bytes
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Commands & Key Table                       │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Edit Operations / Motion                   │  ← Per-cursor edits
//! ├─────────────────────────────────────────────┤
//! │  FileState (buffer + cursor list)           │  ← Splice & remap
//! ├─────────────────────────────────────────────┤
//! │  Cursor Sanitizer                           │  ← Sort & merge
//! ├─────────────────────────────────────────────┤
//! │  Position Index                             │  ← Offset ↔ line/column
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use quill_core::{Cursor, FileState};
//!
//! let mut state = FileState::new("let a = 1;\nlet b = 2;");
//!
//! // One caret at the end of each line.
//! state.set_cursors([Cursor::caret(10), Cursor::caret(21)], 0);
//! state.write(" // ok");
//!
//! assert_eq!(state.text(), "let a = 1; // ok\nlet b = 2; // ok");
//! assert_eq!(state.cursors().len(), 2);
//! ```
//!
//! # Module Description
//!
//! - [`line_index`] - Offset ↔ line/column conversion
//! - [`cursor`] - Cursor model
//! - [`buffer`] - Text buffer and cursor list
//! - [`edit`] - Edit operations
//! - [`motion`] - Cursor motion
//! - [`search`] - Literal search with character offsets
//! - [`commands`] - Command enum and key table
//! - [`layout`] - Text measurement collaborator
//! - [`options`] - Editor options

pub mod buffer;
pub mod commands;
pub mod cursor;
pub mod edit;
pub mod layout;
pub mod line_index;
pub mod motion;
pub mod options;
pub mod search;
mod selection_set;
mod text;

pub use buffer::FileState;
pub use commands::{CursorCommand, EditCommand, EditorCommand, Modifiers, command_for_key};
pub use cursor::Cursor;
pub use layout::{FontSettings, MonospaceMeasurer, TextExtent, TextMeasurer};
pub use line_index::{LineColumn, LineIndex};
pub use options::{BracketPair, EditorOptions};
pub use search::SearchMatch;
