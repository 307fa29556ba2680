//! Cursor model.
//!
//! A cursor is a caret (`pos`) with an optional selection anchor (`sel`) and a sticky column for
//! vertical movement. Order between `pos` and `sel` is not fixed: either side may be larger.

use crate::text::Splice;
use std::ops::Range;

/// One editing point, referring to buffer positions by char offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub(crate) pos: usize,
    pub(crate) sel: Option<usize>,
    pub(crate) saved_x: usize,
}

impl Cursor {
    /// A bare caret at `pos`.
    ///
    /// The sticky column is filled in by the owning buffer when the cursor is installed.
    pub fn caret(pos: usize) -> Self {
        Self {
            pos,
            sel: None,
            saved_x: 0,
        }
    }

    /// A selection with the caret at `pos` and the anchor at `anchor`.
    pub fn selection(anchor: usize, pos: usize) -> Self {
        let mut cursor = Self {
            pos,
            sel: Some(anchor),
            saved_x: 0,
        };
        cursor.collapse();
        cursor
    }

    /// Caret offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Anchor offset, if a selection is present.
    pub fn sel(&self) -> Option<usize> {
        self.sel
    }

    /// Sticky column used by vertical motion.
    pub fn saved_x(&self) -> usize {
        self.saved_x
    }

    /// Returns `true` if the cursor selects at least one character.
    pub fn has_selection(&self) -> bool {
        self.sel.is_some_and(|sel| sel != self.pos)
    }

    /// Order-normalized `(start, end)`; a bare caret is a zero-width span at `pos`.
    pub fn span(&self) -> (usize, usize) {
        let anchor = self.sel.unwrap_or(self.pos);
        (self.pos.min(anchor), self.pos.max(anchor))
    }

    /// The selected range, or `None` for a bare caret.
    pub fn selection_range(&self) -> Option<Range<usize>> {
        if !self.has_selection() {
            return None;
        }
        let (start, end) = self.span();
        Some(start..end)
    }

    /// Drop the selection anchor.
    pub fn unselect(&mut self) {
        self.sel = None;
    }

    /// Exchange caret and anchor. No-op without a selection.
    pub fn swap_selection(&mut self) {
        if let Some(sel) = self.sel {
            self.sel = Some(self.pos);
            self.pos = sel;
        }
    }

    /// Ensure `pos <= sel` (or `pos >= sel` when `reverse`), swapping if needed.
    ///
    /// Returns whether a swap happened so callers can restore the original orientation.
    pub fn sort_selection(&mut self, reverse: bool) -> bool {
        let Some(sel) = self.sel else {
            return false;
        };
        let out_of_order = if reverse {
            self.pos < sel
        } else {
            self.pos > sel
        };
        if out_of_order {
            self.swap_selection();
        }
        out_of_order
    }

    /// Clear a zero-width selection (`sel == pos`).
    pub fn collapse(&mut self) {
        if self.sel == Some(self.pos) {
            self.sel = None;
        }
    }

    pub(crate) fn remap(&mut self, edit: &Splice, after: bool) {
        self.pos = edit.map(self.pos, after);
        self.sel = self.sel.map(|sel| edit.map(sel, after));
    }
}
