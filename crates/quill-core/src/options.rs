//! Editor options.
//!
//! Options are plain data, loadable from JSON so hosts can keep them next to their own settings.

use serde::{Deserialize, Serialize};

/// Default soft-tab width in columns.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// An auto-closing pair (bracket or quote).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketPair {
    /// Opening character.
    pub open: char,
    /// Closing character.
    pub close: char,
}

impl BracketPair {
    /// Create a new pair.
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// Brackets have distinct open/close characters; quotes do not.
    pub fn is_bracket(&self) -> bool {
        self.open != self.close
    }
}

/// Editing behavior knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Soft-tab width: indent snapping and soft-tab backspace work in multiples of this.
    pub indent_width: usize,
    /// Pairs deleted together by backspace; brackets among them also drive `enter` expansion.
    pub pairs: Vec<BracketPair>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            pairs: vec![
                BracketPair::new('(', ')'),
                BracketPair::new('[', ']'),
                BracketPair::new('{', '}'),
                BracketPair::new('"', '"'),
            ],
        }
    }
}

impl EditorOptions {
    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Indent width, never zero.
    pub(crate) fn indent(&self) -> usize {
        self.indent_width.max(1)
    }

    /// The pair whose open/close chars are exactly `(before, after)`.
    pub(crate) fn pair_for(&self, before: char, after: char) -> Option<&BracketPair> {
        self.pairs
            .iter()
            .find(|pair| pair.open == before && pair.close == after)
    }
}
