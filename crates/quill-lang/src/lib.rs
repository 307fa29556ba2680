#![warn(missing_docs)]
//! `quill-lang` - built-in language data for quill.
//!
//! Grammars are plain YAML documents embedded at compile time and compiled on demand with
//! `quill-grammar`; themes map token categories to CSS-ready styles.
//!
//! ```
//! use quill_grammar::highlight_code;
//! use quill_lang::{Theme, builtin_registry};
//!
//! let registry = builtin_registry().unwrap();
//! let rust = registry.for_path("src/main.rs").unwrap();
//! let theme = Theme::builtin_default().unwrap();
//!
//! let html: String = highlight_code("fn main() {}", &rust)
//!     .iter()
//!     .map(|span| format!("<span style=\"{}\">{}</span>", theme.style_of(span.category).css(), span.text))
//!     .collect();
//! assert!(html.starts_with("<span style=\"color: #569cd6;font-weight: bold;\">fn</span>"));
//! ```

pub mod theme;

use quill_grammar::{Grammar, GrammarError, GrammarRegistry};

pub use theme::{DEFAULT_THEME_JSON, Style, Theme, ThemeError};

/// JSON grammar source.
pub const JSON_GRAMMAR: &str = include_str!("../grammars/json.yaml");
/// Rust grammar source.
pub const RUST_GRAMMAR: &str = include_str!("../grammars/rust.yaml");
/// JavaScript grammar source.
pub const JAVASCRIPT_GRAMMAR: &str = include_str!("../grammars/javascript.yaml");

/// A grammar embedded in the crate.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinGrammar {
    /// Stable identifier (lowercase).
    pub id: &'static str,
    /// Embedded YAML document.
    pub yaml: &'static str,
}

/// Every embedded grammar.
pub const BUILTIN_GRAMMARS: &[BuiltinGrammar] = &[
    BuiltinGrammar {
        id: "javascript",
        yaml: JAVASCRIPT_GRAMMAR,
    },
    BuiltinGrammar {
        id: "rust",
        yaml: RUST_GRAMMAR,
    },
    BuiltinGrammar {
        id: "json",
        yaml: JSON_GRAMMAR,
    },
];

/// Compile one built-in grammar by id.
pub fn builtin_grammar(id: &str) -> Option<Result<Grammar, GrammarError>> {
    BUILTIN_GRAMMARS
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| Grammar::from_yaml(entry.yaml))
}

/// A registry holding every built-in grammar.
pub fn builtin_registry() -> Result<GrammarRegistry, GrammarError> {
    let mut registry = GrammarRegistry::new();
    for entry in BUILTIN_GRAMMARS {
        registry.load_from_str(entry.yaml)?;
    }
    Ok(registry)
}
