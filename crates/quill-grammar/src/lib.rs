#![warn(missing_docs)]
//! `quill-grammar` - nested-pattern grammars and a leftmost-match tokenizer.
//!
//! A [`Grammar`] is an ordered list of rules plus named rule sets. Rules either match a single
//! token, open a block that is scanned with its own rules until its end pattern, or include other
//! rule sets by name. [`highlight_code`] turns text into a lossless sequence of categorized
//! [`Span`]s.
//!
//! Grammars can be built in code or compiled from a YAML/JSON [`GrammarDefinition`], and kept in
//! a [`GrammarRegistry`] for lookup by name or file extension.
//!
//! ```
//! use quill_grammar::{Category, Grammar, highlight_code};
//!
//! let grammar = Grammar::from_yaml(
//!     r"
//! name: Tiny
//! patterns:
//!   - name: numbers
//!     rules:
//!       - match: '\d+'
//!         category: constant.number
//! ",
//! )
//! .unwrap();
//!
//! let spans = highlight_code("x = 42", &grammar);
//! assert_eq!(spans.last().unwrap().category, Some(Category::ConstantNumber));
//! assert_eq!(spans.last().unwrap().text, "42");
//! ```

pub mod category;
pub mod definition;
pub mod error;
pub mod grammar;
pub mod registry;
pub mod rule;
pub mod tokenizer;

mod compiler;

pub use category::Category;
pub use definition::GrammarDefinition;
pub use error::GrammarError;
pub use grammar::Grammar;
pub use registry::GrammarRegistry;
pub use rule::{BlockRule, Delimiter, Include, MatchRule, Pattern, Rule};
pub use tokenizer::{Span, highlight_code};
