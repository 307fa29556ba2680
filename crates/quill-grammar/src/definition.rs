//! Declarative grammar documents.
//!
//! A definition is a YAML document (JSON documents parse too):
//!
//! ```yaml
//! name: Rust
//! extensions: [rs]
//! variables:
//!   ident: '[A-Za-z_][A-Za-z0-9_]*'
//! patterns:
//!   - name: block_comments
//!     rules:
//!       - begin: '/\*'
//!         end: '\*/'
//!         category: comment.block
//!         rules:
//!           - include: block_comments
//!   - name: calls
//!     rules:
//!       - match: '{{ident}}(?=\s*\()'
//!         category: variable.function
//! ```
//!
//! Rule sets are registered in document order; `root: false` keeps a set out of the top-level
//! list so it is only reachable through `include`.

use crate::category::Category;
use crate::error::GrammarError;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
/// Raw grammar document.
pub struct GrammarDefinition {
    /// Display name.
    pub name: String,

    #[serde(default)]
    /// File extensions associated with this grammar.
    pub extensions: Vec<String>,

    #[serde(default)]
    /// Variables substituted into patterns as `{{name}}`.
    pub variables: HashMap<String, String>,

    #[serde(default)]
    /// Named rule sets, in registration order.
    pub patterns: Vec<RuleSetDefinition>,
}

impl GrammarDefinition {
    /// Parse a YAML (or JSON) document.
    pub fn from_yaml(text: &str) -> Result<Self, GrammarError> {
        Ok(serde_yaml::from_str(text)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
/// A named rule set.
pub struct RuleSetDefinition {
    /// Name used by `include`.
    pub name: String,

    #[serde(default = "default_root")]
    /// Whether the set also joins the top-level rule list.
    pub root: bool,

    #[serde(default)]
    /// The rules.
    pub rules: Vec<RuleDefinition>,
}

fn default_root() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
/// One rule entry. Exactly one of `match`, `begin`/`end` or `include` must be present.
pub struct RuleDefinition {
    #[serde(default, rename = "match")]
    /// Pattern of a match rule.
    pub pattern: Option<String>,

    #[serde(default)]
    /// Opening delimiter of a block rule.
    pub begin: Option<DelimiterDefinition>,

    #[serde(default)]
    /// Closing delimiter of a block rule.
    pub end: Option<DelimiterDefinition>,

    #[serde(default)]
    /// Category of a match rule or of a block's body.
    pub category: Option<Category>,

    #[serde(default)]
    /// Inner rules of a block rule.
    pub rules: Vec<RuleDefinition>,

    #[serde(default)]
    /// Include target(s): `@self`, a rule set name, or a list of names.
    pub include: Option<IncludeDefinition>,

    #[serde(default)]
    /// Optional comment (ignored).
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// A block delimiter: a bare pattern (taking the block's category) or a pattern with its own
/// category.
pub enum DelimiterDefinition {
    /// Bare pattern.
    Pattern(String),
    /// Pattern with an explicit category.
    Full {
        #[serde(rename = "match")]
        /// The pattern.
        pattern: String,
        #[serde(default)]
        /// Category of the delimiter text.
        category: Option<Category>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// Include target(s).
pub enum IncludeDefinition {
    /// `@self` or a single rule set name.
    One(String),
    /// Several rule set names.
    Many(Vec<String>),
}
