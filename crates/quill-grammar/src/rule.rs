//! Grammar rule variants.
//!
//! Rules are plain data; the only work done at construction time is compiling their regexes.

use crate::category::Category;
use crate::error::GrammarError;
use onig::{Regex, Region, SearchOptions};
use std::sync::Arc;

#[derive(Debug, Clone)]
/// A compiled Oniguruma pattern together with its source.
pub struct Pattern {
    source: String,
    regex: Arc<Regex>,
}

impl Pattern {
    /// Compile `source`.
    ///
    /// `^` and `$` outside character classes anchor to the start and end of the searched text,
    /// not to line boundaries.
    pub fn new(source: impl Into<String>) -> Result<Self, GrammarError> {
        let source = source.into();
        let regex =
            Regex::new(&anchor_to_input(&source)).map_err(|e| GrammarError::RegexCompile {
                pattern: source.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            source,
            regex: Arc::new(regex),
        })
    }

    /// The pattern source (after variable substitution).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Byte range of the leftmost match in `text`.
    ///
    /// `text` is the remaining input: `^` and lookbehinds see its start as the start of the
    /// subject, and `$` only matches at its very end.
    pub fn find(&self, text: &str) -> Option<(usize, usize)> {
        let mut region = Region::new();
        self.regex.search_with_options(
            text,
            0,
            text.len(),
            SearchOptions::SEARCH_OPTION_NONE,
            Some(&mut region),
        )?;
        region.pos(0)
    }
}

/// Rewrite line anchors as input anchors: `^` becomes `\A` and `$` becomes `\z`.
///
/// Escapes and bracket expressions are copied untouched.
fn anchor_to_input(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars();
    let mut class_depth = 0usize;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' => {
                class_depth += 1;
                out.push(c);
            }
            ']' if class_depth > 0 => {
                class_depth -= 1;
                out.push(c);
            }
            '^' if class_depth == 0 => out.push_str(r"\A"),
            '$' if class_depth == 0 => out.push_str(r"\z"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone)]
/// A single-shot lexical match.
pub struct MatchRule {
    /// What to look for.
    pub pattern: Pattern,
    /// Category of the matched text (`None` leaves it untagged).
    pub category: Option<Category>,
}

impl MatchRule {
    /// Compile a match rule.
    pub fn new(pattern: &str, category: Option<Category>) -> Result<Self, GrammarError> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
            category,
        })
    }
}

#[derive(Debug, Clone)]
/// The opening or closing token of a block.
pub struct Delimiter {
    /// What to look for.
    pub pattern: Pattern,
    /// Category of the delimiter text.
    pub category: Option<Category>,
}

impl Delimiter {
    /// Compile a delimiter.
    pub fn new(pattern: &str, category: Option<Category>) -> Result<Self, GrammarError> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
            category,
        })
    }
}

#[derive(Debug, Clone)]
/// A delimited region scanned with its own rule set.
pub struct BlockRule {
    /// Opens the block.
    pub begin: Delimiter,
    /// Closes the block.
    pub end: Delimiter,
    /// Category of the body text no inner rule claims.
    pub category: Option<Category>,
    /// Rules active inside the block.
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reference to other rules, resolved lazily by the tokenizer.
pub enum Include {
    /// The grammar's top-level rule list (`@self`).
    SelfRef,
    /// Named rule sets, in order. Unknown names contribute nothing.
    Names(Vec<String>),
}

impl Include {
    /// Build an include from its textual form: `@self` or a rule set name.
    pub fn parse(reference: &str) -> Self {
        if reference == SELF_REFERENCE {
            Self::SelfRef
        } else {
            Self::Names(vec![reference.to_string()])
        }
    }
}

/// Textual form of [`Include::SelfRef`].
pub const SELF_REFERENCE: &str = "@self";

#[derive(Debug, Clone)]
/// One entry of a rule list.
pub enum Rule {
    /// A leaf match.
    Match(MatchRule),
    /// A nested block.
    Block(BlockRule),
    /// An indirection to other rules.
    Include(Include),
}

impl Rule {
    /// Shorthand for a compiled [`Rule::Match`].
    pub fn matching(pattern: &str, category: Option<Category>) -> Result<Self, GrammarError> {
        MatchRule::new(pattern, category).map(Self::Match)
    }

    /// Shorthand for a compiled [`Rule::Block`].
    pub fn block(
        begin: Delimiter,
        end: Delimiter,
        category: Option<Category>,
        rules: Vec<Rule>,
    ) -> Self {
        Self::Block(BlockRule {
            begin,
            end,
            category,
            rules,
        })
    }

    /// Shorthand for an include of named rule sets.
    pub fn include<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Include(Include::Names(names.into_iter().map(Into::into).collect()))
    }

    /// Shorthand for `@self`.
    pub fn include_self() -> Self {
        Self::Include(Include::SelfRef)
    }
}
