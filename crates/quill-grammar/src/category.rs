//! Token categories.
//!
//! Categories are dotted names (`keyword.control`, `string.escape`, ...). Themes key their styles
//! by them; the tokenizer tags spans with them.

use crate::error::GrammarError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! categories {
    ($($(#[$doc:meta])* $variant:ident => $name:literal,)+) => {
        /// A token's lexical classification.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Category {
            $(
                $(#[$doc])*
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl Category {
            /// Every category, in declaration order.
            pub const ALL: &'static [Category] = &[$(Category::$variant,)+];

            /// The dotted name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Category::$variant => $name,)+
                }
            }
        }

        impl FromStr for Category {
            type Err = GrammarError;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                match name {
                    $($name => Ok(Category::$variant),)+
                    other => Err(GrammarError::UnknownCategory(other.to_string())),
                }
            }
        }
    };
}

categories! {
    /// Brackets, separators and other structural punctuation
    SymbolLanguage => "symbol.language",
    /// Operators
    SymbolOperator => "symbol.operator",
    /// `if`, `for`, `return`, ...
    KeywordControl => "keyword.control",
    /// `pub`, `static`, ...
    KeywordModifier => "keyword.modifier",
    /// `fn`, `let`, `class`, ...
    KeywordDecl => "keyword.decl",
    /// Word operators (`as`, `typeof`, ...)
    KeywordOperator => "keyword.operator",
    /// Keywords fitting nowhere else
    KeywordOther => "keyword.other",
    /// Type names
    Type => "type",
    /// Line comments
    CommentLine => "comment.line",
    /// Block comments
    CommentBlock => "comment.block",
    /// Single-quoted strings
    StringSingle => "string.single",
    /// Double-quoted strings
    StringDouble => "string.double",
    /// Regex literals
    StringRegex => "string.regex",
    /// Other string literals
    StringOther => "string.other",
    /// Escape sequences inside strings
    StringEscape => "string.escape",
    /// Numeric literals
    ConstantNumber => "constant.number",
    /// `true`, `null`, ...
    ConstantLanguage => "constant.language",
    /// Other constants
    ConstantOther => "constant.other",
    /// Bold markup
    MarkupBold => "markup.bold",
    /// Underlined markup
    MarkupUnderline => "markup.underline",
    /// Italic markup
    MarkupItalic => "markup.italic",
    /// Struck-through markup
    MarkupStrikethrough => "markup.strikethrough",
    /// Parameters
    VariableParam => "variable.param",
    /// `self`, `this`, ...
    VariableLanguage => "variable.language",
    /// Function names at call sites
    VariableFunction => "variable.function",
    /// Other identifiers
    VariableOther => "variable.other",
    /// Illegal syntax
    InvalidIllegal => "invalid.illegal",
    /// Deprecated syntax
    InvalidDeprecated => "invalid.deprecated",
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
