use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or compiling a grammar.
pub enum GrammarError {
    #[error("I/O error: {0}")]
    /// A grammar file could not be read.
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    /// The definition document could not be parsed.
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown category '{0}'")]
    /// A category name is not one of the known token categories.
    UnknownCategory(String),

    #[error("unknown variable '{0}'")]
    /// A referenced variable name does not exist.
    UnknownVariable(String),

    #[error("circular variable reference '{0}'")]
    /// Variable expansion loop detected.
    CircularVariableReference(String),

    #[error("malformed rule #{index} in rule set '{set}': {reason}")]
    /// A rule entry does not describe exactly one rule kind.
    MalformedRule {
        /// Name of the rule set holding the entry.
        set: String,
        /// Position of the entry within the set.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    #[error("regex compile error for pattern '{pattern}': {message}")]
    /// A regex pattern failed to compile.
    RegexCompile {
        /// The regex pattern string.
        pattern: String,
        /// The compiler error message.
        message: String,
    },
}
