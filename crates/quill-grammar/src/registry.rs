use crate::error::GrammarError;
use crate::grammar::Grammar;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
/// A collection of compiled grammars, looked up by name or file extension.
///
/// Names and extensions are matched case-insensitively. Registering a grammar whose name or
/// extension is already taken replaces the earlier entry for that key.
pub struct GrammarRegistry {
    by_name: HashMap<String, Arc<Grammar>>,
    by_extension: HashMap<String, Arc<Grammar>>,
}

impl GrammarRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a compiled grammar.
    pub fn register(&mut self, grammar: Grammar) -> Arc<Grammar> {
        let grammar = Arc::new(grammar);
        self.by_name
            .insert(grammar.name().to_lowercase(), grammar.clone());
        for ext in grammar.extensions() {
            self.by_extension
                .insert(normalize_extension(ext), grammar.clone());
        }
        tracing::debug!(
            grammar = grammar.name(),
            extensions = ?grammar.extensions(),
            "registered grammar"
        );
        grammar
    }

    /// Compiles a YAML (or JSON) grammar document and registers the result.
    pub fn load_from_str(&mut self, text: &str) -> Result<Arc<Grammar>, GrammarError> {
        Ok(self.register(Grammar::from_yaml(text)?))
    }

    /// Reads, compiles and registers a grammar file.
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<Arc<Grammar>, GrammarError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.load_from_str(&text)
    }

    /// Look up a grammar by display name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<Grammar>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Look up a grammar by file extension (`"rs"` and `".rs"` are equivalent).
    pub fn get_by_extension(&self, extension: &str) -> Option<Arc<Grammar>> {
        self.by_extension
            .get(&normalize_extension(extension))
            .cloned()
    }

    /// The grammar for a file path, chosen by its extension.
    pub fn for_path(&self, path: impl AsRef<Path>) -> Option<Arc<Grammar>> {
        let ext = path.as_ref().extension()?.to_str()?;
        self.get_by_extension(ext)
    }

    /// Registered grammar names (lowercased), in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Number of registered grammars.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no grammar is registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}
