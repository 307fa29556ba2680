use crate::rule::Rule;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
/// A language grammar: an ordered top-level rule list plus named rule sets.
///
/// Registering a root rule set appends its rules to the top-level list and makes them reachable
/// by name; a non-root set is reachable by name only.
pub struct Grammar {
    name: String,
    extensions: Vec<String>,
    rules: Vec<Rule>,
    pattern_map: HashMap<String, Vec<Rule>>,
}

impl Grammar {
    /// Create an empty grammar.
    pub fn new(
        name: impl Into<String>,
        extensions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.into_iter().map(Into::into).collect(),
            rules: Vec::new(),
            pattern_map: HashMap::new(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File extensions (without the leading dot).
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// The top-level rule list.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// A named rule set.
    pub fn rule_set(&self, name: &str) -> Option<&[Rule]> {
        self.pattern_map.get(name).map(Vec::as_slice)
    }

    /// Names of all rule sets.
    pub fn rule_set_names(&self) -> impl Iterator<Item = &str> {
        self.pattern_map.keys().map(String::as_str)
    }

    /// Append `rules` to the top-level list and register them under `name`.
    ///
    /// Re-registering a name replaces the named set; rules already appended stay in the list.
    pub fn add_pattern(&mut self, name: impl Into<String>, rules: Vec<Rule>) -> &mut Self {
        self.rules.extend(rules.iter().cloned());
        self.pattern_map.insert(name.into(), rules);
        self
    }

    /// Register `rules` under `name` without adding them to the top-level list.
    pub fn add_non_root_pattern(
        &mut self,
        name: impl Into<String>,
        rules: Vec<Rule>,
    ) -> &mut Self {
        self.pattern_map.insert(name.into(), rules);
        self
    }
}
