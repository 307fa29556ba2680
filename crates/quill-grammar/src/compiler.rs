use crate::category::Category;
use crate::definition::{DelimiterDefinition, GrammarDefinition, IncludeDefinition, RuleDefinition};
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::rule::{Delimiter, Include, MatchRule, Rule};
use regex::Regex as RustRegex;
use std::collections::{HashMap, HashSet};

impl Grammar {
    /// Compile a parsed [`GrammarDefinition`].
    pub fn compile(definition: GrammarDefinition) -> Result<Self, GrammarError> {
        let refs = VariableRefs::new()?;
        let variables = realize_variables(&definition.variables, &refs)?;

        let mut grammar = Grammar::new(definition.name, definition.extensions);
        let set_count = definition.patterns.len();
        for set in definition.patterns {
            let rules = set
                .rules
                .iter()
                .enumerate()
                .map(|(index, rule)| compile_rule(rule, &set.name, index, &variables, &refs))
                .collect::<Result<Vec<_>, _>>()?;
            if set.root {
                grammar.add_pattern(set.name, rules);
            } else {
                grammar.add_non_root_pattern(set.name, rules);
            }
        }

        tracing::debug!(
            grammar = grammar.name(),
            rule_sets = set_count,
            top_level_rules = grammar.rules().len(),
            "compiled grammar"
        );
        Ok(grammar)
    }

    /// Parse and compile a YAML (or JSON) grammar document.
    pub fn from_yaml(text: &str) -> Result<Self, GrammarError> {
        Self::compile(GrammarDefinition::from_yaml(text)?)
    }
}

fn compile_rule(
    rule: &RuleDefinition,
    set: &str,
    index: usize,
    variables: &HashMap<String, String>,
    refs: &VariableRefs,
) -> Result<Rule, GrammarError> {
    let malformed = |reason| GrammarError::MalformedRule {
        set: set.to_string(),
        index,
        reason,
    };

    match (&rule.pattern, &rule.begin, &rule.end, &rule.include) {
        (Some(pattern), None, None, None) => {
            if !rule.rules.is_empty() {
                return Err(malformed("`rules` is only valid on a begin/end block"));
            }
            let source = substitute_variables(pattern, variables, refs)?;
            Ok(Rule::Match(MatchRule::new(&source, rule.category)?))
        }
        (None, Some(begin), Some(end), None) => {
            let begin = compile_delimiter(begin, rule.category, variables, refs)?;
            let end = compile_delimiter(end, rule.category, variables, refs)?;
            let rules = rule
                .rules
                .iter()
                .enumerate()
                .map(|(inner, nested)| compile_rule(nested, set, inner, variables, refs))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Rule::block(begin, end, rule.category, rules))
        }
        (None, None, None, Some(include)) => match include {
            IncludeDefinition::One(reference) => Ok(Rule::Include(Include::parse(reference))),
            IncludeDefinition::Many(names) if names.is_empty() => {
                Err(malformed("`include` needs at least one name"))
            }
            IncludeDefinition::Many(names) => Ok(Rule::include(names.iter().cloned())),
        },
        (None, Some(_), None, None) => Err(malformed("`begin` without `end`")),
        (None, None, Some(_), None) => Err(malformed("`end` without `begin`")),
        (None, None, None, None) => Err(malformed("expected `match`, `begin`/`end` or `include`")),
        _ => Err(malformed("`match`, `begin`/`end` and `include` are mutually exclusive")),
    }
}

fn compile_delimiter(
    delimiter: &DelimiterDefinition,
    block_category: Option<Category>,
    variables: &HashMap<String, String>,
    refs: &VariableRefs,
) -> Result<Delimiter, GrammarError> {
    let (pattern, category) = match delimiter {
        DelimiterDefinition::Pattern(pattern) => (pattern, block_category),
        DelimiterDefinition::Full { pattern, category } => (pattern, *category),
    };
    let source = substitute_variables(pattern, variables, refs)?;
    Delimiter::new(&source, category)
}

/// Matcher for `{{name}}` references inside grammar patterns and variable values.
struct VariableRefs(RustRegex);

impl VariableRefs {
    fn new() -> Result<Self, GrammarError> {
        let source = r"\{\{([A-Za-z0-9_]+)\}\}";
        RustRegex::new(source)
            .map(Self)
            .map_err(|e| GrammarError::RegexCompile {
                pattern: source.to_string(),
                message: e.to_string(),
            })
    }

    /// Replace every reference in `text` with `lookup(name)`. Braces that do not form a
    /// reference (`{{`, `{{a-b}}`) are copied as written.
    fn expand(
        &self,
        text: &str,
        mut lookup: impl FnMut(&str) -> Result<String, GrammarError>,
    ) -> Result<String, GrammarError> {
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        for caps in self.0.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push_str(&text[copied..whole.start()]);
            out.push_str(&lookup(name.as_str())?);
            copied = whole.end();
        }
        out.push_str(&text[copied..]);
        Ok(out)
    }
}

/// Expands variable values depth-first, memoizing each result. A name reached again while its
/// own value is still being expanded is a cycle.
struct VariableResolver<'a> {
    raw: &'a HashMap<String, String>,
    refs: &'a VariableRefs,
    resolved: HashMap<String, String>,
    in_progress: HashSet<String>,
}

impl VariableResolver<'_> {
    fn resolve(&mut self, name: &str) -> Result<String, GrammarError> {
        if let Some(value) = self.resolved.get(name) {
            return Ok(value.clone());
        }
        let table = self.raw;
        let raw = table
            .get(name)
            .ok_or_else(|| GrammarError::UnknownVariable(name.to_string()))?;
        if !self.in_progress.insert(name.to_string()) {
            return Err(GrammarError::CircularVariableReference(name.to_string()));
        }
        let refs = self.refs;
        let value = refs.expand(raw, |inner| self.resolve(inner))?;
        self.in_progress.remove(name);
        self.resolved.insert(name.to_string(), value.clone());
        Ok(value)
    }
}

/// The variable table with every value fully expanded.
fn realize_variables(
    vars: &HashMap<String, String>,
    refs: &VariableRefs,
) -> Result<HashMap<String, String>, GrammarError> {
    let mut resolver = VariableResolver {
        raw: vars,
        refs,
        resolved: HashMap::with_capacity(vars.len()),
        in_progress: HashSet::new(),
    };
    for name in vars.keys() {
        resolver.resolve(name)?;
    }
    Ok(resolver.resolved)
}

fn substitute_variables(
    text: &str,
    vars: &HashMap<String, String>,
    refs: &VariableRefs,
) -> Result<String, GrammarError> {
    refs.expand(text, |name| {
        vars.get(name)
            .cloned()
            .ok_or_else(|| GrammarError::UnknownVariable(name.to_string()))
    })
}
