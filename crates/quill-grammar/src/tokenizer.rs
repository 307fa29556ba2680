//! Tokenizer.
//!
//! Splits text into a flat, lossless sequence of categorized spans. At every step the rules
//! reachable from the active rule set are enumerated depth-first (expanding includes lazily),
//! the leftmost match wins, and ties go to the rule enumerated first. The innermost open block's
//! `end` pattern is tried after all rules and only wins when it starts strictly earlier.

use crate::category::Category;
use crate::grammar::Grammar;
use crate::rule::{BlockRule, Include, MatchRule, Pattern, Rule};
use std::slice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A run of text sharing one category.
pub struct Span<'t> {
    /// Category, or `None` for plain text.
    pub category: Option<Category>,
    /// The text (a slice of the input).
    pub text: &'t str,
    /// Byte offset of `text` in the input.
    pub offset: usize,
}

/// Tokenize `text` with `grammar`.
///
/// Concatenating the returned spans reproduces `text`; adjacent spans never share a category.
pub fn highlight_code<'t>(text: &'t str, grammar: &Grammar) -> Vec<Span<'t>> {
    let mut out = SpanBuilder::new(text);
    let mut stack: Vec<&BlockRule> = Vec::new();
    let mut pos = 0usize;

    while pos < text.len() {
        let rest = &text[pos..];
        let top = stack.last().copied();
        let default = top.and_then(|block| block.category);

        let mut nearest: Option<Candidate<'_>> = None;
        let leaves = match top {
            Some(block) => LeafRules::new(grammar, SetKey::Inner, &block.rules),
            None => LeafRules::new(grammar, SetKey::Root, grammar.rules()),
        };
        for leaf in leaves {
            let (pattern, category, action) = match leaf {
                Leaf::Match(rule) => (&rule.pattern, rule.category, Action::Emit),
                Leaf::Begin(block) => (
                    &block.begin.pattern,
                    block.begin.category,
                    Action::Push(block),
                ),
            };
            consider(&mut nearest, pattern, rest, category, action);
            if nearest.as_ref().is_some_and(|found| found.start == 0) {
                break;
            }
        }
        if let Some(block) = top {
            consider(
                &mut nearest,
                &block.end.pattern,
                rest,
                block.end.category,
                Action::Pop,
            );
        }

        let Some(found) = nearest else {
            out.push(default, pos, text.len());
            break;
        };

        out.push(default, pos, pos + found.start);
        if found.start == found.end {
            if let Action::Pop = found.action {
                stack.pop();
                pos += found.start;
                continue;
            }
            // A zero-width match would never advance; step over one character instead.
            let step = rest[found.start..].chars().next().map_or(0, char::len_utf8);
            tracing::warn!(
                offset = pos + found.start,
                "zero-width grammar match; skipping one character"
            );
            out.push(default, pos + found.start, pos + found.start + step);
            pos += found.start + step;
            continue;
        }

        out.push(found.category, pos + found.start, pos + found.end);
        pos += found.end;
        match found.action {
            Action::Pop => {
                stack.pop();
            }
            Action::Push(block) => stack.push(block),
            Action::Emit => {}
        }
    }

    let spans = out.finish();
    tracing::trace!(grammar = grammar.name(), spans = spans.len(), "tokenized");
    spans
}

#[derive(Clone, Copy)]
enum Action<'g> {
    Emit,
    Push(&'g BlockRule),
    Pop,
}

struct Candidate<'g> {
    start: usize,
    end: usize,
    category: Option<Category>,
    action: Action<'g>,
}

/// Replace `nearest` only with a match starting strictly earlier.
fn consider<'g>(
    nearest: &mut Option<Candidate<'g>>,
    pattern: &Pattern,
    rest: &str,
    category: Option<Category>,
    action: Action<'g>,
) {
    let Some((start, end)) = pattern.find(rest) else {
        return;
    };
    if nearest.as_ref().is_none_or(|found| start < found.start) {
        *nearest = Some(Candidate {
            start,
            end,
            category,
            action,
        });
    }
}

struct SpanBuilder<'t> {
    text: &'t str,
    runs: Vec<(Option<Category>, usize, usize)>,
}

impl<'t> SpanBuilder<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            text,
            runs: Vec::new(),
        }
    }

    fn push(&mut self, category: Option<Category>, start: usize, end: usize) {
        if start >= end {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.0 == category && last.2 == start => last.2 = end,
            _ => self.runs.push((category, start, end)),
        }
    }

    fn finish(self) -> Vec<Span<'t>> {
        self.runs
            .into_iter()
            .map(|(category, start, end)| Span {
                category,
                text: &self.text[start..end],
                offset: start,
            })
            .collect()
    }
}

enum Leaf<'g> {
    Match(&'g MatchRule),
    Begin(&'g BlockRule),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetKey<'g> {
    Root,
    Named(&'g str),
    Inner,
}

enum Frame<'g> {
    Rules {
        key: SetKey<'g>,
        rules: slice::Iter<'g, Rule>,
    },
    Names(slice::Iter<'g, String>),
}

enum Step<'g> {
    Rule(&'g Rule),
    Name(&'g str),
    Exhausted,
}

/// Depth-first enumeration of the leaf rules reachable from a rule set.
///
/// Includes are expanded when reached, never ahead of time. A rule set already being expanded
/// on the current path is skipped, which keeps self-including sets finite.
struct LeafRules<'g> {
    grammar: &'g Grammar,
    frames: Vec<Frame<'g>>,
}

impl<'g> LeafRules<'g> {
    fn new(grammar: &'g Grammar, key: SetKey<'g>, rules: &'g [Rule]) -> Self {
        Self {
            grammar,
            frames: vec![Frame::Rules {
                key,
                rules: rules.iter(),
            }],
        }
    }

    fn enter(&mut self, key: SetKey<'g>, rules: &'g [Rule]) {
        let active = self
            .frames
            .iter()
            .any(|frame| matches!(frame, Frame::Rules { key: open, .. } if *open == key));
        if active {
            tracing::trace!(?key, "include cycle skipped");
            return;
        }
        self.frames.push(Frame::Rules {
            key,
            rules: rules.iter(),
        });
    }
}

impl<'g> Iterator for LeafRules<'g> {
    type Item = Leaf<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match self.frames.last_mut()? {
                Frame::Rules { rules, .. } => rules.next().map_or(Step::Exhausted, Step::Rule),
                Frame::Names(names) => names
                    .next()
                    .map_or(Step::Exhausted, |name| Step::Name(name.as_str())),
            };

            match step {
                Step::Exhausted => {
                    self.frames.pop();
                }
                Step::Rule(Rule::Match(rule)) => return Some(Leaf::Match(rule)),
                Step::Rule(Rule::Block(block)) => return Some(Leaf::Begin(block)),
                Step::Rule(Rule::Include(Include::SelfRef)) => {
                    self.enter(SetKey::Root, self.grammar.rules());
                }
                Step::Rule(Rule::Include(Include::Names(names))) => {
                    self.frames.push(Frame::Names(names.iter()));
                }
                Step::Name(name) => {
                    if let Some(rules) = self.grammar.rule_set(name) {
                        self.enter(SetKey::Named(name), rules);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Delimiter;
    use pretty_assertions::assert_eq;

    fn spans(text: &str, grammar: &Grammar) -> Vec<(Option<Category>, String)> {
        highlight_code(text, grammar)
            .into_iter()
            .map(|span| (span.category, span.text.to_string()))
            .collect()
    }

    fn s(category: Option<Category>, text: &str) -> (Option<Category>, String) {
        (category, text.to_string())
    }

    fn nested_comments() -> Grammar {
        let mut grammar = Grammar::new("Nested", ["n"]);
        let comment = Some(Category::CommentBlock);
        grammar.add_pattern(
            "block_comments",
            vec![Rule::block(
                Delimiter::new(r"/\*", comment).unwrap(),
                Delimiter::new(r"\*/", comment).unwrap(),
                comment,
                vec![Rule::include(["block_comments"])],
            )],
        );
        grammar.add_pattern(
            "numbers",
            vec![Rule::matching(r"\d+", Some(Category::ConstantNumber)).unwrap()],
        );
        grammar
    }

    #[test]
    fn test_empty_grammar_yields_one_plain_span() {
        let grammar = Grammar::new("Empty", Vec::<String>::new());
        assert_eq!(spans("anything at all", &grammar), vec![s(None, "anything at all")]);
        assert!(highlight_code("", &grammar).is_empty());
    }

    #[test]
    fn test_nested_block_comments() {
        let grammar = nested_comments();
        let comment = Some(Category::CommentBlock);
        assert_eq!(
            spans("1 /* a /* b */ c */ 2", &grammar),
            vec![
                s(Some(Category::ConstantNumber), "1"),
                s(None, " "),
                s(comment, "/* a /* b */ c */"),
                s(None, " "),
                s(Some(Category::ConstantNumber), "2"),
            ]
        );
    }

    #[test]
    fn test_unterminated_block_runs_to_end_in_block_category() {
        let grammar = nested_comments();
        assert_eq!(
            spans("1 /* 2", &grammar),
            vec![
                s(Some(Category::ConstantNumber), "1"),
                s(None, " "),
                s(Some(Category::CommentBlock), "/* 2"),
            ]
        );
    }

    #[test]
    fn test_first_rule_wins_ties() {
        let mut grammar = Grammar::new("Tie", ["t"]);
        grammar.add_pattern(
            "words",
            vec![
                Rule::matching(r"\bif\b", Some(Category::KeywordControl)).unwrap(),
                Rule::matching(r"\w+", Some(Category::VariableOther)).unwrap(),
            ],
        );
        assert_eq!(
            spans("if iffy", &grammar),
            vec![
                s(Some(Category::KeywordControl), "if"),
                s(None, " "),
                s(Some(Category::VariableOther), "iffy"),
            ]
        );
    }

    #[test]
    fn test_inner_rule_beats_block_end_at_same_offset() {
        let string = Some(Category::StringDouble);
        let mut grammar = Grammar::new("Strings", ["s"]);
        grammar.add_pattern(
            "strings",
            vec![Rule::block(
                Delimiter::new("\"", string).unwrap(),
                Delimiter::new("\"", string).unwrap(),
                string,
                vec![Rule::matching("\"\"", Some(Category::StringEscape)).unwrap()],
            )],
        );
        assert_eq!(
            spans(r#""a""b""#, &grammar),
            vec![
                s(string, "\"a"),
                s(Some(Category::StringEscape), "\"\""),
                s(string, "b\""),
            ]
        );
    }

    #[test]
    fn test_unknown_include_contributes_nothing() {
        let mut grammar = Grammar::new("Missing", ["m"]);
        grammar.add_pattern("main", vec![Rule::include(["does_not_exist"])]);
        assert_eq!(spans("abc", &grammar), vec![s(None, "abc")]);
    }

    #[test]
    fn test_self_include_inside_block() {
        let paren = Some(Category::SymbolLanguage);
        let mut grammar = Grammar::new("Parens", ["p"]);
        grammar.add_pattern(
            "groups",
            vec![Rule::block(
                Delimiter::new(r"\(", paren).unwrap(),
                Delimiter::new(r"\)", paren).unwrap(),
                None,
                vec![Rule::include_self()],
            )],
        );
        grammar.add_pattern(
            "numbers",
            vec![Rule::matching(r"\d", Some(Category::ConstantNumber)).unwrap()],
        );
        assert_eq!(
            spans("((1))", &grammar),
            vec![
                s(paren, "(("),
                s(Some(Category::ConstantNumber), "1"),
                s(paren, "))"),
            ]
        );
    }

    #[test]
    fn test_self_referencing_rule_set_terminates() {
        let mut grammar = Grammar::new("Loop", ["l"]);
        grammar.add_pattern(
            "a",
            vec![
                Rule::include(["a"]),
                Rule::matching("x", Some(Category::Type)).unwrap(),
            ],
        );
        grammar.add_pattern("b", vec![Rule::include_self()]);
        assert_eq!(
            spans("yxy", &grammar),
            vec![s(None, "y"), s(Some(Category::Type), "x"), s(None, "y")]
        );
    }

    #[test]
    fn test_zero_width_match_advances() {
        let mut grammar = Grammar::new("Zero", ["z"]);
        grammar.add_pattern(
            "bad",
            vec![Rule::matching(r"(?=b)", Some(Category::Type)).unwrap()],
        );
        assert_eq!(spans("abc", &grammar), vec![s(None, "abc")]);
    }

    #[test]
    fn test_zero_width_end_pops_without_consuming() {
        let string = Some(Category::StringDouble);
        let mut grammar = Grammar::new("Line strings", ["l"]);
        grammar.add_pattern(
            "strings",
            vec![Rule::block(
                Delimiter::new("'", string).unwrap(),
                Delimiter::new("(?=\n)|'", string).unwrap(),
                string,
                Vec::new(),
            )],
        );
        assert_eq!(
            spans("'ab\nc", &grammar),
            vec![s(string, "'ab"), s(None, "\nc")]
        );
    }

    #[test]
    fn test_line_anchors_match_only_at_input_edges() {
        let string = Some(Category::StringDouble);
        let mut grammar = Grammar::new("Anchors", ["a"]);
        grammar.add_pattern(
            "strings",
            vec![Rule::block(
                Delimiter::new("\"", string).unwrap(),
                Delimiter::new(r#""|[^\\\n]$"#, string).unwrap(),
                string,
                Vec::new(),
            )],
        );
        grammar.add_pattern(
            "leading",
            vec![Rule::matching("^x", Some(Category::Type)).unwrap()],
        );

        assert_eq!(
            spans("\"abc\nfoo\"", &grammar),
            vec![s(string, "\"abc\nfoo\"")]
        );
        assert_eq!(spans("ax\nx", &grammar), vec![s(None, "ax\nx")]);
        assert_eq!(
            spans("x\nx", &grammar),
            vec![s(Some(Category::Type), "x"), s(None, "\nx")]
        );
    }

    #[test]
    fn test_offsets_point_into_input() {
        let grammar = nested_comments();
        let text = "é 12";
        for span in highlight_code(text, &grammar) {
            assert_eq!(&text[span.offset..span.offset + span.text.len()], span.text);
        }
    }
}
