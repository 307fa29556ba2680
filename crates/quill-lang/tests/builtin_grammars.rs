use pretty_assertions::assert_eq;
use quill_grammar::{Category, Grammar, highlight_code};
use quill_lang::{BUILTIN_GRAMMARS, builtin_grammar, builtin_registry};

fn tagged(text: &str, grammar: &Grammar) -> Vec<(String, Option<Category>)> {
    highlight_code(text, grammar)
        .into_iter()
        .map(|span| (span.text.to_string(), span.category))
        .collect()
}

fn assert_has(spans: &[(String, Option<Category>)], text: &str, category: Category) {
    assert!(
        spans
            .iter()
            .any(|(t, c)| t == text && *c == Some(category)),
        "expected {text:?} as {category} in {spans:?}"
    );
}

#[test]
fn test_every_builtin_compiles_and_registers() {
    let registry = builtin_registry().unwrap();
    assert_eq!(registry.len(), BUILTIN_GRAMMARS.len());
    assert_eq!(registry.for_path("a/b/c.rs").unwrap().name(), "Rust");
    assert_eq!(registry.for_path("package.json").unwrap().name(), "JSON");
    assert_eq!(registry.for_path("index.mjs").unwrap().name(), "JavaScript");
    assert_eq!(registry.get_by_name("javascript").unwrap().name(), "JavaScript");
    assert!(builtin_grammar("cobol").is_none());
}

#[test]
fn test_json_document() {
    let grammar = builtin_grammar("json").unwrap().unwrap();
    let sym = Some(Category::SymbolLanguage);
    let string = Some(Category::StringDouble);
    let num = Some(Category::ConstantNumber);
    let lang = Some(Category::ConstantLanguage);
    let plain = |t: &str| (t.to_string(), None);
    let s = |t: &str, c: Option<Category>| (t.to_string(), c);

    assert_eq!(
        tagged(r#"{"a": [1, -2.5e3, true, null], "b": "x\n"}"#, &grammar),
        vec![
            s("{", sym),
            s("\"a\"", string),
            s(":", sym),
            plain(" "),
            s("[", sym),
            s("1", num),
            s(",", sym),
            plain(" "),
            s("-2.5e3", num),
            s(",", sym),
            plain(" "),
            s("true", lang),
            s(",", sym),
            plain(" "),
            s("null", lang),
            s("],", sym),
            plain(" "),
            s("\"b\"", string),
            s(":", sym),
            plain(" "),
            s("\"x", string),
            s("\\n", Some(Category::StringEscape)),
            s("\"", string),
            s("}", sym),
        ]
    );
}

#[test]
fn test_rust_source() {
    let grammar = builtin_grammar("rust").unwrap().unwrap();
    let text = "fn main() { let x: u8 = 0x1F; /* a /* b */ */ println!(\"{}\\n\", 'c'); } // end";
    let spans = tagged(text, &grammar);

    assert_has(&spans, "fn", Category::KeywordDecl);
    assert_has(&spans, "main", Category::VariableFunction);
    assert_has(&spans, "let", Category::KeywordDecl);
    assert_has(&spans, "u8", Category::Type);
    assert_has(&spans, "0x1F", Category::ConstantNumber);
    assert_has(&spans, "/* a /* b */ */", Category::CommentBlock);
    assert_has(&spans, "println!", Category::VariableFunction);
    assert_has(&spans, "\\n", Category::StringEscape);
    assert_has(&spans, "'c'", Category::StringSingle);
    assert_has(&spans, "// end", Category::CommentLine);
}

#[test]
fn test_rust_lifetimes_and_untagged_constants() {
    let grammar = builtin_grammar("rust").unwrap().unwrap();
    let spans = tagged("fn f<'a>(s: &'a str) -> MAX", &grammar);
    assert_has(&spans, "'a", Category::Type);
    assert_has(&spans, "str", Category::Type);
    assert!(spans.iter().any(|(t, c)| t.ends_with("MAX") && c.is_none()));
}

#[test]
fn test_javascript_source() {
    let grammar = builtin_grammar("javascript").unwrap().unwrap();
    let text = "const re = /ab+c/g; // note\nif (x) { s = \"a\\\"b\"; }";
    let spans = tagged(text, &grammar);

    assert_has(&spans, "const", Category::KeywordDecl);
    assert_has(&spans, "/ab+c/g", Category::StringRegex);
    assert_has(&spans, "// note", Category::CommentLine);
    assert_has(&spans, "if", Category::KeywordControl);
    assert_has(&spans, "\\\"", Category::StringEscape);
}

#[test]
fn test_javascript_unterminated_string_runs_to_end_of_input() {
    let grammar = builtin_grammar("javascript").unwrap().unwrap();
    assert_eq!(
        tagged("\"abc\nfoo\"", &grammar),
        vec![("\"abc\nfoo\"".to_string(), Some(Category::StringDouble))]
    );
    let spans = tagged("x = \"open\nif (y) {}", &grammar);
    assert_eq!(
        spans.last(),
        Some(&("\"open\nif (y) {}".to_string(), Some(Category::StringDouble)))
    );
}
